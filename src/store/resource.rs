/// Server-backed list plus the currently selected record, with request status.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            loading: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceAction<T> {
    Started,
    Loaded(Vec<T>),
    SelectedLoaded(T),
    Failed(String),
    Reset,
}

impl<T> ResourceState<T> {
    pub fn apply(&mut self, action: ResourceAction<T>) {
        match action {
            ResourceAction::Started => {
                self.loading = true;
                self.error = None;
            }
            ResourceAction::Loaded(items) => {
                self.loading = false;
                self.items = items;
            }
            ResourceAction::SelectedLoaded(item) => {
                self.loading = false;
                self.selected = Some(item);
            }
            ResourceAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            ResourceAction::Reset => *self = Self::default(),
        }
    }
}
