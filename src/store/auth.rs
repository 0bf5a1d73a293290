use crate::domain::model::{AuthSession, User};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Started,
    Succeeded(AuthSession),
    Failed(String),
    /// Token found in local storage at startup; the user record is fetched lazily.
    Restored(String),
    Logout,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::Started => {
                self.loading = true;
                self.error = None;
            }
            AuthAction::Succeeded(session) => {
                self.loading = false;
                self.error = None;
                self.token = Some(session.token);
                self.user = Some(session.user);
            }
            AuthAction::Failed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            AuthAction::Restored(token) => {
                self.token = Some(token);
            }
            AuthAction::Logout => *self = Self::default(),
        }
    }
}
