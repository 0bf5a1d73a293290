use crate::domain::model::{Product, WishlistItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WishlistState {
    pub items: Vec<WishlistItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WishlistAction {
    Add { product: Product, at: DateTime<Utc> },
    Remove { product_id: String },
    Clear,
    Replace(Vec<WishlistItem>),
}

impl WishlistState {
    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.product.id == product_id)
    }

    pub fn apply(&mut self, action: WishlistAction) {
        match action {
            WishlistAction::Add { product, at } => {
                if !self.contains(&product.id) {
                    self.items.push(WishlistItem { product, added_at: at });
                }
            }
            WishlistAction::Remove { product_id } => {
                self.items.retain(|item| item.product.id != product_id);
            }
            WishlistAction::Clear => self.items.clear(),
            WishlistAction::Replace(items) => self.items = items,
        }
    }
}
