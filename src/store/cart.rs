use crate::domain::model::{CartItem, Product};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Add { product: Product, quantity: u32 },
    Remove { product_id: String },
    /// A quantity of zero removes the line.
    SetQuantity { product_id: String, quantity: u32 },
    Clear,
    Replace(Vec<CartItem>),
}

impl CartState {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|item| item.product.id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Whether `quantity` more of `product` fits its stock. A stock of 0 means untracked.
    pub fn fits_stock(&self, product: &Product, quantity: u32) -> bool {
        if product.stock == 0 {
            return true;
        }
        self.quantity_of(&product.id)
            .checked_add(quantity)
            .is_some_and(|wanted| wanted <= product.stock)
    }

    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add { quantity: 0, .. } => {}
            CartAction::Add { product, quantity } => {
                match self.items.iter_mut().find(|item| item.product.id == product.id) {
                    Some(item) => {
                        item.quantity = item.quantity.saturating_add(quantity);
                        // Keep the freshest copy of the product (price, stock).
                        item.product = product;
                    }
                    None => self.items.push(CartItem { product, quantity }),
                }
            }
            CartAction::Remove { product_id } => {
                self.items.retain(|item| item.product.id != product_id);
            }
            CartAction::SetQuantity { product_id, quantity: 0 } => {
                self.items.retain(|item| item.product.id != product_id);
            }
            CartAction::SetQuantity { product_id, quantity } => {
                if let Some(item) = self.items.iter_mut().find(|item| item.product.id == product_id) {
                    item.quantity = quantity;
                }
            }
            CartAction::Clear => self.items.clear(),
            CartAction::Replace(items) => {
                self.items = items.into_iter().filter(|item| item.quantity > 0).collect();
            }
        }
    }
}
