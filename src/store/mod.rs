//! Client-side state, split into slices that mirror server resources.
//!
//! Every change goes through [`Store::dispatch`]; slices never mutate each other
//! directly. Cross-slice effects (logging out, moving a wishlist item into the
//! cart) are resolved here.

pub mod auth;
pub mod cart;
pub mod resource;
pub mod wishlist;

pub use auth::{AuthAction, AuthState};
pub use cart::{CartAction, CartState};
pub use resource::{ResourceAction, ResourceState};
pub use wishlist::{WishlistAction, WishlistState};

use crate::domain::model::{Delivery, Product, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(AuthAction),
    Cart(CartAction),
    Wishlist(WishlistAction),
    Products(ResourceAction<Product>),
    Transactions(ResourceAction<Transaction>),
    Deliveries(ResourceAction<Delivery>),
    MoveToCart { product_id: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub auth: AuthState,
    pub cart: CartState,
    pub wishlist: WishlistState,
    pub products: ResourceState<Product>,
    pub transactions: ResourceState<Transaction>,
    pub deliveries: ResourceState<Delivery>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Auth(AuthAction::Logout) => {
                self.auth.apply(AuthAction::Logout);
                self.transactions.apply(ResourceAction::Reset);
                self.deliveries.apply(ResourceAction::Reset);
            }
            Action::Auth(action) => self.auth.apply(action),
            Action::Cart(action) => self.cart.apply(action),
            Action::Wishlist(action) => self.wishlist.apply(action),
            Action::Products(action) => self.products.apply(action),
            Action::Transactions(action) => self.transactions.apply(action),
            Action::Deliveries(action) => self.deliveries.apply(action),
            Action::MoveToCart { product_id } => self.move_to_cart(&product_id),
        }
    }

    fn move_to_cart(&mut self, product_id: &str) {
        let Some(item) = self
            .wishlist
            .items
            .iter()
            .find(|item| item.product.id == product_id)
            .cloned()
        else {
            tracing::debug!("Product {} is not in the wishlist", product_id);
            return;
        };

        self.wishlist.apply(WishlistAction::Remove {
            product_id: product_id.to_string(),
        });
        self.cart.apply(CartAction::Add {
            product: item.product,
            quantity: 1,
        });
    }
}
