use crate::store::Store;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Products,
    ProductDetail(String),
    Cart,
    Wishlist,
    Checkout,
    Orders,
    OrderStatus(String),
    Login,
    Register,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

impl Route {
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Wishlist | Self::Checkout | Self::Orders | Self::OrderStatus(_) | Self::Profile
        )
    }

    /// Pages that make no sense for a signed-in user.
    pub fn guest_only(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Products => "/products".to_string(),
            Self::ProductDetail(id) => format!("/products/{}", id),
            Self::Cart => "/cart".to_string(),
            Self::Wishlist => "/wishlist".to_string(),
            Self::Checkout => "/checkout".to_string(),
            Self::Orders => "/orders".to_string(),
            Self::OrderStatus(id) => format!("/orders/{}", id),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Profile => "/profile".to_string(),
        }
    }
}

/// Decides whether `route` may be shown for the current state.
pub fn guard(route: &Route, store: &Store) -> Access {
    let authenticated = store.auth.is_authenticated();

    if route.guest_only() && authenticated {
        return Access::Redirect(Route::Home);
    }
    if route.requires_auth() && !authenticated {
        tracing::debug!("Redirecting {} to login", route.path());
        return Access::Redirect(Route::Login);
    }
    if *route == Route::Checkout && store.cart.is_empty() {
        return Access::Redirect(Route::Cart);
    }
    Access::Allow
}
