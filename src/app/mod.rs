pub mod auth;
pub mod storefront;

pub use auth::{FieldErrors, LoginUseCase, RegisterUseCase};
pub use storefront::{CheckoutForm, Storefront};
