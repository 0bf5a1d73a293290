pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod guard;
pub mod store;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ApiClient, LocalStorage};
pub use app::{CheckoutForm, Storefront};
pub use config::{Settings, StorefrontConfig};
pub use domain::card;
pub use store::{Action, Store};
pub use utils::error::{Result, StorefrontError};
