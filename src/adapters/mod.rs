// Adapters layer: concrete implementations of the domain ports (HTTP API, local storage).

pub mod http;
pub mod storage;

pub use http::ApiClient;
pub use storage::LocalStorage;
