#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::StorefrontConfig;

use crate::adapters::http::resolve_base_url;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = ".storefront";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Effective settings after merging flags, the config file and the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub timeout: Duration,
    pub json_logs: bool,
}

impl Settings {
    /// Flags win over the file; the file wins over `STOREFRONT_API_URL` and defaults.
    pub fn resolve(
        api_url: Option<&str>,
        data_dir: Option<&str>,
        json_logs: bool,
        file: &StorefrontConfig,
    ) -> Self {
        let base_url = resolve_base_url(api_url.or(file.api.base_url.as_deref()));
        let data_dir = data_dir
            .or(file.storage.data_dir.as_deref())
            .unwrap_or(DEFAULT_DATA_DIR);

        Self {
            base_url,
            data_dir: PathBuf::from(data_dir),
            timeout: Duration::from_secs(file.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)),
            json_logs: json_logs || file.logging.json.unwrap_or(false),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.base_url)?;
        validate_path("data_dir", &self.data_dir.to_string_lossy())?;
        Ok(())
    }
}
