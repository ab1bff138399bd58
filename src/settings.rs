use crate::synthetic::store::DEFAULT_SYNTHETIC_SERIES_PATH;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_FILE: &str = "config/infoclimat";
const ENV_PREFIX: &str = "INFOCLIMAT";

/// Runtime configuration.
///
/// Loaded by [`Settings::load`] from an optional `config/infoclimat.{toml,json,yaml}` file,
/// overridden by `INFOCLIMAT_*` environment variables (`INFOCLIMAT_API_BASE`,
/// `INFOCLIMAT_SYNTHETIC_SERIES_PATH`, `INFOCLIMAT_REQUEST_TIMEOUT_SECS`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Base URL of the remote service, possibly with a path prefix such as `/api/v1`.
    pub api_base: String,
    #[serde(default = "default_synthetic_series_path")]
    pub synthetic_series_path: PathBuf,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_synthetic_series_path() -> PathBuf {
    PathBuf::from(DEFAULT_SYNTHETIC_SERIES_PATH)
}

impl Settings {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            synthetic_series_path: default_synthetic_series_path(),
            request_timeout_secs: None,
        }
    }

    pub fn with_synthetic_series_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.synthetic_series_path = path.into();
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::layered(
            Config::builder().add_source(File::with_name(CONFIG_FILE).required(false)),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    fn layered(
        builder: ConfigBuilder<DefaultState>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        builder
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
