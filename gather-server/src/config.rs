//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::DEFAULT_MAX_STATIONS;
use crate::remote::CallableClientConfig;

/// Errors reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: &'static str, message: String },
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Route color catalog on disk. The bundled catalog is used when unset.
    pub route_colors_path: Option<PathBuf>,

    /// Station catalog on disk. The bundled catalog is used when unset.
    pub stations_path: Option<PathBuf>,

    /// JSON document holding stored preferences.
    pub storage_path: PathBuf,

    /// Remote functions endpoint. Meetup endpoints are disabled when unset.
    pub functions_url: Option<String>,

    pub functions_token: Option<String>,

    /// Maximum stations per category.
    pub max_category_stations: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            route_colors_path: None,
            stations_path: None,
            storage_path: PathBuf::from("gather_preferences.json"),
            functions_url: None,
            functions_token: None,
            max_category_stations: DEFAULT_MAX_STATIONS,
        }
    }
}

impl AppConfig {
    /// Read configuration from `GATHER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("GATHER_BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    var: "GATHER_BIND_ADDR",
                    message: e.to_string(),
                }
            })?;
        }
        if let Some(path) = get("GATHER_ROUTE_COLORS") {
            config.route_colors_path = Some(PathBuf::from(path));
        }
        if let Some(path) = get("GATHER_STATIONS") {
            config.stations_path = Some(PathBuf::from(path));
        }
        if let Some(path) = get("GATHER_STORAGE_PATH") {
            config.storage_path = PathBuf::from(path);
        }
        config.functions_url = get("GATHER_FUNCTIONS_URL");
        config.functions_token = get("GATHER_FUNCTIONS_TOKEN");
        if let Some(max) = get("GATHER_MAX_CATEGORY_STATIONS") {
            config.max_category_stations = match max.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        var: "GATHER_MAX_CATEGORY_STATIONS",
                        message: "must be at least 1".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        var: "GATHER_MAX_CATEGORY_STATIONS",
                        message: e.to_string(),
                    });
                }
            };
        }

        Ok(config)
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    pub fn with_functions_url(mut self, url: impl Into<String>) -> Self {
        self.functions_url = Some(url.into());
        self
    }

    pub fn with_max_category_stations(mut self, max: usize) -> Self {
        self.max_category_stations = max;
        self
    }

    /// Client config for the remote functions, if an endpoint is set.
    pub fn callable_client_config(&self) -> Option<CallableClientConfig> {
        let url = self.functions_url.as_ref()?;
        let config = CallableClientConfig::new(url);
        Some(match &self.functions_token {
            Some(token) => config.with_token(token),
            None => config,
        })
    }
}
