// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client connection settings.
//!
//! [`ClientSettings`] describes which storage backend to use and how to reach
//! it. Settings are layered: built-in defaults, then a YAML file, then
//! `RIGEL_*` environment variables. Callers (such as `rigelctl`) apply their
//! own overrides last and call [`ClientSettings::connect`].

use crate::adapters::MemoryStorage;
use crate::domain::{ConfigError, KeyPaths, Result, DEFAULT_PREFIX};
use crate::service::Rigel;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable selecting the backend.
pub const ENV_BACKEND: &str = "RIGEL_BACKEND";
/// Environment variable holding comma separated endpoints.
pub const ENV_ENDPOINTS: &str = "RIGEL_ENDPOINTS";
/// Environment variable overriding the key prefix.
pub const ENV_PREFIX: &str = "RIGEL_PREFIX";

/// Maximum size of a settings file (1MB)
#[cfg(feature = "yaml")]
const MAX_SETTINGS_FILE_SIZE: u64 = 1024 * 1024;

const DEFAULT_ENDPOINT: &str = "localhost:2379";
const DEFAULT_DIAL_TIMEOUT_SECS: u64 = 5;

/// The storage backend a client connects to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// An etcd v3 cluster
    #[default]
    Etcd,
    /// A Redis server
    Redis,
    /// A process-local map, empty on every start
    Memory,
}

impl Backend {
    /// Returns the lowercase backend name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Etcd => "etcd",
            Backend::Redis => "redis",
            Backend::Memory => "memory",
        }
    }

    /// Returns `true` for backends reached over the network.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Backend::Memory)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "etcd" => Ok(Backend::Etcd),
            "redis" => Ok(Backend::Redis),
            "memory" => Ok(Backend::Memory),
            other => Err(ConfigError::SettingsError {
                message: format!("Unknown backend '{}'", other),
                source: None,
            }),
        }
    }
}

/// How to reach the configuration store.
///
/// # Examples
///
/// ```rust
/// use rigel::settings::{Backend, ClientSettings};
///
/// let settings = ClientSettings::default();
/// assert_eq!(settings.backend, Backend::Etcd);
/// assert_eq!(settings.endpoints, vec!["localhost:2379".to_string()]);
/// assert_eq!(settings.prefix, "/remiges/rigel");
/// assert!(settings.check().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Which backend to use
    pub backend: Backend,
    /// Backend endpoints; etcd accepts several, Redis uses the first
    pub endpoints: Vec<String>,
    /// Namespace prefix for every storage key
    pub prefix: String,
    /// Seconds allowed for establishing a connection
    pub dial_timeout_secs: u64,
    /// Seconds allowed per request; `0` leaves requests unbounded
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            endpoints: vec![DEFAULT_ENDPOINT.to_string()],
            prefix: DEFAULT_PREFIX.to_string(),
            dial_timeout_secs: DEFAULT_DIAL_TIMEOUT_SECS,
            request_timeout_secs: 0,
        }
    }
}

impl ClientSettings {
    /// Parses settings from YAML. Missing keys keep their defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rigel::settings::{Backend, ClientSettings};
    ///
    /// let settings = ClientSettings::from_yaml_str("backend: redis\nendpoints: [\"redis://cache:6379\"]\n").unwrap();
    /// assert_eq!(settings.backend, Backend::Redis);
    /// assert_eq!(settings.prefix, "/remiges/rigel");
    /// ```
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::SettingsError {
            message: format!("Failed to parse settings YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    /// Reads settings from a YAML file.
    #[cfg(feature = "yaml")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if metadata.len() > MAX_SETTINGS_FILE_SIZE {
            return Err(ConfigError::SettingsError {
                message: format!(
                    "Settings file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_SETTINGS_FILE_SIZE
                ),
                source: None,
            });
        }

        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// The OS-appropriate settings file location, e.g.
    /// `~/.config/rigel/rigelctl.yaml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rigel").map(|dirs| dirs.config_dir().join("rigelctl.yaml"))
    }

    /// Loads settings from `path`, or from [`ClientSettings::default_path`] if
    /// that file exists, then applies environment overrides.
    ///
    /// An explicit `path` must exist; a missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::read_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => Self::read_file(&path)?,
                None => Self::default(),
            },
        };
        settings.apply_env()
    }

    #[cfg(feature = "yaml")]
    fn read_file(path: &Path) -> Result<Self> {
        Self::from_file(path)
    }

    #[cfg(not(feature = "yaml"))]
    fn read_file(path: &Path) -> Result<Self> {
        Err(ConfigError::SettingsError {
            message: format!(
                "Cannot read {}: built without YAML support",
                path.display()
            ),
            source: None,
        })
    }

    /// Applies `RIGEL_*` overrides from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with("RIGEL_"))
            .collect();
        self.apply_vars(&vars)
    }

    /// Applies `RIGEL_*` overrides from the given variables.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rigel::settings::ClientSettings;
    /// use std::collections::HashMap;
    ///
    /// let mut vars = HashMap::new();
    /// vars.insert("RIGEL_ENDPOINTS".to_string(), "etcd-0:2379, etcd-1:2379".to_string());
    /// let settings = ClientSettings::default().apply_vars(&vars).unwrap();
    /// assert_eq!(settings.endpoints, vec!["etcd-0:2379", "etcd-1:2379"]);
    /// ```
    pub fn apply_vars(mut self, vars: &HashMap<String, String>) -> Result<Self> {
        if let Some(backend) = vars.get(ENV_BACKEND) {
            self.backend = backend.parse()?;
        }
        if let Some(endpoints) = vars.get(ENV_ENDPOINTS) {
            self.endpoints = split_endpoints(endpoints);
        }
        if let Some(prefix) = vars.get(ENV_PREFIX) {
            self.prefix = prefix.clone();
        }
        Ok(self)
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::SettingsError`] if a network backend has no
    /// endpoints or the prefix is empty.
    pub fn check(&self) -> Result<()> {
        if self.backend.is_remote() && self.endpoints.iter().all(|e| e.trim().is_empty()) {
            return Err(ConfigError::SettingsError {
                message: format!("No endpoints configured for {} backend", self.backend),
                source: None,
            });
        }
        if self.key_paths().prefix().is_empty() {
            return Err(ConfigError::SettingsError {
                message: "Key prefix must not be empty".to_string(),
                source: None,
            });
        }
        Ok(())
    }

    /// The key layout these settings select.
    pub fn key_paths(&self) -> KeyPaths {
        KeyPaths::new(self.prefix.as_str())
    }

    /// Validates the settings and connects a client to the selected backend.
    pub fn connect(&self) -> Result<Rigel> {
        self.check()?;
        tracing::debug!(
            "Connecting to {} backend at {:?}",
            self.backend,
            self.endpoints
        );

        let builder = Rigel::builder().prefix(self.prefix.as_str());
        let builder = match self.backend {
            Backend::Memory => builder.storage(MemoryStorage::new()),
            Backend::Etcd => builder.shared_storage(self.connect_etcd()?),
            Backend::Redis => builder.shared_storage(self.connect_redis()?),
        };
        builder.build()
    }

    fn endpoints(&self) -> Vec<&str> {
        self.endpoints
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .collect()
    }

    #[cfg(feature = "etcd")]
    fn connect_etcd(&self) -> Result<std::sync::Arc<dyn crate::ports::Storage>> {
        use std::time::Duration;

        let mut options = etcd_client::ConnectOptions::new()
            .with_connect_timeout(Duration::from_secs(self.dial_timeout_secs));
        if self.request_timeout_secs > 0 {
            options = options.with_timeout(Duration::from_secs(self.request_timeout_secs));
        }
        let storage = crate::adapters::EtcdStorage::connect_with_options(self.endpoints(), options)?;
        Ok(std::sync::Arc::new(storage))
    }

    #[cfg(not(feature = "etcd"))]
    fn connect_etcd(&self) -> Result<std::sync::Arc<dyn crate::ports::Storage>> {
        Err(unsupported(Backend::Etcd))
    }

    #[cfg(feature = "redis")]
    fn connect_redis(&self) -> Result<std::sync::Arc<dyn crate::ports::Storage>> {
        let endpoint = self.endpoints().first().copied().unwrap_or_default();
        let url = if endpoint.contains("://") {
            endpoint.to_string()
        } else {
            format!("redis://{}", endpoint)
        };
        let storage = crate::adapters::RedisStorage::connect(&url)?;
        Ok(std::sync::Arc::new(storage))
    }

    #[cfg(not(feature = "redis"))]
    fn connect_redis(&self) -> Result<std::sync::Arc<dyn crate::ports::Storage>> {
        Err(unsupported(Backend::Redis))
    }
}

#[allow(dead_code)]
fn unsupported(backend: Backend) -> ConfigError {
    ConfigError::SettingsError {
        message: format!("Built without {} support", backend),
        source: None,
    }
}

fn split_endpoints(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigService;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::default();
        assert_eq!(settings.backend, Backend::Etcd);
        assert_eq!(settings.dial_timeout_secs, 5);
        assert_eq!(settings.request_timeout_secs, 0);
        assert!(settings.check().is_ok());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("ETCD".parse::<Backend>().unwrap(), Backend::Etcd);
        assert_eq!(" redis ".parse::<Backend>().unwrap(), Backend::Redis);
        assert_eq!("memory".parse::<Backend>().unwrap(), Backend::Memory);
        assert!("consul".parse::<Backend>().is_err());
    }

    #[test]
    fn test_apply_vars() {
        let settings = ClientSettings::default()
            .apply_vars(&vars(&[
                (ENV_BACKEND, "redis"),
                (ENV_ENDPOINTS, "cache:6379,,"),
                (ENV_PREFIX, "/acme"),
            ]))
            .unwrap();
        assert_eq!(settings.backend, Backend::Redis);
        assert_eq!(settings.endpoints, vec!["cache:6379".to_string()]);
        assert_eq!(settings.prefix, "/acme");
    }

    #[test]
    fn test_apply_vars_bad_backend() {
        let err = ClientSettings::default()
            .apply_vars(&vars(&[(ENV_BACKEND, "zookeeper")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::SettingsError { .. }));
    }

    #[test]
    fn test_check_rejects_empty_endpoints() {
        let settings = ClientSettings {
            endpoints: vec![" ".to_string()],
            ..ClientSettings::default()
        };
        assert!(settings.check().is_err());

        let memory = ClientSettings {
            backend: Backend::Memory,
            endpoints: vec![],
            ..ClientSettings::default()
        };
        assert!(memory.check().is_ok());
    }

    #[test]
    fn test_check_rejects_empty_prefix() {
        let settings = ClientSettings {
            prefix: "//".to_string(),
            ..ClientSettings::default()
        };
        assert!(matches!(
            settings.check().unwrap_err(),
            ConfigError::SettingsError { .. }
        ));
    }

    #[test]
    fn test_connect_memory() {
        let settings = ClientSettings {
            backend: Backend::Memory,
            prefix: "/test/".to_string(),
            ..ClientSettings::default()
        };
        let rigel = settings.connect().unwrap();
        assert_eq!(rigel.key_paths().prefix(), "/test");
        assert_eq!(rigel.storage().name(), "memory");
        assert!(rigel.get_schema("s", 1).unwrap_err().is_not_found());
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml_str() {
        let settings = ClientSettings::from_yaml_str(
            "backend: memory\nprefix: /other\ndial_timeout_secs: 2\n",
        )
        .unwrap();
        assert_eq!(settings.backend, Backend::Memory);
        assert_eq!(settings.prefix, "/other");
        assert_eq!(settings.dial_timeout_secs, 2);
        assert_eq!(settings.endpoints, vec![DEFAULT_ENDPOINT.to_string()]);
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml_str_empty() {
        assert_eq!(
            ClientSettings::from_yaml_str("").unwrap(),
            ClientSettings::default()
        );
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml_str_invalid() {
        let err = ClientSettings::from_yaml_str("backend: [oops").unwrap_err();
        assert!(matches!(err, ConfigError::SettingsError { .. }));
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend: redis").unwrap();
        writeln!(file, "endpoints:").unwrap();
        writeln!(file, "  - redis://cache:6379").unwrap();
        file.flush().unwrap();

        let settings = ClientSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.backend, Backend::Redis);
        assert_eq!(settings.endpoints, vec!["redis://cache:6379".to_string()]);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert!(ClientSettings::load(Some(&missing)).is_err());
    }
}
