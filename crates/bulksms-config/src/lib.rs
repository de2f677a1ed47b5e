use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bulksms_core::domain::gateway::{SANDBOX_SENDER_ID, SANDBOX_USERNAME};
use bulksms_core::rules::DEFAULT_COST_PER_SEGMENT;
use bulksms_core::{CountryCode, GatewayConfig, GatewayMode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "bulksms";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_country: CountryCode,
    pub cost_per_segment: f64,
    pub gateway: GatewayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_country: CountryCode::default(),
            cost_per_segment: DEFAULT_COST_PER_SEGMENT,
            gateway: GatewayConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid default_country_code value: {0}")]
    InvalidCountryCode(String),
    #[error("invalid cost_per_segment value: {0}")]
    InvalidCostPerSegment(f64),
    #[error("invalid gateway.{field}: {message}")]
    InvalidGatewayField {
        field: &'static str,
        message: String,
    },
    #[error("environment variable {0} for gateway.api_key_env is not set")]
    MissingApiKeyEnv(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    default_country_code: Option<String>,
    cost_per_segment: Option<f64>,
    gateway: Option<GatewayFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GatewayFile {
    mode: Option<GatewayMode>,
    username: Option<String>,
    api_key: Option<String>,
    api_key_env: Option<String>,
    sender_id: Option<String>,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(raw) = parsed.default_country_code {
        config.default_country =
            CountryCode::parse(&raw).map_err(|_| ConfigError::InvalidCountryCode(raw))?;
    }

    if let Some(cost) = parsed.cost_per_segment {
        if !cost.is_finite() || cost < 0.0 {
            return Err(ConfigError::InvalidCostPerSegment(cost));
        }
        config.cost_per_segment = cost;
    }

    if let Some(gateway) = parsed.gateway {
        config.gateway = merge_gateway(gateway)?;
    }

    Ok(config)
}

fn merge_gateway(file: GatewayFile) -> Result<GatewayConfig> {
    let mode = file.mode.unwrap_or_default();
    let mut gateway = GatewayConfig {
        mode,
        ..GatewayConfig::default()
    };

    // Live mode has no usable defaults; leave blanks for send-time validation.
    let (default_username, default_sender) = match mode {
        GatewayMode::Sandbox => (SANDBOX_USERNAME, SANDBOX_SENDER_ID),
        GatewayMode::Live => ("", ""),
    };
    // Credentials are handed to the gateway as written.
    gateway.username = file
        .username
        .unwrap_or_else(|| default_username.to_string());
    gateway.sender_id = file
        .sender_id
        .unwrap_or_else(|| default_sender.to_string());

    gateway.api_key = match (file.api_key, file.api_key_env) {
        (Some(_), Some(_)) => {
            return Err(ConfigError::InvalidGatewayField {
                field: "api_key_env",
                message: "cannot be combined with api_key".to_string(),
            })
        }
        (Some(key), None) => key,
        (None, Some(var)) => {
            let var = var.trim().to_string();
            if var.is_empty() {
                return Err(ConfigError::InvalidGatewayField {
                    field: "api_key_env",
                    message: "must not be empty".to_string(),
                });
            }
            match env::var(&var) {
                Ok(value) if !value.trim().is_empty() => value,
                _ => return Err(ConfigError::MissingApiKeyEnv(var)),
            }
        }
        (None, None) => String::new(),
    };

    if let Some(endpoint) = file.endpoint {
        gateway.endpoint = Some(validate_endpoint(endpoint.trim())?);
    }

    if let Some(timeout) = file.timeout_secs {
        if timeout == 0 {
            return Err(ConfigError::InvalidGatewayField {
                field: "timeout_secs",
                message: "must be positive".to_string(),
            });
        }
        gateway.timeout_secs = timeout;
    }

    Ok(gateway)
}

fn validate_endpoint(raw: &str) -> Result<String> {
    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidGatewayField {
        field: "endpoint",
        message: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidGatewayField {
            field: "endpoint",
            message: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url.to_string())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
