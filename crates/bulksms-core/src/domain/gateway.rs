use crate::error::CoreError;
use serde::{Deserialize, Serialize};

pub const SANDBOX_USERNAME: &str = "sandbox";
pub const SANDBOX_SENDER_ID: &str = "AFRICASTKNG";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    #[default]
    Sandbox,
    Live,
}

impl GatewayMode {
    pub fn is_sandbox(self) -> bool {
        matches!(self, GatewayMode::Sandbox)
    }
}

/// Credentials and mode flags handed to the gateway verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub mode: GatewayMode,
    pub username: String,
    pub api_key: String,
    pub sender_id: String,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mode: GatewayMode::Sandbox,
            username: SANDBOX_USERNAME.to_string(),
            api_key: String::new(),
            sender_id: SANDBOX_SENDER_ID.to_string(),
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.username.trim().is_empty() {
            return Err(CoreError::GatewayConfigInvalid("username"));
        }
        if self.api_key.trim().is_empty() {
            return Err(CoreError::GatewayConfigInvalid("api_key"));
        }
        if self.sender_id.trim().is_empty() {
            return Err(CoreError::GatewayConfigInvalid("sender_id"));
        }
        Ok(())
    }
}

// The api key never reaches logs through `{:?}`.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("mode", &self.mode)
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("sender_id", &self.sender_id)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
