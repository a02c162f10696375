//! Settings loading and the immutable provider configuration built from them

use crate::allow_list::AllowList;
use crate::constants::{ALLOWED_GUILDS_PROPERTY, AUTH_URL, GROUP_URL, PROFILE_URL, TOKEN_URL};
use broker_common::config::{self as loader, ConfigLoader, ConfigurationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default settings file looked up in the working directory
pub const CONFIG_FILE: &str = "reddit-broker.toml";

/// Environment prefix; nested keys use `__`, e.g. `REDDIT_BROKER_HTTP__TIMEOUT_SECS`
pub const ENV_PREFIX: &str = "REDDIT_BROKER_";

/// Host property names accepted in the settings file
const KEY_ALIASES: &[(&str, &str)] = &[(ALLOWED_GUILDS_PROPERTY, "allowed_guilds")];

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Sent on every request; Reddit throttles generic agents
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("reddit-broker/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Administrator settings as persisted by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerSettings {
    /// Alias of this provider instance on the host
    pub alias: String,

    pub client_id: String,

    pub client_secret: String,

    /// Comma-separated subreddit ids; blank disables moderator gating. The file may use the
    /// host property name `allowedGuilds` instead.
    pub allowed_guilds: String,

    /// Overrides the computed default scopes when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_scope: Option<String>,

    pub http: HttpSettings,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            alias: "reddit".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            allowed_guilds: String::new(),
            default_scope: None,
            http: HttpSettings::default(),
        }
    }
}

impl BrokerSettings {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let settings = match config_path {
            Some(path) => <Self as ConfigLoader<Self>>::load_from_file(path)?,
            None => <Self as ConfigLoader<Self>>::load(None)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String, ConfigurationError> {
        loader::to_toml(&Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.alias.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                key: "alias".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "http.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigurationError::InvalidValue {
                key: "http.user_agent".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn allowed_guilds(&self) -> AllowList {
        AllowList::parse(&self.allowed_guilds)
    }
}

impl ConfigLoader<BrokerSettings> for BrokerSettings {
    fn load(path: Option<PathBuf>) -> Result<BrokerSettings, ConfigurationError> {
        let file = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        loader::extract(&loader::layered_figment(
            &Self::default(),
            &file,
            ENV_PREFIX,
            KEY_ALIASES,
        )?)
    }

    fn load_from_file(path: &Path) -> Result<BrokerSettings, ConfigurationError> {
        let figment = loader::layered_figment_strict(&Self::default(), path, ENV_PREFIX, KEY_ALIASES)?;
        loader::extract(&figment)
    }

    fn apply_env_overrides(
        config: &mut BrokerSettings,
        prefix: &str,
    ) -> Result<(), ConfigurationError> {
        *config = loader::extract(&loader::env_overlay(config, prefix))?;
        Ok(())
    }
}

/// How the host authenticates the client against the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
    /// HTTP Basic with client id and secret
    ClientSecretBasic,
}

impl ClientAuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientAuthMethod::ClientSecretBasic => "client_secret_basic",
        }
    }
}

impl fmt::Display for ClientAuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoint URLs used by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoints {
    pub authorization_url: String,
    pub token_url: String,
    pub profile_url: String,
    pub groups_url: String,
}

impl Endpoints {
    /// Reddit's production endpoints
    pub fn reddit() -> Self {
        Self {
            authorization_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            profile_url: PROFILE_URL.to_string(),
            groups_url: GROUP_URL.to_string(),
        }
    }

    /// Same paths as [`reddit`](Self::reddit), appended to `base` (e.g. a mock server)
    ///
    /// Any path already on `base` is kept as a prefix: `http://host/proxy` gives
    /// `http://host/proxy/api/v1/me`.
    pub fn rooted_at(base: &str) -> Result<Self, ConfigurationError> {
        let invalid = |key: &str, e: url::ParseError| ConfigurationError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        };

        let mut base = Url::parse(base).map_err(|e| invalid("endpoints.base", e))?;
        if !base.path().ends_with('/') {
            let prefix = format!("{}/", base.path());
            base.set_path(&prefix);
        }

        let rebase = |original: &str| -> Result<String, ConfigurationError> {
            let original = Url::parse(original).map_err(|e| invalid("endpoints", e))?;
            base.join(original.path().trim_start_matches('/'))
                .map(String::from)
                .map_err(|e| invalid("endpoints.base", e))
        };

        Ok(Self {
            authorization_url: rebase(AUTH_URL)?,
            token_url: rebase(TOKEN_URL)?,
            profile_url: rebase(PROFILE_URL)?,
            groups_url: rebase(GROUP_URL)?,
        })
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::reddit()
    }
}

/// Immutable configuration of one provider instance
///
/// The allow-list is parsed once here; nothing is mutated afterwards, so a provider built from
/// it can be shared across concurrent login attempts.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub alias: String,
    pub client_id: String,
    pub client_secret: String,
    pub endpoints: Endpoints,
    pub client_auth_method: ClientAuthMethod,
    pub allowed_guilds: AllowList,
    pub default_scope_override: Option<String>,
}

impl ProviderConfig {
    pub fn from_settings(settings: &BrokerSettings) -> Self {
        Self {
            alias: settings.alias.clone(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            endpoints: Endpoints::reddit(),
            client_auth_method: ClientAuthMethod::ClientSecretBasic,
            allowed_guilds: settings.allowed_guilds(),
            default_scope_override: settings
                .default_scope
                .as_deref()
                .map(str::trim)
                .filter(|scope| !scope.is_empty())
                .map(str::to_string),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn has_allowed_guilds(&self) -> bool {
        !self.allowed_guilds.is_empty()
    }
}
