//! Layered configuration loading
//!
//! Every broker binary resolves its settings the same way: serialized defaults, then an
//! optional TOML file, then environment variables under a binary-specific prefix with `__`
//! separating nested keys.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::Dict,
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    #[error("Configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Loader contract implemented by each settings type
pub trait ConfigLoader<T> {
    /// Load from `path`, or the binary's default file when `None`. A missing default file is
    /// not an error.
    fn load(path: Option<PathBuf>) -> Result<T, ConfigurationError>;

    /// Load from an explicit file, which must exist.
    fn load_from_file(path: &Path) -> Result<T, ConfigurationError>;

    /// Re-apply environment overrides under `prefix` on top of an existing value.
    fn apply_env_overrides(config: &mut T, prefix: &str) -> Result<(), ConfigurationError>;
}

/// Top-level key renames applied to the TOML layer, as `(file_key, field_key)` pairs
pub type KeyAliases<'a> = &'a [(&'a str, &'a str)];

/// TOML file layer with top-level keys renamed per `aliases`
///
/// Renaming happens before merging so an aliased key replaces the default instead of
/// colliding with it. A missing file yields an empty layer.
pub fn aliased_toml(file: &Path, aliases: KeyAliases<'_>) -> Result<Serialized<Dict>, ConfigurationError> {
    let mut dict: Dict = extract(&Figment::from(Toml::file(file)))?;
    for (from, to) in aliases {
        if let Some(value) = dict.remove(*from) {
            dict.insert((*to).to_string(), value);
        }
    }
    Ok(Serialized::defaults(dict))
}

/// Defaults, then `file` (skipped when absent), then `env_prefix` variables.
pub fn layered_figment<T: Serialize>(
    defaults: &T,
    file: &Path,
    env_prefix: &str,
    aliases: KeyAliases<'_>,
) -> Result<Figment, ConfigurationError> {
    Ok(Figment::from(Serialized::defaults(defaults))
        .merge(aliased_toml(file, aliases)?)
        .merge(Env::prefixed(env_prefix).split("__")))
}

/// Like [`layered_figment`] but fails when `file` does not exist.
pub fn layered_figment_strict<T: Serialize>(
    defaults: &T,
    file: &Path,
    env_prefix: &str,
    aliases: KeyAliases<'_>,
) -> Result<Figment, ConfigurationError> {
    if !file.exists() {
        return Err(ConfigurationError::FileNotFound {
            path: file.to_path_buf(),
        });
    }
    layered_figment(defaults, file, env_prefix, aliases)
}

/// Overlay only environment variables on top of `current`.
pub fn env_overlay<T: Serialize>(current: &T, env_prefix: &str) -> Figment {
    Figment::from(Serialized::defaults(current)).merge(Env::prefixed(env_prefix).split("__"))
}

pub fn extract<T: DeserializeOwned>(figment: &Figment) -> Result<T, ConfigurationError> {
    figment.extract().map_err(|e| ConfigurationError::ParseError {
        details: e.to_string(),
    })
}

/// Render a settings value as pretty TOML, e.g. for `example-config` style commands.
pub fn to_toml<T: Serialize>(value: &T) -> Result<String, ConfigurationError> {
    toml::to_string_pretty(value).map_err(|e| ConfigurationError::ParseError {
        details: format!("Failed to serialize config: {e}"),
    })
}
