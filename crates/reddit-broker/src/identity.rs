//! Normalized identity handed back to the host

use crate::json::JsonDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a successful extraction
///
/// `raw_profile` keeps the complete profile document so that the host's attribute mappers
/// can project any field into user attributes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FederatedIdentity {
    /// Reddit account id, unmodified
    pub external_id: String,
    /// Reddit account name, unmodified
    pub username: String,
    /// Alias of the provider instance that produced this identity
    pub idp_alias: String,
    pub raw_profile: JsonDocument,
}

impl FederatedIdentity {
    pub fn new(
        external_id: impl Into<String>,
        username: impl Into<String>,
        idp_alias: impl Into<String>,
        raw_profile: JsonDocument,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            username: username.into(),
            idp_alias: idp_alias.into(),
            raw_profile,
        }
    }

    /// Raw profile field, for attribute mappers
    pub fn profile_attribute(&self, field: &str) -> Option<&Value> {
        self.raw_profile.get(field)
    }
}
