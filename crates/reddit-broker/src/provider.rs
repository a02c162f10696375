//! Capability interface implemented by federated identity providers

use crate::error::Result;
use crate::identity::FederatedIdentity;
use crate::json::JsonDocument;
use async_trait::async_trait;

/// Core trait for federated identity providers
///
/// The host runs the OAuth2 authorization-code exchange itself and hands the resulting access
/// token to [`get_federated_identity`](Self::get_federated_identity).
#[async_trait]
pub trait FederatedIdentityProvider: Send + Sync {
    /// Resolve the identity behind an access token
    ///
    /// Performs the provider's authorization checks too; a policy rejection is reported as
    /// [`BrokerError::AccessDenied`](crate::BrokerError::AccessDenied).
    async fn get_federated_identity(&self, access_token: &str) -> Result<FederatedIdentity>;

    /// Map an already-fetched profile document without any further checks
    fn extract_identity_from_profile(&self, profile: JsonDocument) -> Result<FederatedIdentity>;

    /// Space-separated scopes the authorization request must ask for
    fn default_scopes(&self) -> String;

    /// Endpoint the host may call to validate an externally issued token
    fn profile_endpoint(&self) -> &str;

    /// Whether tokens issued to other clients may be exchanged through this provider
    fn supports_external_exchange(&self) -> bool {
        false
    }

    /// Get provider name for logging/debugging
    fn name(&self) -> &str;
}
