//! Reddit implementation of [`FederatedIdentityProvider`]

use crate::config::ProviderConfig;
use crate::constants::{DEFAULT_SCOPE, GUILDS_SCOPE, PROVIDER_NAME};
use crate::error::{BrokerError, Result};
use crate::http::RedditApiClient;
use crate::identity::FederatedIdentity;
use crate::json::{self, JsonDocument};
use crate::provider::FederatedIdentityProvider;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Reddit identity provider with optional subreddit-moderator gating
///
/// Holds only read-only state; wrap it in an `Arc` to share it between requests.
#[derive(Debug, Clone)]
pub struct RedditIdentityProvider {
    config: ProviderConfig,
    api: RedditApiClient,
}

impl RedditIdentityProvider {
    pub fn new(config: ProviderConfig, api: RedditApiClient) -> Self {
        Self { config, api }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Scopes to request: the administrator's override if set, otherwise
    /// [`default_scopes`](FederatedIdentityProvider::default_scopes)
    pub fn requested_scopes(&self) -> String {
        match &self.config.default_scope_override {
            Some(scope) => scope.clone(),
            None => self.default_scopes(),
        }
    }

    /// Endpoint used by the host when validating an externally issued token
    pub fn profile_endpoint_for_validation(&self) -> &str {
        &self.config.endpoints.profile_url
    }

    /// Fetch the profile document for `access_token`
    pub async fn fetch_profile(&self, access_token: &str) -> Result<JsonDocument> {
        let value = self
            .api
            .get_json(&self.config.endpoints.profile_url, access_token)
            .await
            .map_err(BrokerError::ProfileFetchFailed)?;
        JsonDocument::from_value(value).map_err(BrokerError::ProfileFetchFailed)
    }

    /// Whether the user moderates at least one allowed subreddit
    ///
    /// Always issues the moderator-listing request, so callers should skip it when the
    /// allow-list is empty.
    pub async fn is_allowed_guild(&self, access_token: &str) -> Result<bool> {
        let value = self
            .api
            .get_json(&self.config.endpoints.groups_url, access_token)
            .await
            .map_err(BrokerError::GroupFetchFailed)?;
        let guilds = json::object_list(value).map_err(BrokerError::GroupFetchFailed)?;

        let matched = guilds
            .iter()
            .filter_map(|guild| guild.text("id"))
            .find(|id| self.config.allowed_guilds.contains(id));

        debug!(
            moderated = guilds.len(),
            matched = matched.as_deref().unwrap_or("<none>"),
            "Checked moderated subreddits against allow-list"
        );
        Ok(matched.is_some())
    }
}

#[async_trait]
impl FederatedIdentityProvider for RedditIdentityProvider {
    async fn get_federated_identity(&self, access_token: &str) -> Result<FederatedIdentity> {
        debug!(alias = %self.config.alias, "Resolving federated identity");

        let profile = self.fetch_profile(access_token).await?;
        let identity = self.extract_identity_from_profile(profile)?;

        if self.config.has_allowed_guilds() && !self.is_allowed_guild(access_token).await? {
            warn!(
                alias = %self.config.alias,
                external_id = %identity.external_id,
                "User moderates none of the allowed subreddits"
            );
            return Err(BrokerError::AccessDenied);
        }

        info!(
            alias = %self.config.alias,
            external_id = %identity.external_id,
            username = %identity.username,
            "Federated identity resolved"
        );
        Ok(identity)
    }

    fn extract_identity_from_profile(&self, profile: JsonDocument) -> Result<FederatedIdentity> {
        let external_id = profile
            .require_text("id")
            .map_err(BrokerError::ProfileFetchFailed)?;
        let username = profile
            .require_text("name")
            .map_err(BrokerError::ProfileFetchFailed)?;

        Ok(FederatedIdentity::new(
            external_id,
            username,
            self.config.alias.clone(),
            profile,
        ))
    }

    fn default_scopes(&self) -> String {
        if self.config.has_allowed_guilds() {
            format!("{DEFAULT_SCOPE} {GUILDS_SCOPE}")
        } else {
            DEFAULT_SCOPE.to_string()
        }
    }

    fn profile_endpoint(&self) -> &str {
        &self.config.endpoints.profile_url
    }

    fn supports_external_exchange(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}
