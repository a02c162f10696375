//! Provider factory and configuration-property descriptor for the host's admin UI

use crate::config::{BrokerSettings, ClientAuthMethod, Endpoints, ProviderConfig};
use crate::constants::{ALLOWED_GUILDS_PROPERTY, PROVIDER_ID, PROVIDER_NAME};
use crate::error::Result;
use crate::http::RedditApiClient;
use crate::reddit::RedditIdentityProvider;
use serde::Serialize;
use tracing::debug;

/// Kind of value a configuration property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
}

/// One administrator-facing configuration property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigProperty {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub label: &'static str,
    pub help_text: &'static str,
}

/// Everything the host needs to register and display this provider
#[derive(Debug, Clone, Serialize)]
pub struct ProviderDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub endpoints: Endpoints,
    pub client_auth_method: ClientAuthMethod,
    pub supports_external_exchange: bool,
    pub properties: Vec<ConfigProperty>,
}

/// Builds [`RedditIdentityProvider`] instances from persisted settings
#[derive(Debug, Clone, Copy, Default)]
pub struct RedditIdentityProviderFactory;

impl RedditIdentityProviderFactory {
    pub fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    pub fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    /// Blank settings for a new provider instance
    pub fn create_config(&self) -> BrokerSettings {
        BrokerSettings::default()
    }

    /// Build a provider from validated settings, injecting Reddit's fixed endpoints
    pub fn create(&self, settings: &BrokerSettings) -> Result<RedditIdentityProvider> {
        self.create_with_endpoints(settings, Endpoints::reddit())
    }

    /// As [`create`](Self::create), but against other endpoints
    pub fn create_with_endpoints(
        &self,
        settings: &BrokerSettings,
        endpoints: Endpoints,
    ) -> Result<RedditIdentityProvider> {
        settings.validate()?;
        let api = RedditApiClient::new(&settings.http)?;
        let config = ProviderConfig::from_settings(settings).with_endpoints(endpoints);

        debug!(
            alias = %config.alias,
            allowed_guilds = config.allowed_guilds.len(),
            "Created Reddit identity provider"
        );
        Ok(RedditIdentityProvider::new(config, api))
    }

    pub fn config_properties(&self) -> Vec<ConfigProperty> {
        vec![ConfigProperty {
            name: ALLOWED_GUILDS_PROPERTY,
            property_type: PropertyType::String,
            label: "Guild Id(s) to allow federation",
            help_text: "If you want to allow federation for specific guild, enter the guild id. \
                        Please use a comma as a separator for multiple guilds.",
        }]
    }

    pub fn describe(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            id: self.id(),
            name: self.name(),
            endpoints: Endpoints::reddit(),
            client_auth_method: ClientAuthMethod::ClientSecretBasic,
            supports_external_exchange: true,
            properties: self.config_properties(),
        }
    }
}
