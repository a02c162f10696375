use crate::config::BrokerSettings;
use crate::factory::RedditIdentityProviderFactory;
use crate::provider::FederatedIdentityProvider;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

pub async fn handle_identity(config_path: Option<&Path>, token: &str) -> Result<()> {
    let settings = BrokerSettings::load(config_path)?;
    let provider = RedditIdentityProviderFactory.create(&settings)?;

    debug!(scopes = %provider.requested_scopes(), "Resolving identity");
    let identity = provider.get_federated_identity(token).await?;
    println!("{}", serde_json::to_string_pretty(&identity)?);
    Ok(())
}

pub fn handle_scopes(config_path: Option<&Path>) -> Result<()> {
    let settings = BrokerSettings::load(config_path)?;
    let provider = RedditIdentityProviderFactory.create(&settings)?;
    println!("{}", provider.requested_scopes());
    Ok(())
}

pub fn handle_describe() -> Result<()> {
    let descriptor = RedditIdentityProviderFactory.describe();
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

pub fn handle_example_config() -> Result<()> {
    print!("{}", BrokerSettings::generate_example()?);
    Ok(())
}
