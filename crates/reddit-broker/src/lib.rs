//! Reddit identity broker provider
//!
//! Lets an identity platform federate users through Reddit's OAuth2 flow. The platform runs
//! the authorization-code exchange; this crate takes the resulting access token and:
//!
//! 1. fetches the user's profile,
//! 2. when an allow-list of subreddit ids is configured, checks that the user moderates at
//!    least one of them,
//! 3. maps the profile into a [`FederatedIdentity`].
//!
//! ```rust,no_run
//! use reddit_broker::{BrokerSettings, FederatedIdentityProvider, RedditIdentityProviderFactory};
//!
//! # async fn example() -> reddit_broker::Result<()> {
//! let settings = BrokerSettings {
//!     allowed_guilds: "2qh1i, 2qh33".to_string(),
//!     ..Default::default()
//! };
//! let provider = RedditIdentityProviderFactory.create(&settings)?;
//! assert_eq!(provider.default_scopes(), "identity mysubreddits");
//!
//! let identity = provider.get_federated_identity("access-token").await?;
//! println!("{} ({})", identity.username, identity.external_id);
//! # Ok(())
//! # }
//! ```

pub mod allow_list;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod factory;
pub mod http;
pub mod identity;
pub mod json;
pub mod provider;
pub mod reddit;

pub use allow_list::AllowList;
pub use config::{BrokerSettings, ClientAuthMethod, Endpoints, HttpSettings, ProviderConfig};
pub use error::{BrokerError, FetchError, Result};
pub use factory::{ConfigProperty, ProviderDescriptor, RedditIdentityProviderFactory};
pub use http::RedditApiClient;
pub use identity::FederatedIdentity;
pub use json::JsonDocument;
pub use provider::FederatedIdentityProvider;
pub use reddit::RedditIdentityProvider;
