//! Fixed Reddit endpoints, scopes and provider identity
//!
//! These are compiled in; only the allow-list and client credentials come from settings.

/// OAuth2 authorization endpoint
pub const AUTH_URL: &str = "https://www.reddit.com/api/v1/authorize";

/// OAuth2 token endpoint
pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Authenticated user's profile
pub const PROFILE_URL: &str = "https://oauth.reddit.com/api/v1/me";

/// Subreddits the authenticated user moderates
pub const GROUP_URL: &str = "https://oauth.reddit.com/api/v1/subreddits/mine/moderator";

/// Scope required for the profile endpoint
pub const DEFAULT_SCOPE: &str = "identity";

/// Scope required for the moderator listing
pub const GUILDS_SCOPE: &str = "mysubreddits";

pub const PROVIDER_ID: &str = "reddit";

pub const PROVIDER_NAME: &str = "Reddit";

/// Name of the allow-list configuration property
pub const ALLOWED_GUILDS_PROPERTY: &str = "allowedGuilds";

/// Message key the host renders on a 403 caused by allow-list rejection
pub const INVALID_REQUESTER_MESSAGE: &str = "invalidRequesterMessage";

/// Message key the host renders for upstream or configuration failures
pub const UNEXPECTED_ERROR_MESSAGE: &str = "identityProviderUnexpectedErrorMessage";
