//! Integration tests for the Reddit identity provider against mock endpoints

use reddit_broker::{
    BrokerError, BrokerSettings, Endpoints, FederatedIdentityProvider, FetchError,
    RedditIdentityProvider, RedditIdentityProviderFactory,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROFILE_PATH: &str = "/api/v1/me";
const GROUP_PATH: &str = "/api/v1/subreddits/mine/moderator";
const TOKEN: &str = "test-token";

fn settings(allowed_guilds: &str) -> BrokerSettings {
    BrokerSettings {
        allowed_guilds: allowed_guilds.to_string(),
        ..Default::default()
    }
}

fn provider_for(server: &MockServer, allowed_guilds: &str) -> RedditIdentityProvider {
    RedditIdentityProviderFactory
        .create_with_endpoints(
            &settings(allowed_guilds),
            Endpoints::rooted_at(&server.uri()).unwrap(),
        )
        .unwrap()
}

async fn mount_profile(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_groups(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(GROUP_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn forbid_groups(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(GROUP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_identity_without_allow_list_skips_group_call() {
    let mock_server = MockServer::start().await;
    mount_profile(
        &mock_server,
        json!({"id": "1w72", "name": "Some_User", "total_karma": 1234}),
    )
    .await;
    forbid_groups(&mock_server).await;

    let provider = provider_for(&mock_server, "");
    let identity = provider.get_federated_identity(TOKEN).await.unwrap();

    assert_eq!(identity.external_id, "1w72");
    assert_eq!(identity.username, "Some_User");
    assert_eq!(identity.idp_alias, "reddit");
    assert_eq!(identity.profile_attribute("total_karma"), Some(&json!(1234)));
    assert_eq!(provider.default_scopes(), "identity");
}

#[tokio::test]
async fn test_identity_allowed_when_moderating_listed_subreddit() {
    let mock_server = MockServer::start().await;
    mount_profile(&mock_server, json!({"id": "1w72", "name": "Some_User"})).await;
    mount_groups(&mock_server, json!([{"id": "qqq"}, {"id": "abc"}])).await;

    let provider = provider_for(&mock_server, "abc,xyz");
    assert_eq!(provider.default_scopes(), "identity mysubreddits");

    let identity = provider.get_federated_identity(TOKEN).await.unwrap();
    assert_eq!(identity.external_id, "1w72");
}

#[tokio::test]
async fn test_is_allowed_guild_decision() {
    let mock_server = MockServer::start().await;
    mount_groups(&mock_server, json!([{"id": "abc"}])).await;

    let provider = provider_for(&mock_server, "abc,xyz");
    assert!(provider.is_allowed_guild(TOKEN).await.unwrap());
}

#[tokio::test]
async fn test_is_allowed_guild_false_when_no_id_matches() {
    let mock_server = MockServer::start().await;
    mount_groups(&mock_server, json!([{"id": "qqq"}])).await;

    let provider = provider_for(&mock_server, "abc,xyz");
    assert!(!provider.is_allowed_guild(TOKEN).await.unwrap());
}

#[tokio::test]
async fn test_is_allowed_guild_false_for_empty_listing() {
    let mock_server = MockServer::start().await;
    mount_groups(&mock_server, json!([])).await;

    let provider = provider_for(&mock_server, "abc,xyz");
    assert!(!provider.is_allowed_guild(TOKEN).await.unwrap());
}

#[tokio::test]
async fn test_is_allowed_guild_skips_entries_without_id() {
    let mock_server = MockServer::start().await;
    mount_groups(
        &mock_server,
        json!([{"display_name": "no_id"}, "stray", {"id": null}, {"id": "xyz"}]),
    )
    .await;

    let provider = provider_for(&mock_server, "abc,xyz");
    assert!(provider.is_allowed_guild(TOKEN).await.unwrap());
}

#[tokio::test]
async fn test_identity_denied_when_no_group_matches() {
    let mock_server = MockServer::start().await;
    mount_profile(&mock_server, json!({"id": "1w72", "name": "Some_User"})).await;
    mount_groups(&mock_server, json!([{"id": "qqq"}, {"id": "ABC"}])).await;

    let provider = provider_for(&mock_server, "abc,xyz");
    let result = provider.get_federated_identity(TOKEN).await;

    assert!(matches!(result, Err(BrokerError::AccessDenied)));
}

#[tokio::test]
async fn test_identity_denied_when_user_moderates_nothing() {
    let mock_server = MockServer::start().await;
    mount_profile(&mock_server, json!({"id": "1w72", "name": "Some_User"})).await;
    mount_groups(&mock_server, json!([])).await;

    let provider = provider_for(&mock_server, "abc");
    let err = provider.get_federated_identity(TOKEN).await.unwrap_err();

    assert!(err.is_access_denied());
    assert_eq!(err.status_code().as_u16(), 403);
}

#[tokio::test]
async fn test_group_server_error_is_not_access_denied() {
    let mock_server = MockServer::start().await;
    mount_profile(&mock_server, json!({"id": "1w72", "name": "Some_User"})).await;
    Mock::given(method("GET"))
        .and(path(GROUP_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, "abc");
    let result = provider.get_federated_identity(TOKEN).await;

    match result {
        Err(BrokerError::GroupFetchFailed(FetchError::UnexpectedStatus { status, body })) => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "upstream down");
        }
        other => panic!("Expected GroupFetchFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_group_transport_failure_is_group_fetch_failed() {
    let mock_server = MockServer::start().await;
    mount_profile(&mock_server, json!({"id": "1w72", "name": "Some_User"})).await;

    let mut endpoints = Endpoints::rooted_at(&mock_server.uri()).unwrap();
    // Port 1 is reserved (tcpmux) and refuses connections on test hosts.
    endpoints.groups_url = "http://127.0.0.1:1/api/v1/subreddits/mine/moderator".to_string();
    let provider = RedditIdentityProviderFactory
        .create_with_endpoints(&settings("abc"), endpoints)
        .unwrap();

    let result = provider.get_federated_identity(TOKEN).await;
    assert!(matches!(
        result,
        Err(BrokerError::GroupFetchFailed(FetchError::HttpClient(_)))
    ));
}

#[tokio::test]
async fn test_group_response_must_be_array() {
    let mock_server = MockServer::start().await;
    mount_profile(&mock_server, json!({"id": "1w72", "name": "Some_User"})).await;
    mount_groups(&mock_server, json!({"kind": "Listing", "data": {"children": []}})).await;

    let provider = provider_for(&mock_server, "abc");
    let result = provider.get_federated_identity(TOKEN).await;

    assert!(matches!(
        result,
        Err(BrokerError::GroupFetchFailed(FetchError::Malformed { .. }))
    ));
}

#[tokio::test]
async fn test_malformed_profile_fails_before_group_check() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;
    forbid_groups(&mock_server).await;

    let provider = provider_for(&mock_server, "abc");
    let result = provider.get_federated_identity(TOKEN).await;

    assert!(matches!(
        result,
        Err(BrokerError::ProfileFetchFailed(FetchError::Malformed { .. }))
    ));
}

#[tokio::test]
async fn test_profile_without_id_fails_before_group_check() {
    let mock_server = MockServer::start().await;
    mount_profile(&mock_server, json!({"name": "Some_User"})).await;
    forbid_groups(&mock_server).await;

    let provider = provider_for(&mock_server, "abc");
    let result = provider.get_federated_identity(TOKEN).await;

    assert!(matches!(result, Err(BrokerError::ProfileFetchFailed(_))));
}

#[tokio::test]
async fn test_profile_must_be_object() {
    let mock_server = MockServer::start().await;
    mount_profile(&mock_server, json!([{"id": "1w72", "name": "Some_User"}])).await;

    let provider = provider_for(&mock_server, "");
    let result = provider.get_federated_identity(TOKEN).await;

    assert!(matches!(result, Err(BrokerError::ProfileFetchFailed(_))));
}

#[tokio::test]
async fn test_rejected_token_is_profile_fetch_failed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized",
            "error": 401
        })))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server, "");
    let err = provider.get_federated_identity("expired-token").await.unwrap_err();

    assert!(matches!(
        err,
        BrokerError::ProfileFetchFailed(FetchError::UnexpectedStatus { .. })
    ));
    assert!(!err.is_access_denied());
    assert_eq!(err.status_code().as_u16(), 502);
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let mock_server = MockServer::start().await;
    let mut settings = settings("");
    settings.http.user_agent = "linux:reddit-broker-test:v1 (by /u/tester)".to_string();

    Mock::given(method("GET"))
        .and(path(PROFILE_PATH))
        .and(header("User-Agent", "linux:reddit-broker-test:v1 (by /u/tester)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1", "name": "u"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = RedditIdentityProviderFactory
        .create_with_endpoints(&settings, Endpoints::rooted_at(&mock_server.uri()).unwrap())
        .unwrap();
    assert!(provider.get_federated_identity(TOKEN).await.is_ok());
}

#[tokio::test]
async fn test_provider_is_shared_across_concurrent_logins() {
    let mock_server = MockServer::start().await;
    for (token, id, name) in [("token-a", "1", "alice"), ("token-b", "2", "bob")] {
        Mock::given(method("GET"))
            .and(path(PROFILE_PATH))
            .and(header("Authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": id, "name": name})))
            .mount(&mock_server)
            .await;
    }

    let provider = Arc::new(provider_for(&mock_server, ""));
    let a = tokio::spawn({
        let provider = Arc::clone(&provider);
        async move { provider.get_federated_identity("token-a").await }
    });
    let b = tokio::spawn({
        let provider = Arc::clone(&provider);
        async move { provider.get_federated_identity("token-b").await }
    });

    let alice = a.await.unwrap().unwrap();
    let bob = b.await.unwrap().unwrap();
    assert_eq!((alice.external_id.as_str(), alice.username.as_str()), ("1", "alice"));
    assert_eq!((bob.external_id.as_str(), bob.username.as_str()), ("2", "bob"));
}
