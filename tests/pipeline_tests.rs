//! End-to-end tests of the request pipeline over the mock transport.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use github_v3_client::mocks::{MockResponse, MockTransport};
use github_v3_client::{
    build_params, Basic, ClientConfig, GitHubClient, MediaFormat, Outcome, PageParams, Token,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

fn mock_client() -> (GitHubClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = GitHubClient::with_transport(ClientConfig::default(), transport.clone());
    (client, transport)
}

#[tokio::test]
async fn test_get_returns_content_unchanged() {
    let (client, transport) = mock_client();
    let body = json!({"login": "octocat", "id": 583231});
    transport.on_get("/users/octocat", MockResponse::ok(body.clone()));

    let outcome = client.users().get(Some("octocat")).await.unwrap();

    assert_eq!(outcome, Outcome::Content(body));
    assert!(transport.verify_request("GET", "/users/octocat"));
}

#[tokio::test]
async fn test_created_is_content() {
    let (client, transport) = mock_client();
    transport.on_post("/gists", MockResponse::created(json!({"id": "1"})));

    let outcome = client
        .gists()
        .create(json!({"a.txt": {"content": "hi"}}), true, "demo")
        .await
        .unwrap();

    assert_eq!(outcome.into_content(), Some(json!({"id": "1"})));
}

#[tokio::test]
async fn test_no_content_and_not_found_as_bool() {
    let (client, transport) = mock_client();
    transport.on_get("/user/following/alice", MockResponse::no_content());
    transport.on_get("/user/following/bob", MockResponse::not_found());

    let following = client.users().is_following("alice").await.unwrap();
    let not_following = client.users().is_following("bob").await.unwrap();

    assert_eq!(following.as_bool(), Some(true));
    assert_eq!(not_following.as_bool(), Some(false));
}

#[tokio::test]
async fn test_unauthorized_becomes_authentication_error() {
    let (client, transport) = mock_client();
    transport.on_get("/user", MockResponse::unauthorized());

    let err = client.users().get(None).await.unwrap_err();

    assert!(err.is_authentication());
    assert!(err.to_string().contains("Authentication required"));
}

#[tokio::test]
async fn test_validation_failure_is_returned_not_raised() {
    let (client, transport) = mock_client();
    transport.on_post(
        "/user/repos",
        MockResponse::validation_failed(json!([{"field": "name", "code": "missing_field"}])),
    );

    let outcome = client
        .repositories()
        .create("demo", Default::default())
        .await
        .unwrap();

    let response = outcome.response().unwrap();
    assert_eq!(response.status, 422);
    assert_eq!(response.content["message"], "Validation Failed");
}

#[tokio::test]
async fn test_get_sends_params_as_query_string() {
    let (client, transport) = mock_client();
    transport.on_get("/user/repos", MockResponse::ok(json!([])));

    client
        .repositories()
        .list(None, github_v3_client::services::RepoType::All, PageParams::new(2, 50))
        .await
        .unwrap();

    let recorded = transport.last_request().unwrap();
    assert!(recorded.url.contains("type=all"));
    assert!(recorded.url.contains("page=2"));
    assert!(recorded.url.contains("per_page=50"));
    assert!(recorded.body.is_none());
}

#[tokio::test]
async fn test_post_sends_params_as_json_body() {
    let (client, transport) = mock_client();
    transport.on_post("/gists", MockResponse::created(json!({"id": "1"})));

    client
        .gists()
        .create(json!({"a.txt": {"content": "hi"}}), false, "demo")
        .await
        .unwrap();

    let recorded = transport.last_request().unwrap();
    let body: Value = serde_json::from_str(recorded.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["description"], "demo");
    assert_eq!(body["public"], false);
    assert_eq!(recorded.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_media_format_sets_accept_header() {
    let (client, transport) = mock_client();
    transport.on_get("/gists/1/comments", MockResponse::ok(json!([])));

    client
        .gists()
        .comments()
        .list("1", MediaFormat::Raw)
        .await
        .unwrap();

    let recorded = transport.last_request().unwrap();
    assert_eq!(
        recorded.header("Accept"),
        Some("application/vnd.github-gistcomment.raw+json")
    );
}

#[test]
fn test_build_params_filters_nulls_in_order() {
    let params = build_params([
        ("state", json!("open")),
        ("labels", Value::Null),
        ("sort", json!("created")),
    ]);

    let keys: Vec<&String> = params.keys().collect();
    assert_eq!(keys, ["state", "sort"]);
}

#[tokio::test]
async fn test_requests_are_anonymous_before_login() {
    let (mut client, transport) = mock_client();
    client.set_credentials(Basic::new("user", "pass"));
    transport.on_get("/users/octocat", MockResponse::ok(json!({})));

    client.users().get(Some("octocat")).await.unwrap();

    let recorded = transport.last_request().unwrap();
    assert!(recorded.header("Authorization").is_none());
}

#[tokio::test]
async fn test_basic_credentials_reach_the_wire() {
    let (mut client, transport) = mock_client();
    client.set_credentials(Basic::new("user", "pass"));
    client.login().unwrap();
    transport.on_get("/user", MockResponse::ok(json!({})));

    client.users().get(None).await.unwrap();

    let recorded = transport.last_request().unwrap();
    let header = recorded.header("Authorization").unwrap();
    let decoded = STANDARD.decode(header.strip_prefix("Basic ").unwrap()).unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), "user:pass");
}

#[tokio::test]
async fn test_token_rides_the_query_string() {
    let (mut client, transport) = mock_client();
    client.set_credentials(Token::new("T"));
    client.login().unwrap();
    transport.on_get("/user/repos", MockResponse::ok(json!([])));

    client
        .repositories()
        .list(None, github_v3_client::services::RepoType::All, PageParams::default())
        .await
        .unwrap();

    let recorded = transport.last_request().unwrap();
    // Params were already encoded, so the token extends with '&'.
    assert!(recorded.url.contains("&access_token=T"));
}

#[tokio::test]
async fn test_login_logout_cycle_controls_authentication() {
    let (mut client, transport) = mock_client();
    transport.on_get("/user", MockResponse::ok(json!({})));
    transport.on_get("/user", MockResponse::ok(json!({})));

    client.set_credentials(Basic::new("user", "pass"));
    client.login().unwrap();
    client.users().get(None).await.unwrap();
    assert!(transport.last_request().unwrap().header("Authorization").is_some());

    client.logout(false);
    client.users().get(None).await.unwrap();
    assert!(transport.last_request().unwrap().header("Authorization").is_none());
}

#[test]
fn test_lifecycle_errors() {
    let transport = Arc::new(MockTransport::new());
    let mut client = GitHubClient::with_transport(ClientConfig::default(), transport);

    let err = client.login().unwrap_err();
    assert!(err.to_string().contains("credentials not set"));

    client.set_credentials(Basic::new("user", "pass"));
    client.login().unwrap();

    let err = client.clear_credentials().unwrap_err();
    assert!(err.to_string().contains("must logout first"));

    client.logout(false);
    client.clear_credentials().unwrap();
}

#[tokio::test]
async fn test_client_side_option_validation() {
    let (client, _transport) = mock_client();

    let err = client
        .repositories()
        .list(
            Some("octocat"),
            github_v3_client::services::RepoType::Private,
            PageParams::default(),
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("public repositories"));
}
