//! Tests of the reqwest-backed transport against a local HTTP server.

use github_v3_client::{Basic, GitHubClient, Outcome, PageParams};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_sends_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let outcome = client.users().get(Some("octocat")).await.unwrap();

    assert_eq!(outcome.into_content().unwrap()["login"], "octocat");
}

#[tokio::test]
async fn test_get_params_arrive_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/followers"))
        .and(query_param("page", "3"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .users()
        .followers(None, PageParams::new(3, 10))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_post_params_arrive_as_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/keys"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"title": "laptop", "key": "ssh-rsa AAA"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let outcome = client
        .users()
        .keys()
        .create("laptop", "ssh-rsa AAA")
        .await
        .unwrap();

    assert!(outcome.is_success());
}

#[tokio::test]
async fn test_empty_204_body_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/user/following/alice"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let outcome = client.users().follow("alice").await.unwrap();

    assert_eq!(outcome, Outcome::NoContent);
}

#[tokio::test]
async fn test_non_json_body_is_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let outcome = client.users().get(Some("octocat")).await.unwrap();

    assert_eq!(outcome.into_content(), Some(json!("plain text")));
}

#[tokio::test]
async fn test_basic_auth_header_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "user"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server).await;
    client.set_credentials(Basic::new("user", "pass"));
    client.login().unwrap();

    client.users().get(None).await.unwrap();
}

#[tokio::test]
async fn test_remote_401_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/emails"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Requires authentication"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.users().emails().list().await.unwrap_err();

    assert!(err.is_authentication());
    assert!(err.to_string().contains("GET user/emails"));
}
