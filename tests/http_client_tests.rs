//! Integration tests for the HTTP transport.
//!
//! These tests run `HttpClient` against a local wiremock server and verify
//! header handling, rate-limit and `Link` parsing, retries and error mapping.

use github_api::clients::{HttpClient, HttpRequest, Transport};
use github_api::{ApiToken, BaseUrl, GitHubConfig, HttpError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server.
fn create_client(server: &MockServer, tries: u32) -> HttpClient {
    let config = GitHubConfig::builder()
        .api_token(ApiToken::new("ghp_test").unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .user_agent_prefix("IntegrationTests/1.0")
        .tries(tries)
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

// ============================================================================
// Request Construction
// ============================================================================

#[tokio::test]
async fn test_relative_fetch_sends_auth_and_accept_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("Authorization", "token ghp_test"))
        .and(header("Accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let fetched = client.get_relative("users/octocat").await.unwrap();

    assert_eq!(fetched.body["login"], "octocat");
}

#[tokio::test]
async fn test_absolute_fetch_keeps_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/1/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "b"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let url = format!("{}/user/1/repos?page=2", server.uri());
    let fetched = client.get_absolute(&url).await.unwrap();

    assert_eq!(fetched.body[0]["name"], "b");
}

#[tokio::test]
async fn test_request_query_params_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/issues"))
        .and(query_param("state", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let request = HttpRequest::relative("repos/octocat/Hello-World/issues")
        .query_param("state", "closed")
        .build()
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 200);
    assert_eq!(response.body, json!([]));
}

#[test]
fn test_user_agent_carries_prefix() {
    let config = GitHubConfig::builder()
        .user_agent_prefix("MyApp/2.0")
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    let user_agent = client.default_headers().get("User-Agent").unwrap();
    assert!(user_agent.starts_with("MyApp/2.0 | GitHub API Library v"));
    assert!(!client.default_headers().contains_key("Authorization"));
}

// ============================================================================
// Response Metadata
// ============================================================================

#[tokio::test]
async fn test_rate_limit_headers_are_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rate_limited"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .insert_header("X-RateLimit-Limit", "5000")
                .insert_header("X-RateLimit-Remaining", "4987")
                .insert_header("X-RateLimit-Reset", "1372700873")
                .insert_header("X-RateLimit-Used", "13")
                .insert_header("X-RateLimit-Resource", "core"),
        )
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let fetched = client.get_relative("rate_limited").await.unwrap();

    let limit = fetched.rate_limit.unwrap();
    assert_eq!(limit.limit, 5000);
    assert_eq!(limit.remaining, 4987);
    assert_eq!(limit.reset_at.timestamp(), 1_372_700_873);
    assert_eq!(limit.used, Some(13));
    assert_eq!(limit.resource.as_deref(), Some("core"));
}

#[tokio::test]
async fn test_missing_rate_limit_headers_yield_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let fetched = client.get_relative("plain").await.unwrap();

    assert!(fetched.rate_limit.is_none());
    assert!(fetched.links.is_empty());
}

#[tokio::test]
async fn test_link_header_is_parsed() {
    let server = MockServer::start().await;
    let next = format!("{}/user/1/followers?page=2", server.uri());
    let last = format!("{}/user/1/followers?page=4", server.uri());
    Mock::given(method("GET"))
        .and(path("/users/octocat/followers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .insert_header("Link", format!(r#"<{next}>; rel="next", <{last}>; rel="last""#).as_str()),
        )
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let fetched = client.get_relative("users/octocat/followers").await.unwrap();

    assert_eq!(fetched.links.next(), Some(next.as_str()));
    assert_eq!(fetched.links.get("last"), Some(last.as_str()));
    assert!(!fetched.links.contains("prev"));
}

#[tokio::test]
async fn test_empty_success_body_becomes_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/starred/octocat/Hello-World"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let fetched = client
        .get_relative("user/starred/octocat/Hello-World")
        .await
        .unwrap();

    assert_eq!(fetched.body, json!({}));
}

// ============================================================================
// Errors and Retries
// ============================================================================

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost-user"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({
                    "message": "Not Found",
                    "documentation_url": "https://docs.github.com/rest"
                }))
                .insert_header("X-GitHub-Request-Id", "CAFE:1:2"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 3);
    let error = client.get_relative("users/ghost-user").await.unwrap_err();

    match error {
        HttpError::Response(e) => {
            assert_eq!(e.code, 404);
            assert!(e.message.contains("Not Found"));
            assert_eq!(e.error_reference.as_deref(), Some("CAFE:1:2"));
        }
        other => panic!("expected a response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_request_is_retried_after_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(json!({"message": "API rate limit exceeded"}))
                .insert_header("Retry-After", "0"),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "octocat"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 2);
    let fetched = client.get_relative("users/octocat").await.unwrap();

    assert_eq!(fetched.body["login"], "octocat");
}

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = create_client(&server, 2);
    let error = client.get_relative("users/octocat").await.unwrap_err();

    match error {
        HttpError::MaxRetries(e) => {
            assert_eq!(e.code, 500);
            assert_eq!(e.tries, 2);
            assert!(e.message.contains("boom"));
        }
        other => panic!("expected max retries, got {other:?}"),
    }
}

#[tokio::test]
async fn test_single_try_reports_response_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let error = client.get_relative("users/octocat").await.unwrap_err();

    assert_eq!(error.status_code(), Some(500));
    assert!(error.to_string().contains("upstream unavailable"));
}

#[tokio::test]
async fn test_malformed_success_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = create_client(&server, 1);
    let error = client.get_relative("users/octocat").await.unwrap_err();

    assert!(matches!(
        error,
        HttpError::InvalidJson { ref url, .. } if url.ends_with("/users/octocat")
    ));
}
