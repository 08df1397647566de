//! Integration tests for the connection check
//!
//! The check is a single-attempt probe with the minimal introspection
//! query; it reports failures instead of raising, and it must not retry.

mod test_util;

use mockito::Matcher;
use monday_source::services::MondaySource;
use monday_source::types::{Credentials, SourceConfig};
use test_util::test_config;

#[tokio::test]
async fn test_check_succeeds_on_2xx() {
    let mut server = mockito::Server::new_async().await;

    let probe = server
        .mock("POST", "/")
        .match_query(Matcher::UrlEncoded(
            "query".into(),
            "query { me { is_guest created_at name id } }".into(),
        ))
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "data": { "me": { "is_guest": false, "created_at": "2020-01-01T00:00:00Z", "name": "Test", "id": "1" } }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let source = MondaySource::new(test_config(&server.url()));
    let (ok, error) = source.check_connection().await;

    assert!(ok);
    assert!(error.is_none());
    probe.assert_async().await;
}

#[tokio::test]
async fn test_check_reports_auth_rejection() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("Unauthorized")
        .create_async()
        .await;

    let source = MondaySource::new(test_config(&server.url()));
    let (ok, error) = source.check_connection().await;

    assert!(!ok);
    assert!(error.unwrap().to_string().contains("401"));
}

#[tokio::test]
async fn test_check_is_single_attempt() {
    let mut server = mockito::Server::new_async().await;

    // Even a retryable status must not be retried by the check
    let failing = server
        .mock("POST", "/")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal error")
        .expect(1)
        .create_async()
        .await;

    let source = MondaySource::new(test_config(&server.url()));
    let (ok, error) = source.check_connection().await;

    assert!(!ok);
    assert!(error.is_some());
    failing.assert_async().await;
}

#[tokio::test]
async fn test_check_surfaces_config_error_before_any_request() {
    let mut server = mockito::Server::new_async().await;

    let never_hit = server
        .mock("POST", "/")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = SourceConfig {
        credentials: Some(Credentials {
            auth_method: Some("bogus".to_string()),
            api_token: None,
            access_token: None,
        }),
        api_url: server.url(),
        ..Default::default()
    };

    let (ok, error) = MondaySource::new(config).check_connection().await;

    assert!(!ok);
    assert!(error.unwrap().to_string().contains("bogus"));
    never_hit.assert_async().await;
}
