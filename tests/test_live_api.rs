//! Live API smoke tests
//!
//! These tests hit the real Monday.com API and require an API token in the
//! MONDAY_SOURCE_API_TOKEN environment variable.
//! Run with: cargo test --features integration-tests

use serial_test::serial;

#[cfg(feature = "integration-tests")]
fn live_config() -> monday_source::types::SourceConfig {
    use monday_source::types::{Credentials, SourceConfig};

    let token = std::env::var("MONDAY_SOURCE_API_TOKEN")
        .expect("MONDAY_SOURCE_API_TOKEN must be set for integration tests");
    SourceConfig {
        credentials: Some(Credentials {
            auth_method: Some("api_token".to_string()),
            api_token: Some(token),
            access_token: None,
        }),
        ..Default::default()
    }
}

#[tokio::test]
#[serial]
#[cfg(feature = "integration-tests")]
async fn test_live_connection_check() {
    use monday_source::services::MondaySource;

    let (ok, error) = MondaySource::new(live_config()).check_connection().await;
    assert!(ok, "connection check failed: {:?}", error);
}

#[tokio::test]
#[serial]
#[cfg(feature = "integration-tests")]
async fn test_live_users_read() {
    use monday_source::services::MondaySource;
    use monday_source::types::ResourceKind;

    let source = MondaySource::new(live_config());
    let users = source
        .streams()
        .unwrap()
        .into_iter()
        .find(|stream| stream.resource() == ResourceKind::Users)
        .unwrap()
        .read_all()
        .await
        .unwrap();

    // The authenticated account itself is always present
    assert!(!users.is_empty(), "expected at least one user record");
}
