//! Integration tests for the feed client against a mock HTTP server.
//!
//! Run:
//!   cargo test -p noaa-feed --test feed_client

use std::time::Duration;

use noaa_feed::{decode_feature, AlertSource, FeedClient, FeedConfig, FeedError};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn collection() -> serde_json::Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": null,
                "properties": {
                    "id": "urn:oid:2.49.0.1.840.0.one",
                    "areaDesc": "Travis, TX",
                    "event": "Flash Flood Warning",
                    "severity": "Severe",
                    "urgency": "Immediate",
                    "status": "Actual",
                    "expires": "2025-06-01T18:00:00-05:00"
                }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Polygon", "coordinates": [] },
                "properties": {
                    "id": "urn:oid:2.49.0.1.840.0.two",
                    "areaDesc": "Coastal Waters",
                    "event": "Small Craft Advisory"
                }
            }
        ],
        "title": "Current watches, warnings, and advisories"
    })
}

fn client_for(server: &MockServer) -> FeedClient {
    FeedClient::new(FeedConfig::new(server.uri()).with_user_agent("weather-alerts-test")).unwrap()
}

#[tokio::test]
async fn test_fetch_features() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts"))
        .and(header("user-agent", "weather-alerts-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let features = client.fetch_features().await.unwrap();
    assert_eq!(features.len(), 2);

    let first = decode_feature(&features[0]).unwrap();
    assert_eq!(first.id, "urn:oid:2.49.0.1.840.0.one");
    assert_eq!(first.area_desc.as_deref(), Some("Travis, TX"));

    let second = decode_feature(&features[1]).unwrap();
    assert_eq!(second.geometry_type.as_deref(), Some("Polygon"));
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_features().await.unwrap_err();
    match err {
        FeedError::Status { status, url } => {
            assert_eq!(status, 503);
            assert!(url.ends_with("/alerts"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.fetch_features().await.unwrap_err();
    assert!(matches!(err, FeedError::Json(_)));
}

#[tokio::test]
async fn test_timeout_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/alerts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(collection())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = FeedConfig::new(server.uri()).with_timeout(Duration::from_millis(200));
    let client = FeedClient::new(config).unwrap();
    let err = client.fetch_features().await.unwrap_err();
    match err {
        FeedError::Http(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_error() {
    // Bind then drop a listener so its port is closed.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = FeedClient::new(FeedConfig::new(uri)).unwrap();
    let err = client.fetch_features().await.unwrap_err();
    assert!(matches!(err, FeedError::Http(_)));
}

// Integration test that requires network access
#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_live_feed() {
    let client = FeedClient::new(FeedConfig::default()).unwrap();
    let features = client.fetch_features().await.unwrap();
    for feature in &features {
        assert!(decode_feature(feature).is_ok());
    }
}
