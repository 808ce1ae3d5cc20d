//! IP-based position lookup against a wiremock server.

use serde_json::json;
use weatherlens_core::{Coordinates, Geolocator, IpGeolocator, LocationError};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn successful_lookup_returns_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "lat": 40.7128,
            "lon": -74.006,
            "city": "New York"
        })))
        .mount(&server)
        .await;

    let geo = IpGeolocator::new(server.uri());
    let pos = geo.current_position().await.unwrap();
    assert_eq!(pos, Coordinates::new(40.7128, -74.006));
}

#[tokio::test]
async fn failed_lookup_is_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&server)
        .await;

    let geo = IpGeolocator::new(server.uri());
    let err = geo.current_position().await.unwrap_err();
    assert!(matches!(err, LocationError::Denied(msg) if msg == "private range"));
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let geo = IpGeolocator::new(server.uri());
    let err = geo.current_position().await.unwrap_err();
    assert!(matches!(err, LocationError::Unavailable(_)));
}
