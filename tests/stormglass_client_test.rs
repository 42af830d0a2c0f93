// Tests for the StormGlass client against a mocked provider.
// Uses mockito for HTTP mocking.

use mockito::{Matcher, Server};
use surf_forecast_service::stormglass::{ForecastPoint, StormGlassClient};
use surf_forecast_service::stormglass_error::StormGlassError;

fn create_test_client(base_url: String) -> StormGlassClient {
    StormGlassClient::new(base_url, "test-token".to_string())
}

#[tokio::test]
async fn test_fetch_points_returns_normalized_forecast() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/weather/point")
        .match_query(Matcher::Any)
        .match_header("authorization", "test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(include_str!("fixtures/stormglass_weather_3_hours.json"))
        .create_async()
        .await;

    let client = create_test_client(server.url());
    let points = client.fetch_points(-33.792726, 151.289824).await.unwrap();

    let expected: Vec<ForecastPoint> =
        serde_json::from_str(include_str!("fixtures/stormglass_normalized_3_hours.json")).unwrap();
    assert_eq!(points, expected);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_points_sends_wire_contract_query() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/weather/point")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "params".into(),
                "swellDirection,swellHeight,swellPeriod,waveDirection,waveHeight,windDirection,windSpeed".into(),
            ),
            Matcher::UrlEncoded("source".into(), "noaa".into()),
            Matcher::UrlEncoded("lat".into(), "-33.792726".into()),
            Matcher::UrlEncoded("lng".into(), "151.289824".into()),
            Matcher::Regex("end=[0-9]+".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"hours": []}"#)
        .create_async()
        .await;

    let client = create_test_client(server.url());
    let points = client.fetch_points(-33.792726, 151.289824).await.unwrap();
    assert!(points.is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_points_excludes_incomplete_points() {
    let mut server = Server::new_async().await;

    let incomplete = r#"{
        "hours": [
            { "time": "2026-04-26T00:00:00+00:00", "windDirection": { "noaa": 300.0 } }
        ]
    }"#;
    server
        .mock("GET", "/weather/point")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(incomplete)
        .create_async()
        .await;

    let client = create_test_client(server.url());
    let points = client.fetch_points(-33.792726, 151.289824).await.unwrap();
    assert!(points.is_empty());
}

#[tokio::test]
async fn test_fetch_points_provider_error_carries_status_and_body() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/weather/point")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"errors":["Rate Limit reached"]}"#)
        .create_async()
        .await;

    let client = create_test_client(server.url());
    let err = client.fetch_points(-33.792726, 151.289824).await.unwrap_err();

    match &err {
        StormGlassError::Response { status, body } => {
            assert_eq!(*status, 429);
            assert!(body.contains("Rate Limit reached"));
        }
        other => panic!("Expected Response error, got {:?}", other),
    }
    assert_eq!(
        err.to_string(),
        "Unexpected error returned by the StormGlass service: Error: {\"errors\":[\"Rate Limit reached\"]} Code: 429"
    );
}

#[tokio::test]
async fn test_fetch_points_network_failure_is_a_request_error() {
    // Nothing listens here, so the request never reaches a provider.
    let client = create_test_client("http://127.0.0.1:9".to_string());
    let err = client.fetch_points(-33.792726, 151.289824).await.unwrap_err();

    assert!(matches!(err, StormGlassError::Request(_)));
    assert!(err
        .to_string()
        .starts_with("Unexpected error when trying to communicate to StormGlass:"));
}

#[tokio::test]
async fn test_fetch_points_malformed_body_is_a_request_error() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/weather/point")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = create_test_client(server.url());
    let err = client.fetch_points(-33.792726, 151.289824).await.unwrap_err();
    assert!(matches!(err, StormGlassError::Request(_)));
}
