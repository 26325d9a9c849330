//! Integration tests for the lookup controller against a mock HTTP provider
//!
//! These drive `WeatherLookupController` end to end through
//! `HttpWeatherProvider`, covering both response shapes and every failure
//! class the controller turns into `LookupState::Failure`.

use std::{sync::Arc, time::Duration};

use climax_core::{
    CityParam, ConditionCode, LookupState, ProviderConfig, ResponseShape,
    WeatherLookupController, provider_from_config,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, path_regex, query_param},
};

fn nested_paris() -> serde_json::Value {
    serde_json::json!({
        "location": {"name": "Paris", "country": "FR"},
        "current": {
            "temp": 18,
            "description": "clear sky",
            "wind_speed": 3.2,
            "humidity": 60,
            "icon": "01d"
        },
        "forecast": [
            {"date": "2024-05-02", "temp": 19.4, "icon": "02d"},
            {"date": "2024-05-03", "temp": 21.5, "icon": "10d"}
        ]
    })
}

fn flat_paris() -> serde_json::Value {
    serde_json::json!({
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}],
        "main": {"temp": 18.0, "feels_like": 17.1, "humidity": 60},
        "wind": {"speed": 3.2},
        "sys": {"country": "FR"},
        "name": "Paris",
        "cod": 200
    })
}

fn config_for(mock_server: &MockServer, shape: ResponseShape) -> ProviderConfig {
    ProviderConfig {
        base_url: format!("{}/weather", mock_server.uri()),
        shape,
        city_param: CityParam::Query,
        query_key: "city".into(),
        timeout_secs: 1,
    }
}

fn controller_for(config: &ProviderConfig) -> WeatherLookupController {
    #[allow(clippy::expect_used)]
    let provider = provider_from_config(config).expect("Failed to create provider");
    WeatherLookupController::new(Arc::new(provider))
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_nested_success_populates_snapshot() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nested_paris()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));
    controller.set_query("Paris");

    assert!(controller.submit());
    assert_eq!(controller.state(), &LookupState::Loading);

    let state = controller.settle().await.expect("lookup was in flight");
    let snapshot = state.snapshot().expect("lookup should succeed");

    assert_eq!(snapshot.location_name, "Paris");
    assert_eq!(snapshot.country, "FR");
    assert_eq!(snapshot.temperature_c, 18.0);
    assert_eq!(snapshot.display_temperature(), 18);
    assert_eq!(snapshot.description, "clear sky");
    assert_eq!(snapshot.wind_speed_mps, 3.2);
    assert_eq!(snapshot.humidity_pct, 60);
    assert_eq!(snapshot.forecast.len(), 2);
    assert_eq!(snapshot.forecast[1].condition, ConditionCode::Rain);
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn test_flat_success_has_no_forecast() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flat_paris()))
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Flat));
    let state = controller.search("Paris").await;

    let snapshot = state.snapshot().expect("lookup should succeed");
    assert_eq!(snapshot.location_name, "Paris");
    assert_eq!(snapshot.country, "FR");
    assert_eq!(snapshot.condition, ConditionCode::ClearSky);
    assert!(!snapshot.has_forecast());
}

#[tokio::test]
async fn test_query_is_trimmed_and_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "São Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nested_paris()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));
    let state = controller.search("  São Paulo  ").await;

    assert!(state.snapshot().is_some());
}

#[tokio::test]
async fn test_path_segment_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/weather/New%20York$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flat_paris()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server, ResponseShape::Flat);
    config.city_param = CityParam::Path;

    let mut controller = controller_for(&config);
    let state = controller.search("New York").await;

    assert!(state.snapshot().is_some());
}

// ============================================================================
// Failure scenarios
// ============================================================================

#[tokio::test]
async fn test_not_found_uses_error_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "city not found"})),
        )
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));
    let state = controller.search("Atlantis").await;

    assert_eq!(state, &LookupState::Failure("city not found".into()));
}

#[tokio::test]
async fn test_openweather_error_message_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Flat));
    let state = controller.search("Atlantis").await;

    assert_eq!(state.error(), Some("city not found"));
}

#[tokio::test]
async fn test_error_without_payload_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));
    let state = controller.search("Paris").await;

    assert_eq!(state.error(), Some("Unable to fetch weather data"));
}

#[tokio::test]
async fn test_malformed_body_becomes_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));
    let state = controller.search("Paris").await;

    assert_eq!(
        state.error(),
        Some("unexpected response from weather service")
    );
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn test_wrong_shape_becomes_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(flat_paris()))
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));
    let state = controller.search("Paris").await;

    assert_eq!(
        state.error(),
        Some("unexpected response from weather service")
    );
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(nested_paris())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));
    let state = controller.search("Paris").await;

    assert_eq!(state, &LookupState::Failure("network error".into()));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on the tcpmux port on a test host.
    let config = ProviderConfig {
        base_url: "http://127.0.0.1:1/weather".into(),
        ..ProviderConfig::new("", ResponseShape::Nested)
    };

    let mut controller = controller_for(&config);
    let state = controller.search("Paris").await;

    assert_eq!(state, &LookupState::Failure("network error".into()));
}

// ============================================================================
// Controller behaviour over HTTP
// ============================================================================

#[tokio::test]
async fn test_second_submit_while_pending_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(nested_paris())
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));
    controller.set_query("Paris");

    assert!(controller.submit());
    controller.set_query("Berlin");
    assert!(!controller.submit());
    assert!(controller.is_in_flight());

    let state = controller.settle().await.expect("lookup was in flight");
    assert_eq!(
        state.snapshot().map(|s| s.location_name.as_str()),
        Some("Paris")
    );
}

#[tokio::test]
async fn test_blank_query_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nested_paris()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));
    controller.set_query("   ");

    assert!(!controller.submit());
    assert!(controller.settle().await.is_none());
    assert_eq!(controller.state(), &LookupState::Idle);
}

#[tokio::test]
async fn test_recovers_after_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("city", "Atlantis"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"error": "city not found"})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("city", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nested_paris()))
        .mount(&mock_server)
        .await;

    let mut controller = controller_for(&config_for(&mock_server, ResponseShape::Nested));

    let state = controller.search("Atlantis").await;
    assert_eq!(state.error(), Some("city not found"));

    controller.set_query("Paris");
    assert!(controller.submit());
    assert_eq!(controller.state(), &LookupState::Loading);

    let state = controller.settle().await.expect("lookup was in flight");
    assert!(state.error().is_none());
    assert_eq!(
        state.snapshot().map(|s| s.location_name.as_str()),
        Some("Paris")
    );

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}
