//! Integration tests for the open.er-api exchange rate provider.
//!
//! Every failure mode must resolve to the fallback rate.

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tasador::exchange::{ExchangeRateError, ExchangeRateProvider, OpenErApiProvider};
use tasador_common::config::ExchangeRateConfig;

async fn server_answering(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/latest/PEN"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn provider_for(server: &MockServer) -> OpenErApiProvider {
    OpenErApiProvider::from_config(&ExchangeRateConfig {
        url: format!("{}/v6/latest/PEN", server.uri()),
        fallback_rate: 3.75,
        timeout_secs: 2,
    })
}

#[tokio::test]
async fn test_live_rate_is_inverted() {
    let server = server_answering(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": "success",
        "base_code": "PEN",
        "rates": { "PEN": 1, "USD": 0.2666, "EUR": 0.2451 }
    })))
    .await;

    let rate = provider_for(&server).pen_per_usd().await;
    assert!((rate - 1.0 / 0.2666).abs() < 1e-9);
}

#[tokio::test]
async fn test_non_success_status_falls_back() {
    let server = server_answering(ResponseTemplate::new(500)).await;
    let provider = provider_for(&server);

    assert!(matches!(
        provider.fetch().await,
        Err(ExchangeRateError::Status(500))
    ));
    assert_eq!(provider.pen_per_usd().await, 3.75);
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let server =
        server_answering(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .await;
    let provider = provider_for(&server);

    assert!(matches!(
        provider.fetch().await,
        Err(ExchangeRateError::Malformed(_))
    ));
    assert_eq!(provider.pen_per_usd().await, 3.75);
}

#[tokio::test]
async fn test_missing_usd_falls_back() {
    let server = server_answering(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "rates": { "EUR": 0.24 } })),
    )
    .await;
    let provider = provider_for(&server);

    assert!(matches!(
        provider.fetch().await,
        Err(ExchangeRateError::MissingRate)
    ));
    assert_eq!(provider.pen_per_usd().await, 3.75);
}

#[tokio::test]
async fn test_zero_rate_falls_back() {
    let server = server_answering(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "rates": { "USD": 0 } })),
    )
    .await;
    let provider = provider_for(&server);

    assert!(matches!(
        provider.fetch().await,
        Err(ExchangeRateError::InvalidRate(_))
    ));
    assert_eq!(provider.pen_per_usd().await, 3.75);
}

#[tokio::test]
async fn test_slow_server_falls_back() {
    let server = server_answering(
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({ "rates": { "USD": 0.27 } }))
            .set_delay(Duration::from_secs(5)),
    )
    .await;
    let provider = OpenErApiProvider::from_config(&ExchangeRateConfig {
        url: format!("{}/v6/latest/PEN", server.uri()),
        fallback_rate: 3.8,
        timeout_secs: 1,
    });

    assert_eq!(provider.pen_per_usd().await, 3.8);
}

#[tokio::test]
async fn test_unreachable_host_falls_back() {
    let provider = OpenErApiProvider::with_url("http://127.0.0.1:9/v6/latest/PEN");
    assert_eq!(provider.pen_per_usd().await, 3.75);
}
