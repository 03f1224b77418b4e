//! HTTP-level tests for the provider client, against a mock server.

use serde_json::json;
use virtnum_provider::{ProviderError, VirtualNumberClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> VirtualNumberClient {
    VirtualNumberClient::with_base_url(server.uri(), "test-key")
}

#[tokio::test]
async fn list_countries_sends_auth_headers_and_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all-countries"))
        .and(header("x-rapidapi-key", "test-key"))
        .and(header("x-rapidapi-host", "virtual-number.p.rapidapi.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"country_code": "US", "country_name": "United States", "price": 1.5, "emoji": "🇺🇸"},
                {"country_code": "GB", "country_name": "United Kingdom", "price": 2.0, "emoji": "🇬🇧"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let countries = client.list_countries().await.unwrap();

    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].country_code, "US");
    assert_eq!(countries[0].price, Some(1.5));
    assert_eq!(countries[1].country_name, "United Kingdom");
}

#[tokio::test]
async fn purchase_posts_country_and_service() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/purchase"))
        .and(body_json(json!({
            "country_code": "US",
            "service": "telegram"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"number_id": "123", "phone_number": "+15550001111"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let purchase = client.purchase_number("US", "telegram").await.unwrap();

    assert_eq!(purchase.number_id, "123");
    assert_eq!(purchase.phone_number, "+15550001111");
}

#[tokio::test]
async fn in_band_failure_surfaces_error_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/purchase"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "No numbers available for this country"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.purchase_number("ZZ", "telegram").await.unwrap_err();

    match &err {
        ProviderError::Api(text) => assert_eq!(text, "No numbers available for this country"),
        other => panic!("expected Api error, got {:?}", other),
    }
    // Callers show the error verbatim.
    assert_eq!(err.to_string(), "No numbers available for this country");
}

#[tokio::test]
async fn non_2xx_is_a_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all-countries"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.list_countries().await.unwrap_err();

    match err {
        ProviderError::Status { status, body } => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_sms_preserves_provider_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sms/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"sender": "Telegram", "message": "Code: 9999", "timestamp": "2025-03-01T12:05:00Z"},
                {"sender": "Telegram", "message": "Code: 1111", "timestamp": "2025-03-01T12:00:00Z"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let messages = client.fetch_sms("123").await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message, "Code: 9999");
    assert_eq!(messages[1].message, "Code: 1111");
}

#[tokio::test]
async fn cancel_accepts_ack_without_payload() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cancel/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.cancel_number("123").await.unwrap();
}

#[tokio::test]
async fn cancel_failure_surfaces_error_text() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cancel/999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Number already released"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.cancel_number("999").await.unwrap_err();

    assert!(matches!(err, ProviderError::Api(_)));
    assert_eq!(err.to_string(), "Number already released");
}

#[tokio::test]
async fn active_numbers_decodes_sparse_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/active-numbers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                {"number_id": "123", "phone_number": "+15550001111", "country_code": "US"},
                {"number_id": "456"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let active = client.active_numbers().await.unwrap();

    assert_eq!(active.len(), 2);
    assert_eq!(active[1].number_id, "456");
    assert!(active[1].phone_number.is_none());
}
