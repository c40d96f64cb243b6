// Integration tests for `ApiClient` using wiremock.
#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rentley_api::types::CreateRentalRequest;
use rentley_api::{ApiClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::new(base, &TransportConfig::default()).unwrap();
    (server, client)
}

fn timestamp(y: i32, m: u32, d: u32, h: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_login_installs_token() {
    let (server, client) = setup().await;

    let body = json!({
        "token": "jwt-abc",
        "user": {
            "userId": 7,
            "username": "ayse",
            "firstName": "Ayşe",
            "lastName": "Demir",
            "userRole": { "roleId": 4, "roleName": "Musteri" }
        }
    });

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "ayse", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let login = client
        .login("ayse", &SecretString::from("s3cret".to_owned()))
        .await
        .unwrap();

    assert_eq!(login.user.user_id, 7);
    assert_eq!(login.user.user_role.unwrap().role_name, "Musteri");
    assert!(client.has_token());
}

#[tokio::test]
async fn test_login_rejected_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let result = client
        .login("ayse", &SecretString::from("wrong".to_owned()))
        .await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication, got: {result:?}"
    );
    assert!(!client.has_token());
}

#[tokio::test]
async fn test_401_clears_token_and_reports_session_expired() {
    let (server, client) = setup().await;
    client.set_token(SecretString::from("stale-token".to_owned()));

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.profile().await;

    assert!(
        matches!(result, Err(Error::SessionExpired)),
        "expected SessionExpired, got: {result:?}"
    );
    assert!(!client.has_token(), "401 must drop the in-memory token");
}

// ── Pricing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_pricing_breakdown_itemized_shape() {
    let (server, client) = setup().await;

    let body = json!({
        "basePrice": 200.0,
        "weekendSurcharge": 40.0,
        "taxAmount": 43.2,
        "totalPrice": 283.2,
        "totalDays": 2,
        "averageRate": 141.6
    });

    Mock::given(method("GET"))
        .and(path("/pricing/breakdown"))
        .and(query_param("vehicleId", "12"))
        .and(query_param("startDate", "2026-09-04"))
        .and(query_param("endDate", "2026-09-06"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let breakdown = client
        .pricing_breakdown(
            12,
            NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 6).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(breakdown.base_price, Some(200.0));
    assert_eq!(breakdown.total_days, Some(2));
    assert_eq!(breakdown.tax_amount, Some(43.2));
}

#[tokio::test]
async fn test_pricing_breakdown_raw_shape() {
    let (server, client) = setup().await;

    // Older backend versions return only the raw computation inputs.
    let body = json!({
        "baseRate": 100.0,
        "totalDays": 3,
        "weekendDays": 2,
        "totalPrice": 401.2,
        "averageRate": 133.73
    });

    Mock::given(method("GET"))
        .and(path("/pricing/breakdown"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let breakdown = client
        .pricing_breakdown(
            12,
            NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(breakdown.base_price, None);
    assert_eq!(breakdown.base_rate, Some(100.0));
    assert_eq!(breakdown.weekend_days, Some(2));
}

// ── Availability & reservation ──────────────────────────────────────

#[tokio::test]
async fn test_is_vehicle_available_bare_boolean() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/database-integration/functions/is-vehicle-available"))
        .and(query_param("vehicleId", "5"))
        .and(query_param("startDate", "2026-09-04T10:00:00"))
        .and(query_param("endDate", "2026-09-06T18:00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
        .mount(&server)
        .await;

    let available = client
        .is_vehicle_available(5, timestamp(2026, 9, 4, 10), timestamp(2026, 9, 6, 18))
        .await
        .unwrap();

    assert!(available);
}

#[tokio::test]
async fn test_create_rental_success_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/database-integration/stored-procedures/create-rental"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IsSuccess": true,
            "RentalID": 991,
            "TotalAmount": 283.2
        })))
        .mount(&server)
        .await;

    let outcome = client
        .create_rental(&CreateRentalRequest {
            customer_id: 7,
            vehicle_id: 5,
            pickup_location_id: 1,
            return_location_id: 1,
            planned_pickup_date: timestamp(2026, 9, 4, 10),
            planned_return_date: timestamp(2026, 9, 6, 18),
            created_by: 7,
        })
        .await
        .unwrap();

    assert!(outcome.succeeded());
    assert_eq!(outcome.rental_id, Some(991));
    assert_eq!(outcome.total_amount, Some(283.2));
}

#[tokio::test]
async fn test_create_rental_failure_envelope_is_2xx() {
    let (server, client) = setup().await;

    // The stored procedure reports failure inside a 200 response.
    Mock::given(method("POST"))
        .and(path("/database-integration/stored-procedures/create-rental"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "IsSuccess": false,
            "ErrorMessage": "Vehicle is not available for the selected dates"
        })))
        .mount(&server)
        .await;

    let outcome = client
        .create_rental(&CreateRentalRequest {
            customer_id: 7,
            vehicle_id: 5,
            pickup_location_id: 1,
            return_location_id: 1,
            planned_pickup_date: timestamp(2026, 9, 4, 10),
            planned_return_date: timestamp(2026, 9, 6, 18),
            created_by: 7,
        })
        .await
        .unwrap();

    assert!(!outcome.succeeded());
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("Vehicle is not available for the selected dates")
    );
}

// ── Rentals ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_rental_status_body() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/rentals/42/status"))
        .and(body_json(json!({ "statusId": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rentalId": 42,
            "rentalStatus": { "statusId": 2, "statusName": "Active" }
        })))
        .mount(&server)
        .await;

    let rental = client.update_rental_status(42, 2).await.unwrap();

    assert_eq!(rental.rental_id, 42);
    assert_eq!(rental.rental_status.unwrap().status_id, 2);
}

#[tokio::test]
async fn test_list_vehicles_page_envelope() {
    let (server, client) = setup().await;

    let body = json!({
        "content": [
            {
                "vehicleId": 1,
                "vehicleRegistration": "34 ABC 123",
                "dailyRentalRate": 95.0,
                "model": {
                    "modelId": 3,
                    "modelName": "Corolla",
                    "brand": { "brandId": 2, "brandName": "Toyota" }
                }
            }
        ],
        "totalElements": 1,
        "totalPages": 1,
        "page": 0,
        "size": 10,
        "first": true,
        "last": true
    });

    Mock::given(method("GET"))
        .and(path("/vehicles"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client.list_vehicles(0, 10).await.unwrap();

    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].vehicle_registration, "34 ABC 123");
    assert_eq!(
        page.content[0]
            .model
            .as_ref()
            .and_then(|m| m.brand.as_ref())
            .map(|b| b.brand_name.as_str()),
        Some("Toyota")
    );
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_404_maps_to_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/vehicles/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .mount(&server)
        .await;

    let result = client.get_vehicle(999).await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert!(result.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_500_without_body_gets_generic_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/locations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    match client.locations().await {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("500"), "message was: {message}");
        }
        other => panic!("expected Api 500 error, got: {other:?}"),
    }
}
