#![allow(clippy::unwrap_used)]
// Integration tests for `BookingClient` and `GeoClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jetquote_api::types::{
    CustomerPayload, FlightInterestRequest, LegPayload, LuggagePayload, PassengersPayload,
    PetsPayload, QuotationRequest, TripType,
};
use jetquote_api::{BookingClient, Error, GeoClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BookingClient) {
    let server = MockServer::start().await;
    let base = format!("{}/v1", server.uri());
    let client = BookingClient::new(&base, &TransportConfig::default()).unwrap();
    (server, client)
}

fn leg(from: u64, to: u64) -> LegPayload {
    LegPayload {
        departure_airport_id: from,
        arrival_airport_id: to,
        departure_date: "2026-11-02".into(),
        departure_time: Some("09:30".into()),
        passengers: PassengersPayload {
            adults: 2,
            children: 1,
            infants: 0,
        },
        pets: PetsPayload::default(),
        luggage: LuggagePayload {
            hold: 2,
            ..LuggagePayload::default()
        },
    }
}

fn quotation() -> QuotationRequest {
    QuotationRequest {
        trip_type: TripType::OneWay,
        legs: vec![leg(1382, 3797)],
        customer: CustomerPayload {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0958".into(),
            company: None,
            message: None,
        },
    }
}

// ── Quotation requests ──────────────────────────────────────────────

#[tokio::test]
async fn test_create_quotation_request_posts_snake_case_payload() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/quotation-requests"))
        .and(header("accept", "application/json"))
        .and(body_partial_json(json!({
            "trip_type": "one_way",
            "legs": [{
                "departure_airport_id": 1382,
                "arrival_airport_id": 3797,
                "departure_date": "2026-11-02",
                "departure_time": "09:30",
                "passengers": { "adults": 2, "children": 1, "infants": 0 },
                "luggage": { "carry_on": 0, "hold": 2, "skis": 0, "golf_bag": 0, "other": 0 }
            }],
            "customer": { "first_name": "Ada", "email": "ada@example.com" }
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 991, "reference": "JQ-991" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_quotation_request(&quotation()).await.unwrap();
    assert_eq!(created.reference().as_deref(), Some("JQ-991"));
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/quotation-requests"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Quote engine offline" })),
        )
        .mount(&server)
        .await;

    let err = client
        .create_quotation_request(&quotation())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.server_message(), Some("Quote engine offline"));
}

#[tokio::test]
async fn test_server_error_without_body_has_no_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/quotation-requests"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client
        .create_quotation_request(&quotation())
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, None);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/quotation-requests"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2"))
        .mount(&server)
        .await;

    let err = client
        .create_quotation_request(&quotation())
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::Deserialization { .. }),
        "expected Deserialization error, got: {err:?}"
    );
}

// ── Interests & email ───────────────────────────────────────────────

#[tokio::test]
async fn test_create_flight_interest() {
    let (server, client) = setup().await;

    let body = FlightInterestRequest {
        trip_type: TripType::RoundTrip,
        legs: vec![leg(1, 2), leg(2, 1)],
        email: "ops@example.com".into(),
    };

    Mock::given(method("POST"))
        .and(path("/v1/flight-interests"))
        .and(body_json(serde_json::to_value(&body).unwrap()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "int-7" })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_flight_interest(&body).await.unwrap();
    assert_eq!(created.reference().as_deref(), Some("int-7"));
}

#[tokio::test]
async fn test_confirmation_email_accepts_empty_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/emails/confirmation"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let body = jetquote_api::types::ConfirmationEmailRequest {
        email: "ada@example.com".into(),
        name: "Ada Lovelace".into(),
        reference: Some("JQ-1".into()),
        trip_type: TripType::OneWay,
    };
    let resp = client.send_confirmation_email(&body).await.unwrap();
    assert_eq!(resp.message, None);
}

// ── Accounts ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_newsletter_subscribe() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/newsletter/subscribe"))
        .and(body_json(json!({ "email": "ada@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Subscribed" })))
        .mount(&server)
        .await;

    let resp = client.subscribe_newsletter("ada@example.com").await.unwrap();
    assert_eq!(resp.message.as_deref(), Some("Subscribed"));
}

#[tokio::test]
async fn test_login_sends_password_and_reads_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-1" })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    let resp = client.login("ada@example.com", &secret).await.unwrap();
    assert_eq!(resp.token.as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn test_login_failure_reads_nested_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "error": { "message": "Invalid credentials" } })),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let err = client.login("ada@example.com", &secret).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Invalid credentials"));
}

// ── Geolocation ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_geo_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ip": "203.0.113.9",
            "country": "FR",
            "country_name": "France",
            "city": "Paris"
        })))
        .mount(&server)
        .await;

    let geo = GeoClient::new(
        &format!("{}/json/", server.uri()),
        &TransportConfig::default(),
    )
    .unwrap();
    let loc = geo.lookup().await.unwrap();
    assert_eq!(loc.country_code.as_deref(), Some("FR"));
    assert_eq!(loc.city.as_deref(), Some("Paris"));
}
