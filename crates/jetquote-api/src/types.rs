// ── Wire types for the booking API ──
//
// Field names follow the API's snake_case conventions. These types carry
// no validation; `jetquote-core` builds them from validated domain values.

use serde::{Deserialize, Serialize};

// ── Requests ────────────────────────────────────────────────────────

/// Trip type as the API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    OneWay,
    RoundTrip,
    MultiLeg,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengersPayload {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetsPayload {
    pub small: u32,
    pub large: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuggagePayload {
    pub carry_on: u32,
    pub hold: u32,
    pub skis: u32,
    pub golf_bag: u32,
    pub other: u32,
}

/// One flight leg in API shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegPayload {
    pub departure_airport_id: u64,
    pub arrival_airport_id: u64,
    /// `YYYY-MM-DD`.
    pub departure_date: String,
    /// `HH:MM`, omitted when the traveller left it open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    pub passengers: PassengersPayload,
    pub pets: PetsPayload,
    pub luggage: LuggagePayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of `POST quotation-requests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationRequest {
    pub trip_type: TripType,
    pub legs: Vec<LegPayload>,
    pub customer: CustomerPayload,
}

/// Body of `POST flight-interests`: the legs plus a contact email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightInterestRequest {
    pub trip_type: TripType,
    pub legs: Vec<LegPayload>,
    pub email: String,
}

/// Body of `POST emails/confirmation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationEmailRequest {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub trip_type: TripType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

// ── Responses ───────────────────────────────────────────────────────

/// Response of the create endpoints. The API returns the id as either a
/// number or a string, and sometimes a separate human reference.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CreatedResponse {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CreatedResponse {
    /// The best identifier to show a customer: `reference`, else `id`.
    pub fn reference(&self) -> Option<String> {
        if let Some(ref r) = self.reference {
            return Some(r.clone());
        }
        match self.id.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `auth/signup` and `auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// IP geolocation lookup result (subset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeoLocation {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default, alias = "country")]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}
