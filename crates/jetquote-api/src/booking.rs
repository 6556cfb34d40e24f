// Booking endpoints: flight interests, quotation requests, confirmation email.

use tracing::debug;

use crate::client::BookingClient;
use crate::error::Error;
use crate::types::{
    ConfirmationEmailRequest, CreatedResponse, FlightInterestRequest, MessageResponse,
    QuotationRequest,
};

impl BookingClient {
    /// Register interest in a trip (lightweight lead, email only).
    ///
    /// `POST flight-interests`
    pub async fn create_flight_interest(
        &self,
        body: &FlightInterestRequest,
    ) -> Result<CreatedResponse, Error> {
        debug!(legs = body.legs.len(), "creating flight interest");
        self.post("flight-interests", body).await
    }

    /// Request a quotation for a fully specified trip.
    ///
    /// `POST quotation-requests`
    pub async fn create_quotation_request(
        &self,
        body: &QuotationRequest,
    ) -> Result<CreatedResponse, Error> {
        debug!(
            trip_type = ?body.trip_type,
            legs = body.legs.len(),
            "creating quotation request"
        );
        self.post("quotation-requests", body).await
    }

    /// Ask the API to email the customer a confirmation.
    ///
    /// `POST emails/confirmation`
    pub async fn send_confirmation_email(
        &self,
        body: &ConfirmationEmailRequest,
    ) -> Result<MessageResponse, Error> {
        self.post("emails/confirmation", body).await
    }
}
