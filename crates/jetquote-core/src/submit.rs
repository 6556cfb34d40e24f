// ── Submission flow ──
//
// Contact step -> quotation request -> best-effort confirmation email ->
// clear staged state. A failed quotation leaves the staged intent in
// place so the traveller can resubmit without re-entering anything.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jetquote_api::BookingClient;
use jetquote_api::types::{
    ConfirmationEmailRequest, CreatedResponse, FlightInterestRequest, MessageResponse,
    QuotationRequest,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::BookingConfig;
use crate::gate::{self, Redirect, UnauthorizedReason};
use crate::model::validation::{self, ValidationErrors};
use crate::model::{ContactDetails, StagedIntent, TripKind, is_valid_email};
use crate::staging::{IntentStore, Staging, StagingError};
use crate::transform::{self, TransformError};

/// Shown when the server gives no usable message.
pub const SUBMIT_FALLBACK: &str = "We couldn't submit your request. Please try again.";

// ── Backend seam ────────────────────────────────────────────────────

/// The booking API calls the flow depends on.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    async fn submit_quotation(
        &self,
        body: &QuotationRequest,
    ) -> Result<CreatedResponse, jetquote_api::Error>;

    async fn register_interest(
        &self,
        body: &FlightInterestRequest,
    ) -> Result<CreatedResponse, jetquote_api::Error>;

    async fn send_confirmation(
        &self,
        body: &ConfirmationEmailRequest,
    ) -> Result<MessageResponse, jetquote_api::Error>;
}

#[async_trait]
impl BookingBackend for BookingClient {
    async fn submit_quotation(
        &self,
        body: &QuotationRequest,
    ) -> Result<CreatedResponse, jetquote_api::Error> {
        self.create_quotation_request(body).await
    }

    async fn register_interest(
        &self,
        body: &FlightInterestRequest,
    ) -> Result<CreatedResponse, jetquote_api::Error> {
        self.create_flight_interest(body).await
    }

    async fn send_confirmation(
        &self,
        body: &ConfirmationEmailRequest,
    ) -> Result<MessageResponse, jetquote_api::Error> {
        self.send_confirmation_email(body).await
    }
}

// ── Outcomes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    /// Reference the API assigned, if it sent one.
    pub reference: Option<String>,
    pub trip: TripKind,
    pub email_sent: bool,
    pub redirect: Redirect,
    /// How long to show the success message before redirecting.
    #[serde(serialize_with = "duration_secs")]
    pub display_delay: Duration,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    /// The staged intent is gone, malformed, invalid or expired. It has
    /// been cleared; the traveller goes back home.
    #[error("booking session is no longer valid ({0})")]
    Gate(UnauthorizedReason),

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The API refused or could not be reached. Staged state is kept.
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
        #[source]
        source: jetquote_api::Error,
    },

    #[error(transparent)]
    Staging(#[from] StagingError),
}

impl SubmitError {
    fn api(source: jetquote_api::Error) -> Self {
        let message = source
            .server_message()
            .map_or_else(|| SUBMIT_FALLBACK.to_owned(), String::from);
        Self::Api {
            message,
            status: source.status(),
            source,
        }
    }

    /// The redirect this failure implies, if any.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            Self::Gate(_) => Some(Redirect::Home),
            _ => None,
        }
    }
}

// ── Flow ────────────────────────────────────────────────────────────

pub struct Submission<B> {
    backend: B,
    config: BookingConfig,
}

impl<B: BookingBackend> Submission<B> {
    pub fn new(backend: B, config: BookingConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Re-check the staged intent, clearing it on refusal.
    fn checked<S: IntentStore>(
        &self,
        staging: &Staging<S>,
        now: DateTime<Utc>,
    ) -> Result<StagedIntent, SubmitError> {
        gate::evaluate(staging, now, self.config.intent_ttl).map_err(|reason| {
            gate::discard(staging, reason);
            SubmitError::Gate(reason)
        })
    }

    /// Complete the booking for the staged intent.
    pub async fn submit<S: IntentStore>(
        &self,
        staging: &Staging<S>,
        contact: &ContactDetails,
        now: DateTime<Utc>,
    ) -> Result<Confirmation, SubmitError> {
        let staged = self.checked(staging, now)?;
        contact.validate().map_err(SubmitError::Validation)?;
        let body = transform::build_quotation(&staged.intent, contact)?;

        let created = self
            .backend
            .submit_quotation(&body)
            .await
            .map_err(|e| {
                warn!(error = %e, token = %staged.token, "quotation request failed");
                SubmitError::api(e)
            })?;
        let reference = created.reference();
        info!(?reference, trip = %staged.intent.kind(), "quotation request created");

        let email_sent = if self.config.send_confirmation {
            let email =
                transform::build_confirmation_email(staged.intent.kind(), contact, reference.clone());
            match self.backend.send_confirmation(&email).await {
                Ok(_) => true,
                Err(e) => {
                    warn!(error = %e, "confirmation email failed");
                    false
                }
            }
        } else {
            false
        };

        if let Err(e) = staging.clear() {
            warn!(error = %e, "booking submitted but staged intent could not be cleared");
        }

        Ok(Confirmation {
            reference,
            trip: staged.intent.kind(),
            email_sent,
            redirect: Redirect::Confirmation,
            display_delay: self.config.confirmation_delay,
        })
    }

    /// Register a lightweight lead for the staged intent. Staged state is
    /// left in place for the full booking.
    pub async fn register_interest<S: IntentStore>(
        &self,
        staging: &Staging<S>,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, SubmitError> {
        let staged = self.checked(staging, now)?;
        if !is_valid_email(email) {
            return Err(SubmitError::Validation(ValidationErrors::single(
                validation::INVALID_EMAIL,
            )));
        }
        let body = transform::build_interest(&staged.intent, email)?;
        let created = self
            .backend
            .register_interest(&body)
            .await
            .map_err(SubmitError::api)?;
        info!(reference = ?created.reference(), "flight interest registered");
        Ok(created.reference())
    }
}

/// Serialize a `Duration` as whole seconds.
fn duration_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_secs())
}
