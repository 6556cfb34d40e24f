//! Booking-intent pipeline for charter quotations.
//!
//! This crate sits between `jetquote-api` and the front-ends. It owns the
//! domain model and every step a booking passes through:
//!
//! - **[`AirportIndex`]**: in-memory autocomplete over a static airport
//!   dataset. Selecting a candidate yields an [`Endpoint`] carrying the
//!   display label together with the resolved id and structured fields.
//!
//! - **Forms** ([`form`]): one-way, round-trip and multi-leg drafts built
//!   from endpoints and bounded [`counter`]s. Submitting validates locally
//!   and produces a [`BookingIntent`].
//!
//! - **[`Staging`]**: the one-slot handoff between the form step and the
//!   details step, over any [`IntentStore`] (memory or file).
//!
//! - **[`AccessGate`]**: the details step's one-time check of the staged
//!   intent (present, well-formed, fresh), redirecting home otherwise.
//!
//! - **[`transform`]** and **[`Submission`]**: map the intent and contact
//!   details onto the API payload, submit, fire the confirmation email,
//!   and clear staged state on success.

pub mod autocomplete;
pub mod config;
pub mod counter;
pub mod error;
pub mod form;
pub mod gate;
pub mod model;
pub mod staging;
pub mod submit;
pub mod transform;

// ── Primary re-exports ──────────────────────────────────────────────
pub use autocomplete::AirportIndex;
pub use config::{BookingConfig, ClientConfig};
pub use counter::{Counter, LuggageCounters, PassengerCounters, PetCounters};
pub use error::CoreError;
pub use form::{BookingForm, LegDraft, MultiLegForm, OneWayForm, RoundTripForm, StageError};
pub use gate::{AccessGate, Checkout, GateState, LegSummary, Redirect, UnauthorizedReason};
pub use staging::{FileStore, IntentStore, MemoryStore, Staging, StagingError};
pub use submit::{BookingBackend, Confirmation, SUBMIT_FALLBACK, Submission, SubmitError};
pub use transform::TransformError;

pub use model::{
    Airport, BookingIntent, ContactDetails, Endpoint, Leg, Luggage, Passengers, Pets,
    StagedIntent, TripKind, ValidationErrors,
};
