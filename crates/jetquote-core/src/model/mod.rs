// ── Canonical domain model ──
//
// Airports, legs, intents and contact details. Everything here is plain
// data plus local validation; no I/O.

pub mod airport;
pub mod contact;
pub mod intent;
pub mod leg;
pub mod validation;

pub use airport::{Airport, LabelParts, parse_label};
pub use contact::{ContactDetails, is_valid_email, is_valid_phone};
pub use intent::{BookingIntent, StagedIntent, TripKind};
pub use leg::{Endpoint, Leg, Luggage, Passengers, Pets};
pub use validation::ValidationErrors;
