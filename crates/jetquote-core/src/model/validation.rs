// ── Local validation errors ──
//
// Collected in order and rendered as a bulleted list. Never sent to the
// network.

use std::fmt;

pub const REQUIRED_FIELDS: &str = "Please fill all required fields and select valid airports.";
pub const PAST_DATE: &str = "Departure date cannot be in the past.";
pub const RETURN_BEFORE_OUTBOUND: &str = "Return date cannot be before departure date.";
pub const SAME_AIRPORT: &str = "Departure and arrival airports must be different.";
pub const MULTI_LEG_MINIMUM: &str = "Add at least two legs for a multi-leg trip.";
pub const COUNTS_OUT_OF_RANGE: &str =
    "Passenger and luggage counts must be within range, with at least one adult.";

pub const FIRST_NAME_REQUIRED: &str = "First name is required.";
pub const LAST_NAME_REQUIRED: &str = "Last name is required.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const INVALID_PHONE: &str = "Please enter a valid phone number.";

pub fn leg_required(number: usize) -> String {
    format!("Leg {number}: please fill all required fields and select valid airports.")
}

pub fn leg_past_date(number: usize) -> String {
    format!("Leg {number}: departure date cannot be in the past.")
}

pub fn leg_same_airport(number: usize) -> String {
    format!("Leg {number}: departure and arrival airports must be different.")
}

pub fn leg_counts_out_of_range(number: usize) -> String {
    format!("Leg {number}: passenger and luggage counts must be within range.")
}

pub fn leg_before_previous(number: usize) -> String {
    format!(
        "Leg {number} date cannot be before leg {}.",
        number.saturating_sub(1)
    )
}

/// One or more validation failures, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Add a message unless it is already present.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.messages.contains(&message) {
            self.messages.push(message);
        }
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        for m in other.messages {
            self.push(m);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "• {m}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
