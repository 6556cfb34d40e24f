// ── Access gate for the details step ──
//
// Evaluated once when the details step mounts:
//
//   Loading ──(missing | malformed | invalid | expired)──> Unauthorized + clear + redirect home
//           ──(present, valid, fresh)──────────────────> Authorized(checkout)
//
// There is no re-check while the contact step is open; an intent can
// expire under it and is caught again on submit.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use strum::Display;
use tracing::{info, warn};

use crate::model::{Leg, StagedIntent};
use crate::staging::{IntentStore, Staging, StagingError};

/// Where a step sends the traveller next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Redirect {
    Home,
    Confirmation,
}

/// Why the gate refused entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum UnauthorizedReason {
    /// Nothing staged.
    Missing,
    /// Storage held something that is not a staged intent.
    Malformed,
    /// A leg lacks ids, labels, or date order.
    Invalid,
    /// Older than the TTL.
    Expired,
}

/// Display fields derived for one leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegSummary {
    pub departure_code: Option<String>,
    pub departure_city: Option<String>,
    pub arrival_code: Option<String>,
    pub arrival_city: Option<String>,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub passengers: u32,
}

impl From<&Leg> for LegSummary {
    fn from(leg: &Leg) -> Self {
        Self {
            departure_code: leg.from.display_code(),
            departure_city: leg.from.display_city(),
            arrival_code: leg.to.display_code(),
            arrival_city: leg.to.display_city(),
            date: leg.date,
            time: leg.time,
            passengers: leg.passengers.total(),
        }
    }
}

/// What the details step shows once authorized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkout {
    pub staged: StagedIntent,
    pub legs: Vec<LegSummary>,
}

impl Checkout {
    fn new(staged: StagedIntent) -> Self {
        let legs = staged.intent.legs().into_iter().map(LegSummary::from).collect();
        Self { staged, legs }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Loading,
    Unauthorized(UnauthorizedReason),
    Authorized(Box<Checkout>),
}

/// Check a staged intent against shape and freshness rules.
pub fn authorize(
    staged: &StagedIntent,
    now: DateTime<Utc>,
    ttl: Duration,
) -> Result<(), UnauthorizedReason> {
    if staged.intent.validate().is_err() {
        return Err(UnauthorizedReason::Invalid);
    }
    if !staged.is_fresh(now, ttl) {
        return Err(UnauthorizedReason::Expired);
    }
    Ok(())
}

/// Read the staged intent and classify it. Read failures count as missing.
pub(crate) fn evaluate<S: IntentStore>(
    staging: &Staging<S>,
    now: DateTime<Utc>,
    ttl: Duration,
) -> Result<StagedIntent, UnauthorizedReason> {
    let staged = match staging.load() {
        Ok(Some(staged)) => staged,
        Ok(None) => return Err(UnauthorizedReason::Missing),
        Err(StagingError::Malformed(e)) => {
            warn!(error = %e, "discarding malformed booking intent");
            return Err(UnauthorizedReason::Malformed);
        }
        Err(e) => {
            warn!(error = %e, "booking intent unreadable");
            return Err(UnauthorizedReason::Missing);
        }
    };
    authorize(&staged, now, ttl)?;
    Ok(staged)
}

/// Drop whatever is staged after a refusal. Failure to clear is logged only.
pub(crate) fn discard<S: IntentStore>(staging: &Staging<S>, reason: UnauthorizedReason) {
    info!(%reason, "booking intent rejected");
    if let Err(e) = staging.clear() {
        warn!(error = %e, "failed to clear rejected booking intent");
    }
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    ttl: Duration,
    state: GateState,
}

impl AccessGate {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: GateState::Loading,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn checkout(&self) -> Option<&Checkout> {
        match &self.state {
            GateState::Authorized(checkout) => Some(checkout.as_ref()),
            _ => None,
        }
    }

    /// Run the one-time check. Returns the redirect to follow, if any.
    ///
    /// Only the first call from `Loading` does anything; later calls
    /// return `None`, so a refusal redirects exactly once.
    pub fn mount<S: IntentStore>(
        &mut self,
        staging: &Staging<S>,
        now: DateTime<Utc>,
    ) -> Option<Redirect> {
        if self.state != GateState::Loading {
            return None;
        }

        match evaluate(staging, now, self.ttl) {
            Ok(staged) => {
                info!(token = %staged.token, trip = %staged.intent.kind(), "details step authorized");
                self.state = GateState::Authorized(Box::new(Checkout::new(staged)));
                None
            }
            Err(reason) => {
                discard(staging, reason);
                self.state = GateState::Unauthorized(reason);
                Some(Redirect::Home)
            }
        }
    }
}
