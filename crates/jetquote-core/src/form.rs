// ── Booking forms ──
//
// Drafts for the three booking modes. Validation is local: failures come
// back as an ordered message list and the draft is left untouched so the
// traveller can fix it and resubmit.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::counter::{LuggageCounters, PassengerCounters, PetCounters};
use crate::model::validation::{self, ValidationErrors};
use crate::model::{BookingIntent, Endpoint, Leg, StagedIntent};
use crate::staging::{IntentStore, Staging, StagingError};

/// One leg as the traveller is filling it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegDraft {
    pub from: Option<Endpoint>,
    pub to: Option<Endpoint>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub passengers: PassengerCounters,
    pub pets: PetCounters,
    pub luggage: LuggageCounters,
}

impl LegDraft {
    /// Both airports resolved and a date picked.
    pub fn is_complete(&self) -> bool {
        self.from.as_ref().is_some_and(Endpoint::is_resolved)
            && self.to.as_ref().is_some_and(Endpoint::is_resolved)
            && self.date.is_some()
    }

    fn is_same_airport(&self) -> bool {
        let from = self.from.as_ref().and_then(|e| e.id);
        let to = self.to.as_ref().and_then(|e| e.id);
        matches!((from, to), (Some(a), Some(b)) if a == b)
    }

    /// The finished leg, or `None` while anything required is missing.
    pub fn build(&self) -> Option<Leg> {
        if !self.is_complete() {
            return None;
        }
        Some(Leg {
            from: self.from.clone()?,
            to: self.to.clone()?,
            date: self.date?,
            time: self.time,
            passengers: self.passengers.into(),
            pets: self.pets.into(),
            luggage: self.luggage.into(),
        })
    }
}

/// A form that turns its draft into a `BookingIntent` on submit.
pub trait BookingForm {
    fn submit(&self, today: NaiveDate) -> Result<BookingIntent, ValidationErrors>;
}

// ── One-way ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneWayForm {
    pub leg: LegDraft,
}

impl BookingForm for OneWayForm {
    fn submit(&self, today: NaiveDate) -> Result<BookingIntent, ValidationErrors> {
        let mut errs = ValidationErrors::new();
        check_draft(&self.leg, today, &mut errs);
        errs.into_result()?;
        built(&self.leg).map(BookingIntent::OneWay)
    }
}

// ── Round trip ──────────────────────────────────────────────────────

/// Outbound and return legs. Until the traveller sets a return airport
/// explicitly, the return leg mirrors the outbound one: return `from`
/// follows outbound `to`, return `to` follows outbound `from`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundTripForm {
    pub outbound: LegDraft,
    pub inbound: LegDraft,
    return_from_set: bool,
    return_to_set: bool,
}

impl RoundTripForm {
    pub fn set_outbound_from(&mut self, endpoint: Option<Endpoint>) {
        if !self.return_to_set {
            self.inbound.to.clone_from(&endpoint);
        }
        self.outbound.from = endpoint;
    }

    pub fn set_outbound_to(&mut self, endpoint: Option<Endpoint>) {
        if !self.return_from_set {
            self.inbound.from.clone_from(&endpoint);
        }
        self.outbound.to = endpoint;
    }

    /// Explicit return origin. Clearing it hands the field back to the
    /// outbound mirror.
    pub fn set_return_from(&mut self, endpoint: Option<Endpoint>) {
        self.return_from_set = endpoint.is_some();
        self.inbound.from = endpoint.or_else(|| self.outbound.to.clone());
    }

    pub fn set_return_to(&mut self, endpoint: Option<Endpoint>) {
        self.return_to_set = endpoint.is_some();
        self.inbound.to = endpoint.or_else(|| self.outbound.from.clone());
    }
}

impl BookingForm for RoundTripForm {
    fn submit(&self, today: NaiveDate) -> Result<BookingIntent, ValidationErrors> {
        let mut errs = ValidationErrors::new();
        check_draft(&self.outbound, today, &mut errs);
        check_draft(&self.inbound, today, &mut errs);
        if let (Some(out), Some(back)) = (self.outbound.date, self.inbound.date) {
            if back < out {
                errs.push(validation::RETURN_BEFORE_OUTBOUND);
            }
        }
        errs.into_result()?;

        Ok(BookingIntent::RoundTrip {
            outbound: built(&self.outbound)?,
            inbound: built(&self.inbound)?,
        })
    }
}

// ── Multi-leg ───────────────────────────────────────────────────────

/// An ordered list of legs; never fewer than one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiLegForm {
    legs: Vec<LegDraft>,
}

impl Default for MultiLegForm {
    fn default() -> Self {
        Self {
            legs: vec![LegDraft::default()],
        }
    }
}

impl MultiLegForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn legs(&self) -> &[LegDraft] {
        &self.legs
    }

    pub fn leg_mut(&mut self, index: usize) -> Option<&mut LegDraft> {
        self.legs.get_mut(index)
    }

    /// Append a leg starting where the previous one lands, with the same
    /// party. Returns its index.
    pub fn add_leg(&mut self) -> usize {
        let next = self.legs.last().map_or_else(LegDraft::default, |prev| LegDraft {
            from: prev.to.clone(),
            passengers: prev.passengers,
            pets: prev.pets,
            luggage: prev.luggage,
            ..LegDraft::default()
        });
        self.legs.push(next);
        self.legs.len() - 1
    }

    /// Remove the leg at `index`. The last remaining leg stays.
    pub fn remove_leg(&mut self, index: usize) -> bool {
        if self.legs.len() <= 1 || index >= self.legs.len() {
            return false;
        }
        self.legs.remove(index);
        true
    }

    /// Earliest date the leg at `index` may take: the previous leg's date,
    /// or `today` for the first leg.
    pub fn min_date(&self, index: usize, today: NaiveDate) -> NaiveDate {
        index
            .checked_sub(1)
            .and_then(|prev| self.legs.get(prev))
            .and_then(|prev| prev.date)
            .map_or(today, |d| d.max(today))
    }
}

impl BookingForm for MultiLegForm {
    fn submit(&self, today: NaiveDate) -> Result<BookingIntent, ValidationErrors> {
        let mut errs = ValidationErrors::new();
        if self.legs.len() < 2 {
            errs.push(validation::MULTI_LEG_MINIMUM);
        }

        for (i, draft) in self.legs.iter().enumerate() {
            let number = i + 1;
            if !draft.is_complete() {
                errs.push(validation::leg_required(number));
            } else if draft.is_same_airport() {
                errs.push(validation::leg_same_airport(number));
            }

            let Some(date) = draft.date else { continue };
            if date < today {
                errs.push(validation::leg_past_date(number));
            } else if date < self.min_date(i, today) {
                errs.push(validation::leg_before_previous(number));
            }
        }
        errs.into_result()?;

        let legs = self
            .legs
            .iter()
            .map(built)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BookingIntent::MultiLeg { legs })
    }
}

// ── Shared checks ───────────────────────────────────────────────────

fn check_draft(draft: &LegDraft, today: NaiveDate, errs: &mut ValidationErrors) {
    if !draft.is_complete() {
        errs.push(validation::REQUIRED_FIELDS);
    } else if draft.is_same_airport() {
        errs.push(validation::SAME_AIRPORT);
    }
    if draft.date.is_some_and(|d| d < today) {
        errs.push(validation::PAST_DATE);
    }
}

fn built(draft: &LegDraft) -> Result<Leg, ValidationErrors> {
    draft
        .build()
        .ok_or_else(|| ValidationErrors::single(validation::REQUIRED_FIELDS))
}

// ── Staging ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StageError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Staging(#[from] StagingError),
}

/// Validate `form` and, only if it passes, write the intent to `staging`.
pub fn stage<F, S>(
    form: &F,
    staging: &Staging<S>,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Result<StagedIntent, StageError>
where
    F: BookingForm,
    S: IntentStore,
{
    let intent = form.submit(today).map_err(|errs| {
        debug!(errors = errs.messages().len(), "form rejected");
        StageError::Validation(errs)
    })?;
    Ok(staging.stage(intent, now)?)
}
