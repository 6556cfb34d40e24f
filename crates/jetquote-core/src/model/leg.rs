// ── Flight legs ──
//
// A leg is shared by every booking variant. Endpoints keep the display
// label next to the resolved id and structured fields captured when the
// airport was selected.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::airport::parse_label;
use crate::counter::bounds;

/// One side of a leg: what the traveller saw and what it resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Free-text label, e.g. `"Paris-Le Bourget Airport, Paris (LBG), FR"`.
    pub label: String,
    /// Resolved airport id. Required before submission.
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Endpoint {
    /// An endpoint typed by hand and not (yet) matched to an airport.
    pub fn unresolved(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Label present and id resolved.
    pub fn is_resolved(&self) -> bool {
        self.id.is_some() && !self.label.trim().is_empty()
    }

    /// Structured code, else whatever the label yields.
    pub fn display_code(&self) -> Option<String> {
        self.code
            .clone()
            .filter(|c| !c.is_empty())
            .or_else(|| parse_label(&self.label).code)
    }

    /// Structured city, else whatever the label yields.
    pub fn display_city(&self) -> Option<String> {
        self.city
            .clone()
            .filter(|c| !c.is_empty())
            .or_else(|| parse_label(&self.label).city)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passengers {
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
}

impl Default for Passengers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

impl Passengers {
    pub fn total(&self) -> u32 {
        self.adults
            .saturating_add(self.children)
            .saturating_add(self.infants)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pets {
    #[serde(default)]
    pub small: u32,
    #[serde(default)]
    pub large: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Luggage {
    #[serde(default)]
    pub carry_on: u32,
    #[serde(default)]
    pub hold: u32,
    #[serde(default)]
    pub skis: u32,
    #[serde(default)]
    pub golf_bag: u32,
    #[serde(default)]
    pub other: u32,
}

/// A single flight leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub from: Endpoint,
    pub to: Endpoint,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default)]
    pub passengers: Passengers,
    #[serde(default)]
    pub pets: Pets,
    #[serde(default)]
    pub luggage: Luggage,
}

impl Leg {
    /// Both endpoints resolved.
    pub fn is_resolved(&self) -> bool {
        self.from.is_resolved() && self.to.is_resolved()
    }

    /// Both ids resolved and identical.
    pub fn is_same_airport(&self) -> bool {
        matches!((self.from.id, self.to.id), (Some(a), Some(b)) if a == b)
    }

    /// Every count inside the picker bounds, at least one adult.
    pub fn counts_in_bounds(&self) -> bool {
        let within = |value: u32, (min, max): (u32, u32)| (min..=max).contains(&value);
        let Luggage {
            carry_on,
            hold,
            skis,
            golf_bag,
            other,
        } = self.luggage;

        within(self.passengers.adults, bounds::ADULTS)
            && within(self.passengers.children, bounds::CHILDREN)
            && within(self.passengers.infants, bounds::INFANTS)
            && within(self.pets.small, bounds::PETS)
            && within(self.pets.large, bounds::PETS)
            && [carry_on, hold, skis, golf_bag, other]
                .into_iter()
                .all(|n| within(n, bounds::LUGGAGE))
    }
}
