// ── Booking intents ──
//
// `BookingIntent` is the tagged sum of the three booking modes. On the
// wire it is `{ "type": ..., "data": ... }`; `StagedIntent` adds the
// creation timestamp and a one-time token alongside.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use super::leg::Leg;
use super::validation::{self, ValidationErrors};

/// The booking mode, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TripKind {
    OneWay,
    RoundTrip,
    MultiLeg,
}

impl TripKind {
    /// Human-readable name for listings.
    pub fn title(self) -> &'static str {
        match self {
            Self::OneWay => "One-way",
            Self::RoundTrip => "Round trip",
            Self::MultiLeg => "Multi-leg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum BookingIntent {
    OneWay(Leg),
    RoundTrip {
        outbound: Leg,
        #[serde(rename = "return")]
        inbound: Leg,
    },
    MultiLeg {
        legs: Vec<Leg>,
    },
}

impl BookingIntent {
    pub fn kind(&self) -> TripKind {
        match self {
            Self::OneWay(_) => TripKind::OneWay,
            Self::RoundTrip { .. } => TripKind::RoundTrip,
            Self::MultiLeg { .. } => TripKind::MultiLeg,
        }
    }

    /// Legs in travel order.
    pub fn legs(&self) -> Vec<&Leg> {
        match self {
            Self::OneWay(leg) => vec![leg],
            Self::RoundTrip { outbound, inbound } => vec![outbound, inbound],
            Self::MultiLeg { legs } => legs.iter().collect(),
        }
    }

    /// Check the invariants a staged intent must hold before the details
    /// step may consume it.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::new();

        match self {
            Self::OneWay(leg) => check_leg(leg, &mut errs),
            Self::RoundTrip { outbound, inbound } => {
                check_leg(outbound, &mut errs);
                check_leg(inbound, &mut errs);
                if inbound.date < outbound.date {
                    errs.push(validation::RETURN_BEFORE_OUTBOUND);
                }
            }
            Self::MultiLeg { legs } => {
                if legs.len() < 2 {
                    errs.push(validation::MULTI_LEG_MINIMUM);
                }
                for (i, leg) in legs.iter().enumerate() {
                    let number = i + 1;
                    if !leg.is_resolved() {
                        errs.push(validation::leg_required(number));
                    } else if leg.is_same_airport() {
                        errs.push(validation::leg_same_airport(number));
                    }
                    if !leg.counts_in_bounds() {
                        errs.push(validation::leg_counts_out_of_range(number));
                    }
                    if i > 0 && legs.get(i - 1).is_some_and(|prev| leg.date < prev.date) {
                        errs.push(validation::leg_before_previous(number));
                    }
                }
            }
        }

        errs.into_result()
    }
}

fn check_leg(leg: &Leg, errs: &mut ValidationErrors) {
    if !leg.is_resolved() {
        errs.push(validation::REQUIRED_FIELDS);
    } else if leg.is_same_airport() {
        errs.push(validation::SAME_AIRPORT);
    }
    if !leg.counts_in_bounds() {
        errs.push(validation::COUNTS_OUT_OF_RANGE);
    }
}

/// An intent written to transient storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedIntent {
    #[serde(flatten)]
    pub intent: BookingIntent,
    /// Creation time (RFC 3339, UTC).
    pub timestamp: DateTime<Utc>,
    /// Identifies this staging; a new one is minted on every stage.
    pub token: Uuid,
}

impl StagedIntent {
    pub fn new(intent: BookingIntent, now: DateTime<Utc>) -> Self {
        Self {
            intent,
            timestamp: now,
            token: Uuid::new_v4(),
        }
    }

    /// Time since staging. Negative when the timestamp is in the future.
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now.signed_duration_since(self.timestamp)
    }

    /// Fresh iff younger than `ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        self.age(now) < ttl
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::leg::{Endpoint, Luggage, Passengers, Pets};

    fn endpoint(id: u64, code: &str) -> Endpoint {
        Endpoint {
            label: format!("{code} Airport, City ({code}), XX"),
            id: Some(id),
            code: Some(code.into()),
            city: Some("City".into()),
            country: Some("XX".into()),
        }
    }

    fn leg(from: u64, to: u64, day: u32) -> Leg {
        Leg {
            from: endpoint(from, "AAA"),
            to: endpoint(to, "BBB"),
            date: NaiveDate::from_ymd_opt(2026, 11, day).unwrap(),
            time: None,
            passengers: Passengers::default(),
            pets: Pets::default(),
            luggage: Luggage::default(),
        }
    }

    #[test]
    fn wire_shape_is_type_data_timestamp() {
        let now = "2026-10-14T08:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let staged = StagedIntent::new(BookingIntent::OneWay(leg(1, 2, 2)), now);
        let json = serde_json::to_value(&staged).unwrap();

        assert_eq!(json["type"], "oneWay");
        assert_eq!(json["data"]["from"]["id"], 1);
        assert_eq!(json["data"]["date"], "2026-11-02");
        assert_eq!(json["timestamp"], "2026-10-14T08:00:00Z");
        assert!(json["token"].is_string());

        let back: StagedIntent = serde_json::from_value(json).unwrap();
        assert_eq!(back, staged);
    }

    #[test]
    fn round_trip_uses_return_key() {
        let intent = BookingIntent::RoundTrip {
            outbound: leg(1, 2, 2),
            inbound: leg(2, 1, 5),
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["type"], "roundTrip");
        assert!(json["data"]["return"].is_object());
        assert!(json["data"]["outbound"].is_object());
    }

    #[test]
    fn return_before_outbound_is_invalid() {
        let intent = BookingIntent::RoundTrip {
            outbound: leg(1, 2, 10),
            inbound: leg(2, 1, 9),
        };
        let errs = intent.validate().unwrap_err();
        assert!(errs.contains(validation::RETURN_BEFORE_OUTBOUND));
    }

    #[test]
    fn missing_id_is_invalid() {
        let mut l = leg(1, 2, 2);
        l.to.id = None;
        let errs = BookingIntent::OneWay(l).validate().unwrap_err();
        assert!(errs.contains(validation::REQUIRED_FIELDS));
    }

    #[test]
    fn zero_adults_is_invalid() {
        let mut empty = leg(2, 3, 3);
        empty.passengers.adults = 0;
        let errs = BookingIntent::OneWay(empty.clone()).validate().unwrap_err();
        assert!(errs.contains(validation::COUNTS_OUT_OF_RANGE));

        let multi = BookingIntent::MultiLeg {
            legs: vec![leg(1, 2, 2), empty],
        };
        assert!(
            multi
                .validate()
                .unwrap_err()
                .contains(&validation::leg_counts_out_of_range(2))
        );
    }

    #[test]
    fn multi_leg_needs_two_ordered_legs() {
        let single = BookingIntent::MultiLeg {
            legs: vec![leg(1, 2, 2)],
        };
        assert!(
            single
                .validate()
                .unwrap_err()
                .contains(validation::MULTI_LEG_MINIMUM)
        );

        let backwards = BookingIntent::MultiLeg {
            legs: vec![leg(1, 2, 5), leg(2, 3, 4)],
        };
        assert!(
            backwards
                .validate()
                .unwrap_err()
                .contains(&validation::leg_before_previous(2))
        );

        let ok = BookingIntent::MultiLeg {
            legs: vec![leg(1, 2, 4), leg(2, 3, 4)],
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn freshness_window() {
        let staged_at = "2026-10-14T08:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let staged = StagedIntent::new(BookingIntent::OneWay(leg(1, 2, 2)), staged_at);
        let hour = Duration::from_secs(3600);

        assert!(staged.is_fresh(staged_at + TimeDelta::minutes(10), hour));
        assert!(!staged.is_fresh(staged_at + TimeDelta::minutes(60), hour));
        assert!(!staged.is_fresh(staged_at + TimeDelta::minutes(61), hour));
        assert!(staged.is_fresh(staged_at - TimeDelta::minutes(5), hour));
    }

    #[test]
    fn trip_kind_strings() {
        assert_eq!(TripKind::RoundTrip.to_string(), "roundTrip");
        assert_eq!("multiLeg".parse::<TripKind>().unwrap(), TripKind::MultiLeg);
    }
}
