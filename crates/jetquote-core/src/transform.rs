// ── Intent -> API payload ──
//
// Pure mapping from the staged, traveller-oriented intent onto the
// booking API's snake_case leg array and customer object.

use jetquote_api::types::{
    ConfirmationEmailRequest, CustomerPayload, FlightInterestRequest, LegPayload,
    LuggagePayload, PassengersPayload, PetsPayload, QuotationRequest, TripType,
};
use thiserror::Error;

use crate::model::{BookingIntent, ContactDetails, Leg, TripKind};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A leg reached the transformer without resolved airport ids.
    #[error("airport IDs missing")]
    MissingAirportIds,
}

pub fn trip_type(kind: TripKind) -> TripType {
    match kind {
        TripKind::OneWay => TripType::OneWay,
        TripKind::RoundTrip => TripType::RoundTrip,
        TripKind::MultiLeg => TripType::MultiLeg,
    }
}

/// The API leg array for an intent.
///
/// Every leg must carry both ids. The return leg of a round trip flies
/// the outbound route reversed: outbound destination becomes its origin,
/// outbound origin its destination.
pub fn build_legs(intent: &BookingIntent) -> Result<Vec<LegPayload>, TransformError> {
    if intent
        .legs()
        .iter()
        .any(|leg| leg.from.id.is_none() || leg.to.id.is_none())
    {
        return Err(TransformError::MissingAirportIds);
    }

    match intent {
        BookingIntent::OneWay(leg) => Ok(vec![leg_payload(leg, ids(leg)?)]),
        BookingIntent::RoundTrip { outbound, inbound } => {
            let (origin, destination) = ids(outbound)?;
            Ok(vec![
                leg_payload(outbound, (origin, destination)),
                leg_payload(inbound, (destination, origin)),
            ])
        }
        BookingIntent::MultiLeg { legs } => legs
            .iter()
            .map(|leg| ids(leg).map(|pair| leg_payload(leg, pair)))
            .collect(),
    }
}

/// Body of `POST quotation-requests`.
pub fn build_quotation(
    intent: &BookingIntent,
    contact: &ContactDetails,
) -> Result<QuotationRequest, TransformError> {
    Ok(QuotationRequest {
        trip_type: trip_type(intent.kind()),
        legs: build_legs(intent)?,
        customer: customer(contact),
    })
}

/// Body of `POST flight-interests`.
pub fn build_interest(
    intent: &BookingIntent,
    email: &str,
) -> Result<FlightInterestRequest, TransformError> {
    Ok(FlightInterestRequest {
        trip_type: trip_type(intent.kind()),
        legs: build_legs(intent)?,
        email: email.trim().to_owned(),
    })
}

/// Body of `POST emails/confirmation`.
pub fn build_confirmation_email(
    kind: TripKind,
    contact: &ContactDetails,
    reference: Option<String>,
) -> ConfirmationEmailRequest {
    ConfirmationEmailRequest {
        email: contact.email.trim().to_owned(),
        name: contact.full_name(),
        reference,
        trip_type: trip_type(kind),
    }
}

fn ids(leg: &Leg) -> Result<(u64, u64), TransformError> {
    match (leg.from.id, leg.to.id) {
        (Some(from), Some(to)) => Ok((from, to)),
        _ => Err(TransformError::MissingAirportIds),
    }
}

fn leg_payload(leg: &Leg, (origin, destination): (u64, u64)) -> LegPayload {
    LegPayload {
        departure_airport_id: origin,
        arrival_airport_id: destination,
        departure_date: leg.date.format(DATE_FORMAT).to_string(),
        departure_time: leg.time.map(|t| t.format(TIME_FORMAT).to_string()),
        passengers: PassengersPayload {
            adults: leg.passengers.adults,
            children: leg.passengers.children,
            infants: leg.passengers.infants,
        },
        pets: PetsPayload {
            small: leg.pets.small,
            large: leg.pets.large,
        },
        luggage: LuggagePayload {
            carry_on: leg.luggage.carry_on,
            hold: leg.luggage.hold,
            skis: leg.luggage.skis,
            golf_bag: leg.luggage.golf_bag,
            other: leg.luggage.other,
        },
    }
}

fn customer(contact: &ContactDetails) -> CustomerPayload {
    let optional = |v: Option<&str>| {
        v.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };
    CustomerPayload {
        first_name: contact.first_name.trim().to_owned(),
        last_name: contact.last_name.trim().to_owned(),
        email: contact.email.trim().to_owned(),
        phone: contact.phone.trim().to_owned(),
        company: optional(contact.company.as_deref()),
        message: optional(contact.notes.as_deref()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Endpoint, Luggage, Passengers, Pets};

    fn endpoint(id: Option<u64>) -> Endpoint {
        Endpoint {
            label: "Somewhere (XXX)".into(),
            id,
            ..Endpoint::default()
        }
    }

    fn leg(from: Option<u64>, to: Option<u64>) -> Leg {
        Leg {
            from: endpoint(from),
            to: endpoint(to),
            date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            time: NaiveTime::from_hms_opt(7, 5, 0),
            passengers: Passengers {
                adults: 3,
                children: 0,
                infants: 1,
            },
            pets: Pets { small: 1, large: 0 },
            luggage: Luggage {
                golf_bag: 2,
                ..Luggage::default()
            },
        }
    }

    fn contact() -> ContactDetails {
        ContactDetails {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone: "+44 20 7946 0958".into(),
            company: Some("  ".into()),
            notes: Some("Catering for four".into()),
        }
    }

    #[test]
    fn one_way_maps_fields_and_formats() {
        let req = build_quotation(&BookingIntent::OneWay(leg(Some(1), Some(2))), &contact())
            .unwrap();

        assert_eq!(req.trip_type, TripType::OneWay);
        let l = &req.legs[0];
        assert_eq!((l.departure_airport_id, l.arrival_airport_id), (1, 2));
        assert_eq!(l.departure_date, "2026-11-02");
        assert_eq!(l.departure_time.as_deref(), Some("07:05"));
        assert_eq!(l.passengers.infants, 1);
        assert_eq!(l.pets.small, 1);
        assert_eq!(l.luggage.golf_bag, 2);

        assert_eq!(req.customer.first_name, "Ada");
        assert_eq!(req.customer.company, None);
        assert_eq!(req.customer.message.as_deref(), Some("Catering for four"));
    }

    #[test]
    fn round_trip_return_leg_reverses_outbound_ids() {
        let intent = BookingIntent::RoundTrip {
            outbound: leg(Some(10), Some(20)),
            // return ids are taken from the outbound route, not the return draft
            inbound: leg(Some(21), Some(11)),
        };
        let legs = build_legs(&intent).unwrap();
        let route: Vec<_> = legs
            .iter()
            .map(|l| (l.departure_airport_id, l.arrival_airport_id))
            .collect();
        assert_eq!(route, vec![(10, 20), (20, 10)]);
    }

    #[test]
    fn missing_id_anywhere_fails() {
        let one_way = BookingIntent::OneWay(leg(Some(1), None));
        assert_eq!(
            build_quotation(&one_way, &contact()),
            Err(TransformError::MissingAirportIds)
        );

        let multi = BookingIntent::MultiLeg {
            legs: vec![leg(Some(1), Some(2)), leg(None, Some(3))],
        };
        assert_eq!(build_legs(&multi), Err(TransformError::MissingAirportIds));

        let round = BookingIntent::RoundTrip {
            outbound: leg(Some(1), Some(2)),
            inbound: leg(Some(2), None),
        };
        assert_eq!(
            TransformError::MissingAirportIds.to_string(),
            "airport IDs missing"
        );
        assert!(build_legs(&round).is_err());
    }

    #[test]
    fn interest_and_email_bodies() {
        let intent = BookingIntent::MultiLeg {
            legs: vec![leg(Some(1), Some(2)), leg(Some(2), Some(3))],
        };
        let interest = build_interest(&intent, " ops@example.com ").unwrap();
        assert_eq!(interest.trip_type, TripType::MultiLeg);
        assert_eq!(interest.legs.len(), 2);
        assert_eq!(interest.email, "ops@example.com");

        let email = build_confirmation_email(intent.kind(), &contact(), Some("JQ-1".into()));
        assert_eq!(email.name, "Ada Lovelace");
        assert_eq!(email.reference.as_deref(), Some("JQ-1"));
    }
}
