//! Booking form command handlers.
//!
//! Each subcommand fills one form variant from flags, validates it, and
//! stages the resulting intent for `details` / `submit`. Nothing is
//! staged when validation fails.

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::warn;

use jetquote_core::form::{StageError, stage as stage_form};
use jetquote_core::{
    AirportIndex, BookingForm, Counter, Endpoint, FileStore, LegDraft, LegSummary,
    MultiLegForm, OneWayForm, RoundTripForm, StagedIntent, Staging,
};

use crate::cli::{
    BookArgs, BookCommand, CountArgs, GlobalOpts, MultiLegArgs, OneWayArgs, RoundTripArgs,
};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Form filling ────────────────────────────────────────────────────

/// Resolves typed airport text against the booking dataset.
struct Picker<'a> {
    index: &'a AirportIndex,
    limit: usize,
    global: &'a GlobalOpts,
}

impl Picker<'_> {
    fn pick(&self, raw: Option<&str>) -> Result<Option<Endpoint>, CliError> {
        raw.map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| util::select_endpoint(self.index, q, self.limit, self.global))
            .transpose()
    }
}

fn set_counter(counter: Counter, requested: u32, what: &str) -> Counter {
    let counter = counter.set(requested);
    if counter.value() != requested {
        warn!(
            what,
            requested,
            used = counter.value(),
            "count outside {}..={}, clamped",
            counter.min(),
            counter.max()
        );
    }
    counter
}

fn apply_counts(draft: &mut LegDraft, counts: &CountArgs) {
    let p = &mut draft.passengers;
    p.adults = set_counter(p.adults, counts.adults, "adults");
    p.children = set_counter(p.children, counts.children, "children");
    p.infants = set_counter(p.infants, counts.infants, "infants");

    let pets = &mut draft.pets;
    pets.small = set_counter(pets.small, counts.small_pets, "small pets");
    pets.large = set_counter(pets.large, counts.large_pets, "large pets");

    let l = &mut draft.luggage;
    l.carry_on = set_counter(l.carry_on, counts.carry_on, "carry-on bags");
    l.hold = set_counter(l.hold, counts.hold, "hold bags");
    l.skis = set_counter(l.skis, counts.skis, "ski bags");
    l.golf_bag = set_counter(l.golf_bag, counts.golf_bags, "golf bags");
    l.other = set_counter(l.other, counts.other_bags, "other bags");
}

fn one_way(picker: &Picker<'_>, args: &OneWayArgs) -> Result<OneWayForm, CliError> {
    let mut form = OneWayForm::default();
    form.leg.from = picker.pick(args.from.as_deref())?;
    form.leg.to = picker.pick(args.to.as_deref())?;
    form.leg.date = util::parse_optional_date("date", args.date.as_deref())?;
    form.leg.time = util::parse_optional_time("time", args.time.as_deref())?;
    apply_counts(&mut form.leg, &args.counts);
    Ok(form)
}

fn round_trip(picker: &Picker<'_>, args: &RoundTripArgs) -> Result<RoundTripForm, CliError> {
    let mut form = RoundTripForm::default();
    form.set_outbound_from(picker.pick(args.from.as_deref())?);
    form.set_outbound_to(picker.pick(args.to.as_deref())?);
    if let Some(endpoint) = picker.pick(args.return_from.as_deref())? {
        form.set_return_from(Some(endpoint));
    }
    if let Some(endpoint) = picker.pick(args.return_to.as_deref())? {
        form.set_return_to(Some(endpoint));
    }

    form.outbound.date = util::parse_optional_date("date", args.date.as_deref())?;
    form.outbound.time = util::parse_optional_time("time", args.time.as_deref())?;
    form.inbound.date = util::parse_optional_date("return-date", args.return_date.as_deref())?;
    form.inbound.time = util::parse_optional_time("return-time", args.return_time.as_deref())?;

    apply_counts(&mut form.outbound, &args.counts);
    apply_counts(&mut form.inbound, &args.counts);
    Ok(form)
}

/// One `--leg FROM,TO,DATE[,TIME]` value. Empty parts stay unset; an
/// empty FROM inherits the previous leg's arrival.
#[derive(Debug, PartialEq, Eq)]
struct LegSpec<'a> {
    from: Option<&'a str>,
    to: Option<&'a str>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
}

fn parse_leg(raw: &str, number: usize) -> Result<LegSpec<'_>, CliError> {
    let field = format!("leg {number}");
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(CliError::Validation {
            field,
            reason: format!("expected FROM,TO,DATE[,TIME], got '{raw}'"),
        });
    }
    let part = |i: usize| parts.get(i).copied().filter(|p| !p.is_empty());
    Ok(LegSpec {
        from: part(0),
        to: part(1),
        date: util::parse_optional_date(&field, part(2))?,
        time: util::parse_optional_time(&field, part(3))?,
    })
}

fn multi_leg(picker: &Picker<'_>, args: &MultiLegArgs) -> Result<MultiLegForm, CliError> {
    let mut form = MultiLegForm::new();
    for (i, raw) in args.legs.iter().enumerate() {
        let spec = parse_leg(raw, i + 1)?;
        let index = if i == 0 { 0 } else { form.add_leg() };
        let from = picker.pick(spec.from)?;
        let to = picker.pick(spec.to)?;
        if let Some(draft) = form.leg_mut(index) {
            if from.is_some() {
                draft.from = from;
            }
            draft.to = to;
            draft.date = spec.date;
            draft.time = spec.time;
            apply_counts(draft, &args.counts);
        }
    }
    // A lone empty draft still gets the party, so only the leg count fails.
    if args.legs.is_empty() {
        if let Some(draft) = form.leg_mut(0) {
            apply_counts(draft, &args.counts);
        }
    }
    Ok(form)
}

fn stage<F: BookingForm>(form: &F, staging: &Staging<FileStore>) -> Result<StagedIntent, CliError> {
    stage_form(form, staging, util::today(), Utc::now()).map_err(|e| match e {
        StageError::Validation(errors) => CliError::InvalidBooking { errors },
        StageError::Staging(e) => CliError::State(e),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(ctx: &Context, args: BookArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let index = ctx.booking_index()?;
    let picker = Picker {
        index: &index,
        limit: ctx.booking.booking_limit,
        global,
    };
    let staging = ctx.staging();

    let staged = match args.command {
        BookCommand::OneWay(a) => stage(&one_way(&picker, &a)?, &staging)?,
        BookCommand::RoundTrip(a) => stage(&round_trip(&picker, &a)?, &staging)?,
        BookCommand::MultiLeg(a) => stage(&multi_leg(&picker, &a)?, &staging)?,
    };

    let legs: Vec<LegSummary> = staged
        .intent
        .legs()
        .into_iter()
        .map(LegSummary::from)
        .collect();
    let now = Utc::now();
    let out = output::render_single(
        global.output,
        &staged,
        |s| util::trip_detail(s, &legs, ctx.booking.intent_ttl, now),
        |s| s.token.to_string(),
    );
    output::print_output(&out, global.quiet);
    output::success(
        global,
        &format!("{} trip staged", staged.intent.kind().title()),
    );
    output::hint(global, "Review it with `jetquote details`, then run `jetquote submit`.");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn leg_spec_with_time() {
        let spec = parse_leg("LBG, NCE ,2026-11-02,09:30", 1).unwrap();
        assert_eq!(spec.from, Some("LBG"));
        assert_eq!(spec.to, Some("NCE"));
        assert_eq!(spec.date, NaiveDate::from_ymd_opt(2026, 11, 2));
        assert_eq!(spec.time, NaiveTime::from_hms_opt(9, 30, 0));
    }

    #[test]
    fn leg_spec_empty_parts_stay_unset() {
        let spec = parse_leg(",GVA,", 2).unwrap();
        assert_eq!(
            spec,
            LegSpec {
                from: None,
                to: Some("GVA"),
                date: None,
                time: None,
            }
        );
    }

    #[test]
    fn leg_spec_needs_three_or_four_parts() {
        let err = parse_leg("LBG,NCE", 3).unwrap_err();
        assert!(err.to_string().contains("leg 3"));
        assert!(parse_leg("a,b,2026-11-02,10:00,extra", 1).is_err());
    }

    #[test]
    fn counts_are_clamped_into_bounds() {
        let mut draft = LegDraft::default();
        let counts = CountArgs {
            adults: 40,
            children: 2,
            infants: 0,
            small_pets: 1,
            large_pets: 0,
            carry_on: 0,
            hold: 3,
            skis: 0,
            golf_bags: 99,
            other_bags: 0,
        };
        apply_counts(&mut draft, &counts);
        assert_eq!(draft.passengers.adults.value(), 19);
        assert_eq!(draft.passengers.children.value(), 2);
        assert_eq!(draft.pets.small.value(), 1);
        assert_eq!(draft.luggage.hold.value(), 3);
        assert_eq!(draft.luggage.golf_bag.value(), 20);
    }
}
