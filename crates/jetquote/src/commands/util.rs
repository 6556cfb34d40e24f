//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use dialoguer::{Input, Select};
use tabled::Tabled;

use jetquote_core::{AirportIndex, Endpoint, LegSummary, StagedIntent};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

// ── Prompts ─────────────────────────────────────────────────────────

/// Prompts are allowed: not `--no-input` and stdin is a terminal.
pub fn interactive(global: &GlobalOpts) -> bool {
    !global.no_input && std::io::stdin().is_terminal()
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, global: &GlobalOpts) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !interactive(global) {
        return Err(CliError::InputRequired {
            field: "confirmation (--yes)".into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Use `value` if given, otherwise prompt for it.
pub fn value_or_prompt(
    value: Option<String>,
    label: &str,
    global: &GlobalOpts,
) -> Result<String, CliError> {
    if let Some(value) = value {
        return Ok(value);
    }
    if !interactive(global) {
        return Err(CliError::InputRequired {
            field: label.to_lowercase(),
        });
    }
    Input::new()
        .with_prompt(label)
        .interact_text()
        .map_err(prompt_err)
}

// ── Parsing ─────────────────────────────────────────────────────────

pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

pub fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, CliError> {
    NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected HH:MM, got '{raw}'"),
    })
}

pub fn parse_optional_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, CliError> {
    raw.map(|r| parse_date(field, r)).transpose()
}

pub fn parse_optional_time(field: &str, raw: Option<&str>) -> Result<Option<NaiveTime>, CliError> {
    raw.map(|r| parse_time(field, r)).transpose()
}

/// The traveller's calendar day; past-date checks run against local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ── Airport selection ───────────────────────────────────────────────

/// Turn what the traveller typed into an endpoint.
///
/// An exact id / code / ident or a single search hit resolves directly.
/// Otherwise an interactive session picks from the candidates; without
/// a pick the endpoint stays unresolved (label only, no id), and the
/// form rejects it on submit.
pub fn select_endpoint(
    index: &AirportIndex,
    query: &str,
    limit: usize,
    global: &GlobalOpts,
) -> Result<Endpoint, CliError> {
    if let Some(endpoint) = index.select(query) {
        return Ok(endpoint);
    }

    let candidates = index.search(query, limit);
    if candidates.is_empty() {
        output::warning(global, &format!("No airport matches '{query}'"));
        return Ok(Endpoint::unresolved(query));
    }
    if !interactive(global) {
        output::warning(
            global,
            &format!(
                "'{query}' matches {} airports; pass a code to pick one",
                candidates.len()
            ),
        );
        return Ok(Endpoint::unresolved(query));
    }

    let mut items: Vec<String> = candidates.iter().map(|a| a.label()).collect();
    items.push("None of these".into());
    let picked = Select::new()
        .with_prompt(format!("Which airport did you mean by '{query}'?"))
        .items(&items)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    Ok(candidates
        .get(picked)
        .map_or_else(|| Endpoint::unresolved(query), |a| a.to_endpoint()))
}

// ── Trip rendering ──────────────────────────────────────────────────

#[derive(Tabled)]
struct LegRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Pax")]
    passengers: u32,
}

fn place(code: Option<&String>, city: Option<&String>) -> String {
    match (code, city) {
        (Some(code), Some(city)) => format!("{code} · {city}"),
        (Some(only), None) | (None, Some(only)) => only.clone(),
        (None, None) => "?".into(),
    }
}

impl LegRow {
    fn new(number: usize, leg: &LegSummary) -> Self {
        Self {
            number,
            from: place(leg.departure_code.as_ref(), leg.departure_city.as_ref()),
            to: place(leg.arrival_code.as_ref(), leg.arrival_city.as_ref()),
            date: leg.date.format(DATE_FORMAT).to_string(),
            time: leg
                .time
                .map(|t| t.format(TIME_FORMAT).to_string())
                .unwrap_or_default(),
            passengers: leg.passengers,
        }
    }
}

/// How long until a staged intent expires, to the second.
pub fn remaining(staged: &StagedIntent, ttl: Duration, now: DateTime<Utc>) -> Duration {
    let age = staged.age(now).to_std().unwrap_or_default();
    Duration::from_secs(ttl.saturating_sub(age).as_secs())
}

/// Heading, expiry and leg table for a staged trip.
pub fn trip_detail(
    staged: &StagedIntent,
    legs: &[LegSummary],
    ttl: Duration,
    now: DateTime<Utc>,
) -> String {
    let rows: Vec<LegRow> = legs
        .iter()
        .enumerate()
        .map(|(i, leg)| LegRow::new(i + 1, leg))
        .collect();
    format!(
        "{} trip · staged {}\nExpires in {}\n{}",
        staged.intent.kind().title(),
        staged
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M"),
        humantime::format_duration(remaining(staged, ttl, now)),
        output::render_table(&rows),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeDelta;
    use jetquote_core::BookingIntent;

    use super::*;

    #[test]
    fn dates_and_times_parse_strictly() {
        assert_eq!(
            parse_date("date", " 2026-11-02 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
        );
        assert!(parse_date("date", "02/11/2026").is_err());
        assert_eq!(
            parse_time("time", "07:05").unwrap(),
            NaiveTime::from_hms_opt(7, 5, 0).unwrap()
        );
        assert!(parse_time("time", "7pm").is_err());
        assert_eq!(parse_optional_time("time", None).unwrap(), None);
    }

    #[test]
    fn place_prefers_code_and_city() {
        let code = "NCE".to_owned();
        let city = "Nice".to_owned();
        assert_eq!(place(Some(&code), Some(&city)), "NCE · Nice");
        assert_eq!(place(None, Some(&city)), "Nice");
        assert_eq!(place(None, None), "?");
    }

    #[test]
    fn remaining_never_underflows() {
        let index = AirportIndex::bundled().unwrap();
        let leg = jetquote_core::Leg {
            from: index.select("LBG").unwrap(),
            to: index.select("NCE").unwrap(),
            date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            time: None,
            passengers: jetquote_core::Passengers::default(),
            pets: jetquote_core::Pets::default(),
            luggage: jetquote_core::Luggage::default(),
        };
        let at: DateTime<Utc> = "2026-10-14T08:00:00Z".parse().unwrap();
        let staged = StagedIntent::new(BookingIntent::OneWay(leg), at);
        let hour = Duration::from_secs(3600);

        assert_eq!(
            remaining(&staged, hour, at + TimeDelta::minutes(15)),
            Duration::from_secs(45 * 60)
        );
        assert_eq!(
            remaining(&staged, hour, at + TimeDelta::hours(2)),
            Duration::ZERO
        );
    }
}
