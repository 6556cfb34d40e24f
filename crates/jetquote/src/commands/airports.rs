//! Airport search command handlers.

use tabled::Tabled;

use jetquote_core::{Airport, CoreError};

use crate::cli::{AirportsArgs, AirportsCommand, GlobalOpts, OutputFormat};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AirportRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Country")]
    country: String,
}

impl From<&Airport> for AirportRow {
    fn from(a: &Airport) -> Self {
        Self {
            id: a.id,
            code: a.display_code().to_owned(),
            name: a.name.clone(),
            city: a.municipality.clone(),
            country: a.country.clone(),
        }
    }
}

fn detail(a: &Airport) -> String {
    let mut lines = vec![
        format!("ID:       {}", a.id),
        format!("Name:     {}", a.name),
        format!("Code:     {}", a.display_code()),
    ];
    if !a.ident.is_empty() && a.ident != a.display_code() {
        lines.push(format!("Ident:    {}", a.ident));
    }
    if !a.municipality.is_empty() {
        lines.push(format!("City:     {}", a.municipality));
    }
    if !a.country.is_empty() {
        lines.push(format!("Country:  {}", a.country));
    }
    if !a.keywords.is_empty() {
        lines.push(format!("Keywords: {}", a.keywords));
    }
    lines.push(format!("Label:    {}", a.label()));
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(ctx: &Context, args: AirportsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AirportsCommand::Search {
            query,
            booking,
            limit,
        } => {
            let (index, default_limit) = if booking {
                (ctx.booking_index()?, ctx.booking.booking_limit)
            } else {
                (ctx.search_index()?, ctx.booking.search_limit)
            };
            let hits = index.search(&query, limit.unwrap_or(default_limit));
            if hits.is_empty() && global.output == OutputFormat::Table {
                if !global.quiet {
                    eprintln!(
                        "No airports match '{query}' (queries need at least {} characters)",
                        ctx.booking.min_query_len
                    );
                }
                return Ok(());
            }
            let out = output::render_list(
                global.output,
                &hits,
                |a| AirportRow::from(*a),
                |a| a.label(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AirportsCommand::Show { airport } => {
            let index = ctx.search_index()?;
            let found = index
                .resolve(&airport)
                .ok_or(CoreError::AirportNotFound {
                    identifier: airport,
                })?;
            let out = output::render_single(global.output, found, detail, |a| a.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
