//! Submit command handler: the contact step of a staged booking.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};

use jetquote_core::{Confirmation, ContactDetails, Submission};

use crate::cli::{GlobalOpts, SubmitArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::{details, util};

fn spinner(global: &GlobalOpts, message: &str) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner().with_style(ProgressStyle::default_spinner());
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Contact details from flags, prompting for required ones left out.
fn contact_details(args: SubmitArgs, global: &GlobalOpts) -> Result<ContactDetails, CliError> {
    Ok(ContactDetails {
        first_name: util::value_or_prompt(args.first_name, "First name", global)?,
        last_name: util::value_or_prompt(args.last_name, "Last name", global)?,
        email: util::value_or_prompt(args.email, "Email", global)?,
        phone: util::value_or_prompt(args.phone, "Phone", global)?,
        company: optional(args.company),
        notes: optional(args.notes),
    })
}

fn confirmation_detail(c: &Confirmation) -> String {
    let mut lines = vec![format!("{} quotation request received", c.trip.title())];
    if let Some(ref reference) = c.reference {
        lines.push(format!("Reference: {reference}"));
    }
    lines.push(if c.email_sent {
        "A confirmation email is on its way.".to_owned()
    } else {
        "We could not send a confirmation email; the request itself went through.".to_owned()
    });
    lines.join("\n")
}

pub async fn handle(ctx: &Context, args: SubmitArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let staging = ctx.staging();

    // The details step: gate first, so nobody types contact details into
    // an expired booking.
    let checkout = details::open_gate(ctx, &staging)?;
    if !global.quiet && global.output == crate::cli::OutputFormat::Table {
        details::render_checkout(ctx, &checkout, global);
    }

    let no_wait = args.no_wait;
    let contact = contact_details(args, global)?;
    let client = ctx.booking_client()?;
    let submission = Submission::new(client, ctx.booking.clone());

    let pb = spinner(global, "Submitting quotation request…");
    let result = submission.submit(&staging, &contact, Utc::now()).await;
    pb.finish_and_clear();
    let confirmation = result.map_err(|e| ctx.submit_error(e))?;

    output::success(global, "Request received");
    if !no_wait && util::interactive(global) && !confirmation.display_delay.is_zero() {
        let pb = spinner(global, "Redirecting to your confirmation…");
        tokio::time::sleep(confirmation.display_delay).await;
        pb.finish_and_clear();
    }

    let out = output::render_single(
        global.output,
        &confirmation,
        confirmation_detail,
        |c| c.reference.clone().unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use jetquote_core::{Redirect, TripKind};

    use super::*;

    #[test]
    fn detail_mentions_reference_and_email_outcome() {
        let c = Confirmation {
            reference: Some("JQ-2041".into()),
            trip: TripKind::RoundTrip,
            email_sent: false,
            redirect: Redirect::Confirmation,
            display_delay: Duration::from_secs(3),
        };
        let text = confirmation_detail(&c);
        assert!(text.starts_with("Round trip quotation request received"));
        assert!(text.contains("Reference: JQ-2041"));
        assert!(text.contains("could not send a confirmation email"));
    }

    #[test]
    fn blank_optional_fields_are_dropped() {
        assert_eq!(optional(Some("  ".into())), None);
        assert_eq!(optional(Some("Acme".into())), Some("Acme".into()));
    }
}
