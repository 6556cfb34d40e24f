//! Interest command handler: a lightweight lead for the staged trip.

use chrono::Utc;

use jetquote_core::Submission;

use crate::cli::{GlobalOpts, InterestArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

pub async fn handle(ctx: &Context, args: InterestArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let staging = ctx.staging();
    let submission = Submission::new(ctx.booking_client()?, ctx.booking.clone());
    let reference = submission
        .register_interest(&staging, &args.email, Utc::now())
        .await
        .map_err(|e| ctx.submit_error(e))?;

    match reference {
        Some(ref r) => output::success(global, &format!("Interest registered (reference {r})")),
        None => output::success(global, "Interest registered"),
    }
    output::hint(global, "The trip is still staged; `jetquote submit` requests a full quote.");
    if let Some(r) = reference {
        output::print_output(&r, global.quiet);
    }
    Ok(())
}
