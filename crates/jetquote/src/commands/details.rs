//! Details and cancel command handlers.

use chrono::Utc;

use jetquote_core::{AccessGate, Checkout, FileStore, GateState, Staging, UnauthorizedReason};

use crate::cli::GlobalOpts;
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

/// Run the access gate once against the staged intent.
///
/// On refusal the intent is already cleared; the caller gets the reason
/// as a redirect error.
pub fn open_gate(ctx: &Context, staging: &Staging<FileStore>) -> Result<Checkout, CliError> {
    let mut gate = AccessGate::new(ctx.booking.intent_ttl);
    gate.mount(staging, Utc::now());
    match gate.state() {
        GateState::Authorized(checkout) => Ok(checkout.as_ref().clone()),
        GateState::Unauthorized(reason) => Err(CliError::Redirected { reason: *reason }),
        GateState::Loading => Err(CliError::Redirected {
            reason: UnauthorizedReason::Missing,
        }),
    }
}

pub fn render_checkout(ctx: &Context, checkout: &Checkout, global: &GlobalOpts) {
    let now = Utc::now();
    let out = output::render_single(
        global.output,
        checkout,
        |c| util::trip_detail(&c.staged, &c.legs, ctx.booking.intent_ttl, now),
        |c| c.staged.token.to_string(),
    );
    output::print_output(&out, global.quiet);
}

// ── Handlers ────────────────────────────────────────────────────────

pub fn handle(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let staging = ctx.staging();
    let checkout = open_gate(ctx, &staging)?;
    render_checkout(ctx, &checkout, global);
    output::hint(global, "Submit it with `jetquote submit`.");
    Ok(())
}

pub fn cancel(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let staging = ctx.staging();
    if !staging.is_staged()? {
        output::success(global, "Nothing staged");
        return Ok(());
    }
    if !util::confirm("Discard the staged booking?", global)? {
        return Ok(());
    }
    staging.clear()?;
    output::success(global, "Staged booking discarded");
    Ok(())
}
