//! Newsletter command handler.

use jetquote_core::ValidationErrors;
use jetquote_core::model::{is_valid_email, validation};

use crate::cli::{GlobalOpts, NewsletterArgs};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

pub async fn handle(ctx: &Context, args: NewsletterArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let email = args.email.trim();
    if !is_valid_email(email) {
        return Err(CliError::InvalidDetails {
            errors: ValidationErrors::single(validation::INVALID_EMAIL),
        });
    }

    let client = ctx.booking_client()?;
    let resp = client
        .subscribe_newsletter(email)
        .await
        .map_err(|e| ctx.api_error(e))?;

    let message = resp
        .message
        .unwrap_or_else(|| format!("{email} subscribed to the newsletter"));
    output::success(global, &message);
    Ok(())
}
