//! Account command handlers.
//!
//! Results are shown and never persisted; there is no session to keep.

use secrecy::SecretString;

use jetquote_api::types::AuthResponse;
use jetquote_core::ValidationErrors;
use jetquote_core::model::{is_valid_email, validation};

use crate::cli::{AccountArgs, AccountCommand, GlobalOpts};
use crate::config::Context;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

fn email(value: Option<String>, global: &GlobalOpts) -> Result<String, CliError> {
    let email = util::value_or_prompt(value, "Email", global)?.trim().to_owned();
    if is_valid_email(&email) {
        Ok(email)
    } else {
        Err(CliError::InvalidDetails {
            errors: ValidationErrors::single(validation::INVALID_EMAIL),
        })
    }
}

fn password(value: Option<String>, global: &GlobalOpts) -> Result<SecretString, CliError> {
    let raw = match value {
        Some(v) => v,
        None if util::interactive(global) => {
            rpassword::prompt_password("Password: ").map_err(util::prompt_err)?
        }
        None => {
            return Err(CliError::InputRequired {
                field: "password (--password or JETQUOTE_PASSWORD)".into(),
            });
        }
    };
    if raw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(raw))
}

fn auth_detail(resp: &AuthResponse, fallback: &str) -> String {
    let mut lines = vec![resp.message.clone().unwrap_or_else(|| fallback.to_owned())];
    if resp.token.is_some() {
        lines.push("Session token received (not stored).".into());
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context, args: AccountArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let client = ctx.booking_client()?;
    match args.command {
        AccountCommand::Signup {
            name,
            email: address,
            password: secret,
        } => {
            let name = util::value_or_prompt(name, "Full name", global)?;
            if name.trim().is_empty() {
                return Err(CliError::Validation {
                    field: "name".into(),
                    reason: "name cannot be empty".into(),
                });
            }
            let address = email(address, global)?;
            let secret = password(secret, global)?;
            let resp = client
                .signup(name.trim(), &address, &secret)
                .await
                .map_err(|e| ctx.api_error(e))?;
            let out = output::render_single(
                global.output,
                &resp,
                |r| auth_detail(r, "Account created"),
                |r| r.message.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AccountCommand::Login {
            email: address,
            password: secret,
        } => {
            let address = email(address, global)?;
            let secret = password(secret, global)?;
            let resp = client
                .login(&address, &secret)
                .await
                .map_err(|e| ctx.api_error(e))?;
            let out = output::render_single(
                global.output,
                &resp,
                |r| auth_detail(r, "Logged in"),
                |r| r.token.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AccountCommand::ForgotPassword { email: address } => {
            let address = email(address, global)?;
            let resp = client
                .forgot_password(&address)
                .await
                .map_err(|e| ctx.api_error(e))?;
            output::success(
                global,
                &resp
                    .message
                    .unwrap_or_else(|| format!("If {address} has an account, a reset link is on its way")),
            );
            Ok(())
        }
    }
}
