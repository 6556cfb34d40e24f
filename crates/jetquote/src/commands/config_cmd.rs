//! Config subcommand handlers.

use dialoguer::Input;

use jetquote_api::geo::DEFAULT_GEO_URL;
use jetquote_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util::{self, prompt_err};

fn prompt_with_default(label: &str, default: String) -> Result<String, CliError> {
    Input::new()
        .with_prompt(label)
        .default(default)
        .interact_text()
        .map_err(prompt_err)
}

fn profile_not_found(cfg: &Config, name: String) -> CliError {
    CliError::ProfileNotFound {
        name,
        available: cfg.profile_names().join(", "),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            if !util::interactive(global) {
                return Err(CliError::InputRequired {
                    field: "config init answers (edit the config file instead)".into(),
                });
            }
            let config_path = config::config_path();
            eprintln!("jetquote configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config_or_default();

            let profile_name = prompt_with_default("Profile name", "default".into())?;
            let existing = cfg.profiles.get(&profile_name).cloned();
            if existing.is_some()
                && !util::confirm(&format!("Overwrite profile '{profile_name}'?"), global)?
            {
                return Ok(());
            }

            let api_url = prompt_with_default(
                "Booking API URL",
                existing
                    .as_ref()
                    .map_or_else(|| "https://api.example.com/v1/".into(), |p| p.api_url.clone()),
            )?;
            let geo_url = prompt_with_default(
                "Geolocation URL",
                existing
                    .as_ref()
                    .and_then(|p| p.geo_url.clone())
                    .unwrap_or_else(|| DEFAULT_GEO_URL.into()),
            )?;
            let timeout: u64 = Input::new()
                .with_prompt("Request timeout (seconds)")
                .default(cfg.defaults.timeout)
                .interact_text()
                .map_err(prompt_err)?;

            let profile = Profile {
                api_url,
                geo_url: (geo_url != DEFAULT_GEO_URL).then_some(geo_url),
                ca_cert: existing.and_then(|p| p.ca_cert),
                timeout: (timeout != cfg.defaults.timeout).then_some(timeout),
            };
            // Reject bad URLs before anything is written.
            jetquote_config::profile_to_client_config(&profile, &cfg.defaults)?;

            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            output::success(
                global,
                &format!("Configuration written to {}", config_path.display()),
            );
            output::hint(global, &format!("Active profile: {profile_name}"));
            output::hint(global, "Try it: jetquote airports search nice");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(
                global.output,
                &cfg,
                |c| {
                    toml::to_string_pretty(c)
                        .unwrap_or_else(|e| format!("# could not render config: {e}"))
                },
                |c| c.default_profile.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        // ── Set default ─────────────────────────────────────────────
        ConfigCommand::SetDefault { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(profile_not_found(&cfg, name));
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::success(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }
    }
}
