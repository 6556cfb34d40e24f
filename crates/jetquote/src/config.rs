//! CLI-side configuration: resolves the active profile plus `GlobalOpts`
//! overrides into the runtime pieces the commands need.
//!
//! File and environment loading live in `jetquote-config`; this module
//! only layers the command-line flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use jetquote_api::BookingClient;
use jetquote_api::geo::{DEFAULT_GEO_URL, GeoClient};
use jetquote_config::{BookingSettings, Config, Defaults, Profile};
use jetquote_core::{
    AirportIndex, BookingConfig, ClientConfig, CoreError, FileStore, Staging, SubmitError,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use jetquote_config::{config_path, load_config, load_config_or_default, save_config};

// ── Profile resolution ───────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate a profile + global flags into a `ClientConfig`.
fn resolve_profile(
    profile: &Profile,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ClientConfig, CliError> {
    let mut profile = profile.clone();
    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }
    if global.timeout.is_some() {
        profile.timeout = global.timeout;
    }
    Ok(jetquote_config::profile_to_client_config(&profile, defaults)?)
}

// ── Runtime context ──────────────────────────────────────────────────

/// Everything a command may need, resolved once per invocation.
#[derive(Debug)]
pub struct Context {
    pub booking: BookingConfig,
    pub settings: BookingSettings,
    pub state_dir: PathBuf,
    /// `None` when neither a profile nor `--api-url` names the API.
    pub client: Option<ClientConfig>,
    pub geo_url: Url,
    pub timeout: Duration,
}

impl Context {
    pub fn resolve(global: &GlobalOpts) -> Result<Self, CliError> {
        let cfg = load_config()?;
        let booking = cfg.booking.to_booking_config()?;
        let state_dir = global
            .state_dir
            .clone()
            .or_else(|| cfg.booking.state_dir.clone())
            .unwrap_or_else(jetquote_config::default_state_dir);

        let profile_name = active_profile_name(global, &cfg);
        let client = match cfg.profiles.get(&profile_name) {
            Some(profile) => Some(resolve_profile(profile, &cfg.defaults, global)?),
            None if global.profile.is_some() => {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: cfg.profile_names().join(", "),
                });
            }
            None => global
                .api_url
                .as_ref()
                .map(|url| {
                    let adhoc = Profile {
                        api_url: url.clone(),
                        geo_url: None,
                        ca_cert: None,
                        timeout: None,
                    };
                    resolve_profile(&adhoc, &cfg.defaults, global)
                })
                .transpose()?,
        };

        let geo_url = match client {
            Some(ref c) => c.geo_url.clone(),
            None => Url::parse(DEFAULT_GEO_URL).map_err(|e| CliError::Validation {
                field: "geo_url".into(),
                reason: e.to_string(),
            })?,
        };
        let timeout = client.as_ref().map_or_else(
            || Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout)),
            |c| c.timeout,
        );

        tracing::debug!(
            profile = %profile_name,
            state_dir = %state_dir.display(),
            api = ?client.as_ref().map(|c| c.api_url.as_str()),
            "resolved context"
        );

        Ok(Self {
            booking,
            settings: cfg.booking,
            state_dir,
            client,
            geo_url,
            timeout,
        })
    }

    pub fn client_config(&self) -> Result<&ClientConfig, CliError> {
        self.client.as_ref().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })
    }

    pub fn booking_client(&self) -> Result<BookingClient, CliError> {
        let cfg = self.client_config()?;
        BookingClient::new(cfg.api_url.as_str(), &cfg.transport()).map_err(|e| self.api_error(e))
    }

    pub fn geo_client(&self) -> Result<GeoClient, CliError> {
        let transport = self.client.as_ref().map_or_else(
            || jetquote_api::TransportConfig::default().with_timeout(self.timeout),
            ClientConfig::transport,
        );
        GeoClient::new(self.geo_url.as_str(), &transport).map_err(|e| self.api_error(e))
    }

    pub fn staging(&self) -> Staging<FileStore> {
        Staging::new(FileStore::new(&self.state_dir))
    }

    /// Dataset behind the booking-form autocomplete.
    pub fn booking_index(&self) -> Result<AirportIndex, CliError> {
        self.load_index(self.settings.airports.as_deref())
    }

    /// Dataset behind the general airport search.
    pub fn search_index(&self) -> Result<AirportIndex, CliError> {
        self.load_index(self.settings.search_dataset())
    }

    fn load_index(&self, path: Option<&Path>) -> Result<AirportIndex, CliError> {
        let index = match path {
            Some(path) => AirportIndex::load(path)?,
            None => AirportIndex::bundled()?,
        };
        Ok(index.with_min_query_len(self.booking.min_query_len))
    }

    /// Map an API failure, filling in the timeout the request ran with.
    pub fn api_error(&self, err: jetquote_api::Error) -> CliError {
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CliError::Timeout {
                seconds: self.timeout.as_secs(),
            },
            other => other.into(),
        }
    }

    pub fn submit_error(&self, err: SubmitError) -> CliError {
        match err {
            SubmitError::Api { source, .. } if source.is_timeout() || source.is_connection() => {
                self.api_error(source)
            }
            other => other.into(),
        }
    }
}
