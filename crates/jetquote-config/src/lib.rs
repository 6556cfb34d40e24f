//! Shared configuration for the jetquote tools.
//!
//! TOML profiles plus `JETQUOTE_*` environment overrides, and translation
//! into `jetquote_core::{BookingConfig, ClientConfig}`. The CLI layers its
//! `GlobalOpts` overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use jetquote_api::TlsMode;
use jetquote_api::geo::DEFAULT_GEO_URL;
use jetquote_core::config::{
    DEFAULT_BOOKING_LIMIT, DEFAULT_CONFIRMATION_DELAY, DEFAULT_INTENT_TTL, DEFAULT_MIN_QUERY_LEN,
    DEFAULT_SEARCH_LIMIT,
};
use jetquote_core::{BookingConfig, ClientConfig};

/// Environment variable prefix; nested keys are separated by `__`
/// (`JETQUOTE_BOOKING__INTENT_TTL_SECS=600`).
pub const ENV_PREFIX: &str = "JETQUOTE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Booking pipeline tunables.
    #[serde(default)]
    pub booking: BookingSettings,

    /// Named API profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            booking: BookingSettings::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// `[booking]`: expiry window, autocomplete cutoffs, datasets, state dir.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookingSettings {
    #[serde(default = "default_intent_ttl_secs")]
    pub intent_ttl_secs: u64,

    #[serde(default = "default_booking_limit")]
    pub booking_limit: usize,

    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    #[serde(default = "default_confirmation_delay_secs")]
    pub confirmation_delay_secs: u64,

    #[serde(default = "default_true")]
    pub send_confirmation: bool,

    /// Airport dataset for the booking autocomplete (bundled if unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airports: Option<PathBuf>,

    /// Airport dataset for the general search (falls back to `airports`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_airports: Option<PathBuf>,

    /// Where the staged intent lives between commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            intent_ttl_secs: default_intent_ttl_secs(),
            booking_limit: default_booking_limit(),
            search_limit: default_search_limit(),
            min_query_len: default_min_query_len(),
            confirmation_delay_secs: default_confirmation_delay_secs(),
            send_confirmation: true,
            airports: None,
            search_airports: None,
            state_dir: None,
        }
    }
}

fn default_intent_ttl_secs() -> u64 {
    DEFAULT_INTENT_TTL.as_secs()
}
fn default_booking_limit() -> usize {
    DEFAULT_BOOKING_LIMIT
}
fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}
fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}
fn default_confirmation_delay_secs() -> u64 {
    DEFAULT_CONFIRMATION_DELAY.as_secs()
}
fn default_true() -> bool {
    true
}

impl BookingSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("booking.intent_ttl_secs", self.intent_ttl_secs == 0),
            ("booking.booking_limit", self.booking_limit == 0),
            ("booking.search_limit", self.search_limit == 0),
            ("booking.min_query_len", self.min_query_len == 0),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, zero)| *zero) {
            return Err(ConfigError::Validation {
                field: (*field).into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    pub fn to_booking_config(&self) -> Result<BookingConfig, ConfigError> {
        self.validate()?;
        Ok(BookingConfig {
            intent_ttl: Duration::from_secs(self.intent_ttl_secs),
            booking_limit: self.booking_limit,
            search_limit: self.search_limit,
            min_query_len: self.min_query_len,
            confirmation_delay: Duration::from_secs(self.confirmation_delay_secs),
            send_confirmation: self.send_confirmation,
        })
    }

    /// Dataset for the general search.
    pub fn search_dataset(&self) -> Option<&Path> {
        self.search_airports
            .as_deref()
            .or(self.airports.as_deref())
    }
}

/// A named API profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Booking API base URL (e.g., "https://api.example.com/v1/").
    pub api_url: String,

    /// Geolocation lookup URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_url: Option<String>,

    /// Path to a custom CA certificate (staging environments).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "jetquote", "jetquote")
}

fn home_fallback(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.extend(parts);
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".config", "jetquote", "config.toml"]),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default directory for session state (the staged intent).
pub fn default_state_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(&[".local", "state", "jetquote"]),
        |dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.cache_dir())
                .to_path_buf()
        },
    )
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Defaults, then `path` (if present), then `JETQUOTE_*` variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or unreadable.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Runtime translation ─────────────────────────────────────────────

fn parse_http_url(field: &str, raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("expected an http(s) URL, got {raw}"),
        });
    }
    Ok(url)
}

/// Build a `ClientConfig` from a profile, without CLI overrides.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let api_url = parse_http_url("api_url", &profile.api_url)?;
    let geo_url = parse_http_url(
        "geo_url",
        profile.geo_url.as_deref().unwrap_or(DEFAULT_GEO_URL),
    )?;
    let tls = profile
        .ca_cert
        .clone()
        .map_or(TlsMode::System, TlsMode::CustomCa);

    Ok(ClientConfig {
        api_url,
        geo_url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    })
}
