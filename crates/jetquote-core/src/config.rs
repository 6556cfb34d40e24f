// ── Runtime configuration ──
//
// These types describe how the pipeline behaves and where the booking
// API lives. They never touch disk; `jetquote-config` builds them from
// TOML and the environment and hands them in.

use std::time::Duration;

use jetquote_api::{TlsMode, TransportConfig};
use url::Url;

pub const DEFAULT_INTENT_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_BOOKING_LIMIT: usize = 10;
pub const DEFAULT_SEARCH_LIMIT: usize = 8;
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;
pub const DEFAULT_CONFIRMATION_DELAY: Duration = Duration::from_secs(3);

/// Tunables of the booking-intent pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfig {
    /// How long a staged intent stays consumable by the details step.
    pub intent_ttl: Duration,
    /// Result cap of the booking-form autocomplete.
    pub booking_limit: usize,
    /// Result cap of the general airport search.
    pub search_limit: usize,
    /// Queries shorter than this (in characters) return nothing.
    pub min_query_len: usize,
    /// Pause between the success message and the confirmation page.
    pub confirmation_delay: Duration,
    /// Fire the best-effort confirmation email after a submission.
    pub send_confirmation: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            intent_ttl: DEFAULT_INTENT_TTL,
            booking_limit: DEFAULT_BOOKING_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            confirmation_delay: DEFAULT_CONFIRMATION_DELAY,
            send_confirmation: true,
        }
    }
}

/// Where the booking and geolocation services live and how to reach them.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the booking API (e.g. `https://api.example.com/v1/`).
    pub api_url: Url,
    /// Absolute geolocation lookup URL.
    pub geo_url: Url,
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }
}
