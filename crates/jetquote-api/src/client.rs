// Booking API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, JSON bodies, and error
// body extraction. Endpoint groups (booking, account) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Longest slice of a raw error body kept in a message.
const BODY_PREVIEW: usize = 200;

// ── Error response shape ─────────────────────────────────────────────

/// The API reports failures under one of `message`, `error`, or `detail`.
/// `error` is sometimes a nested `{ "message": ... }` object.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    detail: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        let from_error = self.error.and_then(|v| match v {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(map) => map
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(String::from),
            _ => None,
        });
        self.message
            .or(from_error)
            .or(self.detail)
            .filter(|m| !m.trim().is_empty())
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the charter booking API.
///
/// All endpoints are JSON-over-HTTPS relative to a single base URL,
/// e.g. `https://api.example.com/v1/`.
pub struct BookingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BookingClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins append
    /// instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Decode a success body into `T`, or turn a failure into `Error::Api`.
///
/// An empty success body (e.g. `204 No Content`) decodes as `{}`, so
/// response types made of optional fields accept it.
pub(crate) async fn handle_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }

    let body = resp.text().await?;
    let text = if body.trim().is_empty() { "{}" } else { &body };
    serde_json::from_str(text).map_err(|e| {
        let preview: String = body.chars().take(BODY_PREVIEW).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.clone(),
        }
    })
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    let raw = resp.text().await.unwrap_or_default();

    let message = match serde_json::from_str::<ErrorResponse>(&raw) {
        Ok(err) => err.into_message(),
        Err(_) => {
            let trimmed = raw.trim();
            // HTML error pages from proxies carry nothing a user should see.
            if trimmed.is_empty() || trimmed.starts_with('<') {
                None
            } else {
                Some(trimmed.chars().take(BODY_PREVIEW).collect())
            }
        }
    };

    debug!(status = status.as_u16(), ?message, "request failed");
    Error::Api {
        status: status.as_u16(),
        message,
    }
}
