// IP geolocation lookup, used to preselect the caller's country.

use tracing::debug;
use url::Url;

use crate::client::handle_response;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::GeoLocation;

/// Default lookup service. Returns the caller's location as JSON.
pub const DEFAULT_GEO_URL: &str = "https://ipapi.co/json/";

/// Client for a single absolute geolocation URL.
pub struct GeoClient {
    http: reqwest::Client,
    url: Url,
}

impl GeoClient {
    pub fn new(url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(url, http)
    }

    pub fn from_reqwest(url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            url: Url::parse(url)?,
        })
    }

    /// `GET {url}`
    pub async fn lookup(&self) -> Result<GeoLocation, Error> {
        debug!("GET {}", self.url);
        let resp = self.http.get(self.url.clone()).send().await?;
        handle_response(resp).await
    }
}
