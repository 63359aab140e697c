//! Synchronous client for the **disease.sh** historical COVID-19 endpoint.
//!
//! One request per call: no retry and no pagination. The whole timeline comes
//! back in a single JSON document.
//!
//! ### Notes
//! - Timeline keys are `M/D/YY` strings; they are parsed and sorted on decode.
//! - Unknown countries come back as HTTP 404 with a `{"message": ...}` body,
//!   surfaced as [`Error::Api`].
//! - Network timeouts use a fixed default (30s total, 10s connect).
//!
//! Typical usage:
//! ```no_run
//! # use covid_trend::{Client, Query};
//! let client = Client::new()?;
//! let raw = client.fetch_historical(&Query::default())?;
//! # Ok::<(), covid_trend::Error>(())
//! ```
use crate::error::{Error, Result};
use crate::models::{HistoricalResponse, Query, RawSeries};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://disease.sh/v3/covid-19";

/// Anything that can hand back a historical series for a query.
pub trait HistoricalSource {
    fn fetch_historical(&self, query: &Query) -> Result<RawSeries>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

// Allow -, _, . unescaped in country names/codes
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

impl Client {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("covid-trend/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// URL for the historical endpoint, global (`all`) or per country.
    pub fn historical_url(&self, query: &Query) -> String {
        let scope = match query.country.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => {
                percent_encoding::utf8_percent_encode(c, SAFE).to_string()
            }
            _ => "all".to_string(),
        };
        format!(
            "{}/historical/{}?lastdays={}",
            self.base_url, scope, query.last_days
        )
    }
}

/// Decode a response body into a series, mapping failures onto the error taxonomy.
pub fn parse_historical(body: &str) -> Result<RawSeries> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| Error::Decode(format!("invalid json: {e}")))?;

    if let Ok(msg) = ApiMessage::deserialize(&value) {
        return Err(Error::Api(msg.message));
    }

    let response: HistoricalResponse = serde_json::from_value(value)
        .map_err(|e| Error::Decode(format!("unexpected response shape: {e}")))?;
    Ok(response.into())
}

impl HistoricalSource for Client {
    fn fetch_historical(&self, query: &Query) -> Result<RawSeries> {
        let url = self.historical_url(query);
        log::debug!("GET {url}");

        let response = self.http.get(&url).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            // Prefer the API's own message when it sends one.
            return match serde_json::from_str::<ApiMessage>(&body) {
                Ok(msg) => Err(Error::Api(msg.message)),
                Err(_) => Err(Error::Http(status)),
            };
        }

        let raw = parse_historical(&body)?;
        log::debug!("decoded {} days of history from {url}", raw.cases.len());
        Ok(raw)
    }
}

impl Client {
    /// Inherent shortcut so callers don't need the trait in scope.
    pub fn fetch_historical(&self, query: &Query) -> Result<RawSeries> {
        HistoricalSource::fetch_historical(self, query)
    }
}
