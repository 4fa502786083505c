//! HTTP request building and sending
//!
//! Two GET requests per run against the UDSC public API: the institution
//! list and the per-institution decision totals. All failures (network,
//! non-2xx status, malformed JSON) propagate as fatal errors; there is no
//! retry and no partial result.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::FilterConfig;
use crate::errors::Result;
use crate::models::{DecisionRecord, Institution};

/// Base URL of the UDSC public API.
pub const API_BASE: &str = "https://migracje.gov.pl/wp-json/udscmap/v1";

pub const USER_AGENT_STRING: &str = concat!("migstat/", env!("CARGO_PKG_VERSION"));

/// Fixed aggregation parameters for the decisions endpoint. These always
/// override same-named user filters.
const AGGREGATION_PARAMS: [(&str, &str); 4] = [
    ("groupBy", "institution,decisionMarker"),
    ("fields", "institution,decisionMarker,total"),
    ("orderBy", "total"),
    ("order", "desc"),
];

/// Client for the two UDSC API endpoints used per run.
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base)?;
        // Url::join replaces the last path segment unless the base ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder().user_agent(USER_AGENT_STRING).build()?;
        Ok(Self { client, base })
    }

    /// GET `url` and parse the response body as JSON.
    ///
    /// The upstream occasionally prepends extraneous diagnostic lines to the
    /// body, so only the last line is parsed as the JSON payload. This is a
    /// known upstream quirk, not a protocol guarantee.
    pub async fn fetch_json(&self, url: Url) -> Result<Value> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "response body received");

        let payload = body.lines().last().unwrap_or("");
        Ok(serde_json::from_str(payload)?)
    }

    /// Fetch the decision-issuing institutions: voivodeship offices,
    /// administrative courts and the ministry.
    pub async fn institutions(&self) -> Result<Vec<Institution>> {
        let mut url = self.base.join("institution/")?;
        url.query_pairs_mut()
            .append_pair("authorityCode", "WOJ,WSA,MIN");

        let value = self.fetch_json(url).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetch per-(institution, decision marker) totals for the configured
    /// filters, pre-aggregated server-side via `groupBy`.
    pub async fn decisions(&self, config: &FilterConfig) -> Result<Vec<DecisionRecord>> {
        let mut url = self.base.join("decisions/poland/")?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in config.query_params() {
                // Fixed aggregation keys win over user filters
                if AGGREGATION_PARAMS.iter().any(|(fixed, _)| *fixed == key) {
                    continue;
                }
                pairs.append_pair(&key, &value);
            }
            for (key, value) in AGGREGATION_PARAMS {
                pairs.append_pair(key, value);
            }
        }

        let value = self.fetch_json(url).await?;
        Ok(serde_json::from_value(value)?)
    }
}
