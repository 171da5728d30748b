//! Prefetch a travel table from an OSRM `table` service.
//!
//! Called once at startup to turn a geographic location registry into a
//! static [`TravelTable`]. Planning itself never touches the network.

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::OracleConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::location::LocationRegistry;
use crate::table::TravelTable;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "bike".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> PlannerResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Request the duration matrix for every location in `registry`.
    ///
    /// Registry coordinates are read as `(lat, lng)`. Pairs OSRM cannot route
    /// are left out of the table and resolve to the fallback time.
    pub fn fetch_table(&self, registry: &LocationRegistry, oracle: OracleConfig) -> PlannerResult<TravelTable> {
        if registry.is_empty() {
            return Ok(TravelTable::new(oracle));
        }

        let ids: Vec<&str> = registry.ids().collect();
        let coords = registry
            .iter()
            .map(|location| format!("{:.6},{:.6}", location.coords.1, location.coords.0))
            .collect::<Vec<_>>()
            .join(";");

        let url = format!(
            "{}/table/v1/{}/{}?annotations=duration",
            self.config.base_url, self.config.profile, coords
        );

        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<OsrmTableResponse>()?;

        let table = table_from_response(&ids, body, oracle)?;
        info!(locations = ids.len(), "loaded travel table from OSRM");
        Ok(table)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    durations: Option<Vec<Vec<Option<f64>>>>,
}

fn table_from_response(
    ids: &[&str],
    body: OsrmTableResponse,
    oracle: OracleConfig,
) -> PlannerResult<TravelTable> {
    if body.code != "Ok" {
        return Err(PlannerError::OsrmResponse(format!("status code {}", body.code)));
    }

    let durations = body
        .durations
        .ok_or_else(|| PlannerError::OsrmResponse("missing durations".to_string()))?;
    if durations.len() != ids.len() || durations.iter().any(|row| row.len() != ids.len()) {
        return Err(PlannerError::OsrmResponse(format!(
            "expected a {n}x{n} duration matrix",
            n = ids.len()
        )));
    }

    let mut table = TravelTable::new(oracle);
    for (from, row) in ids.iter().zip(durations) {
        for (to, seconds) in ids.iter().zip(row) {
            match seconds {
                Some(seconds) => table.insert(*from, *to, (seconds / 60.0).ceil() as u32),
                None => warn!(from, to, "OSRM found no route"),
            }
        }
    }
    Ok(table)
}
