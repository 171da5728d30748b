//! Static travel-time table.
//!
//! A hand-authored matrix of minutes between named locations. Entries may be
//! asymmetric (one-way streets) and need not obey the triangle inequality.

use std::collections::HashMap;

use tracing::debug;

use crate::config::OracleConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::traits::TravelTimeOracle;

const DEMO_IDS: [&str; 9] = [
    "restaurant", "customer1", "customer2", "customer3", "customer4", "customer5", "customer6",
    "customer7", "customer8",
];

/// Demo matrix, rows and columns in `DEMO_IDS` order.
const DEMO_MINUTES: [[u32; 9]; 9] = [
    [0, 20, 15, 12, 18, 25, 14, 10, 22],
    [20, 0, 16, 25, 30, 38, 32, 15, 12],
    [15, 16, 0, 14, 19, 27, 21, 11, 20],
    [12, 25, 14, 0, 10, 18, 15, 15, 28],
    [18, 30, 19, 10, 0, 15, 22, 24, 35],
    [25, 38, 27, 18, 15, 0, 13, 30, 40],
    [14, 32, 21, 15, 22, 13, 0, 18, 28],
    [10, 15, 11, 15, 24, 30, 18, 0, 14],
    [22, 12, 20, 28, 35, 40, 28, 14, 0],
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelTable {
    minutes: HashMap<String, HashMap<String, u32>>,
    config: OracleConfig,
}

impl TravelTable {
    pub fn new(config: OracleConfig) -> Self {
        Self {
            minutes: HashMap::new(),
            config,
        }
    }

    /// The nine-location demo table with default floor and fallback.
    pub fn demo() -> Self {
        Self::demo_with(OracleConfig::default())
    }

    pub fn demo_with(config: OracleConfig) -> Self {
        let mut table = Self::new(config);
        for (from, row) in DEMO_IDS.iter().zip(DEMO_MINUTES.iter()) {
            for (to, minutes) in DEMO_IDS.iter().zip(row.iter()) {
                table.insert(*from, *to, *minutes);
            }
        }
        table
    }

    /// Build from a square matrix indexed by `ids`.
    pub fn from_matrix(ids: &[String], matrix: &[Vec<u32>], config: OracleConfig) -> PlannerResult<Self> {
        if matrix.len() != ids.len() || matrix.iter().any(|row| row.len() != ids.len()) {
            return Err(PlannerError::Table(format!(
                "expected a {n}x{n} matrix",
                n = ids.len()
            )));
        }

        let mut table = Self::new(config);
        for (from, row) in ids.iter().zip(matrix) {
            for (to, minutes) in ids.iter().zip(row) {
                table.insert(from.clone(), to.clone(), *minutes);
            }
        }
        Ok(table)
    }

    /// Parse `{"from": {"to": minutes, ...}, ...}`.
    pub fn from_json_str(json: &str, config: OracleConfig) -> PlannerResult<Self> {
        let minutes: HashMap<String, HashMap<String, u32>> =
            serde_json::from_str(json).map_err(|err| PlannerError::Table(err.to_string()))?;
        Ok(Self { minutes, config })
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, minutes: u32) {
        self.minutes
            .entry(from.into())
            .or_default()
            .insert(to.into(), minutes);
    }

    pub fn with_entry(mut self, from: &str, to: &str, minutes: u32) -> Self {
        self.insert(from, to, minutes);
        self
    }

    /// Insert the same value in both directions.
    pub fn with_symmetric(self, a: &str, b: &str, minutes: u32) -> Self {
        self.with_entry(a, b, minutes).with_entry(b, a, minutes)
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Raw table value, without floor or fallback.
    pub fn raw(&self, from: &str, to: &str) -> Option<u32> {
        self.minutes.get(from).and_then(|row| row.get(to)).copied()
    }
}

impl TravelTimeOracle for TravelTable {
    fn travel_minutes(&self, from: &str, to: &str) -> u32 {
        if from == to {
            return 0;
        }

        match self.raw(from, to) {
            Some(minutes) => self.config.clamp(minutes),
            None => {
                debug!(from, to, fallback = self.config.fallback_minutes, "no table entry, using fallback");
                self.config.fallback_minutes
            }
        }
    }
}
