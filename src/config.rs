//! Planner configuration.
//!
//! Defaults match the demo deployment. Every value can be overridden from the
//! environment or deserialized from JSON.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PlannerError, PlannerResult};

/// Minimum realistic travel time between two distinct locations.
const DEFAULT_MIN_MINUTES: u32 = 5;

/// Travel time used when either location is unknown.
const DEFAULT_FALLBACK_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub min_minutes: u32,
    pub fallback_minutes: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            min_minutes: DEFAULT_MIN_MINUTES,
            fallback_minutes: DEFAULT_FALLBACK_MINUTES,
        }
    }
}

impl OracleConfig {
    /// Apply the floor to a raw travel time between two distinct locations.
    pub fn clamp(&self, minutes: u32) -> u32 {
        minutes.max(self.min_minutes)
    }
}

/// Fixed per-order time budget used by the feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderBudget {
    /// Collecting the order at the restaurant.
    pub pickup_minutes: u32,
    /// Riding from restaurant to customer.
    pub travel_minutes: u32,
    /// Handing the order over at the door.
    pub handoff_minutes: u32,
}

impl Default for OrderBudget {
    fn default() -> Self {
        Self {
            pickup_minutes: 5,
            travel_minutes: 20,
            handoff_minutes: 5,
        }
    }
}

impl OrderBudget {
    pub fn per_order_minutes(&self) -> u32 {
        self.pickup_minutes
            .saturating_add(self.travel_minutes)
            .saturating_add(self.handoff_minutes)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub oracle: OracleConfig,
    pub budget: OrderBudget,
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> PlannerResult<Self> {
        serde_json::from_str(json).map_err(|err| PlannerError::Config {
            key: "planner config".to_string(),
            reason: err.to_string(),
        })
    }

    /// Read overrides from `PLANNER_*` environment variables.
    pub fn from_env() -> PlannerResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`PlannerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> PlannerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            oracle: OracleConfig {
                min_minutes: try_load(&lookup, "PLANNER_MIN_MINUTES", defaults.oracle.min_minutes)?,
                fallback_minutes: try_load(
                    &lookup,
                    "PLANNER_FALLBACK_MINUTES",
                    defaults.oracle.fallback_minutes,
                )?,
            },
            budget: OrderBudget {
                pickup_minutes: try_load(
                    &lookup,
                    "PLANNER_PICKUP_MINUTES",
                    defaults.budget.pickup_minutes,
                )?,
                travel_minutes: try_load(
                    &lookup,
                    "PLANNER_TRAVEL_MINUTES",
                    defaults.budget.travel_minutes,
                )?,
                handoff_minutes: try_load(
                    &lookup,
                    "PLANNER_HANDOFF_MINUTES",
                    defaults.budget.handoff_minutes,
                )?,
            },
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> PlannerResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| {
            warn!("Invalid {key} value {raw:?}: {err}");
            PlannerError::Config {
                key: key.to_string(),
                reason: err.to_string(),
            }
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
