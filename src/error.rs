//! Error types for the planner crate.

use thiserror::Error;

use crate::order::OrderStatus;
use crate::planner::RoutePlan;

#[derive(Error, Debug)]
pub enum PlannerError {
    /// The planning loop found no next move while work was still queued.
    ///
    /// This is a bookkeeping defect, never a normal outcome. The partial plan
    /// built so far is carried along for inspection.
    #[error(
        "route planning stalled with {pending_pickups} pending pickups and {undelivered} undelivered orders"
    )]
    Stalled {
        partial: Box<RoutePlan>,
        pending_pickups: usize,
        undelivered: usize,
    },

    #[error("invalid order status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("malformed location registry: {0}")]
    Registry(#[from] serde_json::Error),

    #[error("malformed travel table: {0}")]
    Table(String),

    #[error("invalid configuration for {key}: {reason}")]
    Config { key: String, reason: String },

    #[error("OSRM request failed: {0}")]
    Osrm(#[from] reqwest::Error),

    #[error("unexpected OSRM response: {0}")]
    OsrmResponse(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
