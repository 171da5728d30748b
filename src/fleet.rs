//! Plan many couriers at once.
//!
//! Each courier snapshot is planned on its own, so snapshots are spread over
//! the rayon pool. Results come back in input order.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::PlannerResult;
use crate::order::DeliveryOrder;
use crate::planner::{RoutePlan, RoutePlanner};
use crate::traits::TravelTimeOracle;

/// A courier's position and open orders at planning time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourierSnapshot {
    pub courier_id: String,
    pub current_location: String,
    pub orders: Vec<DeliveryOrder>,
}

impl CourierSnapshot {
    pub fn new(
        courier_id: impl Into<String>,
        current_location: impl Into<String>,
        orders: Vec<DeliveryOrder>,
    ) -> Self {
        Self {
            courier_id: courier_id.into(),
            current_location: current_location.into(),
            orders,
        }
    }
}

#[derive(Debug)]
pub struct CourierPlan {
    pub courier_id: String,
    pub plan: PlannerResult<RoutePlan>,
}

pub fn plan_fleet<O>(
    planner: &RoutePlanner<O>,
    snapshots: &[CourierSnapshot],
    now: DateTime<Utc>,
) -> Vec<CourierPlan>
where
    O: TravelTimeOracle + Sync,
{
    snapshots
        .par_iter()
        .map(|snapshot| CourierPlan {
            courier_id: snapshot.courier_id.clone(),
            plan: planner.plan_route(&snapshot.orders, &snapshot.current_location, now),
        })
        .collect()
}
