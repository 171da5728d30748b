//! Can a courier take one more order?
//!
//! A deliberately rough check: every order costs a fixed time budget, and the
//! candidate is acceptable when the whole load fits before the candidate's
//! deadline. This is advisory only and does not replan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::OrderBudget;
use crate::order::OrderStatus;
use crate::traits::DeliveryJob;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeasibilityVerdict {
    pub can_deliver: bool,
    /// Whole minutes from now to the candidate's deadline. Negative when it
    /// has already passed.
    pub minutes_until_due: i64,
    pub estimated_minutes_needed: i64,
    pub active_order_count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityCheck {
    budget: OrderBudget,
}

impl FeasibilityCheck {
    pub fn new(budget: OrderBudget) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> &OrderBudget {
        &self.budget
    }

    /// Decide whether `candidate` fits on top of the courier's `active` orders.
    ///
    /// Orders in `active` that are not accepted or out for delivery are
    /// ignored. Ties are accepted.
    pub fn can_accept_order<C, J>(&self, candidate: &C, active: &[J], now: DateTime<Utc>) -> FeasibilityVerdict
    where
        C: DeliveryJob,
        J: DeliveryJob,
    {
        if candidate.status() != OrderStatus::Pending {
            warn!(
                order = candidate.id(),
                status = %candidate.status(),
                "feasibility requested for a candidate that is not pending"
            );
        }

        let active_order_count = active.iter().filter(|order| order.status().is_active()).count();
        let minutes_until_due = (candidate.due_at() - now).num_minutes();
        let estimated_minutes_needed =
            (active_order_count as i64 + 1).saturating_mul(i64::from(self.budget.per_order_minutes()));
        let can_deliver = minutes_until_due >= estimated_minutes_needed;

        debug!(
            order = candidate.id(),
            active_order_count, minutes_until_due, estimated_minutes_needed, can_deliver,
            "feasibility verdict"
        );

        FeasibilityVerdict {
            can_deliver,
            minutes_until_due,
            estimated_minutes_needed,
            active_order_count,
        }
    }
}
