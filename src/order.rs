//! Delivery orders and their lifecycle.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::traits::DeliveryJob;

/// Order lifecycle as tracked by the order-management side.
///
/// `Pending -> Preparing -> Accepted -> OutForDelivery -> Delivered`, with
/// `Cancelled` reachable from any state before delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Accepted,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Orders a courier is currently carrying or about to collect.
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Accepted | OrderStatus::OutForDelivery)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;

        match (self, next) {
            (Pending, Preparing)
            | (Preparing, Accepted)
            | (Accepted, OutForDelivery)
            | (OutForDelivery, Delivered) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    pub fn transition(self, next: OrderStatus) -> PlannerResult<OrderStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(PlannerError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Accepted => "accepted",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plain order value handed to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOrder {
    pub id: String,
    pub pickup_location: String,
    pub delivery_location: String,
    pub due_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl DeliveryOrder {
    pub fn new(
        id: impl Into<String>,
        pickup_location: impl Into<String>,
        delivery_location: impl Into<String>,
        due_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            pickup_location: pickup_location.into(),
            delivery_location: delivery_location.into(),
            due_at,
            status: OrderStatus::Accepted,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Move the order to `next`, rejecting transitions the lifecycle forbids.
    pub fn advance(&mut self, next: OrderStatus) -> PlannerResult<()> {
        self.status = self.status.transition(next)?;
        Ok(())
    }
}

impl DeliveryJob for DeliveryOrder {
    fn id(&self) -> &str {
        &self.id
    }

    fn pickup_location(&self) -> &str {
        &self.pickup_location
    }

    fn delivery_location(&self) -> &str {
        &self.delivery_location
    }

    fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    fn status(&self) -> OrderStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_lifecycle() {
        let mut status = OrderStatus::Pending;
        for next in [
            OrderStatus::Preparing,
            OrderStatus::Accepted,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            status = status.transition(next).unwrap();
        }
        assert_eq!(status, OrderStatus::Delivered);
    }

    #[test]
    fn test_cancel_from_any_pre_delivery_state() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Accepted,
            OrderStatus::OutForDelivery,
        ] {
            assert!(from.can_transition_to(OrderStatus::Cancelled), "{from} should cancel");
        }
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_skipping_states_is_rejected() {
        let err = OrderStatus::Pending
            .transition(OrderStatus::Delivered)
            .unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered
            }
        ));
        assert_eq!(err.to_string(), "invalid order status transition: pending -> delivered");
    }

    #[test]
    fn test_active_statuses() {
        assert!(OrderStatus::Accepted.is_active());
        assert!(OrderStatus::OutForDelivery.is_active());
        assert!(!OrderStatus::Pending.is_active());
        assert!(!OrderStatus::Delivered.is_active());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");
        let back: OrderStatus = serde_json::from_str("\"preparing\"").unwrap();
        assert_eq!(back, OrderStatus::Preparing);
    }

    #[test]
    fn test_advance_keeps_status_on_error() {
        let mut order = DeliveryOrder::new("1", "restaurant", "customer1", Utc::now())
            .with_status(OrderStatus::Delivered);
        assert!(order.advance(OrderStatus::OutForDelivery).is_err());
        assert_eq!(order.status, OrderStatus::Delivered);
    }
}
