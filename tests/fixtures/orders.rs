//! Order builders and synthetic travel tables.

use chrono::{DateTime, Duration, TimeZone, Utc};

use courier_planner::config::OracleConfig;
use courier_planner::order::{DeliveryOrder, OrderStatus};
use courier_planner::planner::{RoutePlan, StopKind};
use courier_planner::table::TravelTable;

/// Planning clock shared by all tests.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn minutes(m: i64) -> Duration {
    Duration::minutes(m)
}

/// Builder for test orders: pickup at the demo restaurant, accepted, due in
/// an hour unless told otherwise.
#[derive(Clone, Debug)]
pub struct TestOrder {
    order: DeliveryOrder,
}

impl TestOrder {
    pub fn new(id: &str, delivery: &str) -> Self {
        Self {
            order: DeliveryOrder::new(id, "restaurant", delivery, t0() + minutes(60)),
        }
    }

    pub fn due_in(mut self, m: i64) -> Self {
        self.order.due_at = t0() + minutes(m);
        self
    }

    pub fn pickup_at(mut self, pickup: &str) -> Self {
        self.order.pickup_location = pickup.to_string();
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.order.status = status;
        self
    }

    pub fn build(self) -> DeliveryOrder {
        self.order
    }
}

/// Restaurant with two customers, 12 and 20 minutes out, 10 minutes apart.
pub fn two_customer_table() -> TravelTable {
    TravelTable::new(OracleConfig::default())
        .with_symmetric("restaurant", "customerA", 12)
        .with_symmetric("restaurant", "customerB", 20)
        .with_symmetric("customerA", "customerB", 10)
}

/// Ids of the orders handled at each stop, flattened with the stop kind.
pub fn stop_summary(plan: &RoutePlan) -> Vec<(StopKind, String, Vec<String>)> {
    plan.stops
        .iter()
        .map(|stop| (stop.kind, stop.location_id.clone(), stop.order_ids.clone()))
        .collect()
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
