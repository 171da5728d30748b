//! Core seams for the courier planner.
//!
//! The planner only needs two things from the surrounding system: a way to ask
//! how long it takes to get between two named locations, and a read-only view
//! of the orders it is routing. Apps can implement these for their own models.

use chrono::{DateTime, Utc};

use crate::order::OrderStatus;

/// Answers "how many minutes from `from` to `to`".
///
/// Implementations must be pure lookups: same id gives 0, distinct ids give at
/// least the configured floor, and unknown ids fall back to a fixed value
/// rather than failing.
pub trait TravelTimeOracle {
    fn travel_minutes(&self, from: &str, to: &str) -> u32;

    /// Distance between two locations, if the oracle tracks distances.
    fn distance(&self, _from: &str, _to: &str) -> Option<f64> {
        None
    }
}

impl<T: TravelTimeOracle + ?Sized> TravelTimeOracle for &T {
    fn travel_minutes(&self, from: &str, to: &str) -> u32 {
        (**self).travel_minutes(from, to)
    }

    fn distance(&self, from: &str, to: &str) -> Option<f64> {
        (**self).distance(from, to)
    }
}

/// A delivery job as seen by the planner.
pub trait DeliveryJob {
    fn id(&self) -> &str;

    /// Where the order is collected (always a restaurant in the demo data).
    fn pickup_location(&self) -> &str;

    /// Where the order is handed to the customer.
    fn delivery_location(&self) -> &str;

    /// Required delivery deadline.
    fn due_at(&self) -> DateTime<Utc>;

    fn status(&self) -> OrderStatus;
}
