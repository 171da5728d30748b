//! courier-planner core
//!
//! Greedy pickup/delivery route planning and order-acceptance feasibility for
//! food-delivery couriers.

pub mod config;
pub mod error;
pub mod feasibility;
pub mod fleet;
pub mod geometric;
pub mod location;
pub mod order;
pub mod osrm;
pub mod planner;
pub mod table;
pub mod traits;

pub use error::{PlannerError, PlannerResult};
pub use feasibility::{FeasibilityCheck, FeasibilityVerdict};
pub use order::{DeliveryOrder, OrderStatus};
pub use planner::{PlanStop, RoutePlan, RoutePlanner, StopKind};
pub use traits::{DeliveryJob, TravelTimeOracle};
