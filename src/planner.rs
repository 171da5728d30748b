//! Greedy courier route planner.
//!
//! Builds a single visiting sequence over all pickups and deliveries of a
//! courier's open orders. At every step the planner delivers something it is
//! already carrying if it can (late orders first, then the cheapest ride),
//! and otherwise rides to the nearest restaurant with orders waiting.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::OrderBudget;
use crate::error::{PlannerError, PlannerResult};
use crate::traits::{DeliveryJob, TravelTimeOracle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Start,
    Pickup,
    Deliver,
}

/// One step of a route plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStop {
    pub kind: StopKind,
    pub location_id: String,
    /// Empty for the start stop, every collected order for a pickup, exactly
    /// one order for a delivery.
    pub order_ids: Vec<String>,
    /// Minutes ridden from the previous stop.
    pub travel_minutes: u32,
    /// Minutes since the plan started.
    pub cumulative_minutes: u32,
    pub eta: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub stops: Vec<PlanStop>,
    pub total_minutes: u32,
    /// Sum of leg distances, when the oracle reports distances.
    pub total_distance: Option<f64>,
}

impl RoutePlan {
    pub fn empty() -> Self {
        Self {
            stops: Vec::new(),
            total_minutes: 0,
            total_distance: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Index of the stop of `kind` that handles `order_id`.
    pub fn position_of(&self, kind: StopKind, order_id: &str) -> Option<usize> {
        self.stops
            .iter()
            .position(|stop| stop.kind == kind && stop.order_ids.iter().any(|id| id == order_id))
    }

    /// Planned delivery time for `order_id`.
    pub fn delivery_eta(&self, order_id: &str) -> Option<DateTime<Utc>> {
        self.position_of(StopKind::Deliver, order_id)
            .map(|index| self.stops[index].eta)
    }
}

/// Cost of a candidate move. Lower is always better.
///
/// A move that arrives after the order's due time ranks before every on-time
/// move; among late moves the most overdue goes first, then the shorter ride.
/// Among on-time moves the shorter ride wins, then the tighter deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MoveCost {
    Late {
        overdue_secs: Reverse<i64>,
        travel_minutes: u32,
    },
    OnTime {
        travel_minutes: u32,
        slack_secs: i64,
    },
}

/// Score a move of `travel_minutes` arriving at `eta` for a job due at `due`.
///
/// Pickups carry no deadline of their own and pass `None`.
pub fn score(travel_minutes: u32, eta: DateTime<Utc>, due: Option<DateTime<Utc>>) -> MoveCost {
    match due {
        Some(due) if eta > due => MoveCost::Late {
            overdue_secs: Reverse((eta - due).num_seconds()),
            travel_minutes,
        },
        Some(due) => MoveCost::OnTime {
            travel_minutes,
            slack_secs: (due - eta).num_seconds(),
        },
        None => MoveCost::OnTime {
            travel_minutes,
            slack_secs: i64::MAX,
        },
    }
}

/// Single-order delivery estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub estimated_minutes: u32,
    pub estimated_delivery_at: DateTime<Utc>,
}

struct OrderPair<'a> {
    order_id: &'a str,
    pickup: &'a str,
    delivery: &'a str,
    due: DateTime<Utc>,
}

enum Move<'a> {
    Pickup { location: &'a str, travel: u32 },
    /// `slot` indexes the picked-up list.
    Deliver { slot: usize, travel: u32 },
}

#[derive(Debug, Clone)]
pub struct RoutePlanner<O> {
    oracle: O,
    budget: OrderBudget,
}

impl<O: TravelTimeOracle> RoutePlanner<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            budget: OrderBudget::default(),
        }
    }

    pub fn with_budget(mut self, budget: OrderBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Plan pickups and deliveries for `orders`, starting at `start` at `now`.
    ///
    /// Every order appears exactly once in a pickup stop and once in its own
    /// delivery stop, and its pickup always comes first. An empty order list
    /// gives an empty plan.
    pub fn plan_route<J: DeliveryJob>(
        &self,
        orders: &[J],
        start: &str,
        now: DateTime<Utc>,
    ) -> PlannerResult<RoutePlan> {
        if orders.is_empty() {
            return Ok(RoutePlan::empty());
        }

        let pairs: Vec<OrderPair<'_>> = orders
            .iter()
            .map(|order| OrderPair {
                order_id: order.id(),
                pickup: order.pickup_location(),
                delivery: order.delivery_location(),
                due: order.due_at(),
            })
            .collect();

        let mut pending_pickups: BTreeSet<&str> = pairs.iter().map(|pair| pair.pickup).collect();
        let mut picked_up: Vec<usize> = Vec::new();

        let mut current = start;
        let mut clock = now;
        let mut cumulative = 0u32;
        let mut distance = Some(0.0);

        let mut plan = RoutePlan::empty();
        plan.stops.push(PlanStop {
            kind: StopKind::Start,
            location_id: start.to_string(),
            order_ids: Vec::new(),
            travel_minutes: 0,
            cumulative_minutes: 0,
            eta: now,
        });

        while !pending_pickups.is_empty() || !picked_up.is_empty() {
            let next = self
                .next_delivery(&pairs, &picked_up, current, clock)
                .or_else(|| self.next_pickup(&pending_pickups, current));

            let Some(next) = next else {
                error!(
                    pending_pickups = pending_pickups.len(),
                    undelivered = picked_up.len(),
                    "route planning found no next move"
                );
                plan.total_minutes = cumulative;
                plan.total_distance = distance;
                return Err(PlannerError::Stalled {
                    partial: Box::new(plan),
                    pending_pickups: pending_pickups.len(),
                    undelivered: picked_up.len(),
                });
            };

            let (kind, location, travel, order_ids) = match next {
                Move::Pickup { location, travel } => {
                    pending_pickups.remove(location);

                    let mut collected = Vec::new();
                    for (index, pair) in pairs.iter().enumerate() {
                        if pair.pickup == location {
                            picked_up.push(index);
                            collected.push(pair.order_id.to_string());
                        }
                    }

                    (StopKind::Pickup, location, travel, collected)
                }
                Move::Deliver { slot, travel } => {
                    // Only this order leaves the list; others bound for the
                    // same address stay pending.
                    let pair = &pairs[picked_up.remove(slot)];
                    (StopKind::Deliver, pair.delivery, travel, vec![pair.order_id.to_string()])
                }
            };

            distance = distance.and_then(|total| {
                self.oracle
                    .distance(current, location)
                    .map(|leg| total + leg)
            });
            cumulative = cumulative.saturating_add(travel);
            clock = now + Duration::minutes(i64::from(cumulative));

            debug!(?kind, location, travel, cumulative, orders = ?order_ids, "planned stop");

            plan.stops.push(PlanStop {
                kind,
                location_id: location.to_string(),
                order_ids,
                travel_minutes: travel,
                cumulative_minutes: cumulative,
                eta: clock,
            });
            current = location;
        }

        plan.total_minutes = cumulative;
        plan.total_distance = distance;
        Ok(plan)
    }

    /// Estimate when a single order would arrive if ridden on its own.
    ///
    /// Rides to the pickup first unless already there, then to the customer,
    /// plus the handoff allowance.
    pub fn estimate_delivery<J: DeliveryJob>(
        &self,
        order: &J,
        current: &str,
        now: DateTime<Utc>,
    ) -> DeliveryEstimate {
        let to_pickup = self.oracle.travel_minutes(current, order.pickup_location());
        let to_customer = self
            .oracle
            .travel_minutes(order.pickup_location(), order.delivery_location());
        let estimated_minutes = to_pickup
            .saturating_add(to_customer)
            .saturating_add(self.budget.handoff_minutes);

        debug!(
            order = order.id(),
            to_pickup, to_customer, estimated_minutes, "estimated single delivery"
        );

        DeliveryEstimate {
            estimated_minutes,
            estimated_delivery_at: now + Duration::minutes(i64::from(estimated_minutes)),
        }
    }

    fn next_delivery<'a>(
        &self,
        pairs: &[OrderPair<'a>],
        picked_up: &[usize],
        current: &str,
        clock: DateTime<Utc>,
    ) -> Option<Move<'a>> {
        picked_up
            .iter()
            .enumerate()
            .map(|(slot, &index)| {
                let pair = &pairs[index];
                let travel = self.oracle.travel_minutes(current, pair.delivery);
                let eta = clock + Duration::minutes(i64::from(travel));
                (score(travel, eta, Some(pair.due)), slot, travel)
            })
            .min_by_key(|(cost, _, _)| *cost)
            .map(|(_, slot, travel)| Move::Deliver { slot, travel })
    }

    fn next_pickup<'a>(&self, pending: &BTreeSet<&'a str>, current: &str) -> Option<Move<'a>> {
        pending
            .iter()
            .map(|&location| (self.oracle.travel_minutes(current, location), location))
            .min_by_key(|(travel, _)| *travel)
            .map(|(travel, location)| Move::Pickup { location, travel })
    }
}
