//! Travel times derived from location coordinates.
//!
//! Straight-line distance converted to minutes at a fixed rate. Ignores the
//! road network, but is symmetric and always available for any registered
//! location pair.

use tracing::debug;

use crate::config::OracleConfig;
use crate::location::LocationRegistry;
use crate::traits::TravelTimeOracle;

/// Map units a courier covers per minute on the demo pixel map.
const DEFAULT_UNITS_PER_MINUTE: f64 = 20.0;

/// Average riding speed assumption for geographic coordinates.
const DEFAULT_SPEED_KMH: f64 = 25.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// How coordinates are interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    /// `(x, y)` map coordinates, Euclidean distance in map units.
    Planar { units_per_minute: f64 },
    /// `(lat, lng)` degrees, great-circle distance in kilometers.
    Haversine { speed_kmh: f64 },
}

impl Metric {
    pub fn planar() -> Self {
        Metric::Planar {
            units_per_minute: DEFAULT_UNITS_PER_MINUTE,
        }
    }

    pub fn haversine() -> Self {
        Metric::Haversine {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }

    fn distance(&self, from: (f64, f64), to: (f64, f64)) -> f64 {
        match self {
            Metric::Planar { .. } => euclidean(from, to),
            Metric::Haversine { .. } => haversine_km(from, to),
        }
    }

    fn minutes_for(&self, distance: f64) -> f64 {
        match self {
            Metric::Planar { units_per_minute } => distance / units_per_minute,
            Metric::Haversine { speed_kmh } => distance / speed_kmh * 60.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeometricOracle {
    registry: LocationRegistry,
    metric: Metric,
    config: OracleConfig,
}

impl GeometricOracle {
    pub fn new(registry: LocationRegistry, metric: Metric, config: OracleConfig) -> Self {
        Self {
            registry,
            metric,
            config,
        }
    }

    /// Demo pixel map with default rate, floor and fallback.
    pub fn demo() -> Self {
        Self::new(LocationRegistry::demo(), Metric::planar(), OracleConfig::default())
    }

    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    fn coords_of(&self, from: &str, to: &str) -> Option<((f64, f64), (f64, f64))> {
        Some((self.registry.get(from)?.coords, self.registry.get(to)?.coords))
    }
}

impl TravelTimeOracle for GeometricOracle {
    fn travel_minutes(&self, from: &str, to: &str) -> u32 {
        if from == to {
            return 0;
        }

        match self.coords_of(from, to) {
            Some((a, b)) => {
                let minutes = self.metric.minutes_for(self.metric.distance(a, b)).ceil() as u32;
                self.config.clamp(minutes)
            }
            None => {
                debug!(from, to, fallback = self.config.fallback_minutes, "unknown location, using fallback");
                self.config.fallback_minutes
            }
        }
    }

    fn distance(&self, from: &str, to: &str) -> Option<f64> {
        if from == to {
            return Some(0.0);
        }
        self.coords_of(from, to)
            .map(|(a, b)| self.metric.distance(a, b))
    }
}

fn euclidean(from: (f64, f64), to: (f64, f64)) -> f64 {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    (dx * dx + dy * dy).sqrt()
}

/// Calculate haversine distance between two points in kilometers.
fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_lng / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().asin()
}
