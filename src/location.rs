//! Location registry.
//!
//! Locations are reference data: built once at startup, then only read.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Restaurant (pickup point) or customer (drop-off point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationCategory {
    Restaurant,
    Customer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    /// Planar `(x, y)` or geographic `(lat, lng)`; the oracle decides.
    pub coords: (f64, f64),
    pub category: LocationCategory,
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coords: (f64, f64),
        category: LocationCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coords,
            category,
        }
    }
}

const DEMO_STREETS: [&str; 8] = [
    "Main St", "Oak Ave", "Maple Dr", "Pine Rd", "Cedar Ln", "Elm Blvd", "Birch Way", "Walnut Ct",
];
const DEMO_NUMBERS: [&str; 8] = ["123", "456", "789", "321", "654", "987", "135", "246"];

/// Immutable id -> location map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationRegistry {
    locations: BTreeMap<String, Location>,
}

impl LocationRegistry {
    /// Build a registry. Later duplicates of an id replace earlier ones.
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            locations: locations
                .into_iter()
                .map(|location| (location.id.clone(), location))
                .collect(),
        }
    }

    /// The demo map: one restaurant and eight customers in pixel space.
    pub fn demo() -> Self {
        use LocationCategory::{Customer, Restaurant};

        Self::new([
            Location::new("restaurant", "Restaurant HQ", (480.0, 420.0), Restaurant),
            Location::new("customer1", "Customer 1", (56.0, 285.0), Customer),
            Location::new("customer2", "Customer 2", (258.0, 203.0), Customer),
            Location::new("customer3", "Customer 3", (480.0, 211.0), Customer),
            Location::new("customer4", "Customer 4", (566.0, 77.0), Customer),
            Location::new("customer5", "Customer 5", (814.0, 203.0), Customer),
            Location::new("customer6", "Customer 6", (708.0, 433.0), Customer),
            Location::new("customer7", "Customer 7", (268.0, 423.0), Customer),
            Location::new("customer8", "Customer 8", (87.0, 519.0), Customer),
        ])
    }

    /// Parse a JSON array of locations.
    pub fn from_json_str(json: &str) -> PlannerResult<Self> {
        let locations: Vec<Location> = serde_json::from_str(json)?;
        Ok(Self::new(locations))
    }

    pub fn from_path(path: impl AsRef<Path>) -> PlannerResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| PlannerError::Config {
            key: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.locations.contains_key(id)
    }

    /// Locations ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.locations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn by_category(&self, category: LocationCategory) -> impl Iterator<Item = &Location> {
        self.iter().filter(move |location| location.category == category)
    }

    /// Deterministic placeholder street address for demo screens.
    pub fn demo_address(id: &str) -> String {
        let index = id.bytes().last().map(|b| b as usize).unwrap_or(0) % DEMO_STREETS.len();
        format!("{} {}, Xianlin District", DEMO_NUMBERS[index], DEMO_STREETS[index])
    }
}
