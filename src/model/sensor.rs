//! Sensor - a fixed measurement station with a map location

use serde::{Deserialize, Serialize};

/// A measurement station placed by a participating school.
///
/// Latitude and longitude drive the map view; `quantity` and `unit` label
/// the time series the sensor produces. Immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sensor {
    id: String,
    name: String,
    quantity: String,
    unit: String,
    latitude: f64,
    longitude: f64,
}

impl Sensor {
    /// Create a new sensor record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
            latitude,
            longitude,
        }
    }

    /// Get the sensor id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the measured quantity (e.g. "CO2 concentration").
    #[must_use]
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// Get the measurement unit (e.g. "ppm").
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Get the latitude of the station.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude of the station.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}
