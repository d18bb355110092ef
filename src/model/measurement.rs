//! Measurement - a single sensor reading

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single reading produced by a sensor.
///
/// Measurements are stored append-only per sensor; series ordering is an
/// explicit catalog-level step, not a property of the stored data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    sensor_id: String,
    timestamp: DateTime<Utc>,
    value: f64,
}

impl Measurement {
    /// Create a new measurement.
    #[must_use]
    pub fn new(sensor_id: impl Into<String>, timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            timestamp,
            value,
        }
    }

    /// Get the id of the sensor that produced the reading.
    #[must_use]
    pub fn sensor_id(&self) -> &str {
        &self.sensor_id
    }

    /// Get the time the reading was taken.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Get the reading value, in the sensor's unit.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_new() {
        let measurement = Measurement::new("s-01", Utc::now(), 412.5);
        assert_eq!(measurement.sensor_id(), "s-01");
        assert!((measurement.value() - 412.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_measurement_serde_round_trip() {
        let measurement = Measurement::new("s-01", Utc::now(), 17.0);
        let json = serde_json::to_string(&measurement).expect("serialization failed");
        let back: Measurement = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(measurement, back);
    }
}
