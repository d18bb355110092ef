//! Synthetic measurement series for seeding demo data
//!
//! Generates a plausible sensor time series: a diurnal sine curve around a
//! base level, plus bounded uniform noise. The platform ships with fake
//! data so the browse and map views have something to show before real
//! sensors report.

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::Rng;

use crate::model::Measurement;

/// Shape of a synthetic series for one sensor.
#[derive(Debug, Clone)]
pub struct SeriesSpec {
    sensor_id: String,
    start: DateTime<Utc>,
    interval: Duration,
    count: usize,
    base: f64,
    amplitude: f64,
    noise: f64,
}

impl SeriesSpec {
    /// Create a spec producing `count` readings at 15-minute intervals,
    /// starting at `start`, around a base level of 0.
    #[must_use]
    pub fn new(sensor_id: impl Into<String>, start: DateTime<Utc>, count: usize) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            start,
            interval: Duration::minutes(15),
            count,
            base: 0.0,
            amplitude: 0.0,
            noise: 0.0,
        }
    }

    /// Set the sampling interval.
    #[must_use]
    pub const fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the base level the series oscillates around.
    #[must_use]
    pub const fn base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Set the amplitude of the diurnal swing.
    #[must_use]
    pub const fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Set the half-width of the uniform noise band.
    #[must_use]
    pub const fn noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    /// Generate the series, oldest reading first.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Measurement> {
        (0..self.count)
            .map(|i| {
                let at = self.start + self.interval * i32::try_from(i).unwrap_or(i32::MAX);
                let hour_fraction =
                    f64::from(at.hour() * 3600 + at.minute() * 60 + at.second()) / 86_400.0;
                let diurnal = self.amplitude * (hour_fraction * std::f64::consts::TAU).sin();
                let jitter = if self.noise > 0.0 {
                    rng.gen_range(-self.noise..=self.noise)
                } else {
                    0.0
                };
                Measurement::new(self.sensor_id.clone(), at, self.base + diurnal + jitter)
            })
            .collect()
    }
}
