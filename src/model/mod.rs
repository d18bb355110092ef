//! Domain records for the citizen-science platform
//!
//! Five collections back the platform, all loaded from flat JSON files:
//!
//! ```text
//! Cluster (1) ──< Protocol (N)   [primary + secondary membership]
//! Protocol    ──< Experiment (N) [optional, via tags]
//! Sensor (1)  ──< Measurement (N) [time-series]
//! ```
//!
//! Clusters, protocols and sensors are immutable reference data. Experiments
//! are the only records created at runtime, through [`ExperimentBuilder`]'s
//! validated construction.
//!
//! ## Usage
//!
//! ```rust
//! use fieldlab::model::{Experiment, ExperimentStatus};
//!
//! let experiment = Experiment::builder("Schoolyard CO2", "Ada Lovelace School")
//!     .student("R. Franklin")
//!     .tag("air-quality")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(experiment.status(), ExperimentStatus::Planned);
//! assert!(experiment.id().starts_with("exp-"));
//! ```

mod cluster;
mod experiment;
mod measurement;
mod protocol;
mod sensor;

pub use cluster::Cluster;
pub use experiment::{Experiment, ExperimentBuilder, ExperimentStatus};
pub use measurement::Measurement;
pub use protocol::{Difficulty, Protocol};
pub use sensor::Sensor;

/// Identifier type for clusters (integer ids in the stored data).
pub type ClusterId = u32;
