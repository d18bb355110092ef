//! Flat-file storage backend
//!
//! Each collection lives in one JSON array file under a data directory:
//!
//! ```text
//! data/
//! ├── clusters.json
//! ├── protocols.json
//! ├── experiments.json
//! ├── sensors.json
//! └── measurements.json
//! ```
//!
//! Loads degrade rather than propagate: a missing or corrupt file yields an
//! empty collection with a `tracing` warning, and every consumer of this
//! crate treats an empty collection as valid input. Callers that need the
//! underlying diagnostic can use [`JsonStore::try_load`].

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::model::{Cluster, Experiment, Measurement, Protocol, Sensor};
use crate::{Error, Result};

/// The five stored collection kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// Thematic protocol categories.
    Clusters,
    /// Experimental procedures.
    Protocols,
    /// Student-run experiments.
    Experiments,
    /// Measurement stations.
    Sensors,
    /// Sensor readings.
    Measurements,
}

impl CollectionKind {
    /// File name of the collection inside the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Clusters => "clusters.json",
            Self::Protocols => "protocols.json",
            Self::Experiments => "experiments.json",
            Self::Sensors => "sensors.json",
            Self::Measurements => "measurements.json",
        }
    }
}

/// A source of stored records, one collection per kind.
///
/// The trait is the seam between the catalog and the storage layout; the
/// contract is "return the records in stored order, or an empty vec if the
/// collection cannot be read".
pub trait RecordSource {
    /// Load every record of a collection, in stored order.
    fn load<T: DeserializeOwned>(&self, kind: CollectionKind) -> Vec<T>;
}

/// Flat-file JSON store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `root`. The directory is not required to
    /// exist; absent collections load as empty.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory this store reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a collection, returning the decode failure instead of degrading.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the file cannot be opened or parsed.
    pub fn try_load<T: DeserializeOwned>(&self, kind: CollectionKind) -> Result<Vec<T>> {
        let path = self.root.join(kind.file_name());
        let file = File::open(&path).map_err(|e| {
            Error::Storage(format!("failed to open {}: {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::Storage(format!("failed to parse {}: {e}", path.display()))
        })
    }
}

impl RecordSource for JsonStore {
    fn load<T: DeserializeOwned>(&self, kind: CollectionKind) -> Vec<T> {
        match self.try_load(kind) {
            Ok(records) => records,
            Err(e) => {
                warn!(kind = kind.file_name(), error = %e, "collection load degraded to empty");
                Vec::new()
            }
        }
    }
}

impl JsonStore {
    /// Load the cluster collection.
    #[must_use]
    pub fn clusters(&self) -> Vec<Cluster> {
        self.load(CollectionKind::Clusters)
    }

    /// Load the protocol collection.
    #[must_use]
    pub fn protocols(&self) -> Vec<Protocol> {
        self.load(CollectionKind::Protocols)
    }

    /// Load the experiment collection.
    #[must_use]
    pub fn experiments(&self) -> Vec<Experiment> {
        self.load(CollectionKind::Experiments)
    }

    /// Load the sensor collection.
    #[must_use]
    pub fn sensors(&self) -> Vec<Sensor> {
        self.load(CollectionKind::Sensors)
    }

    /// Load the measurement collection.
    #[must_use]
    pub fn measurements(&self) -> Vec<Measurement> {
        self.load(CollectionKind::Measurements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let store = JsonStore::new("/nonexistent/fieldlab-data");
        let clusters: Vec<Cluster> = store.load(CollectionKind::Clusters);
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_try_load_surfaces_missing_file() {
        let store = JsonStore::new("/nonexistent/fieldlab-data");
        let result: Result<Vec<Cluster>> = store.try_load(CollectionKind::Clusters);
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(CollectionKind::Clusters.file_name(), "clusters.json");
        assert_eq!(CollectionKind::Measurements.file_name(), "measurements.json");
    }
}
