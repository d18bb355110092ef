//! Catalog - in-memory snapshot of the platform collections
//!
//! The catalog holds the five collections in stored order and answers the
//! queries the HTTP boundary maps its request parameters onto: the
//! `cluster`, `difficulty` and `search`/`q` parameters become the
//! membership, exact and substring filters of [`crate::query`]. Collection
//! order is load order, and filtering preserves it; the only sort in this
//! module is the explicit newest-first ordering of a sensor's measurement
//! series.

use std::cmp::Reverse;

use serde::Deserialize;
use tracing::debug;

use crate::model::{
    Cluster, ClusterId, Difficulty, Experiment, ExperimentBuilder, ExperimentStatus, Measurement,
    Protocol, Sensor,
};
use crate::query::{
    self, enrich_with_reference, AppliedFilters, ClusterRef, Enriched, FilterChain, QueryEnvelope,
};
use crate::storage::{CollectionKind, RecordSource};
use crate::{Error, Result};

/// Optional filters for protocol listings.
///
/// Deserializes directly from the boundary's query parameters; an absent
/// parameter means "no filter".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProtocolFilter {
    /// Keep protocols whose primary or secondary cluster matches.
    pub cluster: Option<ClusterId>,
    /// Keep protocols with this exact difficulty.
    pub difficulty: Option<Difficulty>,
}

/// Optional filters for experiment listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExperimentFilter {
    /// Keep experiments with this exact status.
    pub status: Option<ExperimentStatus>,
    /// Keep experiments owned by this school.
    pub school: Option<String>,
    /// Keep experiments carrying this tag.
    pub tag: Option<String>,
}

/// In-memory snapshot of all platform collections.
///
/// Built once per request from a [`RecordSource`]; the catalog never
/// mutates reference data, and queries clone into fresh result vectors.
#[derive(Debug, Default)]
pub struct Catalog {
    clusters: Vec<Cluster>,
    protocols: Vec<Protocol>,
    experiments: Vec<Experiment>,
    sensors: Vec<Sensor>,
    measurements: Vec<Measurement>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog snapshot from a record source.
    ///
    /// Collections a source cannot provide come back empty, which every
    /// query here accepts as valid input.
    pub fn from_source<S: RecordSource>(source: &S) -> Self {
        let catalog = Self {
            clusters: source.load(CollectionKind::Clusters),
            protocols: source.load(CollectionKind::Protocols),
            experiments: source.load(CollectionKind::Experiments),
            sensors: source.load(CollectionKind::Sensors),
            measurements: source.load(CollectionKind::Measurements),
        };
        debug!(
            clusters = catalog.clusters.len(),
            protocols = catalog.protocols.len(),
            experiments = catalog.experiments.len(),
            sensors = catalog.sensors.len(),
            measurements = catalog.measurements.len(),
            "catalog snapshot loaded"
        );
        catalog
    }

    /// Whether every collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
            && self.protocols.is_empty()
            && self.experiments.is_empty()
            && self.sensors.is_empty()
            && self.measurements.is_empty()
    }

    // --- seeding -----------------------------------------------------------

    /// Add a cluster to the snapshot.
    pub fn add_cluster(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }

    /// Add a protocol to the snapshot.
    pub fn add_protocol(&mut self, protocol: Protocol) {
        self.protocols.push(protocol);
    }

    /// Add a sensor to the snapshot.
    pub fn add_sensor(&mut self, sensor: Sensor) {
        self.sensors.push(sensor);
    }

    /// Add a measurement to the snapshot.
    pub fn add_measurement(&mut self, measurement: Measurement) {
        self.measurements.push(measurement);
    }

    /// Build and register a new experiment, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the builder rejects the draft.
    pub fn create_experiment(&mut self, draft: ExperimentBuilder) -> Result<Experiment> {
        let experiment = draft.build()?;
        self.experiments.push(experiment.clone());
        Ok(experiment)
    }

    // --- lookups -----------------------------------------------------------

    /// All clusters, in stored order.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Look up a cluster by id.
    #[must_use]
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.id() == id)
    }

    /// All protocols, in stored order.
    #[must_use]
    pub fn protocols(&self) -> &[Protocol] {
        &self.protocols
    }

    /// Look up a protocol by id.
    #[must_use]
    pub fn protocol(&self, id: &str) -> Option<&Protocol> {
        self.protocols.iter().find(|p| p.id() == id)
    }

    /// All experiments, in stored order.
    #[must_use]
    pub fn experiments(&self) -> &[Experiment] {
        &self.experiments
    }

    /// Look up an experiment by id.
    #[must_use]
    pub fn experiment(&self, id: &str) -> Option<&Experiment> {
        self.experiments.iter().find(|e| e.id() == id)
    }

    /// All sensors, in stored order.
    #[must_use]
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Look up a sensor by id.
    #[must_use]
    pub fn sensor(&self, id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id() == id)
    }

    /// All measurements, in stored order.
    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    // --- queries -----------------------------------------------------------

    fn protocol_chain(filter: &ProtocolFilter) -> FilterChain<'static, Protocol> {
        FilterChain::new()
            .member_of(filter.cluster)
            .eq(filter.difficulty, |p: &Protocol| p.difficulty())
    }

    /// Protocols matching the given filters, with the applied values echoed
    /// in the envelope.
    #[must_use]
    pub fn protocols_filtered(&self, filter: &ProtocolFilter) -> QueryEnvelope<Protocol> {
        let records = Self::protocol_chain(filter).apply(self.protocols.clone());
        QueryEnvelope::new(
            records,
            AppliedFilters {
                cluster: filter.cluster,
                difficulty: filter.difficulty,
                ..AppliedFilters::default()
            },
        )
    }

    /// Substring search over protocols, composed with the given filters.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `query` is empty.
    pub fn search_protocols(
        &self,
        query: &str,
        filter: &ProtocolFilter,
    ) -> Result<QueryEnvelope<Protocol>> {
        let chain = Self::protocol_chain(filter);
        let records = query::search(self.protocols.clone(), query, &chain)?;
        Ok(QueryEnvelope::new(
            records,
            AppliedFilters {
                cluster: filter.cluster,
                difficulty: filter.difficulty,
                query: Some(query.to_string()),
                ..AppliedFilters::default()
            },
        ))
    }

    /// All protocols with a trimmed projection of their primary cluster.
    ///
    /// A protocol whose primary cluster id has no matching cluster carries a
    /// `None` projection.
    #[must_use]
    pub fn protocols_enriched(&self) -> Vec<Enriched<Protocol, ClusterRef>> {
        enrich_with_reference(
            self.protocols.clone(),
            &self.clusters,
            |p| p.primary_cluster(),
            Cluster::id,
            ClusterRef::from_cluster,
        )
    }

    /// Experiments matching the given filters.
    #[must_use]
    pub fn experiments_filtered(&self, filter: &ExperimentFilter) -> QueryEnvelope<Experiment> {
        let mut chain =
            FilterChain::new().eq(filter.status, |e: &Experiment| e.status());
        if let Some(school) = filter.school.clone() {
            chain = chain.push(move |e: &Experiment| e.school() == school);
        }
        if let Some(tag) = filter.tag.clone() {
            chain = chain.push(move |e: &Experiment| e.tags().contains(&tag));
        }

        let records = chain.apply(self.experiments.clone());
        QueryEnvelope::new(
            records,
            AppliedFilters {
                status: filter.status,
                school: filter.school.clone(),
                tag: filter.tag.clone(),
                ..AppliedFilters::default()
            },
        )
    }

    /// Substring search over experiment titles, descriptions and tags, with
    /// the query echoed in the envelope.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `query` is empty.
    pub fn search_experiments(&self, query: &str) -> Result<QueryEnvelope<Experiment>> {
        let records = query::search(self.experiments.clone(), query, &FilterChain::new())?;
        Ok(QueryEnvelope::new(
            records,
            AppliedFilters {
                query: Some(query.to_string()),
                ..AppliedFilters::default()
            },
        ))
    }

    /// A sensor's measurement series, newest first.
    ///
    /// Sorting is the explicit step on top of the order-preserving filter:
    /// series consumers always want the most recent reading first.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the sensor id is unknown.
    pub fn sensor_series(&self, sensor_id: &str) -> Result<Vec<Measurement>> {
        if self.sensor(sensor_id).is_none() {
            return Err(Error::not_found("sensor", sensor_id));
        }

        let mut series: Vec<Measurement> = self
            .measurements
            .iter()
            .filter(|m| m.sensor_id() == sensor_id)
            .cloned()
            .collect();
        series.sort_by_key(|m| Reverse(m.timestamp()));
        Ok(series)
    }

    /// The most recent reading of a sensor, if it has any.
    #[must_use]
    pub fn latest_measurement(&self, sensor_id: &str) -> Option<&Measurement> {
        self.measurements
            .iter()
            .filter(|m| m.sensor_id() == sensor_id)
            .max_by_key(|m| m.timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn seeded() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_cluster(Cluster::new(1, "air", "Air Quality"));
        catalog.add_cluster(Cluster::new(2, "water", "Water Quality"));
        catalog.add_protocol(
            Protocol::new("p1", "CO2 Diffusion", 1, Difficulty::Beginner)
                .with_secondary_cluster(2),
        );
        catalog.add_protocol(Protocol::new("p2", "Rain Gauge", 2, Difficulty::Intermediate));
        catalog.add_sensor(Sensor::new("s-01", "Roof CO2", "CO2", "ppm", 52.37, 4.89));
        catalog
    }

    #[test]
    fn test_empty_catalog_answers_queries() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.protocols_filtered(&ProtocolFilter::default()).is_empty());
        assert!(catalog.protocols_enriched().is_empty());
        assert!(catalog.cluster(1).is_none());
    }

    #[test]
    fn test_protocols_filtered_by_cluster_membership() {
        let catalog = seeded();
        let envelope = catalog.protocols_filtered(&ProtocolFilter {
            cluster: Some(2),
            difficulty: None,
        });
        let ids: Vec<&str> = envelope.records.iter().map(Protocol::id).collect();
        assert_eq!(ids, ["p1", "p2"]);
        assert_eq!(envelope.applied.cluster, Some(2));
    }

    #[test]
    fn test_protocols_filtered_conjunction() {
        let catalog = seeded();
        let envelope = catalog.protocols_filtered(&ProtocolFilter {
            cluster: Some(2),
            difficulty: Some(Difficulty::Intermediate),
        });
        assert_eq!(envelope.len(), 1);
        assert_eq!(envelope.records[0].id(), "p2");
    }

    #[test]
    fn test_search_protocols_requires_query() {
        let catalog = seeded();
        let err = catalog
            .search_protocols("", &ProtocolFilter::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_search_protocols_echoes_query() {
        let catalog = seeded();
        let envelope = catalog
            .search_protocols("co2", &ProtocolFilter::default())
            .unwrap();
        assert_eq!(envelope.len(), 1);
        assert_eq!(envelope.applied.query.as_deref(), Some("co2"));
    }

    #[test]
    fn test_create_experiment_and_filter() {
        let mut catalog = seeded();
        let id = catalog
            .create_experiment(
                Experiment::builder("Playground CO2", "Ada Lovelace School")
                    .student("R. Franklin")
                    .tag("air-quality"),
            )
            .unwrap()
            .id()
            .to_string();

        assert!(catalog.experiment(&id).is_some());

        let envelope = catalog.experiments_filtered(&ExperimentFilter {
            status: Some(ExperimentStatus::Planned),
            school: Some("Ada Lovelace School".into()),
            tag: Some("air-quality".into()),
        });
        assert_eq!(envelope.len(), 1);
    }

    #[test]
    fn test_sensor_series_newest_first() {
        let mut catalog = seeded();
        let base = Utc::now();
        catalog.add_measurement(Measurement::new("s-01", base, 400.0));
        catalog.add_measurement(Measurement::new("s-01", base + Duration::minutes(10), 410.0));
        catalog.add_measurement(Measurement::new("s-01", base + Duration::minutes(5), 405.0));
        catalog.add_measurement(Measurement::new("s-02", base, 7.0));

        let series = catalog.sensor_series("s-01").unwrap();
        assert_eq!(series.len(), 3);
        assert!((series[0].value() - 410.0).abs() < f64::EPSILON);
        assert!(series.windows(2).all(|w| w[0].timestamp() >= w[1].timestamp()));

        let latest = catalog.latest_measurement("s-01").unwrap();
        assert!((latest.value() - 410.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sensor_series_unknown_sensor() {
        let catalog = seeded();
        let err = catalog.sensor_series("s-99").unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "sensor", .. }));
    }

    #[test]
    fn test_enriched_protocols_dangling_cluster() {
        let mut catalog = seeded();
        catalog.add_protocol(Protocol::new("p9", "Orphan", 99, Difficulty::Advanced));

        let enriched = catalog.protocols_enriched();
        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].reference.as_ref().unwrap().name, "air");
        assert!(enriched[2].reference.is_none());
    }
}
