//! Reference enrichment - attach trimmed projections of referenced entities

use serde::Serialize;

use crate::model::{Cluster, ClusterId};

/// A record plus an optional projection of the entity it references.
///
/// Built by copy, never by runtime property injection: the base record is
/// flattened into the serialized form and the projection rides alongside it
/// under the `reference` key. A dangling reference id serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enriched<T, P> {
    /// The base record, flattened into the output.
    #[serde(flatten)]
    pub record: T,
    /// Trimmed projection of the referenced entity, if it exists.
    pub reference: Option<P>,
}

/// Trimmed cluster projection for display: id, name and title only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterRef {
    /// Cluster id.
    pub id: ClusterId,
    /// Short name.
    pub name: String,
    /// Display title.
    pub title: String,
}

impl ClusterRef {
    /// Project a cluster down to its display fields.
    ///
    /// A plain fn, usable directly as the projection argument of
    /// [`enrich_with_reference`].
    #[must_use]
    pub fn from_cluster(cluster: &Cluster) -> Self {
        Self {
            id: cluster.id(),
            name: cluster.name().to_string(),
            title: cluster.title().to_string(),
        }
    }
}

/// Attach a projection of each record's referenced entity.
///
/// For every record, `key_of` names the reference id, which is looked up in
/// `table` by comparing against `reference_key`; a hit is projected through
/// `project`. A missing reference yields `reference: None` rather than an
/// error.
pub fn enrich_with_reference<T, R, K, P>(
    records: Vec<T>,
    table: &[R],
    key_of: impl Fn(&T) -> K,
    reference_key: impl Fn(&R) -> K,
    project: impl Fn(&R) -> P,
) -> Vec<Enriched<T, P>>
where
    K: PartialEq,
{
    records
        .into_iter()
        .map(|record| {
            let key = key_of(&record);
            let reference = table
                .iter()
                .find(|entry| reference_key(entry) == key)
                .map(&project);
            Enriched { record, reference }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, Protocol};

    fn clusters() -> Vec<Cluster> {
        vec![
            Cluster::new(1, "air", "Air Quality"),
            Cluster::new(2, "water", "Water Quality"),
        ]
    }

    #[test]
    fn test_enrich_attaches_projection() {
        let protocols = vec![Protocol::new("p1", "CO2 Diffusion", 1, Difficulty::Beginner)];
        let enriched = enrich_with_reference(
            protocols,
            &clusters(),
            |p| p.primary_cluster(),
            Cluster::id,
            ClusterRef::from_cluster,
        );

        assert_eq!(enriched.len(), 1);
        let reference = enriched[0].reference.as_ref().unwrap();
        assert_eq!(reference.id, 1);
        assert_eq!(reference.name, "air");
    }

    #[test]
    fn test_enrich_dangling_reference_is_none() {
        let protocols = vec![Protocol::new("p9", "Orphan", 99, Difficulty::Advanced)];
        let enriched = enrich_with_reference(
            protocols,
            &clusters(),
            |p| p.primary_cluster(),
            Cluster::id,
            ClusterRef::from_cluster,
        );

        assert!(enriched[0].reference.is_none());
    }

    #[test]
    fn test_enriched_serializes_flattened() {
        let protocols = vec![Protocol::new("p1", "CO2 Diffusion", 1, Difficulty::Beginner)];
        let enriched = enrich_with_reference(
            protocols,
            &clusters(),
            |p| p.primary_cluster(),
            Cluster::id,
            ClusterRef::from_cluster,
        );

        let json = serde_json::to_value(&enriched[0]).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["reference"]["title"], "Air Quality");
    }
}
