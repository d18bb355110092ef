//! Cluster - thematic category grouping related protocols

use serde::{Deserialize, Serialize};

use super::ClusterId;
use crate::query::TextSearchable;

/// A thematic category grouping related experimental protocols
/// (e.g. "Air Quality").
///
/// Clusters are immutable reference data loaded at process start. The
/// `protocols` and `linked_clusters` lists are forward references into the
/// protocol and cluster collections; referential integrity is a property of
/// the stored data, not enforced at load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cluster {
    id: ClusterId,
    name: String,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    protocols: Vec<String>,
    #[serde(default)]
    linked_clusters: Vec<ClusterId>,
}

impl Cluster {
    /// Create a new cluster record.
    #[must_use]
    pub fn new(id: ClusterId, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            title: title.into(),
            description: None,
            protocols: Vec::new(),
            linked_clusters: Vec::new(),
        }
    }

    /// Get the cluster id.
    #[must_use]
    pub const fn id(&self) -> ClusterId {
        self.id
    }

    /// Get the short name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the descriptive text, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the ids of protocols belonging to this cluster.
    #[must_use]
    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }

    /// Get the ids of thematically linked clusters.
    #[must_use]
    pub fn linked_clusters(&self) -> &[ClusterId] {
        &self.linked_clusters
    }

    /// Set the descriptive text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Register a protocol id on this cluster.
    #[must_use]
    pub fn with_protocol(mut self, protocol_id: impl Into<String>) -> Self {
        self.protocols.push(protocol_id.into());
        self
    }

    /// Register a linked cluster id.
    #[must_use]
    pub fn with_linked_cluster(mut self, cluster_id: ClusterId) -> Self {
        self.linked_clusters.push(cluster_id);
        self
    }
}

impl TextSearchable for Cluster {
    fn text_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            Some(self.title.as_str()),
            self.description.as_deref(),
        ]
    }
}
