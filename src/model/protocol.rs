//! Protocol - documented experimental procedure

use serde::{Deserialize, Serialize};

use super::ClusterId;
use crate::query::{ClusterScoped, TextSearchable};

/// Difficulty rating of a protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Suitable for first-time participants.
    Beginner,
    /// Requires some prior field work.
    Intermediate,
    /// Requires calibrated instruments or trained supervision.
    Advanced,
}

/// A documented experimental procedure.
///
/// Every protocol belongs to exactly one primary cluster and zero or more
/// secondary clusters. Protocols are immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Protocol {
    id: String,
    name: String,
    primary_cluster: ClusterId,
    #[serde(default)]
    secondary_clusters: Vec<ClusterId>,
    difficulty: Difficulty,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

impl Protocol {
    /// Create a new protocol record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        primary_cluster: ClusterId,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primary_cluster,
            secondary_clusters: Vec::new(),
            difficulty,
            keywords: Vec::new(),
            description: None,
        }
    }

    /// Get the protocol id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the protocol name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the primary cluster id.
    #[must_use]
    pub const fn primary_cluster(&self) -> ClusterId {
        self.primary_cluster
    }

    /// Get the secondary cluster ids.
    #[must_use]
    pub fn secondary_clusters(&self) -> &[ClusterId] {
        &self.secondary_clusters
    }

    /// Get the difficulty rating.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Get the keyword list.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Get the descriptive text, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Add a secondary cluster id.
    #[must_use]
    pub fn with_secondary_cluster(mut self, cluster_id: ClusterId) -> Self {
        self.secondary_clusters.push(cluster_id);
        self
    }

    /// Add a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Set the descriptive text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ClusterScoped for Protocol {
    fn primary_cluster(&self) -> ClusterId {
        self.primary_cluster
    }

    fn secondary_clusters(&self) -> &[ClusterId] {
        &self.secondary_clusters
    }
}

impl TextSearchable for Protocol {
    fn text_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), self.description.as_deref()]
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
