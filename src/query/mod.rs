//! Collection query engine
//!
//! Pure, synchronous filtering over in-memory record collections. Every
//! operation consumes a `Vec` and returns a new one, preserving input order;
//! nothing here sorts, mutates shared state, or touches storage, so the
//! engine is safe to call from any number of request-handling contexts.
//!
//! An absent filter value is always a no-op (the full collection comes back
//! unchanged), never an empty result. The single error the engine raises is
//! [`Error::InvalidArgument`] for a missing mandatory search query, which
//! the HTTP boundary maps to a 400 response.
//!
//! ## Example
//!
//! ```rust
//! use fieldlab::model::{Difficulty, Protocol};
//! use fieldlab::query::{filter_by_membership, FilterChain};
//!
//! let protocols = vec![
//!     Protocol::new("p1", "CO2 Diffusion", 1, Difficulty::Beginner).with_secondary_cluster(2),
//!     Protocol::new("p2", "Rain Gauge", 2, Difficulty::Beginner),
//! ];
//!
//! // Cluster 2 matches p1 through its secondary list and p2 directly.
//! let hits = filter_by_membership(protocols, Some(2));
//! assert_eq!(hits.len(), 2);
//!
//! // An absent filter is identity.
//! let chain = FilterChain::new().eq(None::<Difficulty>, |p: &Protocol| p.difficulty());
//! assert_eq!(chain.apply(hits).len(), 2);
//! ```

mod enrich;

pub use enrich::{enrich_with_reference, ClusterRef, Enriched};

use serde::Serialize;

use crate::model::{ClusterId, Difficulty, ExperimentStatus};
use crate::{Error, Result};

/// Records that belong to one primary cluster and zero or more secondary
/// clusters.
pub trait ClusterScoped {
    /// Id of the primary cluster.
    fn primary_cluster(&self) -> ClusterId;

    /// Ids of the secondary clusters.
    fn secondary_clusters(&self) -> &[ClusterId];
}

/// Records that expose text fields and a keyword list for substring search.
///
/// A `None` text field is skipped for matching but keeps the record
/// eligible through its remaining fields; a record without keywords simply
/// contributes an empty list.
pub trait TextSearchable {
    /// The searchable text fields, in no particular order.
    fn text_fields(&self) -> Vec<Option<&str>>;

    /// The searchable keyword/tag list.
    fn keywords(&self) -> &[String] {
        &[]
    }
}

/// Keep records whose `field` projection equals `value`.
///
/// An absent `value` is a no-op: the input comes back unchanged. A value
/// matching zero records yields an empty vec, never an error.
pub fn filter_by_exact<T, V, F>(records: Vec<T>, value: Option<V>, field: F) -> Vec<T>
where
    V: PartialEq,
    F: Fn(&T) -> V,
{
    match value {
        None => records,
        Some(v) => records.into_iter().filter(|r| field(r) == v).collect(),
    }
}

/// Keep records whose primary cluster equals `cluster` or whose secondary
/// cluster list contains it.
///
/// An absent `cluster` is a no-op.
pub fn filter_by_membership<T>(records: Vec<T>, cluster: Option<ClusterId>) -> Vec<T>
where
    T: ClusterScoped,
{
    match cluster {
        None => records,
        Some(id) => records
            .into_iter()
            .filter(|r| r.primary_cluster() == id || r.secondary_clusters().contains(&id))
            .collect(),
    }
}

/// Keep records where any text field or any keyword contains `query`,
/// case-insensitively.
pub fn filter_by_substring<T>(records: Vec<T>, query: &str) -> Vec<T>
where
    T: TextSearchable,
{
    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|r| matches_substring(r, &needle))
        .collect()
}

fn matches_substring<T: TextSearchable>(record: &T, needle: &str) -> bool {
    record
        .text_fields()
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
        || record
            .keywords()
            .iter()
            .any(|keyword| keyword.to_lowercase().contains(needle))
}

/// Conjunctive composition of filter predicates, applied left to right.
///
/// Predicates added for absent filter values are skipped entirely, so the
/// chain stays a no-op until a filter is actually present. Conjunction
/// makes the result independent of predicate order.
pub struct FilterChain<'a, T> {
    predicates: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
}

impl<T> Default for FilterChain<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> FilterChain<'a, T> {
    /// Create an empty chain (identity over any collection).
    #[must_use]
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Number of active predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether the chain is the identity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Add an arbitrary predicate.
    #[must_use]
    pub fn push(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Add an exact-match predicate for `field`; absent `value` adds nothing.
    #[must_use]
    pub fn eq<V, F>(self, value: Option<V>, field: F) -> Self
    where
        V: PartialEq + 'a,
        F: Fn(&T) -> V + 'a,
    {
        match value {
            None => self,
            Some(v) => self.push(move |r| field(r) == v),
        }
    }

    /// Add a cluster-membership predicate; absent `cluster` adds nothing.
    #[must_use]
    pub fn member_of(self, cluster: Option<ClusterId>) -> Self
    where
        T: ClusterScoped,
    {
        match cluster {
            None => self,
            Some(id) => {
                self.push(move |r| r.primary_cluster() == id || r.secondary_clusters().contains(&id))
            }
        }
    }

    /// Apply every predicate, keeping records that satisfy all of them.
    #[must_use]
    pub fn apply(&self, records: Vec<T>) -> Vec<T> {
        records
            .into_iter()
            .filter(|r| self.predicates.iter().all(|p| p(r)))
            .collect()
    }
}

/// Substring search with a mandatory query, composed with extra filters.
///
/// An empty input collection yields an empty result without error.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `query` is empty or whitespace.
pub fn search<T>(records: Vec<T>, query: &str, extra: &FilterChain<'_, T>) -> Result<Vec<T>>
where
    T: TextSearchable,
{
    if query.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "search query must not be empty".into(),
        ));
    }
    Ok(extra.apply(filter_by_substring(records, query)))
}

/// Filter values a query actually applied, echoed back in the envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppliedFilters {
    /// Cluster-membership filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterId>,
    /// Difficulty exact filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Experiment status exact filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExperimentStatus>,
    /// School exact filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    /// Tag membership filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Substring search query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Result envelope: the filtered records plus the filter values that
/// produced them.
#[derive(Debug, Clone, Serialize)]
pub struct QueryEnvelope<T> {
    /// Filtered records, in input-collection order.
    pub records: Vec<T>,
    /// The filters that were applied.
    pub applied: AppliedFilters,
}

impl<T> QueryEnvelope<T> {
    /// Wrap filtered records with the filters that produced them.
    #[must_use]
    pub fn new(records: Vec<T>, applied: AppliedFilters) -> Self {
        Self { records, applied }
    }

    /// Number of records in the envelope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the envelope holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
