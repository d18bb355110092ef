//! # Fieldlab: Citizen-Science Catalog & Query Engine
//!
//! Fieldlab is the in-memory core of a citizen-science data platform. Five
//! flat JSON collections (clusters, protocols, experiments, sensors,
//! measurements) are loaded into a [`catalog::Catalog`] snapshot, and a
//! pure, order-preserving [`query`] engine answers the filter/search
//! requests the surrounding HTTP boundary maps its parameters onto.
//!
//! ## Design Principles
//!
//! - **Absent filter = identity**: a missing filter value returns the
//!   collection unchanged, never an empty result.
//! - **Degrade, don't die**: a missing or corrupt collection file loads as
//!   empty; empty input is valid everywhere.
//! - **Pure queries**: the engine never mutates its input and holds no
//!   shared state, so it is safe from any request-handling context.
//!
//! ## Example Usage
//!
//! ```rust
//! use fieldlab::catalog::{Catalog, ProtocolFilter};
//! use fieldlab::storage::JsonStore;
//!
//! let store = JsonStore::new("data");
//! let catalog = Catalog::from_source(&store);
//!
//! // `cluster=2` from the request query string becomes a membership filter.
//! let envelope = catalog.protocols_filtered(&ProtocolFilter {
//!     cluster: Some(2),
//!     difficulty: None,
//! });
//! println!("{} protocols in cluster 2", envelope.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod query;
pub mod storage;
pub mod synth;

pub use catalog::Catalog;
pub use error::{Error, Result};
