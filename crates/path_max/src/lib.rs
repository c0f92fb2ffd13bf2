//! Weighted graph container with tombstoned vertices, and three engines for
//! the heaviest edge on the path between two tree vertices:
//!
//! - v1 (`Graph::path_max_v1`): DFS per query, no preprocessing.
//! - v2 (`Graph::path_max_v2`): LCA + binary lifting after
//!   `Graph::compute_center_and_parent`.
//! - v3 (`Graph::path_max_v3`): table lookup after `Graph::preprocess_v3`
//!   has run Tarjan's offline LCA over a known batch.
//!
//! All three are kept side by side and must agree on every query.

mod graph;
mod lifting;
mod mst;
mod offline;
mod query;
mod rooted;
mod traversal;
mod union_find;

pub mod export;
pub mod generator;
pub mod harness;
pub mod loader;

pub use graph::{DEFAULT_WEIGHT, Edge, Graph, Vertex, WEIGHT_EPS, Weight};
pub use harness::{ComparisonReport, HarnessConfig, run_comparison};
pub use loader::{Instance, LoadError, load_instance, parse_instance};
