//! Weighted matching on general graphs.
//!
//! This module provides the optimization primitive behind repeat-avoiding
//! pairing systems:
//!
//! - [`max_weight_matching`]: Maximum-weight (optionally maximum-cardinality) matching
//! - [`Edge`]: Weighted undirected edge between vertex indices
//! - [`Matching`]: Partner of each vertex
//!
//! ## Usage
//!
//! Callers map players to vertex indices, build one edge per allowed pair and
//! read the pairs back from the [`Matching`]. The solver never invents edges:
//! vertices with no usable edge stay unmatched, so callers must check
//! [`Matching::is_perfect`] when every player needs an opponent.
//!
//! ```rust
//! use pairing_engine::matching::{max_weight_matching, Edge, MatchMode};
//!
//! let edges = [Edge::new(0, 1, 5), Edge::new(1, 2, 9), Edge::new(2, 3, 5)];
//! let m = max_weight_matching(4, &edges, MatchMode::MaxCardinality);
//! assert_eq!(m.pairs(), vec![(0, 1), (2, 3)]);
//! ```

pub mod blossom;

pub use blossom::{max_weight_matching, Edge, MatchMode, Matching};
