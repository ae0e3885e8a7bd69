//! # Stemma Graph - the family-graph engine
//!
//! **Purpose**: the headless genealogy engine behind the Stemma platform.
//! An in-memory graph of members, spouse edges, and parent-child edges,
//! together with the algorithms that enforce structural invariants under
//! mutation, compute kinship labels, find shortest paths, and validate the
//! whole graph.
//!
//! The engine is pure: no I/O, no clocks, no locks. The same code runs in a
//! browser (wasm) and on a server; every public operation is synchronous and
//! runs to completion, so the sequence of calls defines a total order over
//! the graph's states.
//!
//! # Components
//!
//! Dependency order, leaves first:
//!
//! 1. [`store`] - insertion-ordered ownership of the member records; lookup
//!    and removal primitives, no policy.
//! 2. [`graph`] - [`FamilyGraph`], the invariant engine. Every structural
//!    mutation goes through it; policy comes from the tree's
//!    [`TreeSettings`](stemma_core::TreeSettings).
//! 3. [`traversal`] - read-only breadth-first algorithms: ancestor and
//!    descendant distance maps, undirected shortest path, lowest common
//!    ancestor.
//! 4. [`kinship`] - the relationship labeler built on the traversals.
//!
//! Around the core, [`validator`] sweeps the store for integrity findings
//! and [`snapshot`] exchanges the graph as a `{tree, members[]}` payload.
//!
//! # Example
//!
//! ```rust
//! use stemma_core::{MemberInput, Tree};
//! use stemma_graph::FamilyGraph;
//!
//! let mut graph = FamilyGraph::new(Tree::new("Okonkwo"));
//! let parent = graph.add_member(MemberInput::named("Ngozi"));
//! let child = graph
//!     .add_child(&parent.id, MemberInput::named("Amara"), &[])
//!     .unwrap();
//! assert_eq!(graph.compute_relationship(&parent.id, &child.id), "Child");
//! ```

#![forbid(unsafe_code)]

/// The invariant engine and its public operation surface
pub mod graph;
/// Kinship labeling over traversal results
pub mod kinship;
/// Snapshot exchange with the outside world
pub mod snapshot;
/// Insertion-ordered member storage
pub mod store;
/// Read-only breadth-first graph algorithms
pub mod traversal;
/// Whole-graph integrity sweep
pub mod validator;

pub use graph::FamilyGraph;
pub use kinship::Kinship;
pub use snapshot::TreeSnapshot;
pub use store::MemberStore;
pub use traversal::CommonAncestor;
