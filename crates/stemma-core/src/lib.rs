//! # Stemma Core - Layer 1: Foundation
//!
//! **Purpose**: Single source of truth for the domain types of the Stemma
//! family-tree platform.
//!
//! This crate provides the identifier newtypes, the `Member` and `Tree`
//! domain records, the policy settings consulted by the graph engine, and
//! the unified error type. It contains only pure data: no I/O, no clocks,
//! and no graph algorithms.
//!
//! # Architecture Constraints
//!
//! **Layer 1 has ZERO dependencies on other Stemma crates** (foundation).
//! - YES Identifier newtypes: [`MemberId`], [`TreeId`]
//! - YES Domain records: [`Member`], [`Tree`], [`TreeSettings`]
//! - YES Error types: [`StemmaError`], [`PolicyReason`]
//! - YES Validation report data: [`ValidationReport`], [`ValidationIssue`]
//! - NO mutation policy (that lives in `stemma-graph`)
//! - NO traversal or kinship algorithms (also `stemma-graph`)
//!
//! Every type here serializes with `serde` using the camelCase wire names
//! the platform's server and browser clients exchange. The crate compiles
//! unchanged for native targets and `wasm32-unknown-unknown`.

#![forbid(unsafe_code)]

/// Unified error handling
pub mod errors;
/// Opaque identifier newtypes
pub mod identifiers;
/// Person records and their edge projections
pub mod member;
/// Convenient re-exports of the common surface
pub mod prelude;
/// Tree configuration and policy settings
pub mod tree;
/// Integrity findings accumulated by the graph validator
pub mod validation;

pub use errors::{PolicyReason, Result, StemmaError};
pub use identifiers::{MemberId, TreeId};
pub use member::{Gender, Member, MemberInput, MemberUpdate};
pub use tree::{Tree, TreeSettings};
pub use validation::{EdgeKind, ValidationIssue, ValidationReport};
