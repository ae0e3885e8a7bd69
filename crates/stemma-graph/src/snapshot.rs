//! Snapshot exchange with the outside world
//!
//! The engine's single wire format is a `{tree, members[]}` payload:
//! identifiers as-is, edge arrays included verbatim, camelCase field names.
//! Servers persist it, browsers hydrate from it, and the validator is the
//! acceptance gate in between - [`FamilyGraph::from_snapshot`] refuses any
//! payload whose sweep reports errors, surfacing all of them at once.
//!
//! `snapshot` then `from_snapshot` is the identity on every accepted
//! payload; no identifiers are rewritten and no schema migration happens
//! here.

use crate::graph::FamilyGraph;
use crate::store::MemberStore;
use serde::{Deserialize, Serialize};
use stemma_core::{Member, Result, StemmaError, Tree};

/// The `{tree, members[]}` exchange payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Tree identity and policy settings
    pub tree: Tree,
    /// Every member with its edge sets, in store order
    pub members: Vec<Member>,
}

impl FamilyGraph {
    /// Project the live graph into a pure data payload.
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            tree: self.tree().clone(),
            members: self.store().snapshot(),
        }
    }

    /// Reconstruct a graph from a payload, gated by the validator.
    ///
    /// Fails with [`StemmaError::Integrity`] carrying the full report when
    /// the payload violates any structural invariant. Orphan warnings do
    /// not block.
    pub fn from_snapshot(snapshot: TreeSnapshot) -> Result<Self> {
        let mut store = MemberStore::new();
        for member in snapshot.members {
            store.insert(member);
        }
        let graph = FamilyGraph::from_parts(snapshot.tree, store);

        let report = graph.validate();
        if !report.is_ok() {
            return Err(StemmaError::integrity(report));
        }
        Ok(graph)
    }
}
