//! Integrity findings reported by the graph validator
//!
//! The validator in `stemma-graph` sweeps the whole store once and
//! accumulates every finding instead of short-circuiting, because its use
//! case is diagnosis of a payload a user can fix. The finding types live
//! here so the unified error type can carry a full report.
//!
//! Findings are values with discriminated tags; the bracketed category
//! prefix (`[Integrity]`, `[Circular]`, `[Orphan]`) appears only in the
//! rendered message.

use crate::identifiers::MemberId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which of a member's three edge projections a finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// An entry in `spouseIds`
    Spouse,
    /// An entry in `parentIds`
    Parent,
    /// An entry in `childIds`
    Child,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Spouse => write!(f, "spouse"),
            EdgeKind::Parent => write!(f, "parent"),
            EdgeKind::Child => write!(f, "child"),
        }
    }
}

/// A single finding from the integrity sweep.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValidationIssue {
    /// An edge set names an identifier with no live member behind it.
    #[error("[Integrity] member {member} references unknown {kind} {missing}")]
    DanglingReference {
        /// Member whose edge set holds the stale identifier
        member: MemberId,
        /// The unresolved identifier
        missing: MemberId,
        /// Which edge set it was found in
        kind: EdgeKind,
    },

    /// A spouse edge recorded on one endpoint only.
    #[error("[Integrity] spouse edge between {member} and {spouse} is recorded on one endpoint only")]
    AsymmetricSpouse {
        /// Endpoint that records the edge
        member: MemberId,
        /// Endpoint that does not
        spouse: MemberId,
    },

    /// A parent-child edge missing its reverse entry.
    #[error("[Integrity] parent-child edge between {parent} and {child} is recorded on one endpoint only")]
    AsymmetricParentChild {
        /// The parent endpoint
        parent: MemberId,
        /// The child endpoint
        child: MemberId,
    },

    /// A member listing itself in one of its own edge sets.
    #[error("[Integrity] member {member} lists itself as {kind}")]
    SelfEdge {
        /// The offending member
        member: MemberId,
        /// Which edge set contains the self-reference
        kind: EdgeKind,
    },

    /// A member reachable from itself through parent edges.
    #[error("[Circular] member {member} appears among its own ancestors")]
    CircularAncestry {
        /// The member on the cycle
        member: MemberId,
    },

    /// A member with no recorded parents. Legitimate at tree roots.
    #[error("[Orphan] member {member} has no recorded parents")]
    Orphan {
        /// The parentless member
        member: MemberId,
    },
}

/// Accumulated outcome of a full integrity sweep.
///
/// Errors block `from_snapshot`; warnings never do. An empty report means
/// the graph satisfies every structural invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Findings that violate a structural invariant
    pub errors: Vec<ValidationIssue>,
    /// Advisory findings (orphan roots)
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when the sweep found no errors (warnings are permitted).
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record an error finding.
    pub fn error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    /// Record a warning finding.
    pub fn warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Rendered messages for every error, in discovery order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s)",
            self.errors.len(),
            self.warnings.len()
        )
    }
}
