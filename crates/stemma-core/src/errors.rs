//! Unified error system for Stemma
//!
//! A single error type covers every public operation of the engine. Errors
//! are values with discriminated tags: callers branch on the variant (and on
//! [`PolicyReason`] for policy failures), never on rendered strings. No
//! operation reports partial success; a failed call leaves the graph
//! untouched.

use crate::validation::ValidationReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result alias used across the workspace
pub type Result<T> = std::result::Result<T, StemmaError>;

/// Which `TreeSettings` rule a rejected mutation broke.
///
/// `Display` renders the stable wire tokens the platform's clients branch
/// on (`monogamy`, `maxSpouses`, `sameSex`, `singleParent`, `maxParents`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyReason {
    /// Monogamy is on and the member already has a spouse
    Monogamy,
    /// Polygamy cap (`maxSpousesPerMember`) reached
    MaxSpouses,
    /// Same-sex unions disabled and both declared genders are equal
    SameSex,
    /// Single parents disabled and only one parent was supplied
    SingleParent,
    /// Parent count exceeds the multi-parent policy or its cap
    MaxParents,
}

impl fmt::Display for PolicyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyReason::Monogamy => write!(f, "monogamy"),
            PolicyReason::MaxSpouses => write!(f, "maxSpouses"),
            PolicyReason::SameSex => write!(f, "sameSex"),
            PolicyReason::SingleParent => write!(f, "singleParent"),
            PolicyReason::MaxParents => write!(f, "maxParents"),
        }
    }
}

/// Unified error type for all Stemma operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum StemmaError {
    /// An operation referenced an identifier not present in the store
    #[error("Not found: {message}")]
    NotFound {
        /// What was looked up and missed
        message: String,
    },

    /// A proposed edge breaks a `TreeSettings` rule
    #[error("Policy violation: {reason}")]
    PolicyViolation {
        /// The rule that rejected the edge
        reason: PolicyReason,
    },

    /// A deserialized payload failed the integrity sweep
    #[error("Integrity violation: {report}")]
    Integrity {
        /// Every finding, accumulated rather than short-circuited
        report: ValidationReport,
    },

    /// An internal structural check tripped (e.g. a proposed ancestry cycle)
    #[error("Invariant violated: {message}")]
    Invariant {
        /// What the check caught
        message: String,
    },
}

impl StemmaError {
    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a policy violation for the given rule
    pub fn policy(reason: PolicyReason) -> Self {
        Self::PolicyViolation { reason }
    }

    /// Create an integrity error carrying a full validation report
    pub fn integrity(report: ValidationReport) -> Self {
        Self::Integrity { report }
    }

    /// Create an invariant error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}
