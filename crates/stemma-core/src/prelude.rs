//! Stemma Core Prelude
//!
//! Re-exports of the most commonly used types. Import with:
//!
//! ```rust
//! use stemma_core::prelude::*;
//! ```

// === Error Types ===
pub use crate::errors::{PolicyReason, Result as StemmaResult, StemmaError};

// === Identifiers ===
pub use crate::identifiers::{MemberId, TreeId};

// === Domain Records ===
pub use crate::member::{Gender, Member, MemberInput, MemberUpdate};
pub use crate::tree::{Tree, TreeSettings};

// === Validation ===
pub use crate::validation::{EdgeKind, ValidationIssue, ValidationReport};
