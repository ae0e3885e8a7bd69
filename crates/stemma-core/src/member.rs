//! Person records and their edge projections
//!
//! A [`Member`] carries descriptive attributes plus three identifier sets
//! (`spouse_ids`, `parent_ids`, `child_ids`). The sets are redundant
//! projections of the edge set: every edge is recorded on **both** of its
//! endpoints, which makes neighbor enumeration O(1) during traversal at the
//! cost of a coordination burden on the graph engine.
//!
//! # Invariants
//!
//! - Every identifier in an edge set resolves to a live member
//! - `b ∈ a.spouse_ids ⇔ a ∈ b.spouse_ids`
//! - `c ∈ p.child_ids ⇔ p ∈ c.parent_ids`
//! - No member appears in its own edge sets
//!
//! Only the graph engine in `stemma-graph` upholds these; this module is
//! plain data. Edge vectors preserve insertion order, which downstream
//! traversal relies on for deterministic tie-breaking.

use crate::identifiers::MemberId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared gender of a member.
///
/// Optional on every record; the same-sex union policy is enforceable only
/// when both endpoints declare one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Declared male
    Male,
    /// Declared female
    Female,
    /// Declared outside the binary
    Nonbinary,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
            Gender::Nonbinary => write!(f, "nonbinary"),
        }
    }
}

/// A person node in the family graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Stable opaque identifier, unique within the tree
    pub id: MemberId,
    /// Display name
    pub name: String,
    /// Contact address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Date of birth, kept as an opaque string (no temporal reasoning)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// Declared gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Deceased members remain full participants in the graph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deceased: Option<bool>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Spouse edges, recorded symmetrically on both endpoints
    #[serde(default)]
    pub spouse_ids: Vec<MemberId>,
    /// Parents of this member
    #[serde(default)]
    pub parent_ids: Vec<MemberId>,
    /// Children of this member
    #[serde(default)]
    pub child_ids: Vec<MemberId>,
}

impl Member {
    /// Materialize a member from creation input with a fresh identifier and
    /// empty edge sets.
    pub fn from_input(input: MemberInput) -> Self {
        Self {
            id: MemberId::generate(),
            name: input.name,
            email: input.email,
            dob: input.dob,
            gender: input.gender,
            deceased: input.deceased,
            notes: input.notes,
            spouse_ids: Vec::new(),
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
        }
    }

    /// True when `other` is recorded as a spouse of this member.
    pub fn is_spouse_of(&self, other: &MemberId) -> bool {
        self.spouse_ids.contains(other)
    }

    /// True when `other` is recorded as a parent of this member.
    pub fn has_parent(&self, other: &MemberId) -> bool {
        self.parent_ids.contains(other)
    }

    /// True when `other` is recorded as a child of this member.
    pub fn has_child(&self, other: &MemberId) -> bool {
        self.child_ids.contains(other)
    }

    /// Apply a partial attribute update.
    ///
    /// Structural state is untouchable through this path: the update record
    /// has no edge fields, so edge rewrites are unrepresentable rather than
    /// checked.
    pub fn apply_update(&mut self, update: MemberUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = Some(email);
        }
        if let Some(dob) = update.dob {
            self.dob = Some(dob);
        }
        if let Some(gender) = update.gender {
            self.gender = Some(gender);
        }
        if let Some(deceased) = update.deceased {
            self.deceased = Some(deceased);
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
    }
}

/// Attribute input for creating a member.
///
/// Carries no identifier and no edge sets: the engine allocates the former
/// and owns the latter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    /// Display name
    pub name: String,
    /// Contact address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Date of birth, opaque string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// Declared gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Deceased flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deceased: Option<bool>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MemberInput {
    /// Input with a name and nothing else.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach a declared gender.
    #[must_use]
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }
}

/// Partial attribute update for `update_member`.
///
/// A `None` field means "leave unchanged". There are deliberately no
/// `spouse_ids`/`parent_ids`/`child_ids` fields here; structural edits go
/// through the dedicated edge operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    /// Replace the display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replace the contact address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Replace the date of birth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    /// Replace the declared gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Replace the deceased flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deceased: Option<bool>,
    /// Replace the notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
