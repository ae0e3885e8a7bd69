//! Tree configuration and policy settings
//!
//! A [`Tree`] is the identity and configuration of one family graph. Its
//! [`TreeSettings`] value is the policy the graph engine consults before
//! accepting a structural mutation; the settings carry no behavior of their
//! own.
//!
//! # Policy order
//!
//! - `allow_polygamy` overrides `monogamy`; with polygamy on, the spouse cap
//!   defers to `max_spouses_per_member` (unset means unbounded).
//! - `allow_multi_parent_children` gates parent counts above two; with it
//!   on, the cap defers to `max_parents_per_child` (unset means unbounded).
//! - `allow_same_sex` is enforceable only when both endpoints declare a
//!   gender; an undeclared gender never blocks a union.

use crate::identifiers::TreeId;
use serde::{Deserialize, Serialize};

/// Identity and configuration of a family graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    /// Stable identifier
    pub id: TreeId,
    /// Display name
    pub name: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Policy consulted by the graph engine
    #[serde(default)]
    pub settings: TreeSettings,
}

impl Tree {
    /// Create a tree with a fresh identifier and default (permissive) settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TreeId::generate(),
            name: name.into(),
            description: None,
            settings: TreeSettings::default(),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the policy settings.
    #[must_use]
    pub fn with_settings(mut self, settings: TreeSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Policy knobs for structural mutations.
///
/// Missing fields on deserialization take the permissive defaults, so older
/// payloads load unchanged when a knob is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSettings {
    /// Permit spouse edges between members of the same declared gender
    #[serde(default = "default_true")]
    pub allow_same_sex: bool,

    /// Cap every member at one concurrent spouse edge
    #[serde(default)]
    pub monogamy: bool,

    /// Ignore `monogamy` and defer to `max_spouses_per_member`
    #[serde(default)]
    pub allow_polygamy: bool,

    /// Hard spouse cap per member when polygamy is enabled; unset = unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_spouses_per_member: Option<u32>,

    /// Permit adding a child with a single parent
    #[serde(default = "default_true")]
    pub allow_single_parent: bool,

    /// Permit children with more than two parents
    #[serde(default)]
    pub allow_multi_parent_children: bool,

    /// Hard parent cap per child when multi-parent is enabled; unset = unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parents_per_child: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            allow_same_sex: true,
            monogamy: false,
            allow_polygamy: false,
            max_spouses_per_member: None,
            allow_single_parent: true,
            allow_multi_parent_children: false,
            max_parents_per_child: None,
        }
    }
}

impl TreeSettings {
    /// Strict monogamous configuration: one spouse, two parents per child.
    pub fn monogamous() -> Self {
        Self {
            monogamy: true,
            ..Self::default()
        }
    }
}
