//! Kinship labeling
//!
//! Produces the canonical label for an ordered pair of members. Real graphs
//! admit several simultaneous kinships (siblings whose parents are also
//! cousins), so the labeler is priority-ordered: direct edges first, then
//! lineal labels, then collateral labels through the lowest common ancestor,
//! then in-laws through spouses. The first match wins and encodes the
//! socially closest reading.
//!
//! Collateral labels derive from the common ancestor minimizing the summed
//! distance, tie-broken lexicographically by identifier, so two runs over
//! the same graph agree byte-for-byte.

use crate::graph::FamilyGraph;
use crate::store::MemberStore;
use crate::traversal;
use serde::{Deserialize, Serialize};
use std::fmt;
use stemma_core::MemberId;

/// A computed kinship between an ordered pair of members.
///
/// `Display` renders the closed set of canonical labels consumed by the
/// platform's clients ("2nd Cousin, twice removed", "Great-Aunt/Uncle",
/// ...). Localization maps these tokens externally; the engine does no
/// locale negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Kinship {
    /// The pair is one and the same member
    SelfSame,
    /// No recognized kinship, or an endpoint is absent
    Unknown,
    /// Direct spouse edge
    Spouse,
    /// Direct parent edge
    Parent,
    /// Direct child edge
    Child,
    /// Lineal ancestor two or more generations up; `greats = distance - 2`
    Grandparent {
        /// Number of "Great-" prefixes
        greats: u32,
    },
    /// Lineal descendant two or more generations down; `greats = distance - 2`
    Grandchild {
        /// Number of "Great-" prefixes
        greats: u32,
    },
    /// Shared parent
    Sibling,
    /// Sibling of an ancestor; `greats` counts generations past aunt/uncle
    AuntUncle {
        /// Number of "Great-" prefixes
        greats: u32,
    },
    /// Descendant of a sibling; `greats` counts generations past niece/nephew
    NieceNephew {
        /// Number of "Great-" prefixes
        greats: u32,
    },
    /// Collateral kin through a more distant common ancestor
    Cousin {
        /// `min(dA, dB) - 1` where `dA`/`dB` are distances to the common ancestor
        degree: u32,
        /// `|dA - dB|`, the generational offset
        removal: u32,
    },
    /// Parent of a spouse
    ParentInLaw,
    /// Child of a spouse
    ChildInLaw,
    /// Sibling kin through a spouse's line
    SiblingInLaw,
}

/// English ordinal for a cousin degree (1st, 2nd, 3rd, 4th, ..., 11th-13th
/// take "th").
fn ordinal(n: u32) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "th",
        (_, 1) => "st",
        (_, 2) => "nd",
        (_, 3) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn write_greats(f: &mut fmt::Formatter<'_>, greats: u32) -> fmt::Result {
    for _ in 0..greats {
        write!(f, "Great-")?;
    }
    Ok(())
}

impl fmt::Display for Kinship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kinship::SelfSame => write!(f, "Self"),
            Kinship::Unknown => write!(f, "Unknown"),
            Kinship::Spouse => write!(f, "Spouse"),
            Kinship::Parent => write!(f, "Parent"),
            Kinship::Child => write!(f, "Child"),
            Kinship::Grandparent { greats } => {
                write_greats(f, *greats)?;
                write!(f, "Grandparent")
            }
            Kinship::Grandchild { greats } => {
                write_greats(f, *greats)?;
                write!(f, "Grandchild")
            }
            Kinship::Sibling => write!(f, "Sibling"),
            Kinship::AuntUncle { greats } => {
                write_greats(f, *greats)?;
                write!(f, "Aunt/Uncle")
            }
            Kinship::NieceNephew { greats } => {
                write_greats(f, *greats)?;
                write!(f, "Niece/Nephew")
            }
            Kinship::Cousin { degree, removal } => {
                write!(f, "{} Cousin", ordinal(*degree))?;
                match removal {
                    0 => Ok(()),
                    1 => write!(f, ", once removed"),
                    2 => write!(f, ", twice removed"),
                    n => write!(f, ", {n} times removed"),
                }
            }
            Kinship::ParentInLaw => write!(f, "Parent-in-law"),
            Kinship::ChildInLaw => write!(f, "Child-in-law"),
            Kinship::SiblingInLaw => write!(f, "Sibling-in-law"),
        }
    }
}

/// Compute the kinship of the ordered pair `(a, b)`.
///
/// Priority order: self, absence, direct edges (spouse, parent, child),
/// lineal grandparent/grandchild ladders, collateral labels through the
/// lowest common ancestor, in-laws through each spouse of `a`, unknown.
pub fn kinship(store: &MemberStore, a: &MemberId, b: &MemberId) -> Kinship {
    if a == b {
        return Kinship::SelfSame;
    }
    let (Some(member_a), Some(member_b)) = (store.get(a), store.get(b)) else {
        return Kinship::Unknown;
    };

    if member_a.is_spouse_of(b) {
        return Kinship::Spouse;
    }
    if member_a.has_parent(b) {
        return Kinship::Parent;
    }
    if member_a.has_child(b) {
        return Kinship::Child;
    }

    let ancestors_of_b = traversal::ancestors_with_distance(store, b);
    if let Some(&d) = ancestors_of_b.get(a) {
        if d >= 2 {
            return Kinship::Grandparent { greats: d - 2 };
        }
    }
    let ancestors_of_a = traversal::ancestors_with_distance(store, a);
    if let Some(&d) = ancestors_of_a.get(b) {
        if d >= 2 {
            return Kinship::Grandchild { greats: d - 2 };
        }
    }

    if let Some(lca) = traversal::select_common_ancestor(&ancestors_of_a, &ancestors_of_b) {
        let (da, db) = (lca.distance_a, lca.distance_b);
        if da == 1 && db == 1 {
            return Kinship::Sibling;
        }
        if da == 1 {
            return Kinship::AuntUncle { greats: db - 2 };
        }
        if db == 1 {
            return Kinship::NieceNephew { greats: da - 2 };
        }
        return Kinship::Cousin {
            degree: da.min(db) - 1,
            removal: da.abs_diff(db),
        };
    }

    for spouse_id in &member_a.spouse_ids {
        let Some(spouse) = store.get(spouse_id) else {
            continue;
        };
        if spouse.has_parent(b) {
            return Kinship::ParentInLaw;
        }
        if spouse.has_child(b) {
            return Kinship::ChildInLaw;
        }
        let spouse_line = traversal::ancestors_with_distance(store, spouse_id);
        if spouse_line.keys().any(|ancestor| member_b.has_parent(ancestor)) {
            return Kinship::SiblingInLaw;
        }
    }

    Kinship::Unknown
}

impl FamilyGraph {
    /// Structured kinship of the ordered pair `(a, b)`.
    pub fn kinship_between(&self, a: &MemberId, b: &MemberId) -> Kinship {
        kinship(self.store(), a, b)
    }

    /// Canonical label for "what is `b` to `a`".
    pub fn compute_relationship(&self, a: &MemberId, b: &MemberId) -> String {
        self.kinship_between(a, b).to_string()
    }

    /// Every other member whose label against `member_id` matches
    /// `label` case-insensitively, in insertion order.
    pub fn list_relations(&self, member_id: &MemberId, label: &str) -> Vec<MemberId> {
        self.store()
            .members()
            .filter(|m| &m.id != member_id)
            .filter(|m| {
                kinship(self.store(), member_id, &m.id)
                    .to_string()
                    .eq_ignore_ascii_case(label)
            })
            .map(|m| m.id.clone())
            .collect()
    }
}
