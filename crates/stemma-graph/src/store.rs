//! Insertion-ordered member storage
//!
//! The store owns the member records and nothing else: O(1) lookup,
//! insertion, idempotent removal, and ordered enumeration. Policy lives in
//! [`graph`](crate::graph), traversal in [`traversal`](crate::traversal).
//!
//! Members are held in an insertion-ordered map (the arena-plus-identifier
//! shape: neighbors are identifiers, never pointers), so enumeration order,
//! "first match" name lookup, and breadth-first tie-breaking are all
//! deterministic and survive serialization round-trips.

use indexmap::IndexMap;
use stemma_core::{Member, MemberId};

/// Owns the `id -> Member` mapping for one tree.
#[derive(Debug, Clone, Default)]
pub struct MemberStore {
    members: IndexMap<MemberId, Member>,
}

impl MemberStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the store holds no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True when `id` resolves to a live member.
    pub fn contains(&self, id: &MemberId) -> bool {
        self.members.contains_key(id)
    }

    /// Look up a member. Unknown identifiers return `None`, never fail.
    pub fn get(&self, id: &MemberId) -> Option<&Member> {
        self.members.get(id)
    }

    /// Mutable lookup, reserved for the invariant engine.
    pub(crate) fn get_mut(&mut self, id: &MemberId) -> Option<&mut Member> {
        self.members.get_mut(id)
    }

    /// Insert a member under its own identifier, replacing any previous
    /// record with the same identifier in place.
    pub(crate) fn insert(&mut self, member: Member) {
        self.members.insert(member.id.clone(), member);
    }

    /// Remove a member. Unknown identifiers are a no-op (idempotent).
    ///
    /// Uses a shifting removal so the insertion order of the remaining
    /// members is preserved.
    pub(crate) fn remove(&mut self, id: &MemberId) -> Option<Member> {
        self.members.shift_remove(id)
    }

    /// Iterate members in insertion order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Iterate member identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &MemberId> {
        self.members.keys()
    }

    /// Fresh clone of every member, in insertion order, for serialization.
    pub fn snapshot(&self) -> Vec<Member> {
        self.members.values().cloned().collect()
    }
}
