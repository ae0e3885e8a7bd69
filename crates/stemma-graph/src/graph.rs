//! The invariant engine
//!
//! [`FamilyGraph`] is the single public surface of the engine: it owns the
//! tree configuration and the member store, and every structural mutation
//! goes through it. The policy in [`TreeSettings`](stemma_core::TreeSettings)
//! is consulted before the first write, so a rejected call leaves the store
//! byte-identical (all-or-nothing per public call).
//!
//! # Invariants upheld here
//!
//! - Every edge is recorded on both endpoints (spouse symmetry, parent-child
//!   symmetry)
//! - No self-edges
//! - The parent-child relation stays acyclic
//! - Spouse and parent counts respect the tree's policy
//!
//! Instances are independent: multiple trees coexist as separate
//! `FamilyGraph` values with no shared state.

use crate::store::MemberStore;
use crate::traversal;
use std::collections::HashMap;
use stemma_core::{
    Member, MemberId, MemberInput, MemberUpdate, PolicyReason, Result, StemmaError, Tree,
};
use tracing::debug;

/// Append an identifier unless already present, preserving order.
pub(crate) fn push_unique(ids: &mut Vec<MemberId>, id: MemberId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

/// Drop every occurrence of an identifier, preserving order of the rest.
pub(crate) fn remove_id(ids: &mut Vec<MemberId>, id: &MemberId) {
    ids.retain(|existing| existing != id);
}

/// A mutable family graph under one tree's policy.
#[derive(Debug, Clone)]
pub struct FamilyGraph {
    tree: Tree,
    store: MemberStore,
}

impl FamilyGraph {
    /// Create an empty graph for the given tree.
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            store: MemberStore::new(),
        }
    }

    /// Assemble a graph from already-populated parts. Callers are expected
    /// to run [`validate`](Self::validate) afterwards; `from_snapshot` does.
    pub(crate) fn from_parts(tree: Tree, store: MemberStore) -> Self {
        Self { tree, store }
    }

    /// The tree configuration this graph enforces.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &MemberStore {
        &self.store
    }

    // === Member lifecycle ===

    /// Create an isolated member. Never fails on policy: a member with no
    /// edges violates no invariant.
    pub fn add_member(&mut self, input: MemberInput) -> Member {
        let member = Member::from_input(input);
        self.store.insert(member.clone());
        debug!(member = %member.id, name = %member.name, "added member");
        member
    }

    /// Apply a partial attribute update.
    ///
    /// Structural state cannot be rewritten through this path; see
    /// [`MemberUpdate`].
    pub fn update_member(&mut self, id: &MemberId, update: MemberUpdate) -> Result<Member> {
        let member = self
            .store
            .get_mut(id)
            .ok_or_else(|| StemmaError::not_found(format!("member {id}")))?;
        member.apply_update(update);
        let updated = member.clone();
        debug!(member = %id, "updated member attributes");
        Ok(updated)
    }

    /// Remove a member and every edge incident on it, on both endpoints.
    ///
    /// Idempotent: an unknown identifier is a no-op. Children left without
    /// parents become roots, which the validator reports as a warning only.
    pub fn remove_member(&mut self, id: &MemberId) {
        let Some(doomed) = self.store.remove(id) else {
            return;
        };
        for spouse_id in &doomed.spouse_ids {
            if let Some(spouse) = self.store.get_mut(spouse_id) {
                remove_id(&mut spouse.spouse_ids, id);
            }
        }
        for parent_id in &doomed.parent_ids {
            if let Some(parent) = self.store.get_mut(parent_id) {
                remove_id(&mut parent.child_ids, id);
            }
        }
        for child_id in &doomed.child_ids {
            if let Some(child) = self.store.get_mut(child_id) {
                remove_id(&mut child.parent_ids, id);
            }
        }
        debug!(member = %id, "removed member and incident edges");
    }

    // === Spouse edges ===

    /// Create a new member joined to `member_id` by a spouse edge.
    pub fn add_spouse(&mut self, member_id: &MemberId, input: MemberInput) -> Result<Member> {
        let (spouse_count, member_gender) = {
            let member = self
                .store
                .get(member_id)
                .ok_or_else(|| StemmaError::not_found(format!("member {member_id}")))?;
            (member.spouse_ids.len(), member.gender)
        };

        let settings = &self.tree.settings;
        if settings.monogamy && !settings.allow_polygamy && spouse_count > 0 {
            return Err(StemmaError::policy(PolicyReason::Monogamy));
        }
        if settings.allow_polygamy {
            if let Some(cap) = settings.max_spouses_per_member {
                if spouse_count as u32 >= cap {
                    return Err(StemmaError::policy(PolicyReason::MaxSpouses));
                }
            }
        }
        if !settings.allow_same_sex {
            if let (Some(a), Some(b)) = (member_gender, input.gender) {
                if a == b {
                    return Err(StemmaError::policy(PolicyReason::SameSex));
                }
            }
        }

        let mut spouse = Member::from_input(input);
        push_unique(&mut spouse.spouse_ids, member_id.clone());
        self.store.insert(spouse.clone());
        if let Some(member) = self.store.get_mut(member_id) {
            push_unique(&mut member.spouse_ids, spouse.id.clone());
        }
        debug!(member = %member_id, spouse = %spouse.id, "added spouse edge");
        Ok(spouse)
    }

    /// Remove the spouse edge between two members, both directions.
    /// Idempotent; unknown identifiers are a no-op.
    pub fn remove_spouse(&mut self, a: &MemberId, b: &MemberId) {
        if let Some(member) = self.store.get_mut(a) {
            remove_id(&mut member.spouse_ids, b);
        }
        if let Some(member) = self.store.get_mut(b) {
            remove_id(&mut member.spouse_ids, a);
        }
        debug!(a = %a, b = %b, "removed spouse edge");
    }

    // === Parent-child edges ===

    /// Create a new member as a child of `parent_id` and any `co_parents`.
    ///
    /// The parent set is deduplicated before policy is applied, so naming
    /// the same parent twice counts once.
    pub fn add_child(
        &mut self,
        parent_id: &MemberId,
        input: MemberInput,
        co_parents: &[MemberId],
    ) -> Result<Member> {
        let mut parents: Vec<MemberId> = Vec::with_capacity(1 + co_parents.len());
        parents.push(parent_id.clone());
        for id in co_parents {
            if !parents.contains(id) {
                parents.push(id.clone());
            }
        }
        for id in &parents {
            if !self.store.contains(id) {
                return Err(StemmaError::not_found(format!("parent {id}")));
            }
        }

        let settings = &self.tree.settings;
        if parents.len() < 2 && !settings.allow_single_parent {
            return Err(StemmaError::policy(PolicyReason::SingleParent));
        }
        if parents.len() > 2 && !settings.allow_multi_parent_children {
            return Err(StemmaError::policy(PolicyReason::MaxParents));
        }
        if let Some(cap) = settings.max_parents_per_child {
            if parents.len() as u32 > cap {
                return Err(StemmaError::policy(PolicyReason::MaxParents));
            }
        }

        let mut child = Member::from_input(input);
        // A freshly allocated child has no descendants, so no parent can sit
        // below it; the guard stays in place for any future adopt-existing
        // path and runs before the first write.
        for id in &parents {
            if *id == child.id
                || traversal::ancestors_with_distance(&self.store, id).contains_key(&child.id)
            {
                return Err(StemmaError::invariant(format!(
                    "parent {id} is a descendant of child {}",
                    child.id
                )));
            }
        }

        child.parent_ids = parents.clone();
        self.store.insert(child.clone());
        for id in &parents {
            if let Some(parent) = self.store.get_mut(id) {
                push_unique(&mut parent.child_ids, child.id.clone());
            }
        }
        debug!(child = %child.id, parents = parents.len(), "added child");
        Ok(child)
    }

    /// Remove the parent-child edge between two members, both directions.
    /// Idempotent; unknown identifiers are a no-op.
    pub fn remove_child(&mut self, parent_id: &MemberId, child_id: &MemberId) {
        if let Some(parent) = self.store.get_mut(parent_id) {
            remove_id(&mut parent.child_ids, child_id);
        }
        if let Some(child) = self.store.get_mut(child_id) {
            remove_id(&mut child.parent_ids, parent_id);
        }
        debug!(parent = %parent_id, child = %child_id, "removed parent-child edge");
    }

    // === Look-ups ===

    /// Look up a member by identifier.
    pub fn get_member(&self, id: &MemberId) -> Option<&Member> {
        self.store.get(id)
    }

    /// Every member, in insertion order.
    pub fn list_members(&self) -> impl Iterator<Item = &Member> {
        self.store.members()
    }

    /// Number of members in the graph.
    pub fn member_count(&self) -> usize {
        self.store.len()
    }

    /// Case-insensitive exact name lookup; first hit in insertion order.
    ///
    /// A UX convenience only: names are not identities, and the winning
    /// record on a collision is not part of any contract.
    pub fn find_member_by_name(&self, name: &str) -> Option<&Member> {
        let needle = name.to_lowercase();
        self.store.members().find(|m| m.name.to_lowercase() == needle)
    }

    // === Traversal ===

    /// Shortest path between two members over the undirected union of
    /// spouse, parent, and child edges; empty when absent or unreachable.
    pub fn find_path(&self, from: &MemberId, to: &MemberId) -> Vec<MemberId> {
        traversal::find_path(&self.store, from, to)
    }

    /// Every strict ancestor of `id` with its shortest-path distance.
    pub fn ancestors_with_distance(&self, id: &MemberId) -> HashMap<MemberId, u32> {
        traversal::ancestors_with_distance(&self.store, id)
    }

    /// Every strict descendant of `id` with its shortest-path distance.
    pub fn descendants_with_distance(&self, id: &MemberId) -> HashMap<MemberId, u32> {
        traversal::descendants_with_distance(&self.store, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use stemma_core::{Gender, TreeSettings};

    fn graph_with(settings: TreeSettings) -> FamilyGraph {
        FamilyGraph::new(Tree::new("test").with_settings(settings))
    }

    #[test]
    fn add_member_never_fails_on_policy() {
        let mut graph = graph_with(TreeSettings::monogamous());
        let a = graph.add_member(MemberInput::named("A"));
        let b = graph.add_member(MemberInput::named("B"));
        assert_ne!(a.id, b.id);
        assert_eq!(graph.member_count(), 2);
    }

    #[test]
    fn update_member_unknown_id_is_not_found() {
        let mut graph = graph_with(TreeSettings::default());
        let err = graph
            .update_member(&MemberId::new("ghost"), MemberUpdate::default())
            .unwrap_err();
        assert_matches!(err, StemmaError::NotFound { .. });
    }

    #[test]
    fn update_member_cannot_touch_edges() {
        let mut graph = graph_with(TreeSettings::default());
        let a = graph.add_member(MemberInput::named("A"));
        let spouse = graph.add_spouse(&a.id, MemberInput::named("S")).unwrap();

        let updated = graph
            .update_member(
                &a.id,
                MemberUpdate {
                    name: Some("A2".into()),
                    ..MemberUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "A2");
        assert_eq!(updated.spouse_ids, vec![spouse.id]);
    }

    #[test]
    fn monogamy_rejects_second_spouse() {
        let mut graph = graph_with(TreeSettings::monogamous());
        let a = graph.add_member(MemberInput::named("A"));
        graph.add_spouse(&a.id, MemberInput::named("S1")).unwrap();

        let err = graph.add_spouse(&a.id, MemberInput::named("S2")).unwrap_err();
        assert_eq!(err, StemmaError::policy(PolicyReason::Monogamy));
        // The rejected call left the store untouched.
        assert_eq!(graph.member_count(), 2);
        assert_eq!(graph.get_member(&a.id).unwrap().spouse_ids.len(), 1);
    }

    #[test]
    fn polygamy_cap_rejects_with_max_spouses() {
        let settings = TreeSettings {
            monogamy: true, // ignored once polygamy is on
            allow_polygamy: true,
            max_spouses_per_member: Some(1),
            ..TreeSettings::default()
        };
        let mut graph = graph_with(settings);
        let a = graph.add_member(MemberInput::named("A"));
        graph.add_spouse(&a.id, MemberInput::named("S1")).unwrap();

        let err = graph.add_spouse(&a.id, MemberInput::named("S2")).unwrap_err();
        assert_eq!(err, StemmaError::policy(PolicyReason::MaxSpouses));
    }

    #[test]
    fn unbounded_polygamy_accepts_many_spouses() {
        let settings = TreeSettings {
            monogamy: true,
            allow_polygamy: true,
            ..TreeSettings::default()
        };
        let mut graph = graph_with(settings);
        let a = graph.add_member(MemberInput::named("A"));
        for i in 0..4 {
            graph
                .add_spouse(&a.id, MemberInput::named(format!("S{i}")))
                .unwrap();
        }
        assert_eq!(graph.get_member(&a.id).unwrap().spouse_ids.len(), 4);
    }

    #[test]
    fn same_sex_policy_applies_only_when_both_genders_declared() {
        let settings = TreeSettings {
            allow_same_sex: false,
            ..TreeSettings::default()
        };
        let mut graph = graph_with(settings);
        let a = graph.add_member(MemberInput::named("A").with_gender(Gender::Male));

        let err = graph
            .add_spouse(&a.id, MemberInput::named("S").with_gender(Gender::Male))
            .unwrap_err();
        assert_eq!(err, StemmaError::policy(PolicyReason::SameSex));

        // Undeclared gender on either endpoint permits the edge.
        graph.add_spouse(&a.id, MemberInput::named("S2")).unwrap();
    }

    #[test]
    fn single_parent_policy_requires_two_parents() {
        let settings = TreeSettings {
            allow_single_parent: false,
            ..TreeSettings::default()
        };
        let mut graph = graph_with(settings);
        let p1 = graph.add_member(MemberInput::named("P1"));
        let p2 = graph.add_member(MemberInput::named("P2"));

        let err = graph
            .add_child(&p1.id, MemberInput::named("C"), &[])
            .unwrap_err();
        assert_eq!(err, StemmaError::policy(PolicyReason::SingleParent));

        // Naming the same parent twice still counts as one parent.
        let err = graph
            .add_child(&p1.id, MemberInput::named("C"), std::slice::from_ref(&p1.id))
            .unwrap_err();
        assert_eq!(err, StemmaError::policy(PolicyReason::SingleParent));

        let child = graph
            .add_child(&p1.id, MemberInput::named("C"), std::slice::from_ref(&p2.id))
            .unwrap();
        assert_eq!(child.parent_ids.len(), 2);
    }

    #[test]
    fn three_parents_require_multi_parent_children() {
        let mut graph = graph_with(TreeSettings::default());
        let p1 = graph.add_member(MemberInput::named("P1"));
        let p2 = graph.add_member(MemberInput::named("P2"));
        let p3 = graph.add_member(MemberInput::named("P3"));

        let err = graph
            .add_child(
                &p1.id,
                MemberInput::named("C"),
                &[p2.id.clone(), p3.id.clone()],
            )
            .unwrap_err();
        assert_eq!(err, StemmaError::policy(PolicyReason::MaxParents));

        let settings = TreeSettings {
            allow_multi_parent_children: true,
            ..TreeSettings::default()
        };
        let mut graph = graph_with(settings);
        let p1 = graph.add_member(MemberInput::named("P1"));
        let p2 = graph.add_member(MemberInput::named("P2"));
        let p3 = graph.add_member(MemberInput::named("P3"));
        let child = graph
            .add_child(
                &p1.id,
                MemberInput::named("C"),
                &[p2.id.clone(), p3.id.clone()],
            )
            .unwrap();
        assert_eq!(child.parent_ids.len(), 3);
    }

    #[test]
    fn max_parents_cap_applies() {
        let settings = TreeSettings {
            allow_multi_parent_children: true,
            max_parents_per_child: Some(2),
            ..TreeSettings::default()
        };
        let mut graph = graph_with(settings);
        let p1 = graph.add_member(MemberInput::named("P1"));
        let p2 = graph.add_member(MemberInput::named("P2"));
        let p3 = graph.add_member(MemberInput::named("P3"));

        let err = graph
            .add_child(
                &p1.id,
                MemberInput::named("C"),
                &[p2.id.clone(), p3.id.clone()],
            )
            .unwrap_err();
        assert_eq!(err, StemmaError::policy(PolicyReason::MaxParents));
    }

    #[test]
    fn add_child_with_unknown_parent_is_not_found() {
        let mut graph = graph_with(TreeSettings::default());
        let p1 = graph.add_member(MemberInput::named("P1"));

        let err = graph
            .add_child(&p1.id, MemberInput::named("C"), &[MemberId::new("ghost")])
            .unwrap_err();
        assert_matches!(err, StemmaError::NotFound { .. });
        assert_eq!(graph.member_count(), 1, "failed call must not allocate");
    }

    #[test]
    fn remove_member_cascades_both_endpoints() {
        let mut graph = graph_with(TreeSettings::default());
        let p = graph.add_member(MemberInput::named("P"));
        let c = graph.add_child(&p.id, MemberInput::named("C"), &[]).unwrap();
        let s = graph.add_spouse(&p.id, MemberInput::named("S")).unwrap();

        graph.remove_member(&p.id);

        assert!(graph.get_member(&p.id).is_none());
        assert!(graph.get_member(&s.id).unwrap().spouse_ids.is_empty());
        assert!(graph.get_member(&c.id).unwrap().parent_ids.is_empty());
        // Idempotent.
        graph.remove_member(&p.id);
    }

    #[test]
    fn remove_spouse_twice_equals_once() {
        let mut graph = graph_with(TreeSettings::default());
        let a = graph.add_member(MemberInput::named("A"));
        let s = graph.add_spouse(&a.id, MemberInput::named("S")).unwrap();

        graph.remove_spouse(&a.id, &s.id);
        let after_once = graph.clone();
        graph.remove_spouse(&a.id, &s.id);

        assert_eq!(
            graph.get_member(&a.id).unwrap().spouse_ids,
            after_once.get_member(&a.id).unwrap().spouse_ids
        );
        assert!(graph.get_member(&s.id).unwrap().spouse_ids.is_empty());
    }

    #[test]
    fn remove_child_unlinks_both_directions() {
        let mut graph = graph_with(TreeSettings::default());
        let p = graph.add_member(MemberInput::named("P"));
        let c = graph.add_child(&p.id, MemberInput::named("C"), &[]).unwrap();

        graph.remove_child(&p.id, &c.id);
        assert!(graph.get_member(&p.id).unwrap().child_ids.is_empty());
        assert!(graph.get_member(&c.id).unwrap().parent_ids.is_empty());
        // Unknown ids are a no-op.
        graph.remove_child(&p.id, &MemberId::new("ghost"));
    }

    #[test]
    fn find_member_by_name_is_case_insensitive_first_hit() {
        let mut graph = graph_with(TreeSettings::default());
        let first = graph.add_member(MemberInput::named("Grace"));
        graph.add_member(MemberInput::named("grace"));

        let found = graph.find_member_by_name("GRACE").unwrap();
        assert_eq!(found.id, first.id);
        assert!(graph.find_member_by_name("nobody").is_none());
    }
}
