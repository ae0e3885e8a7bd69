//! Read-only breadth-first algorithms over the member store
//!
//! All traversals are pure reads: they take the store at call time and hold
//! no state. Every walk carries a visited set, so termination is guaranteed
//! even on a corrupted graph that admitted an ancestry cycle (the validator
//! reports the cycle separately). Dangling references are skipped rather
//! than failed on, for the same reason.
//!
//! Determinism: neighbor expansion follows the edge vectors in insertion
//! order (spouses, then parents, then children), which fixes the tie-break
//! between equal-length paths.

use crate::store::MemberStore;
use std::collections::{HashMap, HashSet, VecDeque};
use stemma_core::{Member, MemberId};

/// Breadth-first distance map along one edge direction.
///
/// The start member is not included in the result.
fn directed_distances<F>(
    store: &MemberStore,
    id: &MemberId,
    neighbors: F,
) -> HashMap<MemberId, u32>
where
    F: Fn(&Member) -> &[MemberId],
{
    let mut distances = HashMap::new();
    if !store.contains(id) {
        return distances;
    }

    let mut visited: HashSet<MemberId> = HashSet::new();
    visited.insert(id.clone());
    let mut queue: VecDeque<(MemberId, u32)> = VecDeque::new();
    queue.push_back((id.clone(), 0));

    while let Some((current, dist)) = queue.pop_front() {
        let Some(member) = store.get(&current) else {
            continue;
        };
        for next in neighbors(member) {
            if store.contains(next) && visited.insert(next.clone()) {
                distances.insert(next.clone(), dist + 1);
                queue.push_back((next.clone(), dist + 1));
            }
        }
    }
    distances
}

/// Every strict ancestor of `id`, mapped to its shortest-path distance.
pub fn ancestors_with_distance(store: &MemberStore, id: &MemberId) -> HashMap<MemberId, u32> {
    directed_distances(store, id, |m| m.parent_ids.as_slice())
}

/// Every strict descendant of `id`, mapped to its shortest-path distance.
pub fn descendants_with_distance(store: &MemberStore, id: &MemberId) -> HashMap<MemberId, u32> {
    directed_distances(store, id, |m| m.child_ids.as_slice())
}

/// True when `id` is reachable from itself through parent edges.
///
/// The distance maps above never re-admit their start node, so this check
/// is separate; it is what the validator uses to report `[Circular]`.
pub fn has_ancestry_cycle(store: &MemberStore, id: &MemberId) -> bool {
    let mut visited: HashSet<MemberId> = HashSet::new();
    let mut queue: VecDeque<MemberId> = VecDeque::new();
    queue.push_back(id.clone());

    while let Some(current) = queue.pop_front() {
        let Some(member) = store.get(&current) else {
            continue;
        };
        for parent in &member.parent_ids {
            if parent == id {
                return true;
            }
            if visited.insert(parent.clone()) {
                queue.push_back(parent.clone());
            }
        }
    }
    false
}

/// Shortest path between two members over the undirected union of spouse,
/// parent, and child edges.
///
/// Returns the identifier sequence including both endpoints, or an empty
/// vector when either endpoint is absent or unreachable. Ties between
/// equal-length paths resolve to the first found under insertion-order
/// neighbor expansion.
pub fn find_path(store: &MemberStore, from: &MemberId, to: &MemberId) -> Vec<MemberId> {
    if !store.contains(from) || !store.contains(to) {
        return Vec::new();
    }
    if from == to {
        return vec![from.clone()];
    }

    let mut predecessor: HashMap<MemberId, MemberId> = HashMap::new();
    let mut visited: HashSet<MemberId> = HashSet::new();
    visited.insert(from.clone());
    let mut queue: VecDeque<MemberId> = VecDeque::new();
    queue.push_back(from.clone());

    while let Some(current) = queue.pop_front() {
        let Some(member) = store.get(&current) else {
            continue;
        };
        let neighbors = member
            .spouse_ids
            .iter()
            .chain(member.parent_ids.iter())
            .chain(member.child_ids.iter());
        for next in neighbors {
            if !store.contains(next) || !visited.insert(next.clone()) {
                continue;
            }
            predecessor.insert(next.clone(), current.clone());
            if next == to {
                return reconstruct_path(&predecessor, from, to);
            }
            queue.push_back(next.clone());
        }
    }
    Vec::new()
}

fn reconstruct_path(
    predecessor: &HashMap<MemberId, MemberId>,
    from: &MemberId,
    to: &MemberId,
) -> Vec<MemberId> {
    let mut path = vec![to.clone()];
    let mut current = to;
    while current != from {
        match predecessor.get(current) {
            Some(prev) => {
                path.push(prev.clone());
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// A common ancestor of two members with both shortest-path distances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonAncestor {
    /// The ancestor's identifier
    pub id: MemberId,
    /// Shortest-path distance from the first member
    pub distance_a: u32,
    /// Shortest-path distance from the second member
    pub distance_b: u32,
}

/// The common ancestor minimizing `distance_a + distance_b`.
///
/// Ties break lexicographically by identifier so the kinship label derived
/// from the result is deterministic across implementations.
pub fn lowest_common_ancestor(
    store: &MemberStore,
    a: &MemberId,
    b: &MemberId,
) -> Option<CommonAncestor> {
    let from_a = ancestors_with_distance(store, a);
    let from_b = ancestors_with_distance(store, b);
    select_common_ancestor(&from_a, &from_b)
}

/// Intersect two ancestor maps and pick the minimum-sum entry.
pub(crate) fn select_common_ancestor(
    from_a: &HashMap<MemberId, u32>,
    from_b: &HashMap<MemberId, u32>,
) -> Option<CommonAncestor> {
    let mut best: Option<CommonAncestor> = None;
    for (id, &distance_a) in from_a {
        let Some(&distance_b) = from_b.get(id) else {
            continue;
        };
        let candidate = CommonAncestor {
            id: id.clone(),
            distance_a,
            distance_b,
        };
        best = Some(match best.take() {
            None => candidate,
            Some(current) => {
                let candidate_sum = candidate.distance_a + candidate.distance_b;
                let current_sum = current.distance_a + current.distance_b;
                if candidate_sum < current_sum
                    || (candidate_sum == current_sum && candidate.id < current.id)
                {
                    candidate
                } else {
                    current
                }
            }
        });
    }
    best
}
