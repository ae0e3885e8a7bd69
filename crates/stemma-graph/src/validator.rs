//! Whole-graph integrity sweep
//!
//! The validator is the acceptance gate for deserialized payloads and a
//! diagnostic for live graphs. One pass over the store checks referential
//! integrity, edge symmetry, self-edges, and ancestry cycles, and flags
//! parentless members as orphan warnings. It accumulates every finding
//! instead of short-circuiting so a user can fix a payload in one round.
//!
//! A graph mutated only through [`FamilyGraph`](crate::graph::FamilyGraph)
//! always validates clean apart from orphan warnings; errors here mean the
//! payload came from outside or a policy bug slipped an edge through.

use crate::graph::FamilyGraph;
use crate::traversal;
use stemma_core::{EdgeKind, ValidationIssue, ValidationReport};
use tracing::warn;

impl FamilyGraph {
    /// Sweep the store once and report every integrity finding.
    pub fn validate(&self) -> ValidationReport {
        let store = self.store();
        let mut report = ValidationReport::default();

        for member in store.members() {
            for spouse_id in &member.spouse_ids {
                if spouse_id == &member.id {
                    report.error(ValidationIssue::SelfEdge {
                        member: member.id.clone(),
                        kind: EdgeKind::Spouse,
                    });
                    continue;
                }
                match store.get(spouse_id) {
                    None => report.error(ValidationIssue::DanglingReference {
                        member: member.id.clone(),
                        missing: spouse_id.clone(),
                        kind: EdgeKind::Spouse,
                    }),
                    Some(spouse) if !spouse.is_spouse_of(&member.id) => {
                        report.error(ValidationIssue::AsymmetricSpouse {
                            member: member.id.clone(),
                            spouse: spouse_id.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }

            for parent_id in &member.parent_ids {
                if parent_id == &member.id {
                    report.error(ValidationIssue::SelfEdge {
                        member: member.id.clone(),
                        kind: EdgeKind::Parent,
                    });
                    continue;
                }
                match store.get(parent_id) {
                    None => report.error(ValidationIssue::DanglingReference {
                        member: member.id.clone(),
                        missing: parent_id.clone(),
                        kind: EdgeKind::Parent,
                    }),
                    Some(parent) if !parent.has_child(&member.id) => {
                        report.error(ValidationIssue::AsymmetricParentChild {
                            parent: parent_id.clone(),
                            child: member.id.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }

            for child_id in &member.child_ids {
                if child_id == &member.id {
                    report.error(ValidationIssue::SelfEdge {
                        member: member.id.clone(),
                        kind: EdgeKind::Child,
                    });
                    continue;
                }
                match store.get(child_id) {
                    None => report.error(ValidationIssue::DanglingReference {
                        member: member.id.clone(),
                        missing: child_id.clone(),
                        kind: EdgeKind::Child,
                    }),
                    Some(child) if !child.has_parent(&member.id) => {
                        report.error(ValidationIssue::AsymmetricParentChild {
                            parent: member.id.clone(),
                            child: child_id.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }

            if traversal::has_ancestry_cycle(store, &member.id) {
                report.error(ValidationIssue::CircularAncestry {
                    member: member.id.clone(),
                });
            }

            if member.parent_ids.is_empty() {
                report.warning(ValidationIssue::Orphan {
                    member: member.id.clone(),
                });
            }
        }

        if !report.is_ok() {
            warn!(tree = %self.tree().id, %report, "integrity sweep found errors");
        }
        report
    }
}
