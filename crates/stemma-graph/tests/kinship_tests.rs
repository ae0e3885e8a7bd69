//! Labeler coverage: the full priority ladder over realistic families

use stemma_core::{MemberId, MemberInput, Tree};
use stemma_graph::{FamilyGraph, Kinship, TreeSnapshot};

#[test]
fn direct_labels_take_priority_over_lineal_ones() {
    let mut graph = FamilyGraph::new(Tree::new("direct"));
    let p = graph.add_member(MemberInput::named("P"));
    let s = graph.add_spouse(&p.id, MemberInput::named("S")).unwrap();
    let c = graph
        .add_child(&p.id, MemberInput::named("C"), std::slice::from_ref(&s.id))
        .unwrap();

    assert_eq!(graph.compute_relationship(&p.id, &p.id), "Self");
    assert_eq!(graph.compute_relationship(&p.id, &s.id), "Spouse");
    assert_eq!(graph.compute_relationship(&c.id, &p.id), "Parent");
    assert_eq!(graph.compute_relationship(&p.id, &c.id), "Child");
}

#[test]
fn lineal_ladder_scales_with_distance() {
    let mut graph = FamilyGraph::new(Tree::new("lineal"));
    let top = graph.add_member(MemberInput::named("gen0"));
    let mut line = vec![top.id.clone()];
    for gen in 1..=4 {
        let parent = line.last().unwrap().clone();
        let child = graph
            .add_child(&parent, MemberInput::named(format!("gen{gen}")), &[])
            .unwrap();
        line.push(child.id);
    }

    // Distance 2 up and down.
    assert_eq!(graph.compute_relationship(&line[0], &line[2]), "Grandparent");
    assert_eq!(graph.compute_relationship(&line[2], &line[0]), "Grandchild");
    // Distance 3 and 4 gain "Great-" prefixes.
    assert_eq!(graph.compute_relationship(&line[0], &line[3]), "Great-Grandparent");
    assert_eq!(
        graph.compute_relationship(&line[0], &line[4]),
        "Great-Great-Grandparent"
    );
    assert_eq!(graph.compute_relationship(&line[4], &line[0]), "Great-Great-Grandchild");

    assert_eq!(
        graph.kinship_between(&line[0], &line[4]),
        Kinship::Grandparent { greats: 2 }
    );
}

#[test]
fn siblings_and_collateral_lines() {
    let mut graph = FamilyGraph::new(Tree::new("collateral"));
    let g = graph.add_member(MemberInput::named("G"));
    let p1 = graph.add_child(&g.id, MemberInput::named("P1"), &[]).unwrap();
    let p2 = graph.add_child(&g.id, MemberInput::named("P2"), &[]).unwrap();
    let c1 = graph.add_child(&p1.id, MemberInput::named("C1"), &[]).unwrap();
    let c2 = graph.add_child(&p2.id, MemberInput::named("C2"), &[]).unwrap();
    let cc1 = graph.add_child(&c1.id, MemberInput::named("CC1"), &[]).unwrap();
    let cc2 = graph.add_child(&c2.id, MemberInput::named("CC2"), &[]).unwrap();

    assert_eq!(graph.compute_relationship(&p1.id, &p2.id), "Sibling");
    assert_eq!(graph.compute_relationship(&p2.id, &c1.id), "Aunt/Uncle");
    assert_eq!(graph.compute_relationship(&c1.id, &p2.id), "Niece/Nephew");
    assert_eq!(graph.compute_relationship(&cc1.id, &p2.id), "Great-Niece/Nephew");

    assert_eq!(graph.compute_relationship(&c1.id, &c2.id), "1st Cousin");
    assert_eq!(graph.compute_relationship(&cc1.id, &cc2.id), "2nd Cousin");
    assert_eq!(graph.compute_relationship(&cc1.id, &c2.id), "1st Cousin, once removed");
    assert_eq!(
        graph.kinship_between(&cc1.id, &c2.id),
        Kinship::Cousin { degree: 1, removal: 1 }
    );
}

#[test]
fn in_law_labels_reach_through_spouses() {
    let mut graph = FamilyGraph::new(Tree::new("in-laws"));
    // S's side of the family exists first; A marries in.
    let sp = graph.add_member(MemberInput::named("SP"));
    let s = graph.add_child(&sp.id, MemberInput::named("S"), &[]).unwrap();
    let sibling = graph.add_child(&sp.id, MemberInput::named("Sib"), &[]).unwrap();
    let a = graph.add_spouse(&s.id, MemberInput::named("A")).unwrap();
    let step = graph.add_child(&s.id, MemberInput::named("Step"), &[]).unwrap();

    assert_eq!(graph.compute_relationship(&a.id, &sp.id), "Parent-in-law");
    assert_eq!(graph.compute_relationship(&a.id, &step.id), "Child-in-law");
    assert_eq!(graph.compute_relationship(&a.id, &sibling.id), "Sibling-in-law");
}

#[test]
fn spouse_priority_beats_collateral_kinship() {
    // Two siblings who are also spouses (loaded, not built, so the engine's
    // creation path is not involved). The direct edge must win.
    let json = r#"{
        "tree": {"id": "t", "name": "priority"},
        "members": [
            {"id": "P", "name": "P", "spouseIds": [], "parentIds": [], "childIds": ["A", "B"]},
            {"id": "A", "name": "A", "spouseIds": ["B"], "parentIds": ["P"], "childIds": []},
            {"id": "B", "name": "B", "spouseIds": ["A"], "parentIds": ["P"], "childIds": []}
        ]
    }"#;
    let snapshot: TreeSnapshot = serde_json::from_str(json).unwrap();
    let graph = FamilyGraph::from_snapshot(snapshot).unwrap();

    let a = MemberId::new("A");
    let b = MemberId::new("B");
    assert_eq!(graph.compute_relationship(&a, &b), "Spouse");
}

#[test]
fn unknown_covers_absent_and_unrelated_members() {
    let mut graph = FamilyGraph::new(Tree::new("unknown"));
    let a = graph.add_member(MemberInput::named("A"));
    let stranger = graph.add_member(MemberInput::named("Stranger"));

    assert_eq!(graph.compute_relationship(&a.id, &stranger.id), "Unknown");
    assert_eq!(
        graph.compute_relationship(&a.id, &MemberId::new("ghost")),
        "Unknown"
    );
}

#[test]
fn list_relations_matches_labels_case_insensitively() {
    let mut graph = FamilyGraph::new(Tree::new("relations"));
    let g = graph.add_member(MemberInput::named("G"));
    let p1 = graph.add_child(&g.id, MemberInput::named("P1"), &[]).unwrap();
    let p2 = graph.add_child(&g.id, MemberInput::named("P2"), &[]).unwrap();
    let c1 = graph.add_child(&p1.id, MemberInput::named("C1"), &[]).unwrap();
    let c2 = graph.add_child(&p2.id, MemberInput::named("C2"), &[]).unwrap();

    assert_eq!(graph.list_relations(&c1.id, "1st cousin"), vec![c2.id.clone()]);
    assert_eq!(graph.list_relations(&g.id, "CHILD"), vec![p1.id.clone(), p2.id.clone()]);
    assert_eq!(graph.list_relations(&c1.id, "grandchild"), vec![g.id.clone()]);
    assert!(graph.list_relations(&c1.id, "Spouse").is_empty());
    assert_eq!(graph.list_relations(&c2.id, "sibling"), Vec::<MemberId>::new());
}
