use linkwalk::*;

fn node(name: &str) -> LinkNode<f64> {
    LinkBuilder::new().name(name).into_node()
}

fn names(traversal: &Traversal<f64>) -> Vec<String> {
    traversal.iter().map(|l| l.link().name.clone()).collect()
}

/// root -> { a -> { b, c }, d }
fn make_y_tree() -> (LinkNode<f64>, LinkNode<f64>, LinkNode<f64>, LinkNode<f64>, LinkNode<f64>) {
    let root = node("root");
    let a = node("a");
    let b = node("b");
    let c = node("c");
    let d = node("d");
    a.set_parent(&root);
    b.set_parent(&a);
    c.set_parent(&a);
    d.set_parent(&root);
    (root, a, b, c, d)
}

#[test]
fn find_covers_whole_mechanism_once() {
    let (_root, _a, b, _c, _d) = make_y_tree();
    let traversal = Traversal::from_reference(&b, true, true);
    assert_eq!(names(&traversal), ["b", "a", "root", "d", "c"]);
    assert_eq!(traversal.num_upward_connections(), 2);
    assert_eq!(traversal.reference_link().unwrap(), &b);
}

#[test]
fn upward_region_is_root_ward() {
    let (_root, _a, b, _c, _d) = make_y_tree();
    let traversal = Traversal::from_reference(&b, true, true);
    // each upward entry is the parent of its predecessor in the sequence
    for i in 1..=traversal.num_upward_connections() {
        assert_eq!(traversal[i - 1].parent().unwrap(), traversal[i]);
    }
}

#[test]
fn downward_entries_follow_their_parents() {
    let (_root, _a, b, _c, _d) = make_y_tree();
    let traversal = Traversal::from_reference(&b, true, true);
    for i in (traversal.num_upward_connections() + 1)..traversal.len() {
        let parent = traversal[i].parent().unwrap();
        let parent_index = traversal.iter().position(|l| l == &parent).unwrap();
        assert!(parent_index < i);
        assert!(traversal.is_downward(i));
    }
}

#[test]
fn find_downward_only() {
    let (root, _a, _b, _c, _d) = make_y_tree();
    let traversal = Traversal::from_reference(&root, false, true);
    assert_eq!(traversal.len(), 5);
    assert_eq!(traversal.num_upward_connections(), 0);
    assert_eq!(traversal.reference_link().unwrap(), &root);
}

#[test]
fn find_upward_only_skips_the_reference_subtree() {
    let (_root, a, _b, _c, _d) = make_y_tree();
    // only the reference link's own descent is suppressed; ancestors still
    // expand their other subtrees on the way back down
    let traversal = Traversal::from_reference(&a, true, false);
    assert_eq!(names(&traversal), ["a", "root", "d"]);
    assert_eq!(traversal.num_upward_connections(), 1);
}

#[test]
fn find_clears_previous_contents() {
    let (root, _a, b, _c, _d) = make_y_tree();
    let mut traversal = Traversal::from_reference(&b, true, true);
    traversal.find(&root, false, true);
    assert_eq!(traversal.len(), 5);
    assert_eq!(traversal.num_upward_connections(), 0);
    assert_eq!(traversal.reference_link().unwrap(), &root);
}

#[test]
fn remove_missing_link_leaves_traversal_unchanged() {
    let (_root, _a, b, _c, _d) = make_y_tree();
    let stranger = node("stranger");
    let mut traversal = Traversal::from_reference(&b, true, true);
    let len = traversal.len();
    let upward = traversal.num_upward_connections();
    assert!(!traversal.remove(&stranger));
    assert_eq!(traversal.len(), len);
    assert_eq!(traversal.num_upward_connections(), upward);
}

#[test]
fn remove_inside_upward_region_decrements_count() {
    let (root, _a, b, _c, _d) = make_y_tree();
    let mut traversal = Traversal::from_reference(&b, true, true);
    // root sits exactly at the upward boundary (index == count)
    assert!(traversal.remove(&root));
    assert_eq!(traversal.num_upward_connections(), 1);
    assert_eq!(traversal.len(), 4);
}

#[test]
fn remove_downward_entry_keeps_count() {
    let (_root, _a, b, _c, d) = make_y_tree();
    let mut traversal = Traversal::from_reference(&b, true, true);
    assert!(traversal.remove(&d));
    assert_eq!(traversal.num_upward_connections(), 2);
    assert_eq!(traversal.len(), 4);
}

#[test]
fn remove_reference_link_saturates_count_at_zero() {
    let (root, _a, _b, _c, _d) = make_y_tree();
    let mut traversal = Traversal::from_reference(&root, false, true);
    assert_eq!(traversal.num_upward_connections(), 0);
    // index 0 lies on the boundary; the count stays at zero
    assert!(traversal.remove(&root));
    assert_eq!(traversal.num_upward_connections(), 0);
}

#[test]
fn append_counts_upward_connections() {
    let mut traversal = Traversal::new();
    traversal.append(node("x"), true);
    assert_eq!(traversal.num_upward_connections(), 0);
    traversal.append(node("y"), false);
    assert_eq!(traversal.num_upward_connections(), 1);
    assert_eq!(traversal.len(), 2);
}

#[test]
fn prepend_extends_upward_chain() {
    let l0 = node("l0");
    let l1 = node("l1");
    let l2 = node("l2");
    let l3 = node("l3");
    connect![l0 => l1 => l2 => l3];

    let mut traversal = Traversal::from_reference(&l1, true, false);
    assert_eq!(names(&traversal), ["l1", "l0"]);
    assert_eq!(traversal.num_upward_connections(), 1);

    // l2 hangs below the current front, so its connection is upward
    let prepended = traversal.prepend_root_adjacent_link_toward(&l3).unwrap();
    assert_eq!(prepended, l2);
    assert_eq!(names(&traversal), ["l2", "l1", "l0"]);
    assert_eq!(traversal.num_upward_connections(), 2);

    // the next step toward l3 is l3 itself
    let prepended = traversal.prepend_root_adjacent_link_toward(&l3).unwrap();
    assert_eq!(prepended, l3);
    assert_eq!(names(&traversal), ["l3", "l2", "l1", "l0"]);
    assert_eq!(traversal.num_upward_connections(), 3);
}

#[test]
fn prepend_toward_ancestor_is_downward_connection() {
    let l0 = node("l0");
    let l1 = node("l1");
    let l2 = node("l2");
    connect![l0 => l1 => l2];

    let mut traversal = Traversal::from_reference(&l1, false, true);
    assert_eq!(names(&traversal), ["l1", "l2"]);

    // the old front is a child of the prepended link
    let prepended = traversal.prepend_root_adjacent_link_toward(&l0).unwrap();
    assert_eq!(prepended, l0);
    assert_eq!(names(&traversal), ["l0", "l1", "l2"]);
    assert_eq!(traversal.num_upward_connections(), 0);
}

#[test]
fn prepend_unreachable_target_returns_none() {
    let l0 = node("l0");
    let l1 = node("l1");
    connect![l0 => l1];
    let stranger = node("stranger");

    let mut traversal = Traversal::from_reference(&l0, true, true);
    assert!(traversal.prepend_root_adjacent_link_toward(&stranger).is_none());
    assert_eq!(traversal.len(), 2);

    let mut empty = Traversal::new();
    assert!(empty.prepend_root_adjacent_link_toward(&l1).is_none());
}

#[test]
fn upward_walk_stops_at_mechanism_boundary() {
    let a0 = node("a0");
    let a1 = node("a1");
    connect![a0 => a1];
    let b0 = node("b0");
    let b1 = node("b1");
    connect![b0 => b1];
    let _mech_a = Mechanism::from_root(a0);
    let _mech_b = Mechanism::from_root(b0.clone());

    // attach mechanism B under a link of mechanism A
    b0.set_parent(&a1);

    let traversal = Traversal::from_reference(&b1, true, true);
    assert_eq!(names(&traversal), ["b1", "b0"]);
    assert_eq!(traversal.num_upward_connections(), 1);
}

#[test]
fn clear_resets_count() {
    let (_root, _a, b, _c, _d) = make_y_tree();
    let mut traversal = Traversal::from_reference(&b, true, true);
    traversal.clear();
    assert!(traversal.is_empty());
    assert_eq!(traversal.num_upward_connections(), 0);
}

#[test]
fn clone_is_independent() {
    let (_root, _a, b, _c, d) = make_y_tree();
    let traversal = Traversal::from_reference(&b, true, true);
    let mut copy = traversal.clone();
    assert!(copy.remove(&d));
    assert_eq!(traversal.len(), 5);
    assert_eq!(copy.len(), 4);
}
