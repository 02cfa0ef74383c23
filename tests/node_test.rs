//! Tests for node insertion, attribute resolution and tree shape

use hiergraph::{attrs, AttrValue, ValueTree, DEFAULT_COLOR};

// ============================================================
// Attribute Resolution Tests
// ============================================================

#[test]
fn given_child_without_color_when_inserted_then_inherits_parent_color() {
    let mut tree = ValueTree::new();
    let root = tree
        .add_node("root", None, attrs! { "color" => "red" })
        .unwrap();

    let child = tree.add_node("child", Some(root), attrs! {}).unwrap();

    assert_eq!(tree.attrs(child).unwrap().color, "red");
}

#[test]
fn given_parent_recolored_when_children_inserted_around_the_edit_then_each_keeps_the_color_it_saw() {
    // Inheritance reads the parent at insertion time, not at build time.
    let mut tree = ValueTree::new();
    let root = tree
        .add_node("root", None, attrs! { "color" => "red" })
        .unwrap();
    let before = tree.add_node("before", Some(root), attrs! {}).unwrap();

    tree.attrs_mut(root).unwrap().color = "blue".to_string();
    let after = tree.add_node("after", Some(root), attrs! {}).unwrap();

    assert_eq!(tree.attrs(before).unwrap().color, "red");
    assert_eq!(tree.attrs(after).unwrap().color, "blue");
}

#[test]
fn given_root_without_color_when_inserted_then_defaults_to_green() {
    let mut tree = ValueTree::new();
    let root = tree.add_node("root", None, attrs! {}).unwrap();

    assert_eq!(tree.attrs(root).unwrap().color, DEFAULT_COLOR);
}

#[test]
fn given_no_value_when_inserted_then_defaults_to_zero() {
    let mut tree = ValueTree::new();
    let root = tree.add_node("root", None, attrs! {}).unwrap();

    assert_eq!(tree.attrs(root).unwrap().value, AttrValue::Number(0.0));
}

#[test]
fn given_no_percent_when_inserted_then_percent_stays_absent() {
    let mut tree = ValueTree::new();
    let root = tree.add_node("root", None, attrs! { "value" => 1 }).unwrap();

    assert!(tree.attrs(root).unwrap().percent.is_none());
}

#[test]
fn given_supplied_attributes_when_inserted_then_kept_verbatim() {
    let mut tree = ValueTree::new();
    let root = tree
        .add_node(
            "root",
            None,
            attrs! { "value" => 7, "percent" => 12.5, "color" => "orange", "shape" => "box" },
        )
        .unwrap();

    let attrs = tree.attrs(root).unwrap();
    assert_eq!(attrs.value, AttrValue::Number(7.0));
    assert_eq!(attrs.percent, Some(AttrValue::Number(12.5)));
    assert_eq!(attrs.color, "orange");
    // Unknown keys ride along untouched
    assert_eq!(attrs.extra.get("shape"), Some(&AttrValue::from("box")));
}

// ============================================================
// Tree Shape Tests
// ============================================================

#[test]
fn given_children_when_inserted_then_parent_tracks_registration_order() {
    let mut tree = ValueTree::new();
    let root = tree.add_node("root", None, attrs! {}).unwrap();
    let first = tree.add_node("first", Some(root), attrs! {}).unwrap();
    let second = tree.add_node("second", Some(root), attrs! {}).unwrap();

    let children = &tree.get_node(root).unwrap().children;
    assert_eq!(children, &vec![first, second]);
    assert_eq!(tree.get_node(first).unwrap().parent, Some(root));
}

#[test]
fn given_second_parentless_node_when_inserted_then_becomes_new_root() {
    let mut tree = ValueTree::new();
    let old_root = tree.add_node("old", None, attrs! {}).unwrap();
    let new_root = tree.add_node("new", None, attrs! {}).unwrap();

    assert_ne!(tree.root(), Some(old_root));
    assert_eq!(tree.root(), Some(new_root));
    assert_eq!(tree.len(), 2);
}

#[test]
fn given_foreign_index_when_used_as_parent_then_returns_error() {
    let mut other = ValueTree::new();
    let foreign = other.add_node("foreign", None, attrs! {}).unwrap();

    let mut tree = ValueTree::new();
    let result = tree.add_node("child", Some(foreign), attrs! {});

    assert!(result.is_err());
}

#[test]
fn given_foreign_indices_when_registering_child_then_returns_error() {
    let mut other = ValueTree::new();
    let foreign = other.add_node("foreign", None, attrs! {}).unwrap();

    let mut tree = ValueTree::new();
    assert!(tree.add_child(foreign, foreign).is_err());
}

#[test]
fn given_tree_when_measuring_then_depth_and_leaves_match() {
    let mut tree = ValueTree::new();
    let root = tree.add_node("root", None, attrs! {}).unwrap();
    let left = tree.add_node("left", Some(root), attrs! {}).unwrap();
    tree.add_node("right", Some(root), attrs! {}).unwrap();
    tree.add_node("left_leaf", Some(left), attrs! {}).unwrap();

    assert_eq!(tree.depth(), 3);

    let mut leaves = tree.leaf_nodes();
    leaves.sort();
    assert_eq!(leaves, vec!["left_leaf", "right"]);
}

#[test]
fn given_empty_tree_when_measuring_then_depth_zero_and_no_leaves() {
    let tree = ValueTree::new();

    assert!(tree.is_empty());
    assert_eq!(tree.depth(), 0);
    assert!(tree.leaf_nodes().is_empty());
    assert!(tree.root().is_none());
}

// ============================================================
// Iterator Tests
// ============================================================

#[test]
fn given_tree_when_iterating_then_visits_all_nodes() {
    let mut tree = ValueTree::new();
    let root = tree.add_node("root", None, attrs! {}).unwrap();
    let mid = tree.add_node("mid", Some(root), attrs! {}).unwrap();
    tree.add_node("leaf", Some(mid), attrs! {}).unwrap();

    let mut count = 0;
    for (idx, node) in tree.iter() {
        count += 1;
        assert!(tree.get_node(idx).is_some());
        assert!(!node.data.name.is_empty());
    }
    assert_eq!(count, 3);
}

#[test]
fn given_tree_when_postorder_iterating_then_visits_leaves_first() {
    let mut tree = ValueTree::new();
    let root = tree.add_node("root", None, attrs! {}).unwrap();
    let mid = tree.add_node("mid", Some(root), attrs! {}).unwrap();
    tree.add_node("leaf", Some(mid), attrs! {}).unwrap();

    let names: Vec<String> = tree
        .iter_postorder()
        .map(|(_idx, node)| node.data.name.clone())
        .collect();

    assert_eq!(names, vec!["leaf", "mid", "root"]);
}

// ============================================================
// Display Tests
// ============================================================

#[test]
fn given_tree_when_formatting_then_lists_names_and_values() {
    let mut tree = ValueTree::new();
    let root = tree.add_node("root", None, attrs! { "value" => 1 }).unwrap();
    tree.add_node("leaf", Some(root), attrs! { "value" => 2 })
        .unwrap();

    let rendered = tree.to_tree_string().to_string();

    assert!(rendered.contains("root (1)"), "got: {}", rendered);
    assert!(rendered.contains("leaf (2)"), "got: {}", rendered);
}
