use serde_json::{Value, json};
use treetable::node::{NodeList, TreeNode};
use treetable::pagination::PaginationState;
use treetable::serialize::{RowView, serialize, serialize_nodes, serialize_page};

fn named(name: &str) -> TreeNode<Value> {
    TreeNode::new(json!({ "name": name }))
}

fn name_of(row: &RowView<Value>) -> String {
    row.node
        .resolve_field("name")
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn flat(rows: &[RowView<Value>]) -> Vec<(String, usize, bool)> {
    rows.iter()
        .map(|row| (name_of(row), row.level, row.visible))
        .collect()
}

#[test]
fn test_depth_first_preorder() {
    let forest = NodeList::from_vec(vec![
        named("a").expanded(true).with_children(vec![
            named("a1").expanded(true).with_children(vec![named("a1x")]),
            named("a2"),
        ]),
        named("b"),
    ]);

    let rows = serialize_nodes(&forest);

    assert_eq!(
        flat(&rows),
        vec![
            ("a".to_string(), 0, true),
            ("a1".to_string(), 1, true),
            ("a1x".to_string(), 2, true),
            ("a2".to_string(), 1, true),
            ("b".to_string(), 0, true),
        ]
    );
}

#[test]
fn test_parent_references() {
    let child = named("child");
    let parent = named("parent").with_children(vec![child.clone()]);
    let forest = NodeList::from_vec(vec![parent.clone()]);

    let rows = serialize_nodes(&forest);

    assert!(rows[0].parent.is_none());
    assert!(rows[1].node.ptr_eq(&child));
    assert!(rows[1].parent.as_ref().is_some_and(|p| p.ptr_eq(&parent)));
}

#[test]
fn test_collapsed_parent_hides_child_even_if_expanded() {
    let forest = NodeList::from_vec(vec![
        named("p").expanded(false).with_children(vec![named("c").expanded(true)]),
    ]);

    let rows = serialize_nodes(&forest);

    assert_eq!(rows.len(), 2);
    assert!(!rows[1].visible);
}

#[test]
fn test_invisibility_is_sticky_down_the_subtree() {
    let forest = NodeList::from_vec(vec![
        named("root").expanded(true).with_children(vec![
            named("mid").expanded(false).with_children(vec![
                named("leaf").expanded(true).with_children(vec![named("deep")]),
            ]),
        ]),
    ]);

    let rows = serialize_nodes(&forest);

    assert_eq!(
        flat(&rows),
        vec![
            ("root".to_string(), 0, true),
            ("mid".to_string(), 1, true),
            ("leaf".to_string(), 2, false),
            ("deep".to_string(), 3, false),
        ]
    );
}

#[test]
fn test_serializing_twice_is_identical() {
    let forest = NodeList::from_vec(vec![
        named("x").with_children(vec![named("x1")]),
        named("y").expanded(true).with_children(vec![named("y1")]),
    ]);

    assert_eq!(serialize_nodes(&forest), serialize_nodes(&forest));
}

fn numbered_forest(count: usize) -> NodeList<Value> {
    NodeList::from_vec(
        (0..count)
            .map(|i| named(&format!("n{i}")).with_children(vec![named(&format!("n{i}-child"))]))
            .collect(),
    )
}

#[test]
fn test_page_window_only() {
    let forest = numbered_forest(20);

    let rows = serialize_page(&forest, 10, 5, false);

    let roots: Vec<String> = rows.iter().filter(|r| r.level == 0).map(name_of).collect();
    assert_eq!(roots, vec!["n10", "n11", "n12", "n13", "n14"]);
    // each root carries its collapsed subtree
    assert_eq!(rows.len(), 10);
    assert!(rows.iter().filter(|r| r.level == 0).all(|r| r.visible));
    assert!(rows.iter().filter(|r| r.level == 1).all(|r| !r.visible));
}

#[test]
fn test_page_past_end_is_truncated() {
    let forest = numbered_forest(12);
    let rows = serialize_page(&forest, 10, 5, false);
    let roots: Vec<String> = rows.iter().filter(|r| r.level == 0).map(name_of).collect();
    assert_eq!(roots, vec!["n10", "n11"]);
}

#[test]
fn test_lazy_page_ignores_offset() {
    let forest = numbered_forest(3);

    let rows = serialize_page(&forest, 20, 10, true);

    let roots: Vec<String> = rows.iter().filter(|r| r.level == 0).map(name_of).collect();
    assert_eq!(roots, vec!["n0", "n1", "n2"]);
}

#[test]
fn test_serialize_dispatches_on_pagination() {
    let forest = numbered_forest(4);
    let page = PaginationState::new(2, 1, 4);

    assert_eq!(serialize(&forest, None, false), serialize_nodes(&forest));
    assert_eq!(
        serialize(&forest, Some(&page), false),
        serialize_page(&forest, 2, 1, false)
    );
}

#[test]
fn test_empty_forest() {
    let forest: NodeList<Value> = NodeList::new();
    assert!(serialize_nodes(&forest).is_empty());
    assert!(serialize_page(&forest, 0, 10, false).is_empty());
}
