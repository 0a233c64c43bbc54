use std::cell::RefCell;

use serde_json::{Value, json};
use treetable::node::{NodeList, TreeNode};
use treetable::sort::{
    CustomSortEvent, SortMeta, SortMode, SortOrder, SortState, SortStrategy, compare_fields,
    sort_forest,
};

fn named(name: &str) -> TreeNode<Value> {
    TreeNode::new(json!({ "name": name }))
}

fn names(list: &NodeList<Value>) -> Vec<String> {
    list.to_vec()
        .iter()
        .map(|node| {
            node.resolve_field("name")
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default()
        })
        .collect()
}

fn single(field: &str, order: SortOrder) -> SortState {
    SortState::Single(SortMeta::new(field, order))
}

fn sample_forest() -> NodeList<Value> {
    NodeList::from_vec(vec![
        named("c").with_children(vec![named("c2"), named("c10"), named("c1")]),
        named("a"),
        named("b").with_children(vec![named("b-z"), named("b-a")]),
    ])
}

#[test]
fn test_single_sort_recurses_into_children() {
    let forest = sample_forest();
    sort_forest(&forest, &single("name", SortOrder::Ascending), &SortStrategy::Local);

    assert_eq!(names(&forest), vec!["a", "b", "c"]);
    let b = forest.get(1).unwrap();
    let c = forest.get(2).unwrap();
    assert_eq!(names(&b.children()), vec!["b-a", "b-z"]);
    assert_eq!(names(&c.children()), vec!["c1", "c2", "c10"]);
}

#[test]
fn test_reversed_order_reverses_every_level() {
    let forest = sample_forest();
    sort_forest(&forest, &single("name", SortOrder::Ascending), &SortStrategy::Local);
    let ascending_top = forest.to_vec();
    let c = forest.get(2).unwrap();
    let ascending_children = c.children().to_vec();

    sort_forest(&forest, &single("name", SortOrder::Descending), &SortStrategy::Local);

    let mut expected_top = ascending_top;
    expected_top.reverse();
    assert_eq!(forest.to_vec(), expected_top);

    let mut expected_children = ascending_children;
    expected_children.reverse();
    assert_eq!(c.children().to_vec(), expected_children);
}

#[test]
fn test_sort_keeps_node_identity() {
    let b = named("b");
    let a = named("a");
    let forest = NodeList::from_vec(vec![b.clone(), a.clone()]);

    sort_forest(&forest, &single("name", SortOrder::Ascending), &SortStrategy::Local);

    assert!(forest.get(0).unwrap().ptr_eq(&a));
    assert!(forest.get(1).unwrap().ptr_eq(&b));
}

#[test]
fn test_absent_values_sort_first() {
    let forest = NodeList::from_vec(vec![
        named("b"),
        TreeNode::new(json!({ "other": 1 })),
        named("a"),
    ]);
    sort_forest(&forest, &single("name", SortOrder::Ascending), &SortStrategy::Local);
    assert_eq!(names(&forest), vec!["", "a", "b"]);
}

#[test]
fn test_multi_sort_tie_break_and_stability() {
    let row = |id: i64, primary: i64, secondary: i64, tertiary: i64| {
        TreeNode::new(json!({
            "name": id.to_string(),
            "p": primary,
            "s": secondary,
            "t": tertiary,
        }))
    };
    let forest = NodeList::from_vec(vec![
        row(0, 1, 2, 0),
        row(1, 1, 1, 5),
        row(2, 1, 1, 3),
        row(3, 0, 9, 9),
        row(4, 1, 1, 3),
    ]);
    let metas = vec![SortMeta::asc("p"), SortMeta::asc("s"), SortMeta::asc("t")];

    sort_forest(&forest, &SortState::Multiple(metas), &SortStrategy::Local);

    // 2 and 4 tie on every key and keep their relative order
    assert_eq!(names(&forest), vec!["3", "2", "4", "1", "0"]);
}

#[test]
fn test_multi_sort_sorts_nested_levels() {
    let forest = NodeList::from_vec(vec![
        TreeNode::new(json!({"kind": "dir", "name": "src"})).with_children(vec![
            TreeNode::new(json!({"kind": "file", "name": "main.rs"})),
            TreeNode::new(json!({"kind": "dir", "name": "util"})),
            TreeNode::new(json!({"kind": "file", "name": "lib.rs"})),
        ]),
    ]);
    let metas = vec![SortMeta::asc("kind"), SortMeta::desc("name")];

    sort_forest(&forest, &SortState::Multiple(metas), &SortStrategy::Local);

    let src = forest.get(0).unwrap();
    assert_eq!(names(&src.children()), vec!["util", "main.rs", "lib.rs"]);
}

#[test]
fn test_custom_single_delegates_every_level() {
    let forest = sample_forest();
    let before = forest.to_vec();
    let calls = RefCell::new(Vec::new());
    let handler = |event: CustomSortEvent<Value>| {
        assert_eq!(event.mode, SortMode::Single);
        assert_eq!(event.field(), Some("name"));
        assert_eq!(event.order(), Some(SortOrder::Descending));
        calls.borrow_mut().push(names(&event.data));
    };

    sort_forest(
        &forest,
        &single("name", SortOrder::Descending),
        &SortStrategy::Custom(&handler),
    );

    // top level first, then each non-empty child list depth-first
    assert_eq!(
        calls.into_inner(),
        vec![
            vec!["c", "a", "b"],
            vec!["c2", "c10", "c1"],
            vec!["b-z", "b-a"],
        ]
    );
    assert_eq!(forest.to_vec(), before);
}

#[test]
fn test_custom_handler_reorders_in_place() {
    let forest = sample_forest();
    let handler = |event: CustomSortEvent<Value>| {
        let field = event.field().unwrap_or_default().to_string();
        event
            .data
            .sort_by(|a, b| compare_fields(a, b, &field).reverse());
    };

    sort_forest(
        &forest,
        &single("name", SortOrder::Ascending),
        &SortStrategy::Custom(&handler),
    );

    assert_eq!(names(&forest), vec!["c", "b", "a"]);
    let c = forest.get(0).unwrap();
    assert_eq!(names(&c.children()), vec!["c10", "c2", "c1"]);
}

#[test]
fn test_custom_multiple_delegates_top_level_once() {
    let forest = sample_forest();
    let before = forest.to_vec();
    let calls = RefCell::new(0);
    let handler = |event: CustomSortEvent<Value>| {
        assert_eq!(event.mode, SortMode::Multiple);
        assert_eq!(event.multi_sort_meta().map(<[SortMeta]>::len), Some(1));
        assert!(event.data.ptr_eq(&forest));
        *calls.borrow_mut() += 1;
    };

    sort_forest(
        &forest,
        &SortState::Multiple(vec![SortMeta::asc("name")]),
        &SortStrategy::Custom(&handler),
    );

    assert_eq!(calls.into_inner(), 1);
    assert_eq!(forest.to_vec(), before);
}

#[test]
fn test_empty_forest_is_noop() {
    let forest: NodeList<Value> = NodeList::new();
    let calls = RefCell::new(0);
    let handler = |_: CustomSortEvent<Value>| *calls.borrow_mut() += 1;

    sort_forest(&forest, &single("name", SortOrder::Ascending), &SortStrategy::Local);
    sort_forest(
        &forest,
        &single("name", SortOrder::Ascending),
        &SortStrategy::Custom(&handler),
    );

    assert!(forest.is_empty());
    assert_eq!(calls.into_inner(), 0);
}
