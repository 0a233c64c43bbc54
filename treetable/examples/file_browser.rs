use std::fs::File;

use serde::Deserialize;
use serde_json::{Value, json};
use simplelog::{Config, LevelFilter, WriteLogger};
use treetable::prelude::*;

const LISTING: &str = r#"[
    {"name": "src", "kind": "dir", "size": 0, "children": [
        {"name": "main.rs", "kind": "file", "size": 1200},
        {"name": "table", "kind": "dir", "size": 0, "children": [
            {"name": "mod.rs", "kind": "file", "size": 800},
            {"name": "state.rs", "kind": "file", "size": 15400}
        ]},
        {"name": "lib.rs", "kind": "file", "size": 3100}
    ]},
    {"name": "Cargo.toml", "kind": "file", "size": 420},
    {"name": "README.md", "kind": "file", "size": 2048},
    {"name": "remote", "kind": "dir", "size": 0, "lazy": true}
]"#;

#[derive(Debug, Deserialize)]
struct Entry {
    name: String,
    kind: String,
    size: u64,
    #[serde(default)]
    lazy: bool,
    #[serde(default)]
    children: Vec<Entry>,
}

fn to_node(entry: Entry) -> TreeNode<Value> {
    let node = TreeNode::new(json!({
        "name": entry.name,
        "kind": entry.kind,
        "size": entry.size,
    }));
    let node = if entry.lazy { node.leaf(false) } else { node };
    node.with_children(entry.children.into_iter().map(to_node).collect())
}

fn print_rows(title: &str, table: &TreeTable<Value>) {
    println!("== {title}");
    for row in table.visible_rows() {
        let toggler = Toggler::for_row(row);
        let name = row.node.resolve_field("name");
        let size = row.node.resolve_field("size");
        println!(
            "{:indent$}{} {:<12} {:>6}",
            "",
            toggler.icon(),
            name.as_ref().and_then(FieldValue::as_str).unwrap_or("?"),
            match size {
                Some(FieldValue::Int(bytes)) if bytes > 0 => bytes.to_string(),
                _ => String::new(),
            },
            indent = toggler.indent / 8,
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("file_browser.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let entries: Vec<Entry> = serde_json::from_str(LISTING)?;
    let forest: Vec<_> = entries.into_iter().map(to_node).collect();

    let config = TreeTableConfig::new()
        .sort_mode(SortMode::Multiple)
        .multi_sort_meta(vec![SortMeta::asc("kind"), SortMeta::asc("name")])
        .paginator(PaginatorConfig::default().rows_per_page_options(vec![3, 10]), 3);
    let mut table = TreeTable::with_config(config)?;
    let _log = table.subscribe(|event| log::info!("event: {}", event.name()));
    table.init();
    table.set_value(forest);
    print_rows("directories first", &table);

    let src = table
        .value()
        .to_vec()
        .into_iter()
        .find(|node| node.resolve_field("name") == Some(FieldValue::from("src")));
    if let Some(src) = src {
        table.toggle_node(&src);
    }
    print_rows("src expanded", &table);

    let size = SortableColumn::new(&table, "size");
    size.click(&mut table, false);
    size.click(&mut table, false);
    print_rows("largest first", &table);

    let state = table.pagination();
    table.change_page(state.first_of_page(1), state.rows);
    print_rows("page 2", &table);

    table.destroy();
    Ok(())
}
