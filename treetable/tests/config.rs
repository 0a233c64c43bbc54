use treetable::config::TreeTableConfig;
use treetable::error::ConfigError;
use treetable::pagination::{PaginatorConfig, PaginatorPosition};
use treetable::sort::{SortMeta, SortMode, SortOrder};

#[test]
fn test_defaults() {
    let config = TreeTableConfig::default();
    assert!(!config.lazy);
    assert!(config.paginator.is_none());
    assert!(config.reset_page_on_sort);
    assert_eq!(config.sort_mode, SortMode::Single);
    assert_eq!(config.default_sort_order, SortOrder::Ascending);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_from_json() {
    let json = r#"{
        "lazy": true,
        "rows": 20,
        "paginator": { "position": "both", "rowsPerPageOptions": [10, 20, 50] },
        "sortMode": "multiple",
        "multiSortMeta": [
            { "field": "kind", "order": 1 },
            { "field": "size", "order": -1 }
        ],
        "resetPageOnSort": false,
        "scrollHeight": "400px"
    }"#;

    let config = TreeTableConfig::from_json(json).unwrap();

    assert!(config.lazy);
    assert_eq!(config.rows, 20);
    let paginator = config.paginator.as_ref().unwrap();
    assert_eq!(paginator.position, PaginatorPosition::Both);
    assert_eq!(paginator.rows_per_page_options, vec![10, 20, 50]);
    assert_eq!(paginator.page_links, 5);
    assert_eq!(config.sort_mode, SortMode::Multiple);
    assert_eq!(
        config.multi_sort_meta,
        Some(vec![SortMeta::asc("kind"), SortMeta::desc("size")])
    );
    assert!(!config.reset_page_on_sort);
}

#[test]
fn test_builder_matches_json() {
    let built = TreeTableConfig::new()
        .paginator(PaginatorConfig::default(), 10)
        .sort_by("name", SortOrder::Descending)
        .keep_page_on_sort();
    let loaded = TreeTableConfig::from_json(
        r#"{
            "paginator": {},
            "rows": 10,
            "sortField": "name",
            "sortOrder": -1,
            "resetPageOnSort": false
        }"#,
    )
    .unwrap();

    assert_eq!(built, loaded);
}

#[test]
fn test_paginator_requires_rows() {
    let err = TreeTableConfig::from_json(r#"{"paginator": {}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::PaginatorWithoutRows));
}

#[test]
fn test_bad_scroll_height() {
    let err = TreeTableConfig::new().scrollable("tall").validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid scroll height 'tall': expected '<n>px', '<n>' or '<n>%'"
    );
}

#[test]
fn test_bad_sort_order() {
    let err = TreeTableConfig::from_json(r#"{"sortOrder": 0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("Invalid sort order 0"));

    assert!(matches!(
        SortOrder::try_from(2i8),
        Err(ConfigError::InvalidSortOrder(2))
    ));
    assert_eq!(SortOrder::try_from(-1i8).ok(), Some(SortOrder::Descending));
}
