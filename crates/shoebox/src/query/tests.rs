use super::*;

#[test]
fn sort_key_parses_jsonapi_syntax() {
    assert_eq!(SortKey::parse("name"), SortKey::asc("name"));
    assert_eq!(SortKey::parse("-name"), SortKey::desc("name"));
}

#[test]
fn sort_key_parses_lists() {
    let keys = SortKey::parse_list("name, -createdAt");

    assert_eq!(keys, vec![SortKey::asc("name"), SortKey::desc("createdAt")]);
    assert!(SortKey::parse_list("").is_empty());
}

#[test]
fn filter_map_distinguishes_singular_and_plural_values() {
    let filters = FilterMap::new()
        .with("slug", "google")
        .with("slugs", vec!["a".to_string(), "b".to_string()]);

    assert!(filters.exists("slug"));
    assert_eq!(filters.value("slug"), Some("google"));
    assert_eq!(filters.value("slugs"), None);
    assert_eq!(
        filters.values("slugs"),
        Some(&["a".to_string(), "b".to_string()][..])
    );
    assert_eq!(filters.value("missing"), None);
}

#[test]
fn filter_value_deserializes_untagged() {
    let one: FilterValue = serde_json::from_str(r#""google""#).unwrap();
    let many: FilterValue = serde_json::from_str(r#"["a", "b"]"#).unwrap();

    assert_eq!(one, FilterValue::One("google".to_string()));
    assert_eq!(
        many,
        FilterValue::Many(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn query_context_defaults_are_empty() {
    let context = QueryContext::new();

    assert!(context.filters().is_none());
    assert!(context.sort().is_empty());
    assert!(context.include_paths().is_none());
}

#[test]
fn query_context_holds_configured_parameters() {
    let mut context = QueryContext::new();
    context.set_filters(FilterMap::new().with("name", "Example"));
    context.set_sort(vec![SortKey::desc("name")]);
    context.set_include_paths(["owner", "tags"]);

    assert_eq!(
        context.filters().and_then(|f| f.value("name")),
        Some("Example")
    );
    assert_eq!(context.sort(), &[SortKey::desc("name")]);
    assert!(context.include_paths().is_some_and(|p| p.contains("owner")));
}
