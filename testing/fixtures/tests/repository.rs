//! Integration tests for the repository contract and its error paths,
//! across the crud-backed (sites, users) and default (tags) read paths.

use shoebox::prelude::*;
use shoebox_testing_fixtures::{
    TestServer,
    entities::{Site, Tag},
};

#[test]
fn find_or_fail_raises_on_absence() {
    let server = TestServer::new();
    let repository = server.site_repository();

    let found = repository.find_or_fail("google").unwrap();
    assert_eq!(found.cast::<Site>().unwrap().slug(), "google");

    let err = repository.find_or_fail("foobar").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "resource foobar does not exist");
}

#[test]
fn find_many_is_best_effort_and_order_preserving() {
    let server = TestServer::new();
    let repository = server.site_repository();

    let found = repository.find_many(&["twitter", "missing", "example"]);

    let slugs: Vec<String> = found
        .iter()
        .map(|m| m.cast::<Site>().unwrap().slug().to_string())
        .collect();
    assert_eq!(slugs, vec!["twitter".to_string(), "example".to_string()]);
}

#[test]
fn exists_derives_from_find() {
    let server = TestServer::new();
    let repository = server.site_repository();

    assert!(repository.exists("google"));
    assert!(!repository.exists("foobar"));
}

#[test]
fn deleting_a_missing_site_is_a_not_found_error() {
    let server = TestServer::new();

    let err = server
        .site_repository()
        .delete(ModelRef::id("foobar"))
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn the_default_read_path_serves_read_only_resources() {
    let server = TestServer::new();
    let repository = server.tag_repository();

    let found = repository
        .query_one(ModelRef::id("rust"))
        .first()
        .unwrap()
        .unwrap();
    assert_eq!(found.cast::<Tag>().unwrap().display_name(), "Rust");

    assert!(
        repository
            .query_one(ModelRef::id("foobar"))
            .first()
            .unwrap()
            .is_none()
    );

    // a model target passes straight through
    let tag = Model::new(server.tags().find("test").unwrap());
    let found = repository
        .query_one(ModelRef::from(tag))
        .first()
        .unwrap()
        .unwrap();
    assert_eq!(found.cast::<Tag>().unwrap().slug(), "test");
}

#[test]
fn crud_backed_and_default_query_paths_agree() {
    let server = TestServer::new();

    // crud-backed path (sites)
    assert!(
        server
            .site_repository()
            .query_one(ModelRef::id("google"))
            .first()
            .unwrap()
            .is_some()
    );
    assert!(
        server
            .site_repository()
            .query_one(ModelRef::id("foobar"))
            .first()
            .unwrap()
            .is_none()
    );

    // default path (tags)
    assert!(
        server
            .tag_repository()
            .query_one(ModelRef::id("rust"))
            .first()
            .unwrap()
            .is_some()
    );
    assert!(
        server
            .tag_repository()
            .query_one(ModelRef::id("foobar"))
            .first()
            .unwrap()
            .is_none()
    );
}

#[test]
fn relationship_queries_resolve_fail_fast() {
    let server = TestServer::new();

    let err = server
        .site_repository()
        .query_to_one(ModelRef::id("foobar"), "owner")
        .first()
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn unknown_relations_are_shape_errors() {
    let server = TestServer::new();

    let err = server
        .site_repository()
        .query_to_one(ModelRef::id("example"), "nope")
        .first()
        .unwrap_err();

    assert_eq!(err.to_string(), "sites resources do not define relation nope");
}

#[test]
fn a_dropped_server_surfaces_as_not_injected() {
    let server = TestServer::new();
    let repository = server.site_repository();
    drop(server);

    // identity lookup still works against the storage handle
    assert!(repository.find("example").is_some());

    // but fallback relationship reads need the server
    let err = repository
        .query_to_one(ModelRef::id("example"), "owner")
        .first()
        .unwrap_err();
    assert!(err.to_string().contains("no server injected"));
}

#[test]
fn mutating_relations_without_hooks_is_a_config_error() {
    let server = TestServer::new();

    // the sites schema declares no hooks for "owner" attach/detach
    let err = server
        .site_repository()
        .modify_to_many(ModelRef::id("example"), "owner")
        .attach(&[Identifier::new("users", "jane.doe")])
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "expecting attach hook to modify relation owner"
    );
}
