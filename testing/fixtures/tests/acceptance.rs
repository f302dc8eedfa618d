//! Acceptance tests driving the sites and users resources end-to-end
//! through the uniform repository surface.

use shoebox::prelude::*;
use shoebox_testing_fixtures::{
    TestServer,
    entities::{Site, Tag, User},
};

fn data(value: serde_json::Value) -> ResourceData {
    ResourceData::from_value(value).unwrap()
}

fn tag_identifiers(tags: &[Tag]) -> Vec<Identifier> {
    tags.iter()
        .map(|tag| Identifier::new("tags", tag.slug()))
        .collect()
}

fn cast_tags(models: &[Model]) -> Vec<Tag> {
    models.iter().map(|m| m.cast::<Tag>().unwrap()).collect()
}

// ----------------------------------------------------------------------
// Sites
// ----------------------------------------------------------------------

#[test]
fn find_sites_through_the_store() {
    let server = TestServer::new();
    let kind = ResourceType::from("sites");

    let found = server.store().find(&kind, "google").unwrap();
    assert_eq!(found.cast::<Site>().unwrap().slug(), "google");
    assert!(server.store().find(&kind, "foobar").is_none());

    assert!(server.store().exists(&kind, "google"));
    assert!(!server.store().exists(&kind, "foobar"));
}

#[test]
fn find_many_skips_unmatched_and_preserves_order() {
    let server = TestServer::new();

    let found = server.store().find_many(&[
        Identifier::new("sites", "google"),
        Identifier::new("sites", "facebook"),
        Identifier::new("sites", "foobar"),
    ]);

    let slugs: Vec<String> = found
        .iter()
        .map(|m| m.cast::<Site>().unwrap().slug().to_string())
        .collect();
    assert_eq!(slugs, vec!["google".to_string(), "facebook".to_string()]);
}

#[test]
fn query_all_returns_every_site_in_storage_order() {
    let server = TestServer::new();

    let sites = server.site_repository().query_all().get().unwrap();

    assert_eq!(sites.len(), server.sites().len());
    let slugs: Vec<String> = sites
        .iter()
        .map(|m| m.cast::<Site>().unwrap().slug().to_string())
        .collect();
    assert_eq!(
        slugs,
        vec!["example", "facebook", "google", "shoebox", "twitter"]
    );
}

#[test]
fn query_all_with_a_slugs_filter() {
    let server = TestServer::new();

    let sites = server
        .site_repository()
        .query_all()
        .filter(FilterMap::new().with(
            "slugs",
            vec!["example".to_string(), "shoebox".to_string()],
        ))
        .get()
        .unwrap();

    let slugs: Vec<String> = sites
        .iter()
        .map(|m| m.cast::<Site>().unwrap().slug().to_string())
        .collect();
    assert_eq!(slugs, vec!["example", "shoebox"]);
}

#[test]
fn query_all_with_the_singular_slug_filter() {
    let server = TestServer::new();

    let response = server
        .site_repository()
        .query_all()
        .filter(FilterMap::new().with("slug", "shoebox"))
        .first_or_many()
        .unwrap();
    let CollectionResponse::One(Some(model)) = response else {
        panic!("expected a singular response");
    };
    assert_eq!(model.cast::<Site>().unwrap().slug(), "shoebox");

    let response = server
        .site_repository()
        .query_all()
        .filter(FilterMap::new().with("slug", "unexpected"))
        .first_or_many()
        .unwrap();
    assert!(matches!(response, CollectionResponse::One(None)));

    // no singular key present: the whole collection
    let response = server
        .site_repository()
        .query_all()
        .first_or_many()
        .unwrap();
    assert!(matches!(response, CollectionResponse::Many(models) if models.len() == 5));
}

#[test]
fn query_one_by_id_or_model() {
    let server = TestServer::new();
    let repository = server.site_repository();

    let site = repository
        .query_one(ModelRef::id("google"))
        .first()
        .unwrap()
        .unwrap();
    assert_eq!(site.slug(), "google");

    let again = repository
        .query_one(ModelRef::model(site.clone()))
        .first()
        .unwrap()
        .unwrap();
    assert_eq!(again, site);

    assert!(
        repository
            .query_one(ModelRef::id("foobar"))
            .first()
            .unwrap()
            .is_none()
    );
}

#[test]
fn query_one_with_a_name_filter() {
    let server = TestServer::new();
    let repository = server.site_repository();

    let found = repository
        .query_one(ModelRef::id("example"))
        .filter(FilterMap::new().with("name", "Example"))
        .first()
        .unwrap();
    assert_eq!(found.unwrap().slug(), "example");

    let filtered_out = repository
        .query_one(ModelRef::id("example"))
        .filter(FilterMap::new().with("name", "Google"))
        .first()
        .unwrap();
    assert!(filtered_out.is_none());
}

#[test]
fn create_a_site_with_relationships() {
    let server = TestServer::new();
    let user = server.users().find("john.doe").unwrap();
    let tag = server.tags().find("rust").unwrap();

    let mut expected = Site::new("dancecloud");
    expected.set_domain(Some("dancecloud.com".to_string()));
    expected.set_name(Some("DanceCloud".to_string()));
    expected.set_owner(Some(user.clone()));
    expected.set_tags(vec![tag.clone()]);

    let actual = server
        .site_repository()
        .create()
        .store(&data(serde_json::json!({
            "slug": "dancecloud",
            "domain": "dancecloud.com",
            "name": "DanceCloud",
            "owner": {"type": "users", "id": user.username()},
            "tags": [{"type": "tags", "id": tag.slug()}],
        })))
        .unwrap();

    assert_eq!(actual, expected);
    assert_eq!(server.sites().find("dancecloud"), Some(expected));
}

#[test]
fn update_a_site() {
    let server = TestServer::new();
    let tags = server.tags().all();

    let mut expected = server.sites().find("google").unwrap();
    expected.set_name(Some("Google (UK)".to_string()));
    expected.set_domain(Some("google.co.uk".to_string()));
    expected.set_tags(tags.clone());

    let identifiers: Vec<serde_json::Value> = tags
        .iter()
        .map(|tag| serde_json::json!({"type": "tags", "id": tag.slug()}))
        .collect();

    let actual = server
        .site_repository()
        .update(ModelRef::id("google"))
        .store(&data(serde_json::json!({
            "domain": "google.co.uk",
            "name": "Google (UK)",
            "tags": identifiers,
        })))
        .unwrap();

    assert_eq!(actual, expected);
    assert_eq!(server.sites().find("google"), Some(expected));
}

#[test]
fn update_leaves_absent_fields_untouched() {
    let server = TestServer::new();

    let actual = server
        .site_repository()
        .update(ModelRef::id("example"))
        .store(&data(serde_json::json!({"name": "Example (2)"})))
        .unwrap();

    assert_eq!(actual.name(), Some("Example (2)"));
    assert_eq!(actual.domain(), Some("example.com"));
    assert!(actual.has_owner());
}

#[test]
fn delete_a_site() {
    let server = TestServer::new();
    assert!(server.sites().exists("google"));

    server
        .site_repository()
        .delete(ModelRef::id("google"))
        .unwrap();

    assert!(!server.sites().exists("google"));
}

#[test]
fn query_to_one_reads_the_owner() {
    let server = TestServer::new();
    let repository = server.site_repository();
    let site = server.sites().find("example").unwrap();
    let expected = site.owner().cloned().unwrap();

    let by_id = repository
        .query_to_one(ModelRef::id("example"), "owner")
        .first()
        .unwrap()
        .unwrap();
    assert_eq!(by_id.cast::<User>().unwrap(), expected);

    let by_model = repository
        .query_to_one(ModelRef::model(site), "owner")
        .first()
        .unwrap()
        .unwrap();
    assert_eq!(by_model.cast::<User>().unwrap(), expected);

    assert!(
        repository
            .query_to_one(ModelRef::id("google"), "owner")
            .first()
            .unwrap()
            .is_none()
    );
}

#[test]
fn query_to_many_reads_the_tags() {
    let server = TestServer::new();
    let repository = server.site_repository();
    let site = server.sites().find("shoebox").unwrap();
    let expected = site.tags().to_vec();
    assert_eq!(expected.len(), 2);

    let by_id = repository
        .query_to_many(ModelRef::id("shoebox"), "tags")
        .get()
        .unwrap();
    assert_eq!(cast_tags(&by_id), expected);

    let response = repository
        .query_to_many(ModelRef::model(site), "tags")
        .get_or_paginate(None)
        .unwrap();
    let CollectionResponse::Many(models) = response else {
        panic!("expected the full collection");
    };
    assert_eq!(cast_tags(&models), expected);

    assert!(
        repository
            .query_to_many(ModelRef::id("google"), "tags")
            .get()
            .unwrap()
            .is_empty()
    );
}

#[test]
fn associate_an_owner() {
    let server = TestServer::new();
    let user = server.users().find("jane.doe").unwrap();
    assert!(!server.sites().find("google").unwrap().has_owner());

    let related = server
        .site_repository()
        .modify_to_one(ModelRef::id("google"), "owner")
        .associate(Some(&Identifier::new("users", user.username())))
        .unwrap()
        .unwrap();

    assert_eq!(related.cast::<User>().unwrap(), user);
    assert_eq!(server.sites().find("google").unwrap().owner(), Some(&user));
}

#[test]
fn associate_null_clears_the_owner() {
    let server = TestServer::new();
    assert!(server.sites().find("example").unwrap().has_owner());

    let related = server
        .site_repository()
        .modify_to_one(ModelRef::id("example"), "owner")
        .associate(None)
        .unwrap();

    assert!(related.is_none());
    assert!(!server.sites().find("example").unwrap().has_owner());
}

#[test]
fn sync_replaces_the_tags() {
    let server = TestServer::new();
    let tags = server.tags().all();
    assert!(!server.sites().find("google").unwrap().has_tags());

    let related = server
        .site_repository()
        .modify_to_many(ModelRef::id("google"), "tags")
        .sync(&tag_identifiers(&tags))
        .unwrap();

    assert_eq!(cast_tags(&related), tags);
    assert_eq!(server.sites().find("google").unwrap().tags(), &tags[..]);
}

#[test]
fn attach_is_an_idempotent_union() {
    let server = TestServer::new();
    let tags = server.tags().find_many(&["test", "rust"]);
    let site = server.sites().find("shoebox").unwrap();
    assert_eq!(site.tag_slugs(), vec!["rust", "json-api"]);

    let related = server
        .site_repository()
        .modify_to_many(ModelRef::id("shoebox"), "tags")
        .attach(&tag_identifiers(&tags))
        .unwrap();

    assert_eq!(cast_tags(&related), tags);
    assert_eq!(
        server.sites().find("shoebox").unwrap().tag_slugs(),
        vec!["rust", "json-api", "test"]
    );
}

#[test]
fn detach_removes_exactly_the_named_tags() {
    let server = TestServer::new();
    let tags = server.tags().find_many(&["test", "rust"]);
    assert_eq!(
        server.sites().find("shoebox").unwrap().tag_slugs(),
        vec!["rust", "json-api"]
    );

    let related = server
        .site_repository()
        .modify_to_many(ModelRef::id("shoebox"), "tags")
        .detach(&tag_identifiers(&tags))
        .unwrap();

    assert_eq!(cast_tags(&related), tags);
    assert_eq!(
        server.sites().find("shoebox").unwrap().tag_slugs(),
        vec!["json-api"]
    );
}

// ----------------------------------------------------------------------
// Users
// ----------------------------------------------------------------------

#[test]
fn find_users_through_the_store() {
    let server = TestServer::new();
    let kind = ResourceType::from("users");

    let found = server.store().find(&kind, "john.doe").unwrap();
    assert_eq!(found.cast::<User>().unwrap().username(), "john.doe");
    assert!(server.store().find(&kind, "foobar").is_none());

    let found = server.store().find_many(&[
        Identifier::new("users", "jane.doe"),
        Identifier::new("users", "john.doe"),
        Identifier::new("users", "foobar"),
    ]);
    let usernames: Vec<String> = found
        .iter()
        .map(|m| m.cast::<User>().unwrap().username().to_string())
        .collect();
    assert_eq!(usernames, vec!["jane.doe".to_string(), "john.doe".to_string()]);
}

#[test]
fn query_one_user_passes_through_without_a_read_hook() {
    let server = TestServer::new();
    let repository = server.user_repository();

    let user = repository
        .query_one(ModelRef::id("john.doe"))
        .first()
        .unwrap()
        .unwrap();
    assert_eq!(user.name(), "John Doe");

    assert!(
        repository
            .query_one(ModelRef::id("foobar"))
            .first()
            .unwrap()
            .is_none()
    );
}

#[test]
fn create_a_user() {
    let server = TestServer::new();
    let expected = User::new("frankie", "Frankie Manning");

    let actual = server
        .user_repository()
        .create()
        .store(&data(serde_json::json!({
            "username": "frankie",
            "name": "Frankie Manning",
        })))
        .unwrap();

    assert_eq!(actual, expected);
    assert_eq!(server.users().find("frankie"), Some(expected));
}

#[test]
fn update_a_user() {
    let server = TestServer::new();
    let mut expected = server.users().find("john.doe").unwrap();
    expected.set_name("Johnathan Doe");

    let actual = server
        .user_repository()
        .update(ModelRef::id("john.doe"))
        .store(&data(serde_json::json!({"name": "Johnathan Doe"})))
        .unwrap();

    assert_eq!(actual, expected);
    assert_eq!(server.users().find("john.doe"), Some(expected));
}

#[test]
fn delete_a_user() {
    let server = TestServer::new();
    assert!(server.users().exists("john.doe"));

    server
        .user_repository()
        .delete(ModelRef::id("john.doe"))
        .unwrap();

    assert!(!server.users().exists("john.doe"));
}

#[test]
fn create_with_missing_input_is_a_shape_error() {
    let server = TestServer::new();

    let err = server
        .user_repository()
        .create()
        .store(&data(serde_json::json!({"name": "No Username"})))
        .unwrap_err();

    assert!(err.to_string().contains("expecting username to be present"));
}
