use super::*;
use crate::{model::ResourceType, page::PageSettings};

#[test]
fn to_one_defaults() {
    let field = Relation::to_one("user");

    assert_eq!(field.name(), "user");
    assert_eq!(field.inverse(), ResourceType::from("users"));
    assert_eq!(field.all_inverse(), vec![ResourceType::from("users")]);
    assert_eq!(field.uri_name(), "user");
    assert!(field.is_to_one());
    assert!(!field.is_to_many());
}

#[test]
fn to_one_guesses_dasherized_plural() {
    let field = Relation::to_one("superUser");

    assert_eq!(field.inverse(), ResourceType::from("super-users"));
}

#[test]
fn to_many_defaults() {
    let field = Relation::to_many("tags");

    assert_eq!(field.inverse(), ResourceType::from("tags"));
    assert_eq!(field.all_inverse(), vec![ResourceType::from("tags")]);
    assert_eq!(field.uri_name(), "tags");
    assert!(field.is_to_many());
    assert!(!field.is_to_one());
}

#[test]
fn explicit_type_overrides_the_guess() {
    let field = Relation::to_one("user").with_type("super-users");

    assert_eq!(field.inverse(), ResourceType::from("super-users"));
    assert_eq!(field.all_inverse(), vec![ResourceType::from("super-users")]);
}

#[test]
fn polymorphic_types_preserve_the_singular_inverse() {
    let field = Relation::to_one("user")
        .with_type("super-users")
        .with_types(["super", "users"]);

    assert_eq!(field.inverse(), ResourceType::from("super-users"));
    assert_eq!(
        field.all_inverse(),
        vec![ResourceType::from("super"), ResourceType::from("users")]
    );
}

#[test]
fn polymorphic_types_without_a_singular_type_fall_back_to_the_first_entry() {
    let field = Relation::to_many("media").with_types(["images", "videos"]);

    assert_eq!(field.inverse(), ResourceType::from("images"));
    assert_eq!(
        field.all_inverse(),
        vec![ResourceType::from("images"), ResourceType::from("videos")]
    );
}

#[test]
#[should_panic(expected = "at least two inverse resource types")]
fn polymorphic_types_require_two_entries() {
    let _ = Relation::to_one("user").with_types(["users"]);
}

#[test]
fn uri_name_overrides() {
    let field = Relation::to_one("superUser");
    assert_eq!(field.uri_name(), "super-user");

    let retained = Relation::to_one("superUser").retain_field_name();
    assert_eq!(retained.uri_name(), "superUser");

    let explicit = Relation::to_one("superUser").with_uri_name("some-other-name");
    assert_eq!(explicit.uri_name(), "some-other-name");
}

#[test]
fn relation_flags() {
    let field = Relation::to_many("tags");
    assert!(field.is_include_path());
    assert!(!field.is_filterable());
    assert!(field.is_sparse_field());
    assert!(!field.is_validated());

    let field = Relation::to_many("tags")
        .cannot_eager_load()
        .filterable()
        .must_validate()
        .not_sparse_field();
    assert!(!field.is_include_path());
    assert!(field.is_filterable());
    assert!(!field.is_sparse_field());
    assert!(field.is_validated());
}

#[test]
fn attribute_and_id_fields() {
    let attribute = Attribute::new("domain").sortable();
    assert_eq!(attribute.name(), "domain");
    assert!(attribute.is_sortable());
    assert!(attribute.is_sparse_field());
    assert!(!Attribute::new("domain").not_sparse_field().is_sparse_field());

    let id = IdField::new().sortable();
    assert_eq!(id.name(), "id");
    assert!(id.is_sortable());
    assert!(!id.is_sparse_field());
}

#[test]
fn schema_looks_up_relations_by_name() {
    let schema = Schema::new("sites")
        .field(IdField::new())
        .field(Attribute::new("domain"))
        .field(Relation::to_one("owner").with_type("users"))
        .field(Relation::to_many("tags"));

    assert_eq!(schema.kind(), &ResourceType::from("sites"));
    assert_eq!(schema.fields().len(), 4);
    assert!(schema.relation("owner").unwrap().is_to_one());
    assert!(schema.relation("tags").unwrap().is_to_many());

    let err = schema.relation("domain").unwrap_err();
    assert!(err.to_string().contains("do not define relation domain"));
}

#[test]
fn schema_filters_and_pagination() {
    let schema = Schema::new("sites")
        .filter(FilterDef::new("slug").singular())
        .filter(FilterDef::new("slugs"))
        .with_pagination(PageSettings::default());

    let singular: Vec<&str> = schema
        .filters()
        .iter()
        .filter(|f| f.is_singular())
        .map(FilterDef::key)
        .collect();

    assert_eq!(singular, vec!["slug"]);
    assert!(schema.pagination().is_some());
    assert!(Schema::new("tags").pagination().is_none());
}
