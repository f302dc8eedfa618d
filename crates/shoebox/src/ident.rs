//! Identifier-shaping helpers for URI names and inverse-type guessing.

use convert_case::{Case, Casing};

/// Convert a field name into its dasherized (kebab-case) form.
#[must_use]
pub fn dasherize(value: &str) -> String {
    value.to_case(Case::Kebab)
}

/// Naive English pluralization, sufficient for resource-type guessing.
///
/// Irregular nouns are not handled; schemas with irregular names should
/// declare their inverse type explicitly.
#[must_use]
pub fn pluralize(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    if let Some(stem) = value.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if penultimate.is_some_and(|c| !is_vowel(c)) {
            return format!("{stem}ies");
        }
    }

    if value.ends_with('s')
        || value.ends_with('x')
        || value.ends_with('z')
        || value.ends_with("ch")
        || value.ends_with("sh")
    {
        return format!("{value}es");
    }

    format!("{value}s")
}

const fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dasherize_camel_case() {
        assert_eq!(dasherize("superUser"), "super-user");
        assert_eq!(dasherize("blogTags"), "blog-tags");
        assert_eq!(dasherize("owner"), "owner");
    }

    #[test]
    fn pluralize_regular_nouns() {
        assert_eq!(pluralize("owner"), "owners");
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("site"), "sites");
    }

    #[test]
    fn pluralize_sibilant_endings() {
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("branch"), "branches");
    }

    #[test]
    fn pluralize_consonant_y() {
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
    }
}
