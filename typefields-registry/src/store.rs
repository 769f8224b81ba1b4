//! In-memory field store.
//!
//! One ordered map per host-type family: slug → key → field. Insertion order
//! drives both form order and column order.

use indexmap::IndexMap;

use crate::field::CustomField;

/// The fields registered for one slug, in declaration order.
pub type FieldSet = IndexMap<String, Box<dyn CustomField>>;

/// Fields of one host-type family, keyed by slug.
#[derive(Debug, Default)]
pub struct FieldStore {
    slugs: IndexMap<String, FieldSet>,
}

/// Outcome of [`FieldStore::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
    /// The slug had no entry before this insert
    pub new_slug: bool,
    /// A field with the same key was replaced
    pub replaced: bool,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `field` under its key, replacing any previous field with that key.
    ///
    /// A replaced field keeps its original position.
    pub fn insert(&mut self, slug: &str, field: Box<dyn CustomField>) -> Inserted {
        let new_slug = !self.slugs.contains_key(slug);
        let set = self.slugs.entry(slug.to_string()).or_default();
        let replaced = set.insert(field.key().to_string(), field).is_some();
        Inserted { new_slug, replaced }
    }

    /// Fields for `slug`, or `None` if the slug is unknown or has no fields.
    pub fn fields(&self, slug: &str) -> Option<&FieldSet> {
        self.slugs.get(slug).filter(|set| !set.is_empty())
    }

    pub fn field(&self, slug: &str, key: &str) -> Option<&dyn CustomField> {
        self.fields(slug)?.get(key).map(|f| &**f)
    }

    pub fn has(&self, slug: &str) -> bool {
        self.fields(slug).is_some()
    }

    pub fn count(&self, slug: &str) -> usize {
        self.fields(slug).map_or(0, |set| set.len())
    }

    pub fn keys(&self, slug: &str) -> Vec<String> {
        self.fields(slug)
            .map(|set| set.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Slugs with at least one field, in first-registration order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.slugs
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(slug, _)| slug.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::TextInput;

    fn text(key: &str, label: &str) -> Box<dyn CustomField> {
        Box::new(TextInput::new(key, label, ""))
    }

    #[test]
    fn first_insert_reports_new_slug() {
        let mut store = FieldStore::new();
        let first = store.insert("fahrzeug", text("a", "A"));
        let second = store.insert("fahrzeug", text("b", "B"));

        assert!(first.new_slug);
        assert!(!second.new_slug);
        assert!(!second.replaced);
        assert_eq!(store.count("fahrzeug"), 2);
    }

    #[test]
    fn same_key_overwrites_in_place() {
        let mut store = FieldStore::new();
        store.insert("fahrzeug", text("a", "First"));
        store.insert("fahrzeug", text("b", "B"));
        let outcome = store.insert("fahrzeug", text("a", "Second"));

        assert!(outcome.replaced);
        assert_eq!(store.count("fahrzeug"), 2);
        assert_eq!(store.field("fahrzeug", "a").unwrap().label(), "Second");
        assert_eq!(store.keys("fahrzeug"), vec!["a", "b"]);
    }

    #[test]
    fn unknown_slug_is_empty() {
        let store = FieldStore::new();
        assert!(!store.has("nope"));
        assert!(store.fields("nope").is_none());
        assert!(store.field("nope", "a").is_none());
        assert!(store.keys("nope").is_empty());
        assert_eq!(store.slugs().count(), 0);
    }
}
