//! Render routing: term forms, list columns and column cells.
//!
//! Every entry point degrades to "no output" or "input unchanged" when the
//! slug, screen or entity it depends on is unknown.

use std::fmt;

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::error::Result;
use crate::field::CustomField;
use crate::host::{Entities, MetaStore, Screens};
use crate::registry::FieldRegistry;
use crate::types::{PostId, ScreenContext, Term, TermId};

/// Ordered list-table headers: column name → header label.
pub type Columns = IndexMap<String, String>;

impl FieldRegistry {
    /// Emit the add-form markup of every field of `taxonomy`, in declaration order.
    pub fn on_add_form_fields(&self, taxonomy: &str, out: &mut dyn fmt::Write) -> Result<()> {
        let Some(fields) = self.taxonomy_fields(taxonomy) else {
            trace!(taxonomy = %taxonomy, "no fields for add form");
            return Ok(());
        };
        for field in fields.values() {
            out.write_str(&field.add_form_markup())?;
        }
        Ok(())
    }

    /// Emit the edit-form markup of every field of `taxonomy` for `term`.
    pub fn on_edit_form_fields(
        &self,
        term: &Term,
        taxonomy: &str,
        meta: &dyn MetaStore,
        out: &mut dyn fmt::Write,
    ) -> Result<()> {
        let Some(fields) = self.taxonomy_fields(taxonomy) else {
            trace!(taxonomy = %taxonomy, "no fields for edit form");
            return Ok(());
        };
        for field in fields.values() {
            out.write_str(&field.edit_form_markup(term, meta))?;
        }
        Ok(())
    }

    /// Add one column per registered field to the headers of the current list screen.
    pub fn on_custom_columns(&self, screens: &dyn Screens, columns: Columns) -> Columns {
        let screen = screens.current_screen();
        match ScreenContext::from_screen(screen.as_ref(), &self.config().report_post_type) {
            ScreenContext::None => {
                trace!("no screen, columns unchanged");
                columns
            }
            ScreenContext::ReportTaxonomy(taxonomy) => self.splice_after_anchor(&taxonomy, columns),
            ScreenContext::Taxonomy(taxonomy) => self.insert_at_anchor(&taxonomy, columns),
            ScreenContext::PostType(post_type) => self.append_columns(&post_type, columns),
        }
    }

    /// Insert the taxonomy's columns right after the anchor column, or at
    /// the end when the anchor is missing.
    fn splice_after_anchor(&self, taxonomy: &str, columns: Columns) -> Columns {
        let Some(fields) = self.taxonomy_fields(taxonomy) else {
            return columns;
        };

        let index = columns
            .get_index_of(self.config().anchor_column.as_str())
            .map_or(columns.len(), |i| i + 1);

        let mut spliced = Columns::with_capacity(columns.len() + fields.len());
        let mut rest = columns.into_iter();
        spliced.extend(rest.by_ref().take(index));
        spliced.extend(fields.values().map(|f| header(&**f)));
        spliced.extend(rest);
        spliced
    }

    /// Copy the headers and emit the taxonomy's columns as soon as the anchor
    /// column has been copied. Without an anchor nothing is added.
    fn insert_at_anchor(&self, taxonomy: &str, columns: Columns) -> Columns {
        let Some(fields) = self.taxonomy_fields(taxonomy) else {
            return columns;
        };

        let anchor = self.config().anchor_column.as_str();
        let mut filtered = Columns::with_capacity(columns.len() + fields.len());
        for (name, label) in columns {
            let is_anchor = name == anchor;
            filtered.insert(name, label);
            if is_anchor {
                filtered.extend(fields.values().map(|f| header(&**f)));
            }
        }
        filtered
    }

    fn append_columns(&self, post_type: &str, mut columns: Columns) -> Columns {
        if let Some(fields) = self.post_type_fields(post_type) {
            columns.extend(fields.values().map(|f| header(&**f)));
        }
        columns
    }

    /// Content of a taxonomy list cell.
    ///
    /// This is a filter: the host passes the current cell content and uses
    /// the return value. Any unknown term, taxonomy or column yields `""`.
    pub fn on_taxonomy_column_content(
        &self,
        entities: &dyn Entities,
        meta: &dyn MetaStore,
        _content: &str,
        column_name: &str,
        term_id: TermId,
    ) -> String {
        let term = match entities.get_term(term_id) {
            Ok(Some(term)) => term,
            Ok(None) => {
                trace!(%term_id, "term not found");
                return String::new();
            }
            Err(e) => {
                warn!(%term_id, error = %e, "term lookup failed");
                return String::new();
            }
        };

        let Some(fields) = self.taxonomy_fields(&term.taxonomy) else {
            return String::new();
        };
        let Some(field) = fields.get(column_name) else {
            trace!(taxonomy = %term.taxonomy, column = %column_name, "not a field column");
            return String::new();
        };
        field.column_content(term_id, meta)
    }

    /// Content of a post list cell.
    ///
    /// Unlike the taxonomy variant this is an action: the host discards any
    /// return value, so the content is written straight to `out`.
    pub fn on_post_column_content(
        &self,
        entities: &dyn Entities,
        meta: &dyn MetaStore,
        column_name: &str,
        post_id: PostId,
        out: &mut dyn fmt::Write,
    ) -> Result<()> {
        let post_type = match entities.get_post_type(post_id) {
            Ok(Some(post_type)) => post_type,
            Ok(None) => {
                trace!(%post_id, "post not found");
                return Ok(());
            }
            Err(e) => {
                warn!(%post_id, error = %e, "post lookup failed");
                return Ok(());
            }
        };

        let Some(field) = self.post_type_field(&post_type, column_name) else {
            trace!(post_type = %post_type, column = %column_name, "not a field column");
            return Ok(());
        };
        out.write_str(&field.post_column_content(post_id, meta))?;
        Ok(())
    }
}

fn header(field: &dyn CustomField) -> (String, String) {
    (field.key().to_string(), field.label().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::Subscription;
    use crate::host::HostError;
    use crate::kinds::{ColorPicker, TextInput};
    use crate::types::{HostType, Screen};
    use std::collections::HashMap;

    struct Fixed(Option<Screen>);

    impl Screens for Fixed {
        fn current_screen(&self) -> Option<Screen> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct World {
        terms: HashMap<TermId, std::result::Result<Term, HostError>>,
        posts: HashMap<PostId, std::result::Result<String, HostError>>,
        meta: HashMap<(TermId, String), String>,
        post_meta: HashMap<(PostId, String), String>,
    }

    impl Entities for World {
        fn get_term(&self, id: TermId) -> std::result::Result<Option<Term>, HostError> {
            self.terms.get(&id).cloned().transpose()
        }

        fn get_post_type(&self, id: PostId) -> std::result::Result<Option<String>, HostError> {
            self.posts.get(&id).cloned().transpose()
        }
    }

    impl MetaStore for World {
        fn get_term_meta(&self, term_id: TermId, key: &str) -> Option<String> {
            self.meta.get(&(term_id, key.to_string())).cloned()
        }

        fn get_post_meta(&self, post_id: PostId, key: &str) -> Option<String> {
            self.post_meta.get(&(post_id, key.to_string())).cloned()
        }

        fn update_term_meta(
            &mut self,
            term_id: TermId,
            key: &str,
            value: &str,
        ) -> std::result::Result<(), HostError> {
            self.meta.insert((term_id, key.to_string()), value.to_string());
            Ok(())
        }
    }

    fn registry() -> FieldRegistry {
        let mut hooks: Vec<Subscription> = Vec::new();
        let mut registry = FieldRegistry::new(&mut hooks);
        let art = HostType::classification("einsatzart");
        registry.add_color_picker(&mut hooks, &art, ColorPicker::new("color", "Farbe", "#000000"));
        registry.add_text_input(&mut hooks, &art, TextInput::new("icon", "Icon", ""));
        let einsatz = HostType::content("einsatz");
        registry.add_text_input(&mut hooks, &einsatz, TextInput::new("kurz", "Kurz", ""));
        registry
    }

    fn headers(names: &[&str]) -> Columns {
        names
            .iter()
            .map(|n| (n.to_string(), n.to_uppercase()))
            .collect()
    }

    fn names(columns: &Columns) -> Vec<&str> {
        columns.keys().map(String::as_str).collect()
    }

    #[test]
    fn report_taxonomy_splices_after_description() {
        let screens = Fixed(Some(Screen::for_taxonomy("einsatz", "einsatzart")));
        let result = registry().on_custom_columns(&screens, headers(&["title", "description", "date"]));
        assert_eq!(names(&result), ["title", "description", "color", "icon", "date"]);
        assert_eq!(result["color"], "Farbe");
    }

    #[test]
    fn report_taxonomy_without_description_appends() {
        let screens = Fixed(Some(Screen::for_taxonomy("einsatz", "einsatzart")));
        let result = registry().on_custom_columns(&screens, headers(&["title", "date"]));
        assert_eq!(names(&result), ["title", "date", "color", "icon"]);
    }

    #[test]
    fn other_taxonomy_inserts_while_scanning() {
        let screens = Fixed(Some(Screen::for_taxonomy("post", "einsatzart")));
        let result = registry().on_custom_columns(&screens, headers(&["title", "description", "date"]));
        assert_eq!(names(&result), ["title", "description", "color", "icon", "date"]);
    }

    #[test]
    fn other_taxonomy_without_description_is_unchanged() {
        let screens = Fixed(Some(Screen::for_taxonomy("post", "einsatzart")));
        let result = registry().on_custom_columns(&screens, headers(&["title", "date"]));
        assert_eq!(names(&result), ["title", "date"]);
    }

    #[test]
    fn missing_screen_leaves_columns_alone() {
        let result = registry().on_custom_columns(&Fixed(None), headers(&["title", "description"]));
        assert_eq!(names(&result), ["title", "description"]);
    }

    #[test]
    fn unknown_taxonomy_leaves_columns_alone() {
        let screens = Fixed(Some(Screen::for_taxonomy("einsatz", "fahrzeug")));
        let result = registry().on_custom_columns(&screens, headers(&["title", "description"]));
        assert_eq!(names(&result), ["title", "description"]);
    }

    #[test]
    fn other_taxonomy_without_fields_is_unchanged() {
        let screens = Fixed(Some(Screen::for_taxonomy("post", "category")));
        let result = registry().on_custom_columns(&screens, headers(&["title", "description", "date"]));
        assert_eq!(names(&result), ["title", "description", "date"]);
    }

    #[test]
    fn post_type_screen_appends() {
        let screens = Fixed(Some(Screen::for_post_type("einsatz")));
        let result = registry().on_custom_columns(&screens, headers(&["title", "date"]));
        assert_eq!(names(&result), ["title", "date", "kurz"]);
    }

    #[test]
    fn unknown_post_type_leaves_columns_alone() {
        let screens = Fixed(Some(Screen::for_post_type("page")));
        let result = registry().on_custom_columns(&screens, headers(&["title", "date"]));
        assert_eq!(names(&result), ["title", "date"]);
    }

    #[test]
    fn add_form_renders_in_declaration_order() {
        let mut out = String::new();
        registry().on_add_form_fields("einsatzart", &mut out).unwrap();
        let color = out.find(r#"name="color""#).unwrap();
        let icon = out.find(r#"name="icon""#).unwrap();
        assert!(color < icon);
    }

    #[test]
    fn add_form_for_unknown_taxonomy_is_empty() {
        let mut out = String::new();
        registry().on_add_form_fields("fahrzeug", &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn edit_form_uses_stored_values() {
        let mut world = World::default();
        world
            .update_term_meta(TermId(4), "icon", "fire")
            .unwrap();
        let term = Term::new(4, "einsatzart", "Brand");

        let mut out = String::new();
        registry()
            .on_edit_form_fields(&term, "einsatzart", &world, &mut out)
            .unwrap();
        assert_eq!(out.matches("<tr").count(), 2);
        assert!(out.contains(r#"value="fire""#));
    }

    #[test]
    fn edit_form_for_unknown_taxonomy_is_empty() {
        let world = World::default();
        let term = Term::new(5, "fahrzeug", "HLF");

        let mut out = String::new();
        registry()
            .on_edit_form_fields(&term, "fahrzeug", &world, &mut out)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn post_cell_guards() {
        let mut world = World::default();
        world.posts.insert(PostId(1), Ok("einsatz".into()));
        world.posts.insert(PostId(2), Ok("page".into()));
        world
            .posts
            .insert(PostId(3), Err(HostError("invalid post".into())));
        world
            .post_meta
            .insert((PostId(1), "kurz".into()), "B3".into());
        world
            .post_meta
            .insert((PostId(2), "kurz".into()), "B3".into());

        let registry = registry();
        let cell = |column: &str, id: u64| {
            let mut out = String::new();
            registry
                .on_post_column_content(&world, &world, column, PostId(id), &mut out)
                .unwrap();
            out
        };

        assert_eq!(cell("kurz", 1), "B3");
        assert_eq!(cell("title", 1), "");
        assert_eq!(cell("kurz", 2), "");
        assert_eq!(cell("kurz", 3), "");
        assert_eq!(cell("kurz", 99), "");
    }

    #[test]
    fn taxonomy_cell_guards() {
        let mut world = World::default();
        world
            .terms
            .insert(TermId(1), Ok(Term::new(1, "einsatzart", "Brand")));
        world
            .terms
            .insert(TermId(2), Ok(Term::new(2, "fahrzeug", "HLF")));
        world
            .terms
            .insert(TermId(3), Err(HostError("invalid taxonomy".into())));
        world.update_term_meta(TermId(1), "icon", "fire").unwrap();

        let registry = registry();
        let cell = |column: &str, id: u64| {
            registry.on_taxonomy_column_content(&world, &world, "", column, TermId(id))
        };

        assert_eq!(cell("icon", 1), "fire");
        assert_eq!(cell("name", 1), "");
        assert_eq!(cell("icon", 2), "");
        assert_eq!(cell("icon", 3), "");
        assert_eq!(cell("icon", 99), "");
    }
}
