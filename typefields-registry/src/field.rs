//! The capability contract every field kind implements.

use std::fmt;

use html_escape::encode_text;

use crate::host::MetaStore;
use crate::types::{PostId, Term, TermId};

/// Key, label and default value shared by all field kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCore {
    /// Stable identifier, unique within one host type's field set
    pub key: String,
    pub label: String,
    pub default_value: String,
}

impl FieldCore {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            default_value: default_value.into(),
        }
    }
}

/// A typed, keyed piece of metadata attachable to a host type.
///
/// Implementations produce markup; the registry decides where and when.
pub trait CustomField: fmt::Debug {
    fn core(&self) -> &FieldCore;

    fn key(&self) -> &str {
        &self.core().key
    }

    fn label(&self) -> &str {
        &self.core().label
    }

    fn default_value(&self) -> &str {
        &self.core().default_value
    }

    /// Markup for the "add new term" form.
    fn add_form_markup(&self) -> String;

    /// Markup for the "edit term" form, pre-filled from `term`.
    fn edit_form_markup(&self, term: &Term, meta: &dyn MetaStore) -> String;

    /// Content of this field's column in the term list.
    fn column_content(&self, term_id: TermId, meta: &dyn MetaStore) -> String;

    /// Content of this field's column in a post list.
    fn post_column_content(&self, post_id: PostId, meta: &dyn MetaStore) -> String {
        meta.get_post_meta(post_id, self.key())
            .map(|v| encode_text(&v).into_owned())
            .unwrap_or_default()
    }

    /// Stored value for `term_id`, falling back to the declared default.
    fn value_for(&self, term_id: TermId, meta: &dyn MetaStore) -> String {
        meta.get_term_meta(term_id, self.key())
            .unwrap_or_else(|| self.default_value().to_string())
    }
}
