//! Collaborator contracts consumed from the host application.
//!
//! Each capability is its own trait so routers only ask for what they use.
//! [`Host`] bundles them for [`FieldRegistry::dispatch`](crate::FieldRegistry::dispatch).

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::types::{PostId, Screen, Term, TermId};

/// Screen discovery for the current admin request.
pub trait Screens {
    fn current_screen(&self) -> Option<Screen>;
}

/// Error reported by the host while resolving an entity or storing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError(pub String);

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entity resolution.
///
/// Both lookups return `Ok(None)` when the entity does not exist and `Err`
/// when the host reports a failure for that id.
pub trait Entities {
    fn get_term(&self, id: TermId) -> Result<Option<Term>, HostError>;

    /// Post type slug of a content record.
    fn get_post_type(&self, id: PostId) -> Result<Option<String>, HostError>;
}

/// Metadata storage for terms and posts.
pub trait MetaStore {
    fn get_term_meta(&self, term_id: TermId, key: &str) -> Option<String>;

    fn get_post_meta(&self, post_id: PostId, key: &str) -> Option<String>;

    /// Keyed upsert of a single value.
    fn update_term_meta(&mut self, term_id: TermId, key: &str, value: &str)
        -> Result<(), HostError>;
}

/// Read access to the submitted form of the current request.
pub trait FormInput {
    /// The sanitized plain-text value for `key`, or `None` if nothing usable was posted.
    fn read_form_field(&self, key: &str) -> Option<String>;
}

/// Everything the registry needs from the host to answer a dispatched hook.
pub trait Host: Screens + Entities + MetaStore + FormInput {}

impl<T: Screens + Entities + MetaStore + FormInput> Host for T {}

// A `<` followed by whitespace is plain text, not a tag.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^\s>][^>]*>?").expect("tag pattern is valid"));

/// Reduce a posted value to plain text.
///
/// Strips markup tags and NUL bytes, encodes quotes and trims the result.
/// Returns `None` when nothing but whitespace is left.
pub fn sanitize_text(raw: &str) -> Option<String> {
    let without_tags = TAG.replace_all(raw, "");
    let cleaned: String = without_tags
        .chars()
        .filter(|c| *c != '\0')
        .collect::<String>()
        .replace('"', "&#34;")
        .replace('\'', "&#39;");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Posted form values of one request, sanitized on read.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    values: IndexMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw posted value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FormInput for FormData {
    fn read_form_field(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(|raw| sanitize_text(raw))
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
