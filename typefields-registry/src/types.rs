//! Host-side types the registry reasons about.
//!
//! The registry only cares about two families of host types, classification
//! (taxonomies) and content (post types), and only about their slugs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a classification term in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermId(pub u64);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TermId {
    fn from(id: u64) -> Self {
        TermId(id)
    }
}

/// Identifier of a content record (post) in the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        PostId(id)
    }
}

/// A host type that can carry custom fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostType {
    /// A taxonomy-like grouping whose instances are terms
    Classification(String),
    /// A record type whose instances are individually stored posts
    Content(String),
}

impl HostType {
    pub fn classification(slug: impl Into<String>) -> Self {
        HostType::Classification(slug.into())
    }

    pub fn content(slug: impl Into<String>) -> Self {
        HostType::Content(slug.into())
    }

    pub fn slug(&self) -> &str {
        match self {
            HostType::Classification(slug) | HostType::Content(slug) => slug,
        }
    }
}

/// Anything the host application knows as a custom type.
///
/// Only types that map onto a [`HostType`] take part in field registration.
/// Everything else is dropped silently by the registry.
pub trait CustomType {
    /// The registry-facing view of this type, if it belongs to a known family.
    fn host_type(&self) -> Option<HostType>;
}

impl CustomType for HostType {
    fn host_type(&self) -> Option<HostType> {
        Some(self.clone())
    }
}

/// A resolved classification term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub taxonomy: String,
    pub name: String,
}

impl Term {
    pub fn new(id: u64, taxonomy: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: TermId(id),
            taxonomy: taxonomy.into(),
            name: name.into(),
        }
    }
}

/// Raw admin screen state as reported by the host.
///
/// Both attributes are optional and may be empty strings; use
/// [`Screen::context`] to interpret them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<String>,
}

impl Screen {
    pub fn for_post_type(post_type: impl Into<String>) -> Self {
        Self {
            post_type: Some(post_type.into()),
            taxonomy: None,
        }
    }

    pub fn for_taxonomy(post_type: impl Into<String>, taxonomy: impl Into<String>) -> Self {
        Self {
            post_type: Some(post_type.into()),
            taxonomy: Some(taxonomy.into()),
        }
    }

    /// Classify this screen relative to the distinguished report post type.
    pub fn context(&self, report_post_type: &str) -> ScreenContext {
        let post_type = non_empty(self.post_type.as_deref());
        match non_empty(self.taxonomy.as_deref()) {
            Some(taxonomy) if post_type == Some(report_post_type) => {
                ScreenContext::ReportTaxonomy(taxonomy.to_string())
            }
            Some(taxonomy) => ScreenContext::Taxonomy(taxonomy.to_string()),
            None => match post_type {
                Some(post_type) => ScreenContext::PostType(post_type.to_string()),
                None => ScreenContext::None,
            },
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Which kind of admin list the current request is rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenContext {
    /// No screen, or a screen without any usable type information
    None,
    /// Term list of a taxonomy attached to the report post type
    ReportTaxonomy(String),
    /// Term list of any other taxonomy
    Taxonomy(String),
    /// Post list of a content type
    PostType(String),
}

impl ScreenContext {
    pub fn from_screen(screen: Option<&Screen>, report_post_type: &str) -> Self {
        screen.map_or(ScreenContext::None, |s| s.context(report_post_type))
    }
}
