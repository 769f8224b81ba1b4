//! Extension-point vocabulary shared with the host.
//!
//! The registry never stores closures in the host. It subscribes a
//! [`Callback`] tag under a [`HookName`]; when the host fires that hook it
//! hands the tag back to [`FieldRegistry::dispatch`](crate::FieldRegistry::dispatch).

use std::fmt;

/// Name of a host extension point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookName(String);

impl HookName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fired after a term has been created.
    pub fn created_term() -> Self {
        Self::new("created_term")
    }

    /// Fired after a term has been updated.
    pub fn edited_term() -> Self {
        Self::new("edited_term")
    }

    pub fn add_form_fields(taxonomy: &str) -> Self {
        Self(format!("{taxonomy}_add_form_fields"))
    }

    pub fn edit_form_fields(taxonomy: &str) -> Self {
        Self(format!("{taxonomy}_edit_form_fields"))
    }

    /// Column list filter; shared naming scheme for taxonomies and post types.
    pub fn manage_columns(slug: &str) -> Self {
        Self(format!("manage_edit-{slug}_columns"))
    }

    pub fn taxonomy_custom_column(taxonomy: &str) -> Self {
        Self(format!("manage_{taxonomy}_custom_column"))
    }

    pub fn posts_custom_column(post_type: &str) -> Self {
        Self(format!("manage_{post_type}_posts_custom_column"))
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the host expects a return value from the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    /// Side effects only, return value discarded
    Action,
    /// Receives a value and must return the (possibly modified) value
    Filter,
}

/// The registry entry point a subscription routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callback {
    AddFormFields,
    EditFormFields,
    CustomColumns,
    TaxonomyColumnContent,
    PostColumnContent,
    SaveTerm,
}

/// One subscription request handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub hook: HookName,
    pub kind: HookKind,
    pub callback: Callback,
    pub priority: i32,
    pub accepted_args: u8,
}

/// The host's extension-point subscription facility.
///
/// Subscriptions are fire-and-forget and live for the rest of the process.
pub trait HookRegistrar {
    fn subscribe(&mut self, subscription: Subscription);

    fn add_action(&mut self, hook: HookName, callback: Callback, priority: i32, accepted_args: u8) {
        self.subscribe(Subscription {
            hook,
            kind: HookKind::Action,
            callback,
            priority,
            accepted_args,
        });
    }

    fn add_filter(&mut self, hook: HookName, callback: Callback, priority: i32, accepted_args: u8) {
        self.subscribe(Subscription {
            hook,
            kind: HookKind::Filter,
            callback,
            priority,
            accepted_args,
        });
    }
}

impl HookRegistrar for Vec<Subscription> {
    fn subscribe(&mut self, subscription: Subscription) {
        self.push(subscription);
    }
}
