//! FieldRegistry — main API surface.
//!
//! Keeps the custom fields of classification and content types and binds
//! the matching render/save hooks into the host the first time a slug gets
//! a field. Rendering lives in [`crate::render`], saving in [`crate::persist`].

use tracing::{debug, trace};

use crate::config::RegistryConfig;
use crate::field::CustomField;
use crate::hooks::{Callback, HookName, HookRegistrar};
use crate::kinds::{ColorPicker, NumberInput, PostSelector, TextInput};
use crate::store::{FieldSet, FieldStore};
use crate::types::{CustomType, HostType};

/// Registry of custom fields per host type.
///
/// Built once during plugin setup and handed by reference to whatever
/// answers host hooks afterwards.
#[derive(Debug)]
pub struct FieldRegistry {
    config: RegistryConfig,
    taxonomy_fields: FieldStore,
    post_type_fields: FieldStore,
}

impl FieldRegistry {
    /// Create a registry and subscribe its term save handler.
    pub fn new(hooks: &mut dyn HookRegistrar) -> Self {
        Self::with_config(RegistryConfig::default(), hooks)
    }

    pub fn with_config(config: RegistryConfig, hooks: &mut dyn HookRegistrar) -> Self {
        let priority = config.hook_priority;
        hooks.add_action(HookName::edited_term(), Callback::SaveTerm, priority, 3);
        hooks.add_action(HookName::created_term(), Callback::SaveTerm, priority, 3);

        Self {
            config,
            taxonomy_fields: FieldStore::new(),
            post_type_fields: FieldStore::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn add_text_input(
        &mut self,
        hooks: &mut dyn HookRegistrar,
        custom_type: &dyn CustomType,
        field: TextInput,
    ) {
        self.add_field(hooks, custom_type, Box::new(field));
    }

    pub fn add_color_picker(
        &mut self,
        hooks: &mut dyn HookRegistrar,
        custom_type: &dyn CustomType,
        field: ColorPicker,
    ) {
        self.add_field(hooks, custom_type, Box::new(field));
    }

    pub fn add_number_input(
        &mut self,
        hooks: &mut dyn HookRegistrar,
        custom_type: &dyn CustomType,
        field: NumberInput,
    ) {
        self.add_field(hooks, custom_type, Box::new(field));
    }

    pub fn add_post_selector(
        &mut self,
        hooks: &mut dyn HookRegistrar,
        custom_type: &dyn CustomType,
        field: PostSelector,
    ) {
        self.add_field(hooks, custom_type, Box::new(field));
    }

    /// Register `field` for `custom_type`.
    ///
    /// The first field of a slug binds that slug's hooks; later fields reuse
    /// them. A field with an already registered key replaces the old one.
    /// Types outside the two known families are ignored.
    pub fn add_field(
        &mut self,
        hooks: &mut dyn HookRegistrar,
        custom_type: &dyn CustomType,
        field: Box<dyn CustomField>,
    ) {
        let Some(host_type) = custom_type.host_type() else {
            trace!(key = %field.key(), "ignoring field for unsupported custom type");
            return;
        };

        let priority = self.config.hook_priority;
        match &host_type {
            HostType::Classification(taxonomy) => {
                if !self.taxonomy_fields.has(taxonomy) {
                    bind_taxonomy(hooks, taxonomy, priority);
                }
                let outcome = self.taxonomy_fields.insert(taxonomy, field);
                debug!(taxonomy = %taxonomy, replaced = outcome.replaced, "taxonomy field registered");
            }
            HostType::Content(post_type) => {
                if !self.post_type_fields.has(post_type) {
                    bind_post_type(hooks, post_type, priority);
                }
                let outcome = self.post_type_fields.insert(post_type, field);
                debug!(post_type = %post_type, replaced = outcome.replaced, "post type field registered");
            }
        }
    }

    // --- Queries ---

    pub fn has_taxonomy(&self, taxonomy: &str) -> bool {
        self.taxonomy_fields.has(taxonomy)
    }

    pub fn has_post_type(&self, post_type: &str) -> bool {
        self.post_type_fields.has(post_type)
    }

    pub fn taxonomy_fields(&self, taxonomy: &str) -> Option<&FieldSet> {
        self.taxonomy_fields.fields(taxonomy)
    }

    pub fn post_type_fields(&self, post_type: &str) -> Option<&FieldSet> {
        self.post_type_fields.fields(post_type)
    }

    pub fn taxonomy_field(&self, taxonomy: &str, key: &str) -> Option<&dyn CustomField> {
        self.taxonomy_fields.field(taxonomy, key)
    }

    pub fn post_type_field(&self, post_type: &str, key: &str) -> Option<&dyn CustomField> {
        self.post_type_fields.field(post_type, key)
    }

    /// Number of fields registered for `host_type`.
    pub fn field_count(&self, host_type: &HostType) -> usize {
        self.store_for(host_type).count(host_type.slug())
    }

    /// Field keys of `host_type` in declaration order.
    pub fn field_keys(&self, host_type: &HostType) -> Vec<String> {
        self.store_for(host_type).keys(host_type.slug())
    }

    /// Whether the hooks for `host_type` have been installed.
    pub fn is_bound(&self, host_type: &HostType) -> bool {
        // A slug is bound exactly when it holds at least one field.
        self.store_for(host_type).has(host_type.slug())
    }

    fn store_for(&self, host_type: &HostType) -> &FieldStore {
        match host_type {
            HostType::Classification(_) => &self.taxonomy_fields,
            HostType::Content(_) => &self.post_type_fields,
        }
    }
}

fn bind_taxonomy(hooks: &mut dyn HookRegistrar, taxonomy: &str, priority: i32) {
    hooks.add_action(
        HookName::add_form_fields(taxonomy),
        Callback::AddFormFields,
        priority,
        1,
    );
    hooks.add_action(
        HookName::edit_form_fields(taxonomy),
        Callback::EditFormFields,
        priority,
        2,
    );
    hooks.add_filter(
        HookName::manage_columns(taxonomy),
        Callback::CustomColumns,
        priority,
        1,
    );
    hooks.add_filter(
        HookName::taxonomy_custom_column(taxonomy),
        Callback::TaxonomyColumnContent,
        priority,
        3,
    );
    debug!(taxonomy = %taxonomy, "taxonomy hooks bound");
}

fn bind_post_type(hooks: &mut dyn HookRegistrar, post_type: &str, priority: i32) {
    hooks.add_filter(
        HookName::manage_columns(post_type),
        Callback::CustomColumns,
        priority,
        1,
    );
    hooks.add_action(
        HookName::posts_custom_column(post_type),
        Callback::PostColumnContent,
        priority,
        2,
    );
    debug!(post_type = %post_type, "post type hooks bound");
}
