//! Built-in field kinds.
//!
//! Markup follows the host's term form layout: a `div.form-field` block on
//! the add form and a `tr.form-field` table row on the edit form.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::field::{CustomField, FieldCore};
use crate::host::MetaStore;
use crate::types::{Term, TermId};

fn add_wrapper(core: &FieldCore, input: &str) -> String {
    format!(
        r#"<div class="form-field term-{key}-wrap"><label for="tag-{key}">{label}</label>{input}</div>"#,
        key = attr(&core.key),
        label = text(&core.label),
    )
}

fn edit_wrapper(core: &FieldCore, input: &str) -> String {
    format!(
        r#"<tr class="form-field term-{key}-wrap"><th scope="row"><label for="tag-{key}">{label}</label></th><td>{input}</td></tr>"#,
        key = attr(&core.key),
        label = text(&core.label),
    )
}

/// Single-line text box.
#[derive(Debug, Clone)]
pub struct TextInput {
    core: FieldCore,
    placeholder: Option<String>,
}

impl TextInput {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            core: FieldCore::new(key, label, default_value),
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    fn input(&self, value: &str) -> String {
        let placeholder = self
            .placeholder
            .as_deref()
            .map(|p| format!(r#" placeholder="{}""#, attr(p)))
            .unwrap_or_default();
        format!(
            r#"<input id="tag-{key}" type="text" name="{key}" value="{value}"{placeholder}>"#,
            key = attr(&self.core.key),
            value = attr(value),
        )
    }
}

impl CustomField for TextInput {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn add_form_markup(&self) -> String {
        add_wrapper(&self.core, &self.input(&self.core.default_value))
    }

    fn edit_form_markup(&self, term: &Term, meta: &dyn MetaStore) -> String {
        edit_wrapper(&self.core, &self.input(&self.value_for(term.id, meta)))
    }

    fn column_content(&self, term_id: TermId, meta: &dyn MetaStore) -> String {
        meta.get_term_meta(term_id, &self.core.key)
            .map(|v| text(&v).into_owned())
            .unwrap_or_default()
    }
}

/// Color value edited through the host's color picker widget.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    core: FieldCore,
}

impl ColorPicker {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            core: FieldCore::new(key, label, default_value),
        }
    }

    fn input(&self, value: &str) -> String {
        format!(
            r#"<input id="tag-{key}" type="text" class="color-picker" name="{key}" value="{value}" data-default-color="{default}">"#,
            key = attr(&self.core.key),
            value = attr(value),
            default = attr(&self.core.default_value),
        )
    }
}

impl CustomField for ColorPicker {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn add_form_markup(&self) -> String {
        add_wrapper(&self.core, &self.input(&self.core.default_value))
    }

    fn edit_form_markup(&self, term: &Term, meta: &dyn MetaStore) -> String {
        edit_wrapper(&self.core, &self.input(&self.value_for(term.id, meta)))
    }

    fn column_content(&self, term_id: TermId, meta: &dyn MetaStore) -> String {
        match meta.get_term_meta(term_id, &self.core.key) {
            Some(color) if !color.is_empty() => format!(
                r#"<span class="color-swatch" style="background-color: {};" title="{}"></span>"#,
                attr(&color),
                attr(&color),
            ),
            _ => String::new(),
        }
    }
}

/// Integer input with optional bounds.
#[derive(Debug, Clone)]
pub struct NumberInput {
    core: FieldCore,
    min: Option<i64>,
    max: Option<i64>,
    step: u32,
}

impl NumberInput {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            core: FieldCore::new(key, label, default_value),
            min: None,
            max: None,
            step: 1,
        }
    }

    pub fn with_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step.max(1);
        self
    }

    fn input(&self, value: &str) -> String {
        let mut bounds = String::new();
        if let Some(min) = self.min {
            bounds.push_str(&format!(r#" min="{min}""#));
        }
        if let Some(max) = self.max {
            bounds.push_str(&format!(r#" max="{max}""#));
        }
        format!(
            r#"<input id="tag-{key}" type="number" name="{key}" value="{value}" step="{step}"{bounds}>"#,
            key = attr(&self.core.key),
            value = attr(value),
            step = self.step,
        )
    }
}

impl CustomField for NumberInput {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn add_form_markup(&self) -> String {
        add_wrapper(&self.core, &self.input(&self.core.default_value))
    }

    fn edit_form_markup(&self, term: &Term, meta: &dyn MetaStore) -> String {
        edit_wrapper(&self.core, &self.input(&self.value_for(term.id, meta)))
    }

    fn column_content(&self, term_id: TermId, meta: &dyn MetaStore) -> String {
        text(&self.value_for(term_id, meta)).into_owned()
    }
}

/// One selectable record of a [`PostSelector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChoice {
    pub id: u64,
    pub title: String,
}

impl PostChoice {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Dropdown referencing a record of another post type.
#[derive(Debug, Clone)]
pub struct PostSelector {
    core: FieldCore,
    post_type: String,
    choices: Vec<PostChoice>,
}

impl PostSelector {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        default_value: impl Into<String>,
        post_type: impl Into<String>,
    ) -> Self {
        Self {
            core: FieldCore::new(key, label, default_value),
            post_type: post_type.into(),
            choices: Vec::new(),
        }
    }

    pub fn with_choices(mut self, choices: impl IntoIterator<Item = PostChoice>) -> Self {
        self.choices = choices.into_iter().collect();
        self
    }

    pub fn post_type(&self) -> &str {
        &self.post_type
    }

    fn title_of(&self, value: &str) -> Option<&str> {
        let id: u64 = value.parse().ok()?;
        self.choices
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.title.as_str())
    }

    fn select(&self, selected: &str) -> String {
        let mut options = String::from(r#"<option value="">- keine Auswahl -</option>"#);
        for choice in &self.choices {
            let id = choice.id.to_string();
            let marker = if id == selected { " selected" } else { "" };
            options.push_str(&format!(
                r#"<option value="{id}"{marker}>{title}</option>"#,
                title = text(&choice.title),
            ));
        }
        format!(
            r#"<select id="tag-{key}" name="{key}" data-post-type="{post_type}">{options}</select>"#,
            key = attr(&self.core.key),
            post_type = attr(&self.post_type),
        )
    }
}

impl CustomField for PostSelector {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn add_form_markup(&self) -> String {
        add_wrapper(&self.core, &self.select(&self.core.default_value))
    }

    fn edit_form_markup(&self, term: &Term, meta: &dyn MetaStore) -> String {
        edit_wrapper(&self.core, &self.select(&self.value_for(term.id, meta)))
    }

    fn column_content(&self, term_id: TermId, meta: &dyn MetaStore) -> String {
        meta.get_term_meta(term_id, &self.core.key)
            .and_then(|v| self.title_of(&v).map(|t| text(t).into_owned()))
            .unwrap_or_default()
    }
}
