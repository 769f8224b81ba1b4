//! Entry point for the host's hook mechanism.
//!
//! When a subscribed hook fires, the host calls [`FieldRegistry::dispatch`]
//! with the [`Callback`] it stored and the arguments of that hook.

use crate::error::{FieldsError, Result};
use crate::hooks::Callback;
use crate::host::Host;
use crate::persist::store_term_values;
use crate::registry::FieldRegistry;
use crate::render::Columns;
use crate::types::{PostId, Term, TermId};

/// Arguments the host passes along with a fired hook.
#[derive(Debug, Clone)]
pub enum HookArgs {
    /// `{taxonomy}_add_form_fields`
    AddForm { taxonomy: String },
    /// `{taxonomy}_edit_form_fields`
    EditForm { term: Term, taxonomy: String },
    /// `manage_edit-{slug}_columns`
    Columns(Columns),
    /// `manage_{taxonomy}_custom_column`
    TermCell {
        content: String,
        column_name: String,
        term_id: TermId,
    },
    /// `manage_{post_type}_posts_custom_column`
    PostCell { column_name: String, post_id: PostId },
    /// `created_term` / `edited_term`
    TermSaved {
        term_id: TermId,
        tt_id: u64,
        taxonomy: String,
    },
}

impl HookArgs {
    fn name(&self) -> &'static str {
        match self {
            HookArgs::AddForm { .. } => "add-form",
            HookArgs::EditForm { .. } => "edit-form",
            HookArgs::Columns(_) => "columns",
            HookArgs::TermCell { .. } => "term-cell",
            HookArgs::PostCell { .. } => "post-cell",
            HookArgs::TermSaved { .. } => "term-saved",
        }
    }
}

/// What the host should do with the result of a dispatched hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutput {
    /// Action output to be printed by the host
    Echo(String),
    /// Filtered column headers
    Columns(Columns),
    /// Filtered cell content
    Content(String),
    /// Number of meta values written
    Saved(usize),
}

impl FieldRegistry {
    /// Route a fired hook to the matching render or save handler.
    pub fn dispatch<H: Host>(
        &self,
        host: &mut H,
        callback: Callback,
        args: HookArgs,
    ) -> Result<HookOutput> {
        match (callback, args) {
            (Callback::AddFormFields, HookArgs::AddForm { taxonomy }) => {
                let mut out = String::new();
                self.on_add_form_fields(&taxonomy, &mut out)?;
                Ok(HookOutput::Echo(out))
            }
            (Callback::EditFormFields, HookArgs::EditForm { term, taxonomy }) => {
                let mut out = String::new();
                self.on_edit_form_fields(&term, &taxonomy, &*host, &mut out)?;
                Ok(HookOutput::Echo(out))
            }
            (Callback::CustomColumns, HookArgs::Columns(columns)) => {
                Ok(HookOutput::Columns(self.on_custom_columns(&*host, columns)))
            }
            (
                Callback::TaxonomyColumnContent,
                HookArgs::TermCell {
                    content,
                    column_name,
                    term_id,
                },
            ) => Ok(HookOutput::Content(self.on_taxonomy_column_content(
                &*host,
                &*host,
                &content,
                &column_name,
                term_id,
            ))),
            (
                Callback::PostColumnContent,
                HookArgs::PostCell {
                    column_name,
                    post_id,
                },
            ) => {
                let mut out = String::new();
                self.on_post_column_content(&*host, &*host, &column_name, post_id, &mut out)?;
                Ok(HookOutput::Echo(out))
            }
            (
                Callback::SaveTerm,
                HookArgs::TermSaved {
                    term_id,
                    tt_id: _,
                    taxonomy,
                },
            ) => {
                // Read the whole form before taking the store mutably.
                let values = self.submitted_values(&*host, &taxonomy);
                let written = store_term_values(host, term_id, &taxonomy, values)?;
                Ok(HookOutput::Saved(written))
            }
            (callback, args) => Err(FieldsError::UnexpectedArgs {
                callback,
                args: args.name(),
            }),
        }
    }
}
