//! Persistence routing for term saves.
//!
//! Only terms are persisted. Post type fields get columns but no save
//! handler is ever subscribed for them.

use tracing::{debug, warn};

use crate::error::{FieldsError, Result};
use crate::host::{FormInput, MetaStore};
use crate::registry::FieldRegistry;
use crate::types::TermId;

impl FieldRegistry {
    /// Store the submitted value of every field of `taxonomy` for `term_id`.
    ///
    /// Subscribed to both `created_term` and `edited_term`. Returns the
    /// number of values written.
    pub fn on_save_term(
        &self,
        form: &dyn FormInput,
        meta: &mut dyn MetaStore,
        term_id: TermId,
        _tt_id: u64,
        taxonomy: &str,
    ) -> Result<usize> {
        let values = self.submitted_values(form, taxonomy);
        store_term_values(meta, term_id, taxonomy, values)
    }

    /// The values a save of `taxonomy` would write, in declaration order.
    ///
    /// A field whose submitted value is missing, blank or `"0"` gets its default.
    pub fn submitted_values(&self, form: &dyn FormInput, taxonomy: &str) -> Vec<(String, String)> {
        let Some(fields) = self.taxonomy_fields(taxonomy) else {
            return Vec::new();
        };
        fields
            .values()
            .map(|field| {
                let value = form
                    .read_form_field(field.key())
                    .filter(|v| !is_empty_value(v))
                    .unwrap_or_else(|| field.default_value().to_string());
                (field.key().to_string(), value)
            })
            .collect()
    }
}

fn is_empty_value(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "0"
}

/// Upsert every value, even after a failed write. The first failure is returned.
pub(crate) fn store_term_values(
    meta: &mut dyn MetaStore,
    term_id: TermId,
    taxonomy: &str,
    values: Vec<(String, String)>,
) -> Result<usize> {
    if values.is_empty() {
        return Ok(0);
    }

    let mut written = 0;
    let mut failure = None;
    for (key, value) in values {
        match meta.update_term_meta(term_id, &key, &value) {
            Ok(()) => written += 1,
            Err(e) => {
                warn!(%term_id, key = %key, error = %e, "term meta write failed");
                if failure.is_none() {
                    failure = Some(FieldsError::MetaWrite {
                        term_id,
                        key,
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    debug!(%term_id, taxonomy = %taxonomy, written, "term meta saved");
    match failure {
        Some(err) => Err(err),
        None => Ok(written),
    }
}
