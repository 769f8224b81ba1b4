//! Error types for the field registry
//!
//! Routing never fails: unknown slugs, missing screens and unresolvable
//! terms degrade to "nothing to do". The variants here cover the host
//! collaborators that can actually refuse work.

use thiserror::Error;

use crate::hooks::Callback;
use crate::types::TermId;

/// Result type for field registry operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur in field registry operations
#[derive(Debug, Error)]
pub enum FieldsError {
    /// The host metadata store rejected a write
    #[error("failed to write meta '{key}' for term {term_id}: {message}")]
    MetaWrite {
        term_id: TermId,
        key: String,
        message: String,
    },

    /// A hook was dispatched with arguments belonging to another callback
    #[error("callback {callback:?} cannot handle {args} arguments")]
    UnexpectedArgs {
        callback: Callback,
        args: &'static str,
    },

    /// Writing markup to the output sink failed
    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),

    /// Configuration could not be extracted
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Configuration was loaded but is not usable
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl From<figment::Error> for FieldsError {
    fn from(error: figment::Error) -> Self {
        FieldsError::Config(Box::new(error))
    }
}
