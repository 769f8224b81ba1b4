//! Typed custom fields for host classification and content types
//!
//! `typefields-registry` lets plugin setup code declare "this taxonomy or
//! post type has a field of kind X, key K, default D" once. The registry
//! then answers the host's hooks for it: add/edit term forms, list columns,
//! column cells and term saves.
//!
//! # Architecture
//!
//! - **Field store**: one ordered map per family, slug → key → field
//! - **Lazy binding**: the first field of a slug subscribes that slug's hooks, exactly once
//! - **Routing**: the host hands fired hooks back through [`FieldRegistry::dispatch`]
//! - **No globals**: the registry is a plain value owned by plugin bootstrap

pub mod config;
pub mod dispatch;
pub mod error;
pub mod field;
pub mod hooks;
pub mod host;
pub mod kinds;
pub mod persist;
pub mod registry;
pub mod render;
pub mod store;
pub mod types;

pub use config::RegistryConfig;
pub use dispatch::{HookArgs, HookOutput};
pub use error::{FieldsError, Result};
pub use field::{CustomField, FieldCore};
pub use hooks::{Callback, HookKind, HookName, HookRegistrar, Subscription};
pub use host::{sanitize_text, Entities, FormData, FormInput, Host, HostError, MetaStore, Screens};
pub use kinds::{ColorPicker, NumberInput, PostChoice, PostSelector, TextInput};
pub use registry::FieldRegistry;
pub use render::Columns;
pub use store::{FieldSet, FieldStore};
pub use types::{CustomType, HostType, PostId, Screen, ScreenContext, Term, TermId};
