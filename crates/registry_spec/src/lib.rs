//! Registry snapshot schema consumed by the entry point generator.
//!
//! The registry provider (the XML indexer) hands the generator one
//! [`RegistrySnapshot`]: the ordered command catalog, the commands owned by
//! each GLES version and extension, the per-extension alias records and the
//! packed-enum override table. This crate owns that schema, loads it from
//! JSON and runs the provider-side consistency checks the generator relies on.

pub mod error;
pub mod snapshot;
pub mod validate;
pub mod version;

pub use error::{RegistryError, Result};
pub use snapshot::{CommandSpec, EglSpec, ExtHeaderCommands, ExtensionSpec, PackedOverrides, RegistrySnapshot};
pub use version::{EGL_VERSIONS, GlesVersion};
