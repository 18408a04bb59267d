//! GL entry point binding synthesis.
//!
//! Turns a validated [`RegistrySnapshot`] into the full set of generated C++
//! sources: per-version entry point headers and definitions, validation
//! prototypes, the exported C-linkage wrappers and module-definition list,
//! the entry point enumeration, the GLES1 context interface macro and the
//! explicit-context include files.
//!
//! The pipeline is strictly one-way: signatures are parsed once into the
//! [`Catalog`], [`MergeEngine`] walks the annotations and drives the
//! per-command [`EntryPoint`] generators, and [`assemble`] wraps the merged
//! fragments in their file templates. Nothing is written to disk here.

pub mod artifacts;
pub mod assemble;
pub mod catalog;
pub mod config;
pub mod error;
pub mod merge;
pub mod naming;
pub mod signature;
pub mod trace;

use tracing::info;

pub use artifacts::{ContextSource, EntryPoint};
pub use assemble::{ArtifactKind, Banner, GeneratedFile, INPUT_SOURCES, assemble, output_paths};
pub use catalog::Catalog;
pub use config::{BannerConfig, GenConfig};
pub use epgen_registry_spec::RegistrySnapshot;
pub use error::{ConfigError, GenError, Result};
pub use merge::{Fragments, MergeEngine, MergedFragments};

/// Generates every artifact for `snapshot`. Either all files are produced
/// or an error is returned.
pub fn generate(snapshot: &RegistrySnapshot, config: &GenConfig, year: i32) -> Result<Vec<GeneratedFile>> {
	let catalog = Catalog::from_snapshot(snapshot)?;
	let merged = MergeEngine::new(&catalog, snapshot, config).run()?;
	let files = assemble(&merged, &Banner::new(&config.banner, year));
	info!(
		commands = catalog.len(),
		extensions = snapshot.extensions.len(),
		files = files.len(),
		"generated entry points"
	);
	Ok(files)
}
