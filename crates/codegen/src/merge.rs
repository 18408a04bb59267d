//! Version/extension merge engine.
//!
//! Walks the core versions in their fixed processing order, then the
//! extensions in name order, then (optionally) the explicit-context variants
//! and the EGL exports. Each artifact body is an ordered [`Fragments`]
//! builder that only this engine appends to, so the output ordering is
//! decided in one place.
//!
//! Alias records are taken at face value: an aliased command gets an
//! "already defined" marker in the definition stream and keeps its export
//! symbol, nothing else. Duplicates without an alias record are a provider
//! defect and are rejected when the snapshot is loaded, not here.

use std::collections::{BTreeMap, BTreeSet};

use epgen_registry_spec::{EGL_VERSIONS, GlesVersion, RegistrySnapshot};
use tracing::debug;

use crate::artifacts::EntryPoint;
use crate::catalog::Catalog;
use crate::config::GenConfig;
use crate::error::Result;
use crate::naming::entry_point_name;
use crate::signature::Command;

/// Extension name under which explicit-context entry points are grouped.
pub const EXPLICIT_CONTEXT_EXTENSION: &str = "EGL_ANGLE_explicit_context";

/// Ordered fragment sequence forming the body of one artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments(Vec<String>);

impl Fragments {
	pub fn push(&mut self, fragment: impl Into<String>) {
		self.0.push(fragment.into());
	}

	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Newline-joined body text.
	pub fn join(&self) -> String {
		self.0.join("\n")
	}
}

/// Per-version declaration, definition and validation streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionFragments {
	pub version: GlesVersion,
	pub declarations: Fragments,
	pub definitions: Fragments,
	pub validation: Fragments,
}

impl VersionFragments {
	fn new(version: GlesVersion) -> Self {
		Self {
			version,
			declarations: Fragments::default(),
			definitions: Fragments::default(),
			validation: Fragments::default(),
		}
	}
}

/// Function pointer typedefs and prototypes for one explicit-context include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitContextInclude {
	pub version: GlesVersion,
	pub pointers: Fragments,
	pub prototypes: Fragments,
}

/// Everything the merge engine accumulated, ready for assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedFragments {
	/// Core versions in processing order.
	pub versions: Vec<VersionFragments>,
	pub ext_declarations: Fragments,
	pub ext_definitions: Fragments,
	pub ext_validation: Fragments,
	/// C-linkage forwarding wrappers across all annotations.
	pub export_wrappers: Fragments,
	/// Module-definition export list across all annotations.
	pub export_symbols: Fragments,
	/// GLES1 context-interface lines for version 1.0.
	pub context_core: Fragments,
	/// GLES1 context-interface lines per GLES1 extension.
	pub context_extensions: BTreeMap<String, Fragments>,
	/// Empty unless explicit-context generation is enabled.
	pub explicit_includes: Vec<ExplicitContextInclude>,
	/// Lines of the entry point enumeration.
	pub entry_points: Fragments,
}

pub struct MergeEngine<'a> {
	catalog: &'a Catalog,
	snapshot: &'a RegistrySnapshot,
	config: &'a GenConfig,
	out: MergedFragments,
}

impl<'a> MergeEngine<'a> {
	pub fn new(catalog: &'a Catalog, snapshot: &'a RegistrySnapshot, config: &'a GenConfig) -> Self {
		Self {
			catalog,
			snapshot,
			config,
			out: MergedFragments::default(),
		}
	}

	pub fn run(mut self) -> Result<MergedFragments> {
		self.core_phase()?;
		self.extension_phase()?;
		if self.snapshot.explicit_context {
			self.explicit_context_phase()?;
		}
		self.egl_phase();
		self.entry_point_enum()?;
		Ok(self.out)
	}

	fn entry_point(&self, command: &'a Command, explicit_context: bool) -> EntryPoint<'a> {
		EntryPoint::new(
			command,
			self.snapshot.packed_overrides(command.name()),
			explicit_context,
			self.config,
		)
	}

	fn core_phase(&mut self) -> Result<()> {
		let (catalog, snapshot, config) = (self.catalog, self.snapshot, self.config);

		for version in GlesVersion::PROCESSING_ORDER {
			let names = snapshot.version_commands(version)?;
			debug!(version = %version, commands = names.len(), "merging core version");

			let title = format!("OpenGL ES {}", version.dotted());
			let mut fragments = VersionFragments::new(version);
			let mut symbols = Vec::with_capacity(names.len());
			self.out.export_wrappers.push(format!("\n// {title}"));

			for name in names {
				let command = catalog.get(name)?;
				let ep = self.entry_point(command, false);
				fragments.declarations.push(ep.declaration());
				fragments.definitions.push(ep.definition()?);
				fragments.validation.push(ep.validation_prototype());
				self.out.export_wrappers.push(ep.export_wrapper());
				symbols.push(ep.export_symbol());

				if version.is_gles1() && !config.is_overloaded(name) {
					self.out.context_core.push(ep.context_method());
				}
			}

			self.push_export_section(&title, symbols);
			self.out.versions.push(fragments);
		}
		Ok(())
	}

	fn extension_phase(&mut self) -> Result<()> {
		let (catalog, snapshot, config) = (self.catalog, self.snapshot, self.config);

		for ext in &snapshot.gles1_extensions {
			self.out.context_extensions.insert(ext.clone(), Fragments::default());
		}

		for (ext_name, ext) in &snapshot.extensions {
			debug!(
				extension = %ext_name,
				commands = ext.commands.len(),
				aliased = ext.already_defined.len(),
				"merging extension"
			);

			let heading = format!("\n// {ext_name}");
			self.out.ext_declarations.push(heading.clone());
			self.out.ext_definitions.push(heading.clone());
			self.out.ext_validation.push(heading.clone());
			self.out.export_wrappers.push(heading);

			let wants_context = snapshot.is_gles1_extension(ext_name) && config.wants_context_decls(ext_name);
			let mut context_methods = Fragments::default();
			let mut symbols = Vec::with_capacity(ext.commands.len());

			for name in &ext.commands {
				let command = catalog.get(name)?;
				let ep = self.entry_point(command, false);
				// The symbol must exist under every alias, even with a shared body.
				symbols.push(ep.export_symbol());

				if ext.is_aliased(name) {
					debug!(extension = %ext_name, command = %name, "command already defined");
					self.out.ext_definitions.push(format!("// {} is already defined.\n", ep.name()));
					continue;
				}

				self.out.ext_declarations.push(ep.declaration());
				self.out.ext_definitions.push(ep.definition()?);
				self.out.ext_validation.push(ep.validation_prototype());
				self.out.export_wrappers.push(ep.export_wrapper());

				if wants_context && !config.is_overloaded(name) {
					context_methods.push(ep.context_method());
				}
			}

			self.push_export_section(ext_name, symbols);
			if wants_context {
				self.out.context_extensions.insert(ext_name.clone(), context_methods);
			}
		}
		Ok(())
	}

	fn explicit_context_phase(&mut self) -> Result<()> {
		let (catalog, snapshot) = (self.catalog, self.snapshot);
		let referenced = snapshot.referenced_commands();
		debug!(commands = referenced.len(), "merging explicit context entry points");

		let heading = format!("\n// {EXPLICIT_CONTEXT_EXTENSION}");
		self.out.ext_declarations.push(heading.clone());
		self.out.ext_definitions.push(heading.clone());
		self.out.export_wrappers.push(heading);

		let mut symbols = Vec::with_capacity(referenced.len());
		for command in catalog.iter().filter(|cmd| referenced.contains(cmd.name())) {
			let ep = self.entry_point(command, true);
			self.out.ext_declarations.push(ep.declaration());
			self.out.ext_definitions.push(ep.definition()?);
			self.out.export_wrappers.push(ep.export_wrapper());
			symbols.push(ep.export_symbol());
		}
		self.push_export_section(EXPLICIT_CONTEXT_EXTENSION, symbols);

		for version in GlesVersion::PROCESSING_ORDER {
			let apicall = if version.is_gles1() { "GL_API" } else { "GL_APICALL" };
			let header_commands: &[String] = match version {
				GlesVersion::V1_0 => &snapshot.ext_headers.glext,
				GlesVersion::V2_0 => &snapshot.ext_headers.gl2ext,
				_ => &[],
			};

			let mut include = ExplicitContextInclude {
				version,
				pointers: Fragments::default(),
				prototypes: Fragments::default(),
			};
			for name in snapshot.version_commands(version)?.iter().chain(header_commands) {
				let ep = self.entry_point(catalog.get(name)?, true);
				include.pointers.push(ep.function_pointer());
				include.prototypes.push(ep.prototype(apicall));
			}
			self.out.explicit_includes.push(include);
		}
		Ok(())
	}

	fn egl_phase(&mut self) {
		let snapshot = self.snapshot;
		let egl = &snapshot.egl;

		for version in EGL_VERSIONS {
			let Some(names) = egl.versions.get(version).filter(|names| !names.is_empty()) else {
				continue;
			};
			let title = format!("EGL {}", version.replace('_', "."));
			self.push_export_section(&title, names.iter().map(|name| egl_export_symbol(name)).collect());
		}

		for (ext_name, names) in &egl.extensions {
			if names.is_empty() {
				continue;
			}
			self.push_export_section(ext_name, names.iter().map(|name| egl_export_symbol(name)).collect());
		}
	}

	fn entry_point_enum(&mut self) -> Result<()> {
		let (catalog, snapshot, config) = (self.catalog, self.snapshot, self.config);
		let mut names = BTreeSet::new();
		for name in snapshot.referenced_commands() {
			names.insert(entry_point_name(catalog.get(name)?, config));
		}

		let entries: Vec<&str> = std::iter::once("Invalid").chain(names).collect();
		let last = entries.len() - 1;
		for (i, entry) in entries.iter().enumerate() {
			let comma = if i == last { "" } else { "," };
			self.out.entry_points.push(format!("    {entry}{comma}"));
		}
		Ok(())
	}

	/// Appends a titled, sorted export section.
	fn push_export_section(&mut self, title: &str, mut symbols: Vec<String>) {
		symbols.sort_unstable();
		self.out.export_symbols.push(format!("\n    ; {title}"));
		for symbol in symbols {
			self.out.export_symbols.push(symbol);
		}
	}
}

/// EGL commands export under their `EGL_` alias: `eglGetDisplay` -> `EGL_GetDisplay`.
fn egl_export_symbol(name: &str) -> String {
	format!("    EGL_{}", name.strip_prefix("egl").unwrap_or(name))
}

#[cfg(test)]
mod tests;
