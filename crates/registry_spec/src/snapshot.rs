//! Registry snapshot schema.
//!
//! Every keyed collection is a `BTreeMap` or `BTreeSet` so iteration order is
//! fixed by the key; the command catalog stays in registry-declared order.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::version::GlesVersion;

/// Parameter name to packed type name, for a single command.
pub type PackedOverrides = BTreeMap<String, String>;

/// One raw catalog entry as indexed from the XML registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
	/// Full command name, e.g. `glDrawArrays`.
	pub name: String,
	/// Return type followed by the command name, e.g. `const GLubyte *glGetString`.
	pub proto: String,
	/// Raw parameter declarations in ABI order.
	#[serde(default)]
	pub params: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSpec {
	/// Commands the extension exposes, in registry order.
	#[serde(default)]
	pub commands: Vec<String>,
	/// Commands already defined by an earlier-processed annotation.
	#[serde(default)]
	pub already_defined: BTreeSet<String>,
}

impl ExtensionSpec {
	pub fn is_aliased(&self, command: &str) -> bool {
		self.already_defined.contains(command)
	}
}

/// Extension commands grouped by the public header declaring them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtHeaderCommands {
	/// Commands declared in `GLES/glext.h`.
	#[serde(default)]
	pub glext: Vec<String>,
	/// Commands declared in `GLES2/gl2ext.h`.
	#[serde(default)]
	pub gl2ext: Vec<String>,
}

/// EGL entry points that are exported from the same library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EglSpec {
	#[serde(default)]
	pub versions: BTreeMap<String, Vec<String>>,
	#[serde(default)]
	pub extensions: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
	/// Full command catalog in registry order.
	#[serde(default)]
	pub commands: Vec<CommandSpec>,
	/// Commands owned by each core version, keyed by annotation (`"2_0"`).
	#[serde(default)]
	pub versions: BTreeMap<String, Vec<String>>,
	/// Supported extensions keyed by name.
	#[serde(default)]
	pub extensions: BTreeMap<String, ExtensionSpec>,
	/// Packed-enum overrides keyed by command name.
	#[serde(default)]
	pub packed_enums: BTreeMap<String, PackedOverrides>,
	/// Extensions that belong to GLES1.
	#[serde(default)]
	pub gles1_extensions: BTreeSet<String>,
	/// Whether `EGL_ANGLE_explicit_context` entry points are generated.
	#[serde(default)]
	pub explicit_context: bool,
	#[serde(default)]
	pub ext_headers: ExtHeaderCommands,
	#[serde(default)]
	pub egl: EglSpec,
}

impl RegistrySnapshot {
	/// Parses a snapshot from JSON without validating it.
	pub fn from_json_str(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Reads, parses and validates a snapshot file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = fs::read_to_string(path).map_err(|error| RegistryError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let snapshot = Self::from_json_str(&content)?;
		snapshot.validate()?;
		debug!(
			path = %path.display(),
			commands = snapshot.commands.len(),
			extensions = snapshot.extensions.len(),
			"loaded registry snapshot"
		);
		Ok(snapshot)
	}

	/// Commands owned by `version`, in registry order.
	pub fn version_commands(&self, version: GlesVersion) -> Result<&[String]> {
		self.versions
			.get(version.annotation())
			.map(Vec::as_slice)
			.ok_or(RegistryError::MissingVersion(version.annotation()))
	}

	/// Packed-enum overrides for `command`, if any parameter is packed.
	pub fn packed_overrides(&self, command: &str) -> Option<&PackedOverrides> {
		self.packed_enums.get(command)
	}

	pub fn is_gles1_extension(&self, extension: &str) -> bool {
		self.gles1_extensions.contains(extension)
	}

	/// Every command name exposed by a version or an extension.
	pub fn referenced_commands(&self) -> BTreeSet<&str> {
		self.versions
			.values()
			.flatten()
			.chain(self.extensions.values().flat_map(|ext| ext.commands.iter()))
			.map(String::as_str)
			.collect()
	}
}
