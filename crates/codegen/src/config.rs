//! Static generation tables.
//!
//! Every exception list and format table the generators consult lives in a
//! single [`GenConfig`] that is built once and passed down explicitly. The
//! defaults describe the GLES registry; a TOML file may override any field.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Identity written into the banner of every generated file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
	/// Generator name, as in "Generated by <generator>".
	pub generator: String,
	/// Copyright holder, as in "Copyright <year> <holder>".
	pub copyright_holder: String,
}

impl Default for BannerConfig {
	fn default() -> Self {
		Self {
			generator: "epgen".into(),
			copyright_holder: "The ANGLE Project Authors".into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenConfig {
	/// API prefix dropped from command names (`glDrawArrays` -> `DrawArrays`).
	pub api_prefix: String,
	/// Suffixes stripped from internal dispatch names; at most one applies.
	pub strip_suffixes: Vec<String>,
	/// Commands whose semantics changed between versions under one name.
	/// These keep their suffix and get no context-interface declaration.
	pub overloaded: BTreeSet<String>,
	/// Debug-marker entry points that must not emit a trace call.
	pub trace_exempt: BTreeSet<String>,
	/// Entry points that resolve the context without a validity check.
	pub global_context_entry_points: BTreeSet<String>,
	/// GLES1 extensions that get no context-interface declarations.
	pub gles1_no_context_decl_extensions: BTreeSet<String>,
	/// printf-style trace format per parameter type.
	pub trace_formats: BTreeMap<String, String>,
	/// Types traced through `static_cast<T>`.
	pub static_casts: BTreeMap<String, String>,
	/// Types traced through a C-style cast.
	pub reinterpret_casts: BTreeMap<String, String>,
	/// Function template converting a raw enum to its packed type.
	pub packed_conversion: String,
	pub banner: BannerConfig,
}

impl Default for GenConfig {
	fn default() -> Self {
		Self {
			api_prefix: "gl".into(),
			strip_suffixes: strings(&["ANGLE", "EXT", "KHR", "OES", "CHROMIUM", "OVR"]),
			overloaded: string_set(&["glGetPointerv"]),
			trace_exempt: string_set(&["glInsertEventMarkerEXT", "glPopGroupMarkerEXT", "glPushGroupMarkerEXT"]),
			global_context_entry_points: string_set(&["glGetError", "glGetGraphicsResetStatusEXT"]),
			gles1_no_context_decl_extensions: string_set(&["GL_OES_framebuffer_object"]),
			trace_formats: string_map(&[
				("GLbitfield", "0x%X"),
				("GLboolean", "%u"),
				("GLclampx", "0x%X"),
				("GLenum", "0x%X"),
				("GLfixed", "0x%X"),
				("GLfloat", "%f"),
				("GLint", "%d"),
				("GLintptr", "%llu"),
				("GLshort", "%d"),
				("GLsizei", "%d"),
				("GLsizeiptr", "%llu"),
				("GLsync", "0x%016\" PRIxPTR \""),
				("GLubyte", "%d"),
				("GLuint", "%u"),
				("GLuint64", "%llu"),
				("GLDEBUGPROC", "0x%016\" PRIxPTR \""),
				("GLDEBUGPROCKHR", "0x%016\" PRIxPTR \""),
				("GLeglImageOES", "0x%016\" PRIxPTR \""),
			]),
			static_casts: string_map(&[
				("GLintptr", "unsigned long long"),
				("GLsizeiptr", "unsigned long long"),
				("GLuint64", "unsigned long long"),
			]),
			reinterpret_casts: string_map(&[
				("GLsync", "uintptr_t"),
				("GLDEBUGPROC", "uintptr_t"),
				("GLDEBUGPROCKHR", "uintptr_t"),
				("GLeglImageOES", "uintptr_t"),
			]),
			packed_conversion: "FromGLenum".into(),
			banner: BannerConfig::default(),
		}
	}
}

impl GenConfig {
	/// Parses a TOML override file; absent fields keep their defaults.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}

	pub fn is_overloaded(&self, command: &str) -> bool {
		self.overloaded.contains(command)
	}

	pub fn is_trace_exempt(&self, command: &str) -> bool {
		self.trace_exempt.contains(command)
	}

	pub fn uses_global_context(&self, command: &str) -> bool {
		self.global_context_entry_points.contains(command)
	}

	pub fn wants_context_decls(&self, extension: &str) -> bool {
		!self.gles1_no_context_decl_extensions.contains(extension)
	}
}

fn strings(items: &[&str]) -> Vec<String> {
	items.iter().map(|s| s.to_string()).collect()
}

fn string_set(items: &[&str]) -> BTreeSet<String> {
	items.iter().map(|s| s.to_string()).collect()
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
	pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
