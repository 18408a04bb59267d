//! Error types for registry snapshot loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or checking a registry snapshot.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// The snapshot file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The snapshot is not valid JSON for the schema.
	#[error("invalid registry snapshot: {0}")]
	Json(#[from] serde_json::Error),

	/// Two catalog entries share a command name.
	#[error("duplicate command name in catalog: '{0}'")]
	DuplicateCommand(String),

	/// A GLES version has no command list.
	#[error("registry snapshot has no command list for version {0}")]
	MissingVersion(&'static str),

	/// An annotation lists a command missing from the catalog.
	#[error("{annotation} references unknown command '{command}'")]
	UnknownCommand {
		/// Version tag or extension name.
		annotation: String,
		/// The unresolved command name.
		command: String,
	},

	/// Two annotations expose the same command but no alias record links them.
	#[error("command '{command}' is exposed by both {first} and {second} without an alias record")]
	UndeclaredDuplicate {
		/// The shared command name.
		command: String,
		/// The annotation processed first.
		first: String,
		/// The annotation processed later.
		second: String,
	},

	/// An alias record names a command no earlier annotation defines.
	#[error("{extension} marks '{command}' as already defined, but no earlier annotation defines it")]
	DanglingAlias {
		/// The extension carrying the alias record.
		extension: String,
		/// The aliased command name.
		command: String,
	},

	/// An alias record names a command the extension does not expose.
	#[error("{extension} marks '{command}' as already defined, but does not expose it")]
	AliasNotExposed {
		/// The extension carrying the alias record.
		extension: String,
		/// The aliased command name.
		command: String,
	},
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
