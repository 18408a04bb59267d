//! Error types for entry point generation.

use std::path::PathBuf;

use epgen_registry_spec::RegistryError;
use thiserror::Error;

/// Fatal generation errors. Every variant points at a registry or
/// configuration defect; none of them is recoverable.
#[derive(Debug, Error)]
pub enum GenError {
	/// A prototype or parameter string has no type/name boundary.
	#[error("malformed signature for {command}: {reason}")]
	MalformedSignature {
		/// Command whose signature failed to parse.
		command: String,
		/// What was wrong with it.
		reason: String,
	},

	/// A parameter type has no entry in the trace format table.
	#[error("{command}: '{ty}' is not a known type in the trace format table")]
	UnclassifiedType {
		/// Command carrying the parameter.
		command: String,
		/// The unclassified type token.
		ty: String,
	},

	/// An annotation names a command missing from the parsed catalog.
	#[error("'{0}' is not in the command catalog")]
	UnknownCommand(String),

	/// The registry snapshot itself is inconsistent.
	#[error(transparent)]
	Registry(#[from] RegistryError),
}

/// Errors that can occur when loading a generator configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or schema.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenError>;
