//! Structured command signatures.
//!
//! Raw registry text is parsed exactly once into [`Command`] and [`Param`];
//! every generator works from the structured form.

use std::fmt;

use epgen_registry_spec::CommandSpec;

use crate::error::{GenError, Result};

/// One parameter declaration, split into type and name.
///
/// The split point is the last whitespace or `*`, whichever comes later, so
/// multi-word types such as `const void *` stay intact. `Display` rebuilds
/// the declaration as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
	ty: String,
	name: String,
	spaced: bool,
}

impl Param {
	/// Splits a raw declaration; `None` when no boundary exists.
	pub fn parse(raw: &str) -> Option<Self> {
		let raw = raw.trim();
		let space = raw.char_indices().rev().find(|(_, c)| c.is_whitespace());
		let pointer = raw.rfind('*');

		let (ty, name, spaced) = match (space, pointer) {
			(Some((s, _)), Some(p)) if p > s => (&raw[..=p], &raw[p + 1..], false),
			(Some((s, c)), _) => (&raw[..s], &raw[s + c.len_utf8()..], true),
			(None, Some(p)) => (&raw[..=p], &raw[p + 1..], false),
			(None, None) => return None,
		};

		if name.is_empty() || ty.trim().is_empty() {
			return None;
		}

		Some(Self {
			ty: ty.to_string(),
			name: name.to_string(),
			spaced,
		})
	}

	/// Type token as written, including qualifiers and pointer markers.
	pub fn ty(&self) -> &str {
		self.ty.trim()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_pointer(&self) -> bool {
		self.ty.contains('*')
	}
}

impl fmt::Display for Param {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let gap = if self.spaced { " " } else { "" };
		write!(f, "{}{gap}{}", self.ty, self.name)
	}
}

/// A parsed API command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
	name: String,
	/// Text preceding the name in the prototype, spacing preserved.
	return_prefix: String,
	params: Vec<Param>,
}

impl Command {
	/// Parses a prototype (`"<return type> <name>"`) and its raw parameters.
	pub fn parse(name: &str, proto: &str, raw_params: &[String]) -> Result<Self> {
		let malformed = |reason: String| GenError::MalformedSignature {
			command: name.to_string(),
			reason,
		};

		let return_prefix = proto
			.trim_end()
			.strip_suffix(name)
			.ok_or_else(|| malformed(format!("prototype '{proto}' does not end with the command name")))?
			.trim_start();
		if return_prefix.trim().is_empty() {
			return Err(malformed(format!("prototype '{proto}' has no return type")));
		}

		let params = raw_params
			.iter()
			.map(|raw| Param::parse(raw).ok_or_else(|| malformed(format!("parameter '{raw}' has no type/name boundary"))))
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			name: name.to_string(),
			return_prefix: return_prefix.to_string(),
			params,
		})
	}

	pub fn from_spec(spec: &CommandSpec) -> Result<Self> {
		Self::parse(&spec.name, &spec.proto, &spec.params)
	}

	/// Full API name, e.g. `glDrawArrays`.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Return type token, e.g. `const GLubyte *`.
	pub fn return_type(&self) -> &str {
		self.return_prefix.trim()
	}

	/// Return type as it precedes the next token: `"void "` or `"const GLubyte *"`.
	pub fn return_prefix(&self) -> &str {
		&self.return_prefix
	}

	pub fn returns_void(&self) -> bool {
		self.return_type() == "void"
	}

	/// Parameters in ABI order.
	pub fn params(&self) -> &[Param] {
		&self.params
	}

	/// Comma-joined parameter declarations as written in the registry.
	pub fn param_list(&self) -> String {
		join(self.params.iter().map(Param::to_string))
	}

	/// Comma-joined parameter names.
	pub fn arg_list(&self) -> String {
		join(self.params.iter().map(|p| p.name().to_string()))
	}
}

pub(crate) fn join<I: IntoIterator<Item = String>>(items: I) -> String {
	items.into_iter().collect::<Vec<_>>().join(", ")
}
