//! Internal dispatch names and packed parameter lists.

use epgen_registry_spec::PackedOverrides;

use crate::config::GenConfig;
use crate::signature::{Command, Param};

/// Entry point name without the API prefix: `glDrawArrays` -> `DrawArrays`.
pub fn entry_point_name<'a>(command: &'a Command, config: &GenConfig) -> &'a str {
	command
		.name()
		.strip_prefix(config.api_prefix.as_str())
		.unwrap_or(command.name())
}

/// Context method name: prefix dropped, first letter lowercased and at most
/// one known suffix stripped (`glBindVertexArrayOES` -> `bindVertexArray`).
pub fn internal_name(command: &Command, config: &GenConfig) -> String {
	let base = entry_point_name(command, config);
	let mut chars = base.chars();
	let mut name: String = match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	};

	if config.is_overloaded(command.name()) {
		return name;
	}

	if let Some(suffix) = config.strip_suffixes.iter().find(|s| name.ends_with(s.as_str())) {
		name.truncate(name.len() - suffix.len());
	}
	name
}

/// A parameter as seen by validation and context dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalParam {
	/// Name at call sites; `<name>Packed` when the parameter is packed.
	pub name: String,
	/// Declaration for validation prototypes and context methods.
	pub declaration: String,
	/// Packed type, when an override applies.
	pub packed_type: Option<String>,
}

/// The three views of a command's parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedParams {
	/// Unpacked parameters for public declarations and exports.
	pub decl: Vec<Param>,
	/// Parameters after packing, for validation and dispatch.
	pub internal: Vec<InternalParam>,
	/// One packing statement per overridden parameter, in parameter order.
	pub conversions: Vec<String>,
}

impl PackedParams {
	pub fn new(command: &Command, overrides: Option<&PackedOverrides>, config: &GenConfig) -> Self {
		let mut internal = Vec::with_capacity(command.params().len());
		let mut conversions = Vec::new();

		for param in command.params() {
			match overrides.and_then(|table| table.get(param.name())) {
				Some(packed) => {
					let packed_name = format!("{}Packed", param.name());
					conversions.push(format!(
						"{packed} {packed_name} = {}<{packed}>({});",
						config.packed_conversion,
						param.name()
					));
					internal.push(InternalParam {
						declaration: format!("{packed} {packed_name}"),
						name: packed_name,
						packed_type: Some(packed.clone()),
					});
				}
				None => internal.push(InternalParam {
					name: param.name().to_string(),
					declaration: param.to_string(),
					packed_type: None,
				}),
			}
		}

		Self {
			decl: command.params().to_vec(),
			internal,
			conversions,
		}
	}

	/// Comma-joined internal names, for call sites.
	pub fn internal_args(&self) -> String {
		crate::signature::join(self.internal.iter().map(|p| p.name.clone()))
	}

	/// Comma-joined internal declarations, for prototypes.
	pub fn internal_decls(&self) -> String {
		crate::signature::join(self.internal.iter().map(|p| p.declaration.clone()))
	}
}
