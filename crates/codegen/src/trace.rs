//! Instrumentation call construction.

use crate::config::GenConfig;
use crate::error::{GenError, Result};
use crate::signature::{Command, Param, join};

/// printf format for any pointer-typed parameter.
pub const POINTER_FORMAT: &str = "0x%016\" PRIxPTR \"";

/// Builds the `EVENT(...)` statement tracing every parameter of `command`.
///
/// Fails on the first parameter whose type has no format; the parameter is
/// never silently dropped from the trace.
pub fn event_call(command: &Command, config: &GenConfig) -> Result<String> {
	let formats = command
		.params()
		.iter()
		.map(|param| format_spec(command, param, config))
		.collect::<Result<Vec<_>>>()?;
	let args = join(command.params().iter().map(|param| print_argument(param, config)));
	let comma = if command.params().is_empty() { "" } else { ", " };

	Ok(format!("EVENT(\"({})\"{comma}{args});", formats.join(", ")))
}

fn format_spec(command: &Command, param: &Param, config: &GenConfig) -> Result<String> {
	if param.is_pointer() {
		return Ok(format!("{param} = {POINTER_FORMAT}"));
	}
	config
		.trace_formats
		.get(param.ty())
		.map(|fmt| format!("{param} = {fmt}"))
		.ok_or_else(|| GenError::UnclassifiedType {
			command: command.name().to_string(),
			ty: param.ty().to_string(),
		})
}

fn print_argument(param: &Param, config: &GenConfig) -> String {
	let name = param.name();
	if param.is_pointer() {
		return format!("(uintptr_t){name}");
	}
	if let Some(target) = config.reinterpret_casts.get(param.ty()) {
		return format!("({target}){name}");
	}
	if let Some(target) = config.static_casts.get(param.ty()) {
		return format!("static_cast<{target}>({name})");
	}
	name.to_string()
}
