//! Per-command fragment generators.
//!
//! An [`EntryPoint`] derives the public name, the internal dispatch name and
//! the packed parameter lists once; every artifact kind renders from that
//! single derivation so the declaration, definition, validation prototype,
//! export wrapper and context method of a command always agree.

use epgen_registry_spec::PackedOverrides;

use crate::config::GenConfig;
use crate::error::Result;
use crate::naming::{PackedParams, entry_point_name, internal_name};
use crate::signature::Command;
use crate::trace::event_call;

/// Name suffix of explicit-context entry points.
pub const EXPLICIT_CONTEXT_SUFFIX: &str = "ContextANGLE";
/// Leading parameter of explicit-context entry points.
pub const EXPLICIT_CONTEXT_PARAM: &str = "GLeglContext ctx";

const INDENT: &str = "    ";

/// Which accessor a definition uses to find the current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextSource {
	/// Global context without a validity check; used by entry points that
	/// must work on a lost context.
	Global,
	/// The explicit `ctx` argument.
	Explicit,
	/// Global context, checked for validity.
	ValidGlobal,
}

impl ContextSource {
	fn getter(self) -> &'static str {
		match self {
			Self::Global => "GetGlobalContext()",
			Self::Explicit => "static_cast<gl::Context *>(ctx)",
			Self::ValidGlobal => "GetValidGlobalContext()",
		}
	}
}

/// One command rendered in one context mode.
#[derive(Debug, Clone)]
pub struct EntryPoint<'a> {
	command: &'a Command,
	config: &'a GenConfig,
	explicit_context: bool,
	name: &'a str,
	internal_name: String,
	packed: PackedParams,
}

impl<'a> EntryPoint<'a> {
	pub fn new(
		command: &'a Command,
		overrides: Option<&PackedOverrides>,
		explicit_context: bool,
		config: &'a GenConfig,
	) -> Self {
		Self {
			command,
			config,
			explicit_context,
			name: entry_point_name(command, config),
			internal_name: internal_name(command, config),
			packed: PackedParams::new(command, overrides, config),
		}
	}

	pub fn command(&self) -> &Command {
		self.command
	}

	/// Entry point name without API prefix or context suffix.
	pub fn name(&self) -> &str {
		self.name
	}

	pub fn internal_name(&self) -> &str {
		&self.internal_name
	}

	pub fn packed(&self) -> &PackedParams {
		&self.packed
	}

	pub fn is_explicit_context(&self) -> bool {
		self.explicit_context
	}

	pub fn context_source(&self) -> ContextSource {
		if self.config.uses_global_context(self.command.name()) {
			ContextSource::Global
		} else if self.explicit_context {
			ContextSource::Explicit
		} else {
			ContextSource::ValidGlobal
		}
	}

	fn suffix(&self) -> &'static str {
		if self.explicit_context { EXPLICIT_CONTEXT_SUFFIX } else { "" }
	}

	/// Public parameter list with the context parameter prepended when explicit.
	fn public_params(&self) -> String {
		self.with_context(EXPLICIT_CONTEXT_PARAM, self.command.param_list())
	}

	fn with_context(&self, ctx: &str, rest: String) -> String {
		match (self.explicit_context, rest.is_empty()) {
			(false, _) => rest,
			(true, true) => ctx.to_string(),
			(true, false) => format!("{ctx}, {rest}"),
		}
	}

	/// `ANGLE_EXPORT <ret>GL_APIENTRY <Name>(<params>);`
	pub fn declaration(&self) -> String {
		format!(
			"ANGLE_EXPORT {}GL_APIENTRY {}{}({});",
			self.command.return_prefix(),
			self.name,
			self.suffix(),
			self.public_params()
		)
	}

	/// Full dispatch definition: lock, trace, context resolution, packing,
	/// validation, dispatch and a single fallback return.
	pub fn definition(&self) -> Result<String> {
		let mut out = format!(
			"{}GL_APIENTRY {}{}({})\n{{\n",
			self.command.return_prefix(),
			self.name,
			self.suffix(),
			self.public_params()
		);

		// Every parameter must classify, traced or not.
		let event = event_call(self.command, self.config)?;
		line(&mut out, 1, "ANGLE_SCOPED_GLOBAL_LOCK();");
		if self.config.is_trace_exempt(self.command.name()) {
			line(&mut out, 1, "// Tracing is skipped for debug marker entry points since it can");
			line(&mut out, 1, "// interfere with the events being set by the caller.");
		} else {
			line(&mut out, 1, &event);
		}
		out.push('\n');

		line(&mut out, 1, &format!("Context *context = {};", self.context_source().getter()));
		line(&mut out, 1, "if (context)");
		line(&mut out, 1, "{");
		if self.explicit_context {
			line(&mut out, 2, "ASSERT(context == GetValidGlobalContext());");
		}
		for conversion in &self.packed.conversions {
			line(&mut out, 2, conversion);
		}

		let validate_args = self.with_validation_context(self.packed.internal_args());
		line(
			&mut out,
			2,
			&format!("if (context->skipValidation() || Validate{}({validate_args}))", self.name),
		);
		line(&mut out, 2, "{");
		let ret = if self.command.returns_void() { "" } else { "return " };
		line(
			&mut out,
			3,
			&format!("{ret}context->{}({});", self.internal_name, self.packed.internal_args()),
		);
		line(&mut out, 2, "}");
		line(&mut out, 1, "}");

		if let Some(default) = self.default_return_value() {
			out.push('\n');
			line(&mut out, 1, &format!("return {default};"));
		}
		out.push_str("}\n");
		Ok(out)
	}

	fn with_validation_context(&self, args: String) -> String {
		if args.is_empty() { "context".to_string() } else { format!("context, {args}") }
	}

	/// Value returned when there is no context or validation fails.
	pub fn default_return_value(&self) -> Option<String> {
		(!self.command.returns_void()).then(|| {
			format!(
				"GetDefaultReturnValue<EntryPoint::{}, {}>()",
				self.name,
				self.command.return_type()
			)
		})
	}

	/// `bool Validate<Name>(Context *context, <packed params>);`
	pub fn validation_prototype(&self) -> String {
		let params = match self.packed.internal_decls() {
			decls if decls.is_empty() => "Context *context".to_string(),
			decls => format!("Context *context, {decls}"),
		};
		format!("bool Validate{}({params});", self.name)
	}

	/// C-linkage export forwarding to the internal entry point.
	pub fn export_wrapper(&self) -> String {
		format!(
			"{}GL_APIENTRY {}{suffix}({})\n{{\n{INDENT}return gl::{}{suffix}({});\n}}\n",
			self.command.return_prefix(),
			self.command.name(),
			self.public_params(),
			self.name,
			self.with_context("ctx", self.command.arg_list()),
			suffix = self.suffix(),
		)
	}

	/// `typedef <ret>(GL_APIENTRYP PFN<NAME>PROC)(<params>);`
	pub fn function_pointer(&self) -> String {
		format!(
			"typedef {}(GL_APIENTRYP PFN{}{}PROC)({});",
			self.command.return_prefix(),
			self.command.name().to_uppercase(),
			self.suffix().to_uppercase(),
			self.public_params()
		)
	}

	/// `<apicall> <ret>GL_APIENTRY <glName>(<params>);`
	pub fn prototype(&self, apicall: &str) -> String {
		format!(
			"{apicall} {}GL_APIENTRY {}{}({});",
			self.command.return_prefix(),
			self.command.name(),
			self.suffix(),
			self.public_params()
		)
	}

	/// Context-interface macro line for the legacy GLES1 interface.
	pub fn context_method(&self) -> String {
		format!(
			"{INDENT}{}{}({}); \\",
			self.command.return_prefix(),
			self.internal_name,
			self.packed.internal_decls()
		)
	}

	/// Line of the module-definition export list.
	pub fn export_symbol(&self) -> String {
		format!("{INDENT}{}{}", self.command.name(), self.suffix())
	}
}

fn line(out: &mut String, depth: usize, text: &str) {
	for _ in 0..depth {
		out.push_str(INDENT);
	}
	out.push_str(text);
	out.push('\n');
}
