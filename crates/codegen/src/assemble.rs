//! Output assembly.
//!
//! Wraps merged fragment streams in their file templates: the generated-file
//! banner, then include guards, `namespace gl`, `extern "C"` or the
//! module-definition preamble depending on the artifact kind. Fragment text is
//! joined verbatim and never reformatted here.

use std::path::PathBuf;

use epgen_registry_spec::GlesVersion;

use crate::config::BannerConfig;
use crate::merge::{ExplicitContextInclude, Fragments, MergedFragments, VersionFragments};

/// Registry inputs the generated files depend on.
pub const INPUT_SOURCES: [&str; 5] = [
	"egl.xml",
	"egl_angle_ext.xml",
	"entry_point_packed_gl_enums.json",
	"gl.xml",
	"gl_angle_ext.xml",
];

const GL_SOURCE: &str = "gl.xml";
const GL_EXT_SOURCE: &str = "gl.xml and gl_angle_ext.xml";
const ALL_SOURCES: &str = "Khronos and ANGLE XML files";

/// Group of entry points sharing one set of generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
	Core(GlesVersion),
	Extensions,
}

impl Annotation {
	/// File name tag: `"2_0"`, `"ext"`.
	pub fn lower(self) -> &'static str {
		match self {
			Self::Core(version) => version.annotation(),
			Self::Extensions => "ext",
		}
	}

	fn upper(self) -> String {
		self.lower().to_uppercase()
	}

	fn comment(self) -> &'static str {
		match self {
			Self::Core(version) => version.dotted(),
			Self::Extensions => "extension",
		}
	}

	fn validation_tag(self) -> String {
		match self {
			Self::Core(version) => version.validation_tag(),
			Self::Extensions => "EXT".to_string(),
		}
	}

	fn source(self) -> &'static str {
		match self {
			Self::Core(_) => GL_SOURCE,
			Self::Extensions => GL_EXT_SOURCE,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
	EntryPointHeader(Annotation),
	EntryPointSource(Annotation),
	ValidationHeader(Annotation),
	EntryPointEnum,
	ContextInterface,
	ExportSource,
	ExportDefinitions,
	ExplicitContextInclude(GlesVersion),
}

impl ArtifactKind {
	/// Every artifact the generator can produce, explicit-context includes
	/// included.
	pub fn all() -> Vec<Self> {
		let annotations = GlesVersion::PROCESSING_ORDER
			.into_iter()
			.map(Annotation::Core)
			.chain([Annotation::Extensions]);

		let mut kinds = Vec::new();
		for annotation in annotations {
			kinds.push(Self::EntryPointHeader(annotation));
			kinds.push(Self::EntryPointSource(annotation));
			kinds.push(Self::ValidationHeader(annotation));
		}
		kinds.extend([
			Self::EntryPointEnum,
			Self::ContextInterface,
			Self::ExportSource,
			Self::ExportDefinitions,
		]);
		kinds.extend(GlesVersion::PROCESSING_ORDER.map(Self::ExplicitContextInclude));
		kinds
	}

	/// Output path relative to the output root, `/`-separated.
	pub fn path(self) -> String {
		match self {
			Self::EntryPointHeader(annotation) => {
				format!("src/libGLESv2/entry_points_gles_{}_autogen.h", annotation.lower())
			}
			Self::EntryPointSource(annotation) => {
				format!("src/libGLESv2/entry_points_gles_{}_autogen.cpp", annotation.lower())
			}
			Self::ValidationHeader(annotation) => {
				format!("src/libANGLE/validationES{}_autogen.h", annotation.validation_tag())
			}
			Self::EntryPointEnum => "src/libGLESv2/entry_points_enum_autogen.h".to_string(),
			Self::ContextInterface => "src/libANGLE/Context_gles_1_0_autogen.h".to_string(),
			Self::ExportSource => "src/libGLESv2/libGLESv2_autogen.cpp".to_string(),
			Self::ExportDefinitions => "src/libGLESv2/libGLESv2_autogen.def".to_string(),
			Self::ExplicitContextInclude(version) => {
				let folder = match version {
					GlesVersion::V1_0 => "",
					GlesVersion::V2_0 => "2",
					GlesVersion::V3_0 | GlesVersion::V3_1 => "3",
				};
				format!("include/GLES{folder}/{}", explicit_include_name(version))
			}
		}
	}
}

/// Sorted output paths of every artifact.
pub fn output_paths() -> Vec<String> {
	let mut paths: Vec<String> = ArtifactKind::all().into_iter().map(ArtifactKind::path).collect();
	paths.sort();
	paths
}

/// One fully rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
	pub kind: ArtifactKind,
	/// Path relative to the output root.
	pub path: PathBuf,
	pub contents: String,
}

impl GeneratedFile {
	fn new(kind: ArtifactKind, contents: String) -> Self {
		Self {
			kind,
			path: PathBuf::from(kind.path()),
			contents,
		}
	}
}

/// Generated-file banner identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
	pub generator: String,
	pub copyright_holder: String,
	pub year: i32,
}

impl Banner {
	pub fn new(config: &BannerConfig, year: i32) -> Self {
		Self {
			generator: config.generator.clone(),
			copyright_holder: config.copyright_holder.clone(),
			year,
		}
	}

	/// Banner comment block. `description` lines follow a separator line.
	fn render(&self, marker: &str, source: &str, description: &[&str]) -> String {
		let mut out = String::new();
		let lines = [
			"GENERATED FILE - DO NOT EDIT.".to_string(),
			format!("Generated by {} using data from {source}.", self.generator),
			String::new(),
			format!("Copyright {} {}. All rights reserved.", self.year, self.copyright_holder),
			"Use of this source code is governed by a BSD-style license that can be".to_string(),
			"found in the LICENSE file.".to_string(),
		];
		for text in &lines {
			comment_line(&mut out, marker, text);
		}
		if !description.is_empty() {
			comment_line(&mut out, marker, "");
			for text in description {
				comment_line(&mut out, marker, text);
			}
		}
		out
	}

	fn cpp(&self, source: &str, description: &[&str]) -> String {
		self.render("//", source, description)
	}
}

fn comment_line(out: &mut String, marker: &str, text: &str) {
	out.push_str(marker);
	if !text.is_empty() {
		out.push(' ');
		out.push_str(text);
	}
	out.push('\n');
}

/// Renders every artifact from the merged fragments, sorted by path.
pub fn assemble(merged: &MergedFragments, banner: &Banner) -> Vec<GeneratedFile> {
	let mut files = Vec::new();

	for version in &merged.versions {
		files.extend(core_files(version, banner));
	}

	let ext = Annotation::Extensions;
	files.push(GeneratedFile::new(
		ArtifactKind::EntryPointHeader(ext),
		entry_point_header(banner, ext, &merged.ext_declarations),
	));
	files.push(GeneratedFile::new(
		ArtifactKind::EntryPointSource(ext),
		entry_point_source(banner, ext, &merged.ext_definitions),
	));
	files.push(GeneratedFile::new(
		ArtifactKind::ValidationHeader(ext),
		validation_header(banner, ext, &merged.ext_validation),
	));

	files.push(GeneratedFile::new(ArtifactKind::ContextInterface, context_interface(banner, merged)));
	files.push(GeneratedFile::new(
		ArtifactKind::EntryPointEnum,
		entry_point_enum(banner, &merged.entry_points),
	));
	files.push(GeneratedFile::new(
		ArtifactKind::ExportSource,
		export_source(banner, &merged.export_wrappers),
	));
	files.push(GeneratedFile::new(
		ArtifactKind::ExportDefinitions,
		export_definitions(banner, &merged.export_symbols),
	));

	for include in &merged.explicit_includes {
		files.push(GeneratedFile::new(
			ArtifactKind::ExplicitContextInclude(include.version),
			explicit_context_include(banner, include),
		));
	}

	files.sort_by(|a, b| a.path.cmp(&b.path));
	files
}

fn core_files(fragments: &VersionFragments, banner: &Banner) -> [GeneratedFile; 3] {
	let annotation = Annotation::Core(fragments.version);
	[
		GeneratedFile::new(
			ArtifactKind::EntryPointHeader(annotation),
			entry_point_header(banner, annotation, &fragments.declarations),
		),
		GeneratedFile::new(
			ArtifactKind::EntryPointSource(annotation),
			entry_point_source(banner, annotation, &fragments.definitions),
		),
		GeneratedFile::new(
			ArtifactKind::ValidationHeader(annotation),
			validation_header(banner, annotation, &fragments.validation),
		),
	]
}

fn header_includes(annotation: Annotation) -> String {
	match annotation {
		Annotation::Core(version) => {
			let major = if version.is_gles1() { String::new() } else { version.major().to_string() };
			let mut includes = format!("#include <GLES{major}/gl{}.h>\n#include <export.h>", version.compact());
			// platform.h undefines the conflicting MemoryBarrier macro.
			if version == GlesVersion::V3_1 {
				includes.push_str("\n#include \"common/platform.h\"");
			}
			includes
		}
		Annotation::Extensions => [
			"#include <GLES/gl.h>",
			"#include <export.h>",
			"",
			"#include <GLES/glext.h>",
			"#include <GLES2/gl2.h>",
			"#include <GLES2/gl2ext.h>",
		]
		.join("\n"),
	}
}

fn source_includes(annotation: Annotation) -> String {
	let mut includes = format!(
		"#include \"libGLESv2/entry_points_gles_{}_autogen.h\"\n\n\
		 #include \"libANGLE/Context.h\"\n\
		 #include \"libANGLE/Context.inl.h\"\n\
		 #include \"libANGLE/validationES{}.h\"\n\
		 #include \"libGLESv2/entry_points_utils.h\"\n\
		 #include \"libGLESv2/global_state.h\"",
		annotation.lower(),
		annotation.validation_tag(),
	);
	if annotation == Annotation::Extensions {
		includes.push('\n');
		for version in [GlesVersion::V1_0, GlesVersion::V2_0, GlesVersion::V3_0, GlesVersion::V3_1] {
			includes.push_str(&format!("\n#include \"libANGLE/validationES{}.h\"", version.validation_tag()));
		}
	}
	includes
}

fn entry_point_header(banner: &Banner, annotation: Annotation, declarations: &Fragments) -> String {
	let file = format!("entry_points_gles_{}_autogen.h:", annotation.lower());
	let description = format!("  Defines the GLES {} entry points.", annotation.comment());
	let guard = format!("LIBGLESV2_ENTRY_POINTS_GLES_{}_AUTOGEN_H_", annotation.upper());
	format!(
		"{}\n#ifndef {guard}\n#define {guard}\n\n{}\n\nnamespace gl\n{{\n{}\n}}  // namespace gl\n\n#endif  // {guard}\n",
		banner.cpp(annotation.source(), &[&file, &description]),
		header_includes(annotation),
		declarations.join(),
	)
}

fn entry_point_source(banner: &Banner, annotation: Annotation, definitions: &Fragments) -> String {
	let file = format!("entry_points_gles_{}_autogen.cpp:", annotation.lower());
	let description = format!("  Defines the GLES {} entry points.", annotation.comment());
	// Definitions end in a newline of their own.
	format!(
		"{}\n{}\n\nnamespace gl\n{{\n{}}}  // namespace gl\n",
		banner.cpp(annotation.source(), &[&file, &description]),
		source_includes(annotation),
		definitions.join(),
	)
}

fn validation_header(banner: &Banner, annotation: Annotation, prototypes: &Fragments) -> String {
	let tag = annotation.validation_tag();
	let file = format!("validationES{tag}_autogen.h:");
	let description = format!("  Validation functions for the OpenGL ES {} entry points.", annotation.comment());
	let guard = format!("LIBANGLE_VALIDATION_ES{tag}_AUTOGEN_H_");
	format!(
		"{}\n#ifndef {guard}\n#define {guard}\n\n#include \"common/PackedEnums.h\"\n\nnamespace gl\n{{\nclass Context;\n\n{}\n}}  // namespace gl\n\n#endif  // {guard}\n",
		banner.cpp(GL_EXT_SOURCE, &[&file, &description]),
		prototypes.join(),
	)
}

fn entry_point_enum(banner: &Banner, entries: &Fragments) -> String {
	let guard = "LIBGLESV2_ENTRY_POINTS_ENUM_AUTOGEN_H_";
	format!(
		"{}\n#ifndef {guard}\n#define {guard}\n\nnamespace gl\n{{\nenum class EntryPoint\n{{\n{}\n}};\n}}  // namespace gl\n\n#endif  // {guard}\n",
		banner.cpp(GL_EXT_SOURCE, &[
			"entry_points_enum_autogen.h:",
			"  Defines the GLES entry points enumeration."
		]),
		entries.join(),
	)
}

fn context_interface(banner: &Banner, merged: &MergedFragments) -> String {
	let mut lines = merged.context_core.as_slice().to_vec();
	for (ext, methods) in &merged.context_extensions {
		lines.push(format!("    /* {ext} */ \\"));
		lines.extend(methods.as_slice().iter().cloned());
	}

	let guard = "ANGLE_CONTEXT_GLES_1_0_AUTOGEN_H_";
	format!(
		"{}\n#ifndef {guard}\n#define {guard}\n\n#define ANGLE_GLES1_CONTEXT_API \\\n{}\n\n#endif  // {guard}\n",
		banner.cpp(GL_SOURCE, &["Context_gles_1_0_autogen.h: Creates a macro for interfaces in Context."]),
		lines.join("\n"),
	)
}

fn export_source(banner: &Banner, wrappers: &Fragments) -> String {
	let mut includes = String::from("#include \"angle_gl.h\"\n\n");
	for annotation in GlesVersion::PROCESSING_ORDER
		.into_iter()
		.map(Annotation::Core)
		.chain([Annotation::Extensions])
	{
		includes.push_str(&format!(
			"#include \"libGLESv2/entry_points_gles_{}_autogen.h\"\n",
			annotation.lower()
		));
	}
	includes.push_str("\n#include \"common/event_tracer.h\"\n");

	format!(
		"{}\n{includes}\nextern \"C\" {{\n{}\n}} // extern \"C\"\n",
		banner.cpp(GL_EXT_SOURCE, &["libGLESv2.cpp: Implements the exported OpenGL ES functions."]),
		wrappers.join(),
	)
}

fn export_definitions(banner: &Banner, symbols: &Fragments) -> String {
	format!(
		"{}LIBRARY libGLESv2\nEXPORTS\n{}\n",
		banner.render(";", ALL_SOURCES, &[]),
		symbols.join(),
	)
}

fn explicit_include_name(version: GlesVersion) -> String {
	format!("gl{}ext_explicit_context_autogen.inc", version.compact())
}

fn explicit_context_include(banner: &Banner, include: &ExplicitContextInclude) -> String {
	let file = format!("{}:", explicit_include_name(include.version));
	format!(
		"{}\n{}\n#ifdef GL_GLEXT_PROTOTYPES\n{}\n#endif\n",
		banner.cpp(GL_EXT_SOURCE, &[
			&file,
			"  Function declarations for the EGL_ANGLE_explicit_context extension"
		]),
		include.pointers.join(),
		include.prototypes.join(),
	)
}
