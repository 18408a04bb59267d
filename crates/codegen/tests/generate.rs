#![allow(unused_crate_dependencies)]

use std::path::{Path, PathBuf};

use epgen_codegen::{GenConfig, GenError, GeneratedFile, RegistrySnapshot, generate, output_paths};
use pretty_assertions::assert_eq;

fn fixture() -> RegistrySnapshot {
	let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/registry.json");
	RegistrySnapshot::load(&path).expect("fixture snapshot loads")
}

fn generate_fixture() -> Vec<GeneratedFile> {
	generate(&fixture(), &GenConfig::default(), 2018).expect("fixture generates")
}

fn file<'a>(files: &'a [GeneratedFile], path: &str) -> &'a str {
	let path = PathBuf::from(path);
	&files
		.iter()
		.find(|f| f.path == path)
		.unwrap_or_else(|| panic!("{} not generated", path.display()))
		.contents
}

#[test]
fn generation_is_deterministic() {
	let snapshot = fixture();
	let config = GenConfig::default();
	let first = generate(&snapshot, &config, 2018).unwrap();
	let second = generate(&snapshot, &config, 2018).unwrap();
	assert_eq!(first, second);
}

#[test]
fn every_output_path_is_generated() {
	let files = generate_fixture();
	let generated: Vec<String> = files.iter().map(|f| f.path.display().to_string()).collect();
	assert_eq!(generated, output_paths());
}

#[test]
fn draw_arrays_definition() {
	let files = generate_fixture();
	let source = file(&files, "src/libGLESv2/entry_points_gles_2_0_autogen.cpp");
	assert!(source.contains(
		r#"void GL_APIENTRY DrawArrays(GLenum mode, GLint first, GLsizei count)
{
    ANGLE_SCOPED_GLOBAL_LOCK();
    EVENT("(GLenum mode = 0x%X, GLint first = %d, GLsizei count = %d)", mode, first, count);

    Context *context = GetValidGlobalContext();
    if (context)
    {
        if (context->skipValidation() || ValidateDrawArrays(context, mode, first, count))
        {
            context->drawArrays(mode, first, count);
        }
    }
}
"#
	));
	assert!(source.starts_with("// GENERATED FILE - DO NOT EDIT.\n// Generated by epgen using data from gl.xml.\n"));
	assert!(source.contains("// Copyright 2018 The ANGLE Project Authors. All rights reserved.\n"));

	let header = file(&files, "src/libGLESv2/entry_points_gles_2_0_autogen.h");
	assert!(header.contains("ANGLE_EXPORT void GL_APIENTRY DrawArrays(GLenum mode, GLint first, GLsizei count);\n"));
	let validation = file(&files, "src/libANGLE/validationES2_autogen.h");
	assert!(validation.contains("bool ValidateBindBuffer(Context *context, BufferBinding targetPacked, GLuint buffer);\n"));
}

#[test]
fn aliased_extension_command_is_defined_once_and_exported_twice() {
	let files = generate_fixture();
	let source = file(&files, "src/libGLESv2/entry_points_gles_ext_autogen.cpp");
	assert_eq!(source.matches("void GL_APIENTRY BindVertexArrayOES(GLuint array)\n").count(), 1);
	assert!(source.contains("\n// GL_OES_vertex_array_object_compat\n// BindVertexArrayOES is already defined.\n"));

	let header = file(&files, "src/libGLESv2/entry_points_gles_ext_autogen.h");
	assert_eq!(header.matches("GL_APIENTRY BindVertexArrayOES(").count(), 1);

	let exports = file(&files, "src/libGLESv2/libGLESv2_autogen.def");
	assert_eq!(exports.matches("    glBindVertexArrayOES\n").count(), 2);
}

#[test]
fn export_definition_sections() {
	let files = generate_fixture();
	let exports = file(&files, "src/libGLESv2/libGLESv2_autogen.def");
	let sections: Vec<&str> = exports
		.lines()
		.filter_map(|line| line.strip_prefix("    ; "))
		.collect();
	assert_eq!(sections, [
		"OpenGL ES 2.0",
		"OpenGL ES 3.0",
		"OpenGL ES 3.1",
		"OpenGL ES 1.0",
		"GL_EXT_debug_marker",
		"GL_EXT_map_buffer_range",
		"GL_OES_draw_texture",
		"GL_OES_framebuffer_object",
		"GL_OES_vertex_array_object",
		"GL_OES_vertex_array_object_compat",
		"EGL_ANGLE_explicit_context",
		"EGL 1.0",
		"EGL 1.5",
		"EGL_ANGLE_query_surface_pointer",
	]);
	assert!(exports.contains("\n    ; EGL 1.0\n    EGL_GetDisplay\n    EGL_Initialize\n"));
	assert!(exports.contains("    glDrawArraysContextANGLE\n"));
	assert!(exports.starts_with("; GENERATED FILE - DO NOT EDIT.\n"));
	assert!(exports.contains("LIBRARY libGLESv2\nEXPORTS\n"));
}

#[test]
fn non_void_entry_points_fall_back_once() {
	let files = generate_fixture();
	let source = file(&files, "src/libGLESv2/entry_points_gles_ext_autogen.cpp");
	let fallback = "    return GetDefaultReturnValue<EntryPoint::MapBufferRangeEXT, void *>();\n}\n";
	// Once for the plain entry point, once for the explicit-context variant.
	assert_eq!(source.matches(fallback).count(), 2);
	assert!(source.contains("        BufferBinding targetPacked = FromGLenum<BufferBinding>(target);\n"));
	assert!(source.contains("            return context->mapBufferRange(targetPacked, offset, length, access);\n"));
}

#[test]
fn debug_marker_entry_points_are_not_traced() {
	let files = generate_fixture();
	let source = file(&files, "src/libGLESv2/entry_points_gles_ext_autogen.cpp");
	let start = source.find("void GL_APIENTRY PushGroupMarkerEXT(").unwrap();
	let end = start + source[start..].find("\n}\n").unwrap();
	let body = &source[start..end];
	assert!(!body.contains("EVENT("));
	assert!(body.contains("context->pushGroupMarker(length, marker);"));
}

#[test]
fn gles1_context_interface() {
	let files = generate_fixture();
	let header = file(&files, "src/libANGLE/Context_gles_1_0_autogen.h");
	assert!(header.contains(
		"#define ANGLE_GLES1_CONTEXT_API \\
    void alphaFunc(GLenum func, GLfloat ref); \\
    void matrixMode(MatrixType modePacked); \\
    /* GL_OES_draw_texture */ \\
    void drawTexi(GLint x, GLint y, GLint z, GLint width, GLint height); \\
    /* GL_OES_framebuffer_object */ \\
"
	));
	assert!(!header.contains("getPointerv"));
}

#[test]
fn explicit_context_includes() {
	let files = generate_fixture();
	let gles1 = file(&files, "include/GLES/glext_explicit_context_autogen.inc");
	assert!(gles1.contains(
		"GL_API void GL_APIENTRY glGenFramebuffersOESContextANGLE(GLeglContext ctx, GLsizei n, GLuint *framebuffers);\n"
	));
	let gles2 = file(&files, "include/GLES2/gl2ext_explicit_context_autogen.inc");
	assert!(gles2.contains(
		"typedef const GLubyte *(GL_APIENTRYP PFNGLGETSTRINGCONTEXTANGLEPROC)(GLeglContext ctx, GLenum name);\n"
	));
	assert!(gles2.contains("typedef void (GL_APIENTRYP PFNGLPOPGROUPMARKEREXTCONTEXTANGLEPROC)(GLeglContext ctx);\n"));

	let source = file(&files, "src/libGLESv2/entry_points_gles_ext_autogen.cpp");
	assert!(source.contains("    Context *context = GetGlobalContext();\n"));
	assert!(source.contains("GLenum GL_APIENTRY GetErrorContextANGLE(GLeglContext ctx)\n"));
}

#[test]
fn entry_point_enum() {
	let files = generate_fixture();
	let header = file(&files, "src/libGLESv2/entry_points_enum_autogen.h");
	assert!(header.contains("enum class EntryPoint\n{\n    Invalid,\n    ActiveTexture,\n    AlphaFunc,\n"));
	assert!(header.contains("    PushGroupMarkerEXT\n};\n"));
}

#[test]
fn config_overrides_reach_the_banner() {
	let config = GenConfig::from_toml_str("[banner]\ngenerator = \"gen_entry_points\"\n").unwrap();
	let files = generate(&fixture(), &config, 2024).unwrap();
	let header = file(&files, "src/libGLESv2/entry_points_enum_autogen.h");
	assert!(header.contains("// Generated by gen_entry_points using data from gl.xml and gl_angle_ext.xml.\n"));
	assert!(header.contains("// Copyright 2024 The ANGLE Project Authors."));
}

#[test]
fn unclassified_parameter_type_aborts_generation() {
	let mut snapshot = fixture();
	let command = snapshot
		.commands
		.iter_mut()
		.find(|c| c.name == "glDispatchCompute")
		.unwrap();
	command.params.push("GLhalf extra".into());
	match generate(&snapshot, &GenConfig::default(), 2018) {
		Err(GenError::UnclassifiedType { command, ty }) => {
			assert_eq!(command, "glDispatchCompute");
			assert_eq!(ty, "GLhalf");
		}
		other => panic!("unexpected result: {other:?}"),
	}
}
