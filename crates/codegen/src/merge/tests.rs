use pretty_assertions::assert_eq;

use super::*;
use crate::error::GenError;

const REGISTRY: &str = r#"{
	"commands": [
		{ "name": "glDrawArrays", "proto": "void glDrawArrays", "params": ["GLenum mode", "GLint first", "GLsizei count"] },
		{ "name": "glGetError", "proto": "GLenum glGetError" },
		{ "name": "glDrawArraysInstanced", "proto": "void glDrawArraysInstanced", "params": ["GLenum mode", "GLint first", "GLsizei count", "GLsizei instancecount"] },
		{ "name": "glDispatchCompute", "proto": "void glDispatchCompute", "params": ["GLuint num_groups_x", "GLuint num_groups_y", "GLuint num_groups_z"] },
		{ "name": "glAlphaFunc", "proto": "void glAlphaFunc", "params": ["GLenum func", "GLfloat ref"] },
		{ "name": "glGetPointerv", "proto": "void glGetPointerv", "params": ["GLenum pname", "void **params"] },
		{ "name": "glBindVertexArrayOES", "proto": "void glBindVertexArrayOES", "params": ["GLuint array"] },
		{ "name": "glDrawTexiOES", "proto": "void glDrawTexiOES", "params": ["GLint x", "GLint y", "GLint z", "GLint width", "GLint height"] },
		{ "name": "glGenFramebuffersOES", "proto": "void glGenFramebuffersOES", "params": ["GLsizei n", "GLuint *framebuffers"] }
	],
	"versions": {
		"2_0": ["glDrawArrays", "glGetError"],
		"3_0": ["glDrawArraysInstanced"],
		"3_1": ["glDispatchCompute"],
		"1_0": ["glAlphaFunc", "glGetPointerv"]
	},
	"extensions": {
		"GL_OES_draw_texture": { "commands": ["glDrawTexiOES"] },
		"GL_OES_framebuffer_object": { "commands": ["glGenFramebuffersOES"] },
		"GL_OES_vertex_array_object": { "commands": ["glBindVertexArrayOES"] },
		"GL_OES_vertex_array_object_alias": {
			"commands": ["glBindVertexArrayOES"],
			"already_defined": ["glBindVertexArrayOES"]
		}
	},
	"packed_enums": {
		"glDrawArrays": { "mode": "PrimitiveMode" },
		"glAlphaFunc": { "func": "AlphaTestFunc" }
	},
	"gles1_extensions": ["GL_OES_draw_texture", "GL_OES_framebuffer_object", "GL_OES_point_size_array"],
	"explicit_context": true,
	"ext_headers": { "glext": ["glDrawTexiOES"], "gl2ext": ["glBindVertexArrayOES"] },
	"egl": {
		"versions": { "1_0": ["eglGetDisplay"], "1_1": [] },
		"extensions": { "EGL_ANGLE_device_query": ["eglQueryDeviceANGLE"], "EGL_KHR_empty": [] }
	}
}"#;

fn snapshot() -> RegistrySnapshot {
	let snapshot = RegistrySnapshot::from_json_str(REGISTRY).unwrap();
	snapshot.validate().unwrap();
	snapshot
}

fn merge(snapshot: &RegistrySnapshot) -> MergedFragments {
	let catalog = Catalog::from_snapshot(snapshot).unwrap();
	MergeEngine::new(&catalog, snapshot, &GenConfig::default()).run().unwrap()
}

fn export_sections(merged: &MergedFragments) -> Vec<&str> {
	merged
		.export_symbols
		.as_slice()
		.iter()
		.filter_map(|line| line.strip_prefix("\n    ; "))
		.collect()
}

#[test]
fn fragments_join_with_newlines() {
	let mut fragments = Fragments::default();
	assert!(fragments.is_empty());
	fragments.push("a");
	fragments.push(String::from("b"));
	assert_eq!(fragments.len(), 2);
	assert_eq!(fragments.join(), "a\nb");
}

#[test]
fn core_versions_follow_processing_order() {
	let merged = merge(&snapshot());
	let versions: Vec<_> = merged.versions.iter().map(|v| v.version).collect();
	assert_eq!(versions, GlesVersion::PROCESSING_ORDER);

	let es2 = &merged.versions[0];
	assert_eq!(es2.declarations.len(), 2);
	assert_eq!(
		es2.declarations.as_slice()[0],
		"ANGLE_EXPORT void GL_APIENTRY DrawArrays(GLenum mode, GLint first, GLsizei count);"
	);
	assert_eq!(
		es2.validation.as_slice()[0],
		"bool ValidateDrawArrays(Context *context, PrimitiveMode modePacked, GLint first, GLsizei count);"
	);
	assert!(es2.definitions.as_slice()[1].contains("GetGlobalContext()"));
}

#[test]
fn export_sections_in_annotation_order() {
	let merged = merge(&snapshot());
	assert_eq!(export_sections(&merged), [
		"OpenGL ES 2.0",
		"OpenGL ES 3.0",
		"OpenGL ES 3.1",
		"OpenGL ES 1.0",
		"GL_OES_draw_texture",
		"GL_OES_framebuffer_object",
		"GL_OES_vertex_array_object",
		"GL_OES_vertex_array_object_alias",
		"EGL_ANGLE_explicit_context",
		"EGL 1.0",
		"EGL_ANGLE_device_query",
	]);
}

#[test]
fn export_symbols_sorted_within_section() {
	let merged = merge(&snapshot());
	let lines = merged.export_symbols.as_slice();
	let start = lines.iter().position(|l| l == "\n    ; OpenGL ES 1.0").unwrap();
	assert_eq!(&lines[start + 1..start + 3], ["    glAlphaFunc", "    glGetPointerv"]);

	let start = lines.iter().position(|l| l == "\n    ; OpenGL ES 2.0").unwrap();
	assert_eq!(&lines[start + 1..start + 3], ["    glDrawArrays", "    glGetError"]);
}

#[test]
fn aliased_command_gets_marker_and_keeps_export() {
	let merged = merge(&snapshot());
	let marker = "// BindVertexArrayOES is already defined.\n";
	let markers = merged.ext_definitions.as_slice().iter().filter(|f| *f == marker).count();
	assert_eq!(markers, 1);

	let declaration = "ANGLE_EXPORT void GL_APIENTRY BindVertexArrayOES(GLuint array);";
	let declarations = merged.ext_declarations.as_slice().iter().filter(|f| *f == declaration).count();
	assert_eq!(declarations, 1);
	let validations = merged
		.ext_validation
		.as_slice()
		.iter()
		.filter(|f| f.starts_with("bool ValidateBindVertexArrayOES("))
		.count();
	assert_eq!(validations, 1);
	let wrappers = merged
		.export_wrappers
		.as_slice()
		.iter()
		.filter(|f| f.starts_with("void GL_APIENTRY glBindVertexArrayOES("))
		.count();
	assert_eq!(wrappers, 1);

	let exports = merged
		.export_symbols
		.as_slice()
		.iter()
		.filter(|f| *f == "    glBindVertexArrayOES")
		.count();
	assert_eq!(exports, 2);
}

#[test]
fn marker_follows_its_extension_heading() {
	let merged = merge(&snapshot());
	let defs = merged.ext_definitions.as_slice();
	let heading = defs
		.iter()
		.position(|f| f == "\n// GL_OES_vertex_array_object_alias")
		.unwrap();
	assert_eq!(defs[heading + 1], "// BindVertexArrayOES is already defined.\n");
}

#[test]
fn gles1_context_interface() {
	let merged = merge(&snapshot());
	// Overloaded commands are declared by hand on the context.
	assert_eq!(merged.context_core.as_slice(), [
		"    void alphaFunc(AlphaTestFunc funcPacked, GLfloat ref); \\"
	]);

	let keys: Vec<_> = merged.context_extensions.keys().map(String::as_str).collect();
	assert_eq!(keys, ["GL_OES_draw_texture", "GL_OES_framebuffer_object", "GL_OES_point_size_array"]);
	assert_eq!(merged.context_extensions["GL_OES_draw_texture"].as_slice(), [
		"    void drawTexi(GLint x, GLint y, GLint z, GLint width, GLint height); \\"
	]);
	assert!(merged.context_extensions["GL_OES_framebuffer_object"].is_empty());
	assert!(merged.context_extensions["GL_OES_point_size_array"].is_empty());
}

#[test]
fn explicit_context_entry_points() {
	let merged = merge(&snapshot());
	assert!(merged.ext_declarations.as_slice().contains(
		&"ANGLE_EXPORT void GL_APIENTRY DrawArraysContextANGLE(GLeglContext ctx, GLenum mode, GLint first, GLsizei count);"
			.to_string()
	));

	let lines = merged.export_symbols.as_slice();
	let start = lines
		.iter()
		.position(|l| l == "\n    ; EGL_ANGLE_explicit_context")
		.unwrap();
	assert_eq!(lines[start + 1], "    glAlphaFuncContextANGLE");
	// One explicit variant per referenced command, aliases included once.
	let explicit = lines.iter().filter(|l| l.ends_with("ContextANGLE")).count();
	assert_eq!(explicit, 9);
}

#[test]
fn explicit_context_includes_per_version() {
	let merged = merge(&snapshot());
	let versions: Vec<_> = merged.explicit_includes.iter().map(|i| i.version).collect();
	assert_eq!(versions, GlesVersion::PROCESSING_ORDER);

	let es1 = &merged.explicit_includes[3];
	assert_eq!(es1.prototypes.len(), 3);
	assert!(es1.prototypes.as_slice().iter().all(|p| p.starts_with("GL_API ")));
	assert_eq!(
		es1.prototypes.as_slice()[2],
		"GL_API void GL_APIENTRY glDrawTexiOESContextANGLE(GLeglContext ctx, GLint x, GLint y, GLint z, GLint width, GLint height);"
	);

	let es2 = &merged.explicit_includes[0];
	assert_eq!(es2.pointers.len(), 3);
	assert_eq!(
		es2.pointers.as_slice()[2],
		"typedef void (GL_APIENTRYP PFNGLBINDVERTEXARRAYOESCONTEXTANGLEPROC)(GLeglContext ctx, GLuint array);"
	);
	assert!(es2.prototypes.as_slice().iter().all(|p| p.starts_with("GL_APICALL ")));

	assert_eq!(merged.explicit_includes[1].prototypes.len(), 1);
	assert_eq!(merged.explicit_includes[2].prototypes.len(), 1);
}

#[test]
fn explicit_context_disabled() {
	let mut snapshot = snapshot();
	snapshot.explicit_context = false;
	let merged = merge(&snapshot);
	assert!(merged.explicit_includes.is_empty());
	assert!(!export_sections(&merged).contains(&EXPLICIT_CONTEXT_EXTENSION));
	assert!(
		!merged
			.ext_declarations
			.as_slice()
			.iter()
			.any(|d| d.contains(EXPLICIT_CONTEXT_EXTENSION) || d.contains("ContextANGLE"))
	);
}

#[test]
fn egl_exports_use_alias_names() {
	let merged = merge(&snapshot());
	let lines = merged.export_symbols.as_slice();
	assert!(lines.contains(&"    EGL_GetDisplay".to_string()));
	assert!(lines.contains(&"    EGL_QueryDeviceANGLE".to_string()));
	let sections = export_sections(&merged);
	assert!(!sections.contains(&"EGL 1.1"));
	assert!(!sections.contains(&"EGL_KHR_empty"));
}

#[test]
fn entry_point_enum_lines() {
	let merged = merge(&snapshot());
	assert_eq!(merged.entry_points.as_slice(), [
		"    Invalid,",
		"    AlphaFunc,",
		"    BindVertexArrayOES,",
		"    DispatchCompute,",
		"    DrawArrays,",
		"    DrawArraysInstanced,",
		"    DrawTexiOES,",
		"    GenFramebuffersOES,",
		"    GetError,",
		"    GetPointerv",
	]);
}

#[test]
fn merge_is_deterministic() {
	let snapshot = snapshot();
	assert_eq!(merge(&snapshot), merge(&snapshot));
}

#[test]
fn unclassified_type_aborts_merge() {
	let mut snapshot = snapshot();
	snapshot.commands[3].params = vec!["GLhalf x".into()];
	let catalog = Catalog::from_snapshot(&snapshot).unwrap();
	let err = MergeEngine::new(&catalog, &snapshot, &GenConfig::default())
		.run()
		.unwrap_err();
	assert!(matches!(err, GenError::UnclassifiedType { ref command, .. } if command == "glDispatchCompute"));
}
