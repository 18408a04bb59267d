//! GLES and EGL version tags.

use std::fmt;

/// EGL version annotations, in export order.
pub const EGL_VERSIONS: [&str; 6] = ["1_0", "1_1", "1_2", "1_3", "1_4", "1_5"];

/// A core GLES version annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlesVersion {
	V2_0,
	V3_0,
	V3_1,
	V1_0,
}

impl GlesVersion {
	/// ES2+ is the primary target, so GLES1 is processed last.
	pub const PROCESSING_ORDER: [GlesVersion; 4] = [Self::V2_0, Self::V3_0, Self::V3_1, Self::V1_0];

	pub fn major(self) -> u8 {
		match self {
			Self::V1_0 => 1,
			Self::V2_0 => 2,
			Self::V3_0 | Self::V3_1 => 3,
		}
	}

	pub fn minor(self) -> u8 {
		match self {
			Self::V3_1 => 1,
			_ => 0,
		}
	}

	/// Annotation key used by the registry snapshot, e.g. `"3_1"`.
	pub fn annotation(self) -> &'static str {
		match self {
			Self::V1_0 => "1_0",
			Self::V2_0 => "2_0",
			Self::V3_0 => "3_0",
			Self::V3_1 => "3_1",
		}
	}

	/// Human readable form used in comments, e.g. `"3.1"`.
	pub fn dotted(self) -> &'static str {
		match self {
			Self::V1_0 => "1.0",
			Self::V2_0 => "2.0",
			Self::V3_0 => "3.0",
			Self::V3_1 => "3.1",
		}
	}

	/// Registry feature name the version's commands come from.
	pub fn feature_name(self) -> String {
		match self {
			Self::V1_0 => format!("GL_VERSION_ES_CM_{}", self.annotation()),
			_ => format!("GL_ES_VERSION_{}", self.annotation()),
		}
	}

	pub fn is_gles1(self) -> bool {
		self == Self::V1_0
	}

	/// Compact version tag with the major dropped for GLES1 and the minor
	/// dropped when zero: `""`, `"2"`, `"3"`, `"31"`.
	pub fn compact(self) -> String {
		let major = if self.is_gles1() { String::new() } else { self.major().to_string() };
		format!("{major}{}", self.minor_tag())
	}

	/// Validation header tag: `"1"`, `"2"`, `"3"`, `"31"`.
	pub fn validation_tag(self) -> String {
		format!("{}{}", self.major(), self.minor_tag())
	}

	fn minor_tag(self) -> String {
		match self.minor() {
			0 => String::new(),
			minor => minor.to_string(),
		}
	}
}

impl fmt::Display for GlesVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.annotation())
	}
}
