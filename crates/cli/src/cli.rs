use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use epgen_codegen::{GeneratedFile, INPUT_SOURCES, output_paths};

#[derive(Parser, Debug)]
#[command(name = "epgen")]
#[command(about = "Generates GL entry points, validation prototypes and exports from a registry snapshot")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Build-system query: `inputs` or `outputs`
	pub query: Option<String>,

	/// Registry snapshot produced by the XML indexer
	#[arg(long, value_name = "PATH", default_value = "registry_snapshot.json")]
	pub registry: PathBuf,

	/// TOML file overriding the generation tables
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Root directory the generated tree is written under
	#[arg(long, value_name = "DIR", default_value = ".")]
	pub out_dir: PathBuf,

	/// Copyright year stamped into banners (defaults to the current year)
	#[arg(long)]
	pub year: Option<i32>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

/// Answers a build-system dependency query with a comma-joined list.
/// Returns `None` for anything but `inputs` and `outputs`.
pub fn answer_query(query: &str) -> Option<String> {
	match query {
		"inputs" => Some(INPUT_SOURCES.join(",")),
		"outputs" => Some(output_paths().join(",")),
		_ => None,
	}
}

/// Writes every file under `root`, creating parent directories.
///
/// Files are first written into a staging directory inside `root` and only
/// moved into place once all of them were written. The staging directory is
/// removed on return either way.
pub fn write_files(root: &Path, files: &[GeneratedFile]) -> anyhow::Result<()> {
	fs::create_dir_all(root).with_context(|| format!("creating {}", root.display()))?;
	let staging = tempfile::Builder::new()
		.prefix(".epgen-staging-")
		.tempdir_in(root)
		.with_context(|| format!("creating staging directory in {}", root.display()))?;

	for file in files {
		write_file(&staging.path().join(&file.path), &file.contents)?;
	}

	for file in files {
		let staged = staging.path().join(&file.path);
		let target = root.join(&file.path);
		create_parent(&target)?;
		fs::rename(&staged, &target).with_context(|| format!("moving {} into place", target.display()))?;
	}
	Ok(())
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
	create_parent(path)?;
	fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
	match path.parent() {
		Some(parent) => fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display())),
		None => Ok(()),
	}
}
