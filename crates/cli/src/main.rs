//! epgen binary.
//!
//! Loads a registry snapshot, generates every entry point artifact in memory
//! and writes the tree out only once generation has fully succeeded.

mod cli;

use std::process::ExitCode;

use anyhow::Context;
use chrono::{Datelike, Local};
use clap::Parser;
use epgen_codegen::{GenConfig, generate};
use epgen_registry_spec::RegistrySnapshot;
use tracing::{error, info};

use crate::cli::{Cli, answer_query, write_files};

fn main() -> ExitCode {
	let cli = Cli::parse();

	if let Some(query) = cli.query.as_deref() {
		return match answer_query(query) {
			Some(list) => {
				println!("{list}");
				ExitCode::SUCCESS
			}
			None => {
				println!("Invalid script parameters");
				ExitCode::FAILURE
			}
		};
	}

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.finish();
	if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
		eprintln!("epgen: failed to install logger: {err}");
		return ExitCode::FAILURE;
	}

	match run(&cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{err:#}");
			ExitCode::FAILURE
		}
	}
}

fn run(cli: &Cli) -> anyhow::Result<()> {
	let snapshot = RegistrySnapshot::load(&cli.registry)
		.with_context(|| format!("loading registry snapshot {}", cli.registry.display()))?;
	let config = match &cli.config {
		Some(path) => GenConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
		None => GenConfig::default(),
	};
	let year = cli.year.unwrap_or_else(|| Local::now().year());

	let files = generate(&snapshot, &config, year)?;
	write_files(&cli.out_dir, &files)?;

	info!(files = files.len(), out_dir = %cli.out_dir.display(), "wrote generated entry points");
	Ok(())
}
