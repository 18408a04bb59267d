//! Provider-side consistency checks.
//!
//! The generator trusts the alias records completely, so any command exposed
//! by two annotations must be declared as an alias by the later one. These
//! checks run once at load time; the generator itself never looks for
//! duplicates.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::error::{RegistryError, Result};
use crate::snapshot::RegistrySnapshot;
use crate::version::GlesVersion;

impl RegistrySnapshot {
	/// Checks catalog uniqueness, version presence, command references and
	/// alias records.
	pub fn validate(&self) -> Result<()> {
		let mut catalog = HashSet::with_capacity(self.commands.len());
		for cmd in &self.commands {
			if !catalog.insert(cmd.name.as_str()) {
				return Err(RegistryError::DuplicateCommand(cmd.name.clone()));
			}
		}

		// First definer of each command, in processing order.
		let mut owners: HashMap<&str, String> = HashMap::new();

		for version in GlesVersion::PROCESSING_ORDER {
			let annotation = format!("GLES {}", version.dotted());
			for name in self.version_commands(version)? {
				require_known(&catalog, &annotation, name)?;
				if let Some(first) = owners.get(name.as_str()) {
					return Err(RegistryError::UndeclaredDuplicate {
						command: name.clone(),
						first: first.clone(),
						second: annotation,
					});
				}
				owners.insert(name.as_str(), annotation.clone());
			}
		}

		for (ext_name, ext) in &self.extensions {
			for alias in &ext.already_defined {
				if !ext.commands.contains(alias) {
					return Err(RegistryError::AliasNotExposed {
						extension: ext_name.clone(),
						command: alias.clone(),
					});
				}
			}

			for name in &ext.commands {
				require_known(&catalog, ext_name, name)?;
				let first = owners.get(name.as_str()).cloned();
				match (first, ext.is_aliased(name)) {
					(Some(first), false) => {
						return Err(RegistryError::UndeclaredDuplicate {
							command: name.clone(),
							first,
							second: ext_name.clone(),
						});
					}
					(None, true) => {
						return Err(RegistryError::DanglingAlias {
							extension: ext_name.clone(),
							command: name.clone(),
						});
					}
					(Some(_), true) => {}
					(None, false) => {
						owners.insert(name.as_str(), ext_name.clone());
					}
				}
			}
		}

		for (header, names) in [("glext", &self.ext_headers.glext), ("gl2ext", &self.ext_headers.gl2ext)] {
			for name in names {
				require_known(&catalog, header, name)?;
			}
		}

		for command in self.packed_enums.keys() {
			if !catalog.contains(command.as_str()) {
				warn!(command = %command, "packed enum override for unknown command");
			}
		}

		Ok(())
	}
}

fn require_known(catalog: &HashSet<&str>, annotation: &str, name: &str) -> Result<()> {
	if catalog.contains(name) {
		Ok(())
	} else {
		Err(RegistryError::UnknownCommand {
			annotation: annotation.to_string(),
			command: name.to_string(),
		})
	}
}
