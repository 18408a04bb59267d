//! Parsed command catalog.

use epgen_registry_spec::RegistrySnapshot;
use indexmap::IndexMap;

use crate::error::{GenError, Result};
use crate::signature::Command;

/// Every catalog command parsed once, in registry order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	commands: IndexMap<String, Command>,
}

impl Catalog {
	pub fn from_snapshot(snapshot: &RegistrySnapshot) -> Result<Self> {
		let commands = snapshot
			.commands
			.iter()
			.map(|spec| Command::from_spec(spec).map(|cmd| (spec.name.clone(), cmd)))
			.collect::<Result<IndexMap<_, _>>>()?;
		Ok(Self { commands })
	}

	pub fn get(&self, name: &str) -> Result<&Command> {
		self.commands.get(name).ok_or_else(|| GenError::UnknownCommand(name.to_string()))
	}

	/// Commands in registry order.
	pub fn iter(&self) -> impl Iterator<Item = &Command> {
		self.commands.values()
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}
}
