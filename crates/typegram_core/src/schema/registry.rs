use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use crate::schema::descriptor::TypeDescriptor;
use crate::schema::host;
use crate::schema::record::{DEFAULT_ENTITY_CATEGORY, DynamicRecord, IDENTITY_FIELD};
use crate::schema::value::Value;
use crate::schema::{Result, SchemaError};

static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();

/// Outcome of offering a descriptor to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
	/// The name was new and the descriptor was stored.
	Added,
	/// The name was already present; the stored descriptor is unchanged.
	AlreadyKnown,
}

/// Append-only accumulator used while a catalogue is loading.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
	types: BTreeMap<Box<str>, TypeDescriptor>,
	host: BTreeSet<Box<str>>,
}

impl RegistryBuilder {
	/// Create an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Seed a hand-written host definition.
	pub fn seed_host(&mut self, descriptor: TypeDescriptor) -> Registration {
		let name = descriptor.name.clone();
		let outcome = self.register(descriptor);
		if outcome == Registration::Added {
			self.host.insert(name);
		}
		outcome
	}

	/// Store a descriptor unless its name is already known.
	pub fn register(&mut self, descriptor: TypeDescriptor) -> Registration {
		if self.types.contains_key(&descriptor.name) {
			return Registration::AlreadyKnown;
		}
		self.types.insert(descriptor.name.clone(), descriptor);
		Registration::Added
	}

	/// Whether a name is registered, from any source.
	pub fn is_known(&self, name: &str) -> bool {
		self.types.contains_key(name)
	}

	/// Whether a name was seeded from a host definition.
	pub fn is_host_defined(&self, name: &str) -> bool {
		self.host.contains(name)
	}

	/// Freeze into a read-only registry.
	pub fn build(self) -> TypeRegistry {
		TypeRegistry { types: self.types }
	}
}

/// Read-only map from struct name to compiled descriptor.
///
/// Host-seeded and catalogue-derived descriptors are indistinguishable here.
/// The registry has no mutation API; it is safe to share across threads once
/// built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
	types: BTreeMap<Box<str>, TypeDescriptor>,
}

impl TypeRegistry {
	/// Start building a registry.
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::new()
	}

	/// Look up a descriptor by struct name.
	pub fn lookup(&self, name: &str) -> Option<&TypeDescriptor> {
		self.types.get(name)
	}

	/// Whether a struct name is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.types.contains_key(name)
	}

	/// Number of registered descriptors.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	/// Whether no descriptors are registered.
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Registered descriptors in name order.
	pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
		self.types.values()
	}

	/// Construct an empty record of the named type.
	///
	/// Reference fields are populated with empty nested records, recursively;
	/// scalar fields stay unset. A name missing from the registry yields a
	/// generic record with no fields. The host wrappers `DynamicEntity` and
	/// `DynamicAsset` come back entity- and asset-shaped; use
	/// [`Self::instantiate_entity`] or [`Self::instantiate_asset`] to name the
	/// wrapped type.
	pub fn instantiate(&self, name: &str) -> Result<DynamicRecord> {
		let mut chain = Vec::new();
		self.instantiate_impl(name, &mut chain)
	}

	/// Empty entity record for `entity_name` in `category`.
	pub fn instantiate_entity(&self, entity_name: &str, category: &str) -> DynamicRecord {
		DynamicRecord::entity(entity_name, category)
	}

	/// Empty asset record for `asset_name`.
	pub fn instantiate_asset(&self, asset_name: &str) -> DynamicRecord {
		DynamicRecord::asset(asset_name)
	}

	fn instantiate_impl(&self, name: &str, chain: &mut Vec<Box<str>>) -> Result<DynamicRecord> {
		if chain.iter().any(|item| &**item == name) {
			let mut parts: Vec<&str> = chain.iter().map(|item| &**item).collect();
			parts.push(name);
			return Err(SchemaError::RecursiveType { chain: parts.join(" -> ") });
		}

		// Wrapper type descriptors and field pairs are written by the serializer.
		match name {
			host::DYNAMIC_ENTITY => return Ok(self.instantiate_entity(name, DEFAULT_ENTITY_CATEGORY)),
			host::DYNAMIC_ASSET => return Ok(self.instantiate_asset(name)),
			_ => {}
		}

		let mut record = DynamicRecord::new(name);
		let Some(descriptor) = self.lookup(name) else {
			tracing::debug!(type_name = name, "type not in registry, record stays generic");
			return Ok(record);
		};

		chain.push(name.into());
		for (field, target) in descriptor.references() {
			if field == IDENTITY_FIELD {
				tracing::debug!(type_name = name, target, "identity slot declared as a reference, left unset");
				continue;
			}
			let nested = self.instantiate_impl(target, chain)?;
			record.set(field, Value::Record(nested))?;
		}
		chain.pop();

		Ok(record)
	}

	/// Publish this registry process-wide. Only the first call succeeds.
	pub fn install(self) -> Result<&'static TypeRegistry> {
		let mut installed = false;
		let registry = GLOBAL.get_or_init(|| {
			installed = true;
			self
		});
		if installed { Ok(registry) } else { Err(SchemaError::RegistryAlreadyInstalled) }
	}

	/// The process-wide registry, once installed.
	pub fn global() -> Option<&'static TypeRegistry> {
		GLOBAL.get()
	}
}

#[cfg(test)]
mod tests;
