use std::borrow::Cow;

use crate::schema::value::Value;
use crate::schema::{Result, SchemaError};

/// Logical field name aliased to a record's identity.
pub const IDENTITY_FIELD: &str = "ID";
/// Category used for entity records when none is given.
pub const DEFAULT_ENTITY_CATEGORY: &str = "Base";

/// Which remote wrapper a record mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordShape {
	/// Plain struct instance.
	Struct,
	/// Entity wrapper with a category discriminator.
	Entity {
		/// Entity category, `Base` unless the service says otherwise.
		category: Box<str>,
	},
	/// Asset wrapper.
	Asset,
}

/// Named field entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Logical field name.
	pub name: Box<str>,
	/// Field payload.
	pub value: Value,
}

/// Record whose field set is driven by runtime type data.
///
/// Fields are kept in insertion order. The logical name [`IDENTITY_FIELD`]
/// always addresses the identity slot and is never stored as a field entry.
/// Cloning yields a fully independent record, nested records included.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
	type_name: Box<str>,
	shape: RecordShape,
	identity: Option<i64>,
	fields: Vec<FieldValue>,
}

impl DynamicRecord {
	/// Empty plain struct record.
	pub fn new(type_name: impl Into<Box<str>>) -> Self {
		Self::with_shape(type_name, RecordShape::Struct)
	}

	/// Empty entity record.
	pub fn entity(type_name: impl Into<Box<str>>, category: impl Into<Box<str>>) -> Self {
		Self::with_shape(type_name, RecordShape::Entity { category: category.into() })
	}

	/// Empty asset record.
	pub fn asset(type_name: impl Into<Box<str>>) -> Self {
		Self::with_shape(type_name, RecordShape::Asset)
	}

	/// Empty record of an explicit shape.
	pub fn with_shape(type_name: impl Into<Box<str>>, shape: RecordShape) -> Self {
		Self {
			type_name: type_name.into(),
			shape,
			identity: None,
			fields: Vec::new(),
		}
	}

	/// Type name the record was built for.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Wrapper shape.
	pub fn shape(&self) -> &RecordShape {
		&self.shape
	}

	/// Identity slot, read by `get("ID")`.
	pub fn identity(&self) -> Option<i64> {
		self.identity
	}

	/// Overwrite the identity slot directly.
	pub fn set_identity(&mut self, identity: Option<i64>) {
		self.identity = identity;
	}

	/// Read a field by logical name; `ID` reads the identity.
	///
	/// Unknown and unset fields read as `None`.
	pub fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
		if name == IDENTITY_FIELD {
			return self.identity.map(|id| Cow::Owned(Value::Int(id)));
		}
		self.field(name).map(Cow::Borrowed)
	}

	/// Write a field by logical name; `ID` writes the identity.
	///
	/// Updates the first field with a matching name, or appends one.
	pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
		let value = value.into();
		if name == IDENTITY_FIELD {
			self.identity = match value {
				Value::Int(id) => Some(id),
				Value::Null => None,
				other => return Err(SchemaError::IdentityNotNumeric { got: other.kind_name() }),
			};
			return Ok(());
		}

		match self.field_mut(name) {
			Some(slot) => *slot = value,
			None => self.fields.push(FieldValue { name: name.into(), value }),
		}
		Ok(())
	}

	/// Delete the first field with a matching name, returning its value.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		let idx = self.fields.iter().position(|item| &*item.name == name)?;
		Some(self.fields.remove(idx).value)
	}

	/// Borrow a stored field, bypassing the identity alias.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|item| &*item.name == name).map(|item| &item.value)
	}

	/// Mutably borrow a stored field, bypassing the identity alias.
	pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
		self.fields.iter_mut().find(|item| &*item.name == name).map(|item| &mut item.value)
	}

	/// Borrow a nested record field.
	pub fn record(&self, name: &str) -> Option<&DynamicRecord> {
		self.field(name).and_then(Value::as_record)
	}

	/// Mutably borrow a nested record field.
	pub fn record_mut(&mut self, name: &str) -> Option<&mut DynamicRecord> {
		self.field_mut(name).and_then(Value::as_record_mut)
	}

	/// Stored fields in order.
	pub fn fields(&self) -> &[FieldValue] {
		&self.fields
	}

	/// Stored field names in insertion order.
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|item| &*item.name)
	}

	/// Number of stored fields, identity excluded.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether no fields are stored.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

#[cfg(test)]
mod tests;
