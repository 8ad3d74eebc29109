use serde::Serialize;

use crate::schema::token::NativeType;

/// Compiled shape of one remote struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
	/// Struct name.
	pub name: Box<str>,
	/// Field declarations in source order.
	pub fields: Vec<FieldSpec>,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
	/// Field identifier.
	pub name: Box<str>,
	/// Scalar or struct reference.
	pub kind: FieldKind,
}

/// Value category of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
	/// Primitive value.
	Scalar {
		/// Declared native type.
		native: NativeType,
	},
	/// Nested struct value, always present on constructed records.
	Reference {
		/// Target struct name.
		target: Box<str>,
	},
}

impl TypeDescriptor {
	/// Create a descriptor with no fields.
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	/// Builder-style scalar field append.
	pub fn with_scalar(mut self, name: impl Into<Box<str>>, native: NativeType) -> Self {
		self.fields.push(FieldSpec {
			name: name.into(),
			kind: FieldKind::Scalar { native },
		});
		self
	}

	/// Builder-style reference field append.
	pub fn with_reference(mut self, name: impl Into<Box<str>>, target: impl Into<Box<str>>) -> Self {
		self.fields.push(FieldSpec {
			name: name.into(),
			kind: FieldKind::Reference { target: target.into() },
		});
		self
	}

	/// Look up a field declaration by name.
	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.fields.iter().find(|item| &*item.name == name)
	}

	/// Fields that construction must eagerly populate.
	pub fn references(&self) -> impl Iterator<Item = (&str, &str)> {
		self.fields.iter().filter_map(|item| match &item.kind {
			FieldKind::Reference { target } => Some((&*item.name, &**target)),
			FieldKind::Scalar { .. } => None,
		})
	}
}

impl FieldSpec {
	/// Whether record construction must populate this field up front.
	pub fn is_always_initialized(&self) -> bool {
		matches!(self.kind, FieldKind::Reference { .. })
	}

	/// Referenced struct name, when this is a reference field.
	pub fn target(&self) -> Option<&str> {
		match &self.kind {
			FieldKind::Reference { target } => Some(target),
			FieldKind::Scalar { .. } => None,
		}
	}
}
