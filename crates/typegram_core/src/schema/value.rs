use crate::schema::record::DynamicRecord;

/// Runtime value held by a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Integer scalar.
	Int(i64),
	/// Floating-point scalar.
	Double(f64),
	/// Text scalar; dates, times and base64 payloads also travel as text.
	String(Box<str>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Nested record.
	Record(DynamicRecord),
}

impl Value {
	/// Stable lowercase label for the value kind.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Double(_) => "double",
			Self::String(_) => "string",
			Self::Array(_) => "array",
			Self::Record(_) => "record",
		}
	}

	/// Whether this is [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow text content.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Integer content.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::Int(value) => Some(*value),
			_ => None,
		}
	}

	/// Numeric content, widening integers.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Int(value) => Some(*value as f64),
			Self::Double(value) => Some(*value),
			_ => None,
		}
	}

	/// Boolean content.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Borrow array items.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow a nested record.
	pub fn as_record(&self) -> Option<&DynamicRecord> {
		match self {
			Self::Record(record) => Some(record),
			_ => None,
		}
	}

	/// Mutably borrow a nested record.
	pub fn as_record_mut(&mut self) -> Option<&mut DynamicRecord> {
		match self {
			Self::Record(record) => Some(record),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Double(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into_boxed_str())
	}
}

impl From<DynamicRecord> for Value {
	fn from(value: DynamicRecord) -> Self {
		Self::Record(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Array(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Self::Null, Into::into)
	}
}
