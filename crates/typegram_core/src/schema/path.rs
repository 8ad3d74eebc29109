use crate::schema::record::DynamicRecord;
use crate::schema::value::Value;
use crate::schema::{Result, SchemaError};

/// One parsed operation in a field path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a named record field.
	Field(String),
	/// Select an array element by zero-based index.
	Index(usize),
}

/// Parsed field path expression, e.g. `RetrieveResult.DynamicEntity[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
	source: String,
}

impl FieldPath {
	/// Parse dotted field syntax with optional `[index]` selectors.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || SchemaError::InvalidFieldPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
				idx += 1;
			}
			if idx == start {
				return Err(invalid());
			}
			steps.push(PathStep::Field(input[start..idx].to_owned()));

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(invalid());
				}
				let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self {
			steps,
			source: input.to_owned(),
		})
	}

	/// Original path text.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// Resolve against a record; any missing step yields `None`.
	pub fn resolve<'a>(&self, root: &'a DynamicRecord) -> Option<&'a Value> {
		let mut steps = self.steps.iter();
		let mut current = match steps.next()? {
			PathStep::Field(name) => root.field(name)?,
			PathStep::Index(_) => return None,
		};

		for step in steps {
			current = match (step, current) {
				(PathStep::Field(name), Value::Record(record)) => record.field(name)?,
				(PathStep::Index(index), Value::Array(items)) => items.get(*index)?,
				_ => return None,
			};
		}

		Some(current)
	}
}
