use std::ops::Index;

use crate::schema::path::FieldPath;
use crate::schema::record::DynamicRecord;
use crate::schema::value::Value;
use crate::schema::{Result, SchemaError};

/// Uniform view over a reply's zero, one, or many records.
///
/// Every element is an independent copy of the reply's record, so callers can
/// mutate what they take out without touching the reply or sibling rows. The
/// sequence itself is immutable once built.
#[derive(Debug, Clone)]
pub struct ResultSequence {
	records: Vec<DynamicRecord>,
	reply: Option<DynamicRecord>,
}

impl ResultSequence {
	/// Normalize the record-bearing field at `path` inside `reply`.
	///
	/// The remaining top-level reply fields stay readable via [`Self::field`].
	pub fn from_reply(reply: DynamicRecord, path: &FieldPath) -> Result<Self> {
		let records = match path.resolve(&reply) {
			Some(value) => normalize(value, path.as_str())?,
			None => Vec::new(),
		};
		Ok(Self { records, reply: Some(reply) })
	}

	/// Normalize a bare value with no surrounding reply.
	pub fn from_value(value: &Value) -> Result<Self> {
		Ok(Self {
			records: normalize(value, "<value>")?,
			reply: None,
		})
	}

	/// Wrap records that are already normalized.
	pub fn from_records(records: Vec<DynamicRecord>) -> Self {
		Self { records, reply: None }
	}

	/// Number of records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether the reply carried no records.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Record at `index`.
	pub fn get(&self, index: usize) -> Option<&DynamicRecord> {
		self.records.get(index)
	}

	/// Fresh forward cursor over the records.
	pub fn iter(&self) -> std::slice::Iter<'_, DynamicRecord> {
		self.records.iter()
	}

	/// Read another top-level reply field, e.g. paging metadata.
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.reply.as_ref().and_then(|reply| reply.field(name))
	}

	/// The reply this sequence was built from.
	pub fn reply(&self) -> Option<&DynamicRecord> {
		self.reply.as_ref()
	}

	/// Take ownership of the records.
	pub fn into_records(self) -> Vec<DynamicRecord> {
		self.records
	}
}

fn normalize(value: &Value, path: &str) -> Result<Vec<DynamicRecord>> {
	match value {
		Value::Null => Ok(Vec::new()),
		Value::Record(record) => Ok(vec![record.clone()]),
		Value::Array(items) => items
			.iter()
			.map(|item| match item {
				Value::Record(record) => Ok(record.clone()),
				other => Err(SchemaError::ReplyShape {
					path: path.to_owned(),
					got: other.kind_name(),
				}),
			})
			.collect(),
		other => Err(SchemaError::ReplyShape {
			path: path.to_owned(),
			got: other.kind_name(),
		}),
	}
}

impl Index<usize> for ResultSequence {
	type Output = DynamicRecord;

	fn index(&self, index: usize) -> &Self::Output {
		&self.records[index]
	}
}

impl<'a> IntoIterator for &'a ResultSequence {
	type Item = &'a DynamicRecord;
	type IntoIter = std::slice::Iter<'a, DynamicRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl IntoIterator for ResultSequence {
	type Item = DynamicRecord;
	type IntoIter = std::vec::IntoIter<DynamicRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.into_iter()
	}
}
