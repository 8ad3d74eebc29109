use serde_json::{Map, Value as JsonValue};

use crate::schema::descriptor::FieldSpec;
use crate::schema::record::{DEFAULT_ENTITY_CATEGORY, DynamicRecord, RecordShape};
use crate::schema::registry::TypeRegistry;
use crate::schema::value::Value;
use crate::schema::{Result, SchemaError};

const FIELD_COLLECTION: &str = "FieldValueCollection";
const INTERNAL_NAME: &str = "InternalName";
const VALUE: &str = "Value";
const WRAPPER_IDENTITY: &str = "Id";

/// Runtime limits for reply decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nested object depth.
	pub max_depth: u32,
	/// Maximum allowed array element count.
	pub max_array_elems: usize,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			max_array_elems: 10_000,
		}
	}
}

impl DecodeOptions {
	/// Preset for quick interactive inspection of untrusted payloads.
	pub fn for_inspection() -> Self {
		Self {
			max_depth: 12,
			max_array_elems: 1_000,
		}
	}
}

/// Turns JSON reply payloads into record trees, guided by the registry.
#[derive(Debug, Clone)]
pub struct ReplyDecoder<'a> {
	registry: &'a TypeRegistry,
	options: DecodeOptions,
}

impl<'a> ReplyDecoder<'a> {
	/// Create a decoder over `registry`.
	pub fn new(registry: &'a TypeRegistry, options: DecodeOptions) -> Self {
		Self { registry, options }
	}

	/// Decode a JSON reply whose top level is a `type_name` struct.
	///
	/// Fields the reply omits stay absent; nothing is filled from the registry.
	pub fn decode_slice(&self, type_name: &str, bytes: &[u8]) -> Result<DynamicRecord> {
		let payload: JsonValue = serde_json::from_slice(bytes)?;
		self.decode_reply(type_name, &payload)
	}

	/// Decode an already parsed JSON reply.
	///
	/// A plain object's `ID` key feeds the record identity, so it must hold an
	/// integer or null; any other value fails with
	/// [`SchemaError::IdentityNotNumeric`] rather than being stored as a field.
	pub fn decode_reply(&self, type_name: &str, payload: &JsonValue) -> Result<DynamicRecord> {
		match payload {
			JsonValue::Object(map) => self.decode_object(type_name, map, 0),
			other => Err(SchemaError::ReplyNotObject { got: json_kind(other) }),
		}
	}

	fn decode_object(&self, type_name: &str, map: &Map<String, JsonValue>, depth: u32) -> Result<DynamicRecord> {
		if depth >= self.options.max_depth {
			return Err(SchemaError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		if let Some(record) = self.decode_wrapper(map, depth)? {
			return Ok(record);
		}

		let mut record = DynamicRecord::new(type_name);
		let descriptor = self.registry.lookup(type_name);

		for (key, value) in map {
			let hint = descriptor.and_then(|item| item.field(key)).and_then(FieldSpec::target).unwrap_or(key.as_str());
			let decoded = self.decode_value(hint, value, depth)?;
			record.set(key, decoded)?;
		}

		Ok(record)
	}

	/// Decode entity/asset wrappers, which carry their fields as
	/// `{InternalName, Value}` pairs instead of object keys.
	fn decode_wrapper(&self, map: &Map<String, JsonValue>, depth: u32) -> Result<Option<DynamicRecord>> {
		let (type_key, entries_key) = if map.contains_key("EntityType") {
			("EntityType", "EntityFields")
		} else if map.contains_key("AssetType") {
			("AssetType", "AssetFields")
		} else {
			return Ok(None);
		};
		if !map.contains_key(FIELD_COLLECTION) {
			return Ok(None);
		}

		let descriptor = map.get(type_key).and_then(JsonValue::as_object);
		let name = descriptor.and_then(|item| item.get("Name")).and_then(JsonValue::as_str).unwrap_or_default();
		let shape = if type_key == "EntityType" {
			let category = descriptor
				.and_then(|item| item.get("Type"))
				.and_then(JsonValue::as_str)
				.unwrap_or(DEFAULT_ENTITY_CATEGORY);
			RecordShape::Entity { category: category.into() }
		} else {
			RecordShape::Asset
		};

		let mut record = DynamicRecord::with_shape(name, shape);
		match map.get(WRAPPER_IDENTITY) {
			None | Some(JsonValue::Null) => {}
			Some(JsonValue::Number(number)) if number.as_i64().is_some() => record.set_identity(number.as_i64()),
			Some(other) => return Err(SchemaError::IdentityNotNumeric { got: json_kind(other) }),
		}

		let entries = map
			.get(FIELD_COLLECTION)
			.and_then(JsonValue::as_object)
			.and_then(|collection| collection.get(entries_key));
		let path = format!("{FIELD_COLLECTION}.{entries_key}");

		// A single entry arrives unwrapped rather than as a one-element list.
		let entries: &[JsonValue] = match entries {
			None | Some(JsonValue::Null) => &[],
			Some(JsonValue::Array(items)) => items,
			Some(single @ JsonValue::Object(_)) => std::slice::from_ref(single),
			Some(other) => return Err(SchemaError::ReplyShape { path, got: json_kind(other) }),
		};
		self.check_array_len(entries.len())?;

		for entry in entries {
			let field = entry.as_object().ok_or_else(|| SchemaError::ReplyShape {
				path: path.clone(),
				got: json_kind(entry),
			})?;
			let field_name = field.get(INTERNAL_NAME).and_then(JsonValue::as_str).ok_or_else(|| SchemaError::ReplyShape {
				path: format!("{path}.{INTERNAL_NAME}"),
				got: field.get(INTERNAL_NAME).map_or("null", json_kind),
			})?;
			let value = match field.get(VALUE) {
				Some(value) => self.decode_value(field_name, value, depth)?,
				None => Value::Null,
			};
			record.set(field_name, value)?;
		}

		Ok(Some(record))
	}

	fn decode_value(&self, type_hint: &str, value: &JsonValue, depth: u32) -> Result<Value> {
		Ok(match value {
			JsonValue::Null => Value::Null,
			JsonValue::Bool(value) => Value::Bool(*value),
			JsonValue::Number(number) => match number.as_i64() {
				Some(int) => Value::Int(int),
				None => Value::Double(number.as_f64().unwrap_or(f64::NAN)),
			},
			JsonValue::String(text) => Value::String(text.as_str().into()),
			JsonValue::Array(items) => {
				self.check_array_len(items.len())?;
				let mut out = Vec::with_capacity(items.len());
				for item in items {
					out.push(self.decode_value(type_hint, item, depth + 1)?);
				}
				Value::Array(out)
			}
			JsonValue::Object(map) => Value::Record(self.decode_object(type_hint, map, depth + 1)?),
		})
	}

	fn check_array_len(&self, count: usize) -> Result<()> {
		if count > self.options.max_array_elems {
			return Err(SchemaError::ArrayTooLarge {
				count,
				max: self.options.max_array_elems,
			});
		}
		Ok(())
	}
}

fn json_kind(value: &JsonValue) -> &'static str {
	match value {
		JsonValue::Null => "null",
		JsonValue::Bool(_) => "bool",
		JsonValue::Number(_) => "number",
		JsonValue::String(_) => "string",
		JsonValue::Array(_) => "array",
		JsonValue::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests;
