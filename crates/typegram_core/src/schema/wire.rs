use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::schema::record::{DynamicRecord, FieldValue, IDENTITY_FIELD, RecordShape};
use crate::schema::value::Value;

// Records serialize to the payload shape write calls send: wrappers carry
// their type descriptor, an `Id`, and `{InternalName, Value}` field pairs;
// plain structs are objects keyed by field name.

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Self::Null => serializer.serialize_unit(),
			Self::Bool(value) => serializer.serialize_bool(*value),
			Self::Int(value) => serializer.serialize_i64(*value),
			Self::Double(value) => serializer.serialize_f64(*value),
			Self::String(value) => serializer.serialize_str(value),
			Self::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Self::Record(record) => record.serialize(serializer),
		}
	}
}

#[derive(Serialize)]
struct WrapperType<'a> {
	#[serde(rename = "ID")]
	id: i64,
	#[serde(rename = "Name")]
	name: &'a str,
	#[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
	category: Option<&'a str>,
}

#[derive(Serialize)]
struct FieldPair<'a> {
	#[serde(rename = "InternalName")]
	name: &'a str,
	#[serde(rename = "Value")]
	value: &'a Value,
}

struct FieldPairs<'a>(&'a [FieldValue]);

impl Serialize for FieldPairs<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
		for field in self.0 {
			seq.serialize_element(&FieldPair {
				name: &field.name,
				value: &field.value,
			})?;
		}
		seq.end()
	}
}

struct Collection<'a> {
	key: &'static str,
	fields: &'a [FieldValue],
}

impl Serialize for Collection<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(1))?;
		map.serialize_entry(self.key, &FieldPairs(self.fields))?;
		map.end()
	}
}

impl Serialize for DynamicRecord {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let (type_key, entries_key, category) = match self.shape() {
			RecordShape::Struct => {
				let mut map = serializer.serialize_map(None)?;
				if let Some(id) = self.identity() {
					map.serialize_entry(IDENTITY_FIELD, &id)?;
				}
				for field in self.fields() {
					map.serialize_entry(&*field.name, &field.value)?;
				}
				return map.end();
			}
			RecordShape::Entity { category } => ("EntityType", "EntityFields", Some(&**category)),
			RecordShape::Asset => ("AssetType", "AssetFields", None),
		};

		let mut map = serializer.serialize_map(Some(3))?;
		map.serialize_entry(
			type_key,
			&WrapperType {
				id: 0,
				name: self.type_name(),
				category,
			},
		)?;
		map.serialize_entry(
			"FieldValueCollection",
			&Collection {
				key: entries_key,
				fields: self.fields(),
			},
		)?;
		map.serialize_entry("Id", &self.identity())?;
		map.end()
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use crate::schema::{DynamicRecord, Value};

	#[test]
	fn entity_serializes_to_wrapper_shape() {
		let mut entity = DynamicRecord::entity("Contact", "Base");
		entity.set("ID", 42).expect("identity");
		entity.set("C_EmailAddress", "a@example.com").expect("set");

		let json = serde_json::to_value(&entity).expect("serializes");
		assert_eq!(
			json,
			json!({
				"EntityType": {"ID": 0, "Name": "Contact", "Type": "Base"},
				"FieldValueCollection": {"EntityFields": [{"InternalName": "C_EmailAddress", "Value": "a@example.com"}]},
				"Id": 42
			})
		);
	}

	#[test]
	fn plain_struct_serializes_to_object_with_identity_first() {
		let mut record = DynamicRecord::new("Foo");
		record.set("bar", "x").expect("set");
		record.set("ID", 7).expect("identity");
		record.set("nested", DynamicRecord::new("Bar")).expect("set");
		record.set("tags", Value::Array(vec![Value::from(1), Value::Null])).expect("set");

		let json = serde_json::to_string(&record).expect("serializes");
		assert_eq!(json, r#"{"ID":7,"bar":"x","nested":{},"tags":[1,null]}"#);
	}

	#[test]
	fn asset_without_identity_serializes_null_id() {
		let asset = DynamicRecord::asset("ContactGroup");
		let json = serde_json::to_value(&asset).expect("serializes");
		assert_eq!(json["AssetType"], json!({"ID": 0, "Name": "ContactGroup"}));
		assert_eq!(json["FieldValueCollection"], json!({"AssetFields": []}));
		assert_eq!(json["Id"], json!(null));
	}
}
