use super::{DEFAULT_ENTITY_CATEGORY, DynamicRecord, IDENTITY_FIELD, RecordShape};
use crate::schema::{ErrorClass, SchemaError, Value};

#[test]
fn identity_alias_never_becomes_a_field() {
	let mut record = DynamicRecord::entity("Contact", DEFAULT_ENTITY_CATEGORY);
	record.set(IDENTITY_FIELD, 1234).expect("numeric identity");

	assert_eq!(record.get("ID").as_deref(), Some(&Value::Int(1234)));
	assert_eq!(record.identity(), Some(1234));
	assert!(record.is_empty());
	assert!(record.field("ID").is_none());
	assert!(!record.field_names().any(|name| name == "ID"));
}

#[test]
fn identity_rejects_non_integers_and_clears_on_null() {
	let mut record = DynamicRecord::new("Foo");
	let err = record.set("ID", "abc").expect_err("text identity");
	assert!(matches!(err, SchemaError::IdentityNotNumeric { got: "string" }));
	assert_eq!(err.class(), ErrorClass::Record);

	record.set("ID", 9).expect("numeric identity");
	record.set("ID", Value::Null).expect("null clears");
	assert_eq!(record.identity(), None);
	assert!(record.get("ID").is_none());
}

#[test]
fn set_then_get_round_trips_new_and_existing_names() {
	let mut record = DynamicRecord::entity("Contact", "Base");
	record.set("C_FirstName", "Ada").expect("set");
	record.set("C_LastName", "Lovelace").expect("set");
	record.set("C_FirstName", "Augusta").expect("update");

	assert_eq!(record.get("C_FirstName").as_deref(), Some(&Value::from("Augusta")));
	assert_eq!(record.field_names().collect::<Vec<_>>(), ["C_FirstName", "C_LastName"]);
}

#[test]
fn unknown_fields_read_as_absent() {
	let record = DynamicRecord::asset("ContactGroup");
	assert!(record.get("Name").is_none());
	assert!(record.get("ID").is_none());
	assert_eq!(record.shape(), &RecordShape::Asset);
}

#[test]
fn remove_deletes_first_match_and_ignores_absent() {
	let mut record = DynamicRecord::new("Foo");
	record.set("a", 1).expect("set");
	record.set("b", 2).expect("set");

	assert_eq!(record.remove("a"), Some(Value::Int(1)));
	assert_eq!(record.remove("a"), None);
	assert_eq!(record.remove("missing"), None);
	assert_eq!(record.field_names().collect::<Vec<_>>(), ["b"]);
}

#[test]
fn clone_is_independent_of_source() {
	let mut nested = DynamicRecord::new("Bar");
	nested.set("x", 1).expect("set");
	let mut source = DynamicRecord::entity("Contact", "Base");
	source.set("ID", 5).expect("identity");
	source.set("name", "original").expect("set");
	source.set("Bar", nested).expect("set");

	let mut copy = source.clone();
	copy.set("ID", 6).expect("identity");
	copy.set("name", "changed").expect("set");
	copy.record_mut("Bar").expect("nested copy").set("x", 2).expect("set");
	copy.remove("missing");

	assert_eq!(source.identity(), Some(5));
	assert_eq!(source.get("name").as_deref(), Some(&Value::from("original")));
	assert_eq!(source.record("Bar").and_then(|bar| bar.field("x")), Some(&Value::Int(1)));
	assert_eq!(copy.record("Bar").and_then(|bar| bar.field("x")), Some(&Value::Int(2)));
}

#[test]
fn entity_keeps_category() {
	let record = DynamicRecord::entity("Contact", "Custom");
	assert_eq!(record.type_name(), "Contact");
	assert_eq!(record.shape(), &RecordShape::Entity { category: "Custom".into() });
}
