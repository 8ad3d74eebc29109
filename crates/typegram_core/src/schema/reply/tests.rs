use serde_json::json;

use super::{DecodeOptions, ReplyDecoder};
use crate::schema::{
	Catalogue, CompileOptions, DynamicRecord, FieldPath, RecordShape, ResultSequence, SchemaError, TypeRegistry, Value, compile_catalogue,
};

const CATALOGUE: &str = "\
struct RetrieveResponse {
 RetrieveResult RetrieveResult;
 int TotalRecords;
}
struct RetrieveResult {
 DynamicEntity DynamicEntity;
}
struct Address {
 string city;
}
struct Contact {
 Address home;
 string name;
}
";

fn registry() -> TypeRegistry {
	let (registry, report) = compile_catalogue(&Catalogue::parse(CATALOGUE), &CompileOptions::default()).expect("catalogue compiles");
	assert!(report.is_clean(), "{:?}", report.failures);
	registry
}

fn entity(id: i64, fields: serde_json::Value) -> serde_json::Value {
	json!({
		"EntityType": {"ID": 0, "Name": "Contact", "Type": "Base"},
		"FieldValueCollection": {"EntityFields": fields},
		"Id": id
	})
}

fn sequence(registry: &TypeRegistry, payload: &serde_json::Value) -> ResultSequence {
	let reply = ReplyDecoder::new(registry, DecodeOptions::default())
		.decode_reply("RetrieveResponse", payload)
		.expect("reply decodes");
	let path = FieldPath::parse("RetrieveResult.DynamicEntity").expect("valid path");
	ResultSequence::from_reply(reply, &path).expect("records normalize")
}

#[test]
fn entity_array_decodes_to_entity_records() {
	let registry = registry();
	let payload = json!({
		"RetrieveResult": {"DynamicEntity": [
			entity(11, json!([
				{"InternalName": "C_EmailAddress", "Value": "a@example.com"},
				{"InternalName": "C_Score", "Value": 3}
			])),
			entity(12, json!([{"InternalName": "C_EmailAddress", "Value": "b@example.com"}]))
		]},
		"TotalRecords": 2
	});

	let records = sequence(&registry, &payload);
	assert_eq!(records.len(), 2);
	assert_eq!(records[0].type_name(), "Contact");
	assert_eq!(records[0].shape(), &RecordShape::Entity { category: "Base".into() });
	assert_eq!(records[0].identity(), Some(11));
	assert_eq!(records[0].get("C_Score").as_deref(), Some(&Value::Int(3)));
	assert_eq!(records[1].get("ID").as_deref(), Some(&Value::Int(12)));
	assert_eq!(records.field("TotalRecords"), Some(&Value::Int(2)));

	let result = records.reply().and_then(|reply| reply.record("RetrieveResult")).expect("nested result");
	assert_eq!(result.type_name(), "RetrieveResult");
}

#[test]
fn single_entity_with_single_field_is_unwrapped() {
	let registry = registry();
	let payload = json!({
		"RetrieveResult": {"DynamicEntity": entity(5, json!({"InternalName": "C_FirstName", "Value": "Ada"}))}
	});

	let records = sequence(&registry, &payload);
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].field_names().collect::<Vec<_>>(), ["C_FirstName"]);
	assert_eq!(records[0].get("C_FirstName").as_deref(), Some(&Value::from("Ada")));
}

#[test]
fn empty_or_null_results_yield_no_records() {
	let registry = registry();

	let records = sequence(&registry, &json!({"RetrieveResult": {"DynamicEntity": null}, "TotalRecords": 0}));
	assert!(records.is_empty());
	assert_eq!(records.field("TotalRecords"), Some(&Value::Int(0)));

	let records = sequence(&registry, &json!({"RetrieveResult": {}}));
	assert!(records.is_empty());
	assert!(records.field("TotalRecords").is_none());
}

#[test]
fn plain_objects_are_typed_by_reference_targets() {
	let registry = registry();
	let decoder = ReplyDecoder::new(&registry, DecodeOptions::default());
	let record = decoder
		.decode_reply("Contact", &json!({"ID": 5, "home": {"city": "Oslo"}, "name": "x", "extra": {"a": 1.5}}))
		.expect("decodes");

	assert_eq!(record.identity(), Some(5));
	assert!(record.field("ID").is_none());
	let home = record.record("home").expect("home record");
	assert_eq!(home.type_name(), "Address");
	assert_eq!(home.get("city").as_deref(), Some(&Value::from("Oslo")));
	let extra = record.record("extra").expect("extra record");
	assert_eq!(extra.type_name(), "extra");
	assert_eq!(extra.field("a"), Some(&Value::Double(1.5)));
}

#[test]
fn omitted_reference_fields_stay_absent() {
	let registry = registry();
	let record = ReplyDecoder::new(&registry, DecodeOptions::default())
		.decode_reply("Contact", &json!({"name": "x"}))
		.expect("decodes");
	assert!(record.get("home").is_none());
	assert_eq!(record.len(), 1);
}

#[test]
fn depth_and_array_limits_are_enforced() {
	let registry = registry();
	let shallow = DecodeOptions {
		max_depth: 2,
		..DecodeOptions::default()
	};
	let err = ReplyDecoder::new(&registry, shallow)
		.decode_reply("Foo", &json!({"a": {"b": {"c": 1}}}))
		.expect_err("too deep");
	assert!(matches!(err, SchemaError::DepthExceeded { max_depth: 2 }));

	let narrow = DecodeOptions {
		max_array_elems: 2,
		..DecodeOptions::default()
	};
	let err = ReplyDecoder::new(&registry, narrow)
		.decode_reply("Foo", &json!({"tags": [1, 2, 3]}))
		.expect_err("too long");
	assert!(matches!(err, SchemaError::ArrayTooLarge { count: 3, max: 2 }));
}

#[test]
fn malformed_replies_are_rejected() {
	let registry = registry();
	let decoder = ReplyDecoder::new(&registry, DecodeOptions::for_inspection());

	let err = decoder.decode_slice("Foo", b"[1, 2]").expect_err("array reply");
	assert!(matches!(err, SchemaError::ReplyNotObject { got: "array" }));

	let err = decoder.decode_slice("Foo", b"{not json").expect_err("bad json");
	assert!(matches!(err, SchemaError::Json(_)));

	let mut bad_id = entity(0, json!([]));
	bad_id["Id"] = json!("abc");
	let err = decoder.decode_reply("Foo", &json!({"row": bad_id})).expect_err("text identity");
	assert!(matches!(err, SchemaError::IdentityNotNumeric { got: "string" }));

	let err = decoder
		.decode_reply("Foo", &json!({"row": entity(1, json!(["loose"]))}))
		.expect_err("entry not an object");
	assert!(matches!(err, SchemaError::ReplyShape { got: "string", .. }));
}

#[test]
fn encoded_entity_decodes_back_to_equal_record() {
	let registry = registry();
	let mut contact = DynamicRecord::entity("Contact", "Base");
	contact.set("ID", 77).expect("identity");
	contact.set("C_EmailAddress", "c@example.com").expect("set");
	contact.set("C_Tags", Value::Array(vec![Value::from("a"), Value::from("b")])).expect("set");

	let payload = serde_json::to_value(&contact).expect("serializes");
	let decoded = ReplyDecoder::new(&registry, DecodeOptions::default())
		.decode_reply("DynamicEntity", &payload)
		.expect("decodes");
	assert_eq!(decoded, contact);
}

#[test]
fn plain_identity_must_be_an_integer() {
	let registry = registry();
	let decoder = ReplyDecoder::new(&registry, DecodeOptions::default());

	let record = decoder.decode_reply("Contact", &json!({"ID": null, "name": "x"})).expect("null identity");
	assert_eq!(record.identity(), None);

	for id in [json!("abc"), json!(1.5)] {
		let err = decoder.decode_reply("Contact", &json!({"ID": id, "name": "x"})).expect_err("non-integer identity");
		assert!(matches!(err, SchemaError::IdentityNotNumeric { .. }));
	}
}
