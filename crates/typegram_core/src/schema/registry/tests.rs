use std::sync::Arc;

use super::{Registration, TypeRegistry};
use crate::schema::host::{DYNAMIC_ASSET, DYNAMIC_ENTITY};
use crate::schema::{
	Catalogue, CompileOptions, DEFAULT_ENTITY_CATEGORY, NativeType, RecordShape, SchemaError, TypeDescriptor, Value, compile_catalogue,
};

fn registry_from(entries: &[&str]) -> TypeRegistry {
	let options = CompileOptions {
		seed_host_types: false,
		strict: true,
	};
	compile_catalogue(&Catalogue::new(entries.iter().copied()), &options).expect("catalogue compiles").0
}

#[test]
fn register_never_overwrites() {
	let mut builder = TypeRegistry::builder();
	let first = TypeDescriptor::new("Foo").with_scalar("a", NativeType::Int);
	let second = TypeDescriptor::new("Foo").with_scalar("b", NativeType::String);

	assert_eq!(builder.register(first.clone()), Registration::Added);
	assert_eq!(builder.register(second), Registration::AlreadyKnown);
	assert_eq!(builder.seed_host(TypeDescriptor::new("Foo")), Registration::AlreadyKnown);
	assert!(!builder.is_host_defined("Foo"));

	let registry = builder.build();
	assert_eq!(registry.lookup("Foo"), Some(&first));
	assert_eq!(registry.len(), 1);
}

#[test]
fn lookup_miss_is_none() {
	let registry = TypeRegistry::default();
	assert!(registry.is_empty());
	assert_eq!(registry.lookup("Nope"), None);
}

#[test]
fn instantiate_populates_reference_fields_only() {
	let registry = registry_from(&["struct Bar {int x;};", "struct Foo {struct Bar;string label;};"]);

	let foo = registry.instantiate("Foo").expect("constructs");
	assert_eq!(foo.type_name(), "Foo");
	assert_eq!(foo.field_names().collect::<Vec<_>>(), ["Bar"]);

	let bar = foo.record("Bar").expect("Bar is eagerly present");
	assert_eq!(bar.type_name(), "Bar");
	assert!(bar.is_empty(), "nested scalars stay unset");
	assert!(foo.get("label").is_none());
}

#[test]
fn instantiate_recurses_through_reference_chain() {
	let registry = registry_from(&["struct A {B b;};", "struct B {C c;int x;};", "struct C {string s;};"]);

	let a = registry.instantiate("A").expect("constructs");
	let c = a.record("b").and_then(|b| b.record("c")).expect("chain populated");
	assert_eq!(c.type_name(), "C");
}

#[test]
fn unknown_reference_target_stays_generic() {
	let registry = registry_from(&["struct Foo {Missing m;};"]);

	let foo = registry.instantiate("Foo").expect("constructs");
	let missing = foo.record("m").expect("reference still present");
	assert_eq!(missing.type_name(), "Missing");
	assert!(missing.is_empty());

	let generic = registry.instantiate("Unregistered").expect("lookup miss is not an error");
	assert!(generic.is_empty());
}

#[test]
fn recursive_references_are_rejected() {
	let registry = registry_from(&["struct A {B b;};", "struct B {A a;};"]);

	let err = registry.instantiate("A").expect_err("cycle");
	assert!(matches!(err, SchemaError::RecursiveType { ref chain } if chain == "A -> B -> A"));
}

#[test]
fn registry_is_shareable_across_reader_threads() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<TypeRegistry>();

	let registry = Arc::new(registry_from(&["struct Bar {int x;};", "struct Foo {struct Bar;};"]));
	std::thread::scope(|scope| {
		for _ in 0..4 {
			let registry = Arc::clone(&registry);
			scope.spawn(move || {
				let foo = registry.instantiate("Foo").expect("constructs");
				assert!(matches!(foo.get("Bar").as_deref(), Some(Value::Record(_))));
				assert!(registry.lookup("Bar").is_some());
			});
		}
	});
}

#[test]
fn host_wrappers_instantiate_with_wrapper_shape() {
	let (registry, _) = compile_catalogue(&Catalogue::new(Vec::<&str>::new()), &CompileOptions::default()).expect("host seeds");

	let mut entity = registry.instantiate(DYNAMIC_ENTITY).expect("entity constructs");
	assert_eq!(entity.shape(), &RecordShape::Entity { category: DEFAULT_ENTITY_CATEGORY.into() });
	assert!(entity.is_empty(), "wrapper references are synthesized on the wire");
	entity.set("C_EmailAddress", "a@b").expect("set");

	let json = serde_json::to_value(&entity).expect("serializes");
	assert_eq!(
		json["FieldValueCollection"],
		serde_json::json!({"EntityFields": [{"InternalName": "C_EmailAddress", "Value": "a@b"}]})
	);
	assert_eq!(json["EntityType"]["Type"], "Base");

	let asset = registry.instantiate(DYNAMIC_ASSET).expect("asset constructs");
	assert_eq!(asset.shape(), &RecordShape::Asset);
	assert_eq!(serde_json::to_value(&asset).expect("serializes")["FieldValueCollection"], serde_json::json!({"AssetFields": []}));

	let contact = registry.instantiate_entity("Contact", "Custom");
	assert_eq!(contact.type_name(), "Contact");
	assert_eq!(contact.shape(), &RecordShape::Entity { category: "Custom".into() });
	assert_eq!(registry.instantiate_asset("ContactGroup").shape(), &RecordShape::Asset);
}

#[test]
fn wrapper_reached_through_reference_keeps_its_shape() {
	let (registry, _) = compile_catalogue(
		&Catalogue::new(["struct ArrayOfDynamicEntity {\n DynamicEntity DynamicEntity;\n}"]),
		&CompileOptions::default(),
	)
	.expect("catalogue compiles");

	let list = registry.instantiate("ArrayOfDynamicEntity").expect("constructs");
	let row = list.record(DYNAMIC_ENTITY).expect("wrapper pre-built");
	assert!(matches!(row.shape(), RecordShape::Entity { .. }));
}

#[test]
fn identity_named_reference_is_left_unset() {
	let registry = registry_from(&["struct Bar {int x;};", "struct Foo {Bar ID;Bar other;};"]);

	let foo = registry.instantiate("Foo").expect("constructs despite ID reference");
	assert_eq!(foo.identity(), None);
	assert_eq!(foo.field_names().collect::<Vec<_>>(), ["other"]);
}
