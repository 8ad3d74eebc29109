//! Hand-written definitions the host environment carries for the records it
//! wraps. Catalogue entries with these names are recognized, not re-derived.

use crate::schema::descriptor::TypeDescriptor;
use crate::schema::token::NativeType;

/// Entity wrapper struct name.
pub const DYNAMIC_ENTITY: &str = "DynamicEntity";
/// Asset wrapper struct name.
pub const DYNAMIC_ASSET: &str = "DynamicAsset";
/// Entity type discriminator struct name.
pub const ENTITY_TYPE: &str = "EntityType";
/// Asset type discriminator struct name.
pub const ASSET_TYPE: &str = "AssetType";
/// Entity field collection struct name.
pub const DYNAMIC_ENTITY_FIELDS: &str = "DynamicEntityFields";
/// Asset field collection struct name.
pub const DYNAMIC_ASSET_FIELDS: &str = "DynamicAssetFields";

/// Host definitions in seeding order.
pub fn host_descriptors() -> Vec<TypeDescriptor> {
	vec![
		TypeDescriptor::new(ENTITY_TYPE)
			.with_scalar("ID", NativeType::Int)
			.with_scalar("Name", NativeType::String)
			.with_scalar("Type", NativeType::String),
		TypeDescriptor::new(ASSET_TYPE)
			.with_scalar("ID", NativeType::Int)
			.with_scalar("Name", NativeType::String)
			.with_scalar("Type", NativeType::String),
		TypeDescriptor::new(DYNAMIC_ENTITY_FIELDS),
		TypeDescriptor::new(DYNAMIC_ASSET_FIELDS),
		TypeDescriptor::new(DYNAMIC_ENTITY)
			.with_reference("EntityType", ENTITY_TYPE)
			.with_reference("FieldValueCollection", DYNAMIC_ENTITY_FIELDS)
			.with_scalar("Id", NativeType::Int),
		TypeDescriptor::new(DYNAMIC_ASSET)
			.with_reference("AssetType", ASSET_TYPE)
			.with_reference("FieldValueCollection", DYNAMIC_ASSET_FIELDS)
			.with_scalar("Id", NativeType::Int),
	]
}

/// Whether `name` has a host definition.
pub fn is_host_type(name: &str) -> bool {
	[DYNAMIC_ENTITY, DYNAMIC_ASSET, ENTITY_TYPE, ASSET_TYPE, DYNAMIC_ENTITY_FIELDS, DYNAMIC_ASSET_FIELDS].contains(&name)
}
