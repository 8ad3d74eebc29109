use std::path::PathBuf;

use serde::Serialize;
use typegram::schema::{CompileOptions, DynamicRecord, Result, SchemaError};

use crate::cmd::print::{PrintOptions, print_record};
use crate::cmd::util::{emit_json, load_registry};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long = "type")]
	pub type_name: String,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct NewJson<'a> {
	#[serde(rename = "type")]
	type_name: &'a str,
	fields: Vec<&'a str>,
	record: &'a DynamicRecord,
}

/// Instantiate an empty record with its reference fields populated.
pub fn run(args: Args) -> Result<()> {
	let Args { path, type_name, json } = args;

	let (_, registry, _) = load_registry(&path, CompileOptions::default())?;
	if !registry.contains(&type_name) {
		return Err(SchemaError::TypeNotFound { name: type_name });
	}
	let record = registry.instantiate(&type_name)?;

	if json {
		return emit_json(&NewJson {
			type_name: &type_name,
			fields: record.field_names().collect(),
			record: &record,
		});
	}

	print_record(&record, 0, 0, PrintOptions::default());
	Ok(())
}
