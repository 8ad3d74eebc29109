use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use typegram::schema::{CompileOptions, DecodeOptions, DynamicRecord, FieldPath, ReplyDecoder, Result, ResultSequence, Value};

use crate::cmd::print::{PrintOptions, print_record, print_value};
use crate::cmd::util::{emit_json, load_registry};

#[derive(clap::Args)]
pub struct Args {
	pub catalogue: PathBuf,
	pub reply: PathBuf,
	/// Top-level reply struct name.
	#[arg(long = "type")]
	pub type_name: String,
	/// Path to the record-bearing field, e.g. `RetrieveResult.DynamicEntity`.
	#[arg(long)]
	pub records: String,
	/// Apply tighter decode limits for untrusted payloads.
	#[arg(long)]
	pub inspect: bool,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct ReplyJson<'a> {
	#[serde(rename = "type")]
	type_name: &'a str,
	records_path: &'a str,
	count: usize,
	records: &'a [DynamicRecord],
	passthrough: Map<String, JsonValue>,
}

/// Decode a reply file and print its normalized record sequence.
pub fn run(args: Args) -> Result<()> {
	let Args {
		catalogue,
		reply,
		type_name,
		records,
		inspect,
		json,
	} = args;

	let path = FieldPath::parse(&records)?;
	let (_, registry, _) = load_registry(&catalogue, CompileOptions::default())?;
	let options = if inspect { DecodeOptions::for_inspection() } else { DecodeOptions::default() };

	let bytes = std::fs::read(&reply)?;
	let decoded = ReplyDecoder::new(&registry, options).decode_slice(&type_name, &bytes)?;
	let sequence = ResultSequence::from_reply(decoded, &path)?;
	tracing::debug!(count = sequence.len(), path = path.as_str(), "reply normalized");

	let passthrough = passthrough_fields(&sequence);

	if json {
		let mut fields = Map::new();
		for (name, value) in passthrough {
			fields.insert(name.to_owned(), serde_json::to_value(value)?);
		}
		let rows = sequence.into_records();
		return emit_json(&ReplyJson {
			type_name: &type_name,
			records_path: path.as_str(),
			count: rows.len(),
			records: &rows,
			passthrough: fields,
		});
	}

	println!("reply: {}", reply.display());
	println!("type: {type_name}");
	println!("records_path: {}", path.as_str());
	println!("count: {}", sequence.len());
	for (name, value) in &passthrough {
		print!("{name} = ");
		print_value(value, 0, 0, PrintOptions::default());
	}
	for (index, record) in sequence.iter().enumerate() {
		println!("record[{index}]:");
		print_record(record, 2, 0, PrintOptions::for_sequence());
	}

	Ok(())
}

/// Top-level scalar fields, e.g. paging totals, read through the sequence.
fn passthrough_fields(sequence: &ResultSequence) -> Vec<(&str, Value)> {
	let Some(reply) = sequence.reply() else {
		return Vec::new();
	};
	reply
		.field_names()
		.filter_map(|name| {
			let value = sequence.field(name)?;
			(!matches!(value, Value::Record(_) | Value::Array(_))).then(|| (name, value.clone()))
		})
		.collect()
}
