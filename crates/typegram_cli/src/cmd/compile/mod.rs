use std::path::PathBuf;

use serde::Serialize;
use typegram::schema::{CompileOptions, CompileReport, Result, SchemaError, TypeDescriptor};

use crate::cmd::print::print_descriptor;
use crate::cmd::util::{emit_json, load_registry};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Print only this struct's descriptor.
	#[arg(long = "struct")]
	pub struct_name: Option<String>,
	#[arg(long)]
	pub json: bool,
	/// Fail on the first malformed description.
	#[arg(long)]
	pub strict: bool,
	/// Do not seed host-defined wrapper types.
	#[arg(long)]
	pub no_host: bool,
}

#[derive(Serialize)]
struct CompileJson<'a> {
	path: String,
	compression: &'static str,
	entries: usize,
	types: usize,
	report: &'a CompileReport,
	descriptors: Vec<&'a TypeDescriptor>,
}

/// Compile a catalogue and print the report plus descriptors.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		struct_name,
		json,
		strict,
		no_host,
	} = args;

	let options = CompileOptions {
		seed_host_types: !no_host,
		strict,
	};
	let (catalogue, registry, report) = load_registry(&path, options)?;

	let descriptors: Vec<&TypeDescriptor> = match &struct_name {
		Some(name) => vec![registry.lookup(name).ok_or_else(|| SchemaError::TypeNotFound { name: name.clone() })?],
		None => registry.descriptors().collect(),
	};

	if json {
		return emit_json(&CompileJson {
			path: path.display().to_string(),
			compression: catalogue.compression().as_str(),
			entries: catalogue.len(),
			types: registry.len(),
			report: &report,
			descriptors,
		});
	}

	println!("path: {}", path.display());
	println!("compression: {}", catalogue.compression().as_str());
	println!("entries: {}", catalogue.len());
	println!("types: {}", registry.len());
	println!("registered: {}", report.registered.len());
	println!("recognized: {}", report.recognized.len());
	println!("skipped_non_struct: {}", report.skipped_non_struct);
	println!("failures: {}", report.failures.len());
	for failure in &report.failures {
		println!("  entry[{}] {}: {}", failure.index, failure.type_name.as_deref().unwrap_or("<unnamed>"), failure.error);
	}

	if struct_name.is_some() {
		for descriptor in descriptors {
			print_descriptor(descriptor);
		}
	} else {
		println!("type_names:");
		for descriptor in descriptors {
			println!("  {} ({} fields)", descriptor.name, descriptor.fields.len());
		}
	}

	Ok(())
}
