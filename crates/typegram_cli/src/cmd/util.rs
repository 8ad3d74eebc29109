use std::path::Path;

use serde::Serialize;
use typegram::schema::{Catalogue, CompileOptions, CompileReport, Result, TypeCompiler, TypeRegistry};

/// Print a JSON payload on stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Open a catalogue file and compile it with `options`.
pub(crate) fn load_registry(path: &Path, options: CompileOptions) -> Result<(Catalogue, TypeRegistry, CompileReport)> {
	let catalogue = Catalogue::open(path)?;
	tracing::debug!(path = %path.display(), entries = catalogue.len(), compression = catalogue.compression().as_str(), "catalogue loaded");

	let mut compiler = TypeCompiler::new(options);
	let report = compiler.compile_catalogue(&catalogue)?;
	Ok((catalogue, compiler.finish(), report))
}
