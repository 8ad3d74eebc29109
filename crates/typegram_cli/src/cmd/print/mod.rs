use typegram::schema::{DynamicRecord, FieldKind, RecordShape, TypeDescriptor, Value};

/// Output truncation and formatting limits for printed records.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single record.
	pub max_fields_per_record: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested arrays/records.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_record: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

impl PrintOptions {
	/// Preset tuned for listing many reply records.
	pub fn for_sequence() -> Self {
		Self {
			max_fields_per_record: 40,
			max_string_len: 120,
			max_array_items: 8,
			max_print_depth: 4,
		}
	}
}

/// Print one value tree.
pub fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Null => println!("{pad}null"),
		Value::Bool(v) => println!("{pad}{v}"),
		Value::Int(v) => println!("{pad}{v}"),
		Value::Double(v) => println!("{pad}{v}"),
		Value::String(v) => println!("{pad}\"{}\"", truncate(v, options.max_string_len)),
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				println!("{pad}[... {} items]", items.len());
				return;
			}
			println!("{pad}[");
			for item in items.iter().take(options.max_array_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				println!("{pad}  ... {} more", items.len() - options.max_array_items);
			}
			println!("{pad}]");
		}
		Value::Record(record) => print_record(record, indent, depth, options),
	}
}

/// Print one record with its identity and fields.
pub fn print_record(record: &DynamicRecord, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	let label = record_label(record);
	if depth >= options.max_print_depth {
		println!("{pad}{label} {{ ... }}");
		return;
	}

	println!("{pad}{label} {{");
	for field in record.fields().iter().take(options.max_fields_per_record) {
		print!("{pad}  {} = ", field.name);
		if matches!(field.value, Value::Record(_) | Value::Array(_)) {
			println!();
			print_value(&field.value, indent + 4, depth + 1, options);
		} else {
			print_value(&field.value, 0, depth + 1, options);
		}
	}
	if record.len() > options.max_fields_per_record {
		println!("{pad}  ... {} more fields", record.len() - options.max_fields_per_record);
	}
	println!("{pad}}}");
}

/// Print a descriptor in catalogue-like layout.
pub fn print_descriptor(descriptor: &TypeDescriptor) {
	println!("struct {} {{", descriptor.name);
	for field in &descriptor.fields {
		match &field.kind {
			FieldKind::Scalar { native } => println!("  {} {}", native.as_str(), field.name),
			FieldKind::Reference { target } => println!("  {target} {} -> {target}", field.name),
		}
	}
	println!("}}");
}

pub(crate) fn record_label(record: &DynamicRecord) -> String {
	let mut label = match record.shape() {
		RecordShape::Struct => record.type_name().to_owned(),
		RecordShape::Entity { category } => format!("{}<entity:{category}>", record.type_name()),
		RecordShape::Asset => format!("{}<asset>", record.type_name()),
	};
	if label.is_empty() {
		label.push_str("<anonymous>");
	}
	if let Some(id) = record.identity() {
		label.push_str(&format!(" #{id}"));
	}
	label
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.to_owned(),
	}
}
