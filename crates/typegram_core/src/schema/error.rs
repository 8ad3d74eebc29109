use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Coarse error class used to decide whether a failure aborts a whole load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
	/// Parser-state bookkeeping failed; fatal to the current tokenize call.
	Structural,
	/// A type description was malformed; the affected type is skipped.
	Grammar,
	/// Catalogue or reply input could not be read or had the wrong shape.
	Input,
	/// A record operation was given a value it cannot store.
	Record,
}

/// Errors produced while compiling type descriptions and shaping records.
#[derive(Debug, Error)]
pub enum SchemaError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON catalogue or reply payload failed to parse.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Pop or peek on an empty state stack.
	#[error("state stack underflow on {op}")]
	StackUnderflow {
		/// Stack operation that underflowed.
		op: &'static str,
	},
	/// Type description produced no tokens at all.
	#[error("empty type description")]
	EmptyDescription,
	/// An expected token was absent.
	#[error("missing {expected} in {type_name} at token {at}")]
	MissingToken {
		/// Struct name, or `?` when the header itself is incomplete.
		type_name: String,
		/// Human label for the expected token.
		expected: &'static str,
		/// Significant-token index where the token was expected.
		at: usize,
	},
	/// A token appeared where the grammar does not allow it.
	#[error("unexpected {got:?} in {type_name} at token {at}, expected {expected}")]
	UnexpectedToken {
		/// Struct name, or `?` when the header itself is incomplete.
		type_name: String,
		/// Human label for the expected token.
		expected: &'static str,
		/// Offending lexeme.
		got: String,
		/// Significant-token index of the offending token.
		at: usize,
	},
	/// A struct declared the same field name twice.
	#[error("duplicate field {field} in {type_name}")]
	DuplicateField {
		/// Struct name.
		type_name: String,
		/// Repeated field name.
		field: String,
	},
	/// Registry-driven construction looped back into a type already being built.
	#[error("recursive type reference: {chain}")]
	RecursiveType {
		/// Arrow-joined construction chain ending in the repeated type.
		chain: String,
	},
	/// Construction or decoding exceeded the configured nesting depth.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Decoded array exceeded the configured element limit.
	#[error("array too large: count={count}, max={max}")]
	ArrayTooLarge {
		/// Observed element count.
		count: usize,
		/// Maximum permitted element count.
		max: usize,
	},
	/// Identity can only hold integers.
	#[error("identity must be an integer, got {got}")]
	IdentityNotNumeric {
		/// Kind of the rejected value.
		got: &'static str,
	},
	/// Requested type name is not in the registry.
	#[error("type not found: {name}")]
	TypeNotFound {
		/// Requested type name.
		name: String,
	},
	/// The process-wide registry was installed twice.
	#[error("type registry already installed")]
	RegistryAlreadyInstalled,
	/// Field path expression syntax is invalid.
	#[error("invalid field path: {path}")]
	InvalidFieldPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Reply value at a path is neither a record, a record list, nor empty.
	#[error("reply field {path} holds {got}, expected record, record list, or null")]
	ReplyShape {
		/// Path that was resolved.
		path: String,
		/// Kind of the value found.
		got: &'static str,
	},
	/// Top-level reply payload was not a JSON object.
	#[error("reply payload must be an object, got {got}")]
	ReplyNotObject {
		/// Kind of the value found.
		got: &'static str,
	},
	/// Decompression output exceeded the safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Catalogue bytes were not valid UTF-8.
	#[error("catalogue is not valid utf-8")]
	CatalogueNotUtf8,
}

impl SchemaError {
	/// Map this error onto its coarse class.
	pub fn class(&self) -> ErrorClass {
		match self {
			Self::StackUnderflow { .. } => ErrorClass::Structural,
			Self::EmptyDescription | Self::MissingToken { .. } | Self::UnexpectedToken { .. } | Self::DuplicateField { .. } => ErrorClass::Grammar,
			Self::Io(_)
			| Self::Json(_)
			| Self::InvalidFieldPath { .. }
			| Self::ReplyShape { .. }
			| Self::ReplyNotObject { .. }
			| Self::DecompressedTooLarge { .. }
			| Self::CatalogueNotUtf8 => ErrorClass::Input,
			Self::RecursiveType { .. }
			| Self::DepthExceeded { .. }
			| Self::ArrayTooLarge { .. }
			| Self::IdentityNotNumeric { .. }
			| Self::TypeNotFound { .. }
			| Self::RegistryAlreadyInstalled => ErrorClass::Record,
		}
	}

	/// Whether a catalogue load may skip the failing entry and continue.
	pub fn is_skippable(&self) -> bool {
		matches!(self.class(), ErrorClass::Structural | ErrorClass::Grammar)
	}
}
