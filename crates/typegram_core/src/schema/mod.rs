mod catalogue;
mod compile;
mod compression;
mod descriptor;
mod error;
pub mod host;
mod lexer;
mod path;
mod record;
mod registry;
mod reply;
mod sequence;
mod stack;
mod token;
mod value;
mod wire;

/// Catalogue of type-description strings.
pub use catalogue::Catalogue;
/// Catalogue compilation entry points, options, and reports.
pub use compile::{CompileFailure, CompileOptions, CompileReport, EntryOutcome, TypeCompiler, compile_catalogue, compile_description, compile_tokens};
/// Compression detection result.
pub use compression::Compression;
/// Compiled struct descriptors.
pub use descriptor::{FieldKind, FieldSpec, TypeDescriptor};
/// Error, error class, and result aliases.
pub use error::{ErrorClass, Result, SchemaError};
/// Type-description tokenizer.
pub use lexer::tokenize;
/// Field path parser types.
pub use path::{FieldPath, PathStep};
/// Dynamic record types.
pub use record::{DEFAULT_ENTITY_CATEGORY, DynamicRecord, FieldValue, IDENTITY_FIELD, RecordShape};
/// Descriptor registry and its builder.
pub use registry::{Registration, RegistryBuilder, TypeRegistry};
/// JSON reply decoding.
pub use reply::{DecodeOptions, ReplyDecoder};
/// Normalized reply record sequence.
pub use sequence::ResultSequence;
/// Lexer state stack.
pub use stack::TokenStack;
/// Token types.
pub use token::{NativeType, Token, TokenKind};
/// Runtime field values.
pub use value::Value;
