use serde::{Serialize, Serializer};

use crate::schema::descriptor::{FieldKind, FieldSpec, TypeDescriptor};
use crate::schema::lexer::tokenize;
use crate::schema::registry::{Registration, RegistryBuilder, TypeRegistry};
use crate::schema::token::{NativeType, Token, TokenKind};
use crate::schema::{Catalogue, Result, SchemaError, host};

/// Behavior switches for a catalogue load.
#[derive(Debug, Clone)]
pub struct CompileOptions {
	/// Seed the hand-written host descriptors before compiling.
	pub seed_host_types: bool,
	/// Abort on the first failing entry instead of skipping it.
	pub strict: bool,
}

impl Default for CompileOptions {
	fn default() -> Self {
		Self {
			seed_host_types: true,
			strict: false,
		}
	}
}

impl CompileOptions {
	/// Preset that fails the whole load on any malformed entry.
	pub fn strict() -> Self {
		Self {
			seed_host_types: true,
			strict: true,
		}
	}
}

/// Result of compiling one catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
	/// A new descriptor was derived and registered.
	Registered(Box<str>),
	/// The name was already known; nothing was derived.
	Recognized(Box<str>),
	/// The entry does not describe a struct.
	NotStruct,
}

/// One catalogue entry that could not be compiled.
#[derive(Debug, Serialize)]
pub struct CompileFailure {
	/// Zero-based catalogue position.
	pub index: usize,
	/// Struct name when the header parsed.
	pub type_name: Option<Box<str>>,
	/// Failure cause.
	#[serde(serialize_with = "display_error")]
	pub error: SchemaError,
}

/// Summary of a catalogue load.
#[derive(Debug, Default, Serialize)]
pub struct CompileReport {
	/// Names registered with freshly derived descriptors, in catalogue order.
	pub registered: Vec<Box<str>>,
	/// Names skipped because they were already known.
	pub recognized: Vec<Box<str>>,
	/// Entries that were not struct descriptions.
	pub skipped_non_struct: usize,
	/// Entries skipped because of grammar or structural errors.
	pub failures: Vec<CompileFailure>,
}

impl CompileReport {
	/// Whether every entry compiled or was intentionally skipped.
	pub fn is_clean(&self) -> bool {
		self.failures.is_empty()
	}
}

/// Accumulates catalogue entries into a registry.
#[derive(Debug)]
pub struct TypeCompiler {
	options: CompileOptions,
	builder: RegistryBuilder,
}

impl TypeCompiler {
	/// Create a compiler, seeding host descriptors when enabled.
	pub fn new(options: CompileOptions) -> Self {
		let mut builder = RegistryBuilder::new();
		if options.seed_host_types {
			for descriptor in host::host_descriptors() {
				builder.seed_host(descriptor);
			}
		}
		Self { options, builder }
	}

	/// Compile every catalogue entry, skipping failures unless strict.
	pub fn compile_catalogue(&mut self, catalogue: &Catalogue) -> Result<CompileReport> {
		let mut report = CompileReport::default();

		for (index, source) in catalogue.entries().iter().enumerate() {
			match self.compile_entry(source) {
				Ok(EntryOutcome::Registered(name)) => report.registered.push(name),
				Ok(EntryOutcome::Recognized(name)) => report.recognized.push(name),
				Ok(EntryOutcome::NotStruct) => report.skipped_non_struct += 1,
				Err(failure) => {
					if self.options.strict || !failure.error.is_skippable() {
						return Err(failure.error);
					}
					tracing::warn!(index, type_name = ?failure.type_name, error = %failure.error, "skipping type description");
					report.failures.push(CompileFailure { index, ..failure });
				}
			}
		}

		Ok(report)
	}

	/// Compile one type description against the registry built so far.
	pub fn compile_entry(&mut self, source: &str) -> std::result::Result<EntryOutcome, CompileFailure> {
		let fail = |type_name: Option<&str>, error| CompileFailure {
			index: 0,
			type_name: type_name.map(Box::from),
			error,
		};

		let tokens = tokenize(source).map_err(|error| fail(None, error))?;
		let mut parser = Parser::new(&tokens);
		let name = match parser.header().map_err(|error| fail(None, error))? {
			Some(name) => name,
			None => {
				tracing::debug!(source, "ignoring non-struct type description");
				return Ok(EntryOutcome::NotStruct);
			}
		};

		if self.builder.is_known(name) {
			tracing::debug!(type_name = name, host = self.builder.is_host_defined(name), "type already known");
			return Ok(EntryOutcome::Recognized(name.into()));
		}

		let descriptor = parser.body(name).map_err(|error| fail(Some(name), error))?;
		match self.builder.register(descriptor) {
			Registration::Added => Ok(EntryOutcome::Registered(name.into())),
			Registration::AlreadyKnown => Ok(EntryOutcome::Recognized(name.into())),
		}
	}

	/// Borrow the registry under construction.
	pub fn builder(&self) -> &RegistryBuilder {
		&self.builder
	}

	/// Freeze the accumulated registry.
	pub fn finish(self) -> TypeRegistry {
		self.builder.build()
	}
}

/// Compile a whole catalogue into a frozen registry.
pub fn compile_catalogue(catalogue: &Catalogue, options: &CompileOptions) -> Result<(TypeRegistry, CompileReport)> {
	let mut compiler = TypeCompiler::new(options.clone());
	let report = compiler.compile_catalogue(catalogue)?;
	Ok((compiler.finish(), report))
}

/// Compile a single type description without any registry context.
///
/// Returns `Ok(None)` when the description is not a struct.
pub fn compile_description(source: &str) -> Result<Option<TypeDescriptor>> {
	let tokens = tokenize(source)?;
	compile_tokens(&tokens)
}

/// Compile an already tokenized description.
pub fn compile_tokens(tokens: &[Token]) -> Result<Option<TypeDescriptor>> {
	let mut parser = Parser::new(tokens);
	match parser.header()? {
		Some(name) => parser.body(name).map(Some),
		None => Ok(None),
	}
}

struct Parser<'a> {
	tokens: Vec<&'a Token>,
	at: usize,
}

impl<'a> Parser<'a> {
	fn new(tokens: &'a [Token]) -> Self {
		Self {
			tokens: tokens.iter().filter(|token| !token.kind.is_whitespace()).collect(),
			at: 0,
		}
	}

	/// Parse `struct <Name> {`, returning the name, or `None` for non-structs.
	fn header(&mut self) -> Result<Option<&'a str>> {
		let first = self.tokens.first().ok_or(SchemaError::EmptyDescription)?;
		if !first.is_struct_keyword() {
			return Ok(None);
		}
		self.at = 1;

		let name = self.expect(TokenKind::FieldName, "?", "struct name")?;
		self.expect(TokenKind::OpenBrace, name, "{")?;
		Ok(Some(name))
	}

	fn body(&mut self, name: &str) -> Result<TypeDescriptor> {
		let mut descriptor = TypeDescriptor::new(name);

		loop {
			let token = self.peek().ok_or_else(|| missing(name, "}", self.at))?;
			match token.kind {
				TokenKind::CloseBrace => {
					self.at += 1;
					break;
				}
				TokenKind::Semicolon | TokenKind::Whitespace => self.at += 1,
				TokenKind::NativeType | TokenKind::UserType => {
					self.at += 1;
					let field = self.expect(TokenKind::FieldName, name, "field name")?;
					let kind = field_kind(token, field);
					if descriptor.field(field).is_some() {
						return Err(SchemaError::DuplicateField {
							type_name: name.to_owned(),
							field: field.to_owned(),
						});
					}
					descriptor.fields.push(FieldSpec { name: field.into(), kind });
				}
				TokenKind::FieldName | TokenKind::OpenBrace => return Err(unexpected(name, "field type", token, self.at)),
			}
		}

		while let Some(token) = self.peek() {
			if token.kind != TokenKind::Semicolon {
				return Err(unexpected(name, "end of description", token, self.at));
			}
			self.at += 1;
		}

		Ok(descriptor)
	}

	fn peek(&self) -> Option<&'a Token> {
		self.tokens.get(self.at).copied()
	}

	fn expect(&mut self, kind: TokenKind, type_name: &str, expected: &'static str) -> Result<&'a str> {
		let token = self.peek().ok_or_else(|| missing(type_name, expected, self.at))?;
		if token.kind != kind {
			return Err(unexpected(type_name, expected, token, self.at));
		}
		self.at += 1;
		Ok(&*token.lexeme)
	}
}

fn field_kind(type_token: &Token, field: &str) -> FieldKind {
	match (type_token.kind, NativeType::from_name(&type_token.lexeme)) {
		// An inline `struct Name;` declares a reference field named after its target.
		(_, Some(NativeType::Struct)) => FieldKind::Reference { target: field.into() },
		(TokenKind::NativeType, Some(native)) => FieldKind::Scalar { native },
		_ => FieldKind::Reference {
			target: type_token.lexeme.clone(),
		},
	}
}

fn missing(type_name: &str, expected: &'static str, at: usize) -> SchemaError {
	SchemaError::MissingToken {
		type_name: type_name.to_owned(),
		expected,
		at,
	}
}

fn unexpected(type_name: &str, expected: &'static str, token: &Token, at: usize) -> SchemaError {
	SchemaError::UnexpectedToken {
		type_name: type_name.to_owned(),
		expected,
		got: token.lexeme.to_string(),
		at,
	}
}

fn display_error<S: Serializer>(error: &SchemaError, serializer: S) -> std::result::Result<S::Ok, S::Error> {
	serializer.collect_str(error)
}
