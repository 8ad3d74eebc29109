use serde::Serialize;

/// Grammar role of one lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
	/// Member of the closed native type set.
	NativeType,
	/// Any other type word.
	UserType,
	/// Struct or field identifier.
	FieldName,
	/// `{`
	OpenBrace,
	/// `}`
	CloseBrace,
	/// `;`
	Semicolon,
	/// Space, tab, or line break.
	Whitespace,
}

impl TokenKind {
	/// Whether the token carries no grammar meaning beyond separation.
	pub fn is_whitespace(self) -> bool {
		matches!(self, Self::Whitespace)
	}

	/// Whether the token is a type word.
	pub fn is_type(self) -> bool {
		matches!(self, Self::NativeType | Self::UserType)
	}
}

/// One classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
	/// Grammar role.
	pub kind: TokenKind,
	/// Source text.
	pub lexeme: Box<str>,
}

impl Token {
	pub(crate) fn new(kind: TokenKind, lexeme: impl Into<Box<str>>) -> Self {
		Self { kind, lexeme: lexeme.into() }
	}

	/// Whether this is the `struct` native type word.
	pub fn is_struct_keyword(&self) -> bool {
		self.kind == TokenKind::NativeType && NativeType::from_name(&self.lexeme) == Some(NativeType::Struct)
	}
}

/// Closed set of primitive type words understood by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NativeType {
	/// `base64`
	#[serde(rename = "base64")]
	Base64,
	/// `boolean`
	#[serde(rename = "boolean")]
	Boolean,
	/// `byte`
	#[serde(rename = "byte")]
	Byte,
	/// `date`
	#[serde(rename = "date")]
	Date,
	/// `dateTime`
	#[serde(rename = "dateTime")]
	DateTime,
	/// `double`
	#[serde(rename = "double")]
	Double,
	/// `int`
	#[serde(rename = "int")]
	Int,
	/// `string`
	#[serde(rename = "string")]
	String,
	/// `struct`
	#[serde(rename = "struct")]
	Struct,
	/// `time`
	#[serde(rename = "time")]
	Time,
}

impl NativeType {
	/// Every native type, in grammar order.
	pub const ALL: [NativeType; 10] = [
		Self::Base64,
		Self::Boolean,
		Self::Byte,
		Self::Date,
		Self::DateTime,
		Self::Double,
		Self::Int,
		Self::String,
		Self::Struct,
		Self::Time,
	];

	/// Resolve a type word; matching is case-sensitive.
	pub fn from_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|item| item.as_str() == name)
	}

	/// Grammar spelling.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Base64 => "base64",
			Self::Boolean => "boolean",
			Self::Byte => "byte",
			Self::Date => "date",
			Self::DateTime => "dateTime",
			Self::Double => "double",
			Self::Int => "int",
			Self::String => "string",
			Self::Struct => "struct",
			Self::Time => "time",
		}
	}
}
