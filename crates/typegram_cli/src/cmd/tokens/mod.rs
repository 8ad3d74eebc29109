use std::path::PathBuf;

use serde::Serialize;
use typegram::schema::{Catalogue, Result, SchemaError, Token, TokenKind, tokenize};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Only show entries declaring this type name.
	#[arg(long = "type")]
	pub type_name: Option<String>,
	/// Keep whitespace tokens in the output.
	#[arg(long)]
	pub whitespace: bool,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct EntryJson<'a> {
	index: usize,
	name: Option<&'a str>,
	tokens: Vec<&'a Token>,
}

#[derive(Serialize)]
struct TokensJson<'a> {
	path: String,
	entries: Vec<EntryJson<'a>>,
}

/// Tokenize every catalogue entry and print the streams.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		type_name,
		whitespace,
		json,
	} = args;

	let catalogue = Catalogue::open(&path)?;
	let mut streams = Vec::with_capacity(catalogue.len());
	for (index, source) in catalogue.entries().iter().enumerate() {
		streams.push((index, tokenize(source)?));
	}

	let entries: Vec<_> = streams
		.iter()
		.map(|(index, tokens)| EntryJson {
			index: *index,
			name: declared_name(tokens),
			tokens: tokens.iter().filter(|token| whitespace || !token.kind.is_whitespace()).collect(),
		})
		.filter(|entry| type_name.as_deref().is_none_or(|wanted| entry.name == Some(wanted)))
		.collect();

	if let Some(name) = type_name
		&& entries.is_empty()
	{
		return Err(SchemaError::TypeNotFound { name });
	}

	if json {
		return emit_json(&TokensJson {
			path: path.display().to_string(),
			entries,
		});
	}

	println!("path: {}", path.display());
	println!("entries: {}", catalogue.len());
	for entry in &entries {
		println!("entry[{}]: {}", entry.index, entry.name.unwrap_or("<unnamed>"));
		for token in &entry.tokens {
			println!("  {:<12} {:?}", kind_label(token.kind), token.lexeme);
		}
	}

	Ok(())
}

/// Name a description declares: the word after `struct`, or a typedef's alias.
pub(crate) fn declared_name(tokens: &[Token]) -> Option<&str> {
	let mut words = tokens.iter().filter(|token| !token.kind.is_whitespace());
	let first = words.next()?;
	if first.is_struct_keyword() {
		return words.next().filter(|token| token.kind == TokenKind::FieldName).map(|token| &*token.lexeme);
	}
	words.find(|token| token.kind == TokenKind::FieldName).map(|token| &*token.lexeme)
}

fn kind_label(kind: TokenKind) -> &'static str {
	match kind {
		TokenKind::NativeType => "native_type",
		TokenKind::UserType => "user_type",
		TokenKind::FieldName => "field_name",
		TokenKind::OpenBrace => "open_brace",
		TokenKind::CloseBrace => "close_brace",
		TokenKind::Semicolon => "semicolon",
		TokenKind::Whitespace => "whitespace",
	}
}
