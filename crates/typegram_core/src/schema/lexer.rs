use crate::schema::stack::TokenStack;
use crate::schema::token::{NativeType, Token, TokenKind};
use crate::schema::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
	Default,
	Type,
	Property,
}

/// Split one type description into classified tokens.
///
/// Word boundaries follow the host's fixed layout: a type word ends only
/// before a single space, a field name only before `;`, a space, or the end of
/// input. Irregular spacing yields undefined boundaries rather than an error;
/// the compiler reports the resulting gaps as missing tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
	let chars: Vec<char> = input.chars().collect();
	let mut stack = TokenStack::new();
	stack.push(LexState::Default);
	stack.push(LexState::Type);

	let mut tokens = Vec::new();
	let mut word = String::new();

	for (pos, &ch) in chars.iter().enumerate() {
		let next = chars.get(pos + 1).copied();

		match stack.top()? {
			LexState::Default => {
				if let Some(kind) = punct_kind(ch) {
					tokens.push(Token::new(kind, ch.to_string()));
				}
				if next.is_some_and(|item| item.is_ascii_alphanumeric()) {
					stack.push(LexState::Type);
				}
			}
			LexState::Type => {
				if ch.is_ascii_alphanumeric() {
					word.push(ch);
					if next == Some(' ') {
						tokens.push(classify_type_word(&word));
						word.clear();
						stack.replace_top(LexState::Property)?;
					}
				}
			}
			LexState::Property => {
				if ch.is_ascii_alphanumeric() {
					word.push(ch);
					if matches!(next, None | Some(';') | Some(' ')) {
						tokens.push(Token::new(TokenKind::FieldName, word.as_str()));
						word.clear();
						stack.pop()?;
					}
				} else if ch == ' ' {
					tokens.push(Token::new(TokenKind::Whitespace, " "));
				}
			}
		}
	}

	if !word.is_empty() {
		tracing::trace!(lexeme = %word, "dropped unterminated word at end of type description");
	}

	Ok(tokens)
}

fn punct_kind(ch: char) -> Option<TokenKind> {
	match ch {
		'{' => Some(TokenKind::OpenBrace),
		'}' => Some(TokenKind::CloseBrace),
		';' => Some(TokenKind::Semicolon),
		' ' | '\n' | '\r' | '\t' => Some(TokenKind::Whitespace),
		_ => None,
	}
}

fn classify_type_word(word: &str) -> Token {
	let kind = if NativeType::from_name(word).is_some() {
		TokenKind::NativeType
	} else {
		TokenKind::UserType
	};
	Token::new(kind, word)
}
