use std::ops::Range;

use logos::Logos;

/// Raw tokens produced by logos for flat tokenization of a single physical
/// line.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	/// `<=`, the bound delimiter from optimization control syntax. Must be
	/// declared so that `<=` never lexes as a bare equals sign.
	#[token("<=")]
	BoundMarker,
	#[token("=")]
	Equals,
	#[token(":")]
	ControlMarker,
	#[token(",")]
	Comma,
	#[token("[")]
	BracketOpen,
	#[token("]")]
	BracketClose,
	#[regex(r"[ \t\r\n]+")]
	Whitespace,
	/// Numeric literal: optional sign, integer part with no redundant leading
	/// zero, optional fraction, optional exponent. Wins length ties against
	/// `Word` (e.g. a bare `0`), while `007` or `1x` lex as words.
	#[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]*)?([eE][+-]?[0-9]+)?", priority = 10)]
	Number,
	#[regex(r"[a-zA-Z0-9_]+")]
	Word,
}

/// Token classes relevant to the assignment grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
	BoundMarker,
	Equals,
	ControlMarker,
	Comma,
	BracketOpen,
	BracketClose,
	Whitespace,
	Number,
	Word,
	/// Any byte sequence outside the assignment grammar.
	Other,
}

impl TokenKind {
	/// Tokens that may appear inside a variable name.
	pub(crate) fn is_name_part(self) -> bool {
		matches!(
			self,
			TokenKind::Word
				| TokenKind::Number
				| TokenKind::Comma
				| TokenKind::BracketOpen
				| TokenKind::BracketClose
				| TokenKind::Whitespace
		)
	}
}

/// A classified token and its byte span within the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineToken {
	pub kind: TokenKind,
	pub span: Range<usize>,
}

/// Tokenize a single physical line. Unrecognized bytes come back as
/// [`TokenKind::Other`]; adjacent runs of them are merged into one token so
/// downstream scanning sees a single token per foreign span.
pub(crate) fn tokenize_line(line: &str) -> Vec<LineToken> {
	let mut tokens: Vec<LineToken> = Vec::new();

	for (result, span) in RawToken::lexer(line).spanned() {
		let kind = match result {
			Ok(RawToken::BoundMarker) => TokenKind::BoundMarker,
			Ok(RawToken::Equals) => TokenKind::Equals,
			Ok(RawToken::ControlMarker) => TokenKind::ControlMarker,
			Ok(RawToken::Comma) => TokenKind::Comma,
			Ok(RawToken::BracketOpen) => TokenKind::BracketOpen,
			Ok(RawToken::BracketClose) => TokenKind::BracketClose,
			Ok(RawToken::Whitespace) => TokenKind::Whitespace,
			Ok(RawToken::Number) => TokenKind::Number,
			Ok(RawToken::Word) => TokenKind::Word,
			Err(()) => TokenKind::Other,
		};

		if kind == TokenKind::Other {
			if let Some(last) = tokens.last_mut() {
				if last.kind == TokenKind::Other && last.span.end == span.start {
					last.span.end = span.end;
					continue;
				}
			}
		}

		tokens.push(LineToken { kind, span });
	}

	tokens
}
