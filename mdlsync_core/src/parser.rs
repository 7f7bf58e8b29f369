use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

use crate::lexer::LineToken;
use crate::lexer::TokenKind;
use crate::lexer::tokenize_line;

/// Lines whose first character is this marker are control/comment lines and
/// are excluded from parsing. The marker only counts at the very start of a
/// physical line.
pub const CONTROL_MARKER: char = ':';

/// A `name = value` pair extracted from text.
///
/// The name is trimmed; internal whitespace is preserved verbatim. The value
/// is kept as literal text and never converted to a float, so substitution
/// reproduces the source notation exactly (`1e3` stays `1e3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
	/// The variable name, possibly including a bracketed subscript suffix.
	pub name: String,
	/// The numeric literal assigned to the name.
	pub value: String,
}

/// Classification of a single physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LineKind {
	/// The line starts with [`CONTROL_MARKER`] and is excluded from parsing.
	Control,
	/// The line carries a `name = value` assignment with a numeric literal.
	Assignment(AssignmentLine),
	/// Anything else: equations, annotations, separators, prose.
	Other,
}

/// A `name = value` line together with the byte span of its value literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentLine {
	/// The trimmed variable name.
	pub name: String,
	/// The value literal text.
	pub value: String,
	/// Byte range of the value literal within the line.
	pub value_span: Range<usize>,
	/// The name run starts the physical line (only whitespace precedes it).
	/// Unanchored lines are never substitution targets: a name that appears
	/// as the tail of a longer name must not match.
	pub anchored: bool,
	/// The value literal is the head of a comma-separated element list, i.e.
	/// the compact subscript form, which this grammar does not support.
	pub list_form: bool,
	/// Optimization bound syntax (`<=`) was recognized and discarded.
	pub bounded: bool,
}

/// Parse one physical line against the assignment grammar.
///
/// The name resolves to the trailing run of name-valid tokens ending at the
/// equals sign; anything up to the last bound marker before the equals sign
/// is bound syntax and is discarded. A non-numeric right-hand side is not an
/// assignment in this model and yields [`LineKind::Other`].
pub fn parse_line(line: &str) -> LineKind {
	if line.starts_with(CONTROL_MARKER) {
		return LineKind::Control;
	}

	let tokens = tokenize_line(line);

	// `<=` lexes as its own token, so this is the first plain equals sign.
	let Some(eq) = tokens
		.iter()
		.position(|token| token.kind == TokenKind::Equals)
	else {
		return LineKind::Other;
	};

	let bound_prefix = tokens[..eq]
		.iter()
		.rposition(|token| token.kind == TokenKind::BoundMarker);
	let name_start = bound_prefix.map_or(0, |idx| idx + 1);

	// The name is the trailing run of name-valid tokens ending at the equals
	// sign; an invalid token restarts the run.
	let mut run_start = name_start;
	for (idx, token) in tokens[name_start..eq].iter().enumerate() {
		if !token.kind.is_name_part() {
			run_start = name_start + idx + 1;
		}
	}

	let name_tokens = trim_whitespace(&tokens[run_start..eq]);
	let (Some(first), Some(last)) = (name_tokens.first(), name_tokens.last()) else {
		return LineKind::Other;
	};
	let name = line[first.span.start..last.span.end].to_string();

	let anchored = bound_prefix.is_none()
		&& tokens[..run_start]
			.iter()
			.all(|token| token.kind == TokenKind::Whitespace);

	// The value must be the next non-whitespace token after the equals sign,
	// and it must be a numeric literal.
	let mut cursor = eq + 1;
	while tokens
		.get(cursor)
		.is_some_and(|token| token.kind == TokenKind::Whitespace)
	{
		cursor += 1;
	}
	let Some(value_token) = tokens.get(cursor) else {
		return LineKind::Other;
	};
	if value_token.kind != TokenKind::Number {
		return LineKind::Other;
	}
	let value_span = value_token.span.clone();
	let value = line[value_span.clone()].to_string();

	// Peek past the literal: a comma marks the compact multi-element
	// subscript form, a bound marker is upper-bound syntax.
	cursor += 1;
	while tokens
		.get(cursor)
		.is_some_and(|token| token.kind == TokenKind::Whitespace)
	{
		cursor += 1;
	}
	let mut list_form = false;
	let mut bounded = bound_prefix.is_some();
	match tokens.get(cursor).map(|token| token.kind) {
		Some(TokenKind::Comma) => list_form = true,
		Some(TokenKind::BoundMarker) => bounded = true,
		_ => {}
	}

	LineKind::Assignment(AssignmentLine {
		name,
		value,
		value_span,
		anchored,
		list_form,
		bounded,
	})
}

/// Extract `name = value` assignments from raw document text.
///
/// Control lines are dropped, the remaining physical lines are parsed in
/// order, and every non-compact assignment is collected. Duplicate names are
/// preserved as separate entries in source order. Lines that do not match
/// the assignment grammar are silently excluded; not every line of an
/// arbitrary text file is an assignment.
pub fn extract_assignments(text: &str) -> Vec<Assignment> {
	let mut assignments = Vec::new();

	for line in text.split_inclusive('\n') {
		match parse_line(line) {
			LineKind::Assignment(assignment) if !assignment.list_form => {
				assignments.push(Assignment {
					name: assignment.name,
					value: assignment.value,
				});
			}
			_ => {}
		}
	}

	assignments
}

fn trim_whitespace(tokens: &[LineToken]) -> &[LineToken] {
	let Some(start) = tokens
		.iter()
		.position(|token| token.kind != TokenKind::Whitespace)
	else {
		return &[];
	};
	let Some(end) = tokens
		.iter()
		.rposition(|token| token.kind != TokenKind::Whitespace)
	else {
		return &[];
	};
	&tokens[start..=end]
}
