use std::ops::Range;

use super::{Chunk, Rule, Segment};
use crate::error::{self, ParseError};
use crate::{Comparator, Guard};

/// Characters that make up symbolic operators.
const OPERATOR_CHARS: [char; 4] = ['<', '>', '=', '!'];

/// Operators spelled with letters.
///
/// These are only recognized when followed by a number and a colon,
/// so that text like `"[ge|gen]"` stays text.
const WORD_OPERATORS: [&str; 6] = ["eq", "ne", "lt", "le", "gt", "ge"];

/// Parse a template into literal text and segments.
///
/// This does not cache anything, see [`TemplateCache`][crate::TemplateCache] for that.
pub fn parse(source: &str) -> Result<Vec<Chunk>, ParseError> {
	let bytes = source.as_bytes();
	let mut chunks = Vec::with_capacity(1);
	let mut literal = String::new();
	let mut finger = 0;
	while finger < bytes.len() {
		let next = match memchr::memchr2(b'[', b'\\', &bytes[finger..]) {
			Some(x) => finger + x,
			None => bytes.len(),
		};

		// Everything up to the next bracket or backslash is literal text.
		literal.push_str(&source[finger..next]);

		// If we hit the end of the string, we're done.
		if next == bytes.len() {
			break;
		}

		// We found an escape sequence.
		if bytes[next] == b'\\' {
			let value = unescape_one(source, next)?;
			literal.push(value);
			finger = next + 1 + value.len_utf8();

		// We found a segment.
		} else {
			let close = match find_non_escaped(b']', &bytes[next + 1..]) {
				Some(x) => next + 1 + x,
				None => return Err(error::UnclosedSegment { position: next }.into()),
			};
			if !literal.is_empty() {
				chunks.push(Chunk::Literal(std::mem::take(&mut literal)));
			}
			chunks.push(Chunk::Segment(Segment::parse(source, next, close)?));
			finger = close + 1;
		}
	}

	if !literal.is_empty() {
		chunks.push(Chunk::Literal(literal));
	}
	Ok(chunks)
}

impl Segment {
	/// Parse the segment between the brackets at `open` and `close`.
	fn parse(source: &str, open: usize, close: usize) -> Result<Self, ParseError> {
		let alternatives = scan_alternatives(source, open + 1, close)?;
		if alternatives.iter().all(|alternative| alternative.guard.is_none()) {
			Self::from_forms(open, alternatives)
		} else {
			Self::from_guarded(open, alternatives)
		}
	}

	/// Build a segment from the `[plural]`, `[singular|plural]` or `[singular|plural|zero]` shorthand.
	fn from_forms(position: usize, alternatives: Vec<Alternative>) -> Result<Self, ParseError> {
		if alternatives.len() > 3 {
			return Err(error::TooManyForms {
				position,
				count: alternatives.len(),
			}
			.into());
		}

		let mut texts: Vec<String> = alternatives.into_iter().map(|alternative| alternative.text).collect();
		let zero = if texts.len() == 3 { texts.pop() } else { None };
		let plural = texts.pop().unwrap_or_default();
		let singular = texts.pop().unwrap_or_default();

		let mut rules = vec![Rule {
			guard: Guard::equals(1),
			text: singular,
		}];
		if let Some(zero) = zero {
			rules.push(Rule {
				guard: Guard::equals(0),
				text: zero,
			});
		}

		Ok(Self {
			position,
			rules,
			fallback: Some(plural),
		})
	}

	/// Build a segment from alternatives where at least one has a guard.
	fn from_guarded(position: usize, alternatives: Vec<Alternative>) -> Result<Self, ParseError> {
		let mut rules: Vec<Rule> = Vec::with_capacity(alternatives.len());
		let mut fallback: Option<String> = None;

		for alternative in alternatives {
			match alternative.guard {
				None => {
					if let Some(first) = &fallback {
						return Err(error::AmbiguousFallback {
							position: alternative.range.start,
							len: alternative.range.len(),
							first: first.clone(),
							second: alternative.text,
						}
						.into());
					}
					fallback = Some(alternative.text);
				},
				Some((guard, spelling)) => match rules.iter().find(|rule| rule.guard == guard) {
					// The same guard with the same text is harmless.
					Some(rule) if rule.text == alternative.text => (),
					Some(rule) => {
						return Err(error::ConflictingGuard {
							position: spelling.start,
							len: spelling.len(),
							guard,
							first: rule.text.clone(),
							second: alternative.text,
						}
						.into());
					},
					None => rules.push(Rule {
						guard,
						text: alternative.text,
					}),
				},
			}
		}

		Ok(Self {
			position,
			rules,
			fallback,
		})
	}
}

/// One `|`-separated alternative of a segment, before guards are deduplicated.
#[derive(Debug)]
struct Alternative {
	/// The range of the whole alternative in the source.
	range: Range<usize>,

	/// The guard, and the range of its spelling in the source.
	guard: Option<(Guard, Range<usize>)>,

	/// The text, with escape sequences resolved.
	text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	/// At the start of an alternative.
	NewChunk,

	/// Collecting operator characters.
	Operator,

	/// Collecting the digits of the reference number.
	Number,

	/// Collecting text until `|` or the end of the segment.
	Text,
}

#[derive(Debug, Clone, Copy)]
enum Token {
	Plain(char),
	Escaped(char),
	End,
}

/// Split the segment content in `start..end` into alternatives.
///
/// Always returns at least one alternative.
fn scan_alternatives(source: &str, start: usize, end: usize) -> Result<Vec<Alternative>, ParseError> {
	let mut alternatives = Vec::new();
	let mut mode = Mode::NewChunk;
	let mut alternative_start = start;
	let mut operator = start..start;
	let mut digits = start..start;
	let mut guard = None;
	let mut text = String::new();
	let mut finger = start;

	loop {
		let position = finger;
		let token = match source[finger..end].chars().next() {
			None => Token::End,
			Some('\\') => {
				let value = unescape_one(source, finger)?;
				finger += 1 + value.len_utf8();
				Token::Escaped(value)
			},
			Some(c) => {
				finger += c.len_utf8();
				Token::Plain(c)
			},
		};

		match mode {
			Mode::NewChunk => match token {
				Token::Plain('|') | Token::End => {
					alternatives.push(Alternative {
						range: alternative_start..position,
						guard: None,
						text: String::new(),
					});
					if let Token::End = token {
						break;
					}
					alternative_start = finger;
				},
				Token::Plain(c) if c.is_ascii_digit() => {
					// A bare number is an implicit equality check.
					operator = position..position;
					digits = position..finger;
					mode = Mode::Number;
				},
				Token::Plain(c) if OPERATOR_CHARS.contains(&c) => {
					operator = position..finger;
					mode = Mode::Operator;
				},
				Token::Plain(c) => {
					if let Some(len) = word_operator(&source[position..end]) {
						operator = position..position + 2;
						finger = position + len;
						digits = finger..finger;
						mode = Mode::Number;
					} else {
						if c != ':' {
							text.push(c);
						}
						mode = Mode::Text;
					}
				},
				Token::Escaped(c) => {
					text.push(c);
					mode = Mode::Text;
				},
			},
			Mode::Operator => match token {
				Token::Plain(c) if OPERATOR_CHARS.contains(&c) => operator.end = finger,
				Token::Plain(c) if c.is_ascii_digit() => {
					digits = position..finger;
					mode = Mode::Number;
				},
				token => return Err(unexpected(position, token, "a number after the operator")),
			},
			Mode::Number => match token {
				Token::Plain(c) if c.is_ascii_digit() => digits.end = finger,
				Token::Plain(':') => {
					guard = Some(make_guard(source, operator.clone(), digits.clone())?);
					mode = Mode::Text;
				},
				Token::Plain(',') => return Err(error::MultipleComparisons { position }.into()),
				token => return Err(unexpected(position, token, "a colon (':') after the number")),
			},
			Mode::Text => match token {
				Token::Plain('|') | Token::End => {
					alternatives.push(Alternative {
						range: alternative_start..position,
						guard: guard.take(),
						text: std::mem::take(&mut text),
					});
					if let Token::End = token {
						break;
					}
					alternative_start = finger;
					mode = Mode::NewChunk;
				},
				Token::Plain(c) | Token::Escaped(c) => text.push(c),
			},
		}
	}

	Ok(alternatives)
}

/// Check if `rest` starts with a word operator followed by a number and a colon.
///
/// Returns the length of the operator and any spaces after it.
fn word_operator(rest: &str) -> Option<usize> {
	let word = rest.get(..2)?;
	if !WORD_OPERATORS.contains(&word) {
		return None;
	}
	let after = rest[2..].trim_start_matches(' ');
	let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();
	if digits == 0 || !after[digits..].starts_with(':') {
		return None;
	}
	Some(rest.len() - after.len())
}

/// Build a guard from the operator and digits found in the source.
///
/// An empty operator range means an implicit `=`.
fn make_guard(source: &str, operator: Range<usize>, digits: Range<usize>) -> Result<(Guard, Range<usize>), ParseError> {
	let spelling = if operator.is_empty() { "=" } else { &source[operator.clone()] };
	let comparator = Comparator::from_spelling(spelling).ok_or_else(|| error::UnsupportedOperator {
		position: operator.start,
		operator: spelling.to_owned(),
	})?;
	let reference: i64 = source[digits.clone()].parse().map_err(|_| error::NumberOutOfRange {
		position: digits.start,
		len: digits.len(),
	})?;
	Ok((Guard::from_parts(comparator, reference), operator.start..digits.end))
}

fn unexpected(position: usize, token: Token, message: &'static str) -> ParseError {
	let character = match token {
		Token::Plain(c) | Token::Escaped(c) => Some(c),
		Token::End => None,
	};
	error::UnexpectedCharacter {
		position,
		character,
		expected: error::ExpectedCharacter { message },
	}
	.into()
}

/// Unescape a single escape sequence in source at the given position.
///
/// The `position` must point to the backslash character in the source text.
///
/// Any character can be escaped and is then taken literally.
/// A backslash at the end of the source is an error.
fn unescape_one(source: &str, position: usize) -> Result<char, ParseError> {
	source[position + 1..]
		.chars()
		.next()
		.ok_or_else(|| error::InvalidEscapeSequence { position }.into())
}

/// Find the first non-escaped occurrence of a character.
fn find_non_escaped(needle: u8, haystack: &[u8]) -> Option<usize> {
	let mut finger = 0;
	while finger < haystack.len() {
		let candidate = memchr::memchr2(b'\\', needle, &haystack[finger..])?;
		if haystack[finger + candidate] == b'\\' {
			if finger + candidate == haystack.len() - 1 {
				return None;
			}
			finger += candidate + 2;
		} else {
			return Some(finger + candidate);
		}
	}
	None
}
