//! Module containing error details.

use crate::Guard;

/// An error that can occur while parsing or rendering a plural template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum Error {
	/// The template could not be parsed.
	Parse(ParseError),

	/// The template was parsed, but could not be rendered for the given quantity or variables.
	Render(RenderError),
}

impl From<ParseError> for Error {
	#[inline]
	fn from(other: ParseError) -> Self {
		Self::Parse(other)
	}
}

impl From<RenderError> for Error {
	#[inline]
	fn from(other: RenderError) -> Self {
		Self::Render(other)
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Parse(e) => Some(e),
			Self::Render(e) => Some(e),
		}
	}
}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Parse(e) => e.fmt(f),
			Self::Render(e) => e.fmt(f),
		}
	}
}

/// An error that can occur while parsing a template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum ParseError {
	/// The template ends with a backslash that does not escape anything.
	InvalidEscapeSequence(InvalidEscapeSequence),

	/// The template contains a `[` without a matching `]`.
	UnclosedSegment(UnclosedSegment),

	/// A guard in a segment contains an unexpected character.
	UnexpectedCharacter(UnexpectedCharacter),

	/// A guard uses an operator that is not supported.
	UnsupportedOperator(UnsupportedOperator),

	/// A guard tries to chain more than one comparison (`1,2:text`).
	MultipleComparisons(MultipleComparisons),

	/// The reference number of a guard does not fit in an `i64`.
	NumberOutOfRange(NumberOutOfRange),

	/// A segment with guards has more than one text without a guard.
	AmbiguousFallback(AmbiguousFallback),

	/// A segment contains the same guard twice, with different texts.
	ConflictingGuard(ConflictingGuard),

	/// A segment without guards has more than three forms.
	TooManyForms(TooManyForms),
}

impl From<InvalidEscapeSequence> for ParseError {
	#[inline]
	fn from(other: InvalidEscapeSequence) -> Self {
		Self::InvalidEscapeSequence(other)
	}
}

impl From<UnclosedSegment> for ParseError {
	#[inline]
	fn from(other: UnclosedSegment) -> Self {
		Self::UnclosedSegment(other)
	}
}

impl From<UnexpectedCharacter> for ParseError {
	#[inline]
	fn from(other: UnexpectedCharacter) -> Self {
		Self::UnexpectedCharacter(other)
	}
}

impl From<UnsupportedOperator> for ParseError {
	#[inline]
	fn from(other: UnsupportedOperator) -> Self {
		Self::UnsupportedOperator(other)
	}
}

impl From<MultipleComparisons> for ParseError {
	#[inline]
	fn from(other: MultipleComparisons) -> Self {
		Self::MultipleComparisons(other)
	}
}

impl From<NumberOutOfRange> for ParseError {
	#[inline]
	fn from(other: NumberOutOfRange) -> Self {
		Self::NumberOutOfRange(other)
	}
}

impl From<AmbiguousFallback> for ParseError {
	#[inline]
	fn from(other: AmbiguousFallback) -> Self {
		Self::AmbiguousFallback(other)
	}
}

impl From<ConflictingGuard> for ParseError {
	#[inline]
	fn from(other: ConflictingGuard) -> Self {
		Self::ConflictingGuard(other)
	}
}

impl From<TooManyForms> for ParseError {
	#[inline]
	fn from(other: TooManyForms) -> Self {
		Self::TooManyForms(other)
	}
}

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::InvalidEscapeSequence(e) => e.fmt(f),
			Self::UnclosedSegment(e) => e.fmt(f),
			Self::UnexpectedCharacter(e) => e.fmt(f),
			Self::UnsupportedOperator(e) => e.fmt(f),
			Self::MultipleComparisons(e) => e.fmt(f),
			Self::NumberOutOfRange(e) => e.fmt(f),
			Self::AmbiguousFallback(e) => e.fmt(f),
			Self::ConflictingGuard(e) => e.fmt(f),
			Self::TooManyForms(e) => e.fmt(f),
		}
	}
}

/// An error that can occur while rendering a parsed template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum RenderError {
	/// No guard of a segment matched and the segment has no fallback text.
	NoMatchingRule(NoMatchingRule),

	/// A placeholder names a variable that is not in the variable map.
	NoSuchVariable(NoSuchVariable),

	/// The text contains a malformed `%` placeholder.
	InvalidPlaceholder(InvalidPlaceholder),

	/// An integer conversion was applied to a value that is not an integer.
	NotAnInteger(NotAnInteger),
}

impl From<NoMatchingRule> for RenderError {
	#[inline]
	fn from(other: NoMatchingRule) -> Self {
		Self::NoMatchingRule(other)
	}
}

impl From<NoSuchVariable> for RenderError {
	#[inline]
	fn from(other: NoSuchVariable) -> Self {
		Self::NoSuchVariable(other)
	}
}

impl From<InvalidPlaceholder> for RenderError {
	#[inline]
	fn from(other: InvalidPlaceholder) -> Self {
		Self::InvalidPlaceholder(other)
	}
}

impl From<NotAnInteger> for RenderError {
	#[inline]
	fn from(other: NotAnInteger) -> Self {
		Self::NotAnInteger(other)
	}
}

impl std::error::Error for RenderError {}

impl std::fmt::Display for RenderError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::NoMatchingRule(e) => e.fmt(f),
			Self::NoSuchVariable(e) => e.fmt(f),
			Self::InvalidPlaceholder(e) => e.fmt(f),
			Self::NotAnInteger(e) => e.fmt(f),
		}
	}
}

/// The template ends with a backslash that does not escape anything.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct InvalidEscapeSequence {
	/// The byte offset within the template where the error occurs.
	///
	/// This points to the trailing backslash character in the template.
	pub position: usize,
}

impl std::error::Error for InvalidEscapeSequence {}

impl std::fmt::Display for InvalidEscapeSequence {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Invalid escape sequence: missing escape character")
	}
}

/// The template contains a `[` without a matching `]`.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct UnclosedSegment {
	/// The byte offset of the opening bracket in the template.
	pub position: usize,
}

impl std::error::Error for UnclosedSegment {}

impl std::fmt::Display for UnclosedSegment {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Missing closing bracket")
	}
}

/// A guard contains an unexpected character.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct UnexpectedCharacter {
	/// The byte offset within the template where the error occurs.
	///
	/// If the alternative ended too early, this points to the `|` or `]` that ended it.
	pub position: usize,

	/// The unexpected character, or `None` if the alternative ended too early.
	pub character: Option<char>,

	/// A human readable message about what was expected instead.
	pub expected: ExpectedCharacter,
}

impl std::error::Error for UnexpectedCharacter {}

impl std::fmt::Display for UnexpectedCharacter {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self.character {
			Some(c) => write!(f, "Unexpected character: {:?}, expected {}", c, self.expected.message()),
			None => write!(f, "Unexpected end of alternative, expected {}", self.expected.message()),
		}
	}
}

/// A struct to describe what was expected instead of the unexpected character.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct ExpectedCharacter {
	/// A human readable message to describe what is expected.
	pub(crate) message: &'static str,
}

impl ExpectedCharacter {
	/// Get a human readable message to describe what was expected.
	pub fn message(&self) -> &str {
		self.message
	}
}

/// A guard uses an operator that is not supported.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct UnsupportedOperator {
	/// The byte offset of the operator in the template.
	pub position: usize,

	/// The operator as written in the template.
	pub operator: String,
}

impl std::error::Error for UnsupportedOperator {}

impl std::fmt::Display for UnsupportedOperator {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Unsupported operator: {:?}", self.operator)
	}
}

/// A guard tries to chain more than one comparison.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct MultipleComparisons {
	/// The byte offset of the `,` in the template.
	pub position: usize,
}

impl std::error::Error for MultipleComparisons {}

impl std::fmt::Display for MultipleComparisons {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Multiple comparisons are not yet supported")
	}
}

/// The reference number of a guard does not fit in an `i64`.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct NumberOutOfRange {
	/// The byte offset of the first digit in the template.
	pub position: usize,

	/// The number of digits.
	pub len: usize,
}

impl std::error::Error for NumberOutOfRange {}

impl std::fmt::Display for NumberOutOfRange {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Number out of range")
	}
}

/// A segment with guards has more than one text without a guard.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct AmbiguousFallback {
	/// The byte offset of the second fallback alternative in the template.
	pub position: usize,

	/// The length of the second fallback alternative in the template.
	pub len: usize,

	/// The first fallback text.
	pub first: String,

	/// The second fallback text.
	pub second: String,
}

impl std::error::Error for AmbiguousFallback {}

impl std::fmt::Display for AmbiguousFallback {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"Only one text without a guard is allowed when guards are used, found {:?} and {:?}",
			self.first, self.second,
		)
	}
}

/// A segment contains the same guard twice, with different texts.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct ConflictingGuard {
	/// The byte offset of the second alternative with the guard in the template.
	pub position: usize,

	/// The length of the guard of the second alternative in the template.
	pub len: usize,

	/// The guard that appears twice.
	pub guard: Guard,

	/// The text of the first alternative with the guard.
	pub first: String,

	/// The text of the second alternative with the guard.
	pub second: String,
}

impl std::error::Error for ConflictingGuard {}

impl std::fmt::Display for ConflictingGuard {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"Two different texts for guard {}: {:?} and {:?}",
			self.guard, self.first, self.second,
		)
	}
}

/// A segment without guards has more than three forms.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct TooManyForms {
	/// The byte offset of the opening bracket of the segment in the template.
	pub position: usize,

	/// The number of forms in the segment.
	pub count: usize,
}

impl std::error::Error for TooManyForms {}

impl std::fmt::Display for TooManyForms {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"Too many forms without guards: expected at most 3 (singular|plural|zero), found {}",
			self.count,
		)
	}
}

/// No guard of a segment matched the quantity and the segment has no fallback text.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct NoMatchingRule {
	/// The byte offset of the opening bracket of the segment in the template.
	pub position: usize,

	/// The quantity that was rendered.
	pub quantity: i64,
}

impl std::error::Error for NoMatchingRule {}

impl std::fmt::Display for NoMatchingRule {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "No matching rule and no fallback defined for {}", self.quantity)
	}
}

/// A placeholder names a variable that is not in the variable map.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct NoSuchVariable {
	/// The byte offset of the placeholder in the rendered text.
	pub position: usize,

	/// The name of the variable.
	pub name: String,
}

impl std::error::Error for NoSuchVariable {}

impl std::fmt::Display for NoSuchVariable {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "No such variable: %({})", self.name)
	}
}

/// The text contains a malformed `%` placeholder.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct InvalidPlaceholder {
	/// The byte offset of the `%` sign in the rendered text.
	pub position: usize,

	/// The offending character, or `None` if the text ended inside the placeholder.
	pub character: Option<char>,
}

impl std::error::Error for InvalidPlaceholder {}

impl std::fmt::Display for InvalidPlaceholder {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self.character {
			Some(c) => write!(f, "Invalid placeholder: unexpected character {c:?}"),
			None => write!(f, "Invalid placeholder: unexpected end of text"),
		}
	}
}

/// An integer conversion (`d`, `i` or `u`) was applied to a value that is not an integer.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct NotAnInteger {
	/// The byte offset of the placeholder in the rendered text.
	pub position: usize,

	/// The name of the variable.
	pub name: String,

	/// The conversion character of the placeholder.
	pub conversion: char,
}

impl std::error::Error for NotAnInteger {}

impl std::fmt::Display for NotAnInteger {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Placeholder %({}){} requires an integer value", self.name, self.conversion)
	}
}

impl ParseError {
	/// Get the range in the template that contains the error.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		let (start, len) = match &self {
			Self::InvalidEscapeSequence(e) => (e.position, 1),
			Self::UnclosedSegment(e) => (e.position, 1),
			Self::UnexpectedCharacter(e) => (e.position, e.character.map_or(1, char::len_utf8)),
			Self::UnsupportedOperator(e) => (e.position, e.operator.len()),
			Self::MultipleComparisons(e) => (e.position, 1),
			Self::NumberOutOfRange(e) => (e.position, e.len),
			Self::AmbiguousFallback(e) => (e.position, e.len.max(1)),
			Self::ConflictingGuard(e) => (e.position, e.len),
			Self::TooManyForms(e) => (e.position, 1),
		};
		std::ops::Range {
			start,
			end: start + len,
		}
	}

	/// Get the line of the template that contains the error.
	///
	/// # Panics
	/// May panic if the source text is not the template that contains the error.
	pub fn source_line<'a>(&self, source: &'a str) -> &'a str {
		let position = self.source_range().start;
		let start = line_start(source, position);
		let end = line_end(source, position);
		&source[start..end]
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the source line exceeds 60 characters in width.
	/// For more control over this behaviour, consider using [`Self::source_range()`] and [`Self::source_line()`] instead.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		use unicode_width::UnicodeWidthStr;

		let range = self.source_range();
		let start = line_start(source, range.start);
		let line = self.source_line(source);
		if line.width() > 60 {
			return Ok(());
		}
		let end = (range.end - start).min(line.len());
		write!(f, "  {line}\n  ")?;
		write_underline(f, line, range.start - start..end)?;
		writeln!(f)
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		// Writing to a `String` never fails.
		let _ = self.write_source_highlighting(&mut output, source);
		output
	}
}

fn line_start(source: &str, position: usize) -> usize {
	match source.as_bytes()[..position].iter().rposition(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => line_end + 1,
		None => 0,
	}
}

fn line_end(source: &str, position: usize) -> usize {
	match source.as_bytes()[position..].iter().position(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => position + line_end,
		None => source.len(),
	}
}

fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	let carets = line[range].width().max(1);
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}
