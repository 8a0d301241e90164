use crate::error::{ParseError, RenderError};
use crate::format::PlaceholderValue;
use crate::{Guard, VariableMap};

mod parse;
mod render;

pub use parse::parse;

/// A parsed plural template.
///
/// You can parse the template once and call [`Self::freeze()`] or [`Self::render_named()`] multiple times.
/// This is generally more efficient than calling [`render()`][crate::render] with a fresh string every time,
/// although [`render()`][crate::render] caches parsed templates as well.
///
/// The template owns its source string.
#[derive(Clone, PartialEq, Eq)]
pub struct PluralTemplate {
	source: String,
	chunks: Vec<Chunk>,
}

impl std::fmt::Debug for PluralTemplate {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("PluralTemplate").field(&self.source).finish()
	}
}

impl PluralTemplate {
	/// Parse a template from a string slice.
	///
	/// Segments have the form `[plural]`, `[singular|plural]`, `[singular|plural|zero]`,
	/// or contain guarded alternatives such as `[0:no|1:one|%(num)d]`.
	///
	/// A backslash makes the next character plain text.
	#[inline]
	#[allow(clippy::should_implement_trait)]
	pub fn from_str(source: &str) -> Result<Self, ParseError> {
		Self::from_string(source.to_owned())
	}

	/// Parse a template from a string.
	///
	/// This takes ownership of the string.
	#[inline]
	pub fn from_string(source: String) -> Result<Self, ParseError> {
		let chunks = parse(&source)?;
		Ok(Self { source, chunks })
	}

	/// Get the original source string.
	#[inline]
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Consume the template to get the original source string.
	#[inline]
	pub fn into_source(self) -> String {
		self.source
	}

	/// Get the parsed chunks of the template.
	#[inline]
	pub fn chunks(&self) -> &[Chunk] {
		&self.chunks
	}

	/// Render the template for a quantity, without placeholder substitution.
	///
	/// `%` signs in the template are copied to the output unchanged.
	pub fn freeze(&self, quantity: i64) -> Result<String, RenderError> {
		let mut output = String::with_capacity(self.source.len());
		render::freeze_into(&mut output, &self.chunks, quantity)?;
		Ok(output)
	}

	/// Render the template for a quantity, then substitute `%(name)` placeholders from a variable map.
	///
	/// Placeholders follow Python's `%`-formatting with a mapping, see [`substitute()`][crate::substitute].
	pub fn render_with<'a, M>(&self, quantity: i64, variables: &'a M) -> Result<String, RenderError>
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: PlaceholderValue,
	{
		let frozen = self.freeze(quantity)?;
		crate::format::substitute(&frozen, variables)
	}

	/// Render the template for a quantity that is also available as the placeholder `name`.
	///
	/// ```
	/// # fn main() -> Result<(), plustr::Error> {
	/// let template = plustr::PluralTemplate::from_str("[one|%(num)d] file[s]")?;
	/// assert_eq!(template.render_named("num", 1)?, "one file");
	/// assert_eq!(template.render_named("num", 2)?, "2 files");
	/// # Ok(())
	/// # }
	/// ```
	pub fn render_named(&self, name: &str, quantity: i64) -> Result<String, RenderError> {
		self.render_with(quantity, &[(name, quantity)])
	}
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
	/// Text that is used verbatim, with escape sequences resolved.
	Literal(String),

	/// A bracketed segment whose text depends on the quantity.
	Segment(Segment),
}

/// A bracketed segment whose text depends on the quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
	/// The byte offset of the opening bracket in the template.
	position: usize,

	/// Guarded texts, in the order they appear in the template.
	rules: Vec<Rule>,

	/// Text used when no guard matches.
	fallback: Option<String>,
}

impl Segment {
	/// The byte offset of the opening bracket in the template.
	#[inline]
	pub fn position(&self) -> usize {
		self.position
	}

	/// The guarded texts of the segment, in source order.
	#[inline]
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// The text used when no guard matches, if any.
	#[inline]
	pub fn fallback(&self) -> Option<&str> {
		self.fallback.as_deref()
	}

	/// Select the text for a quantity.
	///
	/// The first rule whose guard matches wins.
	/// Returns `None` if no guard matches and there is no fallback.
	pub fn select(&self, quantity: i64) -> Option<&str> {
		self.rules
			.iter()
			.find(|rule| rule.guard.matches(quantity))
			.map(|rule| rule.text.as_str())
			.or(self.fallback.as_deref())
	}
}

/// A text guarded by a comparison against the quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
	guard: Guard,
	text: String,
}

impl Rule {
	/// The guard that must match for the text to be used.
	#[inline]
	pub fn guard(&self) -> &Guard {
		&self.guard
	}

	/// The text of the rule.
	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}
}
