//! Plural-aware string templates.
//!
//! # Features
//!
//! * Plural suffixes: `"file[s]"`
//! * Singular and plural forms: `"stor[y|ies]"`
//! * Singular, plural and zero forms: `"[one|%(num)d|no] file[s]"`
//! * Numeric guards: `"[0:no|1:one|<10:a few|many] file[s]"`
//! * Python-style placeholders after plural selection: `"%(num)d file[s]"`
//! * Parsed templates are cached, so rendering the same template again is cheap.
//!
//! # Syntax
//!
//! A template is literal text with bracketed segments.
//! The text of a segment is split on `|` into alternatives.
//!
//! Without guards, the alternatives are shorthand forms:
//!
//! * `[p]`: nothing for a quantity of one, `p` otherwise,
//! * `[s|p]`: `s` for a quantity of one, `p` otherwise,
//! * `[s|p|z]`: `s` for one, `z` for zero, `p` otherwise.
//!
//! An alternative can start with a guard: a comparison operator, a number and a colon, such as `<10:`.
//! The operator can be omitted for an equality test, so `0:` is the same as `=0:`.
//! Supported operators are `=`, `==`, `eq`, `!=`, `<>`, `ne`, `<`, `lt`, `<=`, `le`, `>`, `gt`, `>=` and `ge`.
//! The first alternative whose guard matches is used.
//! One alternative without a guard may be present as fallback.
//!
//! A backslash makes the next character plain text, so `\[`, `\|` and `\1` never start a segment, alternative or guard.
//!
//! # Examples
//!
//! The [`render()`] function selects the forms for a quantity.
//!
//! ```
//! # fn main() -> Result<(), plustr::Error> {
//! assert_eq!(plustr::render("file[s]", 1)?, "file");
//! assert_eq!(plustr::render("file[s]", 3)?, "files");
//! assert_eq!(plustr::render("[0:no |]file[s]", 0)?, "no files");
//! # Ok(())
//! # }
//! ```
//!
//! The [`render_named()`] function also makes the quantity available as a placeholder.
//!
//! ```
//! # fn main() -> Result<(), plustr::Error> {
//! let template = "[one|%(num)d] file[s] or director[y|ies]";
//! assert_eq!(plustr::render_named(template, "num", 1)?, "one file or directory");
//! assert_eq!(plustr::render_named(template, "num", 2)?, "2 files or directories");
//! # Ok(())
//! # }
//! ```
//!
//! Templates can also be parsed up front with [`PluralTemplate::from_str()`],
//! and a [`Renderer`] can be used to get a cache that is not shared with the rest of the process.
#![warn(missing_docs, missing_debug_implementations)]

pub mod error;
pub use error::{Error, ParseError, RenderError};

mod guard;
pub use guard::{Comparator, Guard};

mod template;
pub use template::{parse, Chunk, PluralTemplate, Rule, Segment};

mod map;
pub use map::*;

mod format;
pub use format::{substitute, PlaceholderValue};

mod cache;
pub use cache::TemplateCache;

mod renderer;
pub use renderer::Renderer;

mod features;

/// Render a template for a quantity.
///
/// The template is parsed on first use and kept in the cache of the [global renderer][Renderer::global].
/// Placeholders such as `%(num)d` are copied to the output unchanged.
pub fn render(template: &str, quantity: i64) -> Result<String, Error> {
	Renderer::global().render(template, quantity)
}

/// Render a template for a quantity that is also available as the placeholder `name`.
///
/// The template is parsed on first use and kept in the cache of the [global renderer][Renderer::global].
pub fn render_named(template: &str, name: &str, quantity: i64) -> Result<String, Error> {
	Renderer::global().render_named(template, name, quantity)
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	#[test]
	fn plural_suffix() {
		check!(let Ok("1 file") = render("1 file[s]", 1).as_deref());
		check!(let Ok("0 files") = render("0 file[s]", 0).as_deref());
		check!(let Ok("2 files") = render("2 file[s]", 2).as_deref());
	}

	#[test]
	fn optional_zero_prefix() {
		check!(let Ok("no files") = render("[0:no |]file[s]", 0).as_deref());
		check!(let Ok("file") = render("[0:no |]file[s]", 1).as_deref());
		check!(let Ok("files") = render("[0:no |]file[s]", 5).as_deref());
	}

	#[test]
	fn named_quantity() {
		let template = "[one|%(num)d] file[s] or director[y|ies]";
		check!(let Ok("one file or directory") = render_named(template, "num", 1).as_deref());
		check!(let Ok("7 files or directories") = render_named(template, "num", 7).as_deref());
	}

	#[test]
	fn errors() {
		let_assert!(Err(Error::Parse(ParseError::UnclosedSegment(e))) = render("file[s", 2));
		assert!(e.position == 4);
		let_assert!(Err(Error::Parse(ParseError::UnsupportedOperator(e))) = render("[=<1:x]", 2));
		assert!(e.operator == "=<");
		let_assert!(Err(Error::Render(RenderError::NoMatchingRule(_))) = render("[0:none]", 2));
	}

	#[test]
	fn global_cache_is_used() {
		let template = "crate-level test [tree|trees]";
		check!(let Ok("crate-level test trees") = render(template, 2).as_deref());
		assert!(Renderer::global().cache().contains(template));
	}
}
