use std::sync::{Arc, LazyLock};

use crate::error::{Error, ParseError};
use crate::format::PlaceholderValue;
use crate::{PluralTemplate, TemplateCache, VariableMap};

/// Renders template strings, parsing each distinct template only once.
///
/// Every renderer owns its own [`TemplateCache`].
/// The free functions [`render()`][crate::render] and [`render_named()`][crate::render_named]
/// share one process-wide renderer, see [`Renderer::global()`].
#[derive(Debug, Default)]
pub struct Renderer {
	cache: TemplateCache,
}

static GLOBAL: LazyLock<Renderer> = LazyLock::new(Renderer::new);

impl Renderer {
	/// Create a renderer with an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// The process-wide renderer used by the free functions of this crate.
	pub fn global() -> &'static Self {
		&GLOBAL
	}

	/// The cache of parsed templates.
	pub fn cache(&self) -> &TemplateCache {
		&self.cache
	}

	/// Get the parsed template for a source string.
	pub fn template(&self, source: &str) -> Result<Arc<PluralTemplate>, ParseError> {
		self.cache.get_or_parse(source)
	}

	/// Render a template for a quantity, without placeholder substitution.
	pub fn render(&self, template: &str, quantity: i64) -> Result<String, Error> {
		Ok(self.template(template)?.freeze(quantity)?)
	}

	/// Render a template for a quantity that is also available as the placeholder `name`.
	pub fn render_named(&self, template: &str, name: &str, quantity: i64) -> Result<String, Error> {
		Ok(self.template(template)?.render_named(name, quantity)?)
	}

	/// Render a template for a quantity, then substitute placeholders from a variable map.
	pub fn render_with<'a, M>(&self, template: &str, quantity: i64, variables: &'a M) -> Result<String, Error>
	where
		M: VariableMap<'a> + ?Sized,
		M::Value: PlaceholderValue,
	{
		Ok(self.template(template)?.render_with(quantity, variables)?)
	}
}
