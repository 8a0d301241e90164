use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ParseError;
use crate::PluralTemplate;

/// A store of parsed templates, keyed by their exact source string.
///
/// Templates are parsed the first time they are requested and kept for the lifetime of the cache.
/// Entries are never evicted or modified.
/// Templates that fail to parse are not stored, so requesting them again fails again.
///
/// The cache can be shared between threads.
#[derive(Default)]
pub struct TemplateCache {
	entries: RwLock<HashMap<String, Arc<PluralTemplate>>>,
}

impl std::fmt::Debug for TemplateCache {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TemplateCache").field("len", &self.len()).finish()
	}
}

impl TemplateCache {
	/// Create an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the parsed template for a source string, parsing it on first use.
	pub fn get_or_parse(&self, source: &str) -> Result<Arc<PluralTemplate>, ParseError> {
		if let Some(template) = self.read().get(source) {
			#[cfg(feature = "tracing")]
			tracing::trace!(template = source, "plural template cache hit");
			return Ok(Arc::clone(template));
		}

		// Parse without holding the lock, another thread may insert the same template meanwhile.
		let template = match PluralTemplate::from_str(source) {
			Ok(template) => Arc::new(template),
			Err(e) => {
				#[cfg(feature = "tracing")]
				tracing::debug!(template = source, error = %e, "failed to parse plural template");
				return Err(e);
			},
		};

		#[cfg(feature = "tracing")]
		tracing::debug!(template = source, chunks = template.chunks().len(), "parsed plural template");

		let mut entries = self.write();
		Ok(Arc::clone(entries.entry(source.to_owned()).or_insert(template)))
	}

	/// Check if a template with this exact source has been parsed.
	pub fn contains(&self, source: &str) -> bool {
		self.read().contains_key(source)
	}

	/// The number of parsed templates in the cache.
	pub fn len(&self) -> usize {
		self.read().len()
	}

	/// Check if the cache holds no templates.
	pub fn is_empty(&self) -> bool {
		self.read().is_empty()
	}

	// Entries are immutable once inserted, so a poisoned lock still guards a consistent map.
	fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<PluralTemplate>>> {
		self.entries.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<PluralTemplate>>> {
		self.entries.write().unwrap_or_else(PoisonError::into_inner)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	#[test]
	fn parses_once() {
		let cache = TemplateCache::new();
		assert!(cache.is_empty());

		let_assert!(Ok(first) = cache.get_or_parse("file[s]"));
		let_assert!(Ok(second) = cache.get_or_parse("file[s]"));
		assert!(Arc::ptr_eq(&first, &second));
		assert!(cache.len() == 1);
		assert!(cache.contains("file[s]"));
		assert!(!cache.contains("file[s] "));
	}

	#[test]
	fn keys_are_exact_strings() {
		let cache = TemplateCache::new();
		let_assert!(Ok(_) = cache.get_or_parse("stor[y|ies]"));
		let_assert!(Ok(_) = cache.get_or_parse("stor[1:y|ies]"));
		assert!(cache.len() == 2);
	}

	#[test]
	fn failures_are_not_cached() {
		let cache = TemplateCache::new();
		let_assert!(Err(ParseError::UnclosedSegment(first)) = cache.get_or_parse("file[s"));
		let_assert!(Err(ParseError::UnclosedSegment(second)) = cache.get_or_parse("file[s"));
		assert!(first == second);
		assert!(cache.is_empty());
	}

	#[test]
	fn quantity_does_not_leak_between_renders() {
		let cache = TemplateCache::new();
		let_assert!(Ok(template) = cache.get_or_parse("[0:no|1:one|some] stor[y|ies]"));
		check!(let Ok("one story") = template.freeze(1).as_deref());
		let_assert!(Ok(template) = cache.get_or_parse("[0:no|1:one|some] stor[y|ies]"));
		check!(let Ok("some stories") = template.freeze(2).as_deref());
		check!(let Ok("no stories") = template.freeze(0).as_deref());
	}

	#[test]
	fn shared_between_threads() {
		let cache = TemplateCache::new();
		std::thread::scope(|scope| {
			for n in 0..8 {
				let cache = &cache;
				scope.spawn(move || {
					let_assert!(Ok(template) = cache.get_or_parse("%(num)d director[y|ies]"));
					let expected = if n == 1 { "1 directory".to_owned() } else { format!("{n} directories") };
					check!(template.render_named("num", n).as_deref() == Ok(expected.as_str()));
				});
			}
		});
		assert!(cache.len() == 1);
	}

	#[test]
	#[cfg(feature = "tracing")]
	#[tracing_test::traced_test]
	fn logs_hits_and_misses() {
		let cache = TemplateCache::new();
		let_assert!(Ok(_) = cache.get_or_parse("item[s]"));
		assert!(logs_contain("parsed plural template"));
		assert!(!logs_contain("plural template cache hit"));
		let_assert!(Ok(_) = cache.get_or_parse("item[s]"));
		assert!(logs_contain("plural template cache hit"));
		let_assert!(Err(_) = cache.get_or_parse("item[s"));
		assert!(logs_contain("failed to parse plural template"));
	}
}
