//! Lookup of the values for `%(name)` placeholders.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A named set of placeholder values.
///
/// [`PluralTemplate::render_with()`][crate::PluralTemplate::render_with] looks up every `%(name)` placeholder here.
pub trait VariableMap<'a> {
	/// The value found for a name.
	type Value;

	/// Look up the value for a placeholder name.
	fn get(&'a self, key: &str) -> Option<Self::Value>;
}

/// Name-value pairs, searched front to back.
///
/// [`PluralTemplate::render_named()`][crate::PluralTemplate::render_named] passes its quantity as a one-element pair list.
///
/// ```rust
/// # use plustr::VariableMap;
/// let counts = [("files", 3), ("dirs", 1)];
/// assert_eq!(counts.get("dirs"), Some(&1));
/// assert_eq!(counts.get("links"), None);
/// ```
impl<'a, K, V> VariableMap<'a> for [(K, V)]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	fn get(&'a self, key: &str) -> Option<Self::Value> {
		self.iter().find(|(name, _)| name.borrow() == key).map(|(_, value)| value)
	}
}

impl<'a, K, V, const N: usize> VariableMap<'a> for [(K, V); N]
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	#[inline]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		VariableMap::get(&self[..], key)
	}
}

impl<'a, K, V> VariableMap<'a> for Vec<(K, V)>
where
	K: Borrow<str>,
	V: 'a,
{
	type Value = &'a V;

	#[inline]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		VariableMap::get(&self[..], key)
	}
}

impl<'a, T> VariableMap<'a> for &'_ T
where
	T: ?Sized + VariableMap<'a>,
{
	type Value = T::Value;

	#[inline]
	fn get(&'a self, key: &str) -> Option<Self::Value> {
		T::get(self, key)
	}
}

/// Implement [`VariableMap`] for keyed std maps, by `&str` and `String` keys.
macro_rules! impl_variable_map_for_keyed {
	($($map:ident < $key:ty, V $(, $hasher:ident)? >),* $(,)?) => {
		$(
			impl<'a, V: 'a $(, $hasher: BuildHasher)?> VariableMap<'a> for $map<$key, V $(, $hasher)?> {
				type Value = &'a V;

				#[inline]
				fn get(&'a self, key: &str) -> Option<Self::Value> {
					$map::get(self, key)
				}
			}
		)*
	};
}

impl_variable_map_for_keyed!(
	BTreeMap<&str, V>,
	BTreeMap<String, V>,
	HashMap<&str, V, S>,
	HashMap<String, V, S>,
);
