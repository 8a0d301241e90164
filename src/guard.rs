//! Numeric guards that decide which text of a segment applies to a quantity.

use crate::error::UnsupportedOperator;

/// A comparison operator of a guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
	/// `candidate == reference`, spelled `=`, `==` or `eq`.
	Eq,

	/// `candidate != reference`, spelled `!=`, `<>` or `ne`.
	Ne,

	/// `candidate < reference`, spelled `<` or `lt`.
	Lt,

	/// `candidate <= reference`, spelled `<=` or `le`.
	Le,

	/// `candidate > reference`, spelled `>` or `gt`.
	Gt,

	/// `candidate >= reference`, spelled `>=` or `ge`.
	Ge,
}

impl Comparator {
	/// Look up a comparator by one of its spellings.
	///
	/// Returns `None` if the spelling is not known.
	pub fn from_spelling(spelling: &str) -> Option<Self> {
		match spelling {
			"=" | "==" | "eq" => Some(Self::Eq),
			"!=" | "<>" | "ne" => Some(Self::Ne),
			"<" | "lt" => Some(Self::Lt),
			"<=" | "le" => Some(Self::Le),
			">" | "gt" => Some(Self::Gt),
			">=" | "ge" => Some(Self::Ge),
			_ => None,
		}
	}

	/// The short name of the comparator (`"eq"`, `"ne"`, ...).
	pub fn name(self) -> &'static str {
		match self {
			Self::Eq => "eq",
			Self::Ne => "ne",
			Self::Lt => "lt",
			Self::Le => "le",
			Self::Gt => "gt",
			Self::Ge => "ge",
		}
	}

	/// The symbolic spelling of the comparator (`"="`, `"!="`, ...).
	pub fn symbol(self) -> &'static str {
		match self {
			Self::Eq => "=",
			Self::Ne => "!=",
			Self::Lt => "<",
			Self::Le => "<=",
			Self::Gt => ">",
			Self::Ge => ">=",
		}
	}

	/// Evaluate `candidate OP reference`.
	#[inline]
	pub fn evaluate(self, candidate: i64, reference: i64) -> bool {
		match self {
			Self::Eq => candidate == reference,
			Self::Ne => candidate != reference,
			Self::Lt => candidate < reference,
			Self::Le => candidate <= reference,
			Self::Gt => candidate > reference,
			Self::Ge => candidate >= reference,
		}
	}
}

impl std::fmt::Display for Comparator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// A comparison of the rendered quantity against a fixed reference number.
///
/// Guards built from different spellings of the same operator compare equal:
///
/// ```
/// # use plustr::Guard;
/// assert_eq!(Guard::new("=", 1).unwrap(), Guard::new("eq", 1).unwrap());
/// assert_eq!(Guard::new("<>", 0).unwrap(), Guard::new("!=", 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guard {
	comparator: Comparator,
	reference: i64,
}

impl Guard {
	/// Create a guard from an operator spelling and a reference number.
	pub fn new(operator: &str, reference: i64) -> Result<Self, UnsupportedOperator> {
		match Comparator::from_spelling(operator) {
			Some(comparator) => Ok(Self::from_parts(comparator, reference)),
			None => Err(UnsupportedOperator {
				position: 0,
				operator: operator.to_owned(),
			}),
		}
	}

	/// Create a guard from an already resolved comparator.
	#[inline]
	pub const fn from_parts(comparator: Comparator, reference: i64) -> Self {
		Self { comparator, reference }
	}

	/// Guard that matches exactly one quantity.
	#[inline]
	pub const fn equals(reference: i64) -> Self {
		Self::from_parts(Comparator::Eq, reference)
	}

	/// The comparator of the guard.
	#[inline]
	pub fn comparator(&self) -> Comparator {
		self.comparator
	}

	/// The reference number of the guard.
	#[inline]
	pub fn reference(&self) -> i64 {
		self.reference
	}

	/// Check if the guard holds for the given quantity.
	#[inline]
	pub fn matches(&self, candidate: i64) -> bool {
		self.comparator.evaluate(candidate, self.reference)
	}
}

/// Formats as `eq_1`, `ge_5`, ...
impl std::fmt::Display for Guard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}_{}", self.comparator.name(), self.reference)
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	#[test]
	fn every_spelling_is_registered() {
		let spellings = [
			("=", Comparator::Eq), ("==", Comparator::Eq), ("eq", Comparator::Eq),
			("!=", Comparator::Ne), ("<>", Comparator::Ne), ("ne", Comparator::Ne),
			("<", Comparator::Lt), ("lt", Comparator::Lt),
			("<=", Comparator::Le), ("le", Comparator::Le),
			(">", Comparator::Gt), ("gt", Comparator::Gt),
			(">=", Comparator::Ge), ("ge", Comparator::Ge),
		];
		for (spelling, comparator) in spellings {
			check!(Comparator::from_spelling(spelling) == Some(comparator), "{spelling}");
		}
	}

	#[test]
	fn unknown_spellings_are_rejected() {
		for spelling in ["", "=>", "=<", "!", "===", "EQ", "<<", "equals"] {
			check!(Comparator::from_spelling(spelling) == None, "{spelling}");
		}

		let_assert!(Err(e) = Guard::new("=>", 1));
		assert!(e.operator == "=>");
		assert!(e.to_string() == "Unsupported operator: \"=>\"");
	}

	#[test]
	fn spellings_canonicalize() {
		assert!(Guard::new("=", 0).unwrap() == Guard::new("==", 0).unwrap());
		assert!(Guard::new("==", 0).unwrap() == Guard::new("eq", 0).unwrap());
		assert!(Guard::new("<>", 3).unwrap() == Guard::new("ne", 3).unwrap());
		assert!(Guard::new("=", 0).unwrap() != Guard::new("=", 1).unwrap());
		assert!(Guard::new("<", 1).unwrap() != Guard::new("<=", 1).unwrap());
	}

	#[test]
	fn guards_compare_candidate_against_reference() {
		let cases = [
			("eq", 1, [false, true, false]),
			("ne", 1, [true, false, true]),
			("lt", 1, [true, false, false]),
			("le", 1, [true, true, false]),
			("gt", 1, [false, false, true]),
			("ge", 1, [false, true, true]),
		];
		for (op, reference, expected) in cases {
			let guard = Guard::new(op, reference).unwrap();
			for (candidate, expected) in (0..).zip(expected) {
				check!(guard.matches(candidate) == expected, "{guard} with {candidate}");
			}
		}
	}

	#[test]
	fn negative_quantities() {
		check!(Guard::equals(0).matches(-1) == false);
		check!(Guard::new("<", 0).unwrap().matches(-1));
		check!(Guard::new(">=", 0).unwrap().matches(-1) == false);
	}

	#[test]
	fn display() {
		check!(Guard::equals(1).to_string() == "eq_1");
		check!(Guard::new(">=", 5).unwrap().to_string() == "ge_5");
		check!(Comparator::Ne.symbol() == "!=");
		check!(Comparator::Le.to_string() == "le");
	}
}
