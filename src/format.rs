//! Python-style `%(name)d` placeholder substitution.

use crate::error::{self, RenderError};
use crate::VariableMap;

/// A value that can be substituted into a `%(name)` placeholder.
///
/// Integer conversions (`d`, `i`, `u`, `o`, `x`, `X`) need [`Self::as_integer()`] to return a value,
/// the `s` conversion works for every value.
pub trait PlaceholderValue {
	/// Get the value as an integer, if it is one.
	fn as_integer(&self) -> Option<i64>;

	/// Append the display form of the value to the output.
	fn write_display(&self, output: &mut String);
}

macro_rules! impl_placeholder_value_for_integer {
	($($ty:ty),*) => {
		$(
			impl PlaceholderValue for $ty {
				#[inline]
				fn as_integer(&self) -> Option<i64> {
					i64::try_from(*self).ok()
				}

				#[inline]
				fn write_display(&self, output: &mut String) {
					output.push_str(&self.to_string());
				}
			}
		)*
	};
}

impl_placeholder_value_for_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl PlaceholderValue for str {
	#[inline]
	fn as_integer(&self) -> Option<i64> {
		None
	}

	#[inline]
	fn write_display(&self, output: &mut String) {
		output.push_str(self);
	}
}

impl PlaceholderValue for String {
	#[inline]
	fn as_integer(&self) -> Option<i64> {
		None
	}

	#[inline]
	fn write_display(&self, output: &mut String) {
		output.push_str(self);
	}
}

impl<T: PlaceholderValue + ?Sized> PlaceholderValue for &T {
	#[inline]
	fn as_integer(&self) -> Option<i64> {
		T::as_integer(self)
	}

	#[inline]
	fn write_display(&self, output: &mut String) {
		T::write_display(self, output)
	}
}

/// Substitute `%(name)` placeholders in a string.
///
/// Placeholders have the form `%(name)` followed by optional flags, width and precision, and a conversion:
///
/// * flags: `-` (left align), `0` (pad with zeros), `+` (always show the sign), ` ` (space for positive numbers),
/// * width: the minimum number of characters,
/// * precision: `.` and the minimum number of digits for integers, or the maximum number of characters for `s`,
/// * conversion: `d`, `i` or `u` for decimal integers, `o` for octal, `x` or `X` for hexadecimal, `s` for any value.
///
/// The alternate form flag (`#`), floating point conversions and `*` widths are not supported.
/// A literal percent sign is written as `%%`.
///
/// ```
/// # fn main() -> Result<(), plustr::RenderError> {
/// let values = [("num", 7)];
/// assert_eq!(plustr::substitute("%(num)03d%%", &values)?, "007%");
/// # Ok(())
/// # }
/// ```
pub fn substitute<'a, M>(source: &str, variables: &'a M) -> Result<String, RenderError>
where
	M: VariableMap<'a> + ?Sized,
	M::Value: PlaceholderValue,
{
	let bytes = source.as_bytes();
	let mut output = String::with_capacity(source.len() + source.len() / 8);
	let mut finger = 0;
	while let Some(x) = memchr::memchr(b'%', &bytes[finger..]) {
		let start = finger + x;
		output.push_str(&source[finger..start]);
		let (placeholder, end) = Placeholder::parse(source, start)?;
		match placeholder {
			None => output.push('%'),
			Some(placeholder) => placeholder.expand(&mut output, variables)?,
		}
		finger = end;
	}
	output.push_str(&source[finger..]);
	Ok(output)
}

/// A parsed `%(name)` placeholder.
#[derive(Debug)]
struct Placeholder<'a> {
	/// The byte offset of the `%` sign.
	position: usize,
	name: &'a str,
	left_align: bool,
	zero_pad: bool,
	plus_sign: bool,
	space_sign: bool,
	width: usize,
	precision: Option<usize>,
	conversion: char,
}

impl<'a> Placeholder<'a> {
	/// Parse a placeholder starting at the `%` sign at `position`.
	///
	/// Returns `None` for an escaped percent sign (`%%`),
	/// and the index of the byte after the placeholder.
	fn parse(source: &'a str, position: usize) -> Result<(Option<Self>, usize), RenderError> {
		let invalid = |character| error::InvalidPlaceholder { position, character };

		let mut chars = source[position + 1..].char_indices().map(|(i, c)| (position + 1 + i, c));
		match chars.next() {
			Some((_, '%')) => return Ok((None, position + 2)),
			Some((_, '(')) => (),
			other => return Err(invalid(other.map(|(_, c)| c)).into()),
		}

		let name_start = position + 2;
		let name_end = match chars.find(|&(_, c)| c == ')') {
			Some((i, _)) => i,
			None => return Err(invalid(None).into()),
		};

		let mut placeholder = Self {
			position,
			name: &source[name_start..name_end],
			left_align: false,
			zero_pad: false,
			plus_sign: false,
			space_sign: false,
			width: 0,
			precision: None,
			conversion: 's',
		};

		let mut next = chars.next();
		while let Some((_, flag @ ('-' | '0' | '+' | ' '))) = next {
			match flag {
				'-' => placeholder.left_align = true,
				'0' => placeholder.zero_pad = true,
				'+' => placeholder.plus_sign = true,
				_ => placeholder.space_sign = true,
			}
			next = chars.next();
		}

		placeholder.width = take_number(&mut chars, &mut next);
		if let Some((_, '.')) = next {
			next = chars.next();
			placeholder.precision = Some(take_number(&mut chars, &mut next));
		}

		match next {
			Some((i, c @ ('d' | 'i' | 'u' | 'o' | 'x' | 'X' | 's'))) => {
				placeholder.conversion = c;
				Ok((Some(placeholder), i + 1))
			},
			other => Err(invalid(other.map(|(_, c)| c)).into()),
		}
	}

	/// Look up the value and write it to the output.
	fn expand<'b, M>(&self, output: &mut String, variables: &'b M) -> Result<(), RenderError>
	where
		M: VariableMap<'b> + ?Sized,
		M::Value: PlaceholderValue,
	{
		let value = variables.get(self.name).ok_or_else(|| error::NoSuchVariable {
			position: self.position,
			name: self.name.to_owned(),
		})?;

		let body = match self.conversion {
			's' => {
				let mut text = String::new();
				value.write_display(&mut text);
				if let Some((end, _)) = self.precision.and_then(|precision| text.char_indices().nth(precision)) {
					text.truncate(end);
				}
				text
			},
			conversion => match value.as_integer() {
				Some(number) => self.format_integer(number),
				None => {
					return Err(error::NotAnInteger {
						position: self.position,
						name: self.name.to_owned(),
						conversion,
					}
					.into())
				},
			},
		};

		self.pad(output, &body);
		Ok(())
	}

	/// Format an integer with sign and zero padding.
	fn format_integer(&self, number: i64) -> String {
		let sign = if number < 0 {
			"-"
		} else if self.plus_sign {
			"+"
		} else if self.space_sign {
			" "
		} else {
			""
		};
		let magnitude = number.unsigned_abs();
		let mut digits = match self.conversion {
			'o' => format!("{magnitude:o}"),
			'x' => format!("{magnitude:x}"),
			'X' => format!("{magnitude:X}"),
			_ => magnitude.to_string(),
		};
		if let Some(precision) = self.precision {
			if digits.len() < precision {
				digits.insert_str(0, &"0".repeat(precision - digits.len()));
			}
		}
		let len = sign.len() + digits.len();
		if self.zero_pad && !self.left_align && self.width > len {
			format!("{sign}{}{digits}", "0".repeat(self.width - len))
		} else {
			format!("{sign}{digits}")
		}
	}

	/// Write the body, padded with spaces to the width.
	fn pad(&self, output: &mut String, body: &str) {
		let len = body.chars().count();
		let padding = " ".repeat(self.width.saturating_sub(len));
		if self.left_align {
			output.push_str(body);
			output.push_str(&padding);
		} else {
			output.push_str(&padding);
			output.push_str(body);
		}
	}
}

/// Consume decimal digits, starting with the already peeked `next` character.
fn take_number(chars: &mut impl Iterator<Item = (usize, char)>, next: &mut Option<(usize, char)>) -> usize {
	let mut value = 0usize;
	while let Some(digit) = next.and_then(|(_, c)| c.to_digit(10)) {
		value = value.saturating_mul(10).saturating_add(digit as usize);
		*next = chars.next();
	}
	value
}
