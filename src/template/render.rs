use super::Chunk;
use crate::error::{self, RenderError};

/// Write the text of every chunk for the given quantity into the output.
pub(super) fn freeze_into(output: &mut String, chunks: &[Chunk], quantity: i64) -> Result<(), RenderError> {
	for chunk in chunks {
		match chunk {
			Chunk::Literal(text) => output.push_str(text),
			Chunk::Segment(segment) => match segment.select(quantity) {
				Some(text) => output.push_str(text),
				None => {
					return Err(error::NoMatchingRule {
						position: segment.position(),
						quantity,
					}
					.into())
				},
			},
		}
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::template::parse;
	use assert2::{check, let_assert};

	fn freeze(source: &str, quantity: i64) -> Result<String, RenderError> {
		let_assert!(Ok(chunks) = parse(source));
		let mut output = String::new();
		freeze_into(&mut output, &chunks, quantity)?;
		Ok(output)
	}

	#[test]
	fn plural_suffix() {
		for n in -3..=10 {
			let expected = if n == 1 { "file" } else { "files" };
			check!(freeze("file[s]", n).as_deref() == Ok(expected), "n = {n}");
		}
	}

	#[test]
	fn singular_and_plural() {
		check!(let Ok("story") = freeze("stor[y|ies]", 1).as_deref());
		check!(let Ok("stories") = freeze("stor[y|ies]", 3).as_deref());
		check!(let Ok("stories") = freeze("stor[y|ies]", 0).as_deref());
		check!(let Ok("story ") = freeze("stor[y|ies] ", 1).as_deref());
	}

	#[test]
	fn three_forms() {
		let source = "[one|%(num)d|no] file[s]";
		check!(let Ok("no files") = freeze(source, 0).as_deref());
		check!(let Ok("one file") = freeze(source, 1).as_deref());
		check!(let Ok("%(num)d files") = freeze(source, 2).as_deref());
	}

	#[test]
	fn guarded_dispatch() {
		let source = "[0:no |]file[s]";
		check!(let Ok("no files") = freeze(source, 0).as_deref());
		check!(let Ok("file") = freeze(source, 1).as_deref());
		for n in [-1, 2, 5, 100] {
			check!(freeze(source, n).as_deref() == Ok("files"), "n = {n}");
		}
	}

	#[test]
	fn first_matching_guard_wins() {
		let source = "[<5:a few|<10:several|>=0:lots|none]";
		check!(let Ok("a few") = freeze(source, 4).as_deref());
		check!(let Ok("several") = freeze(source, 5).as_deref());
		check!(let Ok("lots") = freeze(source, 10).as_deref());
		check!(let Ok("a few") = freeze(source, -1).as_deref());
	}

	#[test]
	fn zero_guard_without_fallback() {
		check!(let Ok("no files or directories") = freeze("[0:no ]file[s] or director[y|ies]", 0).as_deref());
		let_assert!(Err(RenderError::NoMatchingRule(e)) = freeze("x [0:no ]file[s]", 1));
		check!(e.position == 2);
		check!(e.quantity == 1);
	}

	#[test]
	fn escapes_are_not_segments() {
		for n in [0, 1, 2] {
			check!(freeze(r"literal \[bracket\] text", n).as_deref() == Ok("literal [bracket] text"));
		}
	}
}
