use assert2::{assert, check, let_assert};
use plustr::{parse, render, render_named, Error, ParseError, RenderError, Renderer};

#[test]
fn end_to_end() {
	check!(let Ok("story") = render("stor[y|ies]", 1).as_deref());
	check!(let Ok("stories") = render("stor[y|ies]", 3).as_deref());
	check!(let Ok("story ") = render("stor[y|ies] ", 1).as_deref());
	check!(let Ok("no files or directories") = render("[0:no ]file[s] or director[y|ies]", 0).as_deref());

	let template = "[one|%(num)d] file[s] or director[y|ies]";
	check!(let Ok("one file or directory") = render_named(template, "num", 1).as_deref());
	check!(let Ok("2 files or directories") = render_named(template, "num", 2).as_deref());
}

#[test]
fn plural_suffix_for_all_quantities() {
	for n in -100..=100 {
		let expected = if n == 1 { "file" } else { "files" };
		check!(render("file[s]", n).ok().as_deref() == Some(expected), "n = {n}");
	}
	check!(let Ok("files") = render("file[s]", i64::MAX).as_deref());
	check!(let Ok("files") = render("file[s]", i64::MIN).as_deref());
}

#[test]
fn guarded_segment_dispatch() {
	let template = "[0:no |]file[s]";
	check!(let Ok("no files") = render(template, 0).as_deref());
	check!(let Ok("file") = render(template, 1).as_deref());
	check!(let Ok("files") = render(template, 5).as_deref());
	for n in (-20..=20).filter(|&n| n != 0) {
		let_assert!(Ok(text) = render(template, n));
		check!(!text.starts_with("no "), "n = {n}");
	}
}

#[test]
fn operator_spellings_are_equivalent() {
	let singular = ["stor[1:y|ies]", "stor[=1:y|ies]", "stor[==1:y|ies]", "stor[eq1:y|ies]", "stor[eq 1:y|ies]"];
	let plural = ["stor[!=1:ies|y]", "stor[<>1:ies|y]", "stor[ne 1:ies|y]"];
	for n in -3..=5 {
		let_assert!(Ok(expected) = render("stor[y|ies]", n));
		for template in singular.iter().chain(&plural) {
			check!(render(template, n).ok().as_ref() == Some(&expected), "template = {template:?}, n = {n}");
		}
	}
}

#[test]
fn two_fallbacks_fail_before_rendering() {
	let renderer = Renderer::new();
	let_assert!(Err(Error::Parse(ParseError::AmbiguousFallback(e))) = renderer.render("[0:none|one|many]", 1));
	assert!(e.first == "one");
	assert!(e.second == "many");
	assert!(renderer.cache().is_empty());

	let_assert!(Err(ParseError::AmbiguousFallback(_)) = plustr::PluralTemplate::from_str("[0:none|one|many]"));
}

#[test]
fn escaped_brackets_are_literal() {
	for n in [-1, 0, 1, 2, 1000] {
		check!(render(r"literal \[bracket\] text", n).ok().as_deref() == Some("literal [bracket] text"));
	}
}

#[test]
fn any_escaped_character_is_literal() {
	check!(let Ok("C:Usersme has files") = render(r"C:\Users\me has file[s]", 2).as_deref());
	check!(let Ok("1st place") = render(r"[\1st|0:none\:] place", 5).as_deref());
	check!(let Ok("none: place") = render(r"[\1st|0:none\:] place", 0).as_deref());
	let_assert!(Err(Error::Parse(ParseError::InvalidEscapeSequence(e))) = render("trailing\\", 1));
	assert!(e.position == 8);
}

#[test]
fn placeholder_precision_and_radix() {
	check!(let Ok("005 files") = render_named("%(num).3d file[s]", "num", 5).as_deref());
	check!(let Ok("0x1f items") = render_named("0x%(num)x item[s]", "num", 31).as_deref());
	check!(let Ok("0x1 item") = render_named("0x%(num)x item[s]", "num", 1).as_deref());
}

#[test]
fn parsing_is_idempotent() {
	let template = "[0:no|1:one|%(num)d] file[s] or director[y|ies]";
	let_assert!(Ok(first) = parse(template));
	let_assert!(Ok(second) = parse(template));
	assert!(first == second);
}

#[test]
fn quantities_do_not_leak_through_the_cache() {
	let template = "[0:no|1:one|some] stor[y|ies]";
	let shared = Renderer::new();
	check!(let Ok("one story") = shared.render(template, 1).as_deref());
	let cached = shared.render(template, 2);
	let fresh = Renderer::new().render(template, 2);
	check!(let Ok("some stories") = cached.as_deref());
	check!(let Ok("some stories") = fresh.as_deref());
	assert!(shared.cache().len() == 1);
}

#[test]
fn missing_fallback() {
	let_assert!(Err(Error::Render(RenderError::NoMatchingRule(e))) = render("[0:no ]file[s]", 4));
	assert!(e.quantity == 4);
	assert!(e.to_string() == "No matching rule and no fallback defined for 4");
}

#[test]
fn parse_errors_highlight_the_source() {
	let template = "file[s";
	let_assert!(Err(Error::Parse(e)) = render(template, 2));
	assert!(e.to_string() == "Missing closing bracket");
	assert!(e.source_range() == (4..5));
	assert!(e.source_highlighting(template) == "  file[s\n      ^\n");
}
