use serde::{
	de::{Error, Visitor},
	Deserialize,
	Deserializer,
	Serialize,
	Serializer,
};

use crate::PluralTemplate;

struct PluralTemplateVisitor;

impl<'de> Visitor<'de> for PluralTemplateVisitor {
	type Value = PluralTemplate;

	fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
		formatter.write_str("a plural template string")
	}

	fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
	where
		E: Error,
	{
		PluralTemplate::from_str(v).map_err(E::custom)
	}

	fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
	where
		E: Error,
	{
		PluralTemplate::from_string(v).map_err(E::custom)
	}
}

impl Serialize for PluralTemplate {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.source())
	}
}

impl<'de> Deserialize<'de> for PluralTemplate {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_string(PluralTemplateVisitor)
	}
}

#[cfg(test)]
mod test {
	use assert2::{check, let_assert};
	use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, assert_tokens, Token};

	use crate::PluralTemplate;

	const SOURCE: &str = "[0:no|1:one|%(num)d] file[s]";

	#[test]
	fn template_ser_de() {
		let_assert!(Ok(template) = PluralTemplate::from_str(SOURCE));
		assert_tokens(&template, &[Token::Str(SOURCE)]);
		assert_de_tokens(&template, &[Token::String(SOURCE)]);
		assert_de_tokens(&template, &[Token::BorrowedStr(SOURCE)]);
	}

	#[test]
	fn serializes_source_verbatim() {
		let source = r"stor[y|ies] \[sic\]";
		let_assert!(Ok(template) = PluralTemplate::from_str(source));
		assert_ser_tokens(&template, &[Token::Str(source)]);
	}

	#[test]
	fn invalid_templates_fail_to_deserialize() {
		assert_de_tokens_error::<PluralTemplate>(&[Token::Str("file[s")], "Missing closing bracket");
	}

	#[derive(Debug, PartialEq, serde::Deserialize)]
	struct Messages {
		files: PluralTemplate,
		dirs: PluralTemplate,
	}

	#[test]
	fn deserialize_in_struct() {
		let_assert!(Ok(files) = PluralTemplate::from_str("%(num)d file[s]"));
		let_assert!(Ok(dirs) = PluralTemplate::from_str("[0:no|%(num)d] director[y|ies]"));
		check!(let Ok("3 files") = files.render_named("num", 3).as_deref());
		check!(let Ok("no directories") = dirs.render_named("num", 0).as_deref());

		assert_de_tokens(&Messages { files, dirs }, &[
			Token::Struct { name: "Messages", len: 2 },
			Token::Str("files"),
			Token::Str("%(num)d file[s]"),
			Token::Str("dirs"),
			Token::String("[0:no|%(num)d] director[y|ies]"),
			Token::StructEnd,
		]);
	}
}
