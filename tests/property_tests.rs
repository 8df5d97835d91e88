//! Property-based tests for rendering.
//!
//! Uses proptest to verify invariants across random inputs:
//! - Rendering is deterministic
//! - Escaped references entity-encode, raw references do not
//! - Text outside tags passes through unchanged
//! - Lists render their body once per item

// Property tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use rtemplate::template::escape_html;
use rtemplate::{Context, Template, TemplateRenderer, Value, render};

/// Literal text that cannot contain a tag.
fn literal() -> impl Strategy<Value = String> {
    "[^{}]{0,64}"
}

proptest! {
    /// Property: identical inputs always produce identical output.
    #[test]
    fn prop_render_is_deterministic(
        before in literal(),
        after in literal(),
        value in ".{0,32}",
    ) {
        let template = Template::parse(format!("{before}{{{{v}}}}{after}")).unwrap();
        let ctx = Context::new().with("v", value);
        let renderer = TemplateRenderer::new();
        let first = renderer.render(&template, &ctx).unwrap();
        let second = renderer.render(&template, &ctx).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: escaped references contain no raw HTML-special characters.
    #[test]
    fn prop_escaped_reference_encodes(value in ".{0,64}") {
        let ctx = Context::new().with("v", value.as_str());
        let out = render("{{v}}", &ctx).unwrap();
        prop_assert!(!out.contains(['<', '>', '"']));
        prop_assert_eq!(out, escape_html(&value));
    }

    /// Property: raw references insert the value verbatim.
    #[test]
    fn prop_raw_reference_is_verbatim(value in ".{0,64}") {
        let ctx = Context::new().with("v", value.as_str());
        prop_assert_eq!(render("{{{v}}}", &ctx).unwrap(), value.clone());
        prop_assert_eq!(render("{{& v}}", &ctx).unwrap(), value);
    }

    /// Property: escaping replaces exactly the four special characters.
    #[test]
    fn prop_escape_counts(value in "[a-z&<>\" ]{0,64}") {
        let escaped = escape_html(&value);
        let specials = value.chars().filter(|c| matches!(c, '&' | '<' | '>' | '"')).count();
        prop_assert_eq!(escaped.matches(';').count(), specials);
    }

    /// Property: templates without tags render to themselves.
    #[test]
    fn prop_literal_text_preserved(text in "[^{}]{0,256}") {
        prop_assert_eq!(render(&text, &Context::new()).unwrap(), text);
    }

    /// Property: literals around a reference survive, newlines included.
    #[test]
    fn prop_literals_around_reference(
        before in "[ a-z\n\t]{0,32}",
        after in "[ a-z\n\t]{0,32}",
    ) {
        let ctx = Context::new().with("v", "X");
        let out = render(&format!("{before}{{{{v}}}}{after}"), &ctx).unwrap();
        prop_assert_eq!(out, format!("{before}X{after}"));
    }

    /// Property: a list section renders its body once per item.
    #[test]
    fn prop_list_section_repeats(items in prop::collection::vec("[a-z]{1,8}", 0..16)) {
        let ctx = Context::new().with("xs", Value::list(items.clone()));
        let out = render("{{#xs}}[{{.}}]{{/xs}}", &ctx).unwrap();
        let expected: String = items.iter().map(|i| format!("[{i}]")).collect();
        prop_assert_eq!(out, expected);
    }

    /// Property: integers render in plain decimal.
    #[test]
    fn prop_integers_render_decimal(n in any::<i64>()) {
        let ctx = Context::new().with("n", n);
        prop_assert_eq!(render("{{n}}", &ctx).unwrap(), n.to_string());
    }

    /// Property: parsing never panics on arbitrary input.
    #[test]
    fn prop_parse_total(source in "[{}#^/!&=a-z \n]{0,64}") {
        let _ = Template::parse(source);
    }
}
