//! Golden file tests for the built-in examples.
//!
//! Each example must render byte-for-byte to its golden file:
//! - Simple: integer and float formatting, conditional line
//! - Complex: nested sections with literal indentation preserved
//! - Escaped / Unescaped: the one escape branch

// Golden tests use expect/unwrap/panic for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use rtemplate::{Example, MissingVariablePolicy, RenderOptions, TemplateRenderer};
use std::fs;
use std::path::PathBuf;

/// Get the path to the golden files directory.
fn golden_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir).join("tests").join("golden")
}

/// Load a golden file as a string.
fn load_golden(name: &str) -> String {
    let path = golden_dir().join(format!("{name}.golden.html"));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read golden file {}: {e}", path.display()))
}

#[test]
fn test_simple() {
    assert_eq!(
        Example::simple().to_html().unwrap(),
        "Hello Chris\nYou have just won $10000!\nWell, $6000.0, after taxes.\n"
    );
}

#[test]
fn test_complex() {
    let expected = "<h1>Colors</h1>\n\
                    <ul>\n  \
                    <li><strong>red</strong></li>\n    \
                    <li><a href=\"#Green\">green</a></li>\n    \
                    <li><a href=\"#Blue\">blue</a></li>\n    \
                    </ul>\n";
    assert_eq!(Example::complex().to_html().unwrap(), expected);
}

#[test]
fn test_escaped() {
    assert_eq!(
        Example::escaped().to_html().unwrap(),
        "<h1>Bear &gt; Shark</h1>"
    );
}

#[test]
fn test_unescaped() {
    assert_eq!(
        Example::unescaped().to_html().unwrap(),
        "<h1>Bear > Shark</h1>"
    );
}

/// Test: every example matches its golden file.
#[test]
fn test_examples_match_golden_files() {
    for example in Example::all() {
        let expected = load_golden(example.name());
        let actual = example.to_html().unwrap();
        assert_eq!(actual, expected, "example '{}' drifted", example.name());
    }
}

/// Test: examples bind every variable, so the lenient policy changes nothing.
#[test]
fn test_examples_independent_of_policy() {
    let lenient = TemplateRenderer::with_options(
        RenderOptions::new().with_missing_variables(MissingVariablePolicy::Empty),
    );
    for example in Example::all() {
        assert_eq!(
            example.render_with(&lenient).unwrap(),
            example.to_html().unwrap()
        );
    }
}

/// Test: rendering holds no state between calls.
#[test]
fn test_examples_render_identically_twice() {
    for example in Example::all() {
        assert_eq!(example.to_html().unwrap(), example.to_html().unwrap());
    }
}

/// Test: the examples render the same from several threads.
#[test]
fn test_examples_render_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| Example::complex().to_html().unwrap()))
        .collect();
    let expected = load_golden("complex");
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
