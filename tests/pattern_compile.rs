use rstest::rstest;
use wildcard_mask_rs::{PatternFeatures, TokenKind, compile, has_wildcards};

use TokenKind::*;

#[rstest]
#[case("/static/*", vec![Separator, Literal, Literal, Literal, Literal, Literal, Literal, Separator, Star])]
#[case("/a/**", vec![Separator, Literal, Separator, StarStar])]
#[case("a?+", vec![Literal, Question, Plus])]
#[case("*?x", vec![Star, Literal])]
#[case("a?*", vec![Literal, Star])]
#[case(r"\*/", vec![Literal, Separator])]
fn compile_when_pattern_given_then_yields_expected_kinds(#[case] pattern: &str, #[case] expected: Vec<TokenKind>) {
    let compiled = compile(pattern, Some('/'));
    let mut expected = expected;
    expected.push(EndOfPattern);

    assert_eq!(compiled.kinds(), expected.as_slice(), "{pattern}");
    assert_eq!(compiled.tokens().len(), compiled.kinds().len());
    assert_eq!(compiled.len(), expected.len() - 1);
}

#[test]
fn compile_when_character_escaped_then_keeps_its_own_char() {
    let compiled = compile(r"a\?b", Some('/'));
    assert_eq!(compiled.tokens(), &['a', '?', 'b', '\0']);
    assert!(compiled.is_literal());
    assert!(compiled.features().contains(PatternFeatures::ESCAPE));
}

#[test]
fn compile_when_separator_changes_then_classification_changes() {
    let slash = compile("a.b/c", Some('/'));
    let dot = compile("a.b/c", Some('.'));
    let none = compile("a.b/c", None);

    assert_eq!(slash.kinds()[3], Separator);
    assert_eq!(dot.kinds()[1], Separator);
    assert!(none.kinds().iter().all(|kind| *kind != Separator));
    assert_ne!(slash, dot);
}

#[test]
fn compile_when_tokens_compacted_then_features_follow_live_tokens() {
    let compiled = compile("/a/**/?", Some('/'));
    let features = compiled.features();

    assert!(features.contains(PatternFeatures::STAR_STAR | PatternFeatures::QUESTION));
    assert!(features.contains(PatternFeatures::SEPARATOR));
    assert!(!features.contains(PatternFeatures::STAR));
    assert!(!features.contains(PatternFeatures::PLUS));
}

#[test]
fn compile_when_pattern_more_specific_then_weighs_more() {
    let literal = compile("/a/b", Some('/'));
    let star = compile("/a/*", Some('/'));
    let short = compile("*", Some('/'));

    assert!(star.weight() > literal.weight());
    assert!(literal.weight() > short.weight());
}

#[test]
fn has_wildcards_when_scanning_then_ignores_escapes() {
    assert!(has_wildcards("/static/*.jpg"));
    assert!(has_wildcards(r"\+"));
    assert!(!has_wildcards("/static/a.jpg"));
}

#[test]
fn compile_when_same_text_then_equal_and_displayed_verbatim() {
    let first = compile("/x/**", Some('/'));
    let second = compile("/x/**", Some('/'));

    assert_eq!(first, second);
    assert_eq!(first.to_string(), "/x/**");
    assert_eq!(first.as_str(), "/x/**");
}
