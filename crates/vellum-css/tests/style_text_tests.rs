//! Integration tests for style attribute parsing and serialization.

use vellum_css::{StyleTextError, parse_style_text, serialize_style_text};

#[test]
fn test_parse_single_declaration() {
    let map = parse_style_text("color: red").unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("color").map(String::as_str), Some("red"));
}

#[test]
fn test_parse_multiple_declarations() {
    let map = parse_style_text("color: red; font-weight: bold;").unwrap();
    assert_eq!(map.get("color").map(String::as_str), Some("red"));
    assert_eq!(map.get("font-weight").map(String::as_str), Some("bold"));
}

#[test]
fn test_property_names_are_lowercased() {
    let map = parse_style_text("COLOR: red; Font-Weight: bold").unwrap();
    assert!(map.contains_key("color"));
    assert!(map.contains_key("font-weight"));
}

#[test]
fn test_whitespace_is_normalized() {
    let map = parse_style_text("  margin :  1px   2px \n 3px  ;").unwrap();
    assert_eq!(map.get("margin").map(String::as_str), Some("1px 2px 3px"));
}

#[test]
fn test_comments_are_removed() {
    let map = parse_style_text("/* lead */ color: /* mid */ red /* tail */").unwrap();
    assert_eq!(map.get("color").map(String::as_str), Some("red"));
}

#[test]
fn test_malformed_declarations_are_dropped() {
    // "color red" has no colon; parsing recovers at the semicolon.
    let map = parse_style_text("color red; font-weight: bold").unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("font-weight").map(String::as_str), Some("bold"));
}

#[test]
fn test_empty_and_whitespace_input() {
    assert!(parse_style_text("").unwrap().is_empty());
    assert!(parse_style_text("   \n\t ").unwrap().is_empty());
    assert!(parse_style_text(";;;").unwrap().is_empty());
}

#[test]
fn test_later_declaration_wins() {
    let map = parse_style_text("color: red; color: blue").unwrap();
    assert_eq!(map.get("color").map(String::as_str), Some("blue"));
}

#[test]
fn test_quoted_strings_pass_through_verbatim() {
    let map = parse_style_text("font-family: \"Times;  New Roman\", serif").unwrap();
    assert_eq!(
        map.get("font-family").map(String::as_str),
        Some("\"Times;  New Roman\", serif")
    );
}

#[test]
fn test_function_notation_passes_through() {
    // The semicolon-like content inside url() is opaque to the scanner.
    let map = parse_style_text("background: url(a;b.png) no-repeat").unwrap();
    assert_eq!(
        map.get("background").map(String::as_str),
        Some("url(a;b.png) no-repeat")
    );
}

#[test]
fn test_unterminated_string_is_an_error() {
    assert_eq!(
        parse_style_text("content: \"oops"),
        Err(StyleTextError::UnterminatedString(9))
    );
}

#[test]
fn test_unbalanced_parenthesis_is_an_error() {
    assert!(matches!(
        parse_style_text("background: url(oops"),
        Err(StyleTextError::UnbalancedParenthesis(_))
    ));
}

#[test]
fn test_serialize_is_sorted_and_round_trips() {
    let map = parse_style_text("font-weight: bold; color: red").unwrap();
    let text = serialize_style_text(&map);
    assert_eq!(text, "color: red; font-weight: bold");
    assert_eq!(parse_style_text(&text).unwrap(), map);
}
