//! Inline `style` attribute parsing for the Vellum editing engine.
//!
//! # Scope
//!
//! This crate implements the declaration-list subset of CSS needed for the
//! `style` attribute, per
//! [CSS Style Attributes](https://www.w3.org/TR/css-style-attr/) and
//! [§ 5.3.6 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations):
//!
//! - Declaration scanning (`name: value` pairs separated by `;`)
//! - Comment removal
//! - Quoted strings and function notation passed through verbatim
//! - Normalization: ASCII-lowercased property names, collapsed whitespace
//!   in values, stable (sorted) property order
//!
//! A full stylesheet tokenizer/parser is deliberately out of scope: style
//! attributes never contain selectors, at-rules, or nested blocks.
//!
//! # Error recovery
//!
//! Per [§ 5.3.6](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations),
//! a malformed declaration is dropped and scanning continues at the next
//! `;`. Only input that cannot be scanned at all (an unterminated string
//! or unbalanced function parentheses) is an error, reported via
//! [`StyleTextError`].

pub mod style_text;

pub use style_text::{StyleMap, StyleTextError, parse_style_text, serialize_style_text};
