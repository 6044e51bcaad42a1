//! Declaration-list scanner for `style` attribute text.
//!
//! [CSS Style Attributes § 4](https://www.w3.org/TR/css-style-attr/#syntax)
//!
//! "The value of the style attribute must match the syntax of the contents
//! of a CSS declaration block."

use std::collections::BTreeMap;

use thiserror::Error;

/// Parsed style attribute contents: property name → value.
///
/// An ordered map so that serialization (and therefore test assertions and
/// generated markup) is deterministic. Property order carries no cascade
/// meaning inside a single declaration block for distinct properties.
pub type StyleMap = BTreeMap<String, String>;

/// Failure to scan style attribute text.
///
/// Malformed individual declarations are not errors (they are dropped per
/// CSS error recovery); these variants cover input that cannot be scanned
/// to completion at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleTextError {
    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    /// "EOF: This is a parse error."
    #[error("unterminated string in style text (opened at offset {0})")]
    UnterminatedString(usize),
    /// Function notation (`url(...)`, `rgb(...)`) left open at end of input.
    #[error("unbalanced parenthesis in style text (opened at offset {0})")]
    UnbalancedParenthesis(usize),
}

/// [§ 5.3.6 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
///
/// Parse `style` attribute text into a normalized property map:
///
/// - property names are ASCII-lowercased
/// - values are trimmed, with interior whitespace runs outside strings and
///   function notation collapsed to a single space
/// - comments are removed
/// - declarations missing a name or a `:` are dropped
/// - a later declaration for the same property wins
///
/// Empty or whitespace-only input yields an empty map.
///
/// # Errors
///
/// Returns [`StyleTextError`] when the input contains an unterminated
/// string or unbalanced function parentheses.
pub fn parse_style_text(input: &str) -> Result<StyleMap, StyleTextError> {
    let mut scanner = StyleTextScanner::new(input);
    let mut map = StyleMap::new();

    while let Some((name, value)) = scanner.consume_declaration()? {
        let _ = map.insert(name, value);
    }

    Ok(map)
}

/// Serialize a property map back to style attribute text.
///
/// Output is `name: value` pairs joined by `; `, in map (sorted) order,
/// with no trailing separator. Round-trips through [`parse_style_text`].
#[must_use]
pub fn serialize_style_text(map: &StyleMap) -> String {
    map.iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Character-driven scanner over style attribute text.
///
/// Follows the consume/peek structure of a css-syntax tokenizer, reduced
/// to the pieces a declaration list needs: top-level `;` and `:` are
/// structural, everything inside strings and parentheses is opaque.
struct StyleTextScanner {
    /// The input being scanned
    input: Vec<char>,
    /// Current position in the input
    position: usize,
}

impl StyleTextScanner {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    /// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
    ///
    /// Returns the next well-formed `(name, value)` pair, skipping
    /// malformed declarations, or `None` at end of input.
    fn consume_declaration(&mut self) -> Result<Option<(String, String)>, StyleTextError> {
        loop {
            self.consume_whitespace_and_comments();
            if self.peek().is_none() {
                return Ok(None);
            }

            // "If the current input token is a <semicolon-token>, do nothing."
            if self.peek() == Some(';') {
                let _ = self.consume();
                continue;
            }

            let raw = self.consume_component_text()?;

            // "If the next input token is anything other than a
            // <colon-token>, this is a parse error."
            let Some((name, value)) = raw.split_once(':') else {
                continue;
            };
            let name = name.trim().to_ascii_lowercase();
            let value = collapse_whitespace(value);
            if name.is_empty() || value.is_empty() {
                continue;
            }

            return Ok(Some((name, value)));
        }
    }

    /// Consume raw text up to the next top-level `;` or end of input,
    /// treating strings and parenthesized groups as opaque units.
    fn consume_component_text(&mut self) -> Result<String, StyleTextError> {
        let mut raw = String::new();

        while let Some(c) = self.peek() {
            match c {
                ';' => break,
                '/' if self.peek_at(1) == Some('*') => self.skip_comment(),
                '"' | '\'' => {
                    let opened_at = self.position;
                    raw.push_str(&self.consume_string(opened_at)?);
                }
                '(' => {
                    let opened_at = self.position;
                    raw.push_str(&self.consume_parenthesized(opened_at)?);
                }
                _ => {
                    let _ = self.consume();
                    raw.push(c);
                }
            }
        }

        Ok(raw)
    }

    /// [§ 4.3.5 Consume a string token](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    ///
    /// Consumes a quoted string verbatim, including the quotes. Backslash
    /// escapes keep the following character from closing the string.
    fn consume_string(&mut self, opened_at: usize) -> Result<String, StyleTextError> {
        let mut raw = String::new();
        let quote = match self.consume() {
            Some(q) => q,
            None => return Err(StyleTextError::UnterminatedString(opened_at)),
        };
        raw.push(quote);

        while let Some(c) = self.consume() {
            raw.push(c);
            if c == '\\' {
                if let Some(escaped) = self.consume() {
                    raw.push(escaped);
                }
            } else if c == quote {
                return Ok(raw);
            }
        }

        Err(StyleTextError::UnterminatedString(opened_at))
    }

    /// Consume a parenthesized group verbatim, including nested groups and
    /// strings inside it.
    fn consume_parenthesized(&mut self, opened_at: usize) -> Result<String, StyleTextError> {
        let mut raw = String::new();
        let mut depth = 0usize;

        while let Some(c) = self.peek() {
            match c {
                '(' => {
                    depth += 1;
                    let _ = self.consume();
                    raw.push(c);
                }
                ')' => {
                    depth -= 1;
                    let _ = self.consume();
                    raw.push(c);
                    if depth == 0 {
                        return Ok(raw);
                    }
                }
                '"' | '\'' => {
                    let inner_open = self.position;
                    raw.push_str(&self.consume_string(inner_open)?);
                }
                _ => {
                    let _ = self.consume();
                    raw.push(c);
                }
            }
        }

        Err(StyleTextError::UnbalancedParenthesis(opened_at))
    }

    /// [§ 4.3.2 Consume comments](https://www.w3.org/TR/css-syntax-3/#consume-comments)
    fn skip_comment(&mut self) {
        // Consume "/*".
        let _ = self.consume();
        let _ = self.consume();
        while let Some(c) = self.consume() {
            if c == '*' && self.peek() == Some('/') {
                let _ = self.consume();
                return;
            }
        }
    }

    fn consume_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    let _ = self.consume();
                }
                Some('/') if self.peek_at(1) == Some('*') => self.skip_comment(),
                _ => return,
            }
        }
    }
}

/// Trim a value and collapse interior whitespace runs to single spaces.
///
/// Whitespace inside quoted strings is preserved; the scanner has already
/// kept strings verbatim, so this only fires between components.
fn collapse_whitespace(value: &str) -> String {
    let mut out = String::new();
    let mut chars = value.trim().chars();
    let mut in_quote: Option<char> = None;
    let mut pending_space = false;

    while let Some(c) = chars.next() {
        match in_quote {
            Some(quote) => {
                out.push(c);
                if c == '\\' {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                } else if c == quote {
                    in_quote = None;
                }
            }
            None if c.is_whitespace() => pending_space = true,
            None => {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                out.push(c);
                if c == '"' || c == '\'' {
                    in_quote = Some(c);
                }
            }
        }
    }

    out
}
