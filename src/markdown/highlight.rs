//! Code Highlighting Module
//!
//! A small, language-agnostic highlighter for fenced code blocks. Code is
//! split into non-overlapping tokens by a single left-to-right scan, then each
//! token is escaped and wrapped in a styled `<span>`.
//!
//! # Classification priority
//! At any position the scanner tries, in order: comment, string literal,
//! number, keyword, function name. Whatever starts first wins and owns its
//! whole extent, so a `//` inside a string stays part of the string and a
//! keyword inside a comment is never highlighted. Tokens never nest.
//!
//! # Example
//! ```ignore
//! use markpad::markdown::highlight;
//!
//! let html = highlight("let x = 1;");
//! assert!(html.contains(r#"<span class="highlight-keyword">let</span>"#));
//! ```

use super::escape::escape_html;
use crate::config::DEFAULT_KEYWORDS;
use std::collections::HashSet;

// ─────────────────────────────────────────────────────────────────────────────
// Tokens
// ─────────────────────────────────────────────────────────────────────────────

/// Category of a highlighted token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `// line` or `/* block */` comment
    Comment,
    /// Single-, double- or backtick-quoted literal
    String,
    /// Integer or decimal literal
    Number,
    /// Word from the configured keyword set
    Keyword,
    /// Identifier directly followed by `(`
    Function,
    /// Everything else
    Plain,
}

impl TokenKind {
    /// CSS class used for this kind, `None` for plain text.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            TokenKind::Comment => Some("highlight-comment"),
            TokenKind::String => Some("highlight-string"),
            TokenKind::Number => Some("highlight-number"),
            TokenKind::Keyword => Some("highlight-keyword"),
            TokenKind::Function => Some("highlight-function"),
            TokenKind::Plain => None,
        }
    }
}

/// A classified slice of the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Stateless code highlighter configured with a keyword set.
#[derive(Debug, Clone)]
pub struct Highlighter {
    keywords: HashSet<String>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::with_keywords(DEFAULT_KEYWORDS.iter().copied())
    }
}

impl Highlighter {
    /// Create a highlighter that treats exactly `keywords` as keywords.
    ///
    /// Matching is case-sensitive and whole-word.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `word` is in the keyword set.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Highlight `code` into HTML.
    ///
    /// The input is raw code; escaping happens per token, so the result never
    /// contains unescaped markup from the source.
    pub fn highlight(&self, code: &str) -> String {
        let mut html = String::with_capacity(code.len() * 2);
        for token in self.tokenize(code) {
            let text = escape_html(token.text);
            match token.kind.css_class() {
                Some(class) => {
                    html.push_str("<span class=\"");
                    html.push_str(class);
                    html.push_str("\">");
                    html.push_str(&text);
                    html.push_str("</span>");
                }
                None => html.push_str(&text),
            }
        }
        html
    }

    /// Split `code` into tokens. Adjacent plain text is merged into one token.
    pub fn tokenize<'a>(&self, code: &'a str) -> Vec<Token<'a>> {
        let bytes = code.as_bytes();
        let mut tokens = Vec::new();
        let mut plain_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            let Some((kind, end)) = self.scan_at(code, i) else {
                i += 1;
                continue;
            };

            if kind == TokenKind::Plain {
                i = end;
                continue;
            }

            if plain_start < i {
                tokens.push(Token {
                    kind: TokenKind::Plain,
                    text: &code[plain_start..i],
                });
            }
            tokens.push(Token {
                kind,
                text: &code[i..end],
            });
            i = end;
            plain_start = end;
        }

        if plain_start < bytes.len() {
            tokens.push(Token {
                kind: TokenKind::Plain,
                text: &code[plain_start..],
            });
        }
        tokens
    }

    /// Try to recognise a token starting at byte `i`.
    ///
    /// Returns the kind and end offset, `Plain` for a word that must be
    /// skipped as a unit, or `None` when the byte is ordinary text.
    fn scan_at(&self, code: &str, i: usize) -> Option<(TokenKind, usize)> {
        let bytes = code.as_bytes();
        let b = bytes[i];

        if b == b'/' {
            if let Some(end) = scan_comment(bytes, i) {
                return Some((TokenKind::Comment, end));
            }
        }

        if matches!(b, b'\'' | b'"' | b'`') {
            if let Some(end) = scan_string(bytes, i) {
                return Some((TokenKind::String, end));
            }
        }

        if i > 0 && is_word_byte(bytes[i - 1]) {
            return None;
        }

        if b.is_ascii_digit() {
            let end = scan_number(bytes, i);
            if end < bytes.len() && is_word_byte(bytes[end]) {
                // `1abc`, `2px`: not a standalone number
                return Some((TokenKind::Plain, scan_word(bytes, end)));
            }
            return Some((TokenKind::Number, end));
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            let end = scan_word(bytes, i);
            let word = &code[i..end];
            if self.is_keyword(word) {
                return Some((TokenKind::Keyword, end));
            }
            if followed_by_paren(bytes, end) {
                return Some((TokenKind::Function, end));
            }
            return Some((TokenKind::Plain, end));
        }

        None
    }
}

/// Highlight `code` with the default keyword set.
pub fn highlight(code: &str) -> String {
    Highlighter::default().highlight(code)
}

// ─────────────────────────────────────────────────────────────────────────────
// Scanners
// ─────────────────────────────────────────────────────────────────────────────

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn scan_word(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && is_word_byte(bytes[end]) {
        end += 1;
    }
    end
}

/// `//` runs to the end of the line; `/*` runs to the nearest `*/`.
/// An unterminated block comment is not a comment.
fn scan_comment(bytes: &[u8], start: usize) -> Option<usize> {
    match bytes.get(start + 1) {
        Some(b'/') => {
            let end = bytes[start..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|p| start + p)
                .unwrap_or(bytes.len());
            Some(end)
        }
        Some(b'*') => bytes[start + 2..]
            .windows(2)
            .position(|w| w == b"*/")
            .map(|p| start + 2 + p + 2),
        _ => None,
    }
}

/// A quoted literal ends at the next unescaped matching quote. Single and
/// double quotes stop at a line break; backtick literals may span lines.
fn scan_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => return None,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Digits with an optional fractional part (`12`, `3.14`).
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    end
}

fn followed_by_paren(bytes: &[u8], mut i: usize) -> bool {
    while i < bytes.len() && matches!(bytes[i], b' ' | b'\t') {
        i += 1;
    }
    bytes.get(i) == Some(&b'(')
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
