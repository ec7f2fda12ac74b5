//! Token types produced by the scanner

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Classification of a scanned span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Reserved word from the fixed keyword table
    Keyword,
    /// Identifier starting with an uppercase letter
    TypeIdentifier,
    /// Identifier starting with a lowercase letter, `_`, or `$`
    Identifier,
    /// Run of decimal digits
    Number,
    /// Single bracket character
    Bracket,
    /// Symbol run matching the fixed operator table
    Operator,
    /// `;`, `,`, or `.`
    Delimiter,
    /// Line or block comment text
    Comment,
    /// Documentation comment text
    DocComment,
    /// String literal text, quotes included
    StringLiteral,
    /// Backslash escape inside a string literal
    StringEscape,
    /// Unterminated string literal, quote through end of line
    StringInvalid,
    /// Run of blank characters
    Whitespace,
    /// Text with no classification
    Plain,
}

/// A classified contiguous span of one line
///
/// Tokens are transient: they are recomputed from the document text on
/// every change and never stored beyond the current highlight pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Classification of this span
    pub kind: TokenKind,
    /// The exact source text of the span
    pub text: String,
    /// Byte offset of the span within its line
    pub start: usize,
}

impl Token {
    /// Creates a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
        }
    }

    /// Byte offset one past the end of the span
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}
