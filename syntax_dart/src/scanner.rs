//! Per-line scanning state machine
//!
//! One call scans one line. The caller threads the exit state of line *n*
//! into line *n+1*; the scanner itself holds nothing between calls.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::state::LexState;
use crate::tables;
use crate::token::{Token, TokenKind};

/// Result of scanning one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedLine {
    /// Tokens covering the line, in order
    pub tokens: Vec<Token>,
    /// State to carry into the next line
    pub exit: LexState,
}

impl ScannedLine {
    /// Reconstructs the line by concatenating every token's text
    pub fn reconstruct(&self) -> String {
        let mut line = String::new();
        for token in &self.tokens {
            line.push_str(&token.text);
        }
        line
    }
}

/// Scans one line, starting in `entry` state
///
/// Pure and total: malformed input is classified, never rejected. A stray
/// `*/` outside a comment is unclassified text; an unterminated `"` is a
/// `StringInvalid` token and leaves the carried state untouched, because
/// strings cannot span lines. A line entering in `InString` is scanned as
/// string content, and that state is likewise never carried out.
pub fn scan_line(line: &str, entry: LexState) -> ScannedLine {
    let mut scanner = LineScanner::new(line);
    let mut state = entry;

    while scanner.pos < scanner.bytes.len() {
        state = match state {
            LexState::Root => scanner.scan_root(),
            LexState::InBlockComment | LexState::InDocComment => scanner.scan_comment_body(state),
            LexState::InString => scanner.scan_string_body(),
        };
    }

    ScannedLine {
        tokens: scanner.tokens,
        exit: state,
    }
}

/// Scans a whole text, threading the carried state across lines
///
/// Lines are split on `\n`; a trailing newline yields a final empty line,
/// matching how an editor counts lines.
pub fn scan_text(text: &str) -> Vec<ScannedLine> {
    let mut state = LexState::Root;
    let mut lines = Vec::new();
    for line in text.split('\n') {
        let scanned = scan_line(line, state);
        state = scanned.exit;
        lines.push(scanned);
    }
    lines
}

struct LineScanner<'a> {
    line: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> LineScanner<'a> {
    fn new(line: &'a str) -> Self {
        Self {
            line,
            bytes: line.as_bytes(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    /// Scans one token starting at the current position in Root state
    fn scan_root(&mut self) -> LexState {
        let start = self.pos;
        let byte = self.bytes[self.pos];

        if tables::is_blank(byte) {
            self.consume_while(tables::is_blank);
            self.emit(TokenKind::Whitespace, start);
            return LexState::Root;
        }

        if byte == b'/' {
            match self.peek_at(1) {
                Some(b'/') => {
                    self.pos = self.bytes.len();
                    self.emit(TokenKind::Comment, start);
                    return LexState::Root;
                }
                Some(b'*') => return self.scan_comment_opening(),
                // a lone slash joins a symbol run below
                _ => {}
            }
        }

        if byte == b'"' {
            return self.scan_string_opening();
        }

        if tables::is_identifier_start(byte) {
            self.consume_while(tables::is_identifier_continue);
            let kind = if tables::is_keyword(&self.line[start..self.pos]) {
                TokenKind::Keyword
            } else if byte.is_ascii_uppercase() {
                TokenKind::TypeIdentifier
            } else {
                TokenKind::Identifier
            };
            self.emit(kind, start);
            return LexState::Root;
        }

        if byte.is_ascii_digit() {
            self.consume_while(|b| b.is_ascii_digit());
            self.emit(TokenKind::Number, start);
            return LexState::Root;
        }

        if tables::is_bracket(byte) {
            self.pos += 1;
            self.emit(TokenKind::Bracket, start);
            return LexState::Root;
        }

        // < and > stand alone as angle brackets only when the next
        // character cannot extend them into a symbol run
        if matches!(byte, b'<' | b'>') && !self.peek_at(1).map_or(false, tables::is_symbol_char) {
            self.pos += 1;
            self.emit(TokenKind::Bracket, start);
            return LexState::Root;
        }

        if tables::is_symbol_char(byte) {
            self.consume_while(tables::is_symbol_char);
            let kind = if tables::is_operator(&self.line[start..self.pos]) {
                TokenKind::Operator
            } else {
                TokenKind::Plain
            };
            self.emit(kind, start);
            return LexState::Root;
        }

        if tables::is_delimiter(byte) {
            self.pos += 1;
            self.emit(TokenKind::Delimiter, start);
            return LexState::Root;
        }

        // no rule matched: accumulate unclassified text up to the next
        // character that starts a recognizable token
        self.advance_char();
        while self.pos < self.bytes.len() && !starts_root_token(self.bytes[self.pos]) {
            self.advance_char();
        }
        self.emit(TokenKind::Plain, start);
        LexState::Root
    }

    /// Scans a comment from its `/*` or `/**` opener
    fn scan_comment_opening(&mut self) -> LexState {
        let start = self.pos;
        // `/**` opens a doc comment unless it is immediately closed (`/**/`)
        let is_doc = self.peek_at(2) == Some(b'*') && self.peek_at(3) != Some(b'/');
        let (kind, carry) = if is_doc {
            (TokenKind::DocComment, LexState::InDocComment)
        } else {
            (TokenKind::Comment, LexState::InBlockComment)
        };
        let body_start = if is_doc { start + 3 } else { start + 2 };

        match self.find_close(body_start) {
            Some(end) => {
                self.pos = end;
                self.emit(kind, start);
                LexState::Root
            }
            None => {
                self.pos = self.bytes.len();
                self.emit(kind, start);
                carry
            }
        }
    }

    /// Scans the continuation of a comment entered on an earlier line
    fn scan_comment_body(&mut self, state: LexState) -> LexState {
        let kind = if state == LexState::InDocComment {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        let start = self.pos;

        match self.find_close(start) {
            Some(end) => {
                self.pos = end;
                self.emit(kind, start);
                LexState::Root
            }
            None => {
                self.pos = self.bytes.len();
                self.emit(kind, start);
                state
            }
        }
    }

    /// Scans a string from its opening quote
    fn scan_string_opening(&mut self) -> LexState {
        let start = self.pos;
        if self.string_closes_ahead(start + 1) {
            self.pos += 1;
            self.scan_string_segments(start)
        } else {
            self.pos = self.bytes.len();
            self.emit(TokenKind::StringInvalid, start);
            LexState::Root
        }
    }

    /// Scans string content for a line that entered in `InString`
    fn scan_string_body(&mut self) -> LexState {
        let seg_start = self.pos;
        self.scan_string_segments(seg_start)
    }

    /// Scans string content as literal segments interleaved with escapes
    ///
    /// `seg_start` may point before the current position so the opening
    /// quote folds into the first literal segment.
    fn scan_string_segments(&mut self, mut seg_start: usize) -> LexState {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' if self.pos + 1 < self.bytes.len() => {
                    if seg_start < self.pos {
                        self.emit(TokenKind::StringLiteral, seg_start);
                    }
                    let escape_start = self.pos;
                    self.pos += 1;
                    self.advance_char();
                    self.emit(TokenKind::StringEscape, escape_start);
                    seg_start = self.pos;
                }
                b'\\' => {
                    // lone backslash at end of line stays literal
                    self.pos += 1;
                }
                b'"' => {
                    self.pos += 1;
                    self.emit(TokenKind::StringLiteral, seg_start);
                    return LexState::Root;
                }
                _ => self.advance_char(),
            }
        }
        if seg_start < self.pos {
            self.emit(TokenKind::StringLiteral, seg_start);
        }
        LexState::Root
    }

    /// Checks whether an unescaped closing quote exists before end of line
    fn string_closes_ahead(&self, from: usize) -> bool {
        let mut idx = from;
        while idx < self.bytes.len() {
            match self.bytes[idx] {
                b'\\' => {
                    idx += 1;
                    idx += self.char_len_at(idx);
                }
                b'"' => return true,
                _ => idx += 1,
            }
        }
        false
    }

    /// Finds the end of the next `*/`, searching from `from`
    fn find_close(&self, from: usize) -> Option<usize> {
        self.line[from..].find("*/").map(|offset| from + offset + 2)
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn consume_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.pos < self.bytes.len() && predicate(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }

    fn advance_char(&mut self) {
        self.pos += self.char_len_at(self.pos).max(1);
    }

    /// Length in bytes of the character starting at `idx`, 0 past the end
    fn char_len_at(&self, idx: usize) -> usize {
        self.line
            .get(idx..)
            .and_then(|rest| rest.chars().next())
            .map(|c| c.len_utf8())
            .unwrap_or(0)
    }

    fn emit(&mut self, kind: TokenKind, start: usize) {
        self.tokens
            .push(Token::new(kind, &self.line[start..self.pos], start));
    }
}

fn starts_root_token(byte: u8) -> bool {
    tables::is_blank(byte)
        || byte == b'"'
        || tables::is_identifier_start(byte)
        || byte.is_ascii_digit()
        || tables::is_bracket(byte)
        || tables::is_symbol_char(byte)
        || tables::is_delimiter(byte)
}
