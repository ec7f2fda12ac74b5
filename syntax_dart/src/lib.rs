#![no_std]

//! # Dart Syntax Scanner
//!
//! Hand-specified lexical scanner for Dart source, used for syntax
//! highlighting.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same (line, state) input => same token output
//! - **Lines, not documents**: One line at a time, with an explicit carried
//!   state threaded between consecutive lines
//! - **Coverage**: Concatenating the tokens of a line reconstructs the line;
//!   unclassifiable text is still a token
//! - **Lexical, not semantic**: A keyword used as a name is still a keyword
//!
//! ## Design
//!
//! The scanner provides:
//! - LexState: carried classification context between lines
//! - scan_line: pure per-line tokenizer
//! - scan_text: whole-text scan threading state across lines
//! - Highlighter: retained per-line cache for re-tokenizing on every change

extern crate alloc;

pub mod highlighter;
pub mod scanner;
pub mod state;
pub mod tables;
pub mod token;

pub use highlighter::Highlighter;
pub use scanner::{scan_line, scan_text, ScannedLine};
pub use state::LexState;
pub use tables::{is_keyword, is_operator, is_symbol_char, KEYWORDS, OPERATORS};
pub use token::{Token, TokenKind};
