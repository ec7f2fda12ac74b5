//! Fixed classification tables for the Dart grammar
//!
//! Classification is table-driven and case-sensitive. The tables are closed:
//! an identifier not in the keyword table is an identifier, and a symbol run
//! not in the operator table is unclassified text, never an error.

/// Reserved words, contextual keywords included
///
/// `Function` is in this table, so the keyword lookup classifies it before
/// the uppercase-initial rule would make it a type identifier.
pub const KEYWORDS: &[&str] = &[
    "abstract", "else", "import", "super", "as", "enum", "in", "switch", "assert", "export",
    "interface", "sync", "async", "extends", "is", "this", "await", "extension", "late", "throw",
    "break", "external", "library", "true", "case", "factory", "mixin", "try", "catch", "false",
    "new", "typedef", "class", "final", "null", "var", "const", "finally", "on", "void",
    "continue", "for", "operator", "while", "covariant", "Function", "part", "with", "default",
    "get", "required", "yield", "deferred", "hide", "rethrow", "do", "if", "return", "dynamic",
    "implements", "set",
];

/// Operator spellings
///
/// A maximal symbol run is an operator only when it matches one of these
/// exactly; otherwise the whole run is unclassified (`?:` and a lone `:`
/// are the common cases).
pub const OPERATORS: &[&str] = &[
    "=", ">", "<", "!", "~", "?", "??", "==", "<=", ">=", "!=", "&&", "||", "++", "--", "+", "-",
    "*", "/", "&", "|", "^", "%", "<<", ">>", ">>>", "+=", "-=", "*=", "/=", "&=", "|=", "^=",
    "%=", "<<=", ">>=", ">>>=",
];

/// Checks if a word is a reserved word
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Checks if a symbol run spells an operator
pub fn is_operator(symbols: &str) -> bool {
    OPERATORS.contains(&symbols)
}

/// Checks if a byte can appear in a symbol run
///
/// Note that `:` is a symbol character without being an operator, and that
/// `<` and `>` join symbol runs even though they can also stand alone as
/// angle brackets.
pub fn is_symbol_char(byte: u8) -> bool {
    matches!(
        byte,
        b'=' | b'>' | b'<' | b'!' | b'~' | b'?' | b':' | b'&' | b'|' | b'+' | b'-' | b'*' | b'/'
            | b'^' | b'%'
    )
}

/// Checks if a byte can start an identifier
pub fn is_identifier_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte == b'$'
}

/// Checks if a byte can continue an identifier
pub fn is_identifier_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

/// Checks if a byte is blank space within a line
pub fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r')
}

/// Checks if a byte is a single-character bracket
pub fn is_bracket(byte: u8) -> bool {
    matches!(byte, b'{' | b'}' | b'(' | b')' | b'[' | b']')
}

/// Checks if a byte is a delimiter
pub fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b';' | b',' | b'.')
}
