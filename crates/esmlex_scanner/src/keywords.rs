//! Backward keyword matching.
//!
//! The lexer never tokenizes identifiers. When it needs to know which word
//! precedes a position it compares a constant keyword against the code units
//! ending there and then checks the keyword boundary: start of buffer,
//! whitespace, a punctuator other than `.`, or the last dot of a spread `...`.
//! Every check here is bounded by the length of the longest keyword.

use crate::char_codes::*;

/// Keywords after which a `/` begins a regular expression.
const EXPRESSION_KEYWORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "continue",
    "debugger",
    "delete",
    "do",
    "else",
    "in",
    "instanceof",
    "new",
    "return",
    "throw",
    "typeof",
    "void",
    "yield",
];

/// Keywords whose parenthesized head is followed by a statement body.
const PAREN_KEYWORDS: &[&str] = &["while", "for", "if"];

/// Keywords after which a `{` opens a statement block.
const BLOCK_KEYWORDS: &[&str] = &["catch", "finally", "else"];

#[inline]
pub(crate) fn unit(src: &[u16], index: usize) -> u16 {
    src.get(index).copied().unwrap_or(NULL_CHARACTER)
}

/// Whether the code units starting at `index` spell `word`.
#[inline]
pub(crate) fn matches_at(src: &[u16], index: usize, word: &str) -> bool {
    word.bytes()
        .enumerate()
        .all(|(i, b)| unit(src, index + i) == b as u16)
}

/// Whether `index` is the final dot of a `...` spread.
#[inline]
pub(crate) fn is_spread(src: &[u16], index: usize) -> bool {
    index >= 2 && unit(src, index) == DOT && unit(src, index - 1) == DOT && unit(src, index - 2) == DOT
}

/// Whether a keyword may begin at `start`.
#[inline]
pub(crate) fn keyword_start(src: &[u16], start: usize) -> bool {
    if start == 0 {
        return true;
    }
    let prev = start - 1;
    let ch = unit(src, prev);
    is_br_or_ws(ch) || (is_punctuator(ch) && (ch != DOT || is_spread(src, prev)))
}

/// Whether the word ending at `last` (inclusive) is exactly `keyword`.
pub(crate) fn ends_with_keyword(src: &[u16], last: usize, keyword: &str) -> bool {
    let len = keyword.len();
    if last >= src.len() || last + 1 < len {
        return false;
    }
    let start = last + 1 - len;
    matches_at(src, start, keyword) && keyword_start(src, start)
}

fn ends_with_any(src: &[u16], last: usize, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| ends_with_keyword(src, last, keyword))
}

/// `case`, `typeof`, `return` and friends: an expression operand follows.
pub(crate) fn is_expression_keyword(src: &[u16], last: usize) -> bool {
    ends_with_any(src, last, EXPRESSION_KEYWORDS)
}

/// `if`, `while` or `for` ends at `last`.
pub(crate) fn is_paren_keyword(src: &[u16], last: usize) -> bool {
    ends_with_any(src, last, PAREN_KEYWORDS)
}

pub(crate) fn is_break_or_continue(src: &[u16], last: usize) -> bool {
    ends_with_keyword(src, last, "break") || ends_with_keyword(src, last, "continue")
}

/// Whether the token ending at `last` completes a statement head, so that a
/// following `{` is a block rather than an object literal: `=>`, `;`, `)`,
/// `catch`, `finally`, `else`.
pub(crate) fn is_expression_terminator(src: &[u16], last: usize) -> bool {
    match unit(src, last) {
        GREATER_THAN => last > 0 && unit(src, last - 1) == EQUALS,
        SEMICOLON | CLOSE_PAREN => true,
        _ => ends_with_any(src, last, BLOCK_KEYWORDS),
    }
}
