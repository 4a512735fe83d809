//! Code unit constants and classification used by the lexer.
//!
//! Only ASCII line breaks and the whitespace listed below are recognized;
//! the remaining Unicode spaces are treated as ordinary characters.

#![allow(dead_code)]

// Control characters
pub const NULL_CHARACTER: u16 = 0x00;
pub const TAB: u16 = 0x09;
pub const LINE_FEED: u16 = 0x0A;
pub const VERTICAL_TAB: u16 = 0x0B;
pub const FORM_FEED: u16 = 0x0C;
pub const CARRIAGE_RETURN: u16 = 0x0D;
pub const NON_BREAKING_SPACE: u16 = 0xA0;

// ASCII characters
pub const SPACE: u16 = b' ' as u16;
pub const EXCLAMATION: u16 = b'!' as u16;
pub const DOUBLE_QUOTE: u16 = b'"' as u16;
pub const DOLLAR_SIGN: u16 = b'$' as u16;
pub const PERCENT: u16 = b'%' as u16;
pub const AMPERSAND: u16 = b'&' as u16;
pub const SINGLE_QUOTE: u16 = b'\'' as u16;
pub const OPEN_PAREN: u16 = b'(' as u16;
pub const CLOSE_PAREN: u16 = b')' as u16;
pub const ASTERISK: u16 = b'*' as u16;
pub const PLUS: u16 = b'+' as u16;
pub const COMMA: u16 = b',' as u16;
pub const MINUS: u16 = b'-' as u16;
pub const DOT: u16 = b'.' as u16;
pub const SLASH: u16 = b'/' as u16;
pub const _0: u16 = b'0' as u16;
pub const _9: u16 = b'9' as u16;
pub const COLON: u16 = b':' as u16;
pub const SEMICOLON: u16 = b';' as u16;
pub const LESS_THAN: u16 = b'<' as u16;
pub const EQUALS: u16 = b'=' as u16;
pub const GREATER_THAN: u16 = b'>' as u16;
pub const QUESTION: u16 = b'?' as u16;
pub const AT: u16 = b'@' as u16;

pub const OPEN_BRACKET: u16 = b'[' as u16;
pub const BACKSLASH: u16 = b'\\' as u16;
pub const CLOSE_BRACKET: u16 = b']' as u16;
pub const CARET: u16 = b'^' as u16;
pub const BACKTICK: u16 = b'`' as u16;

pub const A_LOWER: u16 = b'a' as u16;
pub const C_LOWER: u16 = b'c' as u16;
pub const D_LOWER: u16 = b'd' as u16;
pub const E_LOWER: u16 = b'e' as u16;
pub const F_LOWER: u16 = b'f' as u16;
pub const I_LOWER: u16 = b'i' as u16;
pub const L_LOWER: u16 = b'l' as u16;
pub const M_LOWER: u16 = b'm' as u16;
pub const O_LOWER: u16 = b'o' as u16;
pub const S_LOWER: u16 = b's' as u16;
pub const V_LOWER: u16 = b'v' as u16;
pub const W_LOWER: u16 = b'w' as u16;

pub const OPEN_BRACE: u16 = b'{' as u16;
pub const BAR: u16 = b'|' as u16;
pub const CLOSE_BRACE: u16 = b'}' as u16;
pub const TILDE: u16 = b'~' as u16;

/// Check if a code unit is a line terminator.
#[inline]
pub fn is_br(ch: u16) -> bool {
    ch == CARRIAGE_RETURN || ch == LINE_FEED
}

/// Check if a code unit is whitespace other than a line terminator.
#[inline]
pub fn is_ws_not_br(ch: u16) -> bool {
    matches!(ch, TAB | VERTICAL_TAB | FORM_FEED | SPACE | NON_BREAKING_SPACE)
}

/// Check if a code unit is whitespace or a line terminator (9-13, 32, 160).
#[inline]
pub fn is_br_or_ws(ch: u16) -> bool {
    (TAB..=CARRIAGE_RETURN).contains(&ch) || ch == SPACE || ch == NON_BREAKING_SPACE
}

/// Check if a code unit is a decimal digit.
#[inline]
pub fn is_digit(ch: u16) -> bool {
    (_0..=_9).contains(&ch)
}

#[inline]
pub fn is_quote(ch: u16) -> bool {
    ch == SINGLE_QUOTE || ch == DOUBLE_QUOTE
}

/// One of the 23 characters a punctuator can end with: `!%&()*+,-./:;<=>?[]^{}|~`.
#[inline]
pub fn is_punctuator(ch: u16) -> bool {
    matches!(
        ch,
        EXCLAMATION
            | PERCENT
            | AMPERSAND
            | OPEN_PAREN..=SLASH
            | COLON..=QUESTION
            | OPEN_BRACKET
            | CLOSE_BRACKET
            | CARET
            | OPEN_BRACE..=TILDE
    )
}

/// A punctuator after which an expression must follow:
/// `!%&(*+,-.:;<=>?[^{|~`. Closing brackets and `/` are excluded.
#[inline]
pub fn is_expression_punctuator(ch: u16) -> bool {
    match ch {
        CLOSE_PAREN | SLASH | CLOSE_BRACKET | CLOSE_BRACE => false,
        _ => is_punctuator(ch),
    }
}

#[inline]
pub fn is_br_or_ws_or_punctuator_not_dot(ch: u16) -> bool {
    is_br_or_ws(ch) || (is_punctuator(ch) && ch != DOT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(c: char) -> u16 {
        c as u16
    }

    #[test]
    fn test_punctuators() {
        for c in "!%&()*+,-./:;<=>?[]^{}|~".chars() {
            assert!(is_punctuator(unit(c)), "{c:?} should be a punctuator");
        }
        for c in "\"#$'@\\_`aZ0 ".chars() {
            assert!(!is_punctuator(unit(c)), "{c:?} should not be a punctuator");
        }
    }

    #[test]
    fn test_expression_punctuators() {
        for c in "!%&(*+,-.:;<=>?[^{|~".chars() {
            assert!(is_expression_punctuator(unit(c)), "{c:?}");
        }
        for c in ")/]}".chars() {
            assert!(!is_expression_punctuator(unit(c)), "{c:?}");
        }
    }

    #[test]
    fn test_whitespace_classes() {
        assert!(is_br_or_ws(LINE_FEED));
        assert!(is_br_or_ws(NON_BREAKING_SPACE));
        assert!(!is_ws_not_br(CARRIAGE_RETURN));
        assert!(is_ws_not_br(VERTICAL_TAB));
        assert!(!is_br_or_ws(0x2028));
        assert!(!is_br_or_ws_or_punctuator_not_dot(DOT));
        assert!(is_br_or_ws_or_punctuator_not_dot(SEMICOLON));
    }
}
