//! Regex versus division.
//!
//! Without a parser, a `/` outside a literal is classified by looking back at
//! the previous significant token and, for closing brackets, at the token
//! that preceded the matching opener.

use crate::char_codes::*;
use crate::keywords::{ends_with_keyword, is_break_or_continue, is_expression_keyword, is_expression_terminator, is_paren_keyword};
use crate::lexer::ModuleLexer;
use crate::nesting::OpenTokenKind;

impl ModuleLexer<'_> {
    /// Handle a `/` that does not start a comment.
    pub(crate) fn scan_slash(&mut self) {
        if self.slash_starts_regex() || self.follows_break_or_continue() {
            self.regular_expression();
            self.last_slash_was_division = false;
        } else {
            self.last_slash_was_division = true;
        }
    }

    pub(crate) fn slash_starts_regex(&self) -> bool {
        let Some(last_pos) = self.last_token else {
            return true;
        };
        let last = self.at(last_pos);
        let prev = if last_pos > 0 { self.at(last_pos - 1) } else { NULL_CHARACTER };

        if is_expression_punctuator(last)
            && !(last == DOT && is_digit(prev))
            && !(last == PLUS && prev == PLUS)
            && !(last == MINUS && prev == MINUS)
        {
            return true;
        }

        // `if (x) /re/`
        if last == CLOSE_PAREN
            && self
                .last_closed
                .and_then(|token| token.origin)
                .is_some_and(|origin| is_paren_keyword(self.src, origin))
        {
            return true;
        }

        // `for (x of /re/)`
        if last == F_LOWER && prev == O_LOWER {
            if let Some(innermost) = self.open_tokens.last() {
                if innermost.kind == OpenTokenKind::Paren
                    && innermost.origin.is_some_and(|origin| ends_with_keyword(self.src, origin, "for"))
                {
                    return true;
                }
            }
        }

        // A `}` ending a block or class body, as opposed to an object literal.
        if last == CLOSE_BRACE {
            if let Some(token) = self.last_closed {
                let statement_brace = match token.origin {
                    Some(origin) => is_expression_terminator(self.src, origin),
                    None => true,
                };
                if token.kind == OpenTokenKind::ClassBrace || statement_brace {
                    return true;
                }
            }
        }

        if is_expression_keyword(self.src, last_pos) {
            return true;
        }

        if last == SLASH && self.last_slash_was_division {
            return true;
        }

        // `export default /re/`
        self.exports
            .last()
            .is_some_and(|export| export.exported.pos as usize <= last_pos && last_pos <= export.exported.end as usize)
    }

    /// `break label /re/` style fallback: walk back over the last word and
    /// any same-line whitespace, then test for `break` or `continue`.
    fn follows_break_or_continue(&self) -> bool {
        let Some(mut cursor) = self.last_token else {
            return false;
        };
        while cursor > 0 {
            cursor -= 1;
            if is_br_or_ws_or_punctuator_not_dot(self.at(cursor)) {
                break;
            }
        }
        if !is_ws_not_br(self.at(cursor)) {
            return false;
        }
        while cursor > 0 {
            cursor -= 1;
            if !is_ws_not_br(self.at(cursor)) {
                break;
            }
        }
        is_break_or_continue(self.src, cursor)
    }
}
