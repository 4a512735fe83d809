//! Literal and trivia sub-scanners.
//!
//! Each scanner is entered with the cursor on the opening unit and leaves it
//! on the closing unit, so the caller's next increment moves past the
//! construct.

use crate::char_codes::*;
use crate::lexer::ModuleLexer;
use crate::nesting::OpenTokenKind;
use esmlex_diagnostics::LexErrorKind;

impl ModuleLexer<'_> {
    /// Scan a `'` or `"` string.
    pub(crate) fn string_literal(&mut self, quote: u16) {
        while self.bump() {
            let ch = self.cur();
            if ch == quote {
                return;
            }
            if ch == BACKSLASH {
                self.pos += 1;
                if self.cur() == CARRIAGE_RETURN && self.peek(1) == LINE_FEED {
                    self.pos += 1;
                }
            } else if is_br(ch) {
                break;
            }
        }
        self.syntax_error(LexErrorKind::UnterminatedLiteral);
    }

    /// Scan template characters until the closing backtick or a `${`.
    ///
    /// Entered on the opening backtick or on the `}` ending a substitution.
    pub(crate) fn template_string(&mut self) {
        while self.bump() {
            let ch = self.cur();
            if ch == DOLLAR_SIGN && self.peek(1) == OPEN_BRACE {
                self.pos += 1;
                self.push_open(OpenTokenKind::TemplateInterpolationBrace, Some(self.pos));
                return;
            }
            if ch == BACKTICK {
                self.close_template();
                return;
            }
            if ch == BACKSLASH {
                self.pos += 1;
            }
        }
        self.syntax_error(LexErrorKind::UnterminatedLiteral);
    }

    /// Scan a `/* */` comment. With `multiline` false the comment ends early
    /// at a line break, leaving the cursor on it.
    pub(crate) fn block_comment(&mut self, multiline: bool) {
        self.pos += 1;
        while self.bump() {
            let ch = self.cur();
            if !multiline && is_br(ch) {
                return;
            }
            if ch == ASTERISK && self.peek(1) == SLASH {
                self.pos += 1;
                return;
            }
        }
        self.syntax_error(LexErrorKind::UnterminatedLiteral);
    }

    /// Scan a `//` comment, stopping on the line break.
    pub(crate) fn line_comment(&mut self) {
        while self.bump() {
            if is_br(self.cur()) {
                return;
            }
        }
    }

    pub(crate) fn regular_expression(&mut self) {
        while self.bump() {
            match self.cur() {
                SLASH => return,
                OPEN_BRACKET => {
                    if !self.regex_character_class() {
                        return;
                    }
                }
                BACKSLASH => self.pos += 1,
                LINE_FEED | CARRIAGE_RETURN => break,
                _ => {}
            }
        }
        self.syntax_error(LexErrorKind::UnterminatedLiteral);
    }

    /// Scan a `[...]` class inside a regex, where `/` does not terminate.
    fn regex_character_class(&mut self) -> bool {
        while self.bump() {
            match self.cur() {
                CLOSE_BRACKET => return true,
                BACKSLASH => self.pos += 1,
                LINE_FEED | CARRIAGE_RETURN => break,
                _ => {}
            }
        }
        self.syntax_error(LexErrorKind::UnterminatedLiteral);
        false
    }

    /// Skip whitespace and comments, returning the first other code unit
    /// (left under the cursor), or `0` at end of input.
    ///
    /// With `multiline` false line breaks are significant and stop the skip,
    /// including the one that ends a comment.
    pub(crate) fn comment_whitespace(&mut self, multiline: bool) -> u16 {
        loop {
            let ch = self.cur();
            if ch == SLASH {
                match self.peek(1) {
                    SLASH => self.line_comment(),
                    ASTERISK => self.block_comment(multiline),
                    _ => return ch,
                }
                if self.failed() {
                    return NULL_CHARACTER;
                }
                if !multiline && is_br(self.cur()) {
                    return self.cur();
                }
            } else if (multiline && !is_br_or_ws(ch)) || (!multiline && !is_ws_not_br(ch)) {
                return ch;
            }
            if !self.bump() {
                return NULL_CHARACTER;
            }
        }
    }

    /// Advance over an identifier-like run, stopping on whitespace, a
    /// punctuator or the end of input.
    pub(crate) fn read_to_ws_or_punctuator(&mut self) -> u16 {
        loop {
            let ch = self.cur();
            if ch == NULL_CHARACTER || is_br_or_ws(ch) || is_punctuator(ch) {
                return ch;
            }
            self.pos += 1;
        }
    }
}
