//! Open bracket tracking.

use crate::char_codes::CLOSE_PAREN;
use crate::lexer::ModuleLexer;
use esmlex_diagnostics::LexErrorKind;

/// What kind of bracket an open token was pushed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenTokenKind {
    Paren,
    Brace,
    /// The body of a class declaration or expression.
    ClassBrace,
    /// The argument list of a dynamic `import(`.
    DynamicImportParen,
    TemplateLiteral,
    /// The `${` of a template substitution.
    TemplateInterpolationBrace,
}

impl OpenTokenKind {
    #[inline]
    pub(crate) fn is_template(self) -> bool {
        matches!(self, OpenTokenKind::TemplateLiteral | OpenTokenKind::TemplateInterpolationBrace)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenToken {
    pub kind: OpenTokenKind,
    /// The last significant position before the bracket was opened.
    pub origin: Option<usize>,
}

impl ModuleLexer<'_> {
    /// Push an open token. Fails with `CapacityExceeded` past the configured
    /// nesting bound.
    pub(crate) fn push_open(&mut self, kind: OpenTokenKind, origin: Option<usize>) -> bool {
        if self.open_tokens.len() >= self.options.max_nesting_depth {
            self.syntax_error(LexErrorKind::CapacityExceeded);
            return false;
        }
        self.open_tokens.push(OpenToken { kind, origin });
        true
    }

    fn pop_open(&mut self) -> Option<OpenToken> {
        let token = self.open_tokens.pop();
        if token.is_some() {
            self.last_closed = token;
        }
        token
    }

    pub(crate) fn close_paren(&mut self) {
        let Some(token) = self.pop_open() else {
            self.syntax_error(LexErrorKind::UnbalancedBracket);
            return;
        };
        if token.kind != OpenTokenKind::DynamicImportParen {
            return;
        }
        if let Some(pending) = self.dynamic_imports.pop() {
            let argument_end = self.last_token.map_or(0, |last| last + 1).max(pending.argument_start);
            let argument = self.range(pending.argument_start, argument_end);
            let import = &mut self.imports[pending.index];
            if import.argument.is_none() {
                import.argument = Some(argument);
            }
            import.statement_end = (self.pos + 1) as u32;
        }
    }

    /// `{`: a brace directly after a dynamic import's `)` means the import
    /// was really a method named `import`, so the record is retracted.
    pub(crate) fn open_brace(&mut self) {
        if self.last() == CLOSE_PAREN && self.import_undo_slot {
            self.retract_method_import();
        }
        let kind = if self.next_brace_is_class {
            OpenTokenKind::ClassBrace
        } else {
            OpenTokenKind::Brace
        };
        self.next_brace_is_class = false;
        self.push_open(kind, self.last_token);
    }

    fn retract_method_import(&mut self) {
        let Some(import) = self.imports.last() else {
            return;
        };
        let index = self.imports.len() - 1;
        let closed_here = import.kind.is_dynamic()
            && import.argument.map(|argument| argument.end as usize) == self.last_token;
        let pending = self.dynamic_imports.iter().any(|pending| pending.index == index);
        if closed_here && !pending {
            tracing::trace!(start = import.statement_start, "retracting method named import");
            self.imports.pop();
            self.import_undo_slot = false;
        }
    }

    pub(crate) fn close_brace(&mut self) {
        let Some(token) = self.pop_open() else {
            self.syntax_error(LexErrorKind::UnbalancedBracket);
            return;
        };
        if token.kind == OpenTokenKind::TemplateInterpolationBrace {
            self.template_string();
        }
    }

    /// Pop the template literal closed by a backtick.
    pub(crate) fn close_template(&mut self) {
        match self.pop_open() {
            Some(OpenToken {
                kind: OpenTokenKind::TemplateLiteral,
                ..
            }) => {}
            _ => self.syntax_error(LexErrorKind::UnbalancedBracket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esmlex_options::LexerOptions;

    fn units(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn test_push_respects_bound() {
        let src = units("((((");
        let mut lexer = ModuleLexer::new(&src, LexerOptions::default().with_max_nesting_depth(2));
        assert!(lexer.push_open(OpenTokenKind::Paren, None));
        assert!(lexer.push_open(OpenTokenKind::Paren, Some(0)));
        lexer.pos = 2;
        assert!(!lexer.push_open(OpenTokenKind::Paren, Some(1)));
        let error = lexer.error.unwrap();
        assert_eq!(error.kind, LexErrorKind::CapacityExceeded);
        assert_eq!(error.offset, 2);
    }

    #[test]
    fn test_close_records_last_closed() {
        let src = units("{}");
        let mut lexer = ModuleLexer::new(&src, LexerOptions::default());
        lexer.next_brace_is_class = true;
        lexer.open_brace();
        assert!(!lexer.next_brace_is_class);
        lexer.pos = 1;
        lexer.close_brace();
        assert_eq!(lexer.last_closed.map(|token| token.kind), Some(OpenTokenKind::ClassBrace));
        assert!(lexer.open_tokens.is_empty());
    }

    #[test]
    fn test_close_on_empty_stack() {
        let src = units(")");
        let mut lexer = ModuleLexer::new(&src, LexerOptions::default());
        lexer.close_paren();
        assert_eq!(lexer.error.map(|e| e.kind), Some(LexErrorKind::UnbalancedBracket));
    }

    #[test]
    fn test_template_kinds() {
        assert!(OpenTokenKind::TemplateLiteral.is_template());
        assert!(OpenTokenKind::TemplateInterpolationBrace.is_template());
        assert!(!OpenTokenKind::DynamicImportParen.is_template());
    }
}
