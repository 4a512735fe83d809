//! `import` recognition: static statements, dynamic calls, `import.meta`,
//! phase modifiers and import attributes.

use crate::char_codes::*;
use crate::keywords::is_spread;
use crate::lexer::{ModuleLexer, PendingImport};
use crate::nesting::OpenTokenKind;
use crate::record::{Import, ImportKind, ImportPhase};
use esmlex_diagnostics::LexErrorKind;

impl ModuleLexer<'_> {
    /// Whether the previous token is a member access dot (`x.import`).
    fn after_member_dot(&self) -> bool {
        self.last() == DOT && !self.last_token.is_some_and(|last| is_spread(self.src, last))
    }

    /// Entered with the cursor on the `i` of an `import` keyword.
    pub(crate) fn try_parse_import_statement(&mut self) {
        let start = self.pos;
        self.pos += 6;
        let mut ch = self.comment_whitespace(true);
        let maybe_phase_pos = self.pos;
        let member_access = self.after_member_dot();
        let mut phase = ImportPhase::Evaluation;

        if ch == DOT {
            self.pos += 1;
            ch = self.comment_whitespace(true);
            if member_access {
                self.back();
                return;
            }
            if ch == M_LOWER && self.matches_at(self.pos + 1, "eta") {
                self.add_import(Import {
                    kind: ImportKind::ImportMeta,
                    statement_start: start as u32,
                    statement_end: (self.pos + 4) as u32,
                    specifier: None,
                    argument: None,
                    dynamic_start: None,
                    attributes_start: None,
                    safe: false,
                });
                // The cursor stays on `m`; the rest of `meta` is an
                // ordinary token, so `import.meta;` is not a facade.
                return;
            }
            if ch == S_LOWER && self.matches_at(self.pos + 1, "ource") {
                phase = ImportPhase::Source;
                self.pos += 6;
            } else if ch == D_LOWER && self.matches_at(self.pos + 1, "efer") {
                phase = ImportPhase::Defer;
                self.pos += 5;
            } else {
                self.back();
                return;
            }
            ch = self.comment_whitespace(true);
            // Phase members are only meaningful as calls.
            if ch != OPEN_PAREN {
                self.back();
                return;
            }
        } else if self.pos > start + 6
            && ch == S_LOWER
            && self.matches_at(self.pos + 1, "ource")
            && is_br_or_ws(self.peek(6))
        {
            phase = ImportPhase::Source;
            self.pos += 6;
            ch = self.comment_whitespace(true);
            // `import source from 'x'` imports a binding named `source`.
            if self.pos == maybe_phase_pos + 6
                || (ch == F_LOWER
                    && self.matches_at(self.pos + 1, "rom")
                    && is_br_or_ws_or_punctuator_not_dot(self.peek(4)))
            {
                phase = ImportPhase::Evaluation;
                self.pos = maybe_phase_pos;
                ch = self.cur();
            }
        } else if self.pos > start + 6
            && ch == D_LOWER
            && self.matches_at(self.pos + 1, "efer")
            && is_br_or_ws(self.peek(5))
        {
            phase = ImportPhase::Defer;
            self.pos += 5;
            ch = self.comment_whitespace(true);
            // Deferred imports are namespace imports only.
            if ch != ASTERISK {
                phase = ImportPhase::Evaluation;
                self.pos = maybe_phase_pos;
                ch = self.cur();
            }
        }

        match ch {
            OPEN_PAREN => self.dynamic_import(start, phase, member_access),
            OPEN_BRACE if phase == ImportPhase::Evaluation => self.named_import(start),
            _ => self.import_clause(start, ch, phase),
        }
    }

    /// `import(...)`, entered on the `(`.
    fn dynamic_import(&mut self, start: usize, phase: ImportPhase, member_access: bool) {
        let paren = self.pos;
        if member_access {
            self.push_open(OpenTokenKind::Paren, self.last_token);
            return;
        }
        if !self.push_open(OpenTokenKind::DynamicImportParen, Some(paren)) {
            return;
        }
        if self.dynamic_imports.len() >= self.options.max_dynamic_import_depth {
            self.syntax_error(LexErrorKind::CapacityExceeded);
            return;
        }

        self.pos += 1;
        let ch = self.comment_whitespace(true);
        let argument_start = self.pos;
        let index = self.add_import(Import {
            kind: phase.dynamic_kind(),
            statement_start: start as u32,
            statement_end: (paren + 1) as u32,
            specifier: None,
            argument: None,
            dynamic_start: Some(paren as u32),
            attributes_start: None,
            safe: false,
        });
        self.dynamic_imports.push(PendingImport { index, argument_start });

        if !is_quote(ch) {
            // Arbitrary expression: resumes in the main loop, and the record
            // is finalized when its `)` closes.
            self.pos = paren;
            return;
        }
        self.string_literal(ch);
        if self.failed() {
            return;
        }
        let quote_end = self.pos + 1;
        let argument = self.range(argument_start, quote_end);
        let specifier = self.range(argument_start + 1, quote_end - 1);
        self.pos += 1;
        match self.comment_whitespace(true) {
            COMMA => {
                let comma = self.pos;
                self.pos += 1;
                let options = self.comment_whitespace(true);
                let attributes_start = (options != CLOSE_PAREN).then_some(self.pos as u32);
                let import = &mut self.imports[index];
                import.argument = Some(argument);
                import.specifier = Some(specifier);
                import.attributes_start = attributes_start;
                import.safe = true;
                self.pos = comma;
            }
            CLOSE_PAREN => {
                let import = &mut self.imports[index];
                import.argument = Some(argument);
                import.specifier = Some(specifier);
                import.statement_end = (self.pos + 1) as u32;
                import.safe = true;
                self.dynamic_imports.pop();
                if let Some(token) = self.open_tokens.pop() {
                    self.last_closed = Some(token);
                }
            }
            _ => {
                // `import('a' + b)`: not statically known.
                self.pos = quote_end - 1;
            }
        }
    }

    /// `import { a, "b" as c } from 'x'`, entered on the `{`.
    fn named_import(&mut self, start: usize) {
        if !self.open_tokens.is_empty() {
            self.back();
            return;
        }
        while self.pos < self.len {
            let ch = self.comment_whitespace(true);
            if is_quote(ch) {
                self.string_literal(ch);
            } else if ch == CLOSE_BRACE {
                self.pos += 1;
                break;
            }
            self.pos += 1;
        }
        if self.failed() {
            return;
        }

        let ch = self.comment_whitespace(true);
        if !(ch == F_LOWER && self.matches_at(self.pos + 1, "rom")) {
            self.syntax_error(LexErrorKind::MalformedStatement);
            return;
        }
        self.pos += 4;
        let ch = self.comment_whitespace(true);
        if !is_quote(ch) {
            self.syntax_error(LexErrorKind::MalformedStatement);
            return;
        }
        self.read_import_string(start, ch, ImportPhase::Evaluation);
    }

    /// Side-effect, default and namespace imports: everything up to the
    /// specifier string is skipped.
    fn import_clause(&mut self, start: usize, ch: u16, phase: ImportPhase) {
        // `imports`, `import;` and friends are not import statements.
        if !(is_quote(ch) || ch == ASTERISK) && self.pos == start + 6 {
            self.back();
            return;
        }
        if !self.open_tokens.is_empty() {
            self.back();
            return;
        }
        while self.pos < self.len {
            let ch = self.cur();
            if is_quote(ch) {
                self.read_import_string(start, ch, phase);
                return;
            }
            self.pos += 1;
        }
        self.syntax_error(LexErrorKind::MalformedStatement);
    }

    /// Read the specifier string of a static import or re-export and any
    /// attribute clause after it. Leaves the cursor on the last unit of the
    /// statement.
    pub(crate) fn read_import_string(&mut self, statement_start: usize, quote: u16, phase: ImportPhase) {
        if !is_quote(quote) {
            self.syntax_error(LexErrorKind::MalformedStatement);
            return;
        }
        let specifier_start = self.pos + 1;
        self.string_literal(quote);
        if self.failed() {
            return;
        }
        let specifier_end = self.pos;
        let index = self.add_import(Import {
            kind: phase.static_kind(),
            statement_start: statement_start as u32,
            statement_end: (specifier_end + 1) as u32,
            specifier: Some(self.range(specifier_start, specifier_end)),
            argument: None,
            dynamic_start: None,
            attributes_start: None,
            safe: true,
        });

        self.pos += 1;
        match self.import_attributes() {
            Some(open) => {
                let import = &mut self.imports[index];
                import.attributes_start = Some(open as u32);
                import.statement_end = (self.pos + 1) as u32;
            }
            None if !self.failed() => self.pos = specifier_end,
            None => {}
        }
    }

    /// `with { type: 'json' }` or `assert { ... }` on the specifier's line.
    /// Returns the offset of `{` with the cursor on the closing `}`, or
    /// `None` when the clause is absent or not a flat string map.
    fn import_attributes(&mut self) -> Option<usize> {
        let ch = self.comment_whitespace(false);
        let keyword_len = if ch == A_LOWER && self.matches_at(self.pos + 1, "ssert") {
            6
        } else if ch == W_LOWER && self.matches_at(self.pos + 1, "ith") {
            4
        } else {
            return None;
        };
        self.pos += keyword_len;
        if self.comment_whitespace(true) != OPEN_BRACE {
            return None;
        }
        let open = self.pos;
        loop {
            self.pos += 1;
            let mut ch = self.comment_whitespace(true);
            if ch == CLOSE_BRACE {
                break;
            }
            if is_quote(ch) {
                self.string_literal(ch);
                if self.failed() {
                    return None;
                }
                self.pos += 1;
            } else {
                let key_start = self.pos;
                self.read_to_ws_or_punctuator();
                if self.pos == key_start {
                    return None;
                }
            }
            ch = self.comment_whitespace(true);
            if ch != COLON {
                return None;
            }
            self.pos += 1;
            ch = self.comment_whitespace(true);
            if !is_quote(ch) {
                return None;
            }
            self.string_literal(ch);
            if self.failed() {
                return None;
            }
            self.pos += 1;
            match self.comment_whitespace(true) {
                COMMA => continue,
                CLOSE_BRACE => break,
                _ => return None,
            }
        }
        tracing::trace!(open, "import attributes");
        Some(open)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::parse_str;
    use crate::record::ImportKind;
    use esmlex_core::text::{SourceText, TextRange};
    use esmlex_diagnostics::LexErrorKind;

    fn specifiers(source: &str) -> Vec<(ImportKind, Option<String>)> {
        let text = SourceText::new(source);
        parse_str(source)
            .unwrap()
            .imports
            .iter()
            .map(|import| (import.kind, import.specifier_text(&text)))
            .collect()
    }

    #[test]
    fn test_static_forms() {
        let source = "import a from 'a';\nimport * as b from \"b\";\nimport { c, d as e } from 'c';\nimport 'd';\nimport f, { g } from 'e';";
        let found: Vec<_> = specifiers(source).into_iter().map(|(_, s)| s.unwrap()).collect();
        assert_eq!(found, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_string_named_import() {
        let found = specifiers("import { 'a-b' as ab, \"}\" as brace } from 'x';");
        assert_eq!(found, [(ImportKind::Static, Some("x".to_string()))]);
    }

    #[test]
    fn test_statement_range() {
        let source = "import { a } from './a.js';";
        let result = parse_str(source).unwrap();
        let import = &result.imports[0];
        assert_eq!(import.statement(), TextRange::new(0, 26));
        assert_eq!(import.specifier, Some(TextRange::new(19, 25)));
        assert!(import.safe);
    }

    #[test]
    fn test_import_meta() {
        let source = "console.log(import.meta.url, a.import.meta)";
        let result = parse_str(source).unwrap();
        assert_eq!(result.imports.len(), 1);
        let import = &result.imports[0];
        assert_eq!(import.kind, ImportKind::ImportMeta);
        assert_eq!(import.statement(), TextRange::new(12, 23));
        assert!(result.has_module_syntax);
    }

    #[test]
    fn test_import_meta_statement_is_not_facade() {
        let result = parse_str("import.meta;").unwrap();
        assert_eq!(result.imports.len(), 1);
        assert_eq!(result.imports[0].statement(), TextRange::new(0, 11));
        assert!(!result.facade);
        assert!(result.has_module_syntax);

        let result = parse_str("import 'a';\nimport.meta.url;").unwrap();
        assert_eq!(result.imports.len(), 2);
        assert!(!result.facade);
    }

    #[test]
    fn test_phase_imports() {
        let found = specifiers(
            "import source wasm from './x.wasm';\nimport defer * as ns from './y.js';\nimport source from './z.js';\nimport defer from './w.js';",
        );
        assert_eq!(
            found,
            [
                (ImportKind::StaticSourcePhase, Some("./x.wasm".to_string())),
                (ImportKind::StaticDeferPhase, Some("./y.js".to_string())),
                (ImportKind::Static, Some("./z.js".to_string())),
                (ImportKind::Static, Some("./w.js".to_string())),
            ]
        );
    }

    #[test]
    fn test_dynamic_phase_imports() {
        let found = specifiers("import.source('./a.wasm'); import.defer('./b.js'); x.import.source('c');");
        assert_eq!(
            found,
            [
                (ImportKind::DynamicSourcePhase, Some("./a.wasm".to_string())),
                (ImportKind::DynamicDeferPhase, Some("./b.js".to_string())),
            ]
        );
    }

    #[test]
    fn test_dynamic_string_argument() {
        let source = "await import( 'x' )";
        let result = parse_str(source).unwrap();
        let import = &result.imports[0];
        assert_eq!(import.kind, ImportKind::Dynamic);
        assert_eq!(import.dynamic_start, Some(12));
        assert_eq!(import.argument, Some(TextRange::new(14, 17)));
        assert_eq!(import.specifier, Some(TextRange::new(15, 16)));
        assert_eq!(import.statement_end, 19);
        assert!(import.safe);
        assert!(!result.has_module_syntax);
    }

    #[test]
    fn test_dynamic_expression_argument() {
        let source = "import(`./${name}.js`)";
        let result = parse_str(source).unwrap();
        let import = &result.imports[0];
        assert!(!import.safe);
        assert_eq!(import.specifier, None);
        assert_eq!(import.argument, Some(TextRange::new(7, 21)));
        assert_eq!(import.statement_end, 22);
    }

    #[test]
    fn test_dynamic_concatenation_is_unsafe() {
        let result = parse_str("import('./a' + b)").unwrap();
        let import = &result.imports[0];
        assert!(!import.safe);
        assert_eq!(import.argument, Some(TextRange::new(7, 16)));
    }

    #[test]
    fn test_dynamic_options_argument() {
        let source = "import('x', { with: { type: 'json' } })";
        let result = parse_str(source).unwrap();
        assert_eq!(result.imports.len(), 1);
        let import = &result.imports[0];
        assert!(import.safe);
        assert_eq!(import.attributes_start, Some(12));
        assert_eq!(import.statement_end, 39);

        let result = parse_str("import('x',)").unwrap();
        assert_eq!(result.imports[0].attributes_start, None);
    }

    #[test]
    fn test_static_attributes() {
        let source = "import json from './a.json' with { type: 'json', 'x': \"y\", };";
        let result = parse_str(source).unwrap();
        let import = &result.imports[0];
        assert_eq!(import.attributes_start, Some(33));
        assert_eq!(import.statement_end, 60);

        let source = "import a from 'a' assert { type: 'json' }";
        let result = parse_str(source).unwrap();
        assert_eq!(result.imports[0].attributes_start, Some(25));
    }

    #[test]
    fn test_attributes_must_share_line() {
        let source = "import a from 'a'\nwith ({}) {}";
        let result = parse_str(source).unwrap();
        let import = &result.imports[0];
        assert_eq!(import.attributes_start, None);
        assert_eq!(import.statement_end, 17);
    }

    #[test]
    fn test_malformed_attributes_are_dropped() {
        let result = parse_str("import a from 'a' with { type: json };").unwrap();
        let import = &result.imports[0];
        assert_eq!(import.attributes_start, None);
        assert_eq!(import.statement_end, 17);
    }

    #[test]
    fn test_named_import_requires_from() {
        let error = parse_str("import { a } form 'a';").unwrap_err();
        assert_eq!(error.kind, LexErrorKind::MalformedStatement);
        assert_eq!(error.offset, 13);

        let error = parse_str("import { a } from b;").unwrap_err();
        assert_eq!(error.kind, LexErrorKind::MalformedStatement);
    }

    #[test]
    fn test_import_identifiers_are_not_statements() {
        assert!(specifiers("const imports = 1; obj.import; x = { import: 1 };").is_empty());
    }

    #[test]
    fn test_member_dynamic_import_is_ignored() {
        assert!(specifiers("loader.import('./x.js');").is_empty());
        assert_eq!(specifiers("f(...import('./y.js'))").len(), 1);
    }

    #[test]
    fn test_method_named_import_is_retracted() {
        let result = parse_str("const o = { import () {} };\nclass A { import(a) { return a; } }").unwrap();
        assert!(result.imports.is_empty());
    }
}
