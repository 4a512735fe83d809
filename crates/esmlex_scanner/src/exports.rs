//! `export` recognition.

use crate::char_codes::*;
use crate::lexer::ModuleLexer;
use crate::record::ImportPhase;
use esmlex_diagnostics::LexErrorKind;

impl ModuleLexer<'_> {
    /// Entered with the cursor on the `e` of a top-level `export` keyword.
    pub(crate) fn try_parse_export_statement(&mut self) {
        let start = self.pos;
        let first_export = self.exports.len();
        self.pos += 6;
        let after_keyword = self.pos;
        let mut ch = self.comment_whitespace(true);

        // `exports`, `export_`: an identifier that merely starts with `export`.
        if self.pos == after_keyword && !is_punctuator(ch) {
            self.back();
            return;
        }

        match ch {
            OPEN_BRACE => {
                if !self.export_specifiers() {
                    return;
                }
                self.has_module_syntax = true;
                self.pos += 1;
                ch = self.comment_whitespace(true);
            }
            ASTERISK => {
                let star = self.pos;
                self.pos += 1;
                self.comment_whitespace(true);
                let before = self.exports.len();
                let at = self.pos;
                self.read_export_as(at, at);
                if self.failed() {
                    return;
                }
                if self.exports.len() == before {
                    self.add_export(self.range(star, star + 1), None);
                }
                ch = self.comment_whitespace(true);
            }
            _ => {
                self.facade = false;
                self.export_declaration(ch);
                return;
            }
        }

        if ch == F_LOWER && self.matches_at(self.pos + 1, "rom") {
            self.pos += 4;
            let quote = self.comment_whitespace(true);
            self.read_import_string(start, quote, ImportPhase::Evaluation);
            for export in &mut self.exports[first_export..] {
                export.local = None;
            }
        } else {
            self.back();
        }
    }

    /// `{ a, b as c, "d" as e }`, entered on the `{`. Leaves the cursor on
    /// the `}`.
    fn export_specifiers(&mut self) -> bool {
        self.pos += 1;
        let mut ch = self.comment_whitespace(true);
        loop {
            let name_start = self.pos;
            if is_quote(ch) {
                self.string_literal(ch);
                if self.failed() {
                    return false;
                }
                self.pos += 1;
            } else {
                self.read_to_ws_or_punctuator();
            }
            let name_end = self.pos;
            self.comment_whitespace(true);
            ch = self.read_export_as(name_start, name_end);
            if self.failed() {
                return false;
            }
            if ch == COMMA {
                self.pos += 1;
                ch = self.comment_whitespace(true);
            }
            if ch == CLOSE_BRACE {
                return true;
            }
            if self.pos == name_start || self.pos >= self.len {
                self.syntax_error(LexErrorKind::MalformedStatement);
                return false;
            }
        }
    }

    /// Record one export specifier, reading an `as <name>` alias when the
    /// cursor is on one. `name_start..name_end` is the local name, empty for
    /// `export * as ns`.
    fn read_export_as(&mut self, name_start: usize, name_end: usize) -> u16 {
        let mut ch = self.cur();
        let local = (name_start != name_end).then(|| self.range(name_start, name_end));
        let mut exported_start = name_start;
        let mut exported_end = name_end;

        if ch == A_LOWER && self.peek(1) == S_LOWER {
            self.pos += 2;
            ch = self.comment_whitespace(true);
            exported_start = self.pos;
            if is_quote(ch) {
                self.string_literal(ch);
                if self.failed() {
                    return NULL_CHARACTER;
                }
                self.pos += 1;
            } else {
                self.read_to_ws_or_punctuator();
            }
            exported_end = self.pos;
            ch = self.comment_whitespace(true);
        }

        if self.pos != exported_start {
            self.add_export(self.range(exported_start, exported_end), local);
        }
        ch
    }

    fn export_declaration(&mut self, ch: u16) {
        match ch {
            D_LOWER if self.matches_at(self.pos + 1, "efault") => self.export_default(),
            A_LOWER if self.matches_at(self.pos + 1, "sync") && is_ws_not_br(self.peek(5)) => {
                self.pos += 5;
                let ch = self.comment_whitespace(false);
                if ch == F_LOWER && self.matches_at(self.pos + 1, "unction") {
                    self.export_function();
                } else {
                    self.back();
                }
            }
            F_LOWER if self.matches_at(self.pos + 1, "unction") => self.export_function(),
            C_LOWER if self.matches_at(self.pos + 1, "lass") && is_br_or_ws_or_punctuator_not_dot(self.peek(5)) => {
                self.pos += 5;
                self.comment_whitespace(true);
                self.export_declared_name();
                self.next_brace_is_class = true;
            }
            C_LOWER if self.matches_at(self.pos + 1, "onst") => {
                self.pos += 5;
                self.export_bindings();
            }
            V_LOWER if self.matches_at(self.pos + 1, "ar") => {
                self.pos += 3;
                self.export_bindings();
            }
            L_LOWER if self.matches_at(self.pos + 1, "et") => {
                self.pos += 3;
                self.export_bindings();
            }
            // `export enum`, `export type` and other forms carry no bindings
            // the lexer tracks.
            _ => self.back(),
        }
    }

    /// `function name`, `function* name`, entered on the `f`.
    fn export_function(&mut self) {
        self.pos += 8;
        if self.comment_whitespace(true) == ASTERISK {
            self.pos += 1;
            self.comment_whitespace(true);
        }
        self.export_declared_name();
    }

    /// Export the identifier under the cursor as both exported and local
    /// name, leaving the cursor on its last unit.
    fn export_declared_name(&mut self) {
        let name_start = self.pos;
        self.read_to_ws_or_punctuator();
        if self.pos > name_start {
            let name = self.range(name_start, self.pos);
            self.add_export(name, Some(name));
        }
        self.back();
    }

    /// `export default ...`, entered on the `d`.
    fn export_default(&mut self) {
        let default_start = self.pos;
        let exported = self.range(default_start, default_start + 7);
        self.pos += 7;
        let mut ch = self.comment_whitespace(true);

        let mut named = false;
        let mut class = false;
        if ch == A_LOWER && self.matches_at(self.pos + 1, "sync") && is_ws_not_br(self.peek(5)) {
            self.pos += 5;
            ch = self.comment_whitespace(false);
        }
        if ch == F_LOWER && self.matches_at(self.pos + 1, "unction") {
            let next = self.peek(8);
            if is_br_or_ws(next) || next == ASTERISK || next == OPEN_PAREN {
                self.pos += 8;
                ch = self.comment_whitespace(true);
                if ch == ASTERISK {
                    self.pos += 1;
                    ch = self.comment_whitespace(true);
                }
                named = ch != OPEN_PAREN;
            }
        } else if ch == C_LOWER && self.matches_at(self.pos + 1, "lass") {
            let next = self.peek(5);
            if is_br_or_ws(next) || next == OPEN_BRACE {
                self.pos += 5;
                ch = self.comment_whitespace(true);
                class = true;
                named = ch != OPEN_BRACE
                    && !(self.matches_at(self.pos, "extends") && is_br_or_ws(self.peek(7)));
            }
        }

        if named {
            let local_start = self.pos;
            self.read_to_ws_or_punctuator();
            if self.pos > local_start {
                let local = self.range(local_start, self.pos);
                self.add_export(exported, Some(local));
                self.next_brace_is_class = class;
                self.back();
                return;
            }
        }
        self.add_export(exported, None);
        // Resume on the keyword so the main loop still sees what follows it.
        self.pos = default_start + 6;
    }

    /// `var`/`let`/`const` bindings, entered just past the keyword. Only plain
    /// names and single-level `{}`/`[]` patterns without defaults or aliases
    /// are exported; anything after `=` is left to the main loop.
    fn export_bindings(&mut self) {
        self.comment_whitespace(true);
        let first_export = self.exports.len();
        let mut name_start = self.pos;
        let mut ch = self.read_to_ws_or_punctuator();
        let pattern_start = self.pos;
        let mut destructuring = ch == OPEN_BRACE || ch == OPEN_BRACKET;
        if destructuring {
            self.pos += 1;
            self.comment_whitespace(true);
            self.skip_spread();
            name_start = self.pos;
            self.read_to_ws_or_punctuator();
        }

        while self.pos != name_start {
            let name = self.range(name_start, self.pos);
            self.add_export(name, Some(name));
            ch = self.comment_whitespace(true);
            if destructuring && (ch == CLOSE_BRACE || ch == CLOSE_BRACKET) {
                destructuring = false;
                break;
            }
            if ch != COMMA {
                self.back();
                break;
            }
            self.pos += 1;
            ch = self.comment_whitespace(true);
            if destructuring {
                ch = self.skip_spread();
            }
            name_start = self.pos;
            // Nested patterns are not followed.
            if ch == OPEN_BRACE || ch == OPEN_BRACKET {
                self.back();
                break;
            }
            self.read_to_ws_or_punctuator();
        }

        if destructuring {
            tracing::trace!(pos = pattern_start, "abandoning destructured export");
            self.exports.truncate(first_export);
            self.pos = pattern_start.saturating_sub(1);
        }
    }

    /// Step over a `...` rest marker.
    fn skip_spread(&mut self) -> u16 {
        if self.cur() == DOT && self.peek(1) == DOT && self.peek(2) == DOT {
            self.pos += 3;
            return self.comment_whitespace(true);
        }
        self.cur()
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::parse_str;
    use esmlex_core::text::SourceText;
    use esmlex_diagnostics::LexErrorKind;

    fn exports(source: &str) -> Vec<(String, Option<String>)> {
        let text = SourceText::new(source);
        parse_str(source)
            .unwrap()
            .exports
            .iter()
            .map(|export| (export.exported_text(&text), export.local_text(&text)))
            .collect()
    }

    fn pair(exported: &str, local: Option<&str>) -> (String, Option<String>) {
        (exported.to_string(), local.map(str::to_string))
    }

    #[test]
    fn test_named_exports() {
        assert_eq!(
            exports("export { a, b as c, d as 'e f', \"g\" as h, i, };"),
            [
                pair("a", Some("a")),
                pair("c", Some("b")),
                pair("'e f'", Some("d")),
                pair("h", Some("\"g\"")),
                pair("i", Some("i")),
            ]
        );
    }

    #[test]
    fn test_empty_named_export() {
        let result = parse_str("export {};").unwrap();
        assert!(result.exports.is_empty());
        assert!(result.has_module_syntax);
        assert!(result.facade);
    }

    #[test]
    fn test_reexport_clears_locals() {
        let source = "export { a, b as c } from './m.js';";
        let result = parse_str(source).unwrap();
        assert!(result.exports.iter().all(|export| export.local.is_none()));
        assert_eq!(result.imports.len(), 1);
        let text = SourceText::new(source);
        assert_eq!(result.imports[0].specifier_text(&text).as_deref(), Some("./m.js"));
        assert_eq!(result.imports[0].statement_text(&text), "export { a, b as c } from './m.js'");
    }

    #[test]
    fn test_star_exports() {
        assert_eq!(
            exports("export * from 'a';\nexport * as ns from 'b';\nexport * as 'x y' from 'c';"),
            [pair("*", None), pair("ns", None), pair("'x y'", None)]
        );
    }

    #[test]
    fn test_default_exports() {
        assert_eq!(exports("export default function foo() {}"), [pair("default", Some("foo"))]);
        assert_eq!(exports("export default async function* gen() {}"), [pair("default", Some("gen"))]);
        assert_eq!(exports("export default class Foo {}"), [pair("default", Some("Foo"))]);
        assert_eq!(exports("export default class extends Base {}"), [pair("default", None)]);
        assert_eq!(exports("export default function () {}"), [pair("default", None)]);
        assert_eq!(exports("export default { a: 1 };"), [pair("default", None)]);
        assert_eq!(exports("export default async () => {};"), [pair("default", None)]);
    }

    #[test]
    fn test_declaration_exports() {
        assert_eq!(
            exports("export function a() {}\nexport async function b() {}\nexport function* c() {}\nexport class D {}"),
            [pair("a", Some("a")), pair("b", Some("b")), pair("c", Some("c")), pair("D", Some("D"))]
        );
    }

    #[test]
    fn test_binding_exports() {
        assert_eq!(
            exports("export var a, b;\nexport let c = 1, d = 2;\nexport const e = function () {};"),
            [pair("a", Some("a")), pair("b", Some("b")), pair("c", Some("c")), pair("e", Some("e"))]
        );
    }

    #[test]
    fn test_destructured_exports() {
        assert_eq!(
            exports("export const { a, b, ...c } = obj;\nexport let [d, e] = arr;"),
            [
                pair("a", Some("a")),
                pair("b", Some("b")),
                pair("c", Some("c")),
                pair("d", Some("d")),
                pair("e", Some("e")),
            ]
        );
    }

    #[test]
    fn test_nested_destructuring_is_skipped() {
        assert!(exports("export const { a, b: { c } } = obj;").is_empty());
        assert!(exports("export const [a, [b]] = arr;").is_empty());
    }

    #[test]
    fn test_declarations_clear_facade() {
        assert!(!parse_str("export const a = 1;").unwrap().facade);
        assert!(!parse_str("export function f() {}").unwrap().facade);
        assert!(parse_str("export { a } from 'a';").unwrap().facade);
    }

    #[test]
    fn test_export_identifiers_are_not_statements() {
        let result = parse_str("exports.a = 1; module.exports = {};").unwrap();
        assert!(result.exports.is_empty());
        assert!(!result.has_module_syntax);
    }

    #[test]
    fn test_malformed_specifier_list() {
        let error = parse_str("export { a + b };").unwrap_err();
        assert_eq!(error.kind, LexErrorKind::MalformedStatement);
    }
}
