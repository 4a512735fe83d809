//! The module lexer.
//!
//! A single forward pass over UTF-16 code units. The cursor always points at
//! the last consumed unit: sub-scanners leave it on the final unit of the
//! construct they consumed (closing quote, closing slash, ...) and the main
//! loop steps past it. Reads beyond the buffer yield `0`, which never
//! matches anything the lexer looks for.

use crate::char_codes::*;
use crate::keywords::{self, keyword_start, matches_at};
use crate::nesting::{OpenToken, OpenTokenKind};
use crate::record::{Export, Import, ModuleLexResult};
use esmlex_core::text::TextRange;
use esmlex_diagnostics::{LexError, LexErrorKind};
use esmlex_options::LexerOptions;

/// A dynamic import whose `)` has not been seen yet.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingImport {
    /// Index into `ModuleLexer::imports`.
    pub index: usize,
    /// Where the first argument starts.
    pub argument_start: usize,
}

mod parse_error {
    // Kept out of the lexer's scope: the `char_codes::*` glob brings in a
    // `_0` constant that collides with the bindings `thiserror` generates.
    use esmlex_diagnostics::LexError;
    use esmlex_options::OptionsError;
    use thiserror::Error;

    /// Failure of [`parse_with_options`](super::parse_with_options): the options were rejected before any
    /// input was read, or lexing itself failed.
    #[derive(Debug, Error)]
    pub enum ParseError {
        #[error(transparent)]
        Options(#[from] OptionsError),
        #[error(transparent)]
        Lex(#[from] LexError),
    }

    impl ParseError {
        /// The lexing error, if the options were accepted.
        pub fn lex_error(&self) -> Option<LexError> {
            match self {
                ParseError::Lex(error) => Some(*error),
                ParseError::Options(_) => None,
            }
        }
    }
}

pub use parse_error::ParseError;

/// Parse state for one lexing run over a borrowed source buffer.
pub struct ModuleLexer<'a> {
    pub(crate) src: &'a [u16],
    pub(crate) len: usize,
    /// Current cursor.
    pub(crate) pos: usize,
    pub(crate) options: LexerOptions,
    /// Position of the most recent significant code unit.
    pub(crate) last_token: Option<usize>,
    pub(crate) last_slash_was_division: bool,
    /// Set by a `class` keyword; decides the kind of the next `{`.
    pub(crate) next_brace_is_class: bool,
    pub(crate) open_tokens: Vec<OpenToken>,
    /// The token most recently popped off `open_tokens`.
    pub(crate) last_closed: Option<OpenToken>,
    pub(crate) dynamic_imports: Vec<PendingImport>,
    pub(crate) imports: Vec<Import>,
    pub(crate) exports: Vec<Export>,
    /// Whether the last appended import may still be retracted.
    pub(crate) import_undo_slot: bool,
    pub(crate) facade: bool,
    pub(crate) has_module_syntax: bool,
    pub(crate) error: Option<LexError>,
}

impl<'a> ModuleLexer<'a> {
    /// Options are used as given; [`parse_with_options`] validates them first.
    pub fn new(src: &'a [u16], options: LexerOptions) -> Self {
        Self {
            src,
            len: src.len(),
            pos: 0,
            options,
            last_token: None,
            last_slash_was_division: false,
            next_brace_is_class: false,
            open_tokens: Vec::with_capacity(options.max_nesting_depth.min(64)),
            last_closed: None,
            dynamic_imports: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
            import_undo_slot: false,
            facade: true,
            has_module_syntax: false,
            error: None,
        }
    }

    /// Run the lexer to completion.
    pub fn parse(mut self) -> Result<ModuleLexResult, LexError> {
        if self.len > u32::MAX as usize {
            return Err(LexError::new(LexErrorKind::CapacityExceeded, u32::MAX));
        }
        self.scan_module_prefix();
        if self.error.is_none() {
            self.scan_main();
        }
        self.finish()
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    #[inline]
    pub(crate) fn at(&self, index: usize) -> u16 {
        keywords::unit(self.src, index)
    }

    #[inline]
    pub(crate) fn cur(&self) -> u16 {
        self.at(self.pos)
    }

    #[inline]
    pub(crate) fn peek(&self, offset: usize) -> u16 {
        self.at(self.pos + offset)
    }

    /// Advance by one unit; false once the cursor has left the buffer.
    #[inline]
    pub(crate) fn bump(&mut self) -> bool {
        self.pos += 1;
        self.pos < self.len
    }

    /// Step back one unit without underflowing.
    #[inline]
    pub(crate) fn back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// The code unit at `last_token`, or `0` at the start of input.
    #[inline]
    pub(crate) fn last(&self) -> u16 {
        self.last_token.map_or(NULL_CHARACTER, |pos| self.at(pos))
    }

    #[inline]
    pub(crate) fn matches_at(&self, index: usize, word: &str) -> bool {
        matches_at(self.src, index, word)
    }

    #[inline]
    pub(crate) fn range(&self, pos: usize, end: usize) -> TextRange {
        TextRange::new(pos as u32, end.max(pos) as u32)
    }

    /// Record the first error and move the cursor to the end of input.
    pub(crate) fn fail(&mut self, kind: LexErrorKind, offset: usize) {
        if self.error.is_none() {
            let offset = offset.min(self.len) as u32;
            tracing::debug!(?kind, offset, "module lexing failed");
            self.error = Some(LexError::new(kind, offset));
        }
        self.pos = self.len;
    }

    /// Fail at the current cursor.
    #[inline]
    pub(crate) fn syntax_error(&mut self, kind: LexErrorKind) {
        self.fail(kind, self.pos);
    }

    #[inline]
    pub(crate) fn failed(&self) -> bool {
        self.error.is_some()
    }

    // ========================================================================
    // Records
    // ========================================================================

    pub(crate) fn add_import(&mut self, import: Import) -> usize {
        tracing::trace!(kind = ?import.kind, start = import.statement_start, "import");
        if import.kind.is_module_syntax() {
            self.has_module_syntax = true;
        }
        self.imports.push(import);
        self.import_undo_slot = true;
        self.imports.len() - 1
    }

    pub(crate) fn add_export(&mut self, exported: TextRange, local: Option<TextRange>) {
        tracing::trace!(%exported, "export");
        self.has_module_syntax = true;
        self.exports.push(Export { exported, local });
    }

    // ========================================================================
    // Main loops
    // ========================================================================

    /// The facade pre-pass: only top-level `import`, `export`, `;` and
    /// comments. Returns at the first other token with the cursor still on
    /// it, so the main pass picks up exactly where this one stopped.
    fn scan_module_prefix(&mut self) {
        while self.pos < self.len && !self.failed() {
            let ch = self.cur();
            if is_br_or_ws(ch) {
                self.pos += 1;
                continue;
            }
            match ch {
                E_LOWER => {
                    if self.open_tokens.is_empty()
                        && keyword_start(self.src, self.pos)
                        && self.matches_at(self.pos + 1, "xport")
                    {
                        self.try_parse_export_statement();
                        // A declaration export is not side-effect free.
                        if !self.facade {
                            tracing::trace!(pos = self.pos, "facade cleared by export declaration");
                            self.last_token = Some(self.pos);
                            self.pos += 1;
                            return;
                        }
                    }
                }
                I_LOWER => {
                    if keyword_start(self.src, self.pos) && self.matches_at(self.pos + 1, "mport") {
                        self.try_parse_import_statement();
                    }
                }
                SEMICOLON => {}
                SLASH if self.peek(1) == SLASH => {
                    self.line_comment();
                    self.pos += 1;
                    continue;
                }
                SLASH if self.peek(1) == ASTERISK => {
                    self.block_comment(true);
                    self.pos += 1;
                    continue;
                }
                _ => {
                    tracing::trace!(pos = self.pos, "facade cleared");
                    self.facade = false;
                    return;
                }
            }
            self.last_token = Some(self.pos);
            self.pos += 1;
        }
    }

    fn scan_main(&mut self) {
        while self.pos < self.len && !self.failed() {
            let ch = self.cur();
            if is_br_or_ws(ch) {
                self.pos += 1;
                continue;
            }
            if self.scan_token(ch) {
                self.last_token = Some(self.pos);
            }
            self.pos += 1;
        }
    }

    /// Dispatch one significant code unit. Returns false for comments, which
    /// do not count as the last token.
    fn scan_token(&mut self, ch: u16) -> bool {
        match ch {
            E_LOWER => {
                if self.open_tokens.is_empty()
                    && keyword_start(self.src, self.pos)
                    && self.matches_at(self.pos + 1, "xport")
                {
                    self.try_parse_export_statement();
                }
            }
            I_LOWER => {
                if keyword_start(self.src, self.pos) && self.matches_at(self.pos + 1, "mport") {
                    self.try_parse_import_statement();
                }
            }
            C_LOWER => {
                if keyword_start(self.src, self.pos)
                    && self.matches_at(self.pos + 1, "lass")
                    && is_br_or_ws(self.peek(5))
                {
                    self.next_brace_is_class = true;
                }
            }
            OPEN_PAREN => {
                self.push_open(OpenTokenKind::Paren, self.last_token);
            }
            CLOSE_PAREN => self.close_paren(),
            OPEN_BRACE => self.open_brace(),
            CLOSE_BRACE => self.close_brace(),
            SINGLE_QUOTE | DOUBLE_QUOTE => self.string_literal(ch),
            SLASH => match self.peek(1) {
                SLASH => {
                    self.line_comment();
                    return false;
                }
                ASTERISK => {
                    self.block_comment(true);
                    return false;
                }
                _ => self.scan_slash(),
            },
            BACKTICK => {
                if self.push_open(OpenTokenKind::TemplateLiteral, self.last_token) {
                    self.template_string();
                }
            }
            _ => {}
        }
        true
    }

    fn finish(mut self) -> Result<ModuleLexResult, LexError> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        let kind = if self.open_tokens.iter().any(|token| token.kind.is_template()) {
            Some(LexErrorKind::UnterminatedLiteral)
        } else if !self.dynamic_imports.is_empty() {
            Some(LexErrorKind::UnclosedDynamicImport)
        } else if !self.open_tokens.is_empty() {
            Some(LexErrorKind::UnbalancedBracket)
        } else {
            None
        };
        if let Some(kind) = kind {
            self.fail(kind, self.len);
            return Err(LexError::new(kind, self.len as u32));
        }

        tracing::debug!(
            imports = self.imports.len(),
            exports = self.exports.len(),
            facade = self.facade,
            "module lexed"
        );
        Ok(ModuleLexResult {
            imports: self.imports,
            exports: self.exports,
            facade: self.facade,
            has_module_syntax: self.has_module_syntax,
        })
    }
}

/// Lex a UTF-16 buffer with the default options.
pub fn parse(source: &[u16]) -> Result<ModuleLexResult, LexError> {
    ModuleLexer::new(source, LexerOptions::default()).parse()
}

/// Lex a UTF-16 buffer with caller-supplied bounds. Zero bounds are rejected
/// up front rather than surfacing as `CapacityExceeded` on the first bracket.
pub fn parse_with_options(source: &[u16], options: &LexerOptions) -> Result<ModuleLexResult, ParseError> {
    options.validate()?;
    Ok(ModuleLexer::new(source, *options).parse()?)
}

/// Lex a Rust string. Offsets in the result are UTF-16 code units.
pub fn parse_str(source: &str) -> Result<ModuleLexResult, LexError> {
    let units: Vec<u16> = source.encode_utf16().collect();
    parse(&units)
}
