//! Import and export records produced by the lexer.

use esmlex_core::text::{SourceText, TextRange};
use serde::Serialize;

/// Which module phase an import requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImportPhase {
    /// A regular, fully evaluated import.
    Evaluation,
    /// `import source x from '...'` / `import.source('...')`.
    Source,
    /// `import defer * as x from '...'` / `import.defer('...')`.
    Defer,
}

impl ImportPhase {
    pub(crate) fn static_kind(self) -> ImportKind {
        match self {
            ImportPhase::Evaluation => ImportKind::Static,
            ImportPhase::Source => ImportKind::StaticSourcePhase,
            ImportPhase::Defer => ImportKind::StaticDeferPhase,
        }
    }

    pub(crate) fn dynamic_kind(self) -> ImportKind {
        match self {
            ImportPhase::Evaluation => ImportKind::Dynamic,
            ImportPhase::Source => ImportKind::DynamicSourcePhase,
            ImportPhase::Defer => ImportKind::DynamicDeferPhase,
        }
    }
}

/// The syntactic form an import record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImportKind {
    /// `import ... from '...'`, `import '...'` and `export ... from '...'`.
    Static,
    /// `import(...)`.
    Dynamic,
    /// `import.meta`.
    ImportMeta,
    StaticSourcePhase,
    StaticDeferPhase,
    DynamicSourcePhase,
    DynamicDeferPhase,
}

impl ImportKind {
    #[inline]
    pub fn is_dynamic(self) -> bool {
        matches!(
            self,
            ImportKind::Dynamic | ImportKind::DynamicSourcePhase | ImportKind::DynamicDeferPhase
        )
    }

    /// Static and `import.meta` forms only appear in module code.
    #[inline]
    pub fn is_module_syntax(self) -> bool {
        !self.is_dynamic()
    }

    pub fn phase(self) -> ImportPhase {
        match self {
            ImportKind::StaticSourcePhase | ImportKind::DynamicSourcePhase => ImportPhase::Source,
            ImportKind::StaticDeferPhase | ImportKind::DynamicDeferPhase => ImportPhase::Defer,
            _ => ImportPhase::Evaluation,
        }
    }
}

/// One import statement, dynamic import call or `import.meta` occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    pub kind: ImportKind,
    /// Offset of the `import` (or `export`, for re-exports) keyword.
    pub statement_start: u32,
    /// End of the statement: after the specifier's closing quote or the
    /// attributes' `}` for static imports, after `)` for dynamic imports,
    /// after `meta` for `import.meta`.
    pub statement_end: u32,
    /// The specifier string contents, without quotes. `None` when the
    /// specifier is not a plain string literal.
    pub specifier: Option<TextRange>,
    /// The raw first argument of a dynamic import.
    pub argument: Option<TextRange>,
    /// Offset of the `(` of a dynamic import.
    pub dynamic_start: Option<u32>,
    /// Offset of the `{` of a `with`/`assert` clause, or of the options
    /// argument of a dynamic import.
    pub attributes_start: Option<u32>,
    /// Whether the specifier is statically known: always for static
    /// imports, and for dynamic imports whose first argument is a string.
    pub safe: bool,
}

impl Import {
    #[inline]
    pub fn statement(&self) -> TextRange {
        TextRange::new(self.statement_start, self.statement_end)
    }

    pub fn statement_text(&self, source: &SourceText) -> String {
        source.slice(self.statement())
    }

    /// The raw specifier text (escape sequences are not decoded).
    pub fn specifier_text(&self, source: &SourceText) -> Option<String> {
        self.specifier.map(|range| source.slice(range))
    }
}

/// One exported binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Export {
    /// The exported name as written (string names keep their quotes).
    /// `default` for default exports, `*` for a bare star re-export.
    pub exported: TextRange,
    /// The local binding, absent for expression defaults and re-exports.
    pub local: Option<TextRange>,
}

impl Export {
    pub fn exported_text(&self, source: &SourceText) -> String {
        source.slice(self.exported)
    }

    pub fn local_text(&self, source: &SourceText) -> Option<String> {
        self.local.map(|range| source.slice(range))
    }
}

/// Everything a successful parse reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleLexResult {
    /// Imports in source order.
    pub imports: Vec<Import>,
    /// Exports in source order.
    pub exports: Vec<Export>,
    /// True when the module consists only of import/export statements,
    /// comments and whitespace.
    pub facade: bool,
    /// True when a static import, `import.meta` or export was seen.
    pub has_module_syntax: bool,
}
