//! esmlex_diagnostics: Error taxonomy and diagnostic reporting.
//!
//! Every failure the lexer can report is one of the [`LexErrorKind`]s below.
//! A [`LexError`] pins a kind to the offset of the first inconsistency; it
//! implements both `std::error::Error` and `miette::Diagnostic`, and can be
//! turned into a plain [`Diagnostic`] for printing against a file name.

use esmlex_core::text::TextRange;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A diagnostic message with its code.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002).
    pub code: u32,
    pub message: &'static str,
    /// A hint shown under the message.
    pub help: &'static str,
}

/// The kinds of failure a parse can end with. All of them are fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LexErrorKind {
    /// A string, template, regex or block comment reached a line break or
    /// the end of input without its terminator.
    UnterminatedLiteral,
    /// A closing bracket without an opener, or an opener left unclosed at
    /// the end of input.
    UnbalancedBracket,
    /// An import or export statement did not match any recognized shape.
    MalformedStatement,
    /// A dynamic `import(` was still open at the end of input.
    UnclosedDynamicImport,
    /// Bracket or dynamic import nesting went past the configured bound.
    CapacityExceeded,
}

impl LexErrorKind {
    /// The message template for this kind.
    pub fn message(self) -> &'static DiagnosticMessage {
        match self {
            LexErrorKind::UnterminatedLiteral => &messages::UNTERMINATED_LITERAL,
            LexErrorKind::UnbalancedBracket => &messages::UNBALANCED_BRACKET,
            LexErrorKind::MalformedStatement => &messages::MALFORMED_STATEMENT,
            LexErrorKind::UnclosedDynamicImport => &messages::UNCLOSED_DYNAMIC_IMPORT,
            LexErrorKind::CapacityExceeded => &messages::CAPACITY_EXCEEDED,
        }
    }

    /// The stable numeric code for this kind.
    #[inline]
    pub fn code(self) -> u32 {
        self.message().code
    }

    /// Whether this kind is a resource bound rather than a grammar problem.
    #[inline]
    pub fn is_resource_error(self) -> bool {
        self == LexErrorKind::CapacityExceeded
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().message)
    }
}

/// A fatal lexing error at a code unit offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize)]
#[error("{kind} (at offset {offset})")]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// UTF-16 code unit offset of the first detected inconsistency.
    pub offset: u32,
}

impl LexError {
    pub fn new(kind: LexErrorKind, offset: u32) -> Self {
        Self { kind, offset }
    }

    /// Realize this error as a located diagnostic, optionally for `file`.
    pub fn to_diagnostic(&self, file: Option<&str>) -> Diagnostic {
        let message = self.kind.message();
        Diagnostic {
            file: file.map(str::to_string),
            span: TextRange::empty(self.offset),
            message_text: message.message.to_string(),
            code: message.code,
        }
    }
}

impl miette::Diagnostic for LexError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!("esmlex::E{}", self.kind.code())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.kind.message().help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let label = miette::LabeledSpan::at_offset(self.offset as usize, "here");
        Some(Box::new(std::iter::once(label)))
    }
}

/// A located error message, ready to print or serialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The file the source came from, if known.
    pub file: Option<String>,
    pub span: TextRange,
    pub message_text: String,
    pub code: u32,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}({}): ", file, self.span.pos)?;
        }
        write!(f, "error E{}: {}", self.code, self.message_text)
    }
}

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr, $help:expr) => {
            DiagnosticMessage {
                code: $code,
                message: $msg,
                help: $help,
            }
        };
    }

    pub const UNTERMINATED_LITERAL: DiagnosticMessage = diag!(
        1002,
        "Unterminated literal or comment.",
        "strings and regular expressions must close before the end of the line"
    );
    pub const UNBALANCED_BRACKET: DiagnosticMessage = diag!(
        1005,
        "Unbalanced bracket nesting.",
        "every '(', '{' and '`' needs a matching closer"
    );
    pub const MALFORMED_STATEMENT: DiagnosticMessage = diag!(
        1012,
        "Malformed import or export statement.",
        "a named import clause must be followed by 'from' and a string specifier"
    );
    pub const UNCLOSED_DYNAMIC_IMPORT: DiagnosticMessage = diag!(
        1013,
        "Unclosed dynamic import.",
        "an 'import(' call is still open at the end of input"
    );
    pub const CAPACITY_EXCEEDED: DiagnosticMessage = diag!(
        1014,
        "Nesting capacity exceeded.",
        "raise maxNestingDepth or maxDynamicImportDepth in the lexer options"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LexError::new(LexErrorKind::UnterminatedLiteral, 7);
        assert_eq!(err.to_string(), "Unterminated literal or comment. (at offset 7)");
        assert_eq!(err.kind.code(), 1002);
    }

    #[test]
    fn test_codes_are_distinct() {
        let kinds = [
            LexErrorKind::UnterminatedLiteral,
            LexErrorKind::UnbalancedBracket,
            LexErrorKind::MalformedStatement,
            LexErrorKind::UnclosedDynamicImport,
            LexErrorKind::CapacityExceeded,
        ];
        let mut codes: Vec<u32> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(kinds.iter().filter(|k| k.is_resource_error()).count() == 1);
    }

    #[test]
    fn test_miette_metadata() {
        use miette::Diagnostic as _;
        let err = LexError::new(LexErrorKind::CapacityExceeded, 3);
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("esmlex::E1014"));
        let labels: Vec<_> = err.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 3);
    }

    #[test]
    fn test_to_diagnostic() {
        let error = LexError::new(LexErrorKind::UnbalancedBracket, 4);
        let diagnostic = error.to_diagnostic(Some("a.js"));
        assert_eq!(diagnostic.span, TextRange::empty(4));
        assert_eq!(diagnostic.to_string(), "a.js(4): error E1005: Unbalanced bracket nesting.");

        let diagnostic = error.to_diagnostic(None);
        assert_eq!(diagnostic.file, None);
        assert_eq!(diagnostic.to_string(), "error E1005: Unbalanced bracket nesting.");
    }
}
