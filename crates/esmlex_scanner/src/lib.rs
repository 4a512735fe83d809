//! esmlex_scanner: Import/export lexer for ECMAScript and TypeScript modules.
//!
//! A single forward pass over UTF-16 source that reports the module's
//! imports and exports without building a syntax tree:
//! - Static imports, including `source`/`defer` phases and attributes
//! - Dynamic `import()` calls and `import.meta`
//! - Named, namespace, default and declaration exports
//! - Re-exports, which also produce an import record
//!
//! The input is assumed to be valid source. Regex literals are told apart
//! from division by looking back at the previous token.

mod char_codes;
mod exports;
mod imports;
mod keywords;
mod lexer;
mod literals;
mod nesting;
mod record;
mod regex;

pub use lexer::{parse, parse_str, parse_with_options, ModuleLexer, ParseError};
pub use record::{Export, Import, ImportKind, ImportPhase, ModuleLexResult};

pub use esmlex_diagnostics::{LexError, LexErrorKind};
pub use esmlex_options::{LexerOptions, OptionsError};
