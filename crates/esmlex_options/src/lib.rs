//! esmlex_options: Lexer configuration.
//!
//! The lexer keeps its bracket and dynamic-import stacks bounded so that
//! worst-case memory stays fixed for untrusted input. The bounds live here
//! and can be loaded from JSON (`{"maxNestingDepth": 2048}`).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default bound on simultaneously open brackets, braces and templates.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 1024;

/// Default bound on simultaneously open dynamic `import(` calls.
pub const DEFAULT_MAX_DYNAMIC_IMPORT_DEPTH: usize = 512;

/// Lexer options, matching the JSON options schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LexerOptions {
    /// Maximum depth of the open-token stack.
    pub max_nesting_depth: usize,
    /// Maximum depth of the pending dynamic import stack.
    pub max_dynamic_import_depth: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_dynamic_import_depth: DEFAULT_MAX_DYNAMIC_IMPORT_DEPTH,
        }
    }
}

impl LexerOptions {
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_max_dynamic_import_depth(mut self, depth: usize) -> Self {
        self.max_dynamic_import_depth = depth;
        self
    }

    /// Reject bounds that would make every non-trivial input fail.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_nesting_depth == 0 {
            return Err(OptionsError::ZeroBound("maxNestingDepth"));
        }
        if self.max_dynamic_import_depth == 0 {
            return Err(OptionsError::ZeroBound("maxDynamicImportDepth"));
        }
        Ok(())
    }
}

/// Errors raised while loading options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("option '{0}' must be greater than zero")]
    ZeroBound(&'static str),
}

/// Parse and validate options from a JSON string.
pub fn parse_options(content: &str) -> Result<LexerOptions, OptionsError> {
    let options: LexerOptions = serde_json::from_str(content)?;
    options.validate()?;
    Ok(options)
}

/// Parse and validate options from a JSON file.
pub fn parse_options_file(path: impl AsRef<Path>) -> Result<LexerOptions, OptionsError> {
    let content = std::fs::read_to_string(path)?;
    parse_options(&content)
}
