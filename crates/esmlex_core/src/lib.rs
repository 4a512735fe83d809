//! esmlex_core: Core utilities for the esmlex module lexer.
//!
//! Provides text ranges and the owned UTF-16 source buffer used throughout
//! the workspace.

pub mod text;

// Re-export commonly used types
pub use text::{SourceText, TextPos, TextRange};
