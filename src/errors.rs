//! Error types for the public parsing surface.
//!
//! Inside the grammar, failure is the in-band `None` sentinel and is
//! always locally recoverable by backtracking; nothing in this module
//! is ever raised from within a rule. `ParseError` exists only so
//! callers of [`crate::syntax::ast`] can tell "no tree" apart from a
//! tree and fall back to the raw message string.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The start rule produced no tree at all. This should not happen
    /// for any finite input, since the start rule accepts even an
    /// empty message; callers seeing it should render the original
    /// string unchanged.
    #[error("message could not be parsed as a template expression")]
    Unparseable,
}
