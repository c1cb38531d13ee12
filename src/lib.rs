//! wikimsg - MediaWiki-style message-template parsing
//!
//! Messages interpolate numbered placeholders (`$1`, `$2`, ...) and may
//! contain nested template calls such as `{{PLURAL:$1|one item|$1 items}}`.
//! The crate parses a message into a tree ([`ast::Node`]) with a
//! hand-built backtracking grammar, or takes a fast single-pass
//! substitution path when no template syntax is present.
//!
//! ```rust
//! assert_eq!(wikimsg::parse("Hello $1", &["World"]), "Hello World");
//! assert_eq!(wikimsg::parse("$5", &[]), "$5");
//! ```
//!
//! Rendering template calls with real per-language plural/gender rules
//! belongs to an external [`emit::Emitter`] implementation; the bundled
//! [`emit::PlainEmitter`] carries no language rules.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub mod ast;
pub mod emit;
pub mod errors;
pub mod syntax;

pub use crate::ast::Node;
pub use crate::emit::{Emitter, PlainEmitter};
pub use crate::errors::ParseError;
pub use crate::syntax::ast;

static NUMBERED_PARAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\d+)").unwrap());

/// Fast-path interpolation for messages without template syntax.
///
/// One linear pass replaces each `$N` with the (N-1)-th replacement
/// value; a `$N` whose index is out of range stays verbatim, so
/// missing parameters degrade to visible placeholders rather than
/// errors.
pub fn simple_parse(message: &str, params: &[&str]) -> String {
    NUMBERED_PARAM
        .replace_all(message, |caps: &Captures<'_>| {
            let number: usize = caps[1].parse().unwrap_or(0);
            match number.checked_sub(1).and_then(|index| params.get(index)) {
                Some(value) => (*value).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Renders a message with the given replacement values and emitter.
///
/// Dispatch: if the message contains no `{{`, the grammar is skipped
/// entirely in favor of [`simple_parse`]. Otherwise the message is
/// parsed and handed to the emitter; should the grammar yield nothing,
/// the message is returned unchanged - there is no fatal error path.
pub fn parse_with<E: Emitter>(message: &str, params: &[&str], emitter: &E) -> String {
    if !message.contains("{{") {
        return simple_parse(message, params);
    }
    match syntax::ast(message) {
        Ok(tree) => emitter.emit(&tree, params),
        Err(_) => message.to_string(),
    }
}

/// [`parse_with`] using the bundled [`PlainEmitter`].
pub fn parse(message: &str, params: &[&str]) -> String {
    parse_with(message, params, &PlainEmitter)
}
