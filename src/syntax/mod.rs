//! Syntax layer: combinator primitives and the message grammar.
//!
//! `combinators` knows nothing about message syntax; `grammar` composes
//! it into the actual rules. The public surface is [`ast`].

pub(crate) mod combinators;
pub mod grammar;

pub use grammar::ast;
