//! Emitter seam.
//!
//! Rendering a parsed tree to final text is the job of an external
//! collaborator that knows per-language plural and gender rules; this
//! crate owns only the trait it plugs into, plus a minimal reference
//! implementation with no localization logic at all.

use crate::ast::Node;

/// Renders a parsed message tree to final text.
///
/// Implementations resolve [`Node::TemplateCall`]s whose names they
/// recognize (PLURAL, GENDER, grammar-case transforms, ...) using
/// their own language-rule tables, and choose their own fallback for
/// unknown names.
pub trait Emitter {
    fn emit(&self, node: &Node, params: &[&str]) -> String;
}

/// Reference emitter with no language rules.
///
/// Literals render verbatim, replacements resolve against `params`
/// with out-of-range indexes left as their `$N` source text, and every
/// template call is treated as unknown and rendered as bracketed raw
/// text with its arguments emitted in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainEmitter;

impl Emitter for PlainEmitter {
    fn emit(&self, node: &Node, params: &[&str]) -> String {
        match node {
            Node::Concat(children) => children.iter().map(|child| self.emit(child, params)).collect(),
            Node::Replace(index) => match params.get(*index) {
                Some(value) => (*value).to_string(),
                None => format!("${}", index + 1),
            },
            Node::TemplateCall { name, args } => {
                let mut out = String::from("{{");
                out.push_str(name);
                for (i, arg) in args.iter().enumerate() {
                    out.push(if i == 0 { ':' } else { '|' });
                    out.push_str(&self.emit(arg, params));
                }
                out.push_str("}}");
                out
            }
            Node::Literal(text) => text.clone(),
        }
    }
}
