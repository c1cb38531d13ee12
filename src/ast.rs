//! AST module for wikimsg messages
//!
//! This module provides the node types produced by the message grammar:
//! a message is parsed into a tree of concatenations, numbered
//! replacements, template calls and literal text.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A node of the parsed message tree.
///
/// A successful top-level parse always yields a `Concat`, even for a
/// single expression or an empty message. Nodes are immutable once built;
/// the tree lives for a single parse call and is never cached.
///
/// # Examples
///
/// ```rust
/// use wikimsg::ast::Node;
/// let node = Node::Replace(0); // source "$1"
/// assert_eq!(node.pretty(), "$1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Node {
    /// Adjacent expressions, rendered in order and joined.
    Concat(Vec<Node>),
    /// Numbered placeholder. Source `$1` is stored as index 0.
    Replace(usize),
    /// A `{{NAME:arg|arg}}` directive. Arguments are resolved at render
    /// time by the emitter; the parser only records them in order.
    TemplateCall { name: String, args: Vec<Node> },
    /// Plain text, used directly as an argument or concatenation child.
    Literal(String),
}

// ============================================================================
// PUBLIC API IMPLEMENTATION
// ============================================================================

impl Node {
    /// Builds a literal node from anything string-like.
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal(text.into())
    }

    /// Builds a template call node.
    pub fn template(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::TemplateCall {
            name: name.into(),
            args,
        }
    }

    /// True for the empty concatenation, the tree of an empty message.
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Concat(children) if children.is_empty())
    }

    /// Renders the node back to message-template source text.
    ///
    /// Literal text is re-escaped, so characters the grammar treats
    /// specially (`{ } [ ] $ \`) survive a render/parse round trip.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wikimsg::ast::Node;
    /// let call = Node::template(
    ///     "PLURAL",
    ///     vec![Node::Replace(0), Node::literal("apple"), Node::literal("apples")],
    /// );
    /// assert_eq!(call.pretty(), "{{PLURAL:$1|apple|apples}}");
    /// ```
    pub fn pretty(&self) -> String {
        match self {
            Node::Concat(children) => children.iter().map(Node::pretty).collect(),
            Node::Replace(index) => format!("${}", index + 1),
            Node::TemplateCall { name, args } => {
                let mut out = String::from("{{");
                out.push_str(name);
                for (i, arg) in args.iter().enumerate() {
                    // First argument is colon-separated, the rest are params.
                    out.push(if i == 0 { ':' } else { '|' });
                    out.push_str(&arg.pretty());
                }
                out.push_str("}}");
                out
            }
            Node::Literal(text) => escape_literal(text),
        }
    }
}

/// Backslash-escapes the characters the grammar reserves.
fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '{' | '}' | '[' | ']' | '$' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_index_is_zero_based() {
        assert_eq!(Node::Replace(0).pretty(), "$1");
        assert_eq!(Node::Replace(41).pretty(), "$42");
    }

    #[test]
    fn pretty_escapes_reserved_characters() {
        let node = Node::literal("a {b} $5 \\");
        assert_eq!(node.pretty(), "a \\{b\\} \\$5 \\\\");
    }

    #[test]
    fn pretty_renders_nested_calls() {
        let node = Node::template(
            "GRAMMAR",
            vec![Node::literal("genitive"), Node::template("SITENAME", vec![])],
        );
        assert_eq!(node.pretty(), "{{GRAMMAR:genitive|{{SITENAME}}}}");
    }

    #[test]
    fn empty_concat_is_empty() {
        assert!(Node::Concat(vec![]).is_empty());
        assert!(!Node::Concat(vec![Node::literal("x")]).is_empty());
    }
}
