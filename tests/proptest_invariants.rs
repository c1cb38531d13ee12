//! Property-based invariant tests for the message parser.
//!
//! 1. The grammar terminates (and never panics) on arbitrary input,
//!    including adversarial brace runs.
//! 2. A top-level parse always yields a Concat.
//! 3. On template-free, escape-free text the fast substitution path and
//!    the grammar path agree.
//! 4. The fast path is identity when no placeholder is present.
//! 5. Pure-literal trees survive a render/re-parse round trip.

use proptest::prelude::*;
use wikimsg::ast::Node;
use wikimsg::emit::{Emitter, PlainEmitter};
use wikimsg::{simple_parse, syntax};

/// Text with none of the grammar's special characters and no `$`, so
/// both rendering paths must treat it identically.
const PLAIN: &str = "[a-zA-Z0-9 ,.!?:|'-]{0,24}";

/// Like `PLAIN` but never digit-leading, so appending it after a `$N`
/// placeholder cannot change which digits belong to the placeholder.
const PLAIN_TAIL: &str = "([a-zA-Z ,.!?:|'-][a-zA-Z0-9 ,.!?:|'-]{0,23})?";

proptest! {
    #[test]
    fn grammar_terminates_on_arbitrary_input(message in "\\PC{0,64}") {
        let tree = syntax::ast(&message).unwrap();
        prop_assert!(matches!(tree, Node::Concat(_)));
    }

    #[test]
    fn grammar_terminates_on_brace_runs(
        open in 0usize..24,
        close in 0usize..24,
        middle in PLAIN,
    ) {
        let message = format!("{}{}{}", "{{".repeat(open), middle, "}}".repeat(close));
        let _ = syntax::ast(&message).unwrap();
    }

    #[test]
    fn fast_and_grammar_paths_agree_on_plain_messages(
        before in PLAIN,
        index in 0usize..4,
        after in PLAIN_TAIL,
        p1 in "[a-z]{0,6}",
        p2 in "[a-z]{0,6}",
    ) {
        let message = format!("{before}${index}{after}");
        let params = [p1.as_str(), p2.as_str()];

        let fast = simple_parse(&message, &params);
        let tree = syntax::ast(&message).unwrap();
        let slow = PlainEmitter.emit(&tree, &params);
        prop_assert_eq!(fast, slow);
    }

    #[test]
    fn fast_path_is_identity_without_placeholders(message in PLAIN) {
        prop_assert_eq!(simple_parse(&message, &["x", "y"]), message);
    }

    #[test]
    fn pure_literal_trees_round_trip(text in "[ -~]{0,32}") {
        let tree = Node::Concat(vec![Node::literal(text.clone())]);
        let reparsed = syntax::ast(&tree.pretty()).unwrap();
        if text.is_empty() {
            prop_assert_eq!(reparsed, Node::Concat(vec![]));
        } else {
            prop_assert_eq!(reparsed, Node::Concat(vec![Node::literal(text)]));
        }
    }
}
