//! The message grammar.
//!
//! Builds the syntax-specific rules out of the combinator primitives:
//! escapes, three literal flavors, numbered replacements, and the
//! `{{NAME:arg|arg}}` template-call form, culminating in the `start`
//! rule that wraps a message in a single concatenation node.
//!
//! Rule ordering is load-bearing. Every `choice` lists the more
//! specific alternative first (escape before bare literal, template
//! before replacement before literal, replacement-form template
//! contents before the colon-less form); reordering changes which
//! inputs parse as templates versus plain text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Node;
use crate::errors::ParseError;
use crate::syntax::combinators::{choice, n_or_more, sequence, transform, Rule, Scan};

// ============================================================================
// CHARACTER CLASSES
// ============================================================================

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\d+").unwrap());

/// Any single character except a line terminator, for the escape rule.
static ANY_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A.").unwrap());

/// One character of plain text. Braces, brackets, `$` and `\` are all
/// syntax and must be escaped to appear literally.
static REGULAR_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[^{}\[\]$\\]").unwrap());

/// Plain text inside a template parameter, where `|` delimits.
static LITERAL_NO_BAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[^{}\[\]$\\|]").unwrap());

/// Plain text where a bare space-delimited token is required.
static LITERAL_NO_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[^{}\[\]$\s]").unwrap());

/// Characters allowed in a template name (the MediaWiki legal-title
/// set plus the high Latin-1 range). Colon is excluded so the parser
/// can find the name/replacement boundary in `PLURAL:$1`.
static TEMPLATE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\A[ !"$&'()*,./0-9;=?@A-Z^_`a-z~\x80-\xFF+\-]+"#).unwrap());

// ============================================================================
// PUBLIC ENTRY
// ============================================================================

/// Parses a message into its tree form.
///
/// A successful parse always yields [`Node::Concat`], even for a single
/// expression or an empty message. Parsing is deliberately lenient: the
/// start rule accepts zero or more expressions and a trailing suffix
/// that matches no grammar production is dropped from the tree rather
/// than reported. Callers that need the raw text on failure should fall
/// back to the original string.
///
/// # Examples
///
/// ```rust
/// use wikimsg::ast::Node;
/// use wikimsg::syntax::ast;
///
/// let tree = ast("{{PLURAL:$1|apple|apples}}").unwrap();
/// assert_eq!(
///     tree,
///     Node::Concat(vec![Node::template(
///         "PLURAL",
///         vec![Node::Replace(0), Node::literal("apple"), Node::literal("apples")],
///     )]),
/// );
/// ```
pub fn ast(message: &str) -> Result<Node, ParseError> {
    let mut scan = Scan::new(message);
    start(&mut scan).ok_or(ParseError::Unparseable)
}

// ============================================================================
// GRAMMAR RULES
// ============================================================================

/// start = expression*
fn start(scan: &mut Scan<'_>) -> Option<Node> {
    let expressions = n_or_more(scan, 0, expression)?;
    Some(Node::Concat(expressions))
}

/// expression = template | replacement | literal
fn expression(scan: &mut Scan<'_>) -> Option<Node> {
    let rules: &[Rule<'_, Node>] = &[
        template as Rule<'_, Node>,
        replacement as Rule<'_, Node>,
        literal_node as Rule<'_, Node>,
    ];
    choice(scan, rules)
}

/// paramExpression = template | replacement | literalNoBar
///
/// Inside a parameter `|` must terminate the literal instead of being
/// consumed by it; otherwise identical to `expression`.
fn param_expression(scan: &mut Scan<'_>) -> Option<Node> {
    let rules: &[Rule<'_, Node>] = &[
        template as Rule<'_, Node>,
        replacement as Rule<'_, Node>,
        literal_no_bar_node as Rule<'_, Node>,
    ];
    choice(scan, rules)
}

/// template = "{{" templateContents "}}"
///
/// Fully backtracking: a `{{` that does not resolve to a valid call is
/// rolled back so the enclosing choice can try another reading.
fn template(scan: &mut Scan<'_>) -> Option<Node> {
    sequence(scan, |scan| {
        scan.eat_str("{{")?;
        let contents = template_contents(scan)?;
        scan.eat_str("}}")?;
        Some(contents)
    })
}

/// templateContents = (name ":" (replacement | paramExpression) param*)
///                  | (name param*)
fn template_contents(scan: &mut Scan<'_>) -> Option<Node> {
    let rules: &[Rule<'_, Node>] = &[
        contents_with_first_arg as Rule<'_, Node>,
        contents_bare as Rule<'_, Node>,
    ];
    choice(scan, rules)
}

/// Covers both `{{PLURAL:$1|one car|$1 cars}}` and first arguments that
/// are arbitrary expressions, e.g. `{{GRAMMAR:genitive|{{SITENAME}}}}`.
/// The direct-replacement reading is tried first, being more specific.
fn contents_with_first_arg(scan: &mut Scan<'_>) -> Option<Node> {
    sequence(scan, |scan| {
        let name = template_name(scan)?;
        scan.eat_str(":")?;
        let first_arg_rules: &[Rule<'_, Node>] = &[
            replacement as Rule<'_, Node>,
            param_expression as Rule<'_, Node>,
        ];
        let first = choice(scan, first_arg_rules)?;
        let mut args = vec![first];
        args.extend(n_or_more(scan, 0, template_param)?);
        Some(Node::template(name, args))
    })
}

/// Colon-less invocation, e.g. the parameterless `{{SITENAME}}`.
fn contents_bare(scan: &mut Scan<'_>) -> Option<Node> {
    sequence(scan, |scan| {
        let name = template_name(scan)?;
        let args = n_or_more(scan, 0, template_param)?;
        Some(Node::template(name, args))
    })
}

/// name = one or more characters from the template-name allow-list.
fn template_name(scan: &mut Scan<'_>) -> Option<String> {
    transform(scan, |scan| scan.eat_re(&TEMPLATE_NAME), str::to_owned)
}

/// param = "|" paramExpression*
///
/// Several adjacent expressions in one parameter are joined with an
/// implicit `Concat`; a single expression is used unwrapped; an empty
/// parameter becomes an empty-string argument.
fn template_param(scan: &mut Scan<'_>) -> Option<Node> {
    sequence(scan, |scan| {
        scan.eat_str("|")?;
        let mut expressions = n_or_more(scan, 0, param_expression)?;
        Some(match expressions.len() {
            0 => Node::Literal(String::new()),
            1 => expressions.pop()?,
            _ => Node::Concat(expressions),
        })
    })
}

/// replacement = "$" digit+, stored 0-based: `$1` becomes index 0.
///
/// `$0` has no parameter to refer to, and a digit run too long for the
/// index type cannot have one either. Both still consume the token,
/// kept as literal text so parsing continues and the emitter renders
/// it verbatim, matching what the fast path does with such tokens.
fn replacement(scan: &mut Scan<'_>) -> Option<Node> {
    sequence(scan, |scan| {
        scan.eat_str("$")?;
        let digits = scan.eat_re(&DIGITS)?;
        let index = digits.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
        Some(match index {
            Some(index) => Node::Replace(index),
            None => Node::Literal(format!("${digits}")),
        })
    })
}

/// literal = (escape | regular-literal-char)+ joined into one string.
fn literal_node(scan: &mut Scan<'_>) -> Option<Node> {
    let pieces = n_or_more(scan, 1, escaped_or_regular_literal)?;
    Some(Node::Literal(pieces.concat()))
}

/// The parameter-position flavor of `literal_node` (stops at `|`).
fn literal_no_bar_node(scan: &mut Scan<'_>) -> Option<Node> {
    let pieces = n_or_more(scan, 1, escaped_or_literal_no_bar)?;
    Some(Node::Literal(pieces.concat()))
}

/// The space-delimited flavor, for token positions. No current rule
/// consumes it; it is part of the grammar surface alongside the other
/// two literal flavors.
#[allow(dead_code)]
fn literal_no_space_node(scan: &mut Scan<'_>) -> Option<Node> {
    let pieces = n_or_more(scan, 1, escaped_or_literal_no_space)?;
    Some(Node::Literal(pieces.concat()))
}

fn escaped_or_regular_literal<'a>(scan: &mut Scan<'a>) -> Option<&'a str> {
    let rules: &[Rule<'a, &'a str>] = &[
        escaped_literal as Rule<'a, &'a str>,
        regular_literal_char as Rule<'a, &'a str>,
    ];
    choice(scan, rules)
}

fn escaped_or_literal_no_bar<'a>(scan: &mut Scan<'a>) -> Option<&'a str> {
    let rules: &[Rule<'a, &'a str>] = &[
        escaped_literal as Rule<'a, &'a str>,
        literal_no_bar_char as Rule<'a, &'a str>,
    ];
    choice(scan, rules)
}

#[allow(dead_code)]
fn escaped_or_literal_no_space<'a>(scan: &mut Scan<'a>) -> Option<&'a str> {
    let rules: &[Rule<'a, &'a str>] = &[
        escaped_literal as Rule<'a, &'a str>,
        literal_no_space_char as Rule<'a, &'a str>,
    ];
    choice(scan, rules)
}

/// escape = "\" any-character, yielding that character verbatim.
///
/// Unescaping is literal-identity: `\{` yields `{` as inert text, it
/// does not re-enter template parsing.
fn escaped_literal<'a>(scan: &mut Scan<'a>) -> Option<&'a str> {
    sequence(scan, |scan| {
        scan.eat_str("\\")?;
        scan.eat_re(&ANY_CHAR)
    })
}

fn regular_literal_char<'a>(scan: &mut Scan<'a>) -> Option<&'a str> {
    scan.eat_re(&REGULAR_LITERAL)
}

fn literal_no_bar_char<'a>(scan: &mut Scan<'a>) -> Option<&'a str> {
    scan.eat_re(&LITERAL_NO_BAR)
}

#[allow(dead_code)]
fn literal_no_space_char<'a>(scan: &mut Scan<'a>) -> Option<&'a str> {
    scan.eat_re(&LITERAL_NO_SPACE)
}

// ============================================================================
// TESTS
// ============================================================================
