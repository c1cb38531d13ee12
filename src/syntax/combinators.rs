//! Parser combinator primitives for the message grammar.
//!
//! These are grammar-agnostic building blocks: a cursor over the input,
//! string and regex matchers, ordered choice, atomic sequencing and
//! bounded repetition. Failure is always the in-band `None`, never a
//! panic, so enclosing rules can retry alternatives cheaply after a
//! cursor restore.

use regex::Regex;

/// A grammar rule as a plain function pointer: reads at the cursor and
/// either yields a value or leaves the cursor where the rule's own
/// backtracking put it. `choice` alternatives carry this type; naming
/// it also pins down the fn-item-to-fn-pointer coercion at call sites,
/// which would otherwise fail to unify inside a slice literal.
pub(crate) type Rule<'a, T> = fn(&mut Scan<'a>) -> Option<T>;

// ============================================================================
// PARSE CURSOR
// ============================================================================

/// Parse cursor over an immutable message string.
///
/// Owned by a single parse invocation and passed `&mut` down the rule
/// tree; no position state lives outside this value, so concurrent
/// parses of different strings share nothing mutable.
#[derive(Debug)]
pub(crate) struct Scan<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scan<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Scan { src, pos: 0 }
    }

    /// Saves the current position for a later `reset`.
    pub(crate) fn mark(&self) -> usize {
        self.pos
    }

    /// Restores a previously saved position (backtracking).
    pub(crate) fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    /// The unconsumed remainder of the input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Literal-string matcher: consumes exactly `expected` if the input
    /// at the cursor matches byte-for-byte, otherwise fails without
    /// moving the cursor.
    pub(crate) fn eat_str(&mut self, expected: &str) -> Option<&'a str> {
        let rest = self.rest();
        if rest.starts_with(expected) {
            let matched = &rest[..expected.len()];
            self.pos += expected.len();
            Some(matched)
        } else {
            None
        }
    }

    /// Regular-expression matcher: succeeds if `re` matches a non-empty
    /// prefix at the cursor and consumes the matched length. Patterns
    /// are written with a leading `\A`; a match anywhere else is a
    /// failure.
    pub(crate) fn eat_re(&mut self, re: &Regex) -> Option<&'a str> {
        let found = re.find(self.rest())?;
        if found.start() != 0 || found.as_str().is_empty() {
            return None;
        }
        let matched = found.as_str();
        self.pos += matched.len();
        Some(matched)
    }
}

// ============================================================================
// COMBINATORS
// ============================================================================

/// Runs `body` as an atomic sequence: sub-rules inside use `?`, and if
/// any of them fails the cursor is restored to where the sequence
/// began. All-or-nothing.
pub(crate) fn sequence<'a, T>(
    scan: &mut Scan<'a>,
    body: impl FnOnce(&mut Scan<'a>) -> Option<T>,
) -> Option<T> {
    let start = scan.mark();
    let result = body(scan);
    if result.is_none() {
        scan.reset(start);
    }
    result
}

/// Ordered choice: tries each alternative at the same starting
/// position and returns the first success. Alternatives are themselves
/// responsible for rolling back on failure, so a total miss leaves the
/// cursor untouched. Listing order encodes grammar precedence.
pub(crate) fn choice<'a, T>(scan: &mut Scan<'a>, alternatives: &[Rule<'a, T>]) -> Option<T> {
    for alternative in alternatives {
        if let Some(value) = alternative(scan) {
            return Some(value);
        }
    }
    None
}

/// Greedy repetition: applies `rule` until it fails and collects the
/// results. Succeeds only with at least `min` matches; below the
/// minimum the cursor is restored to before the repetition began.
pub(crate) fn n_or_more<'a, T>(
    scan: &mut Scan<'a>,
    min: usize,
    mut rule: impl FnMut(&mut Scan<'a>) -> Option<T>,
) -> Option<Vec<T>> {
    let start = scan.mark();
    let mut results = Vec::new();
    loop {
        let before = scan.mark();
        match rule(scan) {
            Some(value) => {
                results.push(value);
                // A zero-width success cannot repeat; stopping here
                // keeps every repetition terminating.
                if scan.mark() == before {
                    break;
                }
            }
            None => break,
        }
    }
    if results.len() < min {
        scan.reset(start);
        return None;
    }
    Some(results)
}

/// Applies `f` to `rule`'s result only on success; failure propagates
/// untouched.
pub(crate) fn transform<'a, T, U>(
    scan: &mut Scan<'a>,
    mut rule: impl FnMut(&mut Scan<'a>) -> Option<T>,
    f: impl FnOnce(T) -> U,
) -> Option<U> {
    rule(scan).map(f)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\d+").unwrap());

    #[test]
    fn eat_str_consumes_exact_match_only() {
        let mut scan = Scan::new("{{name}}");
        assert_eq!(scan.eat_str("{{"), Some("{{"));
        assert_eq!(scan.mark(), 2);
        assert_eq!(scan.eat_str("}}"), None);
        assert_eq!(scan.mark(), 2, "failed match must not move the cursor");
    }

    #[test]
    fn eat_re_requires_a_prefix_match() {
        let mut scan = Scan::new("abc123");
        assert_eq!(scan.eat_re(&DIGITS), None, "digits exist but not at the cursor");
        assert_eq!(scan.mark(), 0);
        scan.eat_str("abc").unwrap();
        assert_eq!(scan.eat_re(&DIGITS), Some("123"));
        assert!(scan.rest().is_empty());
    }

    #[test]
    fn sequence_restores_cursor_on_partial_match() {
        let mut scan = Scan::new("$x");
        let result = sequence(&mut scan, |scan| {
            scan.eat_str("$")?;
            scan.eat_re(&DIGITS)
        });
        assert_eq!(result, None);
        assert_eq!(scan.mark(), 0, "the consumed '$' must be rolled back");
    }

    #[test]
    fn choice_returns_first_success_in_listed_order() {
        fn short<'a>(scan: &mut Scan<'a>) -> Option<&'a str> {
            scan.eat_str("a")
        }
        fn long<'a>(scan: &mut Scan<'a>) -> Option<&'a str> {
            scan.eat_str("ab")
        }
        let specific_first: &[Rule<'_, &str>] = &[short as Rule<'_, &str>, long as Rule<'_, &str>];
        let general_first: &[Rule<'_, &str>] = &[long as Rule<'_, &str>, short as Rule<'_, &str>];

        let mut scan = Scan::new("ab");
        assert_eq!(choice(&mut scan, specific_first), Some("a"));

        let mut scan = Scan::new("ab");
        assert_eq!(choice(&mut scan, general_first), Some("ab"));
    }

    #[test]
    fn n_or_more_enforces_the_minimum() {
        let mut scan = Scan::new("12a");
        let digits = n_or_more(&mut scan, 1, |s| s.eat_re(&DIGITS));
        assert_eq!(digits, Some(vec!["12"]));

        let mut scan = Scan::new("abc");
        assert_eq!(n_or_more(&mut scan, 1, |s| s.eat_re(&DIGITS)), None);
        assert_eq!(scan.mark(), 0);
        // Zero minimum always succeeds, possibly empty.
        assert_eq!(n_or_more(&mut scan, 0, |s| s.eat_re(&DIGITS)), Some(vec![]));
    }

    #[test]
    fn transform_maps_success_and_passes_failure_through() {
        let mut scan = Scan::new("42");
        let value = transform(&mut scan, |s| s.eat_re(&DIGITS), |d| d.len());
        assert_eq!(value, Some(2));
        let value = transform(&mut scan, |s| s.eat_re(&DIGITS), |d| d.len());
        assert_eq!(value, None);
    }
}
