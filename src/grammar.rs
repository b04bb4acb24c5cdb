//! Context-free, per-character rewriting.
//!
//! A [`RuleSet`] maps single symbols to replacement strings. Symbols without a
//! production rewrite to themselves, so [`expand`] is total over any input.

use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

/// Symbol-to-replacement productions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: HashMap<char, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the production for `symbol` (builder pattern).
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.insert(symbol, replacement);
        self
    }

    /// Adds the production for `symbol`, replacing any existing one.
    pub fn insert(&mut self, symbol: char, replacement: impl Into<String>) {
        self.rules.insert(symbol, replacement.into());
    }

    /// Returns the explicit production for `symbol`, if any.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.rules.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.rules.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// What `symbol` rewrites to: its production, or the symbol itself.
    pub fn replacement(&self, symbol: char) -> Cow<'_, str> {
        match self.rules.get(&symbol) {
            Some(replacement) => Cow::Borrowed(replacement),
            None => Cow::Owned(symbol.to_string()),
        }
    }

    fn rewrite_into(&self, symbol: char, out: &mut String) {
        out.push_str(&self.replacement(symbol));
    }
}

/// Parses productions written one per line (or separated by `;`).
///
/// Each production is `X -> replacement` or `X = replacement`. Blank lines and
/// lines starting with `#` are skipped. The replacement may be empty, which
/// erases the symbol.
impl FromStr for RuleSet {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules = RuleSet::new();
        for (line_no, raw) in s.split(['\n', ';']).enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line_no = line_no + 1;
            let (lhs, rhs) = line
                .split_once("->")
                .or_else(|| line.split_once('='))
                .ok_or(TreeError::InvalidRule {
                    line: line_no,
                    reason: "expected `->` or `=`",
                })?;

            let mut chars = lhs.trim().chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                (None, _) => {
                    return Err(TreeError::InvalidRule {
                        line: line_no,
                        reason: "missing predecessor symbol",
                    });
                }
                (Some(_), Some(_)) => {
                    return Err(TreeError::InvalidRule {
                        line: line_no,
                        reason: "predecessor must be a single symbol",
                    });
                }
            };
            let replacement: String = rhs.chars().filter(|c| !c.is_whitespace()).collect();
            rules.insert(symbol, replacement);
        }
        Ok(rules)
    }
}

/// An axiom together with the productions that grow it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    pub axiom: String,
    pub rules: RuleSet,
}

impl Grammar {
    pub fn new(axiom: impl Into<String>, rules: RuleSet) -> Self {
        Self {
            axiom: axiom.into(),
            rules,
        }
    }

    /// Rewrites the axiom `iterations` times. See [`expand`].
    pub fn expand(&self, iterations: usize) -> String {
        expand(&self.axiom, iterations, &self.rules)
    }
}

/// Rewrites `axiom` `iterations` times with `rules`.
///
/// Every symbol of the current string is replaced simultaneously by its
/// production (or by itself when none exists). Zero iterations return the
/// axiom unchanged.
///
/// Output length grows geometrically with `iterations`; bounding it (5 is a
/// sensible ceiling for the built-in presets) is the caller's job.
pub fn expand(axiom: &str, iterations: usize, rules: &RuleSet) -> String {
    let mut current = axiom.to_owned();
    for generation in 1..=iterations {
        let mut next = String::with_capacity(current.len() * 2);
        for symbol in current.chars() {
            rules.rewrite_into(symbol, &mut next);
        }
        debug!(generation, len = next.len(), "expanded grammar");
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arrow_and_equals_forms() {
        let rules: RuleSet = "A -> F[+A][-A]\nB = F B".parse().unwrap();
        assert_eq!(rules.get('A'), Some("F[+A][-A]"));
        assert_eq!(rules.get('B'), Some("FB"));
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn parses_semicolon_separated_rules_and_comments() {
        let rules: RuleSet = "# trunk\nF -> FF; l -> ll".parse().unwrap();
        assert_eq!(rules.get('F'), Some("FF"));
        assert_eq!(rules.get('l'), Some("ll"));
    }

    #[test]
    fn rejects_multi_symbol_predecessor() {
        let err = "AB -> F".parse::<RuleSet>().unwrap_err();
        assert_eq!(
            err,
            TreeError::InvalidRule {
                line: 1,
                reason: "predecessor must be a single symbol"
            }
        );
    }

    #[test]
    fn rejects_line_without_arrow() {
        let err = "A\nF FF".parse::<RuleSet>().unwrap_err();
        assert!(matches!(err, TreeError::InvalidRule { line: 1, .. }));
    }

    #[test]
    fn unmapped_symbol_replaces_with_itself() {
        let rules = RuleSet::new().with_rule('A', "AB");
        assert_eq!(rules.replacement('A'), "AB");
        assert_eq!(rules.replacement('x'), "x");
        assert_eq!(rules.get('x'), None);
    }

    #[test]
    fn empty_replacement_erases_symbol() {
        let rules: RuleSet = "X ->".parse().unwrap();
        assert_eq!(expand("AXB", 1, &rules), "AB");
    }
}
