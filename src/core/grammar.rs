/// Production registry — body parsing, RON loading, and name lookup.
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::core::token::{Node, COMMA_MARKER};

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("body parse error in '{name}': {message}")]
    Parse { name: String, message: String },
    #[error("invalid production name '{0}'")]
    InvalidName(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Parse a production body into a token sequence.
///
/// Syntax:
/// - whitespace separates words
/// - `(` and `)` open and close a nested group
/// - a trailing `,` on a word becomes the comma marker (`SAUCE,` → `SAUCE_COMMA`)
/// - a lone `,` becomes the standalone comma token
pub fn parse_body(input: &str) -> Result<Vec<Node>, String> {
    let mut stack: Vec<Vec<Node>> = vec![Vec::new()];
    let mut word = String::new();

    for ch in input.chars() {
        match ch {
            '(' | ')' => {
                flush_word(&mut word, &mut stack);
                if ch == '(' {
                    stack.push(Vec::new());
                } else {
                    if stack.len() == 1 {
                        return Err("unmatched closing parenthesis".to_string());
                    }
                    let children = stack.pop().unwrap_or_default();
                    if let Some(parent) = stack.last_mut() {
                        parent.push(Node::Group(children));
                    }
                }
            }
            c if c.is_whitespace() => flush_word(&mut word, &mut stack),
            c => word.push(c),
        }
    }
    flush_word(&mut word, &mut stack);

    if stack.len() != 1 {
        return Err("unclosed parenthesis".to_string());
    }
    Ok(stack.pop().unwrap_or_default())
}

fn flush_word(word: &mut String, stack: &mut [Vec<Node>]) {
    if word.is_empty() {
        return;
    }
    let encoded = match word.strip_suffix(',') {
        Some(base) => format!("{}{}", base, COMMA_MARKER),
        None => word.clone(),
    };
    if let Some(top) = stack.last_mut() {
        top.push(Node::Word(encoded));
    }
    word.clear();
}

/// The registry of named productions.
///
/// Built once, then only read during expansion. Registration order is kept
/// separately from the bodies so callers can iterate every production.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    productions: FxHashMap<String, Vec<Node>>,
    order: Vec<String>,
}

// RON declarations are an ordered list rather than a map so that
// registration order survives loading.
#[derive(Debug, Deserialize)]
#[serde(rename = "Production")]
struct RonProduction {
    name: String,
    body: String,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a production, overwriting any earlier body with the same name.
    pub fn register(&mut self, name: impl Into<String>, body: Vec<Node>) {
        let name = name.into();
        if self.productions.insert(name.clone(), body).is_none() {
            self.order.push(name);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&[Node]> {
        self.productions.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.productions.contains_key(name)
    }

    /// Registered names, in the order they were first registered.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Node])> {
        self.order
            .iter()
            .filter_map(|name| self.lookup(name).map(|body| (name.as_str(), body)))
    }

    /// Build a grammar from an ordered list of `(name, body text)` pairs.
    pub fn from_declarations<'a, I>(declarations: I) -> Result<Grammar, GrammarError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut grammar = Grammar::new();
        for (name, body) in declarations {
            if name.trim().is_empty() {
                return Err(GrammarError::InvalidName(name.to_string()));
            }
            let parsed = parse_body(body).map_err(|message| GrammarError::Parse {
                name: name.to_string(),
                message,
            })?;
            grammar.register(name, parsed);
        }
        Ok(grammar)
    }

    /// Load a grammar from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Grammar, GrammarError> {
        let contents = std::fs::read_to_string(path)?;
        let grammar = Self::parse_ron(&contents)?;
        info!(
            path = %path.display(),
            productions = grammar.len(),
            "loaded grammar"
        );
        Ok(grammar)
    }

    /// Parse a grammar from a RON string: a list of `Production(name, body)`.
    pub fn parse_ron(input: &str) -> Result<Grammar, GrammarError> {
        let raw: Vec<RonProduction> = ron::from_str(input)?;
        Self::from_declarations(raw.iter().map(|p| (p.name.as_str(), p.body.as_str())))
    }

    /// Merge another grammar into this one. Productions from `other`
    /// override productions in `self` with the same name.
    pub fn merge(&mut self, other: Grammar) {
        let Grammar {
            mut productions,
            order,
        } = other;
        for name in order {
            if let Some(body) = productions.remove(&name) {
                self.register(name, body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(s: &str) -> Node {
        Node::word(s)
    }

    #[test]
    fn parse_flat_words() {
        let body = parse_body("MACARONI and CHEESE").unwrap();
        assert_eq!(body, vec![w("MACARONI"), w("and"), w("CHEESE")]);
    }

    #[test]
    fn parse_nested_groups() {
        let body = parse_body("a (b (c d)) e").unwrap();
        assert_eq!(
            body,
            vec![
                w("a"),
                Node::group(vec![w("b"), Node::group(vec![w("c"), w("d")])]),
                w("e"),
            ]
        );
    }

    #[test]
    fn parse_groups_without_spaces() {
        let body = parse_body("(x)(y)").unwrap();
        assert_eq!(
            body,
            vec![Node::group(vec![w("x")]), Node::group(vec![w("y")])]
        );
    }

    #[test]
    fn parse_trailing_comma_becomes_marker() {
        let body = parse_body("SAUCE, heated, and served").unwrap();
        assert_eq!(
            body,
            vec![w("SAUCE_COMMA"), w("heated_COMMA"), w("and"), w("served")]
        );
    }

    #[test]
    fn parse_lone_comma_is_standalone_marker() {
        let body = parse_body("a , b").unwrap();
        assert_eq!(body, vec![w("a"), Node::comma(), w("b")]);
    }

    #[test]
    fn parse_explicit_marker_passes_through() {
        let body = parse_body("GARLIC_COMMA oil").unwrap();
        assert_eq!(body, vec![w("GARLIC_COMMA"), w("oil")]);
    }

    #[test]
    fn parse_empty_body() {
        assert!(parse_body("").unwrap().is_empty());
        assert!(parse_body("   ").unwrap().is_empty());
    }

    #[test]
    fn parse_unclosed_paren_error() {
        assert!(parse_body("a (b c").is_err());
    }

    #[test]
    fn parse_unmatched_close_error() {
        assert!(parse_body("a b) c").is_err());
    }

    #[test]
    fn register_and_lookup() {
        let mut g = Grammar::new();
        g.register("PASTA", vec![w("noodles")]);
        assert_eq!(g.lookup("PASTA"), Some(&[w("noodles")][..]));
        assert!(g.lookup("SAUCE").is_none());
        assert!(g.contains("PASTA"));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn register_overwrites_but_keeps_order() {
        let mut g = Grammar::new();
        g.register("A", vec![w("first")]);
        g.register("B", vec![w("b")]);
        g.register("A", vec![w("second")]);
        assert_eq!(g.names(), &["A".to_string(), "B".to_string()]);
        assert_eq!(g.lookup("A"), Some(&[w("second")][..]));
    }

    #[test]
    fn from_declarations_preserves_order() {
        let g = Grammar::from_declarations([("Z", "z"), ("A", "a"), ("M", "m")]).unwrap();
        let names: Vec<&str> = g.names().iter().map(String::as_str).collect();
        assert_eq!(names, vec!["Z", "A", "M"]);
        let iterated: Vec<&str> = g.iter().map(|(name, _)| name).collect();
        assert_eq!(iterated, names);
    }

    #[test]
    fn from_declarations_reports_bad_body() {
        let err = Grammar::from_declarations([("BAD", "(oops")]).unwrap_err();
        assert!(matches!(err, GrammarError::Parse { ref name, .. } if name == "BAD"));
    }

    #[test]
    fn from_declarations_rejects_empty_name() {
        let err = Grammar::from_declarations([(" ", "x")]).unwrap_err();
        assert!(matches!(err, GrammarError::InvalidName(_)));
    }

    #[test]
    fn parse_ron_list() {
        let input = r#"[
            Production(name: "MACARONI", body: "MACARONI and CHEESE"),
            Production(name: "CHEESE", body: "(aged and grated)"),
        ]"#;
        let g = Grammar::parse_ron(input).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.names()[0], "MACARONI");
        assert_eq!(g.lookup("CHEESE").unwrap().len(), 1);
    }

    #[test]
    fn parse_ron_syntax_error() {
        assert!(matches!(
            Grammar::parse_ron("[Production(name: ]"),
            Err(GrammarError::Ron(_))
        ));
    }

    #[test]
    fn load_test_grammar_from_ron() {
        let path = std::path::PathBuf::from("tests/fixtures/test_grammar.ron");
        let g = Grammar::load_from_ron(&path).unwrap();
        assert_eq!(g.len(), 4);
        assert!(g.contains("MACARONI"));
        assert!(g.contains("X"));
        assert!(g.contains("Y"));
        assert!(g.contains("DINNER"));
    }

    #[test]
    fn merge_precedence() {
        let mut base = Grammar::from_declarations([("SHARED", "base version"), ("BASE_ONLY", "b")])
            .unwrap();
        let other =
            Grammar::from_declarations([("NEW", "n"), ("SHARED", "override version")]).unwrap();

        base.merge(other);

        assert_eq!(base.lookup("SHARED").unwrap()[0], w("override"));
        assert!(base.contains("BASE_ONLY"));
        let names: Vec<&str> = base.names().iter().map(String::as_str).collect();
        assert_eq!(names, vec!["SHARED", "BASE_ONLY", "NEW"]);
    }

    #[test]
    fn grammar_default() {
        let g = Grammar::default();
        assert!(g.is_empty());
        assert!(g.names().is_empty());
    }
}
