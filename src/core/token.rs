/// Token trees and the surface-form token classifier.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved suffix standing in for a trailing comma inside a single word.
pub const COMMA_MARKER: &str = "_COMMA";

/// A node of a token tree: either a single word or a nested sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    Word(String),
    Group(Vec<Node>),
}

impl Node {
    pub fn word(text: impl Into<String>) -> Self {
        Node::Word(text.into())
    }

    pub fn group(children: Vec<Node>) -> Self {
        Node::Group(children)
    }

    /// The empty sequence.
    pub fn empty() -> Self {
        Node::Group(Vec::new())
    }

    /// The standalone comma token appended after a comma-tagged substitution.
    pub fn comma() -> Self {
        Node::Word(COMMA_MARKER.to_string())
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Node::Word(w) => Some(w),
            Node::Group(_) => None,
        }
    }

    /// Visit every word in the tree, depth-first, left to right.
    pub fn words(&self) -> Vec<&str> {
        let mut out = Vec::new();
        collect_words(self, &mut out);
        out
    }

    /// Nesting depth: a word is 0, a group is one more than its deepest child.
    pub fn depth(&self) -> usize {
        match self {
            Node::Word(_) => 0,
            Node::Group(children) => 1 + children.iter().map(Node::depth).max().unwrap_or(0),
        }
    }
}

fn collect_words<'a>(node: &'a Node, out: &mut Vec<&'a str>) {
    match node {
        Node::Word(w) => out.push(w),
        Node::Group(children) => {
            for child in children {
                collect_words(child, out);
            }
        }
    }
}

impl fmt::Display for Node {
    /// Debug-friendly s-expression form; see `normalize::render` for prose.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Word(w) => write!(f, "{}", w),
            Node::Group(children) => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Split a word into its base name and whether it carried the comma marker.
pub fn strip_comma_marker(token: &str) -> (&str, bool) {
    match token.strip_suffix(COMMA_MARKER) {
        Some(base) => (base, true),
        None => (token, false),
    }
}

pub fn is_comma_tagged(token: &str) -> bool {
    token.ends_with(COMMA_MARKER)
}

/// Whether a word names a production.
///
/// References are written in upper case (`PASTA`, `SAUCE_COMMA`); literal
/// words are not (`and`, `heated`). The base name must contain a letter, so
/// the standalone marker and bare punctuation never count as references.
pub fn is_reference(token: &str) -> bool {
    let (base, _) = strip_comma_marker(token);
    !base.is_empty()
        && base.chars().any(char::is_alphabetic)
        && token == token.to_uppercase()
}
