/// Recursive probabilistic expansion of token trees.
///
/// Each reference at the head of a sequence is substituted with its body
/// when a uniform draw falls below the current probability. The body is
/// expanded at the decayed probability, so chains of substitutions die out
/// geometrically even through self- and mutually-recursive productions.
use rand::rngs::StdRng;
use rand::Rng;
use std::cell::Cell;
use tracing::{debug, warn};

use crate::core::config::{ExpansionConfig, UnresolvedPolicy};
use crate::core::grammar::Grammar;
use crate::core::token::{is_reference, strip_comma_marker, Node};

/// Probability decay applied when recursing into a substitution or a
/// nested group.
pub fn decay(p: f64) -> f64 {
    p * p
}

/// Expands token trees against a fixed grammar.
pub struct Expander<'a> {
    grammar: &'a Grammar,
    config: &'a ExpansionConfig,
    /// Set once the depth guard has fired during the current `expand` call.
    depth_limit_hit: Cell<bool>,
}

impl<'a> Expander<'a> {
    pub fn new(grammar: &'a Grammar, config: &'a ExpansionConfig) -> Self {
        Self {
            grammar,
            config,
            depth_limit_hit: Cell::new(false),
        }
    }

    /// Whether the most recent `expand` call ran into the depth guard.
    pub fn depth_limit_hit(&self) -> bool {
        self.depth_limit_hit.get()
    }

    /// Expand a tree at the given probability.
    ///
    /// A lone word is returned unchanged; only words at the head of a
    /// sequence are candidates for substitution.
    pub fn expand(&self, tree: &Node, probability: f64, rng: &mut StdRng) -> Node {
        self.depth_limit_hit.set(false);
        match tree {
            Node::Word(_) => tree.clone(),
            Node::Group(items) => Node::Group(self.expand_sequence(items, probability, 0, rng)),
        }
    }

    /// Walk a sequence head by head.
    ///
    /// The probability carried to the remainder stays put after a reference
    /// head (substituted or not) and decays after a literal or group head.
    fn expand_sequence(
        &self,
        items: &[Node],
        probability: f64,
        depth: usize,
        rng: &mut StdRng,
    ) -> Vec<Node> {
        let mut p = if depth >= self.config.max_depth {
            if self.depth_limit_hit.replace(true) {
                debug!(depth, "expansion depth limit reached again");
            } else {
                warn!(depth, "expansion depth limit reached, substitution disabled");
            }
            0.0
        } else {
            probability
        };

        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Node::Word(token) if is_reference(token) => {
                    if rng.gen::<f64>() < p {
                        let (base, had_comma) = strip_comma_marker(token);
                        match self.grammar.lookup(base) {
                            Some(body) => {
                                out.extend(self.expand_sequence(body, decay(p), depth + 1, rng))
                            }
                            None => out.push(self.fallback(base)),
                        }
                        if had_comma {
                            out.push(Node::comma());
                        }
                    } else {
                        out.push(item.clone());
                    }
                }
                Node::Word(_) => {
                    out.push(item.clone());
                    p = decay(p);
                }
                Node::Group(children) => {
                    let inner = self.expand_sequence(children, decay(p), depth + 1, rng);
                    out.push(Node::Group(inner));
                    p = decay(p);
                }
            }
        }
        out
    }

    /// Stand-in for a reference with no production. Emitted as-is, never
    /// expanded again.
    fn fallback(&self, base: &str) -> Node {
        debug!(reference = base, "unresolved reference kept as literal");
        let bare = Node::Word(base.to_string());
        match self.config.unresolved {
            UnresolvedPolicy::Literal => bare,
            UnresolvedPolicy::Grouped => Node::Group(vec![bare]),
        }
    }
}
