//! Grammars shipped with the crate, compiled in from `grammar_data/`.

use crate::core::grammar::{Grammar, GrammarError};

/// RON source of the bundled menu grammar.
pub const PASTA_RON: &str = include_str!("../../grammar_data/pasta.ron");

/// The bundled menu grammar: a self- and mutually-recursive tangle of
/// pasta dishes whose names expand into descriptions of themselves.
pub fn pasta() -> Result<Grammar, GrammarError> {
    Grammar::parse_ron(PASTA_RON)
}
