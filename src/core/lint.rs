/// Grammar linting — structural checks run before a grammar ships.
use crate::core::grammar::Grammar;
use crate::core::token::{is_reference, strip_comma_marker};

/// Findings from a lint run. Errors make a grammar unusable as intended;
/// warnings flag productions that still expand but probably not as meant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LintReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

pub fn lint(grammar: &Grammar) -> LintReport {
    let mut report = LintReport::default();

    for (name, body) in grammar.iter() {
        // A name only resolves if references to it classify as references.
        if !is_reference(name) || strip_comma_marker(name).1 {
            report.errors.push(format!(
                "Production '{}' can never be referenced (names must be upper case without the comma marker)",
                name
            ));
        }

        let mut words = Vec::new();
        for node in body {
            words.extend(node.words());
        }

        // Bodies made only of empty groups print nothing either.
        if words.is_empty() {
            report
                .warnings
                .push(format!("Production '{}' has an empty body", name));
            continue;
        }

        for word in &words {
            if is_reference(word) {
                let (base, _) = strip_comma_marker(word);
                if !grammar.contains(base) {
                    report.warnings.push(format!(
                        "Production '{}' references unknown production '{}'",
                        name, base
                    ));
                }
            }
        }

        if only_self_references(name, &words) {
            report.warnings.push(format!(
                "Production '{}' contains nothing but references to itself",
                name
            ));
        }
    }

    report
}

fn only_self_references(name: &str, words: &[&str]) -> bool {
    !words.is_empty() && words.iter().all(|word| strip_comma_marker(word).0 == name)
}
