/// Grammar Linter — validates production names and references.
///
/// Usage: grammar_linter <grammar_file_or_dir> | --bundled

use recursive_text::core::grammar::Grammar;
use recursive_text::core::lint::lint;
use recursive_text::grammars;
use std::path::Path;
use std::process;

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: grammar_linter <grammar_file_or_dir> | --bundled");
        process::exit(0);
    }

    let mut grammar = Grammar::new();

    if args[1] == "--bundled" {
        match grammars::pasta() {
            Ok(g) => grammar.merge(g),
            Err(e) => {
                eprintln!("ERROR: Failed to parse bundled grammar: {}", e);
                process::exit(1);
            }
        }
    } else {
        let grammar_path = Path::new(&args[1]);
        if grammar_path.is_file() {
            match Grammar::load_from_ron(grammar_path) {
                Ok(g) => grammar.merge(g),
                Err(e) => {
                    eprintln!("ERROR: Failed to load grammar file: {}", e);
                    process::exit(1);
                }
            }
        } else if grammar_path.is_dir() {
            load_grammars_recursive(grammar_path, &mut grammar);
        } else {
            eprintln!("ERROR: Path '{}' does not exist", args[1]);
            process::exit(1);
        }
    }

    println!("Loaded {} productions", grammar.len());

    let report = lint(&grammar);

    println!("\n=== Grammar Lint Report ===\n");

    if report.is_clean() {
        println!("All checks passed!");
    }

    for warning in &report.warnings {
        println!("WARNING: {}", warning);
    }

    for error in &report.errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );

    if !report.errors.is_empty() {
        process::exit(1);
    }
}

fn load_grammars_recursive(dir: &Path, grammar: &mut Grammar) {
    let mut paths: Vec<_> = match std::fs::read_dir(dir) {
        Ok(entries) => entries.flatten().map(|e| e.path()).collect(),
        Err(e) => {
            eprintln!("  ERROR reading {}: {}", dir.display(), e);
            return;
        }
    };
    paths.sort();

    for path in paths {
        if path.is_dir() {
            load_grammars_recursive(&path, grammar);
        } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            match Grammar::load_from_ron(&path) {
                Ok(g) => {
                    println!("  Loaded: {}", path.display());
                    grammar.merge(g);
                }
                Err(e) => {
                    eprintln!("  ERROR loading {}: {}", path.display(), e);
                }
            }
        }
    }
}
