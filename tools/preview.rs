/// Preview — generate text from a grammar on the command line.
///
/// Usage: preview [--grammar <path>] [--config <path>] [--seed <n>]
///                [--probability <p>] [--count <n>] [--tree] (--all | <NAME>...)
///
/// Without --grammar the bundled menu grammar is used. --all generates once
/// for every registered production, in registration order.

use recursive_text::core::pipeline::{Generator, Seed};
use std::process;

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut grammar_path = None;
    let mut config_path = None;
    let mut probability = None;
    let mut seed: u64 = 42;
    let mut count: usize = 1;
    let mut all = false;
    let mut show_tree = false;
    let mut names = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--grammar" if i + 1 < args.len() => {
                i += 1;
                grammar_path = Some(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--probability" if i + 1 < args.len() => {
                i += 1;
                probability = match args[i].parse::<f64>() {
                    Ok(p) => Some(p),
                    Err(_) => {
                        eprintln!("Error: --probability must be a number in [0, 1)");
                        process::exit(1);
                    }
                };
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = args[i].parse().unwrap_or(1);
            }
            "--all" => all = true,
            "--tree" => show_tree = true,
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
            name => names.push(name.to_string()),
        }
        i += 1;
    }

    let mut builder = Generator::builder().seed(seed);
    builder = match grammar_path {
        Some(ref path) => builder.grammar_file(path),
        None => builder.bundled(),
    };
    if let Some(ref path) = config_path {
        builder = builder.config_file(path);
    }
    if let Some(p) = probability {
        builder = builder.initial_probability(p);
    }

    let mut generator = match builder.build() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    if all {
        names = generator.grammar().names().to_vec();
    }
    if names.is_empty() {
        eprintln!("Error: give at least one production name, or --all");
        process::exit(1);
    }

    for name in &names {
        if !generator.grammar().contains(name) {
            println!("(note: '{}' is not a registered production)", name);
        }
        let seed = Seed::production(name.clone());
        for _ in 0..count {
            println!("--- {} ---", name);
            if show_tree {
                println!("{}", generator.generate(&seed));
            } else {
                println!("{}", generator.generate_text(&seed));
            }
        }
        println!();
    }
}

fn print_usage() {
    println!("Usage: preview [--grammar <path>] [--config <path>] [--seed <n>]");
    println!("               [--probability <p>] [--count <n>] [--tree] (--all | <NAME>...)");
}
