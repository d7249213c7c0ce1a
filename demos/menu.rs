/// Menu example — prints a few elaborated dishes from the bundled grammar.
///
/// Run with: cargo run --example menu

use recursive_text::core::pipeline::{Generator, Seed};
use recursive_text::Node;

fn main() {
    let mut generator = Generator::builder()
        .bundled()
        .seed(2026)
        .build()
        .expect("Failed to build generator");

    println!("=== Tonight's Menu ===\n");
    for dish in ["MACARONI", "SPAGHETTI", "RAVIOLI", "LASAGNE"] {
        let text = generator.generate_text(&Seed::production(dish));
        println!("{}:\n  {}\n", dish.to_lowercase(), text);
    }

    // An explicit seed tree mixes literal words with references.
    let special = Seed::from(Node::group(vec![
        Node::word("today's"),
        Node::word("special,"),
        Node::word("GARLIC_COMMA"),
        Node::word("with"),
        Node::word("COFFEE"),
    ]));
    println!("special:\n  {}", generator.generate_text(&special));
}
