//! WASM bindings for recursive-text — powers the interactive menu demo.

use wasm_bindgen::prelude::*;

use recursive_text::core::pipeline::{Generator, Seed};
use recursive_text::grammars;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct GrammarInfo {
    productions: Vec<String>,
    initial_probability: f64,
    seed: u64,
}

// ---------------------------------------------------------------------------
// MenuDemo — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct MenuDemo {
    generator: Generator,
}

#[wasm_bindgen]
impl MenuDemo {
    /// Create a demo over the bundled grammar with the given seed.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<MenuDemo, JsError> {
        Ok(MenuDemo {
            generator: build_generator(seed, None)?,
        })
    }

    /// Create a demo with a custom starting probability in `[0, 1)`.
    pub fn with_probability(seed: u64, probability: f64) -> Result<MenuDemo, JsError> {
        Ok(MenuDemo {
            generator: build_generator(seed, Some(probability))?,
        })
    }

    /// Expand a production and return the rendered text.
    pub fn generate(&mut self, name: &str) -> String {
        self.generator.generate_text(&Seed::production(name))
    }

    /// Expand a production and return the normalized tree as JSON.
    pub fn generate_tree(&mut self, name: &str) -> Result<String, JsError> {
        let tree = self.generator.generate(&Seed::production(name));
        serde_json::to_string(&tree)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON array of `count` independent expansions.
    pub fn generate_variants(&mut self, name: &str, count: usize) -> Result<String, JsError> {
        let variants = self
            .generator
            .generate_variants(&Seed::production(name), count);
        serde_json::to_string(&variants)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON description of the loaded grammar and settings.
    pub fn grammar_info(&self) -> Result<String, JsError> {
        let info = GrammarInfo {
            productions: self.generator.grammar().names().to_vec(),
            initial_probability: self.generator.config().initial_probability,
            seed: self.generator.seed(),
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON array of the bundled production names.
    pub fn production_names() -> String {
        grammars::pasta()
            .ok()
            .and_then(|g| serde_json::to_string(g.names()).ok())
            .unwrap_or_else(|| "[]".to_string())
    }

    /// Rebuild the generator with a new seed, keeping the probability.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        let probability = self.generator.config().initial_probability;
        self.generator = build_generator(seed, Some(probability))?;
        Ok(())
    }
}

fn build_generator(seed: u64, probability: Option<f64>) -> Result<Generator, JsError> {
    let mut builder = Generator::builder().bundled().seed(seed);
    if let Some(p) = probability {
        builder = builder.initial_probability(p);
    }
    builder
        .build()
        .map_err(|e| JsError::new(&format!("Generator build error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_names_lists_bundled_grammar() {
        let names: Vec<String> = serde_json::from_str(&MenuDemo::production_names()).unwrap();
        assert!(names.contains(&"MACARONI".to_string()));
    }

    #[test]
    fn generator_produces_text() {
        let mut generator = build_generator(7, None).ok().unwrap();
        let text = generator.generate_text(&Seed::production("SPAGHETTI"));
        assert!(!text.is_empty());
    }
}
