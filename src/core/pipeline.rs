/// The generation pipeline: Seed → expanded tree → normalized text.
///
/// Wires together the grammar registry, the expander, and the normalizer
/// behind a builder that gathers grammars and settings once.
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::core::config::{ConfigError, ExpansionConfig, UnresolvedPolicy};
use crate::core::expander::Expander;
use crate::core::grammar::{Grammar, GrammarError};
use crate::core::normalize::{normalize, render};
use crate::core::token::Node;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where an expansion starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    /// A production name, expanded as the one-element sequence `[name]`.
    Production(String),
    /// An explicit starting tree, expanded as given.
    Tree(Node),
}

impl Seed {
    pub fn production(name: impl Into<String>) -> Self {
        Seed::Production(name.into())
    }

    fn to_tree(&self) -> Node {
        match self {
            Seed::Production(name) => Node::Group(vec![Node::Word(name.clone())]),
            Seed::Tree(tree) => tree.clone(),
        }
    }
}

impl From<Node> for Seed {
    fn from(tree: Node) -> Self {
        Seed::Tree(tree)
    }
}

/// The top-level generator. Built via `Generator::builder()`.
pub struct Generator {
    grammar: Arc<Grammar>,
    config: ExpansionConfig,
    seed: u64,
    generation_count: u64,
}

/// Builder for constructing a `Generator`.
pub struct GeneratorBuilder {
    grammar_files: Vec<PathBuf>,
    grammars_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
    bundled: bool,
    seed: u64,
    /// Directly provided grammar (for testing without files).
    grammar: Option<Grammar>,
    /// Registry already owned by another generator.
    shared_grammar: Option<Arc<Grammar>>,
    /// Directly provided config; individual setters override it.
    config: Option<ExpansionConfig>,
    initial_probability: Option<f64>,
    max_depth: Option<usize>,
    unresolved: Option<UnresolvedPolicy>,
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder {
            grammar_files: Vec::new(),
            grammars_dir: None,
            config_path: None,
            bundled: false,
            seed: 0,
            grammar: None,
            shared_grammar: None,
            config: None,
            initial_probability: None,
            max_depth: None,
            unresolved: None,
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Shared handle to the registry, for `GeneratorBuilder::with_shared_grammar`.
    pub fn shared_grammar(&self) -> Arc<Grammar> {
        Arc::clone(&self.grammar)
    }

    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Expand a seed and normalize the result.
    pub fn generate(&mut self, seed: &Seed) -> Node {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.generation_count));
        self.generation_count += 1;

        let expander = Expander::new(&self.grammar, &self.config);
        let expanded = expander.expand(&seed.to_tree(), self.config.initial_probability, &mut rng);
        debug!(
            generation = self.generation_count,
            depth = expanded.depth(),
            "expanded seed"
        );
        normalize(&expanded)
    }

    /// Generate and render as text.
    pub fn generate_text(&mut self, seed: &Seed) -> String {
        render(&self.generate(seed))
    }

    /// Generate several independent outputs for the same seed.
    pub fn generate_variants(&mut self, seed: &Seed, count: usize) -> Vec<String> {
        (0..count).map(|_| self.generate_text(seed)).collect()
    }
}

impl GeneratorBuilder {
    /// Include the bundled pasta grammar.
    pub fn bundled(mut self) -> Self {
        self.bundled = true;
        self
    }

    pub fn grammar_file(mut self, path: impl AsRef<Path>) -> Self {
        self.grammar_files.push(path.as_ref().to_path_buf());
        self
    }

    pub fn grammars_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.grammars_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn initial_probability(mut self, probability: f64) -> Self {
        self.initial_probability = Some(probability);
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = Some(policy);
        self
    }

    /// Provide a config directly (for testing without files).
    pub fn with_config(mut self, config: ExpansionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Provide a grammar directly (for testing without files).
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = Some(grammar);
        self
    }

    /// Reuse a registry held by another generator.
    ///
    /// The registry is shared as-is unless other grammar sources are added,
    /// in which case they are layered over a copy of it.
    pub fn with_shared_grammar(mut self, grammar: Arc<Grammar>) -> Self {
        self.shared_grammar = Some(grammar);
        self
    }

    fn has_owned_sources(&self) -> bool {
        self.bundled
            || self.grammar.is_some()
            || !self.grammar_files.is_empty()
            || self.grammars_dir.is_some()
    }

    /// Assemble the grammar and settings.
    ///
    /// Grammars are layered in order: shared, bundled, direct, files, then
    /// directory, with later productions overriding earlier ones of the same
    /// name.
    pub fn build(mut self) -> Result<Generator, PipelineError> {
        let config = self.resolve_config()?;

        if !self.has_owned_sources() {
            if let Some(shared) = self.shared_grammar.take() {
                return Ok(Generator {
                    grammar: shared,
                    config,
                    seed: self.seed,
                    generation_count: 0,
                });
            }
        }

        let mut grammar = match self.shared_grammar.take() {
            Some(shared) => Grammar::clone(&shared),
            None => Grammar::new(),
        };

        if self.bundled {
            grammar.merge(crate::grammars::pasta()?);
        }

        if let Some(direct) = self.grammar {
            grammar.merge(direct);
        }

        for path in &self.grammar_files {
            grammar.merge(Grammar::load_from_ron(path)?);
        }

        if let Some(ref dir) = self.grammars_dir {
            if dir.exists() {
                load_ron_files_from_dir(dir, |path| {
                    grammar.merge(Grammar::load_from_ron(path)?);
                    Ok(())
                })?;
            }
        }

        Ok(Generator {
            grammar: Arc::new(grammar),
            config,
            seed: self.seed,
            generation_count: 0,
        })
    }

    /// Config file or direct config, then individual setters on top.
    fn resolve_config(&mut self) -> Result<ExpansionConfig, PipelineError> {
        let mut config = match (&self.config_path, self.config.take()) {
            (Some(path), _) => ExpansionConfig::load_from_ron(path)?,
            (None, Some(config)) => config,
            (None, None) => ExpansionConfig::default(),
        };
        if let Some(p) = self.initial_probability {
            config.initial_probability = p;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(policy) = self.unresolved {
            config.unresolved = policy;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Load all .ron files from a directory in name order, calling `loader` for each.
fn load_ron_files_from_dir<F>(dir: &Path, mut loader: F) -> Result<(), PipelineError>
where
    F: FnMut(&Path) -> Result<(), PipelineError>,
{
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            paths.push(path);
        }
    }
    paths.sort();
    for path in &paths {
        loader(path)?;
    }
    Ok(())
}
