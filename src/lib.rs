//! Recursive Text — stochastic recursive text generation.
//!
//! A small grammar of named productions is expanded by repeatedly
//! substituting production names with their bodies. Each substitution
//! squares the chance of substituting again further down, so even
//! self-referential grammars bottom out.

pub mod core;
pub mod grammars;

pub use crate::core::pipeline::{Generator, Seed};
pub use crate::core::token::Node;
