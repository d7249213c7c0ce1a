pub mod config;
pub mod expander;
pub mod grammar;
pub mod lint;
pub mod normalize;
pub mod pipeline;
pub mod token;
