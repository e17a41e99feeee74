// src/engine/mod.rs
mod engine;
pub mod types;

pub use engine::{SearchConfig, search, search_parallel};
