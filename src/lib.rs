// src/lib.rs

#[macro_use]
pub mod macros;

#[macro_use]
pub mod log;
pub mod params;

pub mod cli;
pub mod core;
pub mod csv;
pub mod directory;
pub mod engine;
pub mod post;
pub mod progress;
pub mod runner;
pub mod store;
pub mod tables;
pub mod tally;
