//! HEX-CyberSphere engine runner
//!
//! Wires the crypto and compression crates into the sample runs printed by
//! the `hexsphere` binary.

pub mod cli;
pub mod demo;
pub mod telemetry;

pub use cli::{Args, Mode};
