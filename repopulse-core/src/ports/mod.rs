// repopulse-core/src/ports/mod.rs

pub mod runner;

pub use runner::{CommandOutput, CommandRunner};
