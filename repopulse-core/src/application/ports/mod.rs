// repopulse-core/src/application/ports/mod.rs

pub mod agent;
pub mod renderer;

pub use agent::InsightAgent;
pub use renderer::TemplateEngine;
