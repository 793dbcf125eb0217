// repopulse-core/src/application/mod.rs

pub mod insights;
pub mod ports;
pub mod render;
pub mod report;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI do:
// `use repopulse_core::application::{run_report, MarkdownReporter};`
// without knowing the internal file layout.

pub use insights::{InsightSet, ReportContext, generate_insights};
pub use render::{MarkdownReporter, ReportArtifact};
pub use report::{ReportOutcome, run_report};
