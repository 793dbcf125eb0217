// repopulse-core/src/infrastructure/config/mod.rs

pub mod report;

pub use report::{CollectorConfig, LlmConfig, ReportConfig, load_report_config, load_rule_catalog};
