// repopulse-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(repopulse::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(repopulse::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Serialization Error: {0}")]
    #[diagnostic(code(repopulse::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(repopulse::infra::template),
        help("Check the Jinja syntax ({{ ... }}) inside the report template.")
    )]
    TemplateError(#[from] minijinja::Error),

    // --- INSIGHT AGENT (HTTP) ---
    #[error("HTTP Error: {0}")]
    #[diagnostic(
        code(repopulse::infra::http),
        help("Check network connectivity and the configured endpoint.")
    )]
    HttpError(#[from] reqwest::Error),

    #[error("Insight Agent Error: {0}")]
    #[diagnostic(code(repopulse::infra::agent))]
    AgentError(String),
}
