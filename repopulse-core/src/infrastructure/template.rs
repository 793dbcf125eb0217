// repopulse-core/src/infrastructure/template.rs

// Bridges the report DTOs to rendered text. Templates are embedded Jinja
// documents; the filters below keep severity presentation in one place.

use crate::application::ports::renderer::TemplateEngine;
use crate::error::RepoPulseError;
use crate::infrastructure::error::InfrastructureError;
use minijinja::Environment;

pub struct ReportTemplater<'a> {
    env: Environment<'a>,
}

impl<'a> ReportTemplater<'a> {
    pub fn new() -> Self {
        let mut env = Environment::new();

        // Severity / priority labels arrive as their snake_case wire form.
        env.add_filter("severity_icon", |value: &str| match value {
            "high" => "🔴",
            "medium" => "🟡",
            _ => "🔵",
        });

        Self { env }
    }
}

impl<'a> Default for ReportTemplater<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> TemplateEngine for ReportTemplater<'a> {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, RepoPulseError> {
        self.env
            .render_str(template, context)
            .map_err(|e| RepoPulseError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}
