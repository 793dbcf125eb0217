// repopulse-core/src/application/ports/agent.rs

use crate::application::insights::{InsightSet, ReportContext};
use crate::error::RepoPulseError;
use async_trait::async_trait;

/// A language-model collaborator that turns the collected facts into
/// narrative insights. Implementations live in infrastructure; the
/// pipeline only ever sees this contract and treats every failure as
/// "report without insights".
#[async_trait]
pub trait InsightAgent: Send + Sync {
    async fn generate(&self, context: &ReportContext) -> Result<InsightSet, RepoPulseError>;
}
