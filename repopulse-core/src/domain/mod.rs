pub mod error;
pub mod metrics;
pub mod rules;

// Convenience re-export to simplify imports elsewhere
pub use error::DomainError;
