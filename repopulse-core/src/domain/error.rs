// repopulse-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Invalid rule catalog: {0}")]
    #[diagnostic(
        code(repopulse::domain::rules),
        help("Rule ids must be unique across the built-in catalog and rules.yml.")
    )]
    InvalidRuleCatalog(String),

    #[error("'{0}' is not a Git repository")]
    #[diagnostic(
        code(repopulse::domain::not_a_repository),
        help("Point --repo-dir at a directory containing a .git folder.")
    )]
    NotARepository(String),
}
