//! CLI support for mongosql
//!
//! Provides programmatic access to the `mongosql` command functionality for
//! embedding in other tools.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check, list_tokens};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Translation error: {0}")]
    Translation(#[from] crate::TranslationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'mongosql docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::LexError> for CliError {
    fn from(e: crate::LexError) -> Self {
        CliError::Parse(e.into())
    }
}

impl From<crate::Error> for CliError {
    fn from(e: crate::Error) -> Self {
        match e {
            crate::Error::Parse(e) => CliError::Parse(e),
            crate::Error::Translation(e) => CliError::Translation(e),
        }
    }
}
