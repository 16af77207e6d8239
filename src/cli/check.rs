//! Compile mongosql queries and report the result

use super::CliError;
use crate::{Lower, Token, parse, tokenize};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to compile
    pub query: String,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't lower
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query compiled to this document
    Success(serde_json::Value),
}

impl CheckResult {
    pub fn render(&self, pretty: bool) -> String {
        match self {
            CheckResult::SyntaxValid => "Syntax is valid".to_string(),
            CheckResult::Success(doc) if pretty => format!("{:#}", doc),
            CheckResult::Success(doc) => doc.to_string(),
        }
    }
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let statement = parse(&options.query)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let document = statement.lower()?;
    Ok(CheckResult::Success(document.into()))
}

/// Tokenize a query, failing on the first lexical error
pub fn list_tokens(query: &str) -> Result<Vec<Token>, CliError> {
    Ok(tokenize(query).collect::<Result<Vec<_>, _>>()?)
}
