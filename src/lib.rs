//! MongoSQL - SQL-like queries for document stores
//!
//! Source text goes through the [`lexer`], the [`parser`] builds a
//! [`Statement`], and [`lower`] turns it into target query documents.
//!
//! ```
//! use serde_json::json;
//!
//! let find = mongosql::compile("SELECT * FROM fruit WHERE price > 12 LIMIT 10").unwrap();
//! assert_eq!(
//!     serde_json::Value::from(find),
//!     json!({"filter": {"price": {"$gt": 12}}, "limit": 10})
//! );
//! ```
pub mod ast;
pub mod cli;
pub mod lexer;
pub mod lower;
pub mod output;
pub mod parser;
pub mod store;
pub mod value;

use thiserror::Error;

pub use ast::{AggregateOperation, Expr, SelectOperation, Stage, Statement, Token, TokenKind};
pub use lexer::{LexError, Lexer, tokenize};
pub use lower::{FindDescriptor, Lower, TranslationError};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse};
pub use store::{DocumentStore, ExecuteError, execute};
pub use value::{Document, Value};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}

/// Parse and lower a statement in one go.
pub fn compile(query: &str) -> Result<Value, Error> {
    let statement = parse(query)?;
    Ok(statement.lower()?)
}
