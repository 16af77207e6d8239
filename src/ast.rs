//! # MongoSQL - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for MongoSQL, a small
//! SQL-like language that compiles to document-store queries and aggregation
//! pipelines.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, symbols, operations, maps, lists)
//! - **[operators]** - Arithmetic and comparison operators
//! - **[statements]** - The statement root: expression, `SELECT` or `AGGREGATE`
//! - **[query]** - Select and aggregate operations, sort specifications
//! - **[stages]** - Aggregation pipeline stages and named assignments
//!
//! ## Quick Start
//!
//! ```text
//! SELECT * FROM mycollection WHERE field == 'value'
//! ```
//!
//! lowers to the filter `{"field": "value"}` against `mycollection`.
//!
//! ## Statement Forms
//!
//! ### Select
//!
//! ```text
//! SELECT field, field1 FROM mycollection
//! WHERE field == 'value'
//! LIMIT 100 SKIP 20
//! SORT field1 ASC, field2 DESC
//! ```
//!
//! Clauses after `FROM` may come in any order; repeating one replaces it.
//!
//! ### Aggregate
//!
//! ```text
//! AGGREGATE article
//! PROJECT title = 1, doctoredPageViews = "$pageViews" + 10
//! ```
//!
//! Every stage clause appends one stage to the pipeline.
//!
//! ### Bare Expressions
//!
//! ```text
//! {pv = '$pageViews', dpv = '$pageViews' + 10}
//! ```
//!
//! ## Symbols and Field References
//!
//! A symbol (`price`, `author.name`) always lowers to its bare name. Inside
//! aggregation expressions a field reference is a string starting with `$`:
//!
//! ```text
//! PROJECT page_views = '$pageViews'
//! ```
//!
//! ## Operator Precedence (lowest to highest)
//!
//! | Tier | Operators                          |
//! |------|------------------------------------|
//! | 1    | `OR`                               |
//! | 2    | `AND`                              |
//! | 3    | `==` `!=` `IN` `<` `<=` `>` `>=`   |
//! | 4    | `+` `-`                            |
//! | 5    | `*` `/` `%`                        |
//! | 6    | unary `NOT`, unary `-`             |
//!
//! `AND` and `OR` chains are stored flat: `a AND b AND c` is a single node
//! with three children.
pub mod tokens;
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod query;
pub mod stages;

pub use tokens::{Token, TokenKind};
pub use expressions::Expr;
pub use operators::{BinOp, CmpOp};
pub use statements::Statement;
pub use query::{AggregateOperation, SelectOperation, SortDirection, SortSpec};
pub use stages::{NamedAssignment, ProjectStage, Stage};
