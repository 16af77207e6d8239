//! Hand-off of compiled statements to a document store.
//!
//! The crate does not talk to a database itself. A client implements
//! [`DocumentStore`] and [`execute`] dispatches a parsed statement to `find`
//! or `aggregate`.

use thiserror::Error;

use crate::{
    ast::Statement,
    lower::{FindDescriptor, TranslationError},
    value::Value,
};

/// The execution capabilities the compiled queries need.
pub trait DocumentStore {
    type Error: std::error::Error + 'static;

    /// Run a lookup against `collection`.
    fn find(&self, collection: &str, descriptor: &FindDescriptor) -> Result<Vec<Value>, Self::Error>;

    /// Run an aggregation pipeline against `collection`.
    fn aggregate(&self, collection: &str, pipeline: &[Value]) -> Result<Vec<Value>, Self::Error>;
}

#[derive(Debug, Error)]
pub enum ExecuteError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// Bare expressions have no collection to run against.
    #[error("statement is an expression, not a SELECT or AGGREGATE operation")]
    NotAnOperation,

    #[error("store error: {0}")]
    Store(#[source] E),
}

/// Lower `statement` and run it against `store`.
pub fn execute<S: DocumentStore>(
    statement: &Statement,
    store: &S,
) -> Result<Vec<Value>, ExecuteError<S::Error>> {
    match statement {
        Statement::Expression(_) => Err(ExecuteError::NotAnOperation),
        Statement::Select(select) => {
            let descriptor = select.find_descriptor()?;
            tracing::debug!(collection = %select.collection, "executing find");
            store
                .find(&select.collection, &descriptor)
                .map_err(ExecuteError::Store)
        }
        Statement::Aggregate(aggregate) => {
            let pipeline = aggregate.lower_pipeline()?;
            tracing::debug!(
                collection = %aggregate.collection,
                stages = pipeline.len(),
                "executing aggregate"
            );
            store
                .aggregate(&aggregate.collection, &pipeline)
                .map_err(ExecuteError::Store)
        }
    }
}
