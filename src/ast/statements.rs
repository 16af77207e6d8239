use crate::ast::{AggregateOperation, Expr, SelectOperation};

/// Root of a compiled statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A bare expression
    ///
    /// Lowers to a plain document; useful for building filters or pipeline
    /// fragments without an operation around them.
    ///
    /// # Example
    /// ```text
    /// {title = 1, stats = {pv = '$pageViews'}}
    /// ```
    Expression(Expr),

    /// Simple lookup, executed with `find`
    ///
    /// # Example
    /// ```text
    /// SELECT item, price FROM fruit WHERE price > 12 SORT price DESC
    /// ```
    Select(SelectOperation),

    /// Aggregation pipeline
    ///
    /// # Example
    /// ```text
    /// AGGREGATE article PROJECT title = 1, author = 1
    /// ```
    Aggregate(AggregateOperation),
}

impl Statement {
    /// Collection the statement runs against, if it is an operation.
    pub fn collection(&self) -> Option<&str> {
        match self {
            Statement::Expression(_) => None,
            Statement::Select(select) => Some(&select.collection),
            Statement::Aggregate(aggregate) => Some(&aggregate.collection),
        }
    }
}
