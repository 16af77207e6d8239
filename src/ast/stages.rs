use crate::ast::{Expr, SortSpec};

/// `name = expression` or `expression AS name`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedAssignment {
    pub name: String,
    pub expression: Expr,
}

impl NamedAssignment {
    pub fn new(name: impl Into<String>, expression: Expr) -> Self {
        NamedAssignment {
            name: name.into(),
            expression,
        }
    }
}

/// `PROJECT <assignment-list>`
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectStage {
    pub assignments: Vec<NamedAssignment>,
}

/// One step of an aggregation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Reshape documents
    ///
    /// # Example
    /// ```text
    /// PROJECT title = 1, doctoredPageViews = "$pageViews" + 10
    /// ```
    Project(ProjectStage),

    /// Filter documents
    ///
    /// # Example
    /// ```text
    /// MATCH author == "dave" AND score > 70
    /// ```
    Match(Expr),

    /// `LIMIT <int>`
    Limit(i64),

    /// `SKIP <int>`
    Skip(i64),

    /// `SORT <sort-spec>` or `ORDER BY <sort-spec>`
    Sort(SortSpec),

    /// Deconstruct an array field
    ///
    /// # Example
    /// ```text
    /// UNWIND '$tags'
    /// ```
    Unwind(Expr),

    /// Group documents by `_id` with accumulators
    ///
    /// # Example
    /// ```text
    /// GROUP _id = '$author', views = sum('$pageViews')
    /// ```
    Group(Vec<NamedAssignment>),

    /// Proximity search; the argument is the stage document
    ///
    /// # Example
    /// ```text
    /// GEO_NEAR {near = [-73.99, 40.73], distanceField = 'dist'}
    /// ```
    GeoNear(Expr),
}

impl Stage {
    /// Pipeline operator this stage lowers to.
    pub fn operator_name(&self) -> &'static str {
        match self {
            Stage::Project(_) => "$project",
            Stage::Match(_) => "$match",
            Stage::Limit(_) => "$limit",
            Stage::Skip(_) => "$skip",
            Stage::Sort(_) => "$sort",
            Stage::Unwind(_) => "$unwind",
            Stage::Group(_) => "$group",
            Stage::GeoNear(_) => "$geoNear",
        }
    }
}
