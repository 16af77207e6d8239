use indexmap::IndexMap;

use crate::ast::{Expr, Stage};

/// Sort direction of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// `1` for ascending, `-1` for descending.
    pub fn as_i64(self) -> i64 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Ordered field → direction mapping.
///
/// Setting a field twice keeps its original position and the last direction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortSpec(IndexMap<String, SortDirection>);

impl SortSpec {
    pub fn new() -> Self {
        SortSpec::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, direction: SortDirection) {
        self.0.insert(field.into(), direction);
    }

    pub fn get(&self, field: &str) -> Option<SortDirection> {
        self.0.get(field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SortDirection)> {
        self.0.iter().map(|(field, dir)| (field.as_str(), *dir))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, SortDirection)> for SortSpec {
    fn from_iter<I: IntoIterator<Item = (S, SortDirection)>>(iter: I) -> Self {
        let mut spec = SortSpec::new();
        for (field, direction) in iter {
            spec.insert(field, direction);
        }
        spec
    }
}

/// `SELECT <fields> FROM <collection> [WHERE ..] [LIMIT ..] [SKIP ..] [SORT ..]`
///
/// Every optional clause may appear in any order after the head; a repeated
/// clause replaces the earlier value.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOperation {
    pub collection: String,

    /// `WHERE` condition
    pub filter: Option<Expr>,

    /// Selected fields; `None` for `*`
    pub fields: Option<Vec<String>>,

    pub limit: Option<i64>,

    pub skip: Option<i64>,

    pub sort: Option<SortSpec>,
}

impl SelectOperation {
    pub fn new(collection: impl Into<String>, fields: Option<Vec<String>>) -> Self {
        SelectOperation {
            collection: collection.into(),
            filter: None,
            fields,
            limit: None,
            skip: None,
            sort: None,
        }
    }
}

/// `AGGREGATE <collection> <stage>*`
///
/// Each stage clause appends to the pipeline, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOperation {
    pub collection: String,
    pub pipeline: Vec<Stage>,
}

impl AggregateOperation {
    pub fn new(collection: impl Into<String>) -> Self {
        AggregateOperation {
            collection: collection.into(),
            pipeline: Vec::new(),
        }
    }
}
