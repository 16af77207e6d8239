//! Lowering of AST nodes into target query documents.
//!
//! Lowering is pure: the same node always produces the same document, and
//! trees can be lowered concurrently.

use thiserror::Error;

use crate::{
    ast::{
        AggregateOperation, CmpOp, Expr, NamedAssignment, ProjectStage, SelectOperation,
        SortSpec, Stage, Statement,
    },
    value::{Document, Value},
};

/// The AST is well-formed but has no document representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// Comparisons are lowered as `{field: ...}`, so the left side must name
    /// a field.
    #[error("cannot translate `{}` comparison: left operand must be a field name, found {found}", .op.symbol())]
    ComparisonTarget { op: CmpOp, found: &'static str },
}

/// Conversion of an AST node into its target document.
pub trait Lower {
    fn lower(&self) -> Result<Value, TranslationError>;
}

impl Lower for Expr {
    fn lower(&self) -> Result<Value, TranslationError> {
        match self {
            Expr::Null => Ok(Value::Null),
            Expr::Boolean(b) => Ok(Value::Boolean(*b)),
            Expr::Integer(n) => Ok(Value::Integer(*n)),
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::String(s) => Ok(Value::String(s.clone())),

            // Symbols are bare names, never auto-prefixed with '$'
            Expr::Symbol(name) => Ok(Value::String(name.clone())),

            Expr::BinaryOp { op, left, right } => Ok(Value::single(
                op.operator_name(),
                Value::Array(vec![left.lower()?, right.lower()?]),
            )),

            Expr::Comparison { op, left, right } => lower_comparison(*op, left, right),

            Expr::And(children) => Ok(Value::single("$and", lower_all(children)?)),
            Expr::Or(children) => Ok(Value::single("$or", lower_all(children)?)),
            Expr::Not(inner) => Ok(Value::single("$not", inner.lower()?)),

            Expr::FunctionCall { name, args } => {
                Ok(Value::single(format!("${}", name), lower_all(args)?))
            }

            Expr::Document(entries) => {
                let mut doc = Document::with_capacity(entries.len());
                for (key, value) in entries {
                    doc.insert(key.clone(), value.lower()?);
                }
                Ok(Value::Object(doc))
            }

            Expr::List(items) => lower_all(items),
        }
    }
}

fn lower_all(exprs: &[Expr]) -> Result<Value, TranslationError> {
    exprs
        .iter()
        .map(Lower::lower)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// `field == v` → `{field: v}`; every other operator → `{field: {$op: v}}`.
fn lower_comparison(op: CmpOp, left: &Expr, right: &Expr) -> Result<Value, TranslationError> {
    let Expr::Symbol(field) = left else {
        return Err(TranslationError::ComparisonTarget {
            op,
            found: left.kind_name(),
        });
    };

    let value = right.lower()?;
    let condition = match op {
        CmpOp::Equal => value,
        op => Value::single(op.operator_name(), value),
    };
    Ok(Value::single(field.clone(), condition))
}

/// Build a document from assignments; a repeated name keeps the last value.
fn lower_assignments(assignments: &[NamedAssignment]) -> Result<Value, TranslationError> {
    let mut doc = Document::with_capacity(assignments.len());
    for assignment in assignments {
        doc.insert(assignment.name.clone(), assignment.expression.lower()?);
    }
    Ok(Value::Object(doc))
}

impl Lower for SortSpec {
    fn lower(&self) -> Result<Value, TranslationError> {
        Ok(Value::Object(self.sort_document()))
    }
}

impl SortSpec {
    fn sort_document(&self) -> Document {
        self.iter()
            .map(|(field, direction)| (field.to_string(), Value::Integer(direction.as_i64())))
            .collect()
    }
}

impl Lower for ProjectStage {
    fn lower(&self) -> Result<Value, TranslationError> {
        lower_assignments(&self.assignments)
    }
}

impl Lower for Stage {
    fn lower(&self) -> Result<Value, TranslationError> {
        let body = match self {
            Stage::Project(project) => project.lower()?,
            Stage::Match(expr) | Stage::Unwind(expr) | Stage::GeoNear(expr) => expr.lower()?,
            Stage::Limit(n) | Stage::Skip(n) => Value::Integer(*n),
            Stage::Sort(spec) => spec.lower()?,
            Stage::Group(assignments) => lower_assignments(assignments)?,
        };
        Ok(Value::single(self.operator_name(), body))
    }
}

/// Arguments for the store's `find`: only the parts present in the query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FindDescriptor {
    pub filter: Option<Value>,
    pub projection: Option<Vec<String>>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
    pub sort: Option<Document>,
}

impl FindDescriptor {
    /// `{filter?, projection?, limit?, skip?, sort?}`
    pub fn to_value(&self) -> Value {
        let mut doc = Document::new();
        if let Some(filter) = &self.filter {
            doc.insert("filter".to_string(), filter.clone());
        }
        if let Some(projection) = &self.projection {
            let fields = projection.iter().cloned().map(Value::String).collect();
            doc.insert("projection".to_string(), Value::Array(fields));
        }
        if let Some(limit) = self.limit {
            doc.insert("limit".to_string(), Value::Integer(limit));
        }
        if let Some(skip) = self.skip {
            doc.insert("skip".to_string(), Value::Integer(skip));
        }
        if let Some(sort) = &self.sort {
            doc.insert("sort".to_string(), Value::Object(sort.clone()));
        }
        Value::Object(doc)
    }
}

impl SelectOperation {
    pub fn find_descriptor(&self) -> Result<FindDescriptor, TranslationError> {
        Ok(FindDescriptor {
            filter: self.filter.as_ref().map(Lower::lower).transpose()?,
            projection: self.fields.clone(),
            limit: self.limit,
            skip: self.skip,
            sort: self.sort.as_ref().map(SortSpec::sort_document),
        })
    }
}

impl Lower for SelectOperation {
    fn lower(&self) -> Result<Value, TranslationError> {
        let descriptor = self.find_descriptor()?;
        tracing::debug!(collection = %self.collection, "lowered select");
        Ok(descriptor.to_value())
    }
}

impl AggregateOperation {
    /// The lowered stage documents, in order.
    pub fn lower_pipeline(&self) -> Result<Vec<Value>, TranslationError> {
        self.pipeline.iter().map(Lower::lower).collect()
    }
}

impl Lower for AggregateOperation {
    fn lower(&self) -> Result<Value, TranslationError> {
        let pipeline = self.lower_pipeline()?;
        tracing::debug!(
            collection = %self.collection,
            stages = pipeline.len(),
            "lowered aggregate"
        );
        Ok(Value::object([
            ("aggregate", Value::String(self.collection.clone())),
            ("pipeline", Value::Array(pipeline)),
        ]))
    }
}

impl Lower for Statement {
    fn lower(&self) -> Result<Value, TranslationError> {
        match self {
            Statement::Expression(expr) => expr.lower(),
            Statement::Select(select) => select.lower(),
            Statement::Aggregate(aggregate) => aggregate.lower(),
        }
    }
}
