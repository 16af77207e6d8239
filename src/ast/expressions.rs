use crate::ast::{BinOp, CmpOp};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Expressions are built once by the parser and never mutated afterwards;
/// they can be lowered any number of times.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    // Literals
    /// Literal floating point number
    ///
    /// # Example
    /// ```text
    /// 42.5
    /// ```
    Float(f64),

    /// Literal integer
    ///
    /// # Example
    /// ```text
    /// 42
    /// -7
    /// ```
    Integer(i64),

    /// String literal (escapes decoded, quotes stripped)
    ///
    /// # Example
    /// ```text
    /// "hello"
    /// '$pageViews'
    /// ```
    String(String),

    /// Boolean literal
    Boolean(bool),

    /// Null literal
    Null,

    /// Bare (possibly dotted) name
    ///
    /// Used for fields and collections. A symbol always lowers to its name
    /// as-is; field references inside aggregation expressions are written as
    /// strings starting with `$`.
    ///
    /// # Example
    /// ```text
    /// price
    /// author.name
    /// ```
    Symbol(String),

    /// Arithmetic operation
    ///
    /// # Example
    /// ```text
    /// "$pageViews" + 10
    /// ```
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Comparison
    ///
    /// The grammar accepts any left operand, but only a `Symbol` can be
    /// lowered.
    ///
    /// # Example
    /// ```text
    /// price >= 12
    /// item IN ["apple", "banana"]
    /// ```
    Comparison {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// N-ary conjunction, always flat (no `And` child)
    And(Vec<Expr>),

    /// N-ary disjunction, always flat (no `Or` child)
    Or(Vec<Expr>),

    /// Negation (`NOT expr`)
    Not(Box<Expr>),

    /// Function call
    ///
    /// # Example
    /// ```text
    /// concat("$first", " ", "$last")
    /// ```
    FunctionCall { name: String, args: Vec<Expr> },

    /// Map literal, in either `{k = v}` or `{k: v}` form. Keys may repeat.
    Document(Vec<(String, Expr)>),

    /// List literal
    List(Vec<Expr>),
}

impl Expr {
    /// Conjunction of `self` and `other`, splicing in the children of either
    /// side that is itself an `And`.
    pub fn and(self, other: Expr) -> Expr {
        let mut children = Vec::new();
        for operand in [self, other] {
            match operand {
                Expr::And(inner) => children.extend(inner),
                operand => children.push(operand),
            }
        }
        Expr::And(children)
    }

    /// Disjunction of `self` and `other`, splicing in the children of either
    /// side that is itself an `Or`.
    pub fn or(self, other: Expr) -> Expr {
        let mut children = Vec::new();
        for operand in [self, other] {
            match operand {
                Expr::Or(inner) => children.extend(inner),
                operand => children.push(operand),
            }
        }
        Expr::Or(children)
    }

    pub fn symbol(name: impl Into<String>) -> Expr {
        Expr::Symbol(name.into())
    }

    pub fn string(value: impl Into<String>) -> Expr {
        Expr::String(value.into())
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn comparison(op: CmpOp, left: Expr, right: Expr) -> Expr {
        Expr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Short description of the node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Float(_) => "float",
            Expr::Integer(_) => "integer",
            Expr::String(_) => "string",
            Expr::Boolean(_) => "boolean",
            Expr::Null => "null",
            Expr::Symbol(_) => "symbol",
            Expr::BinaryOp { .. } => "arithmetic expression",
            Expr::Comparison { .. } => "comparison",
            Expr::And(_) => "AND expression",
            Expr::Or(_) => "OR expression",
            Expr::Not(_) => "NOT expression",
            Expr::FunctionCall { .. } => "function call",
            Expr::Document(_) => "document",
            Expr::List(_) => "list",
        }
    }
}
