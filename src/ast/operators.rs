/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Modulo (`%`)
    Modulo,
}

impl BinOp {
    /// Aggregation operator the expression lowers to.
    pub fn operator_name(self) -> &'static str {
        match self {
            BinOp::Add => "$add",
            BinOp::Subtract => "$subtract",
            BinOp::Multiply => "$multiply",
            BinOp::Divide => "$divide",
            BinOp::Modulo => "$mod",
        }
    }
}

/// Comparison operators. All share one precedence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Membership (`IN`)
    In,
}

impl CmpOp {
    /// Query operator the comparison lowers to. Equality lowers to the
    /// `{field: value}` shorthand, so `"$eq"` is never emitted.
    pub fn operator_name(self) -> &'static str {
        match self {
            CmpOp::Equal => "$eq",
            CmpOp::NotEqual => "$ne",
            CmpOp::LessThan => "$lt",
            CmpOp::LessEqual => "$lte",
            CmpOp::GreaterThan => "$gt",
            CmpOp::GreaterEqual => "$gte",
            CmpOp::In => "$in",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Equal => "==",
            CmpOp::NotEqual => "!=",
            CmpOp::LessThan => "<",
            CmpOp::LessEqual => "<=",
            CmpOp::GreaterThan => ">",
            CmpOp::GreaterEqual => ">=",
            CmpOp::In => "IN",
        }
    }
}
