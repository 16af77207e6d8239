use std::fmt;

/// A lexical token together with the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based source line
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Token { kind, line }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Floating-point number, always written with a fractional part
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 0.5
    /// ```
    Float(f64),

    /// Integer
    ///
    /// Negative numbers are not lexed; `-10` is a unary minus applied to `10`.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 100
    /// ```
    Integer(i64),

    /// String literal in single or double quotes, escapes already decoded
    ///
    /// # Examples
    /// ```text
    /// 'value'
    /// "$pageViews"
    /// "tab\tseparated"
    /// ```
    String(String),

    /// `true` or `false` (lowercase only)
    Boolean(bool),

    /// `null` (lowercase only)
    Null,

    // Identifiers
    /// Field, collection or function name, optionally dotted
    ///
    /// # Examples
    /// ```text
    /// mycollection
    /// author.name
    /// _id
    /// ```
    Symbol(String),

    // Delimiters
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    /// Key separator in JSON-style maps
    Colon,
    /// Statement terminator
    Semicolon,
    Comma,

    // Operators
    /// Equality comparison (`==`)
    DblEqual,
    /// Assignment (`=`)
    Equal,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Inequality (`!=`)
    Ne,
    Plus,
    Minus,
    /// Multiplication, or "all fields" after `SELECT`
    Star,
    Slash,
    Percent,

    // Reserved keywords (case-insensitive)
    Select,
    From,
    Where,
    Order,
    By,
    As,
    And,
    Or,
    Not,
    In,
    Asc,
    Desc,
    Aggregate,
    Project,
    Match,
    Limit,
    Skip,
    Unwind,
    Group,
    Sort,
    GeoNear,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Look up a reserved keyword. `word` must already be upper-cased.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "SELECT" => TokenKind::Select,
            "FROM" => TokenKind::From,
            "WHERE" => TokenKind::Where,
            "ORDER" => TokenKind::Order,
            "BY" => TokenKind::By,
            "AS" => TokenKind::As,
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            "IN" => TokenKind::In,
            "ASC" => TokenKind::Asc,
            "DESC" => TokenKind::Desc,
            "AGGREGATE" => TokenKind::Aggregate,
            "PROJECT" => TokenKind::Project,
            "MATCH" => TokenKind::Match,
            "LIMIT" => TokenKind::Limit,
            "SKIP" => TokenKind::Skip,
            "UNWIND" => TokenKind::Unwind,
            "GROUP" => TokenKind::Group,
            "SORT" => TokenKind::Sort,
            "GEO_NEAR" => TokenKind::GeoNear,
            _ => return None,
        };
        Some(kind)
    }

    fn keyword_text(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Select => "SELECT",
            TokenKind::From => "FROM",
            TokenKind::Where => "WHERE",
            TokenKind::Order => "ORDER",
            TokenKind::By => "BY",
            TokenKind::As => "AS",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::In => "IN",
            TokenKind::Asc => "ASC",
            TokenKind::Desc => "DESC",
            TokenKind::Aggregate => "AGGREGATE",
            TokenKind::Project => "PROJECT",
            TokenKind::Match => "MATCH",
            TokenKind::Limit => "LIMIT",
            TokenKind::Skip => "SKIP",
            TokenKind::Unwind => "UNWIND",
            TokenKind::Group => "GROUP",
            TokenKind::Sort => "SORT",
            TokenKind::GeoNear => "GEO_NEAR",
            _ => return None,
        };
        Some(text)
    }

    fn punctuation_text(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::DblEqual => "==",
            TokenKind::Equal => "=",
            TokenKind::Gt => ">",
            TokenKind::Gte => ">=",
            TokenKind::Lt => "<",
            TokenKind::Lte => "<=",
            TokenKind::Ne => "!=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.keyword_text() {
            return write!(f, "keyword {}", text);
        }
        if let Some(text) = self.punctuation_text() {
            return write!(f, "'{}'", text);
        }
        match self {
            TokenKind::Float(n) => write!(f, "float {:?}", n),
            TokenKind::Integer(n) => write!(f, "integer {}", n),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::Boolean(b) => write!(f, "{}", b),
            TokenKind::Null => write!(f, "null"),
            TokenKind::Symbol(name) => write!(f, "symbol `{}`", name),
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "{:?}", self),
        }
    }
}
