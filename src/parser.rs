use std::mem;

use thiserror::Error;

use crate::{
    ast::{
        AggregateOperation, BinOp, CmpOp, Expr, NamedAssignment, ProjectStage, SelectOperation,
        SortDirection, SortSpec, Stage, Statement, Token, TokenKind,
    },
    lexer::{LexError, Lexer},
};

/// Errors raised while turning source text into a [`Statement`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// `found` is [`TokenKind::Eof`] when the input ended too early.
    #[error("line {line}: expected {expected}, found {found}")]
    Syntax {
        found: TokenKind,
        expected: String,
        line: usize,
    },

    #[error("line {line}: expression nested deeper than {limit} levels")]
    TooDeep { limit: usize, line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lex(e) => e.line(),
            ParseError::Syntax { line, .. } | ParseError::TooDeep { line, .. } => *line,
        }
    }
}

/// Deepest nesting of parentheses, documents, lists, calls and prefix
/// operators accepted in one expression.
pub const MAX_NESTING: usize = 64;

/// Parse a complete statement.
pub fn parse(query: &str) -> Result<Statement, ParseError> {
    Parser::new(Lexer::new(query))?.parse()
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peeked: Option<Token>,
    /// `parse_unary` frames currently on the stack
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            peeked: None,
            depth: 0,
        })
    }

    /// Move to the next token, returning the one just left behind.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(mem::replace(&mut self.current, next))
    }

    /// Kind of the token after the current one.
    fn peek(&mut self) -> Result<&TokenKind, ParseError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(&self.peeked.insert(token).kind)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.current.kind) == mem::discriminant(kind)
    }

    /// Consume the current token if it is of `kind`.
    fn eat(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(self.error(expected))
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        ParseError::Syntax {
            found: self.current.kind.clone(),
            expected: expected.to_string(),
            line: self.current.line,
        }
    }

    fn expect_symbol(&mut self, expected: &str) -> Result<String, ParseError> {
        match &mut self.current.kind {
            TokenKind::Symbol(name) => {
                let name = mem::take(name);
                self.advance()?;
                Ok(name)
            }
            _ => Err(self.error(expected)),
        }
    }

    fn expect_integer(&mut self, expected: &str) -> Result<i64, ParseError> {
        match self.current.kind {
            TokenKind::Integer(n) => {
                self.advance()?;
                Ok(n)
            }
            _ => Err(self.error(expected)),
        }
    }

    /// Parse a whole statement, including trailing semicolons, up to the end
    /// of input.
    pub fn parse(&mut self) -> Result<Statement, ParseError> {
        let (statement, expected_next) = match self.current.kind {
            TokenKind::Select => (
                Statement::Select(self.parse_select()?),
                "WHERE, LIMIT, SKIP, SORT, ORDER BY, ';' or end of input",
            ),
            TokenKind::Aggregate => (
                Statement::Aggregate(self.parse_aggregate()?),
                "a pipeline stage, ';' or end of input",
            ),
            _ => (
                Statement::Expression(self.parse_expression()?),
                "an operator, ';' or end of input",
            ),
        };

        while self.eat(&TokenKind::Semicolon)? {}

        if !self.check(&TokenKind::Eof) {
            return Err(self.error(expected_next));
        }

        tracing::debug!(collection = ?statement.collection(), "parsed statement");
        Ok(statement)
    }

    fn parse_select(&mut self) -> Result<SelectOperation, ParseError> {
        self.advance()?; // SELECT

        let fields = if self.eat(&TokenKind::Star)? {
            None
        } else {
            Some(self.parse_symbol_list()?)
        };

        self.expect(TokenKind::From, "',' or FROM")?;
        let collection = self.expect_symbol("collection name after FROM")?;
        let mut select = SelectOperation::new(collection, fields);

        loop {
            match self.current.kind {
                TokenKind::Where => {
                    self.advance()?;
                    select.filter = Some(self.parse_expression()?);
                }
                TokenKind::Limit => {
                    self.advance()?;
                    select.limit = Some(self.expect_integer("integer after LIMIT")?);
                }
                TokenKind::Skip => {
                    self.advance()?;
                    select.skip = Some(self.expect_integer("integer after SKIP")?);
                }
                TokenKind::Sort => {
                    self.advance()?;
                    select.sort = Some(self.parse_sort_spec()?);
                }
                TokenKind::Order => {
                    self.advance()?;
                    self.expect(TokenKind::By, "BY after ORDER")?;
                    select.sort = Some(self.parse_sort_spec()?);
                }
                _ => return Ok(select),
            }
        }
    }

    fn parse_symbol_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut symbols = vec![self.expect_symbol("'*' or field name")?];
        while self.eat(&TokenKind::Comma)? {
            symbols.push(self.expect_symbol("field name")?);
        }
        Ok(symbols)
    }

    /// `field [ASC|DESC] (, field [ASC|DESC])*`
    fn parse_sort_spec(&mut self) -> Result<SortSpec, ParseError> {
        let mut spec = SortSpec::new();
        loop {
            let field = self.expect_symbol("field name to sort by")?;
            let direction = if self.eat(&TokenKind::Desc)? {
                SortDirection::Descending
            } else {
                self.eat(&TokenKind::Asc)?;
                SortDirection::Ascending
            };
            spec.insert(field, direction);

            if !self.eat(&TokenKind::Comma)? {
                return Ok(spec);
            }
        }
    }

    fn parse_aggregate(&mut self) -> Result<AggregateOperation, ParseError> {
        self.advance()?; // AGGREGATE

        let collection = self.expect_symbol("collection name after AGGREGATE")?;
        let mut aggregate = AggregateOperation::new(collection);

        while let Some(stage) = self.parse_stage()? {
            aggregate.pipeline.push(stage);
        }
        Ok(aggregate)
    }

    fn parse_stage(&mut self) -> Result<Option<Stage>, ParseError> {
        let stage = match self.current.kind {
            TokenKind::Project => {
                self.advance()?;
                Stage::Project(ProjectStage {
                    assignments: self.parse_assignment_list()?,
                })
            }
            TokenKind::Match => {
                self.advance()?;
                Stage::Match(self.parse_expression()?)
            }
            TokenKind::Limit => {
                self.advance()?;
                Stage::Limit(self.expect_integer("integer after LIMIT")?)
            }
            TokenKind::Skip => {
                self.advance()?;
                Stage::Skip(self.expect_integer("integer after SKIP")?)
            }
            TokenKind::Sort => {
                self.advance()?;
                Stage::Sort(self.parse_sort_spec()?)
            }
            TokenKind::Order => {
                self.advance()?;
                self.expect(TokenKind::By, "BY after ORDER")?;
                Stage::Sort(self.parse_sort_spec()?)
            }
            TokenKind::Unwind => {
                self.advance()?;
                Stage::Unwind(self.parse_expression()?)
            }
            TokenKind::Group => {
                self.advance()?;
                Stage::Group(self.parse_assignment_list()?)
            }
            TokenKind::GeoNear => {
                self.advance()?;
                Stage::GeoNear(self.parse_expression()?)
            }
            _ => return Ok(None),
        };
        Ok(Some(stage))
    }

    fn parse_assignment_list(&mut self) -> Result<Vec<NamedAssignment>, ParseError> {
        let mut assignments = vec![self.parse_assignment()?];
        while self.eat(&TokenKind::Comma)? {
            assignments.push(self.parse_assignment()?);
        }
        Ok(assignments)
    }

    /// `name = expression` or `expression AS name`
    fn parse_assignment(&mut self) -> Result<NamedAssignment, ParseError> {
        if matches!(self.current.kind, TokenKind::Symbol(_))
            && matches!(self.peek()?, TokenKind::Equal)
        {
            let name = self.expect_symbol("assignment name")?;
            self.advance()?; // '='
            let expression = self.parse_expression()?;
            return Ok(NamedAssignment::new(name, expression));
        }

        let expression = self.parse_expression()?;
        self.expect(TokenKind::As, "'=' or AS")?;
        let name = self.expect_symbol("name after AS")?;
        Ok(NamedAssignment::new(name, expression))
    }

    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.eat(&TokenKind::Or)? {
            let right = self.parse_and()?;
            left = left.or(right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;

        while self.eat(&TokenKind::And)? {
            let right = self.parse_comparison()?;
            left = left.and(right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.current.kind {
                TokenKind::DblEqual => CmpOp::Equal,
                TokenKind::Ne => CmpOp::NotEqual,
                TokenKind::In => CmpOp::In,
                TokenKind::Lt => CmpOp::LessThan,
                TokenKind::Lte => CmpOp::LessEqual,
                TokenKind::Gt => CmpOp::GreaterThan,
                TokenKind::Gte => CmpOp::GreaterEqual,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_additive()?;
            left = Expr::comparison(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Subtract,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current.kind {
                TokenKind::Star => BinOp::Multiply,
                TokenKind::Slash => BinOp::Divide,
                TokenKind::Percent => BinOp::Modulo,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// Every nested construct re-enters here, so the depth check bounds the
    /// recursion of the whole descent.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING,
                line: self.current.line,
            });
        }

        self.depth += 1;
        let result = self.parse_prefixed();
        self.depth -= 1;
        result
    }

    /// `NOT` and unary minus bind tighter than every binary operator.
    fn parse_prefixed(&mut self) -> Result<Expr, ParseError> {
        match self.current.kind {
            TokenKind::Not => {
                self.advance()?;
                let operand = self.parse_unary()?; // Right-associative
                Ok(Expr::Not(Box::new(operand)))
            }
            TokenKind::Minus => {
                self.advance()?;
                let operand = self.parse_unary()?;
                Ok(negate(operand))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance()?;

        match token.kind {
            TokenKind::Float(n) => Ok(Expr::Float(n)),
            TokenKind::Integer(n) => Ok(Expr::Integer(n)),
            TokenKind::String(s) => Ok(Expr::String(s)),
            TokenKind::Boolean(b) => Ok(Expr::Boolean(b)),
            TokenKind::Null => Ok(Expr::Null),

            TokenKind::Symbol(name) => {
                if self.eat(&TokenKind::LParen)? {
                    let args = self.parse_call_arguments()?;
                    Ok(Expr::FunctionCall { name, args })
                } else {
                    Ok(Expr::Symbol(name))
                }
            }

            TokenKind::LParen => {
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }

            TokenKind::LBrace => self.parse_document(),
            TokenKind::LBracket => self.parse_list(),

            found => Err(ParseError::Syntax {
                found,
                expected: "expression".to_string(),
                line: token.line,
            }),
        }
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = vec![];
        if self.eat(&TokenKind::RParen)? {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }

        self.expect(TokenKind::RParen, "',' or ')'")?;
        Ok(args)
    }

    /// `{}`, `{name = expr, ...}`, `{key: expr, ...}`; the two entry forms may
    /// be mixed and a trailing comma is allowed.
    fn parse_document(&mut self) -> Result<Expr, ParseError> {
        let mut entries = vec![];

        while !self.check(&TokenKind::RBrace) {
            entries.push(self.parse_document_entry()?);

            if !self.check(&TokenKind::RBrace) {
                self.expect(TokenKind::Comma, "',' or '}'")?;
            }
        }

        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(Expr::Document(entries))
    }

    fn parse_document_entry(&mut self) -> Result<(String, Expr), ParseError> {
        if matches!(self.peek()?, TokenKind::Colon) {
            if let TokenKind::Symbol(key) | TokenKind::String(key) = &mut self.current.kind {
                let key = mem::take(key);
                self.advance()?; // key
                self.advance()?; // ':'
                let value = self.parse_expression()?;
                return Ok((key, value));
            }
        }

        let assignment = self.parse_assignment()?;
        Ok((assignment.name, assignment.expression))
    }

    fn parse_list(&mut self) -> Result<Expr, ParseError> {
        let mut elements = vec![];

        while !self.check(&TokenKind::RBracket) {
            elements.push(self.parse_expression()?);

            if !self.check(&TokenKind::RBracket) {
                self.expect(TokenKind::Comma, "',' or ']'")?;
            }
        }

        self.expect(TokenKind::RBracket, "']'")?;
        Ok(Expr::List(elements))
    }
}

/// Unary minus: numeric literals fold into negative literals, anything else
/// becomes `0 - operand`.
fn negate(operand: Expr) -> Expr {
    match operand {
        Expr::Integer(n) => match n.checked_neg() {
            Some(negated) => Expr::Integer(negated),
            None => Expr::binary(BinOp::Subtract, Expr::Integer(0), Expr::Integer(n)),
        },
        Expr::Float(n) => Expr::Float(-n),
        operand => Expr::binary(BinOp::Subtract, Expr::Integer(0), operand),
    }
}
