//! # Expression Module
//!
//! Arithmetic on numbers only, used for particle counts like "6.02 * 10**23" or "3.01e23".
//!
//! PIPELINE: text --> tokens --> expression tree --> value
//!
//! Supported: decimal literals (with an optional exponent), `+ - * /`, `**` (right associative,
//! binds tighter than unary minus: -2**2 = -4), parentheses, unary minus and plus.
//! Names and function calls are rejected.
use crate::errors::{ChemError, ChemResult};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// deepest nesting of parentheses, unary signs and powers
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(f64),
    Negate(Box<Expression>),
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
        }
    }

    fn error(&self, reason: &str) -> ChemError {
        ChemError::input_format(self.input, reason)
    }

    fn digits(&mut self, text: &mut String) {
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.chars.next();
        }
    }

    fn number(&mut self) -> ChemResult<Token> {
        let mut text = String::new();
        self.digits(&mut text);
        if self.chars.peek() == Some(&'.') {
            text.push('.');
            self.chars.next();
            self.digits(&mut text);
        }
        if matches!(self.chars.peek(), Some('e') | Some('E')) {
            text.push('e');
            self.chars.next();
            if let Some(&sign) = self.chars.peek() {
                if sign == '+' || sign == '-' {
                    text.push(sign);
                    self.chars.next();
                }
            }
            let before = text.len();
            self.digits(&mut text);
            if text.len() == before {
                return Err(self.error("exponent without digits"));
            }
        }
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| self.error(&format!("invalid number '{}'", text)))
    }

    pub fn tokenize(mut self) -> ChemResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(&c) = self.chars.peek() {
            let token = match c {
                c if c.is_whitespace() => {
                    self.chars.next();
                    continue;
                }
                c if c.is_ascii_digit() || c == '.' => {
                    tokens.push(self.number()?);
                    continue;
                }
                '+' => Token::Plus,
                '-' => Token::Minus,
                '/' => Token::Slash,
                '(' => Token::LParen,
                ')' => Token::RParen,
                '*' => {
                    self.chars.next();
                    if self.chars.peek() == Some(&'*') {
                        self.chars.next();
                        tokens.push(Token::Power);
                    } else {
                        tokens.push(Token::Star);
                    }
                    continue;
                }
                other => return Err(self.error(&format!("unexpected character '{}'", other))),
            };
            self.chars.next();
            tokens.push(token);
        }
        Ok(tokens)
    }
}

pub struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            input,
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn error(&self, reason: &str) -> ChemError {
        ChemError::input_format(self.input, reason)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        self.position += 1;
        token
    }

    pub fn parse(mut self) -> ChemResult<Expression> {
        let expression = self.sum()?;
        if let Some(token) = self.peek() {
            return Err(self.error(&format!("unexpected {:?}", token)));
        }
        Ok(expression)
    }

    // sum := product (('+' | '-') product)*
    fn sum(&mut self) -> ChemResult<Expression> {
        let mut left = self.product()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOperator::Add,
                Some(Token::Minus) => BinaryOperator::Subtract,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.product()?;
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    // product := unary (('*' | '/') unary)*
    fn product(&mut self) -> ChemResult<Expression> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOperator::Multiply,
                Some(Token::Slash) => BinaryOperator::Divide,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.unary()?;
            left = Expression::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
    }

    fn unary(&mut self) -> ChemResult<Expression> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error(&format!("nesting deeper than {}", MAX_DEPTH)));
        }
        let expression = self.signed();
        self.depth -= 1;
        expression
    }

    // unary := ('-' | '+') unary | power
    fn signed(&mut self) -> ChemResult<Expression> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(Expression::Negate(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    // power := atom ('**' unary)?
    fn power(&mut self) -> ChemResult<Expression> {
        let base = self.atom()?;
        if self.peek() == Some(&Token::Power) {
            self.advance();
            let exponent = self.unary()?;
            return Ok(Expression::Binary {
                op: BinaryOperator::Power,
                left: Box::new(base),
                right: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn atom(&mut self) -> ChemResult<Expression> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expression::Number(value)),
            Some(Token::LParen) => {
                let inner = self.sum()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("missing ')'")),
                }
            }
            Some(token) => Err(self.error(&format!("unexpected {:?}", token))),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}

impl Expression {
    pub fn evaluate(&self) -> ChemResult<f64> {
        match self {
            Expression::Number(value) => Ok(*value),
            Expression::Negate(inner) => Ok(-inner.evaluate()?),
            Expression::Binary { op, left, right } => {
                let (a, b) = (left.evaluate()?, right.evaluate()?);
                let value = match op {
                    BinaryOperator::Add => a + b,
                    BinaryOperator::Subtract => a - b,
                    BinaryOperator::Multiply => a * b,
                    BinaryOperator::Divide => {
                        if b == 0.0 {
                            return Err(self.failure("division by zero"));
                        }
                        a / b
                    }
                    BinaryOperator::Power => a.powf(b),
                };
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(self.failure("result is not a finite number"))
                }
            }
        }
    }

    fn failure(&self, reason: &str) -> ChemError {
        ChemError::Evaluation {
            expression: self.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "**",
        };
        write!(f, "{}", symbol)
    }
}

/// fully parenthesized: "(1 / (2 - 2))"
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(value) => write!(f, "{}", value),
            Expression::Negate(inner) => write!(f, "-{}", inner),
            Expression::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

/// Evaluate a numeric expression: "6.02 * 10**23" -> 6.02e23
pub fn evaluate(input: &str) -> ChemResult<f64> {
    let tokens = Lexer::new(input).tokenize()?;
    if tokens.is_empty() {
        return Err(ChemError::input_format(input, "empty expression"));
    }
    Parser::new(input, tokens).parse()?.evaluate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_particle_counts() {
        assert_relative_eq!(evaluate("6.02 * 10**23").unwrap(), 6.02e23, max_relative = 1e-12);
        assert_relative_eq!(evaluate("3.01e23").unwrap(), 3.01e23);
        assert_relative_eq!(evaluate("12.04*10**23").unwrap(), 1.204e24, max_relative = 1e-12);
    }

    #[test]
    fn test_precedence() {
        assert_relative_eq!(evaluate("1 + 2 * 3").unwrap(), 7.0);
        assert_relative_eq!(evaluate("(1 + 2) * 3").unwrap(), 9.0);
        assert_relative_eq!(evaluate("2 ** 3 ** 2").unwrap(), 512.0);
        assert_relative_eq!(evaluate("-2 ** 2").unwrap(), -4.0);
        assert_relative_eq!(evaluate("10 ** -1").unwrap(), 0.1);
        assert_relative_eq!(evaluate("8 / 4 / 2").unwrap(), 1.0);
        assert_relative_eq!(evaluate("--3").unwrap(), 3.0);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(evaluate(""), Err(ChemError::InputFormat { .. })));
        assert!(matches!(evaluate("2 +"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(evaluate("(2 + 3"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(evaluate("x * 2"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(evaluate("2 3"), Err(ChemError::InputFormat { .. })));
        assert!(matches!(evaluate("1 / 0"), Err(ChemError::Evaluation { .. })));
        assert!(matches!(evaluate("10 ** 400"), Err(ChemError::Evaluation { .. })));
    }

    #[test]
    fn test_evaluation_error_names_the_failing_part() {
        match evaluate("3 + 1 / (2 - 2)") {
            Err(ChemError::Evaluation { expression, reason }) => {
                assert_eq!(expression, "(1 / (2 - 2))");
                assert_eq!(reason, "division by zero");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
        assert!(matches!(evaluate(&deep), Err(ChemError::InputFormat { .. })));
        let signs = format!("{}1", "-".repeat(200_000));
        assert!(matches!(evaluate(&signs), Err(ChemError::InputFormat { .. })));
        let powers = vec!["1"; 100_000].join("**");
        assert!(matches!(evaluate(&powers), Err(ChemError::InputFormat { .. })));

        let shallow = format!("{}6.02{}", "(".repeat(100), ")".repeat(100));
        assert_relative_eq!(evaluate(&shallow).unwrap(), 6.02);
        assert_relative_eq!(evaluate(&format!("{}2", "-".repeat(100))).unwrap(), 2.0);
    }
}
