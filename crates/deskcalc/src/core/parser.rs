//! Arithmetic expression parser
//!
//! A dedicated recursive-descent parser restricted to decimal literals and
//! the four operators. Input is normalized and checked against a character
//! whitelist before any tokenizing happens.

use crate::core::operations::check_finite;
use crate::core::{CalcError, CalcResult, Operation};

/// Longest expression the parser accepts, in characters
pub const MAX_EXPRESSION_LEN: usize = 4096;

// Binding levels as reported by `Operation::precedence`
const LOWEST_PRECEDENCE: u8 = 1;
const HIGHEST_PRECEDENCE: u8 = 2;

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Decimal literal
    Number(f64),
    /// Operator (binary, or unary sign for `+`/`-`)
    Operator(Operation),
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Replaces the display glyphs `×` and `÷` with `*` and `/`
#[must_use]
pub fn normalize(expression: &str) -> String {
    expression.replace('×', "*").replace('÷', "/")
}

/// Returns true for characters allowed in an expression
#[must_use]
pub const fn is_allowed_char(ch: char) -> bool {
    matches!(ch, '0'..='9' | '+' | '-' | '*' | '/' | '.' | ' ')
}

/// Fails with the first character outside the whitelist
pub fn validate_chars(expression: &str) -> CalcResult<()> {
    match expression.chars().find(|ch| !is_allowed_char(*ch)) {
        Some(ch) => Err(CalcError::InvalidExpression(ch)),
        None => Ok(()),
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_spaces();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        if ch.is_ascii_digit() || ch == '.' {
            return self.read_number().map(Some);
        }

        match Operation::from_char(ch) {
            Some(op) => {
                self.advance();
                Ok(Some(Token::Operator(op)))
            }
            None => Err(CalcError::InvalidExpression(ch)),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_spaces(&mut self) {
        while self.current_char() == Some(' ') {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let literal = &self.input[start..self.pos];
        let value: f64 = literal
            .parse()
            .map_err(|_| CalcError::evaluation(format!("invalid number '{literal}'")))?;

        // A long enough digit run parses to infinity
        Ok(Token::Number(check_finite(value)?))
    }
}

/// Recursive descent parser
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary)*
/// unary      ::= ('+' | '-') unary | NUMBER
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Normalizes, validates and parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let normalized = normalize(input);
        validate_chars(&normalized)?;

        if normalized.chars().count() > MAX_EXPRESSION_LEN {
            return Err(CalcError::evaluation(format!(
                "expression longer than {MAX_EXPRESSION_LEN} characters"
            )));
        }

        let trimmed = normalized.trim();
        if trimmed.is_empty() {
            return Err(CalcError::evaluation("empty expression"));
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        let mut parser = Self::new(tokens);
        parser.parse()
    }

    /// Parses all tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::evaluation("empty expression"));
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::evaluation(format!(
                "unexpected {} at token {}",
                describe(token),
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        self.parse_binary(LOWEST_PRECEDENCE)
    }

    /// Left-associative chain of operators binding at exactly `level`
    fn parse_binary(&mut self, level: u8) -> CalcResult<AstNode> {
        if level > HIGHEST_PRECEDENCE {
            return self.parse_unary();
        }

        let mut left = self.parse_binary(level + 1)?;

        while let Some(&Token::Operator(op)) = self.current() {
            if op.precedence() != level {
                break;
            }
            self.advance();
            let right = self.parse_binary(level + 1)?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    // Sign runs are folded in a loop so "-----5" does not recurse per sign.
    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        let mut negative = false;
        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            if *op == Operation::Subtract {
                negative = !negative;
            }
            self.advance();
        }

        let operand = self.parse_primary()?;
        Ok(if negative {
            AstNode::negate(operand)
        } else {
            operand
        })
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(AstNode::number(*n)),
            Some(token) => Err(CalcError::evaluation(format!(
                "expected a number but found {}",
                describe(token)
            ))),
            None => Err(CalcError::evaluation("expression ends with an operator")),
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => format!("number {n}"),
        Token::Operator(op) => format!("operator '{}'", op.symbol()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Normalization and whitelist =====

    #[test]
    fn test_normalize_glyphs() {
        assert_eq!(normalize("6×7÷2"), "6*7/2");
        assert_eq!(normalize("1+2"), "1+2");
    }

    #[test]
    fn test_validate_chars_accepts_whitelist() {
        assert!(validate_chars("12 + 3.5 * 4 / 2 - 1").is_ok());
    }

    #[test]
    fn test_validate_chars_reports_first_offender() {
        assert_eq!(
            validate_chars("2+a+b"),
            Err(CalcError::InvalidExpression('a'))
        );
        assert_eq!(
            validate_chars("(1)"),
            Err(CalcError::InvalidExpression('('))
        );
        assert_eq!(
            validate_chars("1\t2"),
            Err(CalcError::InvalidExpression('\t'))
        );
    }

    #[test]
    fn test_parse_str_rejects_code_like_input() {
        assert!(matches!(
            Parser::parse_str("__import__('os')"),
            Err(CalcError::InvalidExpression('_'))
        ));
        assert!(matches!(
            Parser::parse_str("2**3e2"),
            Err(CalcError::InvalidExpression('e'))
        ));
    }

    // ===== Token tests =====

    #[test]
    fn test_token_predicates() {
        assert!(Token::Operator(Operation::Add).is_operator());
        assert!(!Token::Number(5.0).is_operator());
        assert!(Token::Number(5.0).is_number());
        assert!(!Token::Operator(Operation::Add).is_number());
    }

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_single_number() {
        let tokens = Tokenizer::new("42").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(42.0)]);
    }

    #[test]
    fn test_tokenize_decimal_forms() {
        assert_eq!(
            Tokenizer::new("3.25").tokenize().unwrap(),
            vec![Token::Number(3.25)]
        );
        assert_eq!(
            Tokenizer::new(".5").tokenize().unwrap(),
            vec![Token::Number(0.5)]
        );
        assert_eq!(
            Tokenizer::new("7.").tokenize().unwrap(),
            vec![Token::Number(7.0)]
        );
    }

    #[test]
    fn test_tokenize_operators() {
        let tokens = Tokenizer::new("+ - * /").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Operator(Operation::Add),
                Token::Operator(Operation::Subtract),
                Token::Operator(Operation::Multiply),
                Token::Operator(Operation::Divide),
            ]
        );
    }

    #[test]
    fn test_tokenize_no_spaces() {
        let tokens = Tokenizer::new("1+2*3").tokenize().unwrap();
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_tokenize_double_dot_splits_literals() {
        let tokens = Tokenizer::new("1..2").tokenize().unwrap();
        assert_eq!(tokens, vec![Token::Number(1.0), Token::Number(0.2)]);
    }

    #[test]
    fn test_tokenize_lone_dot() {
        assert!(matches!(
            Tokenizer::new(".").tokenize(),
            Err(CalcError::EvaluationError(_))
        ));
    }

    #[test]
    fn test_tokenize_overflowing_literal() {
        let huge = "9".repeat(400);
        assert_eq!(
            Tokenizer::new(&huge).tokenize(),
            Err(CalcError::NonFiniteResult)
        );
    }

    #[test]
    fn test_tokenize_invalid_char() {
        assert_eq!(
            Tokenizer::new("2 % 3").tokenize(),
            Err(CalcError::InvalidExpression('%'))
        );
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(Tokenizer::new("").tokenize().unwrap().is_empty());
        assert!(Tokenizer::new("   ").tokenize().unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_remaining() {
        let mut t = Tokenizer::new("1 + 2");
        t.next_token().unwrap();
        assert_eq!(t.remaining(), " + 2");
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_single_number() {
        assert_eq!(Parser::parse_str("42").unwrap(), AstNode::Number(42.0));
    }

    #[test]
    fn test_parse_simple_addition() {
        assert_eq!(
            Parser::parse_str("2+3").unwrap(),
            AstNode::binary(AstNode::number(2.0), Operation::Add, AstNode::number(3.0))
        );
    }

    #[test]
    fn test_parse_precedence_mul_over_add() {
        // 2 + 3 * 4 = 2 + (3 * 4)
        assert_eq!(
            Parser::parse_str("2+3*4").unwrap(),
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Add,
                AstNode::binary(
                    AstNode::number(3.0),
                    Operation::Multiply,
                    AstNode::number(4.0)
                )
            )
        );
    }

    #[test]
    fn test_parse_left_associative_subtraction() {
        // 10 - 4 - 3 = (10 - 4) - 3
        assert_eq!(
            Parser::parse_str("10-4-3").unwrap(),
            AstNode::binary(
                AstNode::binary(
                    AstNode::number(10.0),
                    Operation::Subtract,
                    AstNode::number(4.0)
                ),
                Operation::Subtract,
                AstNode::number(3.0)
            )
        );
    }

    #[test]
    fn test_parse_left_associative_division() {
        // 8 / 4 / 2 = (8 / 4) / 2
        match Parser::parse_str("8/4/2").unwrap() {
            AstNode::BinaryOp {
                left,
                op: Operation::Divide,
                right,
            } => {
                assert_eq!(*right, AstNode::Number(2.0));
                assert!(matches!(
                    *left,
                    AstNode::BinaryOp {
                        op: Operation::Divide,
                        ..
                    }
                ));
            }
            other => panic!("Expected Divide at top level, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_groups_by_operation_precedence() {
        // 1 - 2 * 3 / 4 + 5 = (1 - ((2 * 3) / 4)) + 5
        let product = AstNode::binary(
            AstNode::number(2.0),
            Operation::Multiply,
            AstNode::number(3.0),
        );
        let quotient = AstNode::binary(product, Operation::Divide, AstNode::number(4.0));
        let difference = AstNode::binary(AstNode::number(1.0), Operation::Subtract, quotient);
        assert_eq!(
            Parser::parse_str("1-2*3/4+5").unwrap(),
            AstNode::binary(difference, Operation::Add, AstNode::number(5.0))
        );
    }

    #[test]
    fn test_parse_children_never_bind_looser_than_parent() {
        fn check(node: &AstNode) {
            if let AstNode::BinaryOp { left, op, right } = node {
                for child in [left.as_ref(), right.as_ref()] {
                    if let AstNode::BinaryOp { op: inner, .. } = child {
                        assert!(inner.precedence() >= op.precedence(), "{node:?}");
                    }
                    check(child);
                }
            }
        }
        for text in ["1+2*3-4/5", "6/3*2+1-7", "9*9+9*9/3-1", "2-3-4*5*6"] {
            check(&Parser::parse_str(text).unwrap());
        }
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(
            Parser::parse_str("-5").unwrap(),
            AstNode::negate(AstNode::number(5.0))
        );
    }

    #[test]
    fn test_parse_sign_runs_fold() {
        assert_eq!(Parser::parse_str("--5").unwrap(), AstNode::number(5.0));
        assert_eq!(Parser::parse_str("+5").unwrap(), AstNode::number(5.0));
        assert_eq!(
            Parser::parse_str("-+-+-5").unwrap(),
            AstNode::negate(AstNode::number(5.0))
        );
    }

    #[test]
    fn test_parse_unary_after_binary() {
        assert_eq!(
            Parser::parse_str("2*-3").unwrap(),
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Multiply,
                AstNode::negate(AstNode::number(3.0))
            )
        );
    }

    #[test]
    fn test_parse_accepts_display_glyphs() {
        assert_eq!(
            Parser::parse_str("6×7").unwrap(),
            AstNode::binary(
                AstNode::number(6.0),
                Operation::Multiply,
                AstNode::number(7.0)
            )
        );
    }

    #[test]
    fn test_parse_empty_expression() {
        assert!(matches!(
            Parser::parse_str(""),
            Err(CalcError::EvaluationError(_))
        ));
        assert!(matches!(
            Parser::parse_str("   "),
            Err(CalcError::EvaluationError(_))
        ));
    }

    #[test]
    fn test_parse_trailing_operator() {
        assert!(matches!(
            Parser::parse_str("2+"),
            Err(CalcError::EvaluationError(_))
        ));
    }

    #[test]
    fn test_parse_double_star_is_not_power() {
        assert!(matches!(
            Parser::parse_str("2**3"),
            Err(CalcError::EvaluationError(_))
        ));
        assert!(matches!(
            Parser::parse_str("7//2"),
            Err(CalcError::EvaluationError(_))
        ));
    }

    #[test]
    fn test_parse_adjacent_numbers() {
        assert!(matches!(
            Parser::parse_str("1..2"),
            Err(CalcError::EvaluationError(_))
        ));
        assert!(matches!(
            Parser::parse_str("1 2"),
            Err(CalcError::EvaluationError(_))
        ));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "1+".repeat(MAX_EXPRESSION_LEN) + "1";
        assert!(matches!(
            Parser::parse_str(&long),
            Err(CalcError::EvaluationError(_))
        ));
    }

    #[test]
    fn test_parser_parse_empty_tokens() {
        let mut parser = Parser::new(vec![]);
        assert!(matches!(
            parser.parse(),
            Err(CalcError::EvaluationError(_))
        ));
    }
}
