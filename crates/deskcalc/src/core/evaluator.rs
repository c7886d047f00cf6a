//! AST evaluator
//!
//! Every arithmetic step goes through [`Calculator::apply`], so an
//! intermediate infinity stops evaluation even when a later step would
//! have hidden it (e.g. `1/0*0`).

use crate::core::parser::{AstNode, Parser};
use crate::core::{CalcResult, Calculator};

/// Evaluator for AST expressions
#[derive(Debug, Default)]
pub struct Evaluator {
    calculator: Calculator,
}

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: Calculator::new(),
        }
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => Ok(*n),
            AstNode::Negate(inner) => Ok(-self.evaluate(inner)?),
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                self.calculator.apply(left_val, right_val, *op)
            }
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }
}
