//! Expression evaluation engine
//!
//! Parses arithmetic-expression strings (`+ - * /`, parentheses, unary
//! minus) into a small AST and evaluates them with the decimal-safe
//! arithmetic from `dcalc-math`, so `"0.1 + 0.2"` evaluates to exactly
//! `0.3`.

use log::debug;
use thiserror::Error;

use dcalc_math::{add, divide, multiply, subtract, MathError};

pub mod parser;

/// Errors that can occur during expression parsing and evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Input is not a well-formed arithmetic expression
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
    /// A parenthesis was opened and never closed, or closed without opening
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// Arithmetic failure while reducing the expression
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for expression operations
pub type ExprResult<T> = Result<T, ExprError>;

/// Binary operators, in increasing precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Division
    Div,
}

impl BinaryOp {
    /// Binding power for the Pratt parser; multiplicative binds tighter
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation
    Neg,
}

/// A node of the parsed expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    /// Numeric literal
    Value(f64),
    /// Unary operation
    Unary {
        /// The operator
        op: UnaryOp,
        /// The operand subtree
        operand: Box<ExprNode>,
    },
    /// Binary operation
    Binary {
        /// The operator
        op: BinaryOp,
        /// Left operand subtree
        left: Box<ExprNode>,
        /// Right operand subtree
        right: Box<ExprNode>,
    },
}

/// A parsed expression ready for evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    /// Root of the expression tree
    pub root: ExprNode,
}

impl Expression {
    /// Wrap a parsed tree
    pub fn new(root: ExprNode) -> Self {
        Self { root }
    }

    /// Evaluate the expression with decimal-safe arithmetic
    pub fn evaluate(&self) -> ExprResult<f64> {
        evaluate_node(&self.root)
    }
}

/// Evaluate one node of the expression tree
pub fn evaluate_node(node: &ExprNode) -> ExprResult<f64> {
    match node {
        ExprNode::Value(value) => Ok(*value),
        ExprNode::Unary { op: UnaryOp::Neg, operand } => {
            // 0 - x rather than -x keeps negation inside the scaled layer
            let value = evaluate_node(operand)?;
            Ok(subtract(0.0, value)?)
        }
        ExprNode::Binary { op, left, right } => {
            let lhs = evaluate_node(left)?;
            let rhs = evaluate_node(right)?;
            let result = match op {
                BinaryOp::Add => add(lhs, rhs)?,
                BinaryOp::Sub => subtract(lhs, rhs)?,
                BinaryOp::Mul => multiply(lhs, rhs)?,
                BinaryOp::Div => divide(lhs, rhs)?,
            };
            Ok(result)
        }
    }
}

/// Parse and evaluate an expression string.
///
/// ```
/// use dcalc_core::calculate;
/// assert_eq!(calculate("(0.1 + 0.2) * 3 - 0.5").unwrap(), 0.4);
/// assert_eq!(calculate("-5 + 3").unwrap(), -2.0);
/// ```
pub fn calculate(input: &str) -> ExprResult<f64> {
    parser::parse_expression(input)?.evaluate()
}

/// Evaluate a batch of expressions with partial-failure semantics.
///
/// A failing element yields `None` in the output instead of aborting the
/// batch; the failure is logged at debug level.
pub fn calculate_batch<S: AsRef<str>>(expressions: &[S]) -> Vec<Option<f64>> {
    expressions
        .iter()
        .map(|expression| match calculate(expression.as_ref()) {
            Ok(value) => Some(value),
            Err(error) => {
                debug!("expression {:?} failed: {}", expression.as_ref(), error);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_decimal_exact() {
        assert_eq!(calculate("0.1 + 0.2").unwrap(), 0.3);
        assert_eq!(calculate("(0.1 + 0.2) * 3 - 0.5").unwrap(), 0.4);
        assert_eq!(calculate("0.3 / 0.1").unwrap(), 3.0);
    }

    #[test]
    fn test_calculate_precedence() {
        assert_eq!(calculate("1 + 2 * 3").unwrap(), 7.0);
        assert_eq!(calculate("(1 + 2) * 3").unwrap(), 9.0);
        assert_eq!(calculate("8 - 6 / 2").unwrap(), 5.0);
        // same precedence associates left
        assert_eq!(calculate("8 / 2 / 2").unwrap(), 2.0);
        assert_eq!(calculate("8 - 2 - 2").unwrap(), 4.0);
    }

    #[test]
    fn test_calculate_unary_minus() {
        assert_eq!(calculate("-5 + 3").unwrap(), -2.0);
        assert_eq!(calculate("-(5 + 3) * 2").unwrap(), -16.0);
        assert_eq!(calculate("2 * -3").unwrap(), -6.0);
        assert_eq!(calculate("--5").unwrap(), 5.0);
    }

    #[test]
    fn test_calculate_whitespace_insignificant() {
        assert_eq!(calculate("  1+ 2 \t*3 ").unwrap(), 7.0);
    }

    #[test]
    fn test_calculate_division_by_zero() {
        assert_eq!(
            calculate("1 / 0"),
            Err(ExprError::Math(MathError::DivisionByZero))
        );
        assert_eq!(
            calculate("1 / (2 - 2)"),
            Err(ExprError::Math(MathError::DivisionByZero))
        );
    }

    #[test]
    fn test_calculate_malformed() {
        assert!(matches!(calculate(""), Err(ExprError::InvalidExpression(_))));
        assert!(matches!(calculate("1 +"), Err(ExprError::InvalidExpression(_))));
        assert!(matches!(calculate("bad"), Err(ExprError::InvalidExpression(_))));
        assert!(matches!(calculate("1 2"), Err(ExprError::InvalidExpression(_))));
    }

    #[test]
    fn test_calculate_unbalanced_parens() {
        assert_eq!(calculate("(1 + 2"), Err(ExprError::UnbalancedParentheses));
        assert_eq!(calculate("1 + 2)"), Err(ExprError::UnbalancedParentheses));
        assert_eq!(calculate("((1)"), Err(ExprError::UnbalancedParentheses));
    }

    #[test]
    fn test_calculate_batch_partial_failure() {
        let results = calculate_batch(&["1+1", "bad", "2*2"]);
        assert_eq!(results, vec![Some(2.0), None, Some(4.0)]);
    }

    #[test]
    fn test_calculate_batch_empty() {
        let results = calculate_batch::<&str>(&[]);
        assert!(results.is_empty());
    }
}
