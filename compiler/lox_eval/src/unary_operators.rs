//! Unary operator implementations for the evaluator.

use lox_ir::UnaryOp;

use crate::errors::{invalid_operand, EvalResult};
use crate::Value;

/// Evaluate a unary operation.
///
/// `-` needs a number; `!` accepts anything and negates its truthiness.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over the freshly evaluated operand"
)]
pub fn evaluate_unary(operand: Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(invalid_operand(op.as_symbol(), operand.type_name())),
        },
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
    }
}
