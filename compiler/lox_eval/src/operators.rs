//! Binary operator implementations for the evaluator.
//!
//! Direct enum-based dispatch over operand kinds. The kind set is closed,
//! so pattern matching keeps every unsupported pair visibly routed to a
//! type error.

use chrono::NaiveDate;
use lox_ir::BinaryOp;

use crate::errors::{binary_type_mismatch, EvalResult};
use crate::Value;

/// Evaluate a binary operation on two already-evaluated operands.
///
/// - `==`/`!=` accept any kinds; different kinds are never equal.
/// - `date - date` yields the signed day count.
/// - `+` works on two numbers or two strings.
/// - Every other operator needs two numbers.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers hand over freshly evaluated operands"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(eval_number_binary(*a, *b, op)),
        _ if op == BinaryOp::Eq => Ok(Value::Bool(left == right)),
        _ if op == BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        (Value::Date(a), Value::Date(b)) if op == BinaryOp::Sub => Ok(days_between(*a, *b)),
        _ => Err(binary_type_mismatch(
            op.as_symbol(),
            left.type_name(),
            right.type_name(),
        )),
    }
}

/// Arithmetic and ordering on numbers.
///
/// Division follows IEEE-754: `x / 0` is an infinity (or `NaN` for `0 / 0`).
#[allow(clippy::float_cmp, reason = "Lox equality is exact IEEE equality")]
fn eval_number_binary(a: f64, b: f64, op: BinaryOp) -> Value {
    match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div => Value::Number(a / b),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        BinaryOp::Eq => Value::Bool(a == b),
        BinaryOp::NotEq => Value::Bool(a != b),
    }
}

/// Signed whole days from `right` to `left`.
#[expect(
    clippy::cast_precision_loss,
    reason = "the NaiveDate range spans far fewer than 2^52 days"
)]
fn days_between(left: NaiveDate, right: NaiveDate) -> Value {
    Value::Number(left.signed_duration_since(right).num_days() as f64)
}
