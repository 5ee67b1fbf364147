//! Native bindings installed in the root environment.

use chrono::Utc;

use crate::errors::EvalResult;
use crate::{NativeFunction, Value};

/// `clock()`: seconds since the Unix epoch, with sub-second precision.
#[expect(
    clippy::cast_precision_loss,
    reason = "epoch seconds stay well inside f64's exact integer range"
)]
fn clock(_args: &[Value]) -> EvalResult {
    let now = Utc::now();
    let seconds = now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9;
    Ok(Value::Number(seconds))
}

/// Bindings every interpreter starts with unless the prelude is disabled.
pub const PRELUDE: &[NativeFunction] = &[NativeFunction::new("clock", 0, clock)];
