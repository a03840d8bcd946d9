pub mod kind;

pub use symexpr_error::{Category, Error, ErrorKind};

use std::fmt::Display;

/// Creates an error for the binary operation `lhs op rhs`, rendering the operation as the source
/// snippet with one span per operand and one for the operator.
pub(crate) fn binary_error(
    lhs: impl Display,
    op: &str,
    rhs: impl Display,
    kind: impl ErrorKind + 'static,
) -> Error {
    let lhs = lhs.to_string();
    let rhs = rhs.to_string();
    let lhs_len = lhs.chars().count();
    let op_start = lhs_len + 1;
    let rhs_start = op_start + op.chars().count() + 1;
    let rhs_end = rhs_start + rhs.chars().count();

    Error::new(
        format!("{} {} {}", lhs, op, rhs),
        vec![0..lhs_len, op_start..rhs_start - 1, rhs_start..rhs_end],
        kind,
    )
}

/// Creates an error whose single span covers the whole rendering of `value`.
pub(crate) fn value_error(value: impl Display, kind: impl ErrorKind + 'static) -> Error {
    let src = value.to_string();
    let len = src.chars().count();
    Error::new(src, vec![0..len], kind)
}
