use ariadne::Fmt;
use crate::{node::NodeTag, numeric::NumberTag};
use symexpr_attrs::ErrorKind;
use symexpr_error::EXPR;

/// A rational number was constructed with a denominator of zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "denominator cannot be zero",
    labels = ["this denominator"],
    help = "a rational number needs a denominator greater than zero",
    category = Construction,
)]
pub struct ZeroDenominator;

/// A variable name contained a character that is not a letter or an underscore.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid variable name: `{}`", self.name),
    labels = [format!("`{}` is not allowed in a variable name", self.found)],
    help = format!("variable names can only contain letters and underscores, like {}", "x_n".fg(EXPR)),
    category = Construction,
)]
pub struct InvalidVariableName {
    /// The rejected name.
    pub name: String,

    /// The index of the first offending character, counted in characters.
    pub position: usize,

    /// The offending character.
    pub found: char,
}

/// A variable was constructed with an empty name.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "variable names cannot be empty",
    labels = ["this name"],
    category = Construction,
)]
pub struct EmptyVariableName;

/// A number was read as a representation that cannot hold its value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot read {} value as {}", self.found, self.expected),
    labels = [format!("this is {}", self.found)],
    help = "a value can only be read as a representation at least as wide as its own",
    category = Conversion,
)]
pub struct VariantMismatch {
    /// The representation that was requested.
    pub expected: NumberTag,

    /// The representation of the value.
    pub found: NumberTag,
}

/// A node was accessed as a kind of node that it is not.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected {} node, found {} node", self.expected, self.found),
    labels = ["this node"],
    category = Conversion,
)]
pub struct NodeMismatch {
    /// The kind of node that was requested.
    pub expected: NodeTag,

    /// The kind of the node.
    pub found: NodeTag,
}

/// Division by an exact zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["", "", "this is zero"],
    category = Arithmetic,
)]
pub struct DivisionByZero;

/// Integer arithmetic produced a result that does not fit in 64 bits.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("integer overflow in `{}`", self.op),
    labels = ["", "this operation overflows", ""],
    help = "exact values are limited to a 64-bit magnitude; use a real number for larger values",
    category = Arithmetic,
)]
pub struct IntegerOverflow {
    /// The token of the operation that overflowed.
    pub op: &'static str,
}

/// An operator node had a number of children its operator does not accept.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` expects {} operand(s), found {}", self.op, self.expected, self.found),
    labels = ["this operator"],
    help = "operator nodes should be built with the constructors in `symexpr::node`",
    category = Internal,
)]
pub struct ArityMismatch {
    /// The name of the operator.
    pub op: &'static str,

    /// A description of the accepted number of children, such as `2` or `at least 1`.
    pub expected: String,

    /// The number of children the node had.
    pub found: usize,
}
