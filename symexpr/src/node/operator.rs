use crate::error::{kind::ArityMismatch, Error};
use std::fmt::{self, Display, Formatter};
use super::Node;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the token of an operator is placed relative to its operands when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The token is written directly before its single operand, such as `-x`.
    PrefixOperator,

    /// The token is written before a parenthesized, comma-separated operand list, such as
    /// `f(a, b)`.
    PrefixFunction,

    /// The token is written between each pair of operands, such as `a + b + c`.
    Infix,
}

/// The number of children an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many children.
    Exactly(usize),

    /// At least this many children.
    AtLeast(usize),
}

impl Arity {
    /// Returns true if `count` children are accepted.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "{}", n),
            Self::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// The kind of an operator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpKind {
    /// N-ary addition.
    Add,

    /// Binary subtraction.
    Sub,

    /// Binary multiplication.
    Mul,

    /// Binary division.
    Div,

    /// Unary negation.
    Neg,
}

impl OpKind {
    /// The token used to render the operator.
    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub | Self::Neg => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// The name of the operator, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mul => "Mul",
            Self::Div => "Div",
            Self::Neg => "Neg",
        }
    }

    /// The binding strength of the operator. A child is parenthesized when its priority is
    /// strictly lower than its parent's.
    ///
    /// Negation has the lowest priority, so a negated operand is always parenthesized inside a
    /// sum or product.
    pub fn priority(self) -> u32 {
        match self {
            Self::Neg => 0,
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    /// How the operator is rendered.
    pub fn position(self) -> Position {
        match self {
            Self::Neg => Position::PrefixOperator,
            _ => Position::Infix,
        }
    }

    /// The number of children the operator accepts.
    pub fn arity(self) -> Arity {
        match self {
            Self::Add => Arity::AtLeast(1),
            Self::Sub | Self::Mul | Self::Div => Arity::Exactly(2),
            Self::Neg => Arity::Exactly(1),
        }
    }

    /// Returns true if the order of the operator's children does not change its value.
    pub fn is_commutative(self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }
}

impl Display for OpKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An interior node: an operator applied to an ordered list of children it exclusively owns.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Operator {
    /// The operator.
    pub kind: OpKind,

    /// The operands, in order.
    pub children: Vec<Node>,
}

impl Operator {
    /// Creates an operator node without validating the number of children. Passes report an
    /// [`ArityMismatch`] error when they reach a node with the wrong number of children.
    pub fn new(kind: OpKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    /// See [`OpKind::priority`].
    pub fn priority(&self) -> u32 {
        self.kind.priority()
    }

    /// See [`OpKind::position`].
    pub fn position(&self) -> Position {
        self.kind.position()
    }

    /// Creates the error reported when the node's child count does not match its arity.
    pub(crate) fn arity_error(&self) -> Error {
        let children = self
            .children
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let src = format!("{}({})", self.kind.name(), children);
        let len = self.kind.name().len();

        Error::new(src, vec![0..len], ArityMismatch {
            op: self.kind.name(),
            expected: self.kind.arity().to_string(),
            found: self.children.len(),
        })
    }

    /// Returns an error if the number of children does not match the operator's arity.
    pub(crate) fn check_arity(&self) -> Result<(), Error> {
        if self.kind.arity().accepts(self.children.len()) {
            Ok(())
        } else {
            Err(self.arity_error())
        }
    }

    /// Splits a binary operator into its two children.
    pub(crate) fn into_pair(self) -> Result<(Node, Node), Error> {
        let kind = self.kind;
        match <[Node; 2]>::try_from(self.children) {
            Ok([lhs, rhs]) => Ok((lhs, rhs)),
            Err(children) => Err(Self::new(kind, children).arity_error()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Category, node::number};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn arity() {
        assert!(OpKind::Add.arity().accepts(1));
        assert!(OpKind::Add.arity().accepts(5));
        assert!(!OpKind::Add.arity().accepts(0));
        assert!(OpKind::Sub.arity().accepts(2));
        assert!(!OpKind::Neg.arity().accepts(2));
    }

    #[test]
    fn into_pair_rejects_wrong_arity() {
        let op = Operator::new(OpKind::Sub, vec![number(1), number(2), number(3)]);
        let err = op.into_pair().unwrap_err();
        assert_eq!(err.category(), Category::Internal);
        assert_eq!(err.src, "Sub(1, 2, 3)");
        assert_eq!(err.to_string(), "internal error: `Sub` expects 2 operand(s), found 3");

        let (lhs, rhs) = Operator::new(OpKind::Div, vec![number(1), number(2)]).into_pair().unwrap();
        assert_eq!(lhs, number(1));
        assert_eq!(rhs, number(2));
    }

    #[test]
    fn check_arity() {
        assert!(Operator::new(OpKind::Add, Vec::new()).check_arity().is_err());
        assert!(Operator::new(OpKind::Neg, vec![number(1)]).check_arity().is_ok());
    }
}
