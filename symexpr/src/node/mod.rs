//! The expression tree.
//!
//! A [`Node`] is either a leaf ([`Node::Number`] or [`Node::Variable`]) or an [`Operator`] that
//! exclusively owns its children. Trees are never shared: the passes in [`crate::transform`]
//! consume a node and return its replacement, and [`Node::deep_copy`] is the only way to obtain
//! two independent trees from one.
//!
//! The free functions in this module are the constructors used to build trees:
//!
//! ```
//! use symexpr::node::{add, mul, number, variable};
//!
//! let expr = mul(add(number(1), variable("x")?), number(3));
//! assert_eq!(expr.to_string(), "(1 + x) * 3");
//! # Ok::<(), symexpr::Error>(())
//! ```

pub mod fmt;
pub(crate) mod hash;
pub mod iter;
pub mod operator;
pub mod variable;

pub use fmt::{FormatOptions, FormatOptionsBuilder, NodeFormatter, Spacing};
pub use iter::NodeIter;
pub use operator::{Arity, OpKind, Operator, Position};
pub use variable::Variable;

use crate::{
    error::{kind::NodeMismatch, value_error, Error},
    numeric::{Number, Rational},
};
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a [`Node`], ordered as leaves sort in a canonical sum or product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeTag {
    Number,
    Variable,
    Operator,
}

impl Display for NodeTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "a number"),
            Self::Variable => write!(f, "a variable"),
            Self::Operator => write!(f, "an operator"),
        }
    }
}

/// A node of an expression tree.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A numeric constant.
    Number(Number),

    /// A named variable.
    Variable(Variable),

    /// An operator applied to its children.
    Operator(Operator),
}

impl Node {
    /// Returns the kind of the node.
    pub fn tag(&self) -> NodeTag {
        match self {
            Self::Number(_) => NodeTag::Number,
            Self::Variable(_) => NodeTag::Variable,
            Self::Operator(_) => NodeTag::Operator,
        }
    }

    /// The binding strength of the node. Leaves have the highest priority and are never
    /// parenthesized.
    pub fn priority(&self) -> u32 {
        match self {
            Self::Number(_) | Self::Variable(_) => u32::MAX,
            Self::Operator(op) => op.priority(),
        }
    }

    /// The children of the node. Leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Operator(op) => &op.children,
            _ => &[],
        }
    }

    /// The number of nodes in the tree rooted at this node.
    pub fn size(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Returns an iterator that visits every node of the tree in left-to-right post-order.
    pub fn post_order_iter(&self) -> NodeIter<'_> {
        NodeIter::new(self)
    }

    /// Recursively copies the tree into a new, independent tree.
    ///
    /// ```
    /// use symexpr::node::{add, number, variable, Node};
    ///
    /// let original = add(number(1), variable("x")?);
    /// let mut copy = original.deep_copy();
    /// if let Node::Operator(op) = &mut copy {
    ///     op.children[0] = number(2);
    /// }
    /// assert_eq!(original.to_string(), "1 + x");
    /// assert_eq!(copy.to_string(), "2 + x");
    /// # Ok::<(), symexpr::Error>(())
    /// ```
    pub fn deep_copy(&self) -> Node {
        match self {
            Self::Number(n) => Self::Number(*n),
            Self::Variable(var) => Self::Variable(var.clone()),
            Self::Operator(op) => Self::Operator(Operator::new(
                op.kind,
                op.children.iter().map(Node::deep_copy).collect(),
            )),
        }
    }

    /// Returns the number held by the node, or a conversion error if it is not a number.
    pub fn try_as_number(&self) -> Result<&Number, Error> {
        match self {
            Self::Number(n) => Ok(n),
            _ => Err(self.mismatch(NodeTag::Number)),
        }
    }

    /// Returns the variable held by the node, or a conversion error if it is not a variable.
    pub fn try_as_variable(&self) -> Result<&Variable, Error> {
        match self {
            Self::Variable(var) => Ok(var),
            _ => Err(self.mismatch(NodeTag::Variable)),
        }
    }

    /// Returns the operator of the node, or a conversion error if it is a leaf.
    pub fn try_as_operator(&self) -> Result<&Operator, Error> {
        match self {
            Self::Operator(op) => Ok(op),
            _ => Err(self.mismatch(NodeTag::Operator)),
        }
    }

    /// Returns true if the node is an operator of the given kind.
    pub fn is_operator(&self, kind: OpKind) -> bool {
        matches!(self, Self::Operator(op) if op.kind == kind)
    }

    fn mismatch(&self, expected: NodeTag) -> Error {
        value_error(self, NodeMismatch { expected, found: self.tag() })
    }
}

impl From<Number> for Node {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<Variable> for Node {
    fn from(var: Variable) -> Self {
        Self::Variable(var)
    }
}

impl From<Operator> for Node {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

/// Creates a number leaf.
pub fn number(value: impl Into<Number>) -> Node {
    Node::Number(value.into())
}

/// Creates an exact rational leaf `numerator / denominator`, reduced to lowest terms.
///
/// Fails if the denominator is zero.
pub fn rational(numerator: i64, denominator: i64) -> Result<Node, Error> {
    Ok(Node::Number(Number::Rational(Rational::from_signed(numerator, denominator)?)))
}

/// Creates a variable leaf, validating its name. See [`Variable::new`].
pub fn variable(name: impl Into<String>) -> Result<Node, Error> {
    Ok(Node::Variable(Variable::new(name)?))
}

/// Creates the sum of two nodes.
pub fn add(lhs: Node, rhs: Node) -> Node {
    sum(vec![lhs, rhs])
}

/// Creates the sum of any number of terms.
pub fn sum(terms: Vec<Node>) -> Node {
    Node::Operator(Operator::new(OpKind::Add, terms))
}

/// Creates the difference `lhs - rhs`.
pub fn sub(lhs: Node, rhs: Node) -> Node {
    Node::Operator(Operator::new(OpKind::Sub, vec![lhs, rhs]))
}

/// Creates the product of two nodes.
pub fn mul(lhs: Node, rhs: Node) -> Node {
    Node::Operator(Operator::new(OpKind::Mul, vec![lhs, rhs]))
}

/// Creates the quotient `lhs / rhs`.
pub fn div(lhs: Node, rhs: Node) -> Node {
    Node::Operator(Operator::new(OpKind::Div, vec![lhs, rhs]))
}

/// Creates the negation of a node.
pub fn neg(operand: Node) -> Node {
    Node::Operator(Operator::new(OpKind::Neg, vec![operand]))
}
