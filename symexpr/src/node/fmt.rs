//! Rendering of expression trees.

use std::fmt::{self, Display, Formatter};
use super::{Node, Operator, Position};

/// Formatting options for expression trees.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptions {
    /// How operators are separated from their operands.
    pub spacing: Spacing,
}

impl FormatOptions {
    /// Wraps the given [`FormatOptions`] into a builder for further customization.
    pub fn into_builder(self) -> FormatOptionsBuilder {
        FormatOptionsBuilder(self)
    }
}

/// How operators are separated from their operands.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Spacing {
    /// Infix tokens are surrounded by a space, such as `1 + x * 2`, and function arguments are
    /// separated with `", "`.
    ///
    /// This is the default option.
    #[default]
    Spaced,

    /// No whitespace is emitted at all, such as `1+x*2`.
    Compact,
}

impl Spacing {
    /// Utility function to create a new [`FormatOptions`] with the same formatting options as the
    /// given [`FormatOptions`], but with the spacing set to this value.
    pub fn inside(self, mut options: FormatOptions) -> FormatOptions {
        options.spacing = self;
        options
    }
}

/// Helper struct to build a [`FormatOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FormatOptionsBuilder(FormatOptions);

impl FormatOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spacing. See [`Spacing`] for more information.
    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.0.spacing = spacing;
        self
    }

    /// Builds the [`FormatOptions`] struct.
    pub fn build(self) -> FormatOptions {
        self.0
    }
}

/// Formatter for a [`Node`].
#[derive(Debug, Clone, Copy)]
pub struct NodeFormatter<'a> {
    /// The node to format.
    pub node: &'a Node,

    /// The options to use when formatting.
    pub options: FormatOptions,
}

impl NodeFormatter<'_> {
    /// Formats an operand of `parent`, wrapping it in parentheses if it binds less tightly than
    /// its parent.
    fn fmt_operand(&self, f: &mut Formatter<'_>, parent: &Operator, child: &Node) -> fmt::Result {
        let child = NodeFormatter { node: child, options: self.options };
        if child.node.priority() < parent.priority() {
            write!(f, "({})", child)
        } else {
            write!(f, "{}", child)
        }
    }

    fn fmt_operator(&self, f: &mut Formatter<'_>, op: &Operator) -> fmt::Result {
        let token = op.kind.token();
        match op.position() {
            Position::PrefixOperator => {
                write!(f, "{}", token)?;
                for child in &op.children {
                    NodeFormatter { node: child, options: self.options }.fmt(f)?;
                }
                Ok(())
            },
            Position::PrefixFunction => {
                let separator = match self.options.spacing {
                    Spacing::Spaced => ", ",
                    Spacing::Compact => ",",
                };
                write!(f, "{}(", token)?;
                for (i, child) in op.children.iter().enumerate() {
                    if i != 0 {
                        write!(f, "{}", separator)?;
                    }
                    NodeFormatter { node: child, options: self.options }.fmt(f)?;
                }
                write!(f, ")")
            },
            Position::Infix => {
                for (i, child) in op.children.iter().enumerate() {
                    if i != 0 {
                        match self.options.spacing {
                            Spacing::Spaced => write!(f, " {} ", token)?,
                            Spacing::Compact => write!(f, "{}", token)?,
                        }
                    }
                    self.fmt_operand(f, op, child)?;
                }
                Ok(())
            },
        }
    }
}

impl Display for NodeFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.node {
            Node::Number(n) => write!(f, "{}", n),
            Node::Variable(var) => write!(f, "{}", var),
            Node::Operator(op) => self.fmt_operator(f, op),
        }
    }
}

impl Node {
    /// Returns a [`Display`] wrapper that renders the node with the given options.
    ///
    /// ```
    /// use symexpr::node::{add, mul, number, variable, FormatOptionsBuilder, Spacing};
    ///
    /// let expr = mul(add(number(1), variable("x")?), number(3));
    /// let options = FormatOptionsBuilder::new().spacing(Spacing::Compact).build();
    /// assert_eq!(expr.display_with(options).to_string(), "(1+x)*3");
    /// # Ok::<(), symexpr::Error>(())
    /// ```
    pub fn display_with(&self, options: FormatOptions) -> NodeFormatter<'_> {
        NodeFormatter { node: self, options }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.display_with(FormatOptions::default()).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::node::{add, div, mul, neg, number, rational, sub, sum, variable};
    use pretty_assertions::assert_eq;
    use super::*;

    fn compact(node: &Node) -> String {
        node.display_with(Spacing::Compact.inside(FormatOptions::default())).to_string()
    }

    #[test]
    fn inside_overrides_spacing() {
        let options = FormatOptionsBuilder::new().spacing(Spacing::Compact).build();
        assert_eq!(Spacing::Spaced.inside(options), FormatOptions::default());
        assert_eq!(Spacing::Compact.inside(FormatOptions::default()), options);
    }

    #[test]
    fn leaves() {
        assert_eq!(number(42).to_string(), "42");
        assert_eq!(number(-7).to_string(), "-7");
        assert_eq!(rational(3, 4).unwrap().to_string(), "3/4");
        assert_eq!(variable("theta").unwrap().to_string(), "theta");
    }

    #[test]
    fn sum_inside_product_is_parenthesized() {
        let expr = mul(add(number(1), number(1)), number(3));
        assert_eq!(expr.to_string(), "(1 + 1) * 3");
        assert_eq!(compact(&expr), "(1+1)*3");
    }

    #[test]
    fn product_inside_sum_is_not_parenthesized() {
        let expr = add(mul(number(2), variable("x").unwrap()), number(1));
        assert_eq!(expr.to_string(), "2 * x + 1");
    }

    #[test]
    fn equal_priority_is_not_parenthesized() {
        let expr = sub(number(1), sub(number(2), number(3)));
        assert_eq!(expr.to_string(), "1 - 2 - 3");
        let expr = div(mul(number(1), number(2)), number(3));
        assert_eq!(expr.to_string(), "1 * 2 / 3");
    }

    #[test]
    fn nary_sum() {
        let expr = sum(vec![number(1), variable("x").unwrap(), number(2), variable("y").unwrap()]);
        assert_eq!(expr.to_string(), "1 + x + 2 + y");
    }

    #[test]
    fn negation() {
        assert_eq!(neg(number(2)).to_string(), "-2");
        assert_eq!(neg(neg(number(2))).to_string(), "--2");
        assert_eq!(neg(add(number(1), number(2))).to_string(), "-1 + 2");

        let expr = sum(vec![number(1), neg(number(2)), neg(neg(number(3)))]);
        assert_eq!(expr.to_string(), "1 + (-2) + (--3)");
        assert_eq!(compact(&expr), "1+(-2)+(--3)");

        let expr = mul(neg(number(1)), neg(neg(number(2))));
        assert_eq!(compact(&expr), "(-1)*(--2)");
    }

    #[test]
    fn builder_round_trip() {
        let options = FormatOptions::default()
            .into_builder()
            .spacing(Spacing::Compact)
            .build();
        assert_eq!(options.spacing, Spacing::Compact);
        assert_eq!(FormatOptionsBuilder::new().build(), FormatOptions::default());
    }
}
