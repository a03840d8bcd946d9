//! Distribution of multiplication and subtraction over addition.

use crate::{
    error::Error,
    node::{self, Node, OpKind, Operator},
    step_collector::StepCollector,
};
use super::step::Step;
use tracing::{debug, trace};

/// Rewrites the tree into a sum of products.
///
/// - Nested sums are spliced into their parent sum.
/// - `a - b` becomes `a + (-b)`. When either side is a sum, its terms are spliced in, and every
///   term of the right-hand side is negated.
/// - `a * b` becomes the sum of every pairwise product of the terms of `a` and `b`, where the terms
///   of a sum are its children and any other node is a single term. Terms of `a` are the outer
///   loop.
/// - Negations and quotients only have their operands expanded. Double negation is kept.
///
/// ```
/// use symexpr::{node::{add, mul, number}, transform::expand_add};
///
/// let expr = mul(add(number(1), number(2)), add(number(3), number(4)));
/// assert_eq!(expand_add(expr)?.to_string(), "1 * 3 + 1 * 4 + 2 * 3 + 2 * 4");
/// # Ok::<(), symexpr::Error>(())
/// ```
pub fn expand_add(node: Node) -> Result<Node, Error> {
    expand_add_with_steps(node, &mut ())
}

/// [`expand_add`], recording every rewrite in `steps`.
pub fn expand_add_with_steps(node: Node, steps: &mut dyn StepCollector<Step>) -> Result<Node, Error> {
    debug!(input = %node, "expand_add");
    expand_node(node, steps)
}

/// Returns the terms of a node: the children of a sum, or the node itself.
fn into_terms(node: Node) -> Vec<Node> {
    match node {
        Node::Operator(Operator { kind: OpKind::Add, children }) => children,
        other => vec![other],
    }
}

fn expand_node(node: Node, steps: &mut dyn StepCollector<Step>) -> Result<Node, Error> {
    let op = match node {
        Node::Operator(op) => op,
        leaf => return Ok(leaf),
    };

    match op.kind {
        OpKind::Add => {
            op.check_arity()?;
            let mut terms = Vec::with_capacity(op.children.len());
            for child in op.children {
                let child = expand_node(child, steps)?;
                if child.is_operator(OpKind::Add) {
                    trace!(%child, "splicing nested sum");
                    steps.push(Step::FlattenAdd);
                }
                terms.extend(into_terms(child));
            }
            Ok(node::sum(terms))
        },
        OpKind::Sub => {
            let (lhs, rhs) = op.into_pair()?;
            let lhs = expand_node(lhs, steps)?;
            let rhs = expand_node(rhs, steps)?;
            trace!(%lhs, %rhs, "distributing subtraction");
            steps.push(Step::DistributeSub);

            let mut terms = into_terms(lhs);
            terms.extend(into_terms(rhs).into_iter().map(node::neg));
            Ok(node::sum(terms))
        },
        OpKind::Mul => {
            let (lhs, rhs) = op.into_pair()?;
            let lhs = into_terms(expand_node(lhs, steps)?);
            let rhs = into_terms(expand_node(rhs, steps)?);
            trace!(lhs_terms = lhs.len(), rhs_terms = rhs.len(), "distributing product");
            if lhs.len() > 1 || rhs.len() > 1 {
                steps.push(Step::DistributeMul);
            }

            let products = lhs
                .iter()
                .flat_map(|a| rhs.iter().map(move |b| node::mul(a.deep_copy(), b.deep_copy())))
                .collect();
            Ok(node::sum(products))
        },
        OpKind::Div | OpKind::Neg => {
            let children = op.children
                .into_iter()
                .map(|child| expand_node(child, steps))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::Operator(Operator::new(op.kind, children)))
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{kind::ArityMismatch, Category},
        node::{add, div, mul, neg, number, sub, sum, variable, FormatOptions, Spacing},
        transform::simplify,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Node {
        variable(name).unwrap()
    }

    fn compact(node: &Node) -> String {
        node.display_with(Spacing::Compact.inside(FormatOptions::default())).to_string()
    }

    #[test]
    fn leaves_are_fixed_points() {
        assert_eq!(expand_add(number(1)).unwrap(), number(1));
        assert_eq!(expand_add(var("x")).unwrap(), var("x"));
    }

    #[test]
    fn product_of_sums() {
        let expr = mul(add(number(1), number(1)), add(number(1), number(1)));
        assert_eq!(compact(&expr), "(1+1)*(1+1)");

        let expanded = expand_add(expr).unwrap();
        assert_eq!(compact(&expanded), "1*1+1*1+1*1+1*1");
        assert_eq!(expanded.to_string(), "1 * 1 + 1 * 1 + 1 * 1 + 1 * 1");
        assert_eq!(simplify(expanded).unwrap(), number(4));
    }

    #[test]
    fn product_of_differences() {
        let expr = mul(add(neg(number(1)), neg(number(2))), sub(neg(number(1)), neg(number(2))));
        let expanded = expand_add(expr).unwrap();
        assert_eq!(compact(&expanded), "(-1)*(-1)+(-1)*(--2)+(-2)*(-1)+(-2)*(--2)");
        assert_eq!(simplify(expanded).unwrap().to_string(), "-3");
    }

    #[test]
    fn left_terms_are_outer() {
        let expr = mul(add(var("a"), var("b")), add(var("c"), var("d")));
        assert_eq!(expand_add(expr).unwrap().to_string(), "a * c + a * d + b * c + b * d");
    }

    #[test]
    fn product_with_single_terms() {
        let expr = mul(var("a"), add(var("b"), var("c")));
        assert_eq!(expand_add(expr).unwrap().to_string(), "a * b + a * c");

        let expanded = expand_add(mul(var("a"), var("b"))).unwrap();
        assert!(expanded.is_operator(OpKind::Add));
        assert_eq!(expanded.to_string(), "a * b");
    }

    #[test]
    fn subtraction_of_leaves() {
        let expanded = expand_add(sub(number(1), number(2))).unwrap();
        assert_eq!(compact(&expanded), "1+(-2)");
    }

    #[test]
    fn subtraction_of_subtraction() {
        let expanded = expand_add(sub(number(1), sub(number(2), number(3)))).unwrap();
        assert_eq!(compact(&expanded), "1+(-2)+(--3)");
        assert_eq!(simplify(expanded).unwrap().to_string(), "2");

        let expanded = expand_add(sub(var("a"), sub(var("b"), var("c")))).unwrap();
        assert_eq!(expanded.to_string(), "a + (-b) + (--c)");
    }

    #[test]
    fn subtraction_of_sums() {
        let expr = sub(sub(number(1), number(2)), sub(number(1), number(2)));
        let expanded = expand_add(expr).unwrap();
        assert_eq!(compact(&expanded), "1+(-2)+(-1)+(--2)");
        assert_eq!(simplify(expanded).unwrap().to_string(), "0");
    }

    #[test]
    fn nested_sums_are_flattened() {
        let expr = add(add(number(1), var("x")), add(var("y"), add(number(2), number(3))));
        let mut steps = Vec::new();
        let expanded = expand_add_with_steps(expr, &mut steps).unwrap();
        assert_eq!(expanded.to_string(), "1 + x + y + 2 + 3");
        assert_eq!(expanded.children().len(), 5);
        assert_eq!(steps, vec![Step::FlattenAdd, Step::FlattenAdd, Step::FlattenAdd]);
    }

    #[test]
    fn negation_and_division_recurse() {
        let expr = neg(neg(mul(add(var("a"), var("b")), var("c"))));
        assert_eq!(expand_add(expr).unwrap().to_string(), "--a * c + b * c");

        let expr = div(mul(add(var("a"), var("b")), var("c")), var("d"));
        let expanded = expand_add(expr).unwrap();
        assert!(expanded.is_operator(OpKind::Div));
        assert_eq!(expanded.to_string(), "(a * c + b * c) / d");
    }

    #[test]
    fn nested_products() {
        let expr = mul(mul(add(var("a"), var("b")), var("c")), add(var("d"), var("e")));
        assert_eq!(
            expand_add(expr).unwrap().to_string(),
            "a * c * d + a * c * e + b * c * d + b * c * e",
        );
    }

    #[test]
    fn n_ary_sum_operands() {
        let expr = mul(sum(vec![var("a"), var("b"), var("c")]), number(2));
        assert_eq!(expand_add(expr).unwrap().to_string(), "a * 2 + b * 2 + c * 2");
    }

    #[test]
    fn wrong_arity_is_an_internal_error() {
        let expr = Node::Operator(Operator::new(OpKind::Mul, vec![var("a")]));
        let err = expand_add(expr).unwrap_err();
        assert!(err.is::<ArityMismatch>());
        assert_eq!(err.category(), Category::Internal);
    }
}
