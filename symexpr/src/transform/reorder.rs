//! Canonical ordering of the children of sums and products.

use crate::{
    node::{Node, Operator},
    step_collector::StepCollector,
};
use std::cmp::Ordering;
use super::step::Step;
use tracing::{debug, trace};

/// Sorts the children of every sum and product into canonical order, returning the new tree and
/// its size (the number of nodes in it).
///
/// Children are ordered numbers first, then variables, then operators. Numbers are ordered by value,
/// variables by name, and operators by size, then by their rendering. The sort is stable, and the
/// children of other operators keep their order.
///
/// ```
/// use symexpr::{node::{add, mul, number, sum, variable}, transform::reorder};
///
/// let expr = sum(vec![mul(variable("x")?, number(2)), variable("y")?, number(1)]);
/// let (ordered, size) = reorder(expr);
/// assert_eq!(ordered.to_string(), "1 + y + 2 * x");
/// assert_eq!(size, 6);
/// # Ok::<(), symexpr::Error>(())
/// ```
pub fn reorder(node: Node) -> (Node, usize) {
    reorder_with_steps(node, &mut ())
}

/// [`reorder`], recording every rewrite in `steps`.
pub fn reorder_with_steps(node: Node, steps: &mut dyn StepCollector<Step>) -> (Node, usize) {
    debug!(input = %node, "reorder");
    reorder_node(node, steps)
}

/// The canonical order of two nodes, given their sizes.
fn canonical_cmp((lhs, lhs_size): &(Node, usize), (rhs, rhs_size): &(Node, usize)) -> Ordering {
    lhs.tag().cmp(&rhs.tag()).then_with(|| match (lhs, rhs) {
        (Node::Number(a), Node::Number(b)) => a.total_cmp(b),
        (Node::Variable(a), Node::Variable(b)) => a.name().cmp(b.name()),
        (Node::Operator(_), Node::Operator(_)) => lhs_size
            .cmp(rhs_size)
            .then_with(|| lhs.to_string().cmp(&rhs.to_string())),
        _ => Ordering::Equal,
    })
}

fn reorder_node(node: Node, steps: &mut dyn StepCollector<Step>) -> (Node, usize) {
    let op = match node {
        Node::Operator(op) => op,
        leaf => return (leaf, 1),
    };

    let mut children = op.children
        .into_iter()
        .map(|child| reorder_node(child, steps))
        .collect::<Vec<_>>();
    let size = 1 + children.iter().map(|(_, size)| size).sum::<usize>();

    if op.kind.is_commutative() {
        let sorted = children
            .windows(2)
            .all(|pair| canonical_cmp(&pair[0], &pair[1]) != Ordering::Greater);
        if !sorted {
            children.sort_by(canonical_cmp);
            trace!(op = %op.kind, "sorted children");
            steps.push(Step::SortChildren);
        }
    }

    let children = children.into_iter().map(|(child, _)| child).collect();
    (Node::Operator(Operator::new(op.kind, children)), size)
}

#[cfg(test)]
mod tests {
    use crate::node::{add, div, mul, neg, number, rational, sub, sum, variable};
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Node {
        variable(name).unwrap()
    }

    #[test]
    fn leaves_have_size_one() {
        assert_eq!(reorder(number(1)), (number(1), 1));
        assert_eq!(reorder(var("x")), (var("x"), 1));
    }

    #[test]
    fn numbers_before_variables_before_operators() {
        let expr = sum(vec![mul(var("a"), var("b")), var("x"), number(3)]);
        let (ordered, size) = reorder(expr);
        assert_eq!(ordered.to_string(), "3 + x + a * b");
        assert_eq!(size, 6);
    }

    #[test]
    fn numbers_by_value_variables_by_name() {
        let expr = sum(vec![var("z"), number(2), var("a"), rational(1, 2).unwrap(), number(-1)]);
        let (ordered, _) = reorder(expr);
        assert_eq!(ordered.to_string(), "-1 + 1/2 + 2 + a + z");
    }

    #[test]
    fn operators_by_size_then_rendering() {
        let expr = sum(vec![
            mul(add(var("a"), var("b")), var("c")),
            mul(var("y"), var("x")),
            neg(var("q")),
            mul(var("b"), var("a")),
        ]);
        let (ordered, _) = reorder(expr);
        assert_eq!(ordered.to_string(), "(-q) + a * b + x * y + c * (a + b)");
    }

    #[test]
    fn only_sums_and_products_are_sorted() {
        let expr = sub(var("y"), var("x"));
        assert_eq!(reorder(expr).0.to_string(), "y - x");

        let expr = div(number(2), number(1));
        assert_eq!(reorder(expr).0.to_string(), "2 / 1");

        // but their children are
        let expr = sub(mul(var("y"), var("x")), number(1));
        assert_eq!(reorder(expr).0.to_string(), "x * y - 1");
    }

    #[test]
    fn deterministic_for_permutations() {
        let make = |order: [usize; 3]| {
            let mut terms = vec![Some(mul(number(2), var("x"))), Some(var("y")), Some(number(1))];
            sum(order.iter().filter_map(|&i| terms[i].take()).collect())
        };

        let expected = reorder(make([0, 1, 2])).0.to_string();
        for order in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
            assert_eq!(reorder(make(order)).0.to_string(), expected);
        }
        assert_eq!(expected, "1 + y + 2 * x");
    }

    #[test]
    fn sorting_is_recorded_once_per_operator() {
        let mut steps = Vec::new();
        reorder_with_steps(sum(vec![number(1), var("x")]), &mut steps);
        assert!(steps.is_empty());

        reorder_with_steps(sum(vec![var("x"), mul(var("b"), var("a")), number(1)]), &mut steps);
        assert_eq!(steps, vec![Step::SortChildren, Step::SortChildren]);
    }
}
