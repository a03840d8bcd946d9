//! Grouping of like terms in sums.

use crate::{
    node::{self, hash, Node, OpKind, Operator},
    step_collector::StepCollector,
};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use super::step::Step;
use tracing::{debug, trace};

/// A distinct term of a sum and the number of times it appeared.
struct Group {
    term: Node,
    hash: u64,
    count: usize,
}

/// Groups identical terms of every sum, returning the new tree and its structural hash.
///
/// Terms of a sum are collected first, then bucketed by their hash. A term that appears once is
/// kept as-is, and a term that appears `k > 1` times is replaced by `term * k`. Groups keep the
/// position of their first occurrence. Terms whose hashes collide are grouped together.
///
/// Nodes other than sums are returned unchanged, so sums nested inside products or negations are
/// not grouped. Run [`expand_add`](super::expand_add) first to bring them to the top.
///
/// ```
/// use symexpr::{node::{add, number, sum, variable}, transform::collect};
///
/// let expr = sum(vec![variable("x")?, number(1), variable("x")?]);
/// let (grouped, hash) = collect(expr);
/// assert_eq!(grouped.to_string(), "x * 2 + 1");
/// assert_eq!(hash, grouped.hash_code());
/// # Ok::<(), symexpr::Error>(())
/// ```
pub fn collect(node: Node) -> (Node, u64) {
    collect_with_steps(node, &mut ())
}

/// [`collect`], recording every rewrite in `steps`.
pub fn collect_with_steps(node: Node, steps: &mut dyn StepCollector<Step>) -> (Node, u64) {
    debug!(input = %node, "collect");
    collect_node(node, steps)
}

fn collect_node(node: Node, steps: &mut dyn StepCollector<Step>) -> (Node, u64) {
    let terms = match node {
        Node::Operator(Operator { kind: OpKind::Add, children }) => children,
        other => {
            let hash = other.hash_code();
            return (other, hash);
        },
    };

    let mut groups: Vec<Group> = Vec::with_capacity(terms.len());
    let mut index = FxHashMap::<u64, usize>::default();
    for term in terms {
        let (term, hash) = collect_node(term, steps);
        match index.entry(hash) {
            Entry::Occupied(entry) => groups[*entry.get()].count += 1,
            Entry::Vacant(entry) => {
                entry.insert(groups.len());
                groups.push(Group { term, hash, count: 1 });
            },
        }
    }

    let mut children = Vec::with_capacity(groups.len());
    let mut hashes = Vec::with_capacity(groups.len());
    for Group { term, hash, count } in groups {
        if count == 1 {
            children.push(term);
            hashes.push(hash);
        } else {
            trace!(%term, count, "combining like terms");
            steps.push(Step::CombineLikeTerms);

            // a `Vec` never holds more than `isize::MAX` elements, so the count fits
            let grouped = node::mul(term, node::number(count as i64));
            hashes.push(grouped.hash_code());
            children.push(grouped);
        }
    }

    (node::sum(children), hash::combine(OpKind::Add, hashes))
}

#[cfg(test)]
mod tests {
    use crate::{
        node::{add, mul, neg, number, sum, variable},
        transform::{expand_add, reorder},
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Node {
        variable(name).unwrap()
    }

    #[test]
    fn leaves_report_their_hash() {
        let (node, hash) = collect(var("x"));
        assert_eq!(node, var("x"));
        assert_eq!(hash, var("x").hash_code());
    }

    #[test]
    fn like_terms_are_grouped() {
        let expr = add(add(var("x"), number(1)), var("x"));
        let (grouped, hash) = collect(expand_add(expr).unwrap());
        assert_eq!(grouped.children().len(), 2);
        assert_eq!(grouped.to_string(), "x * 2 + 1");
        assert_eq!(hash, grouped.hash_code());

        let (ordered, _) = reorder(grouped);
        assert_eq!(ordered.to_string(), "1 + 2 * x");
    }

    #[test]
    fn distinct_terms_are_kept() {
        let expr = sum(vec![var("x"), var("y"), number(1)]);
        let (grouped, _) = collect(expr);
        assert_eq!(grouped.to_string(), "x + y + 1");
    }

    #[test]
    fn groups_keep_first_position() {
        let expr = sum(vec![var("a"), var("b"), var("a"), var("b"), var("b"), number(1)]);
        let mut steps = Vec::new();
        let (grouped, _) = collect_with_steps(expr, &mut steps);
        assert_eq!(grouped.to_string(), "a * 2 + b * 3 + 1");
        assert_eq!(steps, vec![Step::CombineLikeTerms, Step::CombineLikeTerms]);
    }

    #[test]
    fn permuted_sums_are_like_terms() {
        let expr = sum(vec![
            mul(add(var("x"), var("y")), var("z")),
            mul(add(var("y"), var("x")), var("z")),
        ]);
        let (grouped, _) = collect(expr);
        assert_eq!(grouped.children().len(), 1);
        assert_eq!(grouped.to_string(), "(x + y) * z * 2");
    }

    #[test]
    fn squares_of_different_variables_are_kept() {
        let expr = sum(vec![mul(var("x"), var("x")), mul(var("y"), var("y"))]);
        let (grouped, _) = collect(expr);
        assert_eq!(grouped.children().len(), 2);
        assert_eq!(grouped.to_string(), "x * x + y * y");
    }

    #[test]
    fn hash_ignores_term_order() {
        let (_, a) = collect(sum(vec![var("x"), number(1), var("x")]));
        let (_, b) = collect(sum(vec![number(1), var("x"), var("x")]));
        assert_eq!(a, b);
    }

    #[test]
    fn nested_sums_are_collected() {
        let expr = sum(vec![sum(vec![var("x"), var("x")]), var("y")]);
        let (grouped, _) = collect(expr);
        assert_eq!(grouped.to_string(), "x * 2 + y");
    }

    #[test]
    fn other_operators_are_not_entered() {
        let expr = neg(sum(vec![var("x"), var("x")]));
        let (node, hash) = collect(expr);
        assert_eq!(node.to_string(), "-x + x");
        assert_eq!(hash, node.hash_code());
    }
}
