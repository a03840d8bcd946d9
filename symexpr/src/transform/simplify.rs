//! Constant folding.

use crate::{
    error::Error,
    node::{Node, OpKind, Operator},
    numeric::Number,
    step_collector::StepCollector,
};
use super::step::Step;
use tracing::{debug, trace};

/// Folds every operator whose children are all numbers into a single number, bottom-up.
///
/// Operators with at least one non-numeric child keep their shape, with their children simplified.
/// No algebraic identities are applied: `x + 0` stays `x + 0`. Rationals with a denominator of
/// one are narrowed to integers, so the pass is idempotent.
///
/// ```
/// use symexpr::{node::{add, mul, number, rational, sub}, transform::simplify};
///
/// let expr = mul(add(number(1), rational(1, 2)?), sub(number(2), number(4)));
/// assert_eq!(simplify(expr)?.to_string(), "-3");
/// # Ok::<(), symexpr::Error>(())
/// ```
pub fn simplify(node: Node) -> Result<Node, Error> {
    simplify_with_steps(node, &mut ())
}

/// [`simplify`], recording every rewrite in `steps`.
pub fn simplify_with_steps(node: Node, steps: &mut dyn StepCollector<Step>) -> Result<Node, Error> {
    debug!(input = %node, "simplify");
    simplify_node(node, steps)
}

fn simplify_node(node: Node, steps: &mut dyn StepCollector<Step>) -> Result<Node, Error> {
    match node {
        Node::Number(n) => Ok(Node::Number(normalize(n, steps))),
        Node::Variable(_) => Ok(node),
        Node::Operator(op) => {
            op.check_arity()?;
            let children = op.children
                .into_iter()
                .map(|child| simplify_node(child, steps))
                .collect::<Result<Vec<_>, _>>()?;
            let op = Operator::new(op.kind, children);

            if !op.children.iter().all(|child| matches!(child, Node::Number(_))) {
                return Ok(Node::Operator(op));
            }

            let value = fold(&op)?;
            trace!(op = %op.kind, %value, "folded constants");
            steps.push(Step::FoldConstants);
            Ok(Node::Number(normalize(value, steps)))
        },
    }
}

/// Narrows a trivial rational to an integer.
fn normalize(n: Number, steps: &mut dyn StepCollector<Step>) -> Number {
    let normalized = n.normalize();
    if normalized.tag() != n.tag() {
        steps.push(Step::NormalizeRational);
    }
    normalized
}

/// Computes the value of an operator whose children are all numbers.
fn fold(op: &Operator) -> Result<Number, Error> {
    let operands = op.children
        .iter()
        .map(Node::try_as_number)
        .collect::<Result<Vec<_>, _>>()?;

    match (op.kind, operands.as_slice()) {
        (OpKind::Add, [first, rest @ ..]) => rest
            .iter()
            .try_fold(**first, |acc, n| acc.checked_add(n)),
        (OpKind::Sub, [lhs, rhs]) => lhs.checked_sub(rhs),
        (OpKind::Mul, [lhs, rhs]) => lhs.checked_mul(rhs),
        (OpKind::Div, [lhs, rhs]) => lhs.checked_div(rhs),
        (OpKind::Neg, [operand]) => operand.checked_neg(),
        _ => Err(op.arity_error()),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{kind::{ArityMismatch, DivisionByZero, IntegerOverflow}, Category},
        node::{add, div, mul, neg, number, rational, sub, sum, variable},
        numeric::{NumberTag, Rational},
    };
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn leaves_are_fixed_points() {
        assert_eq!(simplify(number(3)).unwrap(), number(3));
        assert_eq!(simplify(variable("x").unwrap()).unwrap(), variable("x").unwrap());
    }

    #[test]
    fn folds_numeric_subtrees() {
        let expr = mul(add(number(1), number(1)), number(3));
        assert_eq!(simplify(expr).unwrap(), number(6));
    }

    #[test]
    fn nested_subtraction() {
        let expr = sub(number(1), sub(number(2), number(3)));
        assert_eq!(simplify(expr).unwrap().to_string(), "2");
    }

    #[test]
    fn keeps_symbolic_operators() {
        let x = variable("x").unwrap();
        let expr = add(x, mul(number(2), number(3)));
        assert_eq!(simplify(expr).unwrap().to_string(), "x + 6");

        // no identities
        let expr = add(variable("x").unwrap(), number(0));
        assert_eq!(simplify(expr).unwrap().to_string(), "x + 0");
    }

    #[test]
    fn promotion() {
        let expr = add(number(1), rational(1, 2).unwrap());
        assert_eq!(simplify(expr).unwrap().to_string(), "3/2");

        let expr = add(rational(1, 2).unwrap(), number(0.5));
        let value = *simplify(expr).unwrap().try_as_number().unwrap();
        assert_eq!(value.tag(), NumberTag::Real);
        assert_eq!(value, Number::Real(1.0));
    }

    #[test]
    fn trivial_rationals_become_integers() {
        let mut steps = Vec::new();
        let leaf = number(Rational::from(4i64));
        assert_eq!(simplify_with_steps(leaf, &mut steps).unwrap().try_as_number().unwrap().tag(), NumberTag::Integer);
        assert_eq!(steps, vec![Step::NormalizeRational]);

        let expr = mul(rational(1, 2).unwrap(), number(4));
        let result = simplify(expr).unwrap();
        assert_eq!(result, number(2));
        assert_eq!(result.try_as_number().unwrap().tag(), NumberTag::Integer);
    }

    #[test]
    fn idempotent() {
        let exprs = [
            mul(add(number(1), rational(1, 3).unwrap()), sub(number(2), number(4))),
            div(number(1), number(3)),
            sum(vec![number(1), neg(number(2)), neg(neg(number(3)))]),
            add(variable("x").unwrap(), mul(number(2), rational(3, 2).unwrap())),
            neg(number(2.5)),
        ];

        for expr in exprs {
            let once = simplify(expr).unwrap();
            let twice = simplify(once.deep_copy()).unwrap();
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let err = simplify(div(number(1), sub(number(2), number(2)))).unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert_eq!(err.category(), Category::Arithmetic);
    }

    #[test]
    fn overflowing_division_is_an_error() {
        let err = simplify(div(number(i64::MIN), number(-1))).unwrap_err();
        assert!(err.is::<IntegerOverflow>());
        assert_eq!(err.category(), Category::Arithmetic);
    }

    #[test]
    fn wrong_arity_is_an_internal_error() {
        let expr = Node::Operator(Operator::new(OpKind::Div, vec![number(1)]));
        let err = simplify(expr).unwrap_err();
        assert!(err.is::<ArityMismatch>());
        assert_eq!(err.category(), Category::Internal);

        let expr = Node::Operator(Operator::new(OpKind::Add, Vec::new()));
        assert!(simplify(expr).is_err());
    }

    #[test]
    fn records_folds() {
        let mut steps = Vec::new();
        let expr = add(mul(number(2), number(3)), variable("x").unwrap());
        simplify_with_steps(expr, &mut steps).unwrap();
        assert_eq!(steps, vec![Step::FoldConstants]);
    }
}
