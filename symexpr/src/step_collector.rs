/// A sink for the [`Step`]s emitted by the transformation passes.
///
/// Every pass has a `*_with_steps` variant (such as
/// [`simplify_with_steps`](crate::transform::simplify_with_steps)) that pushes one [`Step`] per
/// rewrite it performs, and [`Pipeline::run_with_steps`](crate::transform::Pipeline::run_with_steps)
/// threads the same collector through every pass. The plain pass functions pass `&mut ()`, which
/// discards every step; a [`Vec<Step>`] records them in the order they happened.
///
/// ```
/// use symexpr::{node::{add, mul, number, variable}, transform::{simplify_with_steps, Step}};
///
/// let mut steps = Vec::new();
/// let expr = add(variable("x")?, mul(number(2), number(3)));
/// simplify_with_steps(expr, &mut steps)?;
/// assert_eq!(steps, vec![Step::FoldConstants]);
/// # Ok::<(), symexpr::Error>(())
/// ```
///
/// [`Step`]: crate::transform::Step
pub trait StepCollector<S> {
    /// Records a step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
