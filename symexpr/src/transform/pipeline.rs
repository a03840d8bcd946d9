use crate::{error::Error, node::Node, step_collector::StepCollector};
use std::fmt::{self, Display, Formatter};
use super::{collect_with_steps, expand_add_with_steps, reorder_with_steps, simplify_with_steps, step::Step};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the transformation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pass {
    /// [`expand_add`](super::expand_add)
    Expand,

    /// [`collect`](super::collect)
    Collect,

    /// [`reorder`](super::reorder)
    Reorder,

    /// [`simplify`](super::simplify)
    Simplify,
}

impl Pass {
    /// Applies the pass to a node.
    pub fn apply(self, node: Node, steps: &mut dyn StepCollector<Step>) -> Result<Node, Error> {
        match self {
            Self::Expand => expand_add_with_steps(node, steps),
            Self::Collect => Ok(collect_with_steps(node, steps).0),
            Self::Reorder => Ok(reorder_with_steps(node, steps).0),
            Self::Simplify => simplify_with_steps(node, steps),
        }
    }
}

impl Display for Pass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expand => write!(f, "expand_add"),
            Self::Collect => write!(f, "collect"),
            Self::Reorder => write!(f, "reorder"),
            Self::Simplify => write!(f, "simplify"),
        }
    }
}

/// An ordered list of passes applied one after another.
///
/// The passes are not required to appear in any particular order, or at all. The default pipeline
/// is the canonical order: expand, collect, reorder, then simplify.
///
/// ```
/// use symexpr::{node::{add, number, sum, variable}, transform::{Pass, Pipeline}};
///
/// let expr = sum(vec![variable("x")?, number(1), variable("x")?]);
/// assert_eq!(Pipeline::default().run(expr)?.to_string(), "1 + 2 * x");
///
/// let only_collect = Pipeline::new().then(Pass::Collect);
/// let expr = add(variable("y")?, variable("y")?);
/// assert_eq!(only_collect.run(expr)?.to_string(), "y * 2");
/// # Ok::<(), symexpr::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pipeline {
    passes: Vec<Pass>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_passes([Pass::Expand, Pass::Collect, Pass::Reorder, Pass::Simplify])
    }
}

impl Pipeline {
    /// Creates an empty pipeline, which returns its input unchanged.
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Creates a pipeline from a list of passes.
    pub fn from_passes(passes: impl IntoIterator<Item = Pass>) -> Self {
        Self { passes: passes.into_iter().collect() }
    }

    /// Appends a pass to the end of the pipeline.
    pub fn then(mut self, pass: Pass) -> Self {
        self.passes.push(pass);
        self
    }

    /// The passes of the pipeline, in order.
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Runs every pass in order.
    pub fn run(&self, node: Node) -> Result<Node, Error> {
        self.run_with_steps(node, &mut ())
    }

    /// [`Pipeline::run`], recording the rewrites of every pass in `steps`.
    pub fn run_with_steps(
        &self,
        node: Node,
        steps: &mut dyn StepCollector<Step>,
    ) -> Result<Node, Error> {
        self.passes.iter().try_fold(node, |node, pass| {
            debug!(%pass, "running pass");
            pass.apply(node, steps)
        })
    }
}

/// Runs the default pipeline on a node.
pub fn canonicalize(node: Node) -> Result<Node, Error> {
    Pipeline::default().run(node)
}
