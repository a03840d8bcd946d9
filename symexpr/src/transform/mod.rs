//! The transformation passes.
//!
//! Every pass takes ownership of a tree and returns its replacement. Passes can be applied in any
//! order; [`Pipeline`] applies a list of them, and [`canonicalize`] applies the usual order:
//!
//! 1. [`expand_add`] distributes products and differences over sums.
//! 2. [`collect`] groups like terms.
//! 3. [`reorder`] sorts sums and products into a canonical order.
//! 4. [`simplify`] folds constant subtrees.
//!
//! Each pass also has a `*_with_steps` form that records the rewrites it performed in a
//! [`StepCollector`](crate::step_collector::StepCollector).

pub mod collect;
pub mod expand;
pub mod pipeline;
pub mod reorder;
pub mod simplify;
pub mod step;

pub use collect::{collect, collect_with_steps};
pub use expand::{expand_add, expand_add_with_steps};
pub use pipeline::{canonicalize, Pass, Pipeline};
pub use reorder::{reorder, reorder_with_steps};
pub use simplify::{simplify, simplify_with_steps};
pub use step::Step;
