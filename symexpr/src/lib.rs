//! A symbolic-expression engine.
//!
//! Expressions are trees of numbers, variables, and the operators `+`, `-`, `*`, `/`, and unary
//! negation. They are built with the constructors in [`node`] and normalized with the passes in
//! [`transform`]:
//!
//! ```
//! use symexpr::{
//!     node::{add, mul, number, sub, variable},
//!     transform::{canonicalize, collect, expand_add, reorder, simplify},
//! };
//!
//! // x + 1 + x
//! let expr = add(add(variable("x")?, number(1)), variable("x")?);
//!
//! let expanded = expand_add(expr)?;
//! assert_eq!(expanded.to_string(), "x + 1 + x");
//!
//! let (grouped, _) = collect(expanded);
//! assert_eq!(grouped.to_string(), "x * 2 + 1");
//!
//! let (ordered, size) = reorder(grouped);
//! assert_eq!(ordered.to_string(), "1 + 2 * x");
//! assert_eq!(size, 5);
//!
//! // numeric subtrees fold into a single number
//! let expr = mul(add(number(1), number(1)), sub(number(5), number(2)));
//! assert_eq!(simplify(expr)?.to_string(), "6");
//!
//! // or run the usual pass order in one call
//! let expr = mul(add(variable("y")?, number(1)), number(2));
//! assert_eq!(canonicalize(expr)?.to_string(), "2 + 2 * y");
//! # Ok::<(), symexpr::Error>(())
//! ```
//!
//! Numbers form a tower of exact integers, exact rationals, and floating-point reals (see
//! [`numeric`]). Every fallible operation returns a [`Result`] with an [`Error`] that can render a
//! report highlighting what went wrong.

pub mod error;
pub mod node;
pub mod numeric;
pub mod step_collector;
pub mod transform;

pub use error::Error;
pub use node::{Node, NodeTag, OpKind, Operator, Variable};
pub use numeric::{Number, NumberTag, Rational, Sign};
pub use step_collector::StepCollector;
pub use transform::{canonicalize, collect, expand_add, reorder, simplify, Pass, Pipeline, Step};
