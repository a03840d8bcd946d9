#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rewrite performed by one of the passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Step {
    /// An operator whose children are all numbers was replaced by its value.
    ///
    /// `1 + 2 = 3`
    FoldConstants,

    /// A rational with a denominator of one was replaced by an integer.
    NormalizeRational,

    /// A sum nested in a sum was spliced into its parent.
    ///
    /// `a + (b + c) = a + b + c`
    FlattenAdd,

    /// A difference was rewritten as a sum with negated right-hand terms.
    ///
    /// `a - (b + c) = a + (-b) + (-c)`
    DistributeSub,

    /// A product of sums was expanded into a sum of products.
    ///
    /// `(a + b) * c = a * c + b * c`
    DistributeMul,

    /// Identical terms of a sum were grouped into one term times their count.
    ///
    /// `x + x = x * 2`
    CombineLikeTerms,

    /// The children of a sum or product were sorted into canonical order.
    SortChildren,
}
