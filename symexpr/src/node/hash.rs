//! Structural hashing.
//!
//! Equal trees always hash equally, and sums and products hash equally under any permutation of
//! their children. Grouping of like terms relies on these hashes alone, so two different terms
//! whose hashes collide are treated as the same term.

use super::{Node, OpKind, Operator};

/// The fixed seed of each operator kind.
const ADD_SEED: u64 = 0x9e37_79b9_7f4a_7c15;
const SUB_SEED: u64 = 0xc2b2_ae3d_27d4_eb4f;
const MUL_SEED: u64 = 0x1656_67b1_9e37_79f9;
const DIV_SEED: u64 = 0x27d4_eb2f_1656_67c5;
const NEG_SEED: u64 = 0x85eb_ca77_c2b2_ae63;

impl OpKind {
    /// The seed mixed into the hash of every operator of this kind.
    pub fn hash_seed(self) -> u64 {
        match self {
            Self::Add => ADD_SEED,
            Self::Sub => SUB_SEED,
            Self::Mul => MUL_SEED,
            Self::Div => DIV_SEED,
            Self::Neg => NEG_SEED,
        }
    }
}

/// Scrambles the bits of a child hash before it is combined, so that children with related hashes
/// (such as consecutive integers) do not cancel out.
fn mix(mut h: u64) -> u64 {
    h ^= h >> 30;
    h = h.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    h ^= h >> 27;
    h = h.wrapping_mul(0x94d0_49bb_1331_11eb);
    h ^ (h >> 31)
}

/// Combines the hashes of an operator's children with the seed of its kind.
///
/// Children of commutative operators are combined with a wrapping sum, which does not depend on
/// their order and, unlike XOR, does not cancel out repeated children. Children of other operators
/// are combined positionally.
pub(crate) fn combine(kind: OpKind, child_hashes: impl IntoIterator<Item = u64>) -> u64 {
    let hashes = child_hashes.into_iter();
    let combined = if kind.is_commutative() {
        hashes.fold(0u64, |acc, h| acc.wrapping_add(mix(h)))
    } else {
        hashes.fold(0u64, |acc, h| acc.rotate_left(5) ^ mix(h))
    };
    kind.hash_seed() ^ combined.rotate_left(1)
}

impl Operator {
    /// The structural hash of the operator node.
    pub fn hash_code(&self) -> u64 {
        combine(self.kind, self.children.iter().map(Node::hash_code))
    }
}

impl Node {
    /// The structural hash of the tree rooted at this node.
    ///
    /// ```
    /// use symexpr::node::{add, mul, number, variable};
    ///
    /// let a = add(variable("x")?, mul(number(2), variable("y")?));
    /// let b = add(mul(variable("y")?, number(2)), variable("x")?);
    /// assert_eq!(a.hash_code(), b.hash_code());
    /// # Ok::<(), symexpr::Error>(())
    /// ```
    pub fn hash_code(&self) -> u64 {
        match self {
            Self::Number(n) => n.hash_code(),
            Self::Variable(var) => var.hash_code(),
            Self::Operator(op) => op.hash_code(),
        }
    }
}
