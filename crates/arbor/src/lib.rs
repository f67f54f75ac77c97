//! Arena-backed linked trees.
//!
//! Every container here keeps its nodes in a `Vec<N>` arena it owns. Links
//! between nodes are `Option<u32>` indices into that arena, so a child's
//! back-reference to its parent is a plain index and never a second owner.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | [`Links`], [`TreeNode`] (N-ary links) and the binary [`Node`] view |
//! | [`util`] | `set_child`, `detach`, in-order walks, `height`, structural [`swap`] |
//! | [`heap`] | [`PriorityQueue`], a min-heap laid out as a linked complete tree |
//! | [`red_black`] | [`RedBlackTree`], its decomposed primitives and the stepwise [`Rebalance`] driver |
//!
//! Both containers move payload rather than nodes: the heap exchanges
//! key/value pairs while sifting and the red-black tree copies the
//! replacement key up on removal. [`swap`] relinks two nodes structurally for
//! callers that hold node handles across operations.

pub mod error;
pub mod heap;
pub mod red_black;
pub mod types;
pub mod util;

pub use error::TreeError;
pub use heap::PriorityQueue;
pub use red_black::{Color, FixupEvent, Progress, RbNode, Rebalance, RedBlackTree};
pub use types::{Links, Node, Side, TreeNode};
pub use util::{detach, first, height, last, next, prev, set_child, size, swap};

/// Three-way comparison used when no comparator is supplied: negative, zero
/// or positive.
pub(crate) fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}
