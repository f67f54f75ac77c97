//! Red-black tree with its insertion and removal split into primitives.
//!
//! [`RedBlackTree::add`] and [`RedBlackTree::remove`] are compositions of
//! public steps: `insert_locate` then `insert_fixup_step` until done, and
//! `choose_replacement`, `unlink`, `remove_fixup_step` until done, then
//! `discard`. [`Rebalance`] exposes the fixup loop as an iterator.

pub mod rebalance;
pub mod tree;
pub mod types;
pub mod util;

pub use rebalance::Rebalance;
pub use tree::RedBlackTree;
pub use types::{Color, FixupEvent, Progress, RbNode};
pub use util::{assert_red_black_tree, print};
