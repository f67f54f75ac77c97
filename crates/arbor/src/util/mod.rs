//! Arena tree utilities.
//!
//! - `set_child` / `detach` work on any [`TreeNode`] arity.
//! - The walks (`first`, `next`, ...) and [`swap`] work on binary [`Node`]s.

pub mod swap;

use crate::types::{Node, Side, TreeNode};

pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

#[inline]
pub(crate) fn get_child<N: Node>(arena: &[N], idx: u32, side: Side) -> Option<u32> {
    match side {
        Side::Left => get_l(arena, idx),
        Side::Right => get_r(arena, idx),
    }
}

/// Which side of its parent `idx` hangs on. `None` for the root.
pub(crate) fn side_of<N: Node>(arena: &[N], idx: u32) -> Option<Side> {
    let p = get_p(arena, idx)?;
    if get_l(arena, p) == Some(idx) {
        Some(Side::Left)
    } else {
        Some(Side::Right)
    }
}

/// Puts `new` where `old` hung under `parent` (or makes it parentless).
/// `old` keeps its own links.
pub(crate) fn replace_child<N: Node>(
    arena: &mut [N],
    parent: Option<u32>,
    old: u32,
    new: Option<u32>,
) {
    if let Some(new) = new {
        set_p(arena, new, parent);
    }
    if let Some(p) = parent {
        if get_l(arena, p) == Some(old) {
            set_l(arena, p, new);
        } else {
            set_r(arena, p, new);
        }
    }
}

/// Mutable references to two distinct arena slots.
pub(crate) fn pair_mut<T>(arena: &mut [T], a: u32, b: u32) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b, "pair_mut needs distinct slots");
    let (a, b) = (a as usize, b as usize);
    if a < b {
        let (head, tail) = arena.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = arena.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}

/// Attaches `child` in `slot` of `parent` and points the child back at it.
///
/// `None` empties the slot. The previous occupant is not touched; use
/// [`detach`] to cut a node loose from its parent.
pub fn set_child<T, const N: usize>(arena: &mut [T], parent: u32, slot: usize, child: Option<u32>)
where
    T: TreeNode<N>,
{
    arena[parent as usize].links_mut().children[slot] = child;
    if let Some(child) = child {
        arena[child as usize].links_mut().parent = Some(parent);
    }
}

/// Empties the parent slot holding `node` and clears its back-reference.
///
/// The node keeps its own children.
pub fn detach<T, const N: usize>(arena: &mut [T], node: u32)
where
    T: TreeNode<N>,
{
    if let Some(parent) = arena[node as usize].links().parent {
        for slot in arena[parent as usize].links_mut().children.iter_mut() {
            if *slot == Some(node) {
                *slot = None;
            }
        }
    }
    arena[node as usize].links_mut().parent = None;
}

/// Removes `idx` from the arena by moving the last node into its slot and
/// re-pointing that node's neighbours. `idx` must already be detached.
///
/// Returns the removed node. `root` is updated if the moved node was the root.
pub(crate) fn swap_remove<N: Node>(arena: &mut Vec<N>, idx: u32, root: &mut Option<u32>) -> N {
    let last = (arena.len() - 1) as u32;
    if idx != last {
        arena.swap(idx as usize, last as usize);
        let p = get_p(arena, idx);
        match p {
            Some(p) => {
                if get_l(arena, p) == Some(last) {
                    set_l(arena, p, Some(idx));
                } else {
                    set_r(arena, p, Some(idx));
                }
            }
            None => {
                if *root == Some(last) {
                    *root = Some(idx);
                }
            }
        }
        if let Some(l) = get_l(arena, idx) {
            set_p(arena, l, Some(idx));
        }
        if let Some(r) = get_r(arena, idx) {
            set_p(arena, r, Some(idx));
        }
    }
    arena.pop().expect("arena holds the removed node")
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        return first(arena, Some(r));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], node: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, node) {
        return last(arena, Some(l));
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| {
        1 + size(arena, get_l(arena, r)) + size(arena, get_r(arena, r))
    })
}

/// Number of nodes on the longest root-to-leaf path; `0` for an empty tree.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| {
        1 + height(arena, get_l(arena, r)).max(height(arena, get_r(arena, r)))
    })
}

/// Finds a node by key in a binary search tree.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, key_of(&arena[i as usize]));
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}
