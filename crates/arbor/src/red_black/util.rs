use std::fmt::Debug;

use crate::types::Side;
use crate::util::{first, get_l, get_p, get_r, next, replace_child, set_l, set_p, set_r};

use super::types::{Color, RbNode};

/// Empty slots count as black.
#[inline]
pub(crate) fn is_black<K>(arena: &[RbNode<K>], node: Option<u32>) -> bool {
    node.map_or(true, |i| arena[i as usize].is_black())
}

#[inline]
pub(crate) fn is_red<K>(arena: &[RbNode<K>], node: Option<u32>) -> bool {
    !is_black(arena, node)
}

#[inline]
pub(crate) fn set_color<K>(arena: &mut [RbNode<K>], node: u32, color: Color) {
    arena[node as usize].color = color;
}

/// Moves `n` down to the left; its right child takes its place.
/// Returns the new subtree top.
pub(crate) fn rotate_left<K>(arena: &mut [RbNode<K>], n: u32) -> u32 {
    let r = get_r(arena, n).expect("left rotation needs a right child");
    let p = get_p(arena, n);
    let rl = get_l(arena, r);

    set_r(arena, n, rl);
    if let Some(rl) = rl {
        set_p(arena, rl, Some(n));
    }
    replace_child(arena, p, n, Some(r));
    set_l(arena, r, Some(n));
    set_p(arena, n, Some(r));
    r
}

/// Moves `n` down to the right; its left child takes its place.
/// Returns the new subtree top.
pub(crate) fn rotate_right<K>(arena: &mut [RbNode<K>], n: u32) -> u32 {
    let l = get_l(arena, n).expect("right rotation needs a left child");
    let p = get_p(arena, n);
    let lr = get_r(arena, l);

    set_l(arena, n, lr);
    if let Some(lr) = lr {
        set_p(arena, lr, Some(n));
    }
    replace_child(arena, p, n, Some(l));
    set_r(arena, l, Some(n));
    set_p(arena, n, Some(l));
    l
}

/// Moves `n` down towards `side`.
pub(crate) fn rotate_down<K>(arena: &mut [RbNode<K>], n: u32, side: Side) -> u32 {
    match side {
        Side::Left => rotate_left(arena, n),
        Side::Right => rotate_right(arena, n),
    }
}

/// Follows `side` links from `node` to the end, counting the steps taken.
pub(crate) fn descend<K>(arena: &[RbNode<K>], mut node: u32, side: Side) -> (u32, usize) {
    let mut depth = 0;
    loop {
        let child = match side {
            Side::Left => get_l(arena, node),
            Side::Right => get_r(arena, node),
        };
        match child {
            Some(c) => {
                node = c;
                depth += 1;
            }
            None => return (node, depth),
        }
    }
}

pub fn assert_red_black_tree<K, C>(
    arena: &[RbNode<K>],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err("Root has parent".to_string());
    }
    if !arena[root as usize].is_black() {
        return Err("Root is not black".to_string());
    }

    fn black_height<K>(arena: &[RbNode<K>], node: Option<u32>) -> Result<usize, String> {
        let Some(node) = node else {
            return Ok(0);
        };

        let l = get_l(arena, node);
        let r = get_r(arena, node);

        if let Some(li) = l {
            if get_p(arena, li) != Some(node) {
                return Err("Broken parent link on left child".to_string());
            }
        }
        if let Some(ri) = r {
            if get_p(arena, ri) != Some(node) {
                return Err("Broken parent link on right child".to_string());
            }
        }

        if arena[node as usize].is_red() {
            if is_red(arena, l) {
                return Err("Red node has red left child".to_string());
            }
            if is_red(arena, r) {
                return Err("Red node has red right child".to_string());
            }
        }

        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err("Black height mismatch".to_string());
        }

        Ok(lh + usize::from(arena[node as usize].is_black()))
    }

    black_height(arena, Some(root))?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            let cmp = comparator(&arena[prev as usize].key, &arena[i as usize].key);
            if cmp >= 0 {
                return Err("Node order violated".to_string());
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Indented dump of the subtree under `node`.
pub fn print<K: Debug>(arena: &[RbNode<K>], node: Option<u32>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.is_black() { "black" } else { "red" };
            let left = print(arena, get_l(arena, i), &format!("{tab}  "));
            let right = print(arena, get_r(arena, i), &format!("{tab}  "));
            format!("{:?} {color}\n{tab}L={left}\n{tab}R={right}", n.key)
        }
    }
}
