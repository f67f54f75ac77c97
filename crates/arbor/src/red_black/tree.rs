use std::fmt::Debug;

use log::warn;

use crate::default_comparator;
use crate::error::TreeError;
use crate::types::Side;
use crate::util::{
    self, get_child, get_l, get_p, get_r, pair_mut, replace_child, set_child, set_p, side_of,
    swap_remove,
};

use super::rebalance::{Pending, Rebalance};
use super::types::{Color, FixupEvent, Progress, RbNode};
use super::util::{
    assert_red_black_tree, descend, is_black, is_red, print, rotate_down, set_color,
};

/// Ordered set of keys kept balanced by red-black rules.
///
/// `add` and `remove` run the whole operation. The primitives they are built
/// from are public as well, so a driver can run one fixup step at a time (see
/// [`Rebalance`]).
pub struct RedBlackTree<K, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<RbNode<K>>,
    root: Option<u32>,
    comparator: C,
}

impl<K> RedBlackTree<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K> Default for RedBlackTree<K, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> RedBlackTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            comparator,
        }
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn node(&self, idx: u32) -> &RbNode<K> {
        &self.arena[idx as usize]
    }

    pub fn arena(&self) -> &[RbNode<K>] {
        &self.arena
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Levels on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        util::height(&self.arena, self.root)
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn find(&self, key: &K) -> Option<u32> {
        util::find(&self.arena, self.root, key, |n| &n.key, &self.comparator)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn first(&self) -> Option<&K> {
        util::first(&self.arena, self.root).map(|i| &self.arena[i as usize].key)
    }

    pub fn last(&self) -> Option<&K> {
        util::last(&self.arena, self.root).map(|i| &self.arena[i as usize].key)
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        std::iter::successors(util::first(&self.arena, self.root), |&i| {
            util::next(&self.arena, i)
        })
        .map(|i| &self.arena[i as usize].key)
    }

    pub fn assert_valid(&self) -> Result<(), String> {
        assert_red_black_tree(&self.arena, self.root, &self.comparator)
    }

    pub fn print(&self) -> String
    where
        K: Debug,
    {
        print(&self.arena, self.root, "")
    }

    /// Inserts `key` and runs every fixup step. Duplicates are logged and
    /// ignored.
    pub fn add(&mut self, key: K) -> bool
    where
        K: Debug,
    {
        match self.add_stepwise(key) {
            Ok(run) => {
                run.finish();
                true
            }
            Err((err, key)) => {
                warn!("red-black add skipped for {key:?}: {err}");
                false
            }
        }
    }

    /// Removes `key` and runs every fixup step. Missing keys are logged and
    /// ignored.
    pub fn remove(&mut self, key: &K) -> bool
    where
        K: Debug,
    {
        match self.remove_stepwise(key) {
            Ok(run) => {
                run.finish();
                true
            }
            Err(err) => {
                warn!("red-black remove skipped for {key:?}: {err}");
                false
            }
        }
    }

    /// Inserts `key` and hands back a driver for the pending fixup steps.
    ///
    /// On a duplicate the key is returned with the error.
    pub fn add_stepwise(&mut self, key: K) -> Result<Rebalance<'_, K, C>, (TreeError, K)> {
        let pending = self.insert_locate(key)?.map(Pending::Insert);
        Ok(Rebalance::new(self, pending))
    }

    /// Removes `key` and hands back a driver for the pending fixup steps.
    pub fn remove_stepwise(&mut self, key: &K) -> Result<Rebalance<'_, K, C>, TreeError> {
        let node = self.find(key).ok_or(TreeError::KeyNotFound)?;
        let victim = self.choose_replacement(node);
        let pending = match self.unlink(victim) {
            Some(double_black) => Some(Pending::Remove {
                node: double_black,
                victim,
            }),
            None => {
                self.discard(victim);
                None
            }
        };
        Ok(Rebalance::new(self, pending))
    }

    fn alloc(&mut self, key: K, color: Color) -> u32 {
        let idx = self.arena.len() as u32;
        self.arena.push(RbNode::new(key, color));
        idx
    }

    /// Moves `n` down towards `side`, keeping the root handle current.
    fn rotate(&mut self, n: u32, side: Side) -> u32 {
        let top = rotate_down(&mut self.arena, n, side);
        if get_p(&self.arena, top).is_none() {
            self.root = Some(top);
        }
        top
    }

    /// BST descent and attachment of a new red node.
    ///
    /// Returns the new node when it sits under a red parent and needs
    /// [`insert_fixup_step`](Self::insert_fixup_step).
    pub fn insert_locate(&mut self, key: K) -> Result<Option<u32>, (TreeError, K)> {
        let Some(mut curr) = self.root else {
            let idx = self.alloc(key, Color::Black);
            self.root = Some(idx);
            return Ok(None);
        };

        loop {
            let cmp = (self.comparator)(&key, &self.arena[curr as usize].key);
            if cmp == 0 {
                return Err((TreeError::DuplicateKey, key));
            }
            let side = if cmp < 0 { Side::Left } else { Side::Right };
            match get_child(&self.arena, curr, side) {
                Some(child) => curr = child,
                None => {
                    let idx = self.alloc(key, Color::Red);
                    set_child::<_, 2>(&mut self.arena, curr, side.slot(), Some(idx));
                    return Ok(if self.arena[curr as usize].is_red() {
                        Some(idx)
                    } else {
                        None
                    });
                }
            }
        }
    }

    /// One insertion fixup step for red `node` under a red parent.
    pub fn insert_fixup_step(&mut self, node: u32) -> Progress {
        let p = get_p(&self.arena, node).expect("red-red violation has a parent");
        let g = get_p(&self.arena, p).expect("red parent is never the root");
        let p_side = side_of(&self.arena, p).expect("parent hangs under grandparent");
        let uncle = get_child(&self.arena, g, p_side.opposite());

        if is_red(&self.arena, uncle) {
            set_color(&mut self.arena, p, Color::Black);
            if let Some(u) = uncle {
                set_color(&mut self.arena, u, Color::Black);
            }
            let event = FixupEvent::Recolored { grandparent: g };
            return match get_p(&self.arena, g) {
                None => Progress::done(event),
                Some(gg) => {
                    set_color(&mut self.arena, g, Color::Red);
                    if self.arena[gg as usize].is_red() {
                        Progress::then(event, g)
                    } else {
                        Progress::done(event)
                    }
                }
            };
        }

        let mut top = p;
        if side_of(&self.arena, node) != Some(p_side) {
            // inner grandchild: straighten the zig-zag first
            self.rotate(p, p_side);
            top = node;
        }
        self.rotate(g, p_side.opposite());
        set_color(&mut self.arena, top, Color::Black);
        set_color(&mut self.arena, g, Color::Red);
        Progress::done(FixupEvent::Rotated { top })
    }

    /// Picks the node that will physically leave the tree when removing
    /// `node`, and moves its key into `node`.
    ///
    /// Nodes with at most one child are their own replacement. Otherwise the
    /// candidates are the in-order predecessor and successor, preferred in
    /// this order: a red candidate, a candidate whose outer child is red, the
    /// deeper candidate (ties go to the predecessor).
    pub fn choose_replacement(&mut self, node: u32) -> u32 {
        let (Some(l), Some(r)) = (get_l(&self.arena, node), get_r(&self.arena, node)) else {
            return node;
        };

        let (pred, pred_depth) = descend(&self.arena, l, Side::Right);
        let (succ, succ_depth) = descend(&self.arena, r, Side::Left);

        let pick = if is_red(&self.arena, Some(pred)) {
            pred
        } else if is_red(&self.arena, Some(succ)) {
            succ
        } else if is_red(&self.arena, get_l(&self.arena, pred)) {
            pred
        } else if is_red(&self.arena, get_r(&self.arena, succ)) {
            succ
        } else if succ_depth > pred_depth {
            succ
        } else {
            pred
        };

        let (target, source) = pair_mut(&mut self.arena, node, pick);
        std::mem::swap(&mut target.key, &mut source.key);
        pick
    }

    /// Splices out `node`, which has at most one child.
    ///
    /// Returns the double-black position when the removal took a black node
    /// off some paths. A black leaf stays attached as its own double-black
    /// placeholder until the fixup is over; [`discard`](Self::discard) then
    /// cuts it loose.
    pub fn unlink(&mut self, node: u32) -> Option<u32> {
        let l = get_l(&self.arena, node);
        let r = get_r(&self.arena, node);
        debug_assert!(l.is_none() || r.is_none(), "unlink needs at most one child");
        let child = l.or(r);

        let Some(parent) = get_p(&self.arena, node) else {
            self.root = child;
            if let Some(c) = child {
                set_p(&mut self.arena, c, None);
                set_color(&mut self.arena, c, Color::Black);
            }
            self.arena[node as usize].links.clear();
            return None;
        };

        if self.arena[node as usize].is_red() || is_red(&self.arena, child) {
            replace_child(&mut self.arena, Some(parent), node, child);
            if let Some(c) = child {
                set_color(&mut self.arena, c, Color::Black);
            }
            self.arena[node as usize].links.clear();
            return None;
        }

        match child {
            Some(c) => {
                replace_child(&mut self.arena, Some(parent), node, Some(c));
                self.arena[node as usize].links.clear();
                Some(c)
            }
            None => Some(node),
        }
    }

    /// One double-black fixup step at `node`.
    pub fn remove_fixup_step(&mut self, node: u32) -> Progress {
        let Some(p) = get_p(&self.arena, node) else {
            return Progress::done(FixupEvent::Propagated { node });
        };
        let side = side_of(&self.arena, node).expect("node hangs under its parent");
        let far = side.opposite();
        let sister =
            get_child(&self.arena, p, far).expect("double-black node always has a sister");

        if self.arena[sister as usize].is_red() {
            set_color(&mut self.arena, sister, Color::Black);
            set_color(&mut self.arena, p, Color::Red);
            self.rotate(p, side);
            return Progress::then(FixupEvent::SisterLifted { sister }, node);
        }

        let near_nephew = get_child(&self.arena, sister, side);
        let far_nephew = get_child(&self.arena, sister, far);

        if is_black(&self.arena, near_nephew) && is_black(&self.arena, far_nephew) {
            set_color(&mut self.arena, sister, Color::Red);
            if self.arena[p as usize].is_red() {
                set_color(&mut self.arena, p, Color::Black);
                return Progress::done(FixupEvent::Absorbed { parent: p });
            }
            let event = FixupEvent::Propagated { node: p };
            return match get_p(&self.arena, p) {
                Some(_) => Progress::then(event, p),
                None => Progress::done(event),
            };
        }

        let mut sister = sister;
        if is_black(&self.arena, far_nephew) {
            let near = near_nephew.expect("red near nephew exists");
            set_color(&mut self.arena, near, Color::Black);
            set_color(&mut self.arena, sister, Color::Red);
            self.rotate(sister, far);
            sister = near;
        }

        let parent_color = self.arena[p as usize].color;
        set_color(&mut self.arena, sister, parent_color);
        set_color(&mut self.arena, p, Color::Black);
        if let Some(f) = get_child(&self.arena, sister, far) {
            set_color(&mut self.arena, f, Color::Black);
        }
        self.rotate(p, side);
        Progress::done(FixupEvent::Restructured { top: sister })
    }

    /// Detaches `victim` (if still attached) and frees its arena slot.
    /// Returns its key, which after [`choose_replacement`](Self::choose_replacement)
    /// is the key that was removed.
    pub fn discard(&mut self, victim: u32) -> K {
        if let Some(p) = get_p(&self.arena, victim) {
            replace_child(&mut self.arena, Some(p), victim, None);
        }
        self.arena[victim as usize].links.clear();
        if self.root == Some(victim) {
            self.root = None;
        }
        swap_remove(&mut self.arena, victim, &mut self.root).key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> RedBlackTree<i32> {
        let mut tree = RedBlackTree::new();
        for &k in keys {
            assert!(tree.add(k));
            tree.assert_valid().unwrap();
        }
        tree
    }

    #[test]
    fn first_key_becomes_black_root() {
        let tree = tree_of(&[7]);
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).key, 7);
        assert_eq!(tree.node(root).color, Color::Black);
    }

    #[test]
    fn zig_zag_insert_lifts_new_node() {
        let mut tree = tree_of(&[30, 10]);
        let fix = tree.insert_locate(20).unwrap().unwrap();
        let progress = tree.insert_fixup_step(fix);
        assert_eq!(progress.next, None);
        assert_eq!(progress.event, FixupEvent::Rotated { top: fix });
        assert_eq!(tree.root(), Some(fix));
        tree.assert_valid().unwrap();
    }

    #[test]
    fn recolor_at_root_keeps_root_black() {
        let mut tree = tree_of(&[20, 10, 30]);
        let fix = tree.insert_locate(5).unwrap().unwrap();
        let progress = tree.insert_fixup_step(fix);
        assert_eq!(progress.next, None);
        assert!(matches!(progress.event, FixupEvent::Recolored { .. }));
        tree.assert_valid().unwrap();
    }

    #[test]
    fn replacement_prefers_red_predecessor() {
        //      20B
        //     /   \
        //   10B   30B
        //     \
        //     15R
        let mut tree = tree_of(&[20, 10, 30, 15]);
        let root = tree.root().unwrap();
        let victim = tree.choose_replacement(root);
        assert_eq!(tree.node(root).key, 15);
        assert_eq!(tree.node(victim).key, 20);
        assert!(tree.node(victim).is_red());
    }

    #[test]
    fn replacement_ties_go_to_predecessor() {
        let mut tree = tree_of(&[20, 10, 30, 5]);
        assert!(tree.remove(&5));
        let root = tree.root().unwrap();
        let victim = tree.choose_replacement(root);
        assert_eq!(tree.node(root).key, 10);
        assert_eq!(tree.node(victim).key, 20);
    }

    #[test]
    fn black_leaf_removal_rebalances() {
        let mut tree = tree_of(&[20, 10, 30, 40]);
        // 10 is a black leaf whose sister subtree holds a red far nephew
        assert!(tree.remove(&10));
        tree.assert_valid().unwrap();
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![20, 30, 40]);
    }

    #[test]
    fn discard_relocates_last_node() {
        let mut tree = tree_of(&[1, 2, 3, 4, 5, 6]);
        for k in [1, 4, 6] {
            assert!(tree.remove(&k));
            tree.assert_valid().unwrap();
        }
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![2, 3, 5]);
        for k in [2, 3, 5] {
            assert!(tree.contains(&k));
        }
    }
}
