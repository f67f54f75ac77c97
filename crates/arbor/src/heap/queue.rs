use std::collections::VecDeque;

use crate::default_comparator;
use crate::types::{Side, LEFT, RIGHT};
use crate::util::{detach, get_child, get_l, get_p, get_r, pair_mut, set_child};

use super::types::HeapNode;

/// Min-heap over `(key, value)` pairs stored as a linked complete binary tree.
///
/// The slot of heap position `n` (1-based) is found by reading the bits of
/// `n` below its leading one from the root down, `1` going right and `0`
/// going left. Sifting exchanges payload, never nodes. Nodes are kept in the
/// arena in position order, so position `n` always lives at index `n - 1`.
///
/// Ties on key are broken by structural position, not insertion order.
pub struct PriorityQueue<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    arena: Vec<HeapNode<K, V>>,
    top: Option<u32>,
    comparator: C,
}

impl<K, V> PriorityQueue<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for PriorityQueue<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> PriorityQueue<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            top: None,
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.top = None;
    }

    /// Root handle, for callers that walk the tree.
    pub fn root_index(&self) -> Option<u32> {
        self.top
    }

    pub fn node(&self, idx: u32) -> &HeapNode<K, V> {
        &self.arena[idx as usize]
    }

    /// Smallest entry without removing it.
    pub fn peek(&self) -> Option<(&K, &V)> {
        self.top.map(|top| {
            let node = &self.arena[top as usize];
            (&node.key, &node.value)
        })
    }

    pub fn enqueue(&mut self, key: K, value: V) {
        let idx = self.arena.len() as u32;
        self.arena.push(HeapNode::new(key, value));
        let position = self.arena.len();

        if position == 1 {
            self.top = Some(idx);
            return;
        }

        let parent = self.parent_of(position);
        set_child::<_, 2>(&mut self.arena, parent, slot_of(position), Some(idx));
        self.sift_up(idx);
    }

    /// Removes and returns the entry with the smallest key.
    pub fn dequeue(&mut self) -> Option<(K, V)> {
        let top = self.top?;
        let position = self.arena.len();

        if position == 1 {
            self.top = None;
            return self.arena.pop().map(HeapNode::into_entry);
        }

        let parent = self.parent_of(position);
        let side = if slot_of(position) == LEFT {
            Side::Left
        } else {
            Side::Right
        };
        let last = get_child(&self.arena, parent, side)
            .expect("complete tree has a node at the last position");
        debug_assert_eq!(last as usize, position - 1);

        let (root, tail) = pair_mut(&mut self.arena, top, last);
        root.swap_payload(tail);
        detach::<_, 2>(&mut self.arena, last);
        let removed = self.arena.pop().map(HeapNode::into_entry);

        self.sift_down(top);
        removed
    }

    /// Walks from the root to the parent of heap position `position` (>= 2).
    fn parent_of(&self, position: usize) -> u32 {
        let mut node = self.top.expect("non-empty heap has a root");
        let mut shift = usize::BITS - 1 - position.leading_zeros();
        while shift > 1 {
            shift -= 1;
            let child = if (position >> shift) & 1 == 1 {
                get_r(&self.arena, node)
            } else {
                get_l(&self.arena, node)
            };
            node = child.expect("ancestors of a heap position exist");
        }
        node
    }

    fn sift_up(&mut self, mut node: u32) {
        while let Some(p) = get_p(&self.arena, node) {
            let cmp = (self.comparator)(&self.arena[node as usize].key, &self.arena[p as usize].key);
            if cmp >= 0 {
                break;
            }
            let (child, parent) = pair_mut(&mut self.arena, node, p);
            child.swap_payload(parent);
            node = p;
        }
    }

    fn sift_down(&mut self, mut node: u32) {
        while let Some(l) = get_l(&self.arena, node) {
            let mut smaller = l;
            if let Some(r) = get_r(&self.arena, node) {
                if (self.comparator)(&self.arena[r as usize].key, &self.arena[l as usize].key) < 0 {
                    smaller = r;
                }
            }
            let cmp =
                (self.comparator)(&self.arena[smaller as usize].key, &self.arena[node as usize].key);
            if cmp >= 0 {
                break;
            }
            let (parent, child) = pair_mut(&mut self.arena, node, smaller);
            parent.swap_payload(child);
            node = smaller;
        }
    }

    /// Checks heap order, completeness and parent links.
    pub fn assert_valid(&self) -> Result<(), String> {
        let Some(top) = self.top else {
            return if self.arena.is_empty() {
                Ok(())
            } else {
                Err("Nodes present without a root".to_string())
            };
        };
        if get_p(&self.arena, top).is_some() {
            return Err("Root has parent".to_string());
        }

        let mut queue = VecDeque::from([Some(top)]);
        let mut seen = 0usize;
        let mut gap = false;
        while let Some(slot) = queue.pop_front() {
            let Some(node) = slot else {
                gap = true;
                continue;
            };
            if gap {
                return Err("Tree is not complete".to_string());
            }
            seen += 1;
            for child_slot in [LEFT, RIGHT] {
                let child = if child_slot == LEFT {
                    get_l(&self.arena, node)
                } else {
                    get_r(&self.arena, node)
                };
                if let Some(child) = child {
                    if get_p(&self.arena, child) != Some(node) {
                        return Err("Broken parent link".to_string());
                    }
                    let cmp = (self.comparator)(
                        &self.arena[child as usize].key,
                        &self.arena[node as usize].key,
                    );
                    if cmp < 0 {
                        return Err("Heap order violated".to_string());
                    }
                }
                queue.push_back(child);
            }
        }

        if seen != self.arena.len() {
            return Err(format!(
                "Reached {seen} nodes but {} are stored",
                self.arena.len()
            ));
        }
        Ok(())
    }
}

/// Child slot under its parent for heap position `position`.
fn slot_of(position: usize) -> usize {
    if position & 1 == 0 {
        LEFT
    } else {
        RIGHT
    }
}
