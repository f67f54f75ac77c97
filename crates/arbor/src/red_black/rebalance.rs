use super::tree::RedBlackTree;
use super::types::FixupEvent;

/// Fixup work left over after an insertion or removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pending {
    /// Red node sitting under a red parent.
    Insert(u32),
    /// Double-black position, plus the spliced node to free once balanced.
    Remove { node: u32, victim: u32 },
}

/// Runs the rebalancing of one `add` or `remove` a step at a time.
///
/// Each call to `next` performs one fixup step and yields what it did. The
/// tree is only guaranteed to satisfy the red-black rules once the iterator
/// is exhausted; dropping the driver early runs the remaining steps.
pub struct Rebalance<'a, K, C>
where
    C: Fn(&K, &K) -> i32,
{
    tree: &'a mut RedBlackTree<K, C>,
    pending: Option<Pending>,
}

impl<'a, K, C> Rebalance<'a, K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub(crate) fn new(tree: &'a mut RedBlackTree<K, C>, pending: Option<Pending>) -> Self {
        Self { tree, pending }
    }

    /// The tree in its current, possibly unbalanced, state.
    pub fn tree(&self) -> &RedBlackTree<K, C> {
        self.tree
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_none()
    }

    /// Runs all remaining steps and returns how many there were.
    pub fn finish(mut self) -> usize {
        self.by_ref().count()
    }
}

impl<K, C> Iterator for Rebalance<'_, K, C>
where
    C: Fn(&K, &K) -> i32,
{
    type Item = FixupEvent;

    fn next(&mut self) -> Option<FixupEvent> {
        match self.pending.take()? {
            Pending::Insert(node) => {
                let progress = self.tree.insert_fixup_step(node);
                self.pending = progress.next.map(Pending::Insert);
                Some(progress.event)
            }
            Pending::Remove { node, victim } => {
                let progress = self.tree.remove_fixup_step(node);
                match progress.next {
                    Some(node) => self.pending = Some(Pending::Remove { node, victim }),
                    None => {
                        self.tree.discard(victim);
                    }
                }
                Some(progress.event)
            }
        }
    }
}

impl<K, C> Drop for Rebalance<'_, K, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
