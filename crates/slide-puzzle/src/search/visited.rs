use std::collections::HashMap;

use crate::board::{State, Step};

/// States reached so far, each with the slide that first produced it.
/// Roots map to `None`.
#[derive(Debug, Default)]
pub struct VisitedMap {
    entries: HashMap<Vec<u8>, Option<Step>>,
}

impl VisitedMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    /// Records `state` as reached through `step`. First sighting wins;
    /// returns `false` if the state was already known.
    pub fn insert(&mut self, state: &State, step: Option<Step>) -> bool {
        if self.entries.contains_key(state.key()) {
            return false;
        }
        self.entries.insert(state.key().to_vec(), step);
        true
    }

    /// Slides from the root of this map to `target`, in playing order.
    ///
    /// Walks back from `target` by undoing each recorded step on a scratch
    /// copy of the tiles until a root is reached.
    pub fn backtrack(&self, target: &State) -> Vec<Step> {
        let mut scratch = target.key().to_vec();
        let mut steps = Vec::new();
        while let Some(&Some(step)) = self.entries.get(&scratch) {
            steps.push(step);
            scratch.swap(step.from, step.to);
        }
        steps.reverse();
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Geometry;

    #[test]
    fn backtrack_replays_forward() {
        let g = Geometry::new(2, 2).unwrap();
        let root = g.solved();
        let mut map = VisitedMap::new();
        assert!(map.insert(&root, None));

        let first = Step::new(3, 1);
        let a = root.slide(first);
        assert!(map.insert(&a, Some(first)));
        let second = Step::new(1, 0);
        let b = a.slide(second);
        assert!(map.insert(&b, Some(second)));
        assert!(!map.insert(&b, Some(second.reversed())));

        assert_eq!(map.backtrack(&b), vec![first, second]);
        assert!(map.backtrack(&root).is_empty());
        assert_eq!(map.len(), 3);
    }
}
