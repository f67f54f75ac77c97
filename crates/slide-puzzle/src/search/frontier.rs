use crate::board::State;

/// Level-by-level frontier: the level being expanded and the one being
/// generated. The two buffers trade places after every level.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    current: Vec<State>,
    next: Vec<State>,
}

impl Frontier {
    pub(crate) fn seed(&mut self, state: State) {
        self.clear();
        self.current.push(state);
    }

    pub(crate) fn clear(&mut self) {
        self.current.clear();
        self.next.clear();
    }

    /// Hands out the level to expand.
    pub(crate) fn take_level(&mut self) -> Vec<State> {
        std::mem::take(&mut self.current)
    }

    pub(crate) fn push(&mut self, state: State) {
        self.next.push(state);
    }

    /// Makes the generated level current, reusing `spent` for the next one.
    /// Returns `false` when the new level is empty.
    pub(crate) fn promote(&mut self, mut spent: Vec<State>) -> bool {
        spent.clear();
        self.current = std::mem::replace(&mut self.next, spent);
        !self.current.is_empty()
    }

    pub(crate) fn width(&self) -> usize {
        self.current.len()
    }
}
