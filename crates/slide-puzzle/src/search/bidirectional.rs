use std::collections::VecDeque;

use log::{debug, trace};

use crate::board::{State, Step};
use crate::error::PuzzleError;

use super::frontier::Frontier;
use super::visited::VisitedMap;
use super::{check_geometry, Phase, Search};

#[derive(Debug, Default)]
struct Side {
    visited: VisitedMap,
    frontier: Frontier,
}

impl Side {
    fn clear(&mut self) {
        self.visited.clear();
        self.frontier.clear();
    }

    fn seed(&mut self, root: &State) {
        self.visited.insert(root, None);
        self.frontier.seed(root.clone());
    }
}

/// Breadth-first search from both ends at once.
///
/// Each [`advance`](Search::advance) expands one level of one side, the
/// forward side (from `current`) and the backward side (from `idle`) taking
/// turns. The run ends as soon as a newly generated state is already known
/// to the other side.
#[derive(Debug)]
pub struct BidirectionalBreadthFirstSearch {
    forward: Side,
    backward: Side,
    forward_turn: bool,
    meeting: Option<State>,
    phase: Phase,
}

impl Default for BidirectionalBreadthFirstSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl BidirectionalBreadthFirstSearch {
    pub fn new() -> Self {
        Self {
            forward: Side::default(),
            backward: Side::default(),
            forward_turn: true,
            meeting: None,
            phase: Phase::Idle,
        }
    }

    /// The state where the two searches met.
    pub fn meeting(&self) -> Option<&State> {
        self.meeting.as_ref()
    }

    fn expand(&mut self) -> Phase {
        let (own, other) = if self.forward_turn {
            (&mut self.forward, &self.backward)
        } else {
            (&mut self.backward, &self.forward)
        };

        let level = own.frontier.take_level();
        for state in &level {
            for (step, next) in state.successors() {
                if !own.visited.insert(&next, Some(step)) {
                    continue;
                }
                if other.visited.contains(next.key()) {
                    self.meeting = Some(next);
                    self.phase = Phase::Found;
                    return self.phase;
                }
                own.frontier.push(next);
            }
        }

        if !own.frontier.promote(level) {
            // one side closed off its component without touching the other
            self.phase = Phase::Exhausted;
        } else {
            trace!(
                "bidirectional: {} frontier {}",
                if self.forward_turn { "forward" } else { "backward" },
                own.frontier.width()
            );
        }
        self.phase
    }
}

impl Search for BidirectionalBreadthFirstSearch {
    fn name(&self) -> &'static str {
        "bidirectional"
    }

    fn begin(&mut self, current: &State, idle: &State) -> Result<(), PuzzleError> {
        check_geometry(current, idle)?;
        self.reset();
        self.forward.seed(current);
        self.backward.seed(idle);

        if current == idle {
            self.meeting = Some(current.clone());
            self.phase = Phase::Found;
        } else {
            self.phase = Phase::Expanding;
        }
        debug!("bidirectional: begin, phase {:?}", self.phase);
        Ok(())
    }

    fn advance(&mut self) -> Phase {
        if self.phase != Phase::Expanding {
            return self.phase;
        }
        let phase = self.expand();
        self.forward_turn = !self.forward_turn;
        if phase.is_done() {
            debug!("bidirectional: {:?} after {} states", phase, self.visited());
        }
        phase
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    /// Both maps together; the meeting state, known to both, counts once.
    fn visited(&self) -> usize {
        let total = self.forward.visited.len() + self.backward.visited.len();
        match self.phase {
            Phase::Found => total - 1,
            _ => total,
        }
    }

    fn write_path(&self, steps: &mut VecDeque<Step>) {
        let (Phase::Found, Some(meeting)) = (self.phase, &self.meeting) else {
            return;
        };
        steps.extend(self.forward.visited.backtrack(meeting));
        steps.extend(
            self.backward
                .visited
                .backtrack(meeting)
                .into_iter()
                .rev()
                .map(Step::reversed),
        );
    }

    fn reset(&mut self) {
        self.forward.clear();
        self.backward.clear();
        self.forward_turn = true;
        self.meeting = None;
        self.phase = Phase::Idle;
    }
}
