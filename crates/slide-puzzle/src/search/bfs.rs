use std::collections::VecDeque;

use log::{debug, trace};

use crate::board::{State, Step};
use crate::error::PuzzleError;

use super::frontier::Frontier;
use super::visited::VisitedMap;
use super::{check_geometry, Phase, Search};

/// Plain breadth-first search; each [`advance`](Search::advance) expands one
/// whole level.
#[derive(Debug)]
pub struct BreadthFirstSearch {
    visited: VisitedMap,
    frontier: Frontier,
    goal: Vec<u8>,
    reached: Option<State>,
    depth: usize,
    phase: Phase,
}

impl Default for BreadthFirstSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl BreadthFirstSearch {
    pub fn new() -> Self {
        Self {
            visited: VisitedMap::new(),
            frontier: Frontier::default(),
            goal: Vec::new(),
            reached: None,
            depth: 0,
            phase: Phase::Idle,
        }
    }

    /// Levels fully expanded so far.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Search for BreadthFirstSearch {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn begin(&mut self, current: &State, idle: &State) -> Result<(), PuzzleError> {
        check_geometry(current, idle)?;
        self.reset();
        self.goal = idle.key().to_vec();
        self.visited.insert(current, None);

        if current == idle {
            self.reached = Some(current.clone());
            self.phase = Phase::Found;
        } else {
            self.frontier.seed(current.clone());
            self.phase = Phase::Expanding;
        }
        debug!("bfs: begin, phase {:?}", self.phase);
        Ok(())
    }

    fn advance(&mut self) -> Phase {
        if self.phase != Phase::Expanding {
            return self.phase;
        }

        let level = self.frontier.take_level();
        for state in &level {
            for (step, next) in state.successors() {
                if !self.visited.insert(&next, Some(step)) {
                    continue;
                }
                if next.key() == self.goal.as_slice() {
                    self.reached = Some(next);
                    self.phase = Phase::Found;
                    debug!("bfs: goal at depth {}", self.depth + 1);
                    return self.phase;
                }
                self.frontier.push(next);
            }
        }

        self.depth += 1;
        if !self.frontier.promote(level) {
            self.phase = Phase::Exhausted;
            debug!("bfs: exhausted after {} states", self.visited.len());
        } else {
            trace!("bfs: depth {} frontier {}", self.depth, self.frontier.width());
        }
        self.phase
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn visited(&self) -> usize {
        self.visited.len()
    }

    fn write_path(&self, steps: &mut VecDeque<Step>) {
        if let (Phase::Found, Some(goal)) = (self.phase, &self.reached) {
            steps.extend(self.visited.backtrack(goal));
        }
    }

    fn reset(&mut self) {
        self.visited.clear();
        self.frontier.clear();
        self.goal.clear();
        self.reached = None;
        self.depth = 0;
        self.phase = Phase::Idle;
    }
}
