use std::collections::VecDeque;

use arbor::PriorityQueue;
use log::{debug, trace};

use crate::board::{Geometry, State, Step};
use crate::error::PuzzleError;

use super::visited::VisitedMap;
use super::{check_geometry, Phase, Search};

/// Heuristic multiplier used by [`AStarSearch::new`].
pub const DEFAULT_WEIGHT: u32 = 10;

/// Queue priority: lowest `f` first, then the shallower entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Priority {
    pub f: u32,
    pub g: u32,
}

/// Best-first search ordered by `h * weight + g`, with `h` the Manhattan
/// distance of every tile to its cell on the goal board.
///
/// A weight above one trades optimality for speed. States are never
/// re-opened: the first path that reaches a state is the one kept.
pub struct AStarSearch {
    weight: u32,
    visited: VisitedMap,
    open: PriorityQueue<Priority, State>,
    targets: Vec<usize>,
    goal: Option<State>,
    reached: Option<State>,
    phase: Phase,
}

impl Default for AStarSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl AStarSearch {
    pub fn new() -> Self {
        Self::with_weight(DEFAULT_WEIGHT)
    }

    pub fn with_weight(weight: u32) -> Self {
        Self {
            weight,
            visited: VisitedMap::new(),
            open: PriorityQueue::new(),
            targets: Vec::new(),
            goal: None,
            reached: None,
            phase: Phase::Idle,
        }
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Entries still waiting in the open queue.
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    fn heuristic(&self, state: &State) -> u32 {
        manhattan(state.geometry(), state, &self.targets)
    }

    fn push(&mut self, state: State, g: u32) {
        let f = self
            .heuristic(&state)
            .saturating_mul(self.weight)
            .saturating_add(g);
        self.open.enqueue(Priority { f, g }, state);
    }
}

/// Sum over non-empty tiles of the distance from their cell to
/// `targets[tile]`.
pub fn manhattan(geometry: Geometry, state: &State, targets: &[usize]) -> u32 {
    let marker = state.empty_tile();
    state
        .tiles()
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != marker)
        .map(|(cell, &tile)| geometry.distance(cell, targets[tile as usize]) as u32)
        .sum()
}

/// Cell of each tile value on `goal`.
pub fn goal_cells(goal: &State) -> Vec<usize> {
    let mut targets = vec![0; goal.tiles().len()];
    for (cell, &tile) in goal.tiles().iter().enumerate() {
        targets[tile as usize] = cell;
    }
    targets
}

impl Search for AStarSearch {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn begin(&mut self, current: &State, idle: &State) -> Result<(), PuzzleError> {
        check_geometry(current, idle)?;
        self.reset();
        self.targets = goal_cells(idle);
        self.goal = Some(idle.clone());
        self.visited.insert(current, None);

        if current == idle {
            self.reached = Some(current.clone());
            self.phase = Phase::Found;
        } else {
            self.push(current.clone(), 0);
            self.phase = Phase::Expanding;
        }
        debug!("astar: begin with weight {}, phase {:?}", self.weight, self.phase);
        Ok(())
    }

    fn advance(&mut self) -> Phase {
        if self.phase != Phase::Expanding {
            return self.phase;
        }

        let Some((priority, state)) = self.open.dequeue() else {
            self.phase = Phase::Exhausted;
            debug!("astar: exhausted after {} states", self.visited.len());
            return self.phase;
        };
        trace!("astar: expand f={} g={}", priority.f, priority.g);

        for (step, next) in state.successors() {
            if !self.visited.insert(&next, Some(step)) {
                continue;
            }
            if self.goal.as_ref() == Some(&next) {
                debug!("astar: goal at depth {}", priority.g + 1);
                self.reached = Some(next);
                self.phase = Phase::Found;
                return self.phase;
            }
            self.push(next, priority.g + 1);
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
        self.open.clear();
        self.targets.clear();
        self.goal = None;
        self.reached = None;
        self.phase = Phase::Idle;
    }
}
