//! Solvers over the implicit graph of board states.
//!
//! Every solver is a [`Search`]: a small state machine that is started with
//! [`Search::begin`], driven one expansion at a time with
//! [`Search::advance`], and read back with [`Search::write_path`] once it has
//! [`Phase::Found`] the goal. [`Search::get_steps`] runs the whole thing.

pub mod astar;
pub mod bfs;
pub mod bidirectional;
pub(crate) mod frontier;
pub mod visited;

use std::collections::VecDeque;

use clap::ValueEnum;
use log::debug;
use serde::Serialize;

use crate::board::{State, Step};
use crate::error::PuzzleError;

pub use astar::AStarSearch;
pub use bfs::BreadthFirstSearch;
pub use bidirectional::BidirectionalBreadthFirstSearch;
pub use visited::VisitedMap;

/// Where a solver is in its run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// Not started, or reset.
    Idle,
    /// Frontier still has work.
    Expanding,
    /// Goal reached; the path can be read.
    Found,
    /// Frontier ran dry without reaching the goal.
    Exhausted,
}

impl Phase {
    pub fn is_done(self) -> bool {
        matches!(self, Phase::Found | Phase::Exhausted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub found: bool,
    /// Distinct states recorded during the run.
    pub visited: usize,
}

pub trait Search {
    fn name(&self) -> &'static str;

    /// Prepares a run from `current` towards `idle`. Equal boards go straight
    /// to [`Phase::Found`] with an empty path.
    fn begin(&mut self, current: &State, idle: &State) -> Result<(), PuzzleError>;

    /// Performs one expansion step and returns the phase afterwards. Does
    /// nothing once the run is done.
    fn advance(&mut self) -> Phase;

    fn phase(&self) -> Phase;

    fn visited(&self) -> usize;

    /// Appends the solution to `steps`. Only meaningful in [`Phase::Found`].
    fn write_path(&self, steps: &mut VecDeque<Step>);

    /// Drops all run state and returns to [`Phase::Idle`].
    fn reset(&mut self);

    /// Solves `current → idle`, replacing the contents of `steps` with the
    /// slides to play.
    fn get_steps(
        &mut self,
        steps: &mut VecDeque<Step>,
        current: &State,
        idle: &State,
    ) -> Result<SearchOutcome, PuzzleError> {
        steps.clear();
        self.begin(current, idle)?;
        while !self.advance().is_done() {}

        let found = self.phase() == Phase::Found;
        if found {
            self.write_path(steps);
        }
        let outcome = SearchOutcome {
            found,
            visited: self.visited(),
        };
        debug!(
            "{}: found={} visited={} steps={}",
            self.name(),
            outcome.found,
            outcome.visited,
            steps.len()
        );
        Ok(outcome)
    }
}

/// Fails when the two boards do not share a shape.
pub(crate) fn check_geometry(current: &State, idle: &State) -> Result<(), PuzzleError> {
    let (a, b) = (current.geometry(), idle.geometry());
    if a != b {
        return Err(PuzzleError::GeometryMismatch {
            current_rows: a.rows(),
            current_columns: a.columns(),
            idle_rows: b.rows(),
            idle_columns: b.columns(),
        });
    }
    Ok(())
}

/// Solver selection, as offered on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
pub enum Algorithm {
    #[value(name = "bfs")]
    BreadthFirst,
    #[value(name = "bidirectional")]
    Bidirectional,
    #[value(name = "astar")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::BreadthFirst,
        Algorithm::Bidirectional,
        Algorithm::AStar,
    ];

    /// A fresh solver; `weight` only affects A*.
    pub fn build(self, weight: u32) -> Box<dyn Search> {
        match self {
            Algorithm::BreadthFirst => Box::new(BreadthFirstSearch::new()),
            Algorithm::Bidirectional => Box::new(BidirectionalBreadthFirstSearch::new()),
            Algorithm::AStar => Box::new(AStarSearch::with_weight(weight)),
        }
    }
}
