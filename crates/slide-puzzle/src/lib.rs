//! Sliding-tile puzzles of any `rows × columns` shape and three solvers for
//! them.
//!
//! ```
//! use std::collections::VecDeque;
//! use slide_puzzle::{BreadthFirstSearch, Geometry, Search, State};
//!
//! let geometry = Geometry::new(3, 3).unwrap();
//! let goal = geometry.solved();
//! let mut board = State::parse(geometry, "012345687").unwrap();
//!
//! let mut steps = VecDeque::new();
//! let outcome = BreadthFirstSearch::new()
//!     .get_steps(&mut steps, &board, &goal)
//!     .unwrap();
//! assert!(outcome.found);
//! board.replay(&steps).unwrap();
//! assert_eq!(board, goal);
//! ```

pub mod board;
pub mod error;
pub mod scramble;
pub mod search;

pub use board::{Geometry, State, Step, MAX_CELLS};
pub use error::{BoardError, PuzzleError};
pub use scramble::Scrambler;
pub use search::{
    AStarSearch, Algorithm, BidirectionalBreadthFirstSearch, BreadthFirstSearch, Phase, Search,
    SearchOutcome, VisitedMap,
};
