use rand::{rngs::OsRng, seq::SliceRandom, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::board::{Geometry, State, Step};

/// Seeded source of random boards.
///
/// Uses xoshiro256** so a recorded seed reproduces the same boards.
pub struct Scrambler {
    /// The seed the generator started from.
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Scrambler {
    /// Without a seed one is drawn from `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    /// Expands a short seed, as typed on a command line, into a full one.
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        Xoshiro256StarStar::seed_from_u64(seed).fill_bytes(&mut bytes);
        Self::new(Some(bytes))
    }

    /// Plays `moves` random slides from the solved board. The result is
    /// always solvable.
    pub fn random_walk(&mut self, geometry: Geometry, moves: usize) -> State {
        self.walk_from(&geometry.solved(), moves)
    }

    /// Plays `moves` random slides from `start`, never undoing the previous
    /// slide.
    pub fn walk_from(&mut self, start: &State, moves: usize) -> State {
        let geometry = start.geometry();
        let mut state = start.clone();
        let mut previous: Option<usize> = None;
        for _ in 0..moves {
            let empty = state.empty_index();
            let options: Vec<usize> = geometry
                .neighbors(empty)
                .filter(|&to| Some(to) != previous)
                .collect();
            let Some(&to) = options.choose(&mut self.rng) else {
                break;
            };
            state = state.slide(Step::new(empty, to));
            previous = Some(empty);
        }
        state
    }

    /// Uniformly random arrangement. Half of these cannot reach the solved
    /// board; check with [`State::is_solvable_towards`].
    pub fn shuffle(&mut self, geometry: Geometry) -> State {
        let mut tiles: Vec<u8> = (0..geometry.cells()).map(|t| t as u8).collect();
        tiles.shuffle(&mut self.rng);
        State::new(geometry, tiles).expect("shuffled tiles stay a permutation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_boards() {
        let g = Geometry::new(3, 3).unwrap();
        let mut a = Scrambler::from_u64(7);
        let mut b = Scrambler::from_u64(7);
        assert_eq!(a.seed, b.seed);
        assert_eq!(a.random_walk(g, 30), b.random_walk(g, 30));
        assert_eq!(a.shuffle(g), b.shuffle(g));
    }

    #[test]
    fn random_walk_stays_solvable() {
        let g = Geometry::new(3, 4).unwrap();
        let goal = g.solved();
        let mut scrambler = Scrambler::new(Some([3; 32]));
        for moves in [0, 1, 5, 40] {
            let board = scrambler.random_walk(g, moves);
            assert!(board.is_solvable_towards(&goal));
        }
        assert_eq!(scrambler.random_walk(g, 0), goal);
    }

    #[test]
    fn random_walk_never_backtracks_immediately() {
        let g = Geometry::new(2, 2).unwrap();
        // on 2x2 the only non-undoing move keeps circling, so 4 moves return home
        let mut scrambler = Scrambler::from_u64(1);
        let board = scrambler.random_walk(g, 12);
        assert_eq!(board.empty_index(), 3);
    }
}
