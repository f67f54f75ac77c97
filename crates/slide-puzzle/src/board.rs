//! Boards of the `rows × columns` sliding-tile family.
//!
//! A board is a permutation of `0..cells`; the highest value marks the empty
//! cell. Cells are addressed by flat row-major index.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Tile values are stored as `u8`, which caps boards at 256 cells.
pub const MAX_CELLS: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    rows: usize,
    columns: usize,
}

impl Geometry {
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        let cells = rows.checked_mul(columns).ok_or(BoardError::TooManyCells {
            cells: usize::MAX,
            max: MAX_CELLS,
        })?;
        if rows == 0 || columns == 0 || cells < 2 {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }
        if cells > MAX_CELLS {
            return Err(BoardError::TooManyCells {
                cells,
                max: MAX_CELLS,
            });
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }

    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// `(row, column)` of a flat index.
    pub fn pair(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    pub fn distance(&self, a: usize, b: usize) -> usize {
        let (ar, ac) = self.pair(a);
        let (br, bc) = self.pair(b);
        ar.abs_diff(br) + ac.abs_diff(bc)
    }

    /// Orthogonal neighbours of `index` in the order up, down, left, right.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> {
        let (row, column) = self.pair(index);
        let up = (row > 0).then(|| index - self.columns);
        let down = (row + 1 < self.rows).then(|| index + self.columns);
        let left = (column > 0).then(|| index - 1);
        let right = (column + 1 < self.columns).then(|| index + 1);
        [up, down, left, right].into_iter().flatten()
    }

    pub fn is_adjacent(&self, a: usize, b: usize) -> bool {
        a < self.cells() && b < self.cells() && self.distance(a, b) == 1
    }

    /// The ordered board with the empty cell last.
    pub fn solved(&self) -> State {
        let cells = self.cells();
        State {
            geometry: *self,
            tiles: (0..cells).map(|t| t as u8).collect(),
            empty: cells - 1,
        }
    }
}

/// One slide: the empty cell moves from `from` to `to`, trading places with
/// the tile that was there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub from: usize,
    pub to: usize,
}

impl Step {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// The slide that undoes this one.
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

/// A board position. The tile sequence is the identity of the state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State {
    geometry: Geometry,
    tiles: Vec<u8>,
    empty: usize,
}

impl State {
    pub fn new(geometry: Geometry, tiles: Vec<u8>) -> Result<Self, BoardError> {
        let cells = geometry.cells();
        if tiles.len() != cells {
            return Err(BoardError::WrongLength {
                expected: cells,
                actual: tiles.len(),
            });
        }
        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or(BoardError::NotAPermutation { cells })?;
            if *slot {
                return Err(BoardError::NotAPermutation { cells });
            }
            *slot = true;
        }
        let marker = (cells - 1) as u8;
        let empty = tiles
            .iter()
            .position(|&t| t == marker)
            .ok_or(BoardError::NotAPermutation { cells })?;
        Ok(Self {
            geometry,
            tiles,
            empty,
        })
    }

    /// Reads tiles from text.
    ///
    /// Tokens separated by commas or whitespace are decimal numbers
    /// (`"1, 0, 3, 2"`). Without separators every character is one base-36
    /// digit (`"012345678"`), which covers boards up to 36 cells.
    pub fn parse(geometry: Geometry, text: &str) -> Result<Self, BoardError> {
        let text = text.trim();
        let separated = text.contains(|c: char| c == ',' || c.is_whitespace());
        let tiles = if separated {
            text.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| {
                    token
                        .parse::<u8>()
                        .map_err(|_| BoardError::InvalidTile(token.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?
        } else {
            text.chars()
                .map(|c| {
                    c.to_digit(36)
                        .map(|d| d as u8)
                        .ok_or_else(|| BoardError::InvalidTile(c.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        Self::new(geometry, tiles)
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Identity key used by the visited maps.
    pub fn key(&self) -> &[u8] {
        &self.tiles
    }

    pub fn empty_index(&self) -> usize {
        self.empty
    }

    pub fn empty_pair(&self) -> (usize, usize) {
        self.geometry.pair(self.empty)
    }

    /// Value that marks the empty cell.
    pub fn empty_tile(&self) -> u8 {
        (self.tiles.len() - 1) as u8
    }

    /// Copy of this board with `step` applied. `step` is trusted.
    pub fn slide(&self, step: Step) -> State {
        let mut tiles = self.tiles.clone();
        tiles.swap(step.from, step.to);
        State {
            geometry: self.geometry,
            tiles,
            empty: step.to,
        }
    }

    /// Every board one slide away, in the order up, down, left, right.
    pub fn successors(&self) -> impl Iterator<Item = (Step, State)> + '_ {
        self.geometry.neighbors(self.empty).map(move |to| {
            let step = Step::new(self.empty, to);
            (step, self.slide(step))
        })
    }

    /// Applies `step` in place after checking it is a legal slide here.
    pub fn apply(&mut self, step: Step) -> Result<(), BoardError> {
        if step.from != self.empty || !self.geometry.is_adjacent(step.from, step.to) {
            return Err(BoardError::IllegalStep {
                from: step.from,
                to: step.to,
            });
        }
        self.tiles.swap(step.from, step.to);
        self.empty = step.to;
        Ok(())
    }

    pub fn replay<'a, I>(&mut self, steps: I) -> Result<(), BoardError>
    where
        I: IntoIterator<Item = &'a Step>,
    {
        for step in steps {
            self.apply(*step)?;
        }
        Ok(())
    }

    /// Whether `goal` is reachable from this board by slides.
    ///
    /// On boards with at least two rows and two columns this compares the
    /// parity of the tile permutation with the parity of the empty cell's
    /// travel distance. On a single line tiles can never pass each other, so
    /// their relative order must already match.
    pub fn is_solvable_towards(&self, goal: &State) -> bool {
        if self.geometry != goal.geometry {
            return false;
        }

        if self.geometry.rows == 1 || self.geometry.columns == 1 {
            let marker = self.empty_tile();
            let order = |s: &State| -> Vec<u8> {
                s.tiles.iter().copied().filter(|&t| t != marker).collect()
            };
            return order(self) == order(goal);
        }

        let cells = self.tiles.len();
        let mut target = vec![0usize; cells];
        for (i, &tile) in goal.tiles.iter().enumerate() {
            target[tile as usize] = i;
        }

        let mut seen = vec![false; cells];
        let mut transpositions = 0usize;
        for start in 0..cells {
            let mut i = start;
            let mut length = 0usize;
            while !seen[i] {
                seen[i] = true;
                i = target[self.tiles[i] as usize];
                length += 1;
            }
            transpositions += length.saturating_sub(1);
        }

        transpositions % 2 == self.geometry.distance(self.empty, goal.empty) % 2
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.empty_tile().to_string().len();
        for (row, line) in self.tiles.chunks(self.geometry.columns).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (column, &tile) in line.iter().enumerate() {
                if column > 0 {
                    write!(f, " ")?;
                }
                if tile == self.empty_tile() {
                    write!(f, "{:>width$}", "_")?;
                } else {
                    write!(f, "{tile:>width$}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Geometry {
        Geometry::new(3, 3).unwrap()
    }

    #[test]
    fn neighbors_come_up_down_left_right() {
        let g = three();
        assert_eq!(g.neighbors(4).collect::<Vec<_>>(), vec![1, 7, 3, 5]);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![3, 1]);
        assert_eq!(g.neighbors(8).collect::<Vec<_>>(), vec![5, 7]);
    }

    #[test]
    fn geometry_rejects_degenerate_shapes() {
        assert_eq!(
            Geometry::new(1, 1),
            Err(BoardError::InvalidDimensions {
                rows: 1,
                columns: 1
            })
        );
        assert!(matches!(
            Geometry::new(17, 16),
            Err(BoardError::TooManyCells { cells: 272, .. })
        ));
        assert!(Geometry::new(16, 16).is_ok());
        assert_eq!(
            Geometry::new(usize::MAX / 2 + 2, 2),
            Err(BoardError::TooManyCells {
                cells: usize::MAX,
                max: MAX_CELLS
            })
        );
    }

    #[test]
    fn parse_compact_and_separated() {
        let g = three();
        let compact = State::parse(g, "012345678").unwrap();
        let separated = State::parse(g, "0, 1, 2, 3 4 5,6,7,8").unwrap();
        assert_eq!(compact, separated);
        assert_eq!(compact, g.solved());
        assert_eq!(compact.empty_pair(), (2, 2));
    }

    #[test]
    fn parse_rejects_bad_boards() {
        let g = three();
        assert_eq!(
            State::parse(g, "01234567"),
            Err(BoardError::WrongLength {
                expected: 9,
                actual: 8
            })
        );
        assert_eq!(
            State::parse(g, "012345677"),
            Err(BoardError::NotAPermutation { cells: 9 })
        );
        assert_eq!(
            State::parse(g, "01234567?"),
            Err(BoardError::InvalidTile("?".to_string()))
        );
    }

    #[test]
    fn apply_checks_legality() {
        let mut s = three().solved();
        assert_eq!(
            s.apply(Step::new(7, 6)),
            Err(BoardError::IllegalStep { from: 7, to: 6 })
        );
        assert_eq!(
            s.apply(Step::new(8, 6)),
            Err(BoardError::IllegalStep { from: 8, to: 6 })
        );
        s.apply(Step::new(8, 5)).unwrap();
        assert_eq!(s.key(), &[0, 1, 2, 3, 4, 8, 6, 7, 5]);
        s.apply(Step::new(8, 5).reversed()).unwrap();
        assert_eq!(s, three().solved());
    }

    #[test]
    fn parity_matches_reachability() {
        let g = three();
        let goal = g.solved();
        let one_slide = State::parse(g, "012345687").unwrap();
        let swapped = State::parse(g, "102345678").unwrap();
        assert!(one_slide.is_solvable_towards(&goal));
        assert!(!swapped.is_solvable_towards(&goal));
        assert!(goal.is_solvable_towards(&goal));
    }

    #[test]
    fn single_line_keeps_tile_order() {
        let g = Geometry::new(1, 4).unwrap();
        let goal = g.solved();
        assert!(State::parse(g, "3012").unwrap().is_solvable_towards(&goal));
        assert!(!State::parse(g, "1032").unwrap().is_solvable_towards(&goal));
    }

    #[test]
    fn display_marks_empty_cell() {
        let s = State::parse(three(), "012345687").unwrap();
        assert_eq!(s.to_string(), "0 1 2\n3 4 5\n6 _ 7");
    }
}
