use std::collections::VecDeque;

use proptest::prelude::*;
use slide_puzzle::{BoardError, BreadthFirstSearch, Geometry, Scrambler, Search, State, Step};

#[test]
fn board_pair_and_index_matrix() {
    let g = Geometry::new(3, 4).unwrap();
    for index in 0..g.cells() {
        let (row, column) = g.pair(index);
        assert!(row < 3 && column < 4);
        assert_eq!(g.index(row, column), index);
    }
    assert_eq!(g.pair(7), (1, 3));
    assert_eq!(g.neighbors(7).collect::<Vec<_>>(), vec![3, 11, 6]);
}

#[test]
fn board_successors_matrix() {
    let s = Geometry::new(3, 3).unwrap().solved();
    let next: Vec<(Step, String)> = s
        .successors()
        .map(|(step, state)| {
            let key: String = state.key().iter().map(|t| t.to_string()).collect();
            (step, key)
        })
        .collect();
    assert_eq!(
        next,
        vec![
            (Step::new(8, 5), "012348675".to_string()),
            (Step::new(8, 7), "012345687".to_string()),
        ]
    );
}

#[test]
fn board_replay_rejects_illegal_path_matrix() {
    let g = Geometry::new(2, 2).unwrap();
    let mut s = g.solved();
    let path = [Step::new(3, 2), Step::new(2, 3), Step::new(2, 0)];
    assert_eq!(
        s.replay(&path),
        Err(BoardError::IllegalStep { from: 2, to: 0 })
    );
    // the legal prefix stays applied
    assert_eq!(s, g.solved());
}

#[test]
fn board_parse_large_matrix() {
    let g = Geometry::new(4, 4).unwrap();
    let text = "0 1 2 3 4 5 6 7 8 9 10 11 12 13 15 14";
    let s = State::parse(g, text).unwrap();
    assert_eq!(s.empty_index(), 14);
    assert!(s.is_solvable_towards(&g.solved()));
    assert_eq!(State::parse(g, "0abcdef123456789").unwrap().tiles()[1], 10);
}

fn reachable_by_bfs(start: &State, goal: &State) -> bool {
    let mut steps = VecDeque::new();
    BreadthFirstSearch::new()
        .get_steps(&mut steps, start, goal)
        .unwrap()
        .found
}

proptest! {
    #[test]
    fn board_parity_agrees_with_bfs(seed in any::<u64>()) {
        let g = Geometry::new(2, 3).unwrap();
        let goal = g.solved();
        let start = Scrambler::from_u64(seed).shuffle(g);
        prop_assert_eq!(start.is_solvable_towards(&goal), reachable_by_bfs(&start, &goal));
    }

    #[test]
    fn board_walk_is_solvable(seed in any::<u64>(), moves in 0usize..60) {
        let g = Geometry::new(4, 4).unwrap();
        let board = Scrambler::from_u64(seed).random_walk(g, moves);
        prop_assert!(board.is_solvable_towards(&g.solved()));
    }

    #[test]
    fn board_walk_path_replays(seed in any::<u64>(), moves in 0usize..12) {
        let g = Geometry::new(3, 3).unwrap();
        let goal = g.solved();
        let start = Scrambler::from_u64(seed).random_walk(g, moves);
        let mut steps = VecDeque::new();
        let outcome = BreadthFirstSearch::new().get_steps(&mut steps, &start, &goal).unwrap();
        prop_assert!(outcome.found);
        prop_assert!(steps.len() <= moves);
        let mut replay = start.clone();
        replay.replay(&steps).unwrap();
        prop_assert_eq!(replay, goal);
    }
}
