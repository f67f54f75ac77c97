use std::collections::BTreeSet;

use arbor::{Color, FixupEvent, RedBlackTree, TreeError};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

fn tree_of(keys: &[i32]) -> RedBlackTree<i32> {
    let mut tree = RedBlackTree::new();
    for &key in keys {
        assert!(tree.add(key));
    }
    tree.assert_valid().unwrap();
    tree
}

fn keys(tree: &RedBlackTree<i32>) -> Vec<i32> {
    tree.iter().copied().collect()
}

#[test]
fn red_black_ascending_insert_matrix() {
    let mut tree = RedBlackTree::new();
    for key in 0..64 {
        tree.add(key);
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 64);
    assert_eq!(keys(&tree), (0..64).collect::<Vec<_>>());
    // red-black height bound: at most 2 * log2(n + 1)
    assert!(tree.height() <= 12, "height {}", tree.height());
    assert_eq!(tree.first(), Some(&0));
    assert_eq!(tree.last(), Some(&63));
}

#[test]
fn red_black_duplicate_add_is_noop_matrix() {
    let mut tree = tree_of(&[5, 3, 8]);
    let before = tree.print();
    assert!(!tree.add(3));
    assert_eq!(tree.print(), before);
    assert_eq!(tree.len(), 3);

    // the driver borrows the tree, so end the statement before reading it
    match tree.add_stepwise(8) {
        Err((err, key)) => {
            assert_eq!(err, TreeError::DuplicateKey);
            assert_eq!(key, 8);
        }
        Ok(_) => panic!("duplicate accepted"),
    };
    assert_eq!(tree.len(), 3);
}

#[test]
fn red_black_missing_remove_is_noop_matrix() {
    let mut tree = tree_of(&[5, 3, 8]);
    assert!(!tree.remove(&4));
    assert_eq!(keys(&tree), vec![3, 5, 8]);
    assert_eq!(tree.remove_stepwise(&42).err(), Some(TreeError::KeyNotFound));

    let mut empty = RedBlackTree::<i32>::new();
    assert!(!empty.remove(&1));
    assert!(empty.is_empty());
}

#[test]
fn red_black_remove_to_empty_matrix() {
    let mut tree = tree_of(&[2, 1, 3]);
    for key in [2, 1, 3] {
        assert!(tree.remove(&key));
        tree.assert_valid().unwrap();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert!(tree.add(9));
    assert_eq!(tree.node(tree.root().unwrap()).color, Color::Black);
}

#[test]
fn red_black_add_then_remove_restores_sequence_matrix() {
    let base = [50, 20, 80, 10, 30, 70, 90, 25];
    let mut tree = tree_of(&base);
    let before = keys(&tree);
    for extra in [27, 5, 95, 60] {
        tree.add(extra);
        tree.assert_valid().unwrap();
        tree.remove(&extra);
        tree.assert_valid().unwrap();
        assert_eq!(keys(&tree), before);
    }
}

#[test]
fn red_black_random_ops_against_model_matrix() {
    for seed in [1_u64, 7, 42, 2024] {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut tree = RedBlackTree::new();
        let mut model = BTreeSet::new();

        for _ in 0..600 {
            let key: i32 = rng.gen_range(0..120);
            if rng.gen_bool(0.6) {
                assert_eq!(tree.add(key), model.insert(key), "seed {seed} add {key}");
            } else {
                assert_eq!(tree.remove(&key), model.remove(&key), "seed {seed} remove {key}");
            }
            if let Err(err) = tree.assert_valid() {
                panic!("seed {seed} after key {key}: {err}\n{}", tree.print());
            }
            assert_eq!(tree.len(), model.len());
        }
        assert_eq!(keys(&tree), model.iter().copied().collect::<Vec<_>>());
    }
}

#[test]
fn red_black_custom_comparator_matrix() {
    let mut tree = RedBlackTree::with_comparator(|a: &String, b: &String| {
        a.len() as i32 - b.len() as i32
    });
    assert!(tree.add("ccc".to_string()));
    assert!(tree.add("a".to_string()));
    assert!(tree.add("bb".to_string()));
    // same length compares equal
    assert!(!tree.add("zz".to_string()));
    let ordered: Vec<&str> = tree.iter().map(String::as_str).collect();
    assert_eq!(ordered, vec!["a", "bb", "ccc"]);
    tree.assert_valid().unwrap();
}

#[test]
fn red_black_replacement_deeper_candidate_matrix() {
    // 40B(20R(10B, 30B), 60B): both candidates black with no red child,
    // the predecessor 30 sits one level deeper than the successor 60.
    let mut tree = tree_of(&[40, 20, 60, 10, 30, 50, 70, 5, 15, 25, 35]);
    for key in [5, 15, 25, 35, 50, 70] {
        tree.remove(&key);
    }
    tree.assert_valid().unwrap();
    let root = tree.root().unwrap();
    let victim = tree.choose_replacement(root);
    assert_eq!(tree.node(root).key, 30);
    assert_eq!(tree.node(victim).key, 40);
}

#[test]
fn red_black_replacement_red_successor_matrix() {
    let mut tree = tree_of(&[40, 20, 60, 10, 30, 50, 70, 5, 15, 25, 35]);
    for key in [5, 15, 25, 35] {
        tree.remove(&key);
    }
    // predecessor 30 is black, successor 50 is red
    let root = tree.root().unwrap();
    let victim = tree.choose_replacement(root);
    assert_eq!(tree.node(root).key, 50);
    assert_eq!(tree.node(victim).key, 40);
    assert!(tree.node(victim).is_red());
}

#[test]
fn red_black_replacement_tie_matrix() {
    let mut tree = tree_of(&[20, 10, 30, 5]);
    tree.remove(&5);
    // 20B(10B, 30B): equal depth goes to the predecessor
    let root = tree.root().unwrap();
    tree.choose_replacement(root);
    assert_eq!(tree.node(root).key, 10);
}

#[test]
fn red_black_stepwise_insert_events_matrix() {
    let mut tree = tree_of(&[30, 10]);
    let mut run = tree.add_stepwise(20).unwrap();
    assert!(!run.is_finished());
    // the new red node still sits under a red parent
    assert!(run.tree().assert_valid().is_err());
    let event = run.next().unwrap();
    assert!(matches!(event, FixupEvent::Rotated { .. }));
    assert!(run.is_finished());
    assert_eq!(run.next(), None);
    drop(run);
    tree.assert_valid().unwrap();
    assert_eq!(tree.node(tree.root().unwrap()).key, 20);
}

#[test]
fn red_black_stepwise_recolor_cascade_matrix() {
    let mut tree = tree_of(&(1..=11).collect::<Vec<_>>());
    let mut run = tree.add_stepwise(12).unwrap();
    let events: Vec<FixupEvent> = run.by_ref().collect();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], FixupEvent::Recolored { .. }));
    assert!(matches!(events[1], FixupEvent::Rotated { .. }));
    assert!(run.is_finished());
    drop(run);
    tree.assert_valid().unwrap();
    assert_eq!(tree.node(tree.root().unwrap()).key, 4);
}

#[test]
fn red_black_stepwise_without_fixup_matrix() {
    let mut tree = tree_of(&[10]);
    let run = tree.add_stepwise(5).unwrap();
    assert!(run.is_finished());
    assert_eq!(run.finish(), 0);
    tree.assert_valid().unwrap();
}

#[test]
fn red_black_stepwise_remove_matrix() {
    let mut tree = tree_of(&[20, 10, 30, 40]);
    let mut run = tree.remove_stepwise(&10).unwrap();
    // the spliced black leaf stays in place until the fixup ends
    assert_eq!(run.tree().len(), 4);
    let event = run.next().unwrap();
    assert!(matches!(event, FixupEvent::Restructured { .. }));
    assert_eq!(run.next(), None);
    assert_eq!(run.tree().len(), 3);
    drop(run);
    assert_eq!(keys(&tree), vec![20, 30, 40]);
    tree.assert_valid().unwrap();
}

#[test]
fn red_black_dropped_driver_completes_matrix() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(99);
    let mut tree = RedBlackTree::new();
    for _ in 0..200 {
        let key: i32 = rng.gen_range(0..60);
        if tree.contains(&key) {
            let _ = tree.remove_stepwise(&key).unwrap();
        } else {
            let _ = tree.add_stepwise(key).unwrap();
        }
        tree.assert_valid().unwrap();
    }
}

#[test]
fn red_black_clear_matrix() {
    let mut tree = tree_of(&[1, 2, 3]);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.first(), None);
    tree.assert_valid().unwrap();
}
