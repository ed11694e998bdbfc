//! Property-based tests for the scoring engine.
//!
//! All properties are pure: boards are built directly and scored with a
//! small fixed dictionary. Increase cases locally with PROPTEST_CASES.

mod common;

use std::env;
use std::sync::Arc;

use backend::domain::{Board, Position};
use backend::services::{DictionaryService, ScoringService};
use backend::storage::MemStorage;
use proptest::prelude::*;

fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(64);

    ProptestConfig {
        cases,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

fn scoring_with_dictionary(words: &[&str]) -> ScoringService {
    let dictionary = DictionaryService::new(Arc::new(MemStorage::new()));
    dictionary.load_words(&words.iter().map(|w| w.to_string()).collect::<Vec<_>>());
    ScoringService::new(Arc::new(dictionary))
}

/// A board of the given size with every cell drawn from a small alphabet,
/// `None` included, so words and gaps both occur.
fn arb_board(size: usize) -> impl Strategy<Value = Board> {
    let cell = proptest::option::weighted(0.8, prop::sample::select(vec!['A', 'C', 'T', 'O']));
    proptest::collection::vec(cell, size * size).prop_map(move |cells| {
        let mut board = Board::new("GAME1".into(), "alice".into(), size);
        for (i, cell) in cells.into_iter().enumerate() {
            if let Some(letter) = cell {
                board.set(Position::new(i / size, i % size), letter);
            }
        }
        board
    })
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn scoring_is_deterministic(board in arb_board(4)) {
        let scoring = scoring_with_dictionary(&["cat", "at", "to", "oat", "taco"]);
        let first = scoring.score_board(&board);
        let second = scoring.score_board(&board);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn total_is_the_sum_of_word_scores(board in arb_board(4)) {
        let scoring = scoring_with_dictionary(&["cat", "at", "to", "oat", "taco"]);
        let score = scoring.score_board(&board);
        let sum: u32 = score.words.iter().map(|w| w.score).sum();
        prop_assert_eq!(score.total, sum);
    }

    #[test]
    fn selected_words_never_overlap_within_a_line(board in arb_board(4)) {
        let scoring = scoring_with_dictionary(&["cat", "at", "to", "oat", "taco"]);
        let score = scoring.score_board(&board);

        for line in 0..board.size {
            let mut row_used = vec![false; board.size];
            let mut col_used = vec![false; board.size];
            for word in &score.words {
                if word.horizontal && word.start.row == line {
                    for offset in 0..word.length {
                        prop_assert!(!row_used[word.start.col + offset]);
                        row_used[word.start.col + offset] = true;
                    }
                }
                if !word.horizontal && word.start.col == line {
                    for offset in 0..word.length {
                        prop_assert!(!col_used[word.start.row + offset]);
                        col_used[word.start.row + offset] = true;
                    }
                }
            }
        }
    }

    #[test]
    fn every_scored_word_is_on_the_board(board in arb_board(4)) {
        let scoring = scoring_with_dictionary(&["cat", "at", "to", "oat", "taco"]);
        let score = scoring.score_board(&board);

        for word in &score.words {
            prop_assert!(word.length >= 2);
            prop_assert_eq!(word.word.chars().count(), word.length);
            for (offset, expected) in word.word.chars().enumerate() {
                let pos = if word.horizontal {
                    Position::new(word.start.row, word.start.col + offset)
                } else {
                    Position::new(word.start.row + offset, word.start.col)
                };
                prop_assert_eq!(board.get(pos), Some(expected));
            }
        }
    }

    #[test]
    fn empty_count_tracks_placements(
        positions in proptest::collection::hash_set((0usize..4, 0usize..4), 0..=16)
    ) {
        let mut board = Board::new("GAME1".into(), "alice".into(), 4);
        for (row, col) in &positions {
            board.set(Position::new(*row, *col), 'A');
        }
        prop_assert_eq!(board.empty_count(), 16 - positions.len());
        prop_assert_eq!(board.is_full(), positions.len() == 16);
    }
}
