//! Scoring engine: greedy longest-first word selection over finished boards.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::domain::{Board, BoardScore, PlayerId, Position, WordMatch};
use crate::services::dictionary::DictionaryService;

/// Pure scoring over finished boards. Word score is its length, doubled
/// when the word spans an entire line.
pub struct ScoringService {
    dictionary: Arc<DictionaryService>,
}

struct Candidate {
    word: String,
    start: usize,
    length: usize,
    score: u32,
}

impl ScoringService {
    pub fn new(dictionary: Arc<DictionaryService>) -> Self {
        Self { dictionary }
    }

    /// Score one board: every row and every column is searched for
    /// dictionary words, with greedy non-overlapping selection per line.
    /// A cell may serve one horizontal and one vertical word at once.
    pub fn score_board(&self, board: &Board) -> BoardScore {
        let mut result = BoardScore {
            player_id: board.player_id.clone(),
            words: Vec::new(),
            total: 0,
        };

        for row in 0..board.size {
            let letters = board.row(row);
            for c in self.best_words_in_line(&letters, board.size) {
                result.total += c.score;
                result.words.push(WordMatch {
                    word: c.word,
                    start: Position::new(row, c.start),
                    horizontal: true,
                    length: c.length,
                    score: c.score,
                });
            }
        }

        for col in 0..board.size {
            let letters = board.col(col);
            for c in self.best_words_in_line(&letters, board.size) {
                result.total += c.score;
                result.words.push(WordMatch {
                    word: c.word,
                    start: Position::new(c.start, col),
                    horizontal: false,
                    length: c.length,
                    score: c.score,
                });
            }
        }

        result
    }

    /// Greedy longest-first, non-overlapping selection within one line.
    /// Equal lengths break on leftmost start index.
    fn best_words_in_line(&self, letters: &[Option<char>], grid_size: usize) -> Vec<Candidate> {
        let found = self.dictionary.find_all_substring_words(letters);
        if found.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate> = found
            .into_iter()
            .map(|f| {
                let length = f.end - f.start;
                let mut score = length as u32;
                if length == grid_size {
                    // Full-line bonus
                    score *= 2;
                }
                Candidate {
                    word: f.word,
                    start: f.start,
                    length,
                    score,
                }
            })
            .collect();

        candidates.sort_by_key(|c| (Reverse(c.length), c.start));

        let mut used = vec![false; letters.len()];
        let mut selected = Vec::new();
        for c in candidates {
            let span = c.start..c.start + c.length;
            if span.clone().any(|i| used[i]) {
                continue;
            }
            for i in span {
                used[i] = true;
            }
            selected.push(c);
        }
        selected
    }

    /// Score each board independently, sorted descending by total.
    pub fn score_boards(&self, boards: &[Board]) -> Vec<BoardScore> {
        let mut scores: Vec<BoardScore> = boards.iter().map(|b| self.score_board(b)).collect();
        scores.sort_by_key(|s| Reverse(s.total));
        scores
    }

    /// The unique top scorer, or None when two or more boards tie for the
    /// maximum.
    pub fn determine_winner(&self, scores: &[BoardScore]) -> Option<PlayerId> {
        let top = scores.first()?;
        let tied = scores.iter().filter(|s| s.total == top.total).count();
        if tied > 1 {
            return None;
        }
        Some(top.player_id.clone())
    }
}
