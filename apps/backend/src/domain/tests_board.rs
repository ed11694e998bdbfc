use crate::domain::board::{Board, Position};
use crate::domain::game::GameId;
use crate::domain::player::PlayerId;

fn board(size: usize) -> Board {
    Board::new(GameId::from("g1"), PlayerId::from("p1"), size)
}

#[test]
fn new_board_is_empty() {
    let b = board(3);
    assert!(!b.is_full());
    assert_eq!(b.empty_count(), 9);
    assert_eq!(b.get(Position::new(0, 0)), None);
    assert!(b.is_empty(Position::new(2, 2)));
}

#[test]
fn set_and_get_round_trip() {
    let mut b = board(3);
    b.set(Position::new(1, 2), 'A');
    assert_eq!(b.get(Position::new(1, 2)), Some('A'));
    assert!(!b.is_empty(Position::new(1, 2)));
    assert_eq!(b.empty_count(), 8);
}

#[test]
fn out_of_bounds_reads_and_writes_are_inert() {
    let mut b = board(2);
    assert!(!b.is_valid_position(Position::new(2, 0)));
    assert!(!b.is_valid_position(Position::new(0, 2)));
    assert_eq!(b.get(Position::new(2, 2)), None);

    b.set(Position::new(5, 5), 'X');
    assert_eq!(b.empty_count(), 4);
}

#[test]
fn full_board_detection() {
    let mut b = board(2);
    for row in 0..2 {
        for col in 0..2 {
            b.set(Position::new(row, col), 'Z');
        }
    }
    assert!(b.is_full());
    assert_eq!(b.empty_count(), 0);
    assert!(b.empty_positions().is_empty());
}

#[test]
fn row_and_col_extraction() {
    let mut b = board(3);
    b.set(Position::new(0, 0), 'C');
    b.set(Position::new(0, 1), 'A');
    b.set(Position::new(0, 2), 'T');
    b.set(Position::new(1, 0), 'O');

    assert_eq!(b.row(0), vec![Some('C'), Some('A'), Some('T')]);
    assert_eq!(b.col(0), vec![Some('C'), Some('O'), None]);
    assert_eq!(b.row(3), Vec::<Option<char>>::new());
    assert_eq!(b.col(9), Vec::<Option<char>>::new());
}

#[test]
fn empty_positions_are_row_major() {
    let mut b = board(2);
    b.set(Position::new(0, 1), 'A');
    assert_eq!(
        b.empty_positions(),
        vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(1, 1)
        ]
    );
}
