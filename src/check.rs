// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::legality::can_move_piece;
use crate::types::{Color, Coord};

/// Returns the square of an opposing piece that can legally reach `side`'s
/// king, or `None` if the king is safe.
///
/// Panics if `side` has no king on the board.
pub fn checker(board: &Board, side: Color) -> Option<Coord> {
    let king = board
        .king(side)
        .expect("invariant violated: no king on the board");
    board.pieces(side.toggle()).into_iter().find(|&from| {
        let piece = board
            .piece_at(from)
            .expect("piece list produced an empty square?");
        can_move_piece(board, piece, king)
    })
}

pub fn is_in_check(board: &Board, side: Color) -> bool {
    checker(board, side).is_some()
}

#[cfg(test)]
mod tests {
    use super::{checker, is_in_check};
    use crate::board::Board;
    use crate::types::{Color, Coord};

    #[test]
    fn start_is_quiet() {
        let board = Board::start();
        assert!(!is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn rook_on_open_file() {
        let board = Board::from_diagram("3r4/8/8/8/8/8/8/3K3k").unwrap();
        assert_eq!(Some(Coord::new(7, 3)), checker(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn blocked_rook_does_not_check() {
        let board = Board::from_diagram("3r4/8/8/8/3N4/8/8/3K3k").unwrap();
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn pawn_checks_diagonally_only() {
        // black pawn straight ahead of the white king does nothing
        let board = Board::from_diagram("7k/8/8/8/8/8/3p4/3K4").unwrap();
        assert!(!is_in_check(&board, Color::White));

        let board = Board::from_diagram("7k/8/8/8/8/8/4p3/3K4").unwrap();
        assert_eq!(Some(Coord::new(1, 4)), checker(&board, Color::White));
    }

    #[test]
    fn knight_check() {
        let board = Board::from_diagram("7k/8/8/8/8/4n3/8/3K4").unwrap();
        assert!(is_in_check(&board, Color::White));
    }

    #[test]
    #[should_panic]
    fn missing_king_is_fatal() {
        let board = Board::new();
        is_in_check(&board, Color::White);
    }
}
