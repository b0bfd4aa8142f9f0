// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::board::Board;
use crate::legality::legal_destinations;
use crate::piece::Piece;
use crate::simulate::leaves_in_check;
use crate::types::{Color, Coord, PieceKind};

/// A move from one square to another. Castling is not represented here; it
/// is an intent of the turn engine, not a legality-evaluator move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Move {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Every move `side` can make that passes the legality evaluator and does not
/// leave its own king in check.
pub fn legal_moves(board: &mut Board, side: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in board.pieces(side) {
        for to in legal_destinations(board, from) {
            if !leaves_in_check(board, from, to) {
                moves.push(Move::new(from, to));
            }
        }
    }

    moves
}

/// Applies an already-validated move and returns the captured piece, if any.
/// Pawns, rooks and kings are marked as moved.
pub fn apply_move(board: &mut Board, mov: Move) -> Option<Piece> {
    let captured = board.remove_piece(mov.to).ok();
    board
        .relocate(mov.from, mov.to)
        .expect("invalid move: no piece at source square");
    mark_moved(board, mov.to);
    captured
}

/// Sets `initialized` on the piece at `at` if its kind tracks first moves.
pub(crate) fn mark_moved(board: &mut Board, at: Coord) {
    if let Some(piece) = board.piece_at_mut(at) {
        match piece.kind {
            PieceKind::Pawn | PieceKind::Rook | PieceKind::King => piece.initialized = true,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_move, legal_moves, Move};
    use crate::board::Board;
    use crate::types::{Color, Coord, PieceKind};

    fn c(row: u8, col: u8) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn twenty_opening_moves() {
        let mut board = Board::start();
        assert_eq!(20, legal_moves(&mut board, Color::White).len());
        assert_eq!(20, legal_moves(&mut board, Color::Black).len());
    }

    #[test]
    fn pinned_knight_has_no_moves() {
        let mut board = Board::from_diagram("3r3k/8/8/8/8/8/3N4/3K4").unwrap();
        let moves = legal_moves(&mut board, Color::White);
        assert!(moves.iter().all(|m| m.from != c(1, 3)));
        assert!(moves.contains(&Move::new(c(0, 3), c(0, 4))));
    }

    #[test]
    fn apply_marks_pawn_and_captures() {
        let mut board = Board::from_diagram("3k4/8/8/8/8/3p4/4P3/3K4").unwrap();
        let captured = apply_move(&mut board, Move::new(c(1, 4), c(2, 3))).unwrap();
        assert_eq!(PieceKind::Pawn, captured.kind);
        assert_eq!(Color::Black, captured.color);
        let pawn = board.piece_at(c(2, 3)).unwrap();
        assert!(pawn.initialized);
        assert_eq!(Color::White, pawn.color);
        assert!(board.is_empty(c(1, 4)));
    }

    #[test]
    fn display_is_coordinate_pair() {
        assert_eq!("e2e4", Move::new(c(1, 4), c(3, 4)).to_string());
    }
}
