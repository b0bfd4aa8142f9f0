// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The legality predicate: can a piece occupy a square under its movement
//! shape, line of sight and the color of whatever is standing there. Whether
//! the move would expose the mover's own king is not considered here; see
//! `simulate` for that.
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::obstruction::is_path_clear;
use crate::piece::Piece;
use crate::types::{Coord, PieceKind};

/// Squares a single piece can reach. A queen in the middle of an empty board
/// reaches 27, the most of any piece.
pub type Destinations = ArrayVec<[Coord; 32]>;

pub fn can_move_piece(board: &Board, piece: &Piece, to: Coord) -> bool {
    let occupant = board.piece_at(to);
    if let Some(target) = occupant {
        if target.color == piece.color {
            return false;
        }
    }

    match piece.kind {
        // Pawns move straight onto empty squares and capture diagonally; the two
        // never mix.
        PieceKind::Pawn => match occupant {
            Some(_) => piece.can_take(to),
            None => piece.can_move(to) && is_path_clear(board, piece.coord(), to),
        },
        PieceKind::Knight | PieceKind::King => piece.can_move(to),
        PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => {
            piece.can_move(to) && is_path_clear(board, piece.coord(), to)
        }
    }
}

/// Every square the piece on `from` can legally reach, ignoring check.
pub fn legal_destinations(board: &Board, from: Coord) -> Destinations {
    let mut dests = Destinations::new();
    let piece = match board.piece_at(from) {
        Some(piece) => piece,
        None => return dests,
    };

    for to in Coord::all() {
        if can_move_piece(board, piece, to) {
            dests.push(to);
        }
    }

    dests
}
