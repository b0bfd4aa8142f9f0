// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::check::is_in_check;
use crate::legality::legal_destinations;
use crate::simulate::leaves_in_check;
use crate::types::{Color, Coord};

/// Searches for a move by `side` that does not leave its king in check,
/// returning the first one found.
pub fn find_escape(board: &mut Board, side: Color) -> Option<(Coord, Coord)> {
    for from in board.pieces(side) {
        for to in legal_destinations(board, from) {
            if !leaves_in_check(board, from, to) {
                return Some((from, to));
            }
        }
    }

    None
}

/// True if `side` is in check and no move gets it out. Returns false whenever
/// `side` is not in check to begin with.
///
/// The board is identical before and after the call.
pub fn is_checkmate(board: &mut Board, side: Color) -> bool {
    if !is_in_check(board, side) {
        return false;
    }

    match find_escape(board, side) {
        Some((from, to)) => {
            debug!("{} escapes check with {} -> {}", side, from, to);
            false
        }
        None => true,
    }
}
