// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line-of-sight checks between two squares.
use crate::board::Board;
use crate::types::Coord;

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// Straight lines and diagonals are walked square by square. Any other
/// pair of squares (a knight's jump, for instance) has nothing in between
/// and is always clear.
pub fn is_path_clear(board: &Board, from: Coord, to: Coord) -> bool {
    let dr = from.row_delta(to);
    let dc = from.col_delta(to);
    if dr == 0 || dc == 0 {
        is_clear_straight(board, from, to)
    } else if dr.abs() == dc.abs() {
        is_clear_diagonal(board, from, to)
    } else {
        true
    }
}

fn is_clear_straight(board: &Board, from: Coord, to: Coord) -> bool {
    if from.row == to.row {
        let (lo, hi) = ordered(from.col, to.col);
        ((lo + 1)..hi).all(|col| board.is_empty(Coord::new(from.row, col)))
    } else {
        let (lo, hi) = ordered(from.row, to.row);
        ((lo + 1)..hi).all(|row| board.is_empty(Coord::new(row, from.col)))
    }
}

fn is_clear_diagonal(board: &Board, from: Coord, to: Coord) -> bool {
    let dr = from.row_delta(to);
    let dc = from.col_delta(to);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    (1..dr.abs()).all(|i| match from.offset(i * step_r, i * step_c) {
        Some(between) => board.is_empty(between),
        None => unreachable!("diagonal walk left the board"),
    })
}

fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
