// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Speculative moves. Every function here applies a move to the board, asks
//! the check detector about the mover's own king, and then puts the board back
//! exactly as it found it, whatever the answer was.
use crate::board::Board;
use crate::check::is_in_check;
use crate::types::Coord;

/// Returns true if moving the piece on `from` to `to` would leave its own
/// king in check. Moving onto one of the mover's own pieces is never possible,
/// so it reports true as well.
///
/// The board is identical before and after the call.
pub fn leaves_in_check(board: &mut Board, from: Coord, to: Coord) -> bool {
    let mover = board
        .piece_at(from)
        .expect("simulated move from an empty square")
        .color;
    match board.piece_at(to).map(|target| target.color) {
        None => empty_square_test(board, from, to),
        Some(color) if color != mover => take_test(board, from, to),
        Some(_) => true,
    }
}

/// Move to an empty square, inspect, revert.
fn empty_square_test(board: &mut Board, from: Coord, to: Coord) -> bool {
    let piece = board
        .remove_piece(from)
        .expect("simulated move from an empty square");
    let side = piece.color;
    board
        .add_piece(to, piece)
        .expect("simulated move onto an occupied square");

    let check = is_in_check(board, side);

    let piece = board
        .remove_piece(to)
        .expect("simulated piece vanished from its destination");
    board
        .add_piece(from, piece)
        .expect("simulated origin filled while the piece was away");
    check
}

/// Detach the target, move onto its square, inspect, revert, then restore the target.
fn take_test(board: &mut Board, from: Coord, to: Coord) -> bool {
    let taken = board
        .remove_piece(to)
        .expect("simulated capture of an empty square");
    let check = empty_square_test(board, from, to);
    board
        .add_piece(to, taken)
        .expect("simulated capture square filled while the target was away");
    check
}
