// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::board::Board;
use crate::moves::{apply_move, legal_moves};
use crate::types::Color;

/// Counts the leaf positions reachable from `board` in exactly `depth` plies,
/// `side` moving first.
pub fn perft(board: &Board, side: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut scratch = board.clone();
    let moves = legal_moves(&mut scratch, side);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .par_iter()
        .map(|&mov| {
            let mut next = board.clone();
            apply_move(&mut next, mov);
            perft(&next, side.toggle(), depth - 1)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::perft;
    use crate::board::{Board, START_DIAGRAM};
    use crate::types::Color;

    fn perft_test(diagram: &'static str, side: Color, depth: u32, count: u64) {
        let board = Board::from_diagram(diagram).unwrap();
        assert_eq!(count, perft(&board, side, depth));
    }

    macro_rules! perft_tests {
        () => {};
        ($name:ident ($depth:expr): $diagram:expr, $side:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            fn $name() {
                perft_test($diagram, $side, $depth, $count)
            }

            perft_tests!($($tail)*);
        };

        (skip $name:ident ($depth:expr): $diagram:expr, $side:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            #[ignore]
            fn $name() {
                perft_test($diagram, $side, $depth, $count)
            }

            perft_tests!($($tail)*);
        };

    }

    perft_tests! {
        start_1 (1): START_DIAGRAM, Color::White => 20;
        start_2 (2): START_DIAGRAM, Color::White => 400;
        start_3 (3): START_DIAGRAM, Color::White => 8902;
        skip start_4 (4): START_DIAGRAM, Color::White => 197_281;

        black_start_1 (1): START_DIAGRAM, Color::Black => 20;
        black_start_2 (2): START_DIAGRAM, Color::Black => 400;

        position_3_1 (1): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White => 14;
        position_3_2 (2): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White => 191;
    }

    #[test]
    fn depth_zero_is_one() {
        assert_eq!(1, perft(&Board::start(), Color::White, 0));
    }

    #[test]
    fn mated_side_has_no_moves() {
        perft_test("R5k1/5ppp/8/8/8/8/8/3K4", Color::Black, 1, 0);
    }
}
