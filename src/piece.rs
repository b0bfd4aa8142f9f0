// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pieces and their movement geometry. The predicates here only know about
//! the shape of a move; occupancy and obstruction are the job of
//! `legality` and `obstruction`.
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

use crate::types::{Color, Coord, PieceKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub row: u8,
    pub col: u8,
    /// Whether this piece has ever moved. Only pawns, rooks and kings care.
    pub initialized: bool,
    /// Double-step indicator carried for the display layer; the rules never read it.
    pub jump: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, at: Coord) -> Piece {
        Piece {
            kind,
            color,
            row: at.row,
            col: at.col,
            initialized: false,
            jump: false,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// True if `to` fits this piece's movement geometry, ignoring everything on
    /// the board.
    pub fn can_move(&self, to: Coord) -> bool {
        let from = self.coord();
        let dr = from.row_delta(to);
        let dc = from.col_delta(to);
        if dr == 0 && dc == 0 {
            return false;
        }

        match self.kind {
            PieceKind::Rook => rook_shape(dr, dc),
            PieceKind::Bishop => bishop_shape(dr, dc),
            PieceKind::Queen => rook_shape(dr, dc) || bishop_shape(dr, dc),
            PieceKind::Knight => {
                let (r, c) = (dr.abs(), dc.abs());
                (r == 1 && c == 2) || (r == 2 && c == 1)
            }
            PieceKind::King => dr.abs() <= 1 && dc.abs() <= 1,
            PieceKind::Pawn => {
                let forward = self.color.forward();
                dc == 0 && (dr == forward || (dr == 2 * forward && !self.initialized))
            }
        }
    }

    /// True if this piece attacks `to`. Pawns attack one square forward-diagonal;
    /// every other piece attacks along its movement geometry.
    pub fn can_take(&self, to: Coord) -> bool {
        match self.kind {
            PieceKind::Pawn => {
                let from = self.coord();
                from.row_delta(to) == self.color.forward() && from.col_delta(to).abs() == 1
            }
            _ => self.can_move(to),
        }
    }
}

fn rook_shape(dr: i32, dc: i32) -> bool {
    dr == 0 || dc == 0
}

fn bishop_shape(dr: i32, dc: i32) -> bool {
    dr != 0 && dr.abs() == dc.abs()
}

/// Parses a diagram letter into the kind and color it names. Uppercase letters
/// are White, lowercase Black.
pub fn parse_piece_char(c: char) -> Option<(PieceKind, Color)> {
    let kind = PieceKind::try_from(c).ok()?;
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some((kind, color))
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = self.kind.to_string().chars().next().unwrap_or('?');
        match self.color {
            Color::White => f.write_char(chr.to_ascii_uppercase()),
            Color::Black => f.write_char(chr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Piece;
    use crate::types::{Color, Coord, PieceKind};

    fn piece(kind: PieceKind, color: Color, row: u8, col: u8) -> Piece {
        Piece::new(kind, color, Coord::new(row, col))
    }

    fn targets(p: &Piece, pred: fn(&Piece, Coord) -> bool) -> Vec<Coord> {
        Coord::all().filter(|&c| pred(p, c)).collect()
    }

    #[test]
    fn rook_moves_along_lines() {
        let rook = piece(PieceKind::Rook, Color::White, 3, 3);
        assert!(rook.can_move(Coord::new(3, 7)));
        assert!(rook.can_move(Coord::new(0, 3)));
        assert!(!rook.can_move(Coord::new(4, 4)));
        assert!(!rook.can_move(Coord::new(3, 3)));
        assert_eq!(14, targets(&rook, Piece::can_move).len());
    }

    #[test]
    fn bishop_moves_along_diagonals() {
        let bishop = piece(PieceKind::Bishop, Color::Black, 0, 2);
        assert!(bishop.can_move(Coord::new(2, 4)));
        assert!(bishop.can_move(Coord::new(2, 0)));
        assert!(!bishop.can_move(Coord::new(1, 2)));
        assert_eq!(7, targets(&bishop, Piece::can_move).len());
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let queen = piece(PieceKind::Queen, Color::White, 3, 3);
        assert_eq!(27, targets(&queen, Piece::can_move).len());
        assert!(!queen.can_move(Coord::new(5, 4)));
    }

    #[test]
    fn knight_jumps() {
        let knight = piece(PieceKind::Knight, Color::White, 0, 1);
        let mut moves = targets(&knight, Piece::can_move);
        moves.sort_by_key(|c| c.index());
        assert_eq!(
            vec![Coord::new(1, 3), Coord::new(2, 0), Coord::new(2, 2)],
            moves
        );
    }

    #[test]
    fn king_steps_once() {
        let king = piece(PieceKind::King, Color::White, 0, 3);
        assert_eq!(5, targets(&king, Piece::can_move).len());
        assert!(!king.can_move(Coord::new(0, 5)));
    }

    #[test]
    fn white_pawn_advances_up() {
        let pawn = piece(PieceKind::Pawn, Color::White, 1, 4);
        assert!(pawn.can_move(Coord::new(2, 4)));
        assert!(pawn.can_move(Coord::new(3, 4)));
        assert!(!pawn.can_move(Coord::new(0, 4)));
        assert!(!pawn.can_move(Coord::new(2, 5)));
    }

    #[test]
    fn black_pawn_advances_down() {
        let pawn = piece(PieceKind::Pawn, Color::Black, 6, 4);
        assert!(pawn.can_move(Coord::new(5, 4)));
        assert!(pawn.can_move(Coord::new(4, 4)));
        assert!(!pawn.can_move(Coord::new(7, 4)));
    }

    #[test]
    fn moved_pawn_loses_double_step() {
        let mut pawn = piece(PieceKind::Pawn, Color::White, 2, 4);
        pawn.initialized = true;
        assert!(pawn.can_move(Coord::new(3, 4)));
        assert!(!pawn.can_move(Coord::new(4, 4)));
    }

    #[test]
    fn pawn_takes_forward_diagonal() {
        let white = piece(PieceKind::Pawn, Color::White, 1, 4);
        assert!(white.can_take(Coord::new(2, 3)));
        assert!(white.can_take(Coord::new(2, 5)));
        assert!(!white.can_take(Coord::new(0, 3)));
        assert!(!white.can_take(Coord::new(2, 4)));

        let black = piece(PieceKind::Pawn, Color::Black, 6, 4);
        assert!(black.can_take(Coord::new(5, 3)));
        assert!(!black.can_take(Coord::new(7, 3)));
    }

    #[test]
    fn display_uses_case_for_color() {
        assert_eq!("K", piece(PieceKind::King, Color::White, 0, 3).to_string());
        assert_eq!("n", piece(PieceKind::Knight, Color::Black, 7, 1).to_string());
    }
}
