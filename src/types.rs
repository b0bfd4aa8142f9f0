// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use num_traits::{FromPrimitive, ToPrimitive};
use std::convert::TryFrom;
use std::fmt::{self, Display, Write};

// TableIndex is a trait for all types that can serve as an index into a table.
// It is common to use these types as indices into tables, so this trait allows
// any type implementing To and FromPrimitive to be used as table indices.
pub trait TableIndex {
    fn as_index(self) -> usize;
    fn from_index(idx: usize) -> Self;
}

impl<T> TableIndex for T
where
    T: FromPrimitive + ToPrimitive,
{
    fn as_index(self) -> usize {
        self.to_u32().unwrap() as usize
    }

    fn from_index(idx: usize) -> T {
        <T as FromPrimitive>::from_u64(idx as u64).unwrap()
    }
}

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: u8 = 8;

/// A coordinate on the board. Row 0 is White's back rank and row 7 is Black's;
/// column 0 is the a-file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub fn new(row: u8, col: u8) -> Coord {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE, "coordinate off the board");
        Coord { row, col }
    }

    /// Returns the coordinate at the given signed row and column, if it lies on the board.
    pub fn try_new(row: i32, col: i32) -> Option<Coord> {
        let size = i32::from(BOARD_SIZE);
        if row < 0 || row >= size || col < 0 || col >= size {
            return None;
        }

        Some(Coord::new(row as u8, col as u8))
    }

    pub fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    pub fn offset(self, rows: i32, cols: i32) -> Option<Coord> {
        Coord::try_new(i32::from(self.row) + rows, i32::from(self.col) + cols)
    }

    /// Signed row distance from `self` to `other`.
    pub fn row_delta(self, other: Coord) -> i32 {
        i32::from(other.row) - i32::from(self.row)
    }

    /// Signed column distance from `self` to `other`.
    pub fn col_delta(self, other: Coord) -> i32 {
        i32::from(other.col) - i32::from(self.col)
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    pub fn from_index(idx: usize) -> Coord {
        let size = BOARD_SIZE as usize;
        Coord::new((idx / size) as u8, (idx % size) as u8)
    }

    /// Every coordinate on the board, row-major starting at (0, 0).
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..(BOARD_SIZE as usize * BOARD_SIZE as usize)).map(Coord::from_index)
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char((b'a' + self.col) as char)?;
        f.write_char((b'1' + self.row) as char)
    }
}

impl TryFrom<&str> for Coord {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let file = chars.next().ok_or(())?;
        let rank = chars.next().ok_or(())?;
        if chars.next().is_some() {
            return Err(());
        }

        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(()),
        };
        let row = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(()),
        };
        Ok(Coord::new(row, col))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn toggle(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The row direction this color's pawns advance in.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => BOARD_SIZE - 1,
        }
    }

    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => BOARD_SIZE - 2,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

pub static COLORS: [Color; 2] = [Color::White, Color::Black];

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let chr = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        f.write_char(chr)
    }
}

impl TryFrom<char> for PieceKind {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let res = match value.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(()),
        };
        Ok(res)
    }
}
