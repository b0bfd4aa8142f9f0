// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::piece::Piece;
use crate::types::Coord;

bitflags! {
    /// Transient display state attached to a square.
    pub struct SquareFlags: u8 {
        const HIGHLIGHT = 0b0000_0001;
        const MOVE_TO   = 0b0000_0010;
        const CHECK     = 0b0000_0100;
        const JUMP      = 0b0000_1000;
        const SELECTION = Self::HIGHLIGHT.bits | Self::MOVE_TO.bits | Self::JUMP.bits;
    }
}

/// One cell of the board. A square owns the piece standing on it, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Square {
    coord: Coord,
    piece: Option<Piece>,
    flags: SquareFlags,
}

impl Square {
    pub fn new(coord: Coord) -> Square {
        Square {
            coord,
            piece: None,
            flags: SquareFlags::empty(),
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub(crate) fn piece_mut(&mut self) -> Option<&mut Piece> {
        self.piece.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// Puts a piece on this square, handing it back if the square is taken.
    pub(crate) fn add_piece(&mut self, mut piece: Piece) -> Result<(), Piece> {
        if self.piece.is_some() {
            return Err(piece);
        }

        piece.row = self.coord.row;
        piece.col = self.coord.col;
        self.piece = Some(piece);
        Ok(())
    }

    pub(crate) fn clear_piece(&mut self) -> Option<Piece> {
        self.piece.take()
    }

    pub fn flags(&self) -> SquareFlags {
        self.flags
    }

    pub fn highlight(&self) -> bool {
        self.flags.contains(SquareFlags::HIGHLIGHT)
    }

    pub fn move_to(&self) -> bool {
        self.flags.contains(SquareFlags::MOVE_TO)
    }

    pub fn check(&self) -> bool {
        self.flags.contains(SquareFlags::CHECK)
    }

    pub(crate) fn set_flag(&mut self, flag: SquareFlags, value: bool) {
        self.flags.set(flag, value);
    }
}
