// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Read-only views of the game for rendering.
use crate::board::Board;
use crate::types::{Color, Coord, PieceKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Undecided,
    Winner(Color),
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Undecided => None,
            Outcome::Winner(color) => Some(color),
        }
    }

    pub fn is_decided(self) -> bool {
        self != Outcome::Undecided
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Occupant {
    pub color: Color,
    pub kind: PieceKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SquareSnapshot {
    pub row: u8,
    pub col: u8,
    pub occupant: Option<Occupant>,
    pub highlight: bool,
    pub move_to: bool,
    pub check: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub side_to_move: Color,
    pub outcome: Outcome,
    pub selected: Option<Coord>,
    /// All 64 squares, row-major starting at row 0.
    pub squares: Vec<SquareSnapshot>,
}

impl BoardSnapshot {
    pub fn capture(
        board: &Board,
        side_to_move: Color,
        outcome: Outcome,
        selected: Option<Coord>,
    ) -> BoardSnapshot {
        let squares = board
            .squares()
            .map(|sq| SquareSnapshot {
                row: sq.coord().row,
                col: sq.coord().col,
                occupant: sq.piece().map(|p| Occupant {
                    color: p.color,
                    kind: p.kind,
                }),
                highlight: sq.highlight(),
                move_to: sq.move_to(),
                check: sq.check(),
            })
            .collect();

        BoardSnapshot {
            side_to_move,
            outcome,
            selected,
            squares,
        }
    }

    pub fn square(&self, at: Coord) -> &SquareSnapshot {
        &self.squares[at.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardSnapshot, Occupant, Outcome};
    use crate::board::Board;
    use crate::types::{Color, Coord, PieceKind};

    #[test]
    fn snapshot_of_start() {
        let snap = BoardSnapshot::capture(&Board::start(), Color::White, Outcome::Undecided, None);
        assert_eq!(64, snap.squares.len());
        assert_eq!(
            Some(Occupant {
                color: Color::White,
                kind: PieceKind::King
            }),
            snap.square(Coord::new(0, 3)).occupant
        );
        assert_eq!(None, snap.square(Coord::new(4, 4)).occupant);
        assert_eq!(7, snap.square(Coord::new(7, 2)).row);
        assert_eq!(2, snap.square(Coord::new(7, 2)).col);
    }

    #[test]
    fn outcome_serializes() {
        assert_eq!(
            r#""undecided""#,
            serde_json::to_string(&Outcome::Undecided).unwrap()
        );
        assert_eq!(
            r#"{"winner":"black"}"#,
            serde_json::to_string(&Outcome::Winner(Color::Black)).unwrap()
        );
        assert_eq!(Some(Color::Black), Outcome::Winner(Color::Black).winner());
    }
}
