// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::array;
use std::fmt::{self, Write};

use arrayvec::ArrayVec;

use crate::piece::{self, Piece};
use crate::square::{Square, SquareFlags};
use crate::types::TableIndex;
use crate::types::{Color, Coord, PieceKind, BOARD_SIZE, COLORS};

/// Diagram of the starting layout. Kings start on the d-file, queens on the e-file.
pub const START_DIAGRAM: &str = "rnbkqbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKQBNR";

/// Upper bound on the pieces one side may have on the board.
pub const MAX_PIECES_PER_SIDE: usize = 16;

/// Coordinates of one side's pieces.
pub type PieceList = ArrayVec<[Coord; MAX_PIECES_PER_SIDE]>;

lazy_static! {
    static ref START_BOARD: Board =
        Board::from_diagram(START_DIAGRAM).expect("starting diagram failed to parse");
}

/// Possible errors that can arise when parsing a board diagram.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagramParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    RowDoesNotSumToEight,
    UnknownPiece(char),
    TrailingInput,
    MissingKing(Color),
    DuplicateKing(Color),
    TooManyPieces(Color),
}

impl fmt::Display for DiagramParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DiagramParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            DiagramParseError::UnexpectedEnd => write!(f, "diagram ended early"),
            DiagramParseError::InvalidDigit => write!(f, "empty-run digit must be 1 through 8"),
            DiagramParseError::RowDoesNotSumToEight => write!(f, "row does not sum to eight"),
            DiagramParseError::UnknownPiece(c) => write!(f, "unknown piece '{}'", c),
            DiagramParseError::TrailingInput => write!(f, "trailing input after the last row"),
            DiagramParseError::MissingKing(color) => write!(f, "{} has no king", color),
            DiagramParseError::DuplicateKing(color) => write!(f, "{} has more than one king", color),
            DiagramParseError::TooManyPieces(color) => write!(f, "{} has too many pieces", color),
        }
    }
}

impl std::error::Error for DiagramParseError {}

/// Errors from low-level piece placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    Occupied(Coord),
    Vacant(Coord),
    /// The side already has `MAX_PIECES_PER_SIDE` pieces on the board.
    TooManyPieces(Color),
}

/// The 8x8 grid of squares. The board is the sole owner of piece placement:
/// every piece on it lives inside exactly one `Square`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Square; 8]; 8],
    kings: [Option<Coord>; 2],
    counts: [usize; 2],
}

//
// Board state getters
//

impl Board {
    /// An empty board.
    pub fn new() -> Board {
        Board {
            squares: array::from_fn(|row| {
                array::from_fn(|col| Square::new(Coord::new(row as u8, col as u8)))
            }),
            kings: [None; 2],
            counts: [0; 2],
        }
    }

    /// The starting layout.
    pub fn start() -> Board {
        START_BOARD.clone()
    }

    pub fn square(&self, at: Coord) -> &Square {
        &self.squares[at.row as usize][at.col as usize]
    }

    fn square_mut(&mut self, at: Coord) -> &mut Square {
        &mut self.squares[at.row as usize][at.col as usize]
    }

    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter().flat_map(|row| row.iter())
    }

    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.square(at).piece()
    }

    pub(crate) fn piece_at_mut(&mut self, at: Coord) -> Option<&mut Piece> {
        self.square_mut(at).piece_mut()
    }

    pub fn is_empty(&self, at: Coord) -> bool {
        self.square(at).is_empty()
    }

    /// Coordinates of every piece belonging to `color`, row-major.
    pub fn pieces(&self, color: Color) -> PieceList {
        let mut list = PieceList::new();
        for sq in self.squares() {
            if let Some(piece) = sq.piece() {
                if piece.color == color {
                    list.push(sq.coord());
                }
            }
        }

        list
    }

    /// Coordinate of `color`'s king, if it is on the board.
    pub fn king(&self, color: Color) -> Option<Coord> {
        self.kings[color.as_index()]
    }
}

//
// Piece placement
//

impl Board {
    /// Places a piece, rewriting its coordinates to match the square.
    pub fn add_piece(&mut self, at: Coord, piece: Piece) -> Result<(), PlacementError> {
        let is_king = piece.kind == PieceKind::King;
        let color = piece.color;
        if self.counts[color.as_index()] >= MAX_PIECES_PER_SIDE {
            return Err(PlacementError::TooManyPieces(color));
        }

        self.square_mut(at)
            .add_piece(piece)
            .map_err(|_| PlacementError::Occupied(at))?;
        self.counts[color.as_index()] += 1;
        if is_king {
            self.kings[color.as_index()] = Some(at);
        }

        Ok(())
    }

    /// Detaches the piece at `at` and hands it to the caller.
    pub fn remove_piece(&mut self, at: Coord) -> Result<Piece, PlacementError> {
        let piece = self
            .square_mut(at)
            .clear_piece()
            .ok_or(PlacementError::Vacant(at))?;
        self.counts[piece.color.as_index()] -= 1;
        if piece.kind == PieceKind::King && self.kings[piece.color.as_index()] == Some(at) {
            self.kings[piece.color.as_index()] = None;
        }

        Ok(piece)
    }

    /// Moves the piece on `from` to the empty square `to`.
    pub fn relocate(&mut self, from: Coord, to: Coord) -> Result<(), PlacementError> {
        if !self.is_empty(to) {
            return Err(PlacementError::Occupied(to));
        }

        let piece = self.remove_piece(from)?;
        self.add_piece(to, piece)
    }
}

//
// Display state
//

impl Board {
    pub(crate) fn set_flag(&mut self, at: Coord, flag: SquareFlags, value: bool) {
        self.square_mut(at).set_flag(flag, value);
    }

    /// Clears `flag` from every square on the board.
    pub(crate) fn clear_flag(&mut self, flag: SquareFlags) {
        for row in self.squares.iter_mut() {
            for sq in row.iter_mut() {
                sq.set_flag(flag, false);
            }
        }
    }

    /// Clears highlight, move-to and jump markers, including the jump marker on pieces.
    pub(crate) fn clear_selection_flags(&mut self) {
        for row in self.squares.iter_mut() {
            for sq in row.iter_mut() {
                sq.set_flag(SquareFlags::SELECTION, false);
                if let Some(piece) = sq.piece_mut() {
                    piece.jump = false;
                }
            }
        }
    }
}

//
// Diagram parsing and generation.
//
// A diagram is the placement field of FEN: rows are listed from row 7 down to
// row 0, separated by '/', with digits standing for runs of empty squares.
//

impl Board {
    pub fn from_diagram<S: AsRef<str>>(diagram: S) -> Result<Board, DiagramParseError> {
        let mut board = Board::new();
        let mut counts = [0usize; 2];
        let mut iter = diagram.as_ref().trim().chars().peekable();
        for row in (0..BOARD_SIZE).rev() {
            let mut col = 0;
            while col < BOARD_SIZE {
                let c = match iter.next() {
                    Some(c) => c,
                    None => return Err(DiagramParseError::UnexpectedEnd),
                };

                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(DiagramParseError::InvalidDigit);
                    }

                    col += c as u8 - b'0';
                    if col > BOARD_SIZE {
                        return Err(DiagramParseError::RowDoesNotSumToEight);
                    }

                    continue;
                }

                if c == '/' {
                    return Err(DiagramParseError::RowDoesNotSumToEight);
                }

                let (kind, color) =
                    piece::parse_piece_char(c).ok_or(DiagramParseError::UnknownPiece(c))?;
                counts[color.as_index()] += 1;
                if counts[color.as_index()] > MAX_PIECES_PER_SIDE {
                    return Err(DiagramParseError::TooManyPieces(color));
                }

                if kind == PieceKind::King && board.king(color).is_some() {
                    return Err(DiagramParseError::DuplicateKing(color));
                }

                let at = Coord::new(row, col);
                let mut piece = Piece::new(kind, color, at);
                piece.initialized = !is_home_square(kind, color, at);
                board
                    .add_piece(at, piece)
                    .expect("diagram placed two pieces on one square");
                col += 1;
            }

            if row != 0 {
                match iter.next() {
                    Some('/') => {}
                    Some(c) => return Err(DiagramParseError::UnexpectedChar(c)),
                    None => return Err(DiagramParseError::UnexpectedEnd),
                }
            }
        }

        if iter.next().is_some() {
            return Err(DiagramParseError::TrailingInput);
        }

        for &color in COLORS.iter() {
            if board.king(color).is_none() {
                return Err(DiagramParseError::MissingKing(color));
            }
        }

        Ok(board)
    }

    pub fn as_diagram(&self) -> String {
        let mut buf = String::new();
        for row in (0..BOARD_SIZE).rev() {
            let mut empty_squares = 0;
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.piece_at(Coord::new(row, col)) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if row != 0 {
                buf.push('/');
            }
        }

        buf
    }
}

/// Whether a piece of this kind and color standing on `at` could still be on
/// its starting square. Pieces found anywhere else are treated as having moved.
fn is_home_square(kind: PieceKind, color: Color, at: Coord) -> bool {
    match kind {
        PieceKind::Pawn => at.row == color.pawn_rank(),
        PieceKind::Rook => at.row == color.back_rank() && (at.col == 0 || at.col == BOARD_SIZE - 1),
        PieceKind::King => at.row == color.back_rank() && at.col == 3,
        _ => true,
    }
}

//
// Trait implementations
//

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.piece_at(Coord::new(row, col)) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", row + 1)?;
        }

        for _ in 0..BOARD_SIZE {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for col in 0..BOARD_SIZE {
            write!(f, " {} ", (b'a' + col) as char)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, PlacementError, START_DIAGRAM};
    use crate::piece::Piece;
    use crate::types::{Color, Coord, PieceKind};

    #[test]
    fn start_layout() {
        let board = Board::start();
        let check = |row: u8, col: u8, kind: PieceKind, color: Color| {
            let piece = board.piece_at(Coord::new(row, col)).unwrap();
            assert_eq!(kind, piece.kind);
            assert_eq!(color, piece.color);
            assert_eq!(Coord::new(row, col), piece.coord());
            assert!(!piece.initialized);
        };

        check(0, 0, PieceKind::Rook, Color::White);
        check(0, 1, PieceKind::Knight, Color::White);
        check(0, 2, PieceKind::Bishop, Color::White);
        check(0, 3, PieceKind::King, Color::White);
        check(0, 4, PieceKind::Queen, Color::White);
        check(0, 7, PieceKind::Rook, Color::White);
        check(7, 3, PieceKind::King, Color::Black);
        check(7, 4, PieceKind::Queen, Color::Black);
        for col in 0..8 {
            check(1, col, PieceKind::Pawn, Color::White);
            check(6, col, PieceKind::Pawn, Color::Black);
            for row in 2..6 {
                assert!(board.is_empty(Coord::new(row, col)));
            }
        }

        assert_eq!(Some(Coord::new(0, 3)), board.king(Color::White));
        assert_eq!(Some(Coord::new(7, 3)), board.king(Color::Black));
        assert_eq!(16, board.pieces(Color::White).len());
        assert_eq!(16, board.pieces(Color::Black).len());
    }

    #[test]
    fn add_and_remove_track_kings() {
        let mut board = Board::new();
        let at = Coord::new(4, 4);
        board
            .add_piece(at, Piece::new(PieceKind::King, Color::Black, at))
            .unwrap();
        assert_eq!(Some(at), board.king(Color::Black));
        let king = board.remove_piece(at).unwrap();
        assert_eq!(PieceKind::King, king.kind);
        assert_eq!(None, board.king(Color::Black));
    }

    #[test]
    fn add_refuses_occupied_square() {
        let mut board = Board::start();
        let at = Coord::new(0, 0);
        let err = board
            .add_piece(at, Piece::new(PieceKind::Queen, Color::Black, at))
            .unwrap_err();
        assert_eq!(PlacementError::Occupied(at), err);
    }

    #[test]
    fn add_refuses_seventeenth_piece() {
        let mut board = Board::new();
        let king = Coord::new(0, 3);
        board
            .add_piece(king, Piece::new(PieceKind::King, Color::Black, king))
            .unwrap();
        for idx in 0..15 {
            let at = Coord::from_index(16 + idx);
            board
                .add_piece(at, Piece::new(PieceKind::Pawn, Color::Black, at))
                .unwrap();
        }

        let at = Coord::new(5, 0);
        assert_eq!(
            PlacementError::TooManyPieces(Color::Black),
            board
                .add_piece(at, Piece::new(PieceKind::Pawn, Color::Black, at))
                .unwrap_err()
        );
        assert!(board.is_empty(at));
        assert_eq!(16, board.pieces(Color::Black).len());

        // the other side is counted separately
        board
            .add_piece(at, Piece::new(PieceKind::Pawn, Color::White, at))
            .unwrap();

        // freeing a slot makes room again
        board.remove_piece(Coord::new(2, 0)).unwrap();
        let at = Coord::new(5, 1);
        board
            .add_piece(at, Piece::new(PieceKind::Pawn, Color::Black, at))
            .unwrap();
        assert_eq!(16, board.pieces(Color::Black).len());
    }

    #[test]
    fn remove_from_empty_square() {
        let mut board = Board::new();
        let at = Coord::new(3, 3);
        assert_eq!(PlacementError::Vacant(at), board.remove_piece(at).unwrap_err());
    }

    #[test]
    fn relocate_updates_piece_coordinates() {
        let mut board = Board::start();
        board.relocate(Coord::new(0, 1), Coord::new(2, 2)).unwrap();
        assert!(board.is_empty(Coord::new(0, 1)));
        assert_eq!(Coord::new(2, 2), board.piece_at(Coord::new(2, 2)).unwrap().coord());
        assert_eq!(
            PlacementError::Occupied(Coord::new(1, 0)),
            board.relocate(Coord::new(0, 0), Coord::new(1, 0)).unwrap_err()
        );
    }

    mod diagram {
        use crate::board::{Board, DiagramParseError, START_DIAGRAM};
        use crate::types::{Color, Coord};

        #[test]
        fn round_trip_start() {
            assert_eq!(START_DIAGRAM, Board::start().as_diagram());
        }

        #[test]
        fn sparse_diagram() {
            let board = Board::from_diagram("3k4/8/8/8/8/8/8/R2K4").unwrap();
            assert_eq!(Some(Coord::new(7, 3)), board.king(Color::Black));
            assert_eq!(Some(Coord::new(0, 3)), board.king(Color::White));
            assert!(!board.piece_at(Coord::new(0, 0)).unwrap().initialized);
        }

        #[test]
        fn infers_moved_pieces() {
            let board = Board::from_diagram("3k4/8/8/8/4P3/8/8/3K3R").unwrap();
            assert!(board.piece_at(Coord::new(3, 4)).unwrap().initialized);
            assert!(!board.piece_at(Coord::new(0, 7)).unwrap().initialized);

            let board = Board::from_diagram("3k4/8/8/8/8/8/8/4K2R").unwrap();
            assert!(board.piece_at(Coord::new(0, 4)).unwrap().initialized);
        }

        #[test]
        fn empty() {
            assert_eq!(
                DiagramParseError::UnexpectedEnd,
                Board::from_diagram("").unwrap_err()
            );
        }

        #[test]
        fn unknown_piece() {
            assert_eq!(
                DiagramParseError::UnknownPiece('z'),
                Board::from_diagram("z7/8/8/8/8/8/8/8").unwrap_err()
            );
        }

        #[test]
        fn invalid_digit() {
            assert_eq!(
                DiagramParseError::InvalidDigit,
                Board::from_diagram("08/8/8/8/8/8/8/8").unwrap_err()
            );
        }

        #[test]
        fn not_sum_to_8() {
            assert_eq!(
                DiagramParseError::RowDoesNotSumToEight,
                Board::from_diagram("54/8/8/8/8/8/8/8").unwrap_err()
            );
            assert_eq!(
                DiagramParseError::RowDoesNotSumToEight,
                Board::from_diagram("7/8/8/8/8/8/8/8").unwrap_err()
            );
        }

        #[test]
        fn trailing_input() {
            assert_eq!(
                DiagramParseError::TrailingInput,
                Board::from_diagram("3k4/8/8/8/8/8/8/3K4/").unwrap_err()
            );
        }

        #[test]
        fn missing_king() {
            assert_eq!(
                DiagramParseError::MissingKing(Color::Black),
                Board::from_diagram("8/8/8/8/8/8/8/3K4").unwrap_err()
            );
        }

        #[test]
        fn duplicate_king() {
            assert_eq!(
                DiagramParseError::DuplicateKing(Color::White),
                Board::from_diagram("3k4/8/8/8/8/8/8/3K1K2").unwrap_err()
            );
        }

        #[test]
        fn too_many_pieces() {
            assert_eq!(
                DiagramParseError::TooManyPieces(Color::White),
                Board::from_diagram("3k4/8/8/8/QQQQQQQQ/8/PPPPPPPP/RNBKQBNR").unwrap_err()
            );
        }
    }

    #[test]
    fn display_lists_rows_top_down() {
        let text = Board::from_diagram(START_DIAGRAM).unwrap().to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with(" r  n  b  k  q  b  n  r "));
        assert!(first.ends_with("| 8"));
    }
}
