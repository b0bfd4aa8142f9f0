// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The turn engine. A `Game` owns the board and turns discrete intents from
//! the presentation layer (select a piece, move the selection somewhere,
//! castle, reset) into rule-checked state changes, publishing what happened
//! to its `GameObserver`.
//!
//! Every intent either commits completely or leaves the board, the side to
//! move and the selection exactly as they were. Rejections are reported as a
//! `Rejection` value and publish nothing.
use std::error::Error;
use std::fmt;

use crate::board::Board;
use crate::check::checker;
use crate::checkmate::is_checkmate;
use crate::events::{GameObserver, NullObserver};
use crate::legality::{can_move_piece, legal_destinations};
use crate::moves::{self, Move};
use crate::obstruction::is_path_clear;
use crate::piece::Piece;
use crate::simulate::leaves_in_check;
use crate::snapshot::{BoardSnapshot, Outcome};
use crate::square::SquareFlags;
use crate::types::{Color, Coord, PieceKind, BOARD_SIZE};

/// Why an intent was refused. The game state is unchanged in every case.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// A winner has been published; only `reset` is accepted.
    GameOver,
    /// A move was requested with nothing selected.
    NoSelection,
    /// The target square holds no piece.
    EmptySquare,
    /// The piece belongs to the side not on move.
    NotYourTurn,
    /// The target holds a piece of the mover's own color.
    OwnPiece,
    /// The move fails the piece's shape, line of sight or occupancy rules.
    Illegal,
    /// The move would leave the mover's own king in check.
    LeavesKingInCheck,
    /// The coordinate lies outside the 8x8 board.
    OffBoard,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            Rejection::GameOver => "the game is over",
            Rejection::NoSelection => "no piece is selected",
            Rejection::EmptySquare => "there is no piece on that square",
            Rejection::NotYourTurn => "that piece is not on move",
            Rejection::OwnPiece => "that square holds one of your own pieces",
            Rejection::Illegal => "that piece cannot move there",
            Rejection::LeavesKingInCheck => "that move leaves the king in check",
            Rejection::OffBoard => "that square is off the board",
        };
        f.write_str(msg)
    }
}

impl Error for Rejection {}

/// Summary of a committed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub mov: Move,
    pub color: Color,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub castle: bool,
    /// Whether the move put the opponent in check.
    pub check: bool,
    pub checkmate: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Selected(Coord),
    Moved(MoveRecord),
}

pub type IntentResult = Result<Response, Rejection>;

pub struct Game<O: GameObserver = NullObserver> {
    board: Board,
    side_to_move: Color,
    selected: Option<Coord>,
    outcome: Outcome,
    checker: Option<Coord>,
    captured: Vec<Piece>,
    observer: O,
}

impl Game<NullObserver> {
    pub fn new() -> Game<NullObserver> {
        Game::with_observer(NullObserver)
    }

    pub fn from_board(board: Board, side_to_move: Color) -> Game<NullObserver> {
        Game::from_parts(board, side_to_move, NullObserver)
    }
}

impl Default for Game<NullObserver> {
    fn default() -> Self {
        Game::new()
    }
}

//
// Construction and state getters
//

impl<O: GameObserver> Game<O> {
    pub fn with_observer(observer: O) -> Game<O> {
        Game::from_parts(Board::start(), Color::White, observer)
    }

    /// Builds a game around an arbitrary position. The check marker and the
    /// outcome are computed for the position, but nothing is published.
    pub fn from_parts(board: Board, side_to_move: Color, observer: O) -> Game<O> {
        let mut game = Game {
            board,
            side_to_move,
            selected: None,
            outcome: Outcome::Undecided,
            checker: None,
            captured: Vec::new(),
            observer,
        };

        if game.update_check() && is_checkmate(&mut game.board, side_to_move) {
            game.outcome = Outcome::Winner(side_to_move.toggle());
        }

        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The piece delivering check to the side to move, as of the last move.
    pub fn checker(&self) -> Option<Coord> {
        self.checker
    }

    pub fn is_in_check(&self) -> bool {
        self.checker.is_some()
    }

    /// Pieces taken off the board so far, in capture order.
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.board, self.side_to_move, self.outcome, self.selected)
    }

    /// Every move the side to move can make.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        moves::legal_moves(&mut self.board, self.side_to_move)
    }
}

//
// Intents
//

impl<O: GameObserver> Game<O> {
    /// Starts over from the starting layout with White to move.
    pub fn reset(&mut self) {
        self.board = Board::start();
        self.side_to_move = Color::White;
        self.selected = None;
        self.outcome = Outcome::Undecided;
        self.checker = None;
        self.captured.clear();
        info!("game reset");
        self.observer.turn_changed(self.side_to_move);
        self.observer.game_over(None);
    }

    /// Clicks the piece on `at`.
    ///
    /// With nothing selected, selects the piece if it belongs to the side to
    /// move. With a selection, a piece of the other color is a capture attempt
    /// and a piece of the same color replaces the selection.
    pub fn select(&mut self, at: Coord) -> IntentResult {
        self.ensure_playable(at)?;
        let color = self
            .board
            .piece_at(at)
            .map(|p| p.color)
            .ok_or(Rejection::EmptySquare)?;
        if let Some(selected) = self.selected_color() {
            if selected != color {
                return self.target_occupied_square(at);
            }
        }

        if color != self.side_to_move {
            trace!("ignoring selection of {} on {}'s turn", at, self.side_to_move);
            return Err(Rejection::NotYourTurn);
        }

        self.clear_selection();
        self.selected = Some(at);
        self.board.set_flag(at, SquareFlags::HIGHLIGHT, true);
        for to in legal_destinations(&self.board, at) {
            if !leaves_in_check(&mut self.board, at, to) {
                self.board.set_flag(to, SquareFlags::MOVE_TO, true);
            }
        }

        trace!("selected {}", at);
        Ok(Response::Selected(at))
    }

    /// Moves the selection to `at`, whatever is there: an empty square, an
    /// enemy piece to take, a friendly piece to select instead, or a castling
    /// square for an unmoved king.
    pub fn move_to(&mut self, at: Coord) -> IntentResult {
        self.ensure_playable(at)?;
        let from = self.selected.ok_or(Rejection::NoSelection)?;
        let (color, kind) = self.selected_piece(from);
        match self.board.piece_at(at).map(|p| p.color) {
            Some(target) if target == color => self.select(at),
            Some(_) => self.target_occupied_square(at),
            None if kind == PieceKind::King
                && from.row == at.row
                && from.col_delta(at).abs() == 2 =>
            {
                self.castle(at)
            }
            None => self.target_empty_square(at),
        }
    }

    /// Moves the selection onto the empty square `at`.
    pub fn target_empty_square(&mut self, at: Coord) -> IntentResult {
        self.ensure_playable(at)?;
        let from = self.selected.ok_or(Rejection::NoSelection)?;
        if !self.board.is_empty(at) {
            return Err(Rejection::Illegal);
        }

        self.check_legality(from, at)?;
        self.commit(Move::new(from, at), false)
            .map(Response::Moved)
    }

    /// Takes the enemy piece on `at` with the selection.
    pub fn target_occupied_square(&mut self, at: Coord) -> IntentResult {
        self.ensure_playable(at)?;
        let from = self.selected.ok_or(Rejection::NoSelection)?;
        let (color, _) = self.selected_piece(from);
        let (target, kind) = self
            .board
            .piece_at(at)
            .map(|p| (p.color, p.kind))
            .ok_or(Rejection::EmptySquare)?;
        if target == color {
            return Err(Rejection::OwnPiece);
        }

        // kings are mated, never taken
        if kind == PieceKind::King {
            return Err(Rejection::Illegal);
        }

        self.check_legality(from, at)?;
        self.commit(Move::new(from, at), false)
            .map(Response::Moved)
    }

    /// Castles the selected king onto `at`.
    ///
    /// The king must be unmoved and travel exactly two columns along its row,
    /// toward an unmoved rook of its color in that corner with nothing in
    /// between. The rook lands on the square the king crosses. If those
    /// conditions do not hold, this is an ordinary move attempt instead.
    pub fn castle(&mut self, at: Coord) -> IntentResult {
        self.ensure_playable(at)?;
        let from = self.selected.ok_or(Rejection::NoSelection)?;
        let rook_from = match self.castling_rook(from, at) {
            Some(rook) => rook,
            None => {
                trace!("castle to {} not available, trying a plain move", at);
                return if self.board.is_empty(at) {
                    self.target_empty_square(at)
                } else {
                    self.target_occupied_square(at)
                };
            }
        };

        let rook_to = Coord::new(from.row, (from.col + at.col) / 2);
        self.board
            .relocate(rook_from, rook_to)
            .expect("castling rook landing square is occupied");
        match self.commit(Move::new(from, at), true) {
            Ok(record) => {
                moves::mark_moved(&mut self.board, rook_to);
                Ok(Response::Moved(record))
            }
            Err(rejection) => {
                self.board
                    .relocate(rook_to, rook_from)
                    .expect("castling rook could not return to its corner");
                Err(rejection)
            }
        }
    }
}

//
// Move execution and bookkeeping
//

impl<O: GameObserver> Game<O> {
    fn ensure_playable(&self, at: Coord) -> Result<(), Rejection> {
        if self.outcome.is_decided() {
            return Err(Rejection::GameOver);
        }

        if !at.is_on_board() {
            return Err(Rejection::OffBoard);
        }

        Ok(())
    }

    fn selected_color(&self) -> Option<Color> {
        self.selected
            .and_then(|at| self.board.piece_at(at))
            .map(|p| p.color)
    }

    fn selected_piece(&self, from: Coord) -> (Color, PieceKind) {
        let piece = self
            .board
            .piece_at(from)
            .expect("invariant violated: selection points at an empty square");
        (piece.color, piece.kind)
    }

    fn check_legality(&self, from: Coord, to: Coord) -> Result<(), Rejection> {
        let piece = self
            .board
            .piece_at(from)
            .expect("invariant violated: selection points at an empty square");
        if !can_move_piece(&self.board, piece, to) {
            debug!("rejected {} {} -> {}: illegal", piece, from, to);
            return Err(Rejection::Illegal);
        }

        Ok(())
    }

    fn castling_rook(&self, from: Coord, to: Coord) -> Option<Coord> {
        let king = self.board.piece_at(from)?;
        if king.kind != PieceKind::King
            || king.initialized
            || from.row != to.row
            || from.col_delta(to).abs() != 2
        {
            return None;
        }

        let rook_col = if to.col < from.col { 0 } else { BOARD_SIZE - 1 };
        let rook_at = Coord::new(from.row, rook_col);
        let rook = self.board.piece_at(rook_at)?;
        if rook.kind != PieceKind::Rook || rook.color != king.color || rook.initialized {
            return None;
        }

        if !is_path_clear(&self.board, from, rook_at) {
            return None;
        }

        Some(rook_at)
    }

    /// Plays a move that already passed the legality evaluator. If the mover's
    /// king ends up in check the move is taken back and rejected.
    fn commit(&mut self, mov: Move, castle: bool) -> Result<MoveRecord, Rejection> {
        let side = self.side_to_move;
        let captured = self.board.remove_piece(mov.to).ok();
        self.board
            .relocate(mov.from, mov.to)
            .expect("invalid move: no piece at source square");

        if checker(&self.board, side).is_some() {
            self.board
                .relocate(mov.to, mov.from)
                .expect("could not take back a move");
            if let Some(piece) = captured {
                self.board
                    .add_piece(mov.to, piece)
                    .expect("could not restore a captured piece");
            }

            debug!("rejected {}: leaves {} king in check", mov, side);
            return Err(Rejection::LeavesKingInCheck);
        }

        Ok(self.finish_move(mov, captured, castle))
    }

    /// Post-move bookkeeping. Publishes, in order, the turn change, the check
    /// state of the new side to move, and the winner if that side is mated.
    fn finish_move(&mut self, mov: Move, captured: Option<Piece>, castle: bool) -> MoveRecord {
        let mover = self.side_to_move;
        moves::mark_moved(&mut self.board, mov.to);
        let piece = self
            .board
            .piece_at(mov.to)
            .map(|p| p.kind)
            .expect("moved piece vanished");
        let captured_kind = captured.as_ref().map(|p| p.kind);
        if let Some(piece) = captured {
            self.captured.push(piece);
        }

        self.side_to_move = mover.toggle();
        self.clear_selection();
        if piece == PieceKind::Pawn && mov.from.row_delta(mov.to).abs() == 2 {
            if let Some(pawn) = self.board.piece_at_mut(mov.to) {
                pawn.jump = true;
            }
            self.board.set_flag(mov.to, SquareFlags::JUMP, true);
        }

        info!("{} played {}", mover, mov);
        self.observer.turn_changed(self.side_to_move);

        let check = self.update_check();
        let king = self
            .board
            .king(self.side_to_move)
            .expect("invariant violated: no king on the board");
        self.observer.king_in_check(king, check);

        let checkmate = check && is_checkmate(&mut self.board, self.side_to_move);
        if checkmate {
            info!("checkmate, {} wins", mover);
            self.outcome = Outcome::Winner(mover);
            self.observer.game_over(Some(mover));
        }

        MoveRecord {
            mov,
            color: mover,
            piece,
            captured: captured_kind,
            castle,
            check,
            checkmate,
        }
    }

    /// Recomputes whether the side to move is in check and moves the check
    /// marker to its king.
    fn update_check(&mut self) -> bool {
        let side = self.side_to_move;
        let king = self
            .board
            .king(side)
            .expect("invariant violated: no king on the board");
        self.checker = checker(&self.board, side);
        self.board.clear_flag(SquareFlags::CHECK);
        self.board
            .set_flag(king, SquareFlags::CHECK, self.checker.is_some());
        if let Some(from) = self.checker {
            debug!("{} king on {} is checked from {}", side, king, from);
        }

        self.checker.is_some()
    }

    fn clear_selection(&mut self) {
        self.board.clear_selection_flags();
        self.selected = None;
    }
}
