// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Rules engine for two-player chess on an 8x8 board: piece geometry, line of
//! sight, legality, check, checkmate and castling, driven through a turn
//! engine that accepts select/move/castle/reset intents.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod board;
pub mod check;
pub mod checkmate;
pub mod console;
mod events;
mod game;
pub mod legality;
mod moves;
pub mod obstruction;
mod perft;
mod piece;
pub mod simulate;
mod snapshot;
mod square;
mod types;

pub use board::{Board, DiagramParseError, PieceList, PlacementError, START_DIAGRAM};
pub use events::{EventLog, GameEvent, GameObserver, NullObserver};
pub use game::{Game, IntentResult, MoveRecord, Rejection, Response};
pub use moves::{apply_move, legal_moves, Move};
pub use perft::perft;
pub use piece::Piece;
pub use snapshot::{BoardSnapshot, Occupant, Outcome, SquareSnapshot};
pub use square::{Square, SquareFlags};
pub use types::{Color, Coord, PieceKind, TableIndex, BOARD_SIZE, COLORS};
