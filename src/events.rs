// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Notifications from the turn engine to whatever is presenting the game.
//!
//! Each notification fires once per committed state change, in the order
//! board mutation, turn change, check, game over.
use std::fmt;

use crate::types::{Color, Coord};

pub trait GameObserver {
    fn turn_changed(&mut self, _side_to_move: Color) {}
    fn king_in_check(&mut self, _king: Coord, _in_check: bool) {}
    fn game_over(&mut self, _winner: Option<Color>) {}
}

/// Observer that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullObserver;
impl GameObserver for NullObserver {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    TurnChanged { side: Color },
    KingInCheck { king: Coord, in_check: bool },
    GameOver { winner: Option<Color> },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameEvent::TurnChanged { side } => write!(f, "turn {}", side),
            GameEvent::KingInCheck { king, in_check } => {
                if *in_check {
                    write!(f, "check {}", king)
                } else {
                    write!(f, "safe {}", king)
                }
            }
            GameEvent::GameOver { winner: Some(winner) } => write!(f, "gameover {}", winner),
            GameEvent::GameOver { winner: None } => write!(f, "gameover none"),
        }
    }
}

/// Observer that records every notification in order.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hands back everything recorded so far and starts over.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::replace(&mut self.events, Vec::new())
    }
}

impl GameObserver for EventLog {
    fn turn_changed(&mut self, side: Color) {
        self.events.push(GameEvent::TurnChanged { side });
    }

    fn king_in_check(&mut self, king: Coord, in_check: bool) {
        self.events.push(GameEvent::KingInCheck { king, in_check });
    }

    fn game_over(&mut self, winner: Option<Color>) {
        self.events.push(GameEvent::GameOver { winner });
    }
}

impl<'a, O: GameObserver> GameObserver for &'a mut O {
    fn turn_changed(&mut self, side: Color) {
        (**self).turn_changed(side)
    }

    fn king_in_check(&mut self, king: Coord, in_check: bool) {
        (**self).king_in_check(king, in_check)
    }

    fn game_over(&mut self, winner: Option<Color>) {
        (**self).game_over(winner)
    }
}
