// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A line-oriented text front end for the turn engine. Each input line is one
//! intent or query; the console answers on the writer and then prints every
//! notification the intent produced.
use std::convert::TryFrom;
use std::io::{self, BufRead, Write};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::events::EventLog;
use crate::game::{Game, IntentResult, MoveRecord, Rejection, Response};
use crate::types::Coord;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Print responses, notifications and snapshots as JSON lines.
    pub json: bool,
    /// Seed for the random mover. Drawn from the OS when absent.
    pub seed: Option<u64>,
}

pub struct ConsoleServer {
    game: Game<EventLog>,
    options: ConsoleOptions,
    rng: StdRng,
}

impl ConsoleServer {
    pub fn new(options: ConsoleOptions) -> ConsoleServer {
        ConsoleServer::with_game(Game::with_observer(EventLog::new()), options)
    }

    pub fn with_game(game: Game<EventLog>, options: ConsoleOptions) -> ConsoleServer {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        ConsoleServer { game, options, rng }
    }

    pub fn game(&self) -> &Game<EventLog> {
        &self.game
    }

    pub fn run<R, W>(mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            let components: Vec<_> = line.split_whitespace().collect();
            match components.split_first().unwrap_or((&"", &[])) {
                (&"", []) => {}
                (&"select", [sq]) => self.handle_intent(&mut writer, sq, |g, at| g.select(at))?,
                (&"move", [sq]) => self.handle_intent(&mut writer, sq, |g, at| g.move_to(at))?,
                (&"castle", [sq]) => self.handle_intent(&mut writer, sq, |g, at| g.castle(at))?,
                (&"reset", []) => {
                    self.game.reset();
                    self.flush_events(&mut writer)?;
                }
                (&"board", []) => write!(&mut writer, "{}", self.game.board())?,
                (&"snapshot", []) => {
                    let snapshot = self.game.snapshot();
                    self.write_json(&mut writer, &snapshot)?;
                }
                (&"moves", []) => self.handle_moves(&mut writer)?,
                (&"random", []) => self.handle_random(&mut writer)?,
                (&"quit", []) => break,
                _ => writeln!(&mut writer, "unrecognized command")?,
            }

            writer.flush()?;
        }

        Ok(())
    }

    fn handle_intent<W, F>(&mut self, w: &mut W, square: &str, intent: F) -> io::Result<()>
    where
        W: Write,
        F: FnOnce(&mut Game<EventLog>, Coord) -> IntentResult,
    {
        let at = match Coord::try_from(square) {
            Ok(at) => at,
            Err(()) => return writeln!(w, "invalid square"),
        };

        let result = intent(&mut self.game, at);
        self.write_result(w, result)
    }

    fn handle_moves<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        let moves = self.game.legal_moves();
        if self.options.json {
            return self.write_json(w, &moves);
        }

        let rendered: Vec<_> = moves.iter().map(|m| m.to_string()).collect();
        writeln!(w, "{}", rendered.join(" "))
    }

    fn handle_random<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        if self.game.outcome().is_decided() {
            return writeln!(w, "rejected: {}", Rejection::GameOver);
        }

        let moves = self.game.legal_moves();
        let mov = match moves.choose(&mut self.rng) {
            Some(&mov) => mov,
            None => return writeln!(w, "no moves"),
        };

        debug!("random mover picked {}", mov);
        let result = self
            .game
            .select(mov.from)
            .and_then(|_| self.game.move_to(mov.to));
        self.write_result(w, result)
    }

    fn write_result<W: Write>(&mut self, w: &mut W, result: IntentResult) -> io::Result<()> {
        match result {
            Ok(Response::Selected(at)) => writeln!(w, "selected {}", at)?,
            Ok(Response::Moved(record)) => self.write_record(w, &record)?,
            Err(rejection) => writeln!(w, "rejected: {}", rejection)?,
        }

        self.flush_events(w)
    }

    fn write_record<W: Write>(&self, w: &mut W, record: &MoveRecord) -> io::Result<()> {
        if self.options.json {
            return self.write_json(w, record);
        }

        write!(w, "moved {}", record.mov)?;
        if record.castle {
            write!(w, " castle")?;
        }
        if let Some(kind) = record.captured {
            write!(w, " takes {}", kind)?;
        }
        if record.checkmate {
            write!(w, " checkmate")?;
        } else if record.check {
            write!(w, " check")?;
        }

        writeln!(w)
    }

    fn flush_events<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        for event in self.game.observer_mut().drain() {
            if self.options.json {
                self.write_json(w, &event)?;
            } else {
                writeln!(w, "{}", event)?;
            }
        }

        Ok(())
    }

    fn write_json<W: Write, T: Serialize>(&self, w: &mut W, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut *w, value)?;
        writeln!(w)
    }
}
