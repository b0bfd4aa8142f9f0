// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::io;
use std::process;
use std::time::Instant;

use chess_rules::console::{ConsoleOptions, ConsoleServer};
use chess_rules::{perft, Board, Color, START_DIAGRAM};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a game through the text console on stdin/stdout")
                .arg(
                    Arg::with_name("json")
                        .help("Print responses, events and snapshots as JSON")
                        .long("--json"),
                )
                .arg(
                    Arg::with_name("seed")
                        .help("Seed for the random mover")
                        .value_name("SEED")
                        .long("--seed")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("perft")
                .about("Count the positions reachable from a board diagram")
                .arg(
                    Arg::with_name("DIAGRAM")
                        .help("Piece placement, rows listed from the eighth down")
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true)
                        .default_value("3"),
                )
                .arg(
                    Arg::with_name("black")
                        .help("Black moves first")
                        .long("--black"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("play", Some(matches)) => run_play(matches),
        ("perft", Some(matches)) => run_perft(matches),
        _ => unreachable!(),
    }
}

fn run_play(matches: &ArgMatches) -> ! {
    let seed = if matches.is_present("seed") {
        Some(value_t_or_exit!(matches, "seed", u64))
    } else {
        None
    };
    let options = ConsoleOptions {
        json: matches.is_present("json"),
        seed,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let server = ConsoleServer::new(options);
    if let Err(e) = server.run(stdin.lock(), stdout.lock()) {
        eprintln!("console error: {}", e);
        process::exit(1);
    }

    process::exit(0);
}

fn run_perft(matches: &ArgMatches) -> ! {
    let diagram = matches.value_of("DIAGRAM").unwrap_or(START_DIAGRAM);
    let depth = value_t_or_exit!(matches, "depth", u32);
    let side = if matches.is_present("black") {
        Color::Black
    } else {
        Color::White
    };
    let board = match Board::from_diagram(diagram) {
        Ok(board) => board,
        Err(e) => {
            println!("invalid diagram: {}", e);
            process::exit(1);
        }
    };

    println!("diagram: {}", diagram);
    println!("to move: {}", side);
    println!("depth:   {}", depth);
    println!();
    println!("{}", board);
    println!();
    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&board, side, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}
