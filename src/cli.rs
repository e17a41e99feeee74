// src/cli.rs
use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::directory::LiveDirectory;
use crate::params::{self, Params, TOP_N, YEAR_MAX, YEAR_MIN};
use crate::progress::Progress;
use crate::runner::{self, RunOutcome};

/// Console progress sink: per-letter status lines during a live scrape.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn letter_done(&mut self, letter: char) {
        println!("Done processing {letter}...");
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    println!("{}", include_str!("menu.txt"));

    let mode = match prompt_line()?.parse::<u32>() {
        Ok(m) => m,
        Err(_) => bail_invalid(),
    };
    let Some(mut params) = Params::from_mode(mode) else {
        bail_invalid();
    };
    println!("Running under mode {mode}");

    if Params::wants_year(mode) {
        println!("Please enter a class year ({YEAR_MIN}-{YEAR_MAX}):");
        match prompt_line()?.parse::<u16>() {
            Ok(year) if params::year_in_range(year) => {
                println!("Filtering by Class of {year}");
                params.year = Some(year);
            }
            _ => bail_invalid(),
        }
    }

    let dir = LiveDirectory::new();
    let mut progress = ConsoleProgress;
    let outcome = runner::run(&dir, &params, Some(&mut progress))?;
    report(&outcome);
    Ok(())
}

fn report(outcome: &RunOutcome) {
    if outcome.incomplete {
        eprintln!(
            "Warning: some branches could not be resolved; \
             counts below are incomplete. See commonality.log."
        );
    }

    for listing in &outcome.listings {
        let shown = listing.entries.len().min(TOP_N);
        println!("\n{} (top {shown}):", listing.title);
        for (i, (name, count)) in listing.entries.iter().take(TOP_N).enumerate() {
            println!("{}: {} ({})", i + 1, name, count);
        }
    }

    if !outcome.files.is_empty() {
        let names: Vec<String> = outcome
            .files
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        println!("\nThis information is also stored in: {}", names.join(", "));
    }
}

fn prompt_line() -> io::Result<String> {
    io::stdout().flush()?;
    let mut line = s!();
    io::stdin().lock().read_line(&mut line)?;
    Ok(s!(line.trim()))
}

fn bail_invalid() -> ! {
    println!("Invalid input. Exiting.");
    std::process::exit(1);
}
