/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::process::ExitCode;

use clap::Parser;
use othello_engine::{Cli, Engine};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // `RUST_LOG` always wins; `--verbose` only changes the fallback.
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let command = match cli.into_command() {
        Ok(command) => command,
        Err(e) => e.exit(),
    };

    let mut engine = Engine::new();
    if let Err(e) = engine.execute(command) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
