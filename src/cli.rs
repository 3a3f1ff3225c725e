/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Duration;

use clap::{
    builder::PossibleValue, error::ErrorKind, CommandFactory, Parser, Subcommand, ValueEnum,
};

use crate::{CountingEvaluator, Evaluator, MobilityEvaluator, Position, PositionParseError};

/// Command-line interface of the engine.
///
/// Either a subcommand, or the bare `<POSITION> <SECONDS>` form, which is shorthand for `go`.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<EngineCommand>,

    /// Position to search, as a 65-character encoding or `startpos`.
    #[arg(value_parser = parse_position, requires = "seconds")]
    pub position: Option<Position>,

    /// Number of seconds the search may take.
    #[arg(value_parser = parse_seconds)]
    pub seconds: Option<Duration>,

    /// If set, log search progress to stderr unless `RUST_LOG` says otherwise.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Resolves the bare `<POSITION> <SECONDS>` form into an [`EngineCommand::Go`].
    pub fn into_command(self) -> Result<EngineCommand, clap::Error> {
        match (self.command, self.position, self.seconds) {
            (Some(command), _, _) => Ok(command),

            (None, Some(position), Some(seconds)) => Ok(EngineCommand::Go {
                position,
                seconds,
                depth: None,
                nodes: None,
                evaluator: EvaluatorChoice::default(),
            }),

            _ => Err(Self::command().error(
                ErrorKind::MissingRequiredArgument,
                "expected a subcommand, or a <POSITION> and <SECONDS> to search",
            )),
        }
    }
}

/// A command to be sent to the engine.
#[derive(Debug, Clone, Subcommand)]
#[command(rename_all = "lower")]
pub enum EngineCommand {
    /// Search a position for the best action, printing it as `(row,col)` or `pass`.
    Go {
        /// Position to search, as a 65-character encoding or `startpos`.
        #[arg(value_parser = parse_position)]
        position: Position,

        /// Number of seconds the search may take.
        #[arg(value_parser = parse_seconds)]
        seconds: Duration,

        /// Override the maximum depth of the search.
        #[arg(short, long, required = false)]
        depth: Option<usize>,

        /// Stop searching after this many nodes.
        #[arg(short, long, required = false)]
        nodes: Option<u64>,

        /// Static evaluation used at the leaves of the search.
        #[arg(short, long, value_enum, default_value_t)]
        evaluator: EvaluatorChoice,
    },

    /// Shows all legal actions in a position.
    Moves {
        #[arg(value_parser = parse_position)]
        position: Position,
    },

    /// Print a visual representation of a position.
    #[command(alias = "d")]
    Display {
        #[arg(value_parser = parse_position)]
        position: Position,
    },

    /// Print a static evaluation of a position.
    Eval {
        #[arg(value_parser = parse_position)]
        position: Position,

        /// Static evaluation to apply.
        #[arg(short, long, value_enum, default_value_t)]
        evaluator: EvaluatorChoice,
    },

    /// Performs a perft on a position at the supplied depth, printing total node count.
    Perft {
        #[arg(value_parser = parse_position)]
        position: Position,

        depth: usize,

        /// If set, the node count below each root action is printed as well.
        #[arg(short, long, default_value = "false")]
        split: bool,
    },

    /// Run a benchmark with the provided parameters.
    Bench {
        /// If set, the benchmarking results will be printed in a well-formatted table.
        #[arg(short, long, default_value = "false")]
        pretty: bool,

        /// Override the default benchmark depth.
        #[arg(short, long, required = false)]
        depth: Option<usize>,
    },
}

/// The evaluators selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvaluatorChoice {
    #[default]
    Counting,
    Mobility,
}

impl EvaluatorChoice {
    /// Fetches the [`Evaluator`] this choice refers to.
    pub fn evaluator(&self) -> &'static dyn Evaluator {
        match self {
            Self::Counting => &CountingEvaluator,
            Self::Mobility => &MobilityEvaluator,
        }
    }
}

impl ValueEnum for EvaluatorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Counting, Self::Mobility]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = match self {
            Self::Counting => PossibleValue::new("counting")
                .aliases(["count", "discs"])
                .help("White's discs minus Black's discs"),
            Self::Mobility => PossibleValue::new("mobility")
                .alias("mob")
                .help("White's legal moves minus Black's legal moves"),
        };

        Some(value)
    }
}

/// Parses a position encoding, accepting `startpos` for the standard starting position.
pub fn parse_position(s: &str) -> Result<Position, PositionParseError> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("startpos") {
        Ok(Position::new())
    } else {
        s.parse()
    }
}

/// Parses a strictly positive, finite number of seconds.
pub fn parse_seconds(s: &str) -> Result<Duration, String> {
    let seconds: f64 = s
        .trim()
        .parse()
        .map_err(|e| format!("{s:?} is not a number of seconds: {e}"))?;

    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(format!("seconds must be a positive number, got {s:?}"));
    }

    Duration::try_from_secs_f64(seconds).map_err(|e| format!("{s:?} is out of range: {e}"))
}
