/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use anyhow::{bail, Context, Result};
use log::{debug, info};

use crate::{
    perft, splitperft, CountingEvaluator, EngineCommand, Evaluator, Position, Search,
    SearchConfig, SearchResult, BENCHMARK_POSITIONS, BENCH_DEPTH,
};

/// The Othello engine.
///
/// Executes one [`EngineCommand`] at a time, printing its output to stdout.
#[derive(Debug, Default)]
pub struct Engine {
    /// Atomic flag to determine whether a search is currently running.
    ///
    /// Shared with every search this engine starts; clearing it cancels the search.
    is_searching: Arc<AtomicBool>,
}

impl Engine {
    /// Constructs a new [`Engine`] instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Returns a handle to the flag shared with this engine's searches.
    ///
    /// Storing `false` into it makes an ongoing search return as soon as possible.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.is_searching)
    }

    /// Returns `true` if the engine is currently executing a search.
    pub fn is_searching(&self) -> bool {
        self.is_searching.load(Ordering::Relaxed)
    }

    /// Execute a single [`EngineCommand`].
    pub fn execute(&mut self, command: EngineCommand) -> Result<()> {
        match command {
            EngineCommand::Go {
                position,
                seconds,
                depth,
                nodes,
                evaluator,
            } => {
                let mut config = SearchConfig::with_time_limit(seconds);

                // If supplied, set the max depth / node allowance
                if let Some(depth) = depth {
                    config.max_depth = depth;
                }

                if let Some(nodes) = nodes {
                    config.max_nodes = nodes;
                }

                let res = self.search(position, evaluator.evaluator(), config)?;
                println!("{}", res.bestmove);
            }

            EngineCommand::Moves { position } => self.moves(&position),

            EngineCommand::Display { position } => println!("{position}"),

            EngineCommand::Eval {
                position,
                evaluator,
            } => println!("{}", evaluator.evaluator().evaluate(&position)),

            EngineCommand::Perft {
                position,
                depth,
                split,
            } => self.perft(&position, depth, split),

            EngineCommand::Bench { depth, pretty } => self.bench(depth, pretty)?,
        };

        Ok(())
    }

    /// Searches `position` on the current thread, returning the best action found within `config`'s limits.
    ///
    /// Fails if another search is already running on this engine.
    pub fn search(
        &mut self,
        position: Position,
        evaluator: &dyn Evaluator,
        config: SearchConfig,
    ) -> Result<SearchResult> {
        // Cannot start a search if one is already running
        if self.is_searching() {
            bail!("{} is already running a search", self.name());
        }
        self.set_is_searching(true);

        let starttime = Instant::now();
        let res = Search::new(position, evaluator, self.stop_flag(), config).start();

        // The search clears the flag itself, but it may have exited early
        self.set_is_searching(false);

        info!(
            "Searched to depth {} in {}ms",
            res.depth,
            starttime.elapsed().as_millis()
        );

        Ok(res)
    }

    /// Executes the `moves` command, printing every legal action in generation order.
    fn moves(&self, position: &Position) {
        let moves = position.legal_moves();

        // If there are no placements, the only action is to pass
        let moves_string = if moves.is_empty() {
            String::from("pass")
        } else {
            // Otherwise, join them by comma-space
            moves
                .into_iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        println!("{moves_string}");
    }

    /// Executes the `perft` command, printing the total node count.
    fn perft(&self, position: &Position, depth: usize, split: bool) {
        let starttime = Instant::now();

        let nodes = if split {
            let nodes = splitperft(position, depth);
            println!();
            nodes
        } else {
            perft(position, depth)
        };

        let elapsed = starttime.elapsed();
        debug!(
            "perft({depth}) took {}ms ({} nps)",
            elapsed.as_millis(),
            (nodes as f64 / elapsed.as_secs_f64()) as u64
        );

        println!("{nodes}");
    }

    /// Execute the `bench` command, running a benchmark of a fixed search on a series of positions and displaying the results.
    fn bench(&mut self, depth: Option<usize>, pretty: bool) -> Result<()> {
        // Set up the benchmarking config
        let config = SearchConfig::with_depth(depth.unwrap_or(BENCH_DEPTH));

        let num_tests = BENCHMARK_POSITIONS.len();
        let mut nodes = 0;
        let starttime = Instant::now();

        // Run a fixed search on each position
        for (i, encoding) in BENCHMARK_POSITIONS.into_iter().enumerate() {
            let position: Position = encoding
                .parse()
                .with_context(|| format!("Invalid benchmark position {encoding:?}"))?;

            info!("Benchmark position {}/{num_tests}: {encoding}", i + 1);

            let res = self.search(position, &CountingEvaluator, config)?;
            nodes += res.nodes;
        }

        // Compute results
        let elapsed = starttime.elapsed();
        let nps = (nodes as f64 / elapsed.as_secs_f64()) as u64;
        let m_nps = nodes as f64 / elapsed.as_secs_f64() / 1_000_000.0;
        let ms = elapsed.as_millis();

        if pretty {
            // Display the results in a nice table
            println!("+--- Benchmark Complete ---+");
            println!("| time (ms)  : {ms:<12}|");
            println!("| nodes      : {nodes:<12}|");
            println!("| nps        : {nps:<12}|");
            println!("| Mnps       : {m_nps:<12.2}|");
            println!("+--------------------------+");
        } else {
            println!("{nodes} nodes {nps} nps");
        }

        Ok(())
    }

    /// Sets the search flag to signal that the engine is starting/stopping a search.
    fn set_is_searching(&mut self, status: bool) {
        self.is_searching.store(status, Ordering::Relaxed);
    }
}
