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
    time::{Duration, Instant},
};

use log::{debug, info};
use thiserror::Error;

use crate::{Action, Evaluator, MoveList, Position, Score, MAX_DEPTH};

/// Reasons a search can be cut short before finishing its current depth.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCancelled {
    #[error("exceeded the search deadline")]
    Deadline,

    #[error("cancelled by external command")]
    Stopped,

    #[error("exceeded node allowance of {0} nodes")]
    NodeLimit(u64),
}

/// The result of a search, containing the best action found, its score, and some statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchResult {
    /// Best action found during the search.
    pub bestmove: Action,

    /// Minimax value of `bestmove`, from White's perspective.
    ///
    /// Meaningless if `depth` is `0`.
    pub score: Score,

    /// Deepest depth that completed in time.
    ///
    /// A depth of `0` means no search completed, and `bestmove` is only a fallback:
    /// the first legal placement, or a pass if there was none.
    pub depth: usize,

    /// Number of nodes visited, across every iteration.
    pub nodes: u64,

    /// Number of times the evaluator was invoked, across every iteration.
    pub leaves: u64,
}

impl SearchResult {
    /// A result that has not been backed by any search.
    #[inline(always)]
    fn fallback(bestmove: Action) -> Self {
        Self {
            bestmove,
            score: Score::DRAW,
            depth: 0,
            nodes: 0,
            leaves: 0,
        }
    }
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Maximum depth to execute the search.
    pub max_depth: usize,

    /// Node allowance.
    ///
    /// If the search exceeds this many nodes, it will exit as quickly as possible.
    pub max_nodes: u64,

    /// Wall-clock instant by which the search must have produced its answer.
    ///
    /// During *any* point in the search, if this instant has passed, the search will cancel.
    pub deadline: Option<Instant>,
}

impl SearchConfig {
    /// A config that permits searching for `limit`, starting now.
    ///
    /// A limit too large to represent is treated as no limit at all.
    #[inline(always)]
    pub fn with_time_limit(limit: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(limit),
            ..Default::default()
        }
    }

    /// A config that permits searching until `deadline`.
    #[inline(always)]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..Default::default()
        }
    }

    /// A config that searches up to `max_depth` with no time limit.
    #[inline(always)]
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Returns `true` if the deadline, if any, has passed.
    #[inline(always)]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

impl Default for SearchConfig {
    /// A default [`SearchConfig`] will permit an "infinite" search.
    ///
    /// It is bounded only by [`MAX_DEPTH`], which no game can outlast.
    #[inline(always)]
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            max_nodes: u64::MAX,
            deadline: None,
        }
    }
}

/// Executes a search on the provided position.
pub struct Search<'a> {
    /// The position to search on.
    ///
    /// This position will be copied when actions are applied to it.
    position: Position,

    /// Static evaluation used at the leaves of the tree.
    evaluator: &'a dyn Evaluator,

    /// An atomic flag to determine if the search should be cancelled at any time.
    ///
    /// If this is ever `false`, the search will exit as soon as possible.
    is_searching: Arc<AtomicBool>,

    /// Configuration variables for this instance of the search.
    config: SearchConfig,

    nodes: u64,

    leaves: u64,

    /// Set whenever the current iteration stops a line because of depth rather than the end of the game.
    reached_horizon: bool,
}

impl<'a> Search<'a> {
    /// Construct a new [`Search`] instance to execute on the provided [`Position`].
    #[inline(always)]
    pub fn new(
        position: Position,
        evaluator: &'a dyn Evaluator,
        is_searching: Arc<AtomicBool>,
        config: SearchConfig,
    ) -> Self {
        Self {
            position,
            evaluator,
            is_searching,
            config,
            nodes: 0,
            leaves: 0,
            reached_horizon: false,
        }
    }

    /// Number of nodes visited so far.
    #[inline(always)]
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Number of leaves evaluated so far.
    #[inline(always)]
    pub const fn leaves(&self) -> u64 {
        self.leaves
    }

    /// Start the search, returning the best action it could find.
    ///
    /// This is the entrypoint of the search. It always produces an action,
    /// even if the limits don't permit a single depth to be searched.
    pub fn start(mut self) -> SearchResult {
        debug!(
            "Starting search on {} with the {} evaluator",
            self.position.to_encoding(),
            self.evaluator.name()
        );

        let res = self.iterative_deepening();

        info!(
            "Chose {} with score {} at depth {} ({} nodes, {} leaves)",
            res.bestmove, res.score, res.depth, res.nodes, res.leaves
        );

        // Search has concluded, alert other threads that we are no longer searching
        self.is_searching.store(false, Ordering::Relaxed);

        res
    }

    /// Performs iterative deepening on the Search's position.
    ///
    /// Searches at depth `1`, then `2`, and so on, keeping the result of the deepest search that completed in time.
    /// Deepening stops once any limit is reached, or once a completed depth never had to stop a line early,
    /// since searching deeper could not change the answer.
    fn iterative_deepening(&mut self) -> SearchResult {
        let moves = self.position.legal_moves();

        // Nothing to decide, so don't bother searching.
        let Some(&first) = moves.first() else {
            info!("No legal placements available; passing");
            return SearchResult::fallback(Action::Pass);
        };

        // Until a depth completes, the first legal placement is the best we've got.
        let mut res = SearchResult::fallback(first);

        // Start at depth 1 because a search at depth 0 makes no sense
        let mut depth = 1;

        while depth <= self.config.max_depth {
            // Don't start a depth that has no chance of finishing.
            if let Err(e) = self.check_limits() {
                info!("Not starting depth {depth}: {e}");
                break;
            }

            match self.alpha_beta(depth) {
                Ok((bestmove, score)) => {
                    // Finished, but too late for the caller to use it.
                    if self.config.is_expired() {
                        info!("Depth {depth} finished after the deadline; discarding it");
                        break;
                    }

                    res = SearchResult {
                        bestmove,
                        score,
                        depth,
                        nodes: self.nodes,
                        leaves: self.leaves,
                    };

                    debug!(
                        "Completed depth {depth}: {bestmove} with score {score} ({} nodes, {} leaves)",
                        self.nodes, self.leaves
                    );

                    if !self.reached_horizon {
                        debug!("Every line at depth {depth} reached the end of the game");
                        break;
                    }
                }

                // If the search returned an error, it was cancelled, so exit the iterative deepening loop.
                Err(e) => {
                    info!("Search cancelled during depth {depth}: {e}");
                    if res.depth == 0 {
                        info!("No depth completed; falling back to {}", res.bestmove);
                    } else {
                        info!(
                            "Falling back to result from depth {}: {} with score {}",
                            res.depth, res.bestmove, res.score
                        );
                    }
                    break;
                }
            }

            depth += 1;
        }

        // Report everything this search did, not only what the accepted depth did.
        res.nodes = self.nodes;
        res.leaves = self.leaves;
        res
    }

    /// Searches the position to `depth` plies with alpha-beta pruning,
    /// returning the best action for the side to move and its minimax value.
    ///
    /// A `depth` of `0` is treated as `1`, since the root must always choose an action.
    #[inline(always)]
    pub fn alpha_beta(&mut self, depth: usize) -> Result<(Action, Score), SearchCancelled> {
        self.search_root::<true>(depth)
    }

    /// Searches the position to `depth` plies visiting every node, without any pruning.
    ///
    /// Produces the same value as [`Self::alpha_beta`]; it exists as a reference to check pruning against.
    #[inline(always)]
    pub fn minimax(&mut self, depth: usize) -> Result<(Action, Score), SearchCancelled> {
        self.search_root::<false>(depth)
    }

    /// Checks whether the search is allowed to continue.
    fn check_limits(&self) -> Result<(), SearchCancelled> {
        // Condition 1: The deadline has passed
        if self.config.is_expired() {
            return Err(SearchCancelled::Deadline);
        }

        // Condition 2: The search was stopped by an external factor
        if !self.is_searching.load(Ordering::Relaxed) {
            return Err(SearchCancelled::Stopped);
        }

        // Condition 3: We've exceeded the maximum amount of nodes we're allowed to search
        if self.nodes >= self.config.max_nodes {
            return Err(SearchCancelled::NodeLimit(self.config.max_nodes));
        }

        Ok(())
    }

    /// Like a regular search node, except it remembers which action produced the best value.
    ///
    /// Ties keep the earliest action in generation order.
    fn search_root<const PRUNE: bool>(
        &mut self,
        depth: usize,
    ) -> Result<(Action, Score), SearchCancelled> {
        self.check_limits()?;
        self.nodes += 1;
        self.reached_horizon = false;

        let depth = depth.max(1);
        let position = self.position;
        let maximizing = position.side_to_move().is_maximizing();

        let mut actions = position.legal_moves();
        if actions.is_empty() {
            actions.push(Action::Pass);
        }

        let (mut alpha, mut beta) = (-Score::INF, Score::INF);
        let mut best = (actions[0], if maximizing { alpha } else { beta });
        let mut found = false;

        for action in actions {
            let child = make(&position, action);
            let score = self.search_node::<PRUNE>(&child, depth - 1, alpha, beta)?;

            let improves = if maximizing {
                score > best.1
            } else {
                score < best.1
            };

            if !found || improves {
                best = (action, score);
                found = true;
            }

            if PRUNE {
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }

                if alpha >= beta {
                    break;
                }
            }
        }

        Ok(best)
    }

    /// Primary location of search logic.
    ///
    /// A plain max/min search, since scores are always from White's perspective.
    /// If `PRUNE` is set, subtrees that cannot affect the result are skipped.
    fn search_node<const PRUNE: bool>(
        &mut self,
        position: &Position,
        depth: usize,
        mut alpha: Score,
        mut beta: Score,
    ) -> Result<Score, SearchCancelled> {
        self.check_limits()?;
        self.nodes += 1;

        // If we've reached the horizon, evaluate the position
        if depth == 0 {
            if !self.reached_horizon && !position.is_game_over() {
                self.reached_horizon = true;
            }
            return Ok(self.evaluate(position));
        }

        let moves: MoveList = position.legal_moves();

        if moves.is_empty() {
            // Neither side can move, so the game has ended
            if position.is_game_over() {
                return Ok(self.evaluate(position));
            }

            // Forced pass; it still costs a ply
            let child = make(position, Action::Pass);
            return self.search_node::<PRUNE>(&child, depth - 1, alpha, beta);
        }

        let maximizing = position.side_to_move().is_maximizing();
        let mut best = if maximizing { -Score::INF } else { Score::INF };

        for action in moves {
            let child = make(position, action);
            let score = self.search_node::<PRUNE>(&child, depth - 1, alpha, beta)?;

            if maximizing {
                best = best.max(score);
            } else {
                best = best.min(score);
            }

            if PRUNE {
                if maximizing {
                    alpha = alpha.max(best);
                } else {
                    beta = beta.min(best);
                }

                if alpha >= beta {
                    break;
                }
            }
        }

        Ok(best)
    }

    #[inline(always)]
    fn evaluate(&mut self, position: &Position) -> Score {
        self.leaves += 1;
        self.evaluator.evaluate(position)
    }
}

/// Copy-make the position after `action`, which must have come from the move generator.
#[inline(always)]
fn make(position: &Position, action: Action) -> Position {
    position.with_action(action).unwrap_or_else(|err| {
        panic!(
            "Generated action {action} is illegal on {}: {err}",
            position.to_encoding()
        )
    })
}

/// Runs a complete search on `position` with a fresh stop flag, returning the best action found.
///
/// # Example
/// ```
/// # use othello_engine::{find_best_move, CountingEvaluator, Position, SearchConfig};
/// let res = find_best_move(&Position::new(), &CountingEvaluator, SearchConfig::with_depth(3));
/// assert_eq!(res.depth, 3);
/// assert_eq!(res.bestmove.to_string(), "(3,5)");
/// ```
pub fn find_best_move(
    position: &Position,
    evaluator: &dyn Evaluator,
    config: SearchConfig,
) -> SearchResult {
    let is_searching = Arc::new(AtomicBool::new(true));
    Search::new(*position, evaluator, is_searching, config).start()
}
