//! Game engine - the turn state machine
//!
//! `GameState` ties the core pieces together: grid, RNG, cluster/move caches,
//! score, and the phase machine that sequences swap -> match -> clear ->
//! shift -> rematch cycles. It is driven entirely by `tick(elapsed_ms)` plus
//! discrete intents; presentation layers poll the read accessors each frame
//! and never mutate anything.
//!
//! Cluster and move sets are recomputed only when the grid changes and cached
//! here. Every path back into `Ready` refreshes both caches first, so a
//! poller can never observe a stale set.

use log::{debug, info};

use crate::core::clusters::find_clusters;
use crate::core::moves::find_moves;
use crate::core::resolve::{generate, remove_clusters, shift_tiles};
use crate::core::scoring::total_points;
use crate::core::{Grid, SimpleRng};
use crate::types::{Cluster, GameConfig, GameError, SwapMove, TilePos};

/// Player-visible phase of the turn machine.
///
/// Each animating variant owns the data it needs; the pending swap lives in
/// the phase rather than beside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for player or assist-bot input.
    Ready,
    /// The requested swap is animating; the grid is not yet touched.
    SwapAnimating { swap: SwapMove },
    /// The swap produced nothing and is animating back; the grid currently
    /// holds the swapped tokens.
    RewindAnimating { swap: SwapMove },
    /// Detected clusters are highlighted before they are scored and cleared.
    ResolvingClear,
    /// Tiles are falling into cleared space before the refill lands.
    ResolvingShift,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    rng: SimpleRng,
    phase: Phase,
    /// Elapsed time in the current phase.
    phase_time_ms: u32,
    /// Elapsed time since the assist bot last acted (only runs in `Ready`).
    assist_time_ms: u32,
    clusters: Vec<Cluster>,
    moves: Vec<SwapMove>,
    score: u32,
    game_over: bool,
    assist: bool,
    show_moves: bool,
}

impl GameState {
    /// Create a game with a freshly generated board.
    ///
    /// Fails only when generation exhausts its retry bound, which indicates
    /// an unplayable configuration (palette too small for the board).
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, GameError> {
        let mut state = Self {
            config,
            grid: Grid::new(config.columns, config.rows),
            rng: SimpleRng::new(seed),
            phase: Phase::Ready,
            phase_time_ms: 0,
            assist_time_ms: 0,
            clusters: Vec::new(),
            moves: Vec::new(),
            score: 0,
            game_over: false,
            assist: false,
            show_moves: false,
        };
        state.new_game()?;
        Ok(state)
    }

    /// Build a game over a prepared grid without generating a board.
    ///
    /// The grid is adopted as-is and the caches are computed from it. Used by
    /// tests and tools that need a known starting position.
    pub fn with_grid(config: GameConfig, grid: Grid, seed: u32) -> Self {
        let mut state = Self {
            config,
            grid,
            rng: SimpleRng::new(seed),
            phase: Phase::Ready,
            phase_time_ms: 0,
            assist_time_ms: 0,
            clusters: Vec::new(),
            moves: Vec::new(),
            score: 0,
            game_over: false,
            assist: false,
            show_moves: false,
        };
        state.refresh_clusters();
        state.refresh_moves();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Fraction of the current phase's animation window already elapsed,
    /// in 0.0..=1.0. `Ready` reports 0.
    pub fn phase_progress(&self) -> f32 {
        match self.phase {
            Phase::Ready => 0.0,
            _ => (self.phase_time_ms as f32 / self.config.phase_ms as f32).min(1.0),
        }
    }

    /// The swap currently animating (forward or rewinding), if any.
    pub fn pending_swap(&self) -> Option<SwapMove> {
        match self.phase {
            Phase::SwapAnimating { swap } | Phase::RewindAnimating { swap } => Some(swap),
            _ => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Clusters detected on the current grid (empty outside resolution).
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Legal moves for the current grid.
    ///
    /// Only meaningful in `Ready`; during resolution the set is refreshed
    /// when the grid settles.
    pub fn moves(&self) -> &[SwapMove] {
        &self.moves
    }

    pub fn assist_enabled(&self) -> bool {
        self.assist
    }

    pub fn show_moves(&self) -> bool {
        self.show_moves
    }

    /// Enable or disable the assist bot.
    pub fn set_assist(&mut self, enabled: bool) {
        self.assist = enabled;
        self.assist_time_ms = 0;
    }

    /// Enable or disable the legal-move hint overlay.
    pub fn set_show_moves(&mut self, enabled: bool) {
        self.show_moves = enabled;
    }

    /// Start a fresh game: reset score and the over-flag, regenerate the
    /// board in place, and return to `Ready`.
    ///
    /// Accepted in any phase; an in-flight animation is abandoned outright.
    pub fn new_game(&mut self) -> Result<(), GameError> {
        let attempts = generate(
            &mut self.grid,
            &mut self.rng,
            self.config.token_kinds,
            self.config.generation_attempts,
        )?;
        debug!("new game: board ready after {attempts} attempt(s)");

        self.score = 0;
        self.game_over = false;
        self.assist_time_ms = 0;
        self.enter_phase(Phase::Ready);
        self.refresh_clusters();
        self.refresh_moves();
        Ok(())
    }

    /// Request a swap of two tiles.
    ///
    /// Accepted only in `Ready` on a distinct, in-bounds, adjacent pair while
    /// the game is running. Anything else is rejected without touching any
    /// state. Acceptance starts the swap animation; the grid itself changes
    /// only when the animation window elapses.
    pub fn request_swap(&mut self, a: TilePos, b: TilePos) -> bool {
        if self.game_over || !matches!(self.phase, Phase::Ready) {
            return false;
        }
        if a == b || !a.is_adjacent(b) {
            return false;
        }
        if !self.grid.contains(a) || !self.grid.contains(b) {
            return false;
        }

        self.enter_phase(Phase::SwapAnimating {
            swap: SwapMove::new(a, b),
        });
        true
    }

    /// Advance the engine by `elapsed_ms` of simulated time.
    pub fn tick(&mut self, elapsed_ms: u32) {
        match self.phase {
            Phase::Ready => self.tick_ready(elapsed_ms),
            Phase::SwapAnimating { swap } => {
                if self.phase_elapsed(elapsed_ms) {
                    self.grid.swap_tokens(swap.a, swap.b);
                    self.refresh_clusters();
                    if self.clusters.is_empty() {
                        // Pointless swap: play it back.
                        self.enter_phase(Phase::RewindAnimating { swap });
                    } else {
                        self.enter_phase(Phase::ResolvingClear);
                    }
                    self.refresh_moves();
                }
            }
            Phase::RewindAnimating { swap } => {
                if self.phase_elapsed(elapsed_ms) {
                    self.grid.swap_tokens(swap.a, swap.b);
                    self.refresh_clusters();
                    self.refresh_moves();
                    self.enter_phase(Phase::Ready);
                }
            }
            Phase::ResolvingClear => {
                if self.phase_elapsed(elapsed_ms) {
                    if self.clusters.is_empty() {
                        self.enter_phase(Phase::Ready);
                    } else {
                        let points = total_points(&self.clusters);
                        self.score += points;
                        debug!(
                            "cleared {} cluster(s) for {points} points (total {})",
                            self.clusters.len(),
                            self.score
                        );
                        let clusters = std::mem::take(&mut self.clusters);
                        remove_clusters(&mut self.grid, &clusters);
                        self.enter_phase(Phase::ResolvingShift);
                    }
                }
            }
            Phase::ResolvingShift => {
                if self.phase_elapsed(elapsed_ms) {
                    shift_tiles(&mut self.grid, &mut self.rng, self.config.token_kinds);
                    self.refresh_clusters();
                    self.refresh_moves();
                    if self.clusters.is_empty() {
                        self.enter_phase(Phase::Ready);
                    } else {
                        // Cascade: the refill lined up new matches.
                        self.enter_phase(Phase::ResolvingClear);
                    }
                }
            }
        }
    }

    fn tick_ready(&mut self, elapsed_ms: u32) {
        if !self.game_over && self.moves.is_empty() {
            info!("no moves left, game over at {} points", self.score);
            self.game_over = true;
        }
        if self.game_over || !self.assist {
            self.assist_time_ms = 0;
            return;
        }

        // Assist bot: after one animation window of idling, play a uniformly
        // random legal move through the normal intent path.
        self.assist_time_ms += elapsed_ms;
        if self.assist_time_ms >= self.config.phase_ms && !self.moves.is_empty() {
            self.assist_time_ms = 0;
            let mv = self.moves[self.rng.pick_index(self.moves.len())];
            self.request_swap(mv.a, mv.b);
        }
    }

    /// Accumulate phase time; true once the animation window has elapsed.
    fn phase_elapsed(&mut self, elapsed_ms: u32) -> bool {
        self.phase_time_ms += elapsed_ms;
        self.phase_time_ms >= self.config.phase_ms
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.phase_time_ms = 0;
    }

    fn refresh_clusters(&mut self) {
        self.clusters = find_clusters(&self.grid);
    }

    fn refresh_moves(&mut self) {
        self.moves = find_moves(&mut self.grid);
    }
}
