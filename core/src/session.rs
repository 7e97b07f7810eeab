use alloc::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::*;

pub const LOSS_MESSAGE: &str = "Game Over!";
pub const WIN_MESSAGE: &str = "You Win!";

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> NotStarted (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No board yet, waiting for a difficulty
    NotStarted,
    InProgress,
    /// Game ended and player won
    Won,
    /// Game ended and player lost
    Lost,
}

impl GamePhase {
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Message shown once the game has ended, empty before
    pub const fn end_message(self) -> &'static str {
        match self {
            Self::Won => WIN_MESSAGE,
            Self::Lost => LOSS_MESSAGE,
            Self::NotStarted | Self::InProgress => "",
        }
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// The active game, from difficulty selection until reset.
///
/// The grid sits behind an [`Arc`]: [`GameSession::grid_snapshot`] hands out an immutable copy
/// that later actions never touch, every action writes through [`Arc::make_mut`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSession")]
pub struct GameSession {
    config: Option<GameConfig>,
    grid: Option<Arc<Grid>>,
    mines_left: i32,
    phase: GamePhase,
}

#[derive(Deserialize)]
struct RawSession {
    config: Option<GameConfig>,
    grid: Option<Arc<Grid>>,
    mines_left: i32,
    phase: GamePhase,
}

impl TryFrom<RawSession> for GameSession {
    type Error = GameError;

    /// A board exists exactly when the game has started, and it matches the config.
    fn try_from(raw: RawSession) -> Result<Self> {
        let started = raw.phase != GamePhase::NotStarted;
        match (&raw.config, &raw.grid) {
            (None, None) if !started => {}
            (Some(config), Some(grid)) if started => check_matches(*config, grid)?,
            _ => return Err(GameError::ConfigMismatch),
        }
        Ok(Self {
            config: raw.config,
            grid: raw.grid,
            mines_left: raw.mines_left,
            phase: raw.phase,
        })
    }
}

fn check_matches(config: GameConfig, grid: &Grid) -> Result<()> {
    if grid.size() == config.size() && grid.mine_count() == config.mines() {
        Ok(())
    } else {
        Err(GameError::ConfigMismatch)
    }
}

impl GameSession {
    /// Session waiting for a difficulty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session in progress on a random board.
    pub fn new_game(config: GameConfig, seed: u64) -> Self {
        let mut session = Self::new();
        session.start(config, seed);
        session
    }

    /// Session in progress on a prepared board, the config is taken from the board.
    pub fn from_grid(grid: Grid) -> Result<Self> {
        let config = GameConfig::new(grid.size(), grid.mine_count())?;
        let mut session = Self::new();
        session.install(config, grid);
        Ok(session)
    }

    /// Starts a random board, ignored unless the session is not started.
    pub fn start(&mut self, config: GameConfig, seed: u64) {
        if self.can_start() {
            let grid = RandomBoardGenerator::new(seed).generate(config);
            self.install(config, grid);
        }
    }

    /// Starts a board built by `generator`, ignored unless the session is not started.
    ///
    /// Fails without changing the session if the board does not match `config`.
    pub fn start_with<G: BoardGenerator>(
        &mut self,
        config: GameConfig,
        generator: G,
    ) -> Result<()> {
        if self.can_start() {
            let grid = generator.generate(config);
            check_matches(config, &grid)?;
            self.install(config, grid);
        }
        Ok(())
    }

    fn can_start(&self) -> bool {
        if self.phase != GamePhase::NotStarted {
            log::trace!("Ignoring start while {:?}", self.phase);
            return false;
        }
        true
    }

    fn install(&mut self, config: GameConfig, grid: Grid) {
        self.mines_left = grid.mine_count().into();
        self.config = Some(config);
        self.grid = Some(Arc::new(grid));
        self.set_phase(GamePhase::InProgress);
    }

    /// Back to a fresh not-started session, from any phase.
    pub fn reset(&mut self) {
        log::debug!("Resetting session from {:?}", self.phase);
        *self = Self::new();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> Option<GameConfig> {
        self.config
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_deref()
    }

    /// Shared view of the current board, unaffected by later actions.
    pub fn grid_snapshot(&self) -> Option<Arc<Grid>> {
        self.grid.clone()
    }

    /// Configured mines minus placed flags, negative when over-flagged
    pub fn mines_left(&self) -> i32 {
        self.mines_left
    }

    /// Empty until the game ends
    pub fn end_message(&self) -> &'static str {
        self.phase.end_message()
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(grid) = self.active_grid() else {
            return RevealOutcome::NoChange;
        };

        let outcome = grid.reveal(coords);
        log::debug!("Reveal at {:?}: {:?}", coords, outcome);

        match outcome {
            RevealOutcome::HitMine => self.set_phase(GamePhase::Lost),
            RevealOutcome::Won => self.set_phase(GamePhase::Won),
            RevealOutcome::NoChange | RevealOutcome::Revealed => {}
        }
        outcome
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        let Some(grid) = self.active_grid() else {
            return FlagOutcome::NoChange;
        };

        let outcome = grid.toggle_flag(coords);
        self.mines_left += outcome.counter_delta();
        log::debug!(
            "Flag at {:?}: {:?}, mines left: {}",
            coords,
            outcome,
            self.mines_left
        );
        outcome
    }

    /// Writable grid while in progress, detached from any outstanding snapshot.
    fn active_grid(&mut self) -> Option<&mut Grid> {
        if !self.phase.is_in_progress() {
            log::trace!("Ignoring action while {:?}", self.phase);
            return None;
        }
        self.grid.as_mut().map(Arc::make_mut)
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}
