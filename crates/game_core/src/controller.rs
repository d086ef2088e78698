use rand::{rngs::StdRng, SeedableRng};
use shared::{
    domain::{BoardLayout, CellIndex, Controls, GameSnapshot, MoveInterval, Phase},
    error::{validate_speed_factor, GameError},
    protocol::InputEvent,
};
use tracing::{debug, info, trace, warn};

use crate::{
    board::{BoardRenderer, DisplaySink},
    config::{GameSettings, SpeedFactors},
    position::choose_position,
    scheduler::{ManualScheduler, TickScheduler, TimerHandle},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running(TimerHandle),
    Paused,
}

/// Mutable game state. The move timer handle only exists inside the
/// running lifecycle, so "running" and "has a timer" cannot disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    position: Option<CellIndex>,
    lifecycle: Lifecycle,
    move_interval: MoveInterval,
    move_count: u64,
}

impl GameState {
    fn new(move_interval: MoveInterval) -> Self {
        Self {
            position: None,
            lifecycle: Lifecycle::Idle,
            move_interval,
            move_count: 0,
        }
    }

    pub fn position(&self) -> Option<CellIndex> {
        self.position
    }

    pub fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running(_))
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        match self.lifecycle {
            Lifecycle::Running(handle) => Some(handle),
            Lifecycle::Idle | Lifecycle::Paused => None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.lifecycle {
            Lifecycle::Idle => Phase::Idle,
            Lifecycle::Running(_) => Phase::Running,
            Lifecycle::Paused => Phase::Paused,
        }
    }

    pub fn move_interval(&self) -> MoveInterval {
        self.move_interval
    }

    pub fn move_count(&self) -> u64 {
        self.move_count
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(MoveInterval::default())
    }
}

/// Drives the token around the board.
///
/// The controller owns its collaborators and is meant to live on a single
/// event loop: input events call the lifecycle operations, and every tick
/// the scheduler delivers is handed to [`GameController::on_tick`].
pub struct GameController<R: BoardRenderer, D: DisplaySink, S: TickScheduler> {
    layout: BoardLayout,
    speed: SpeedFactors,
    state: GameState,
    renderer: R,
    display: D,
    scheduler: S,
    rng: StdRng,
    cells: Vec<R::Cell>,
    token: R::Token,
}

impl<R: BoardRenderer, D: DisplaySink, S: TickScheduler> GameController<R, D, S> {
    /// Builds the board and the token. The token is not placed until
    /// [`initialize`](Self::initialize), [`start`](Self::start) or
    /// [`reset`](Self::reset).
    pub fn new(
        settings: &GameSettings,
        mut renderer: R,
        mut display: D,
        scheduler: S,
    ) -> Result<Self, GameError> {
        let layout = settings.layout()?;
        let speed = settings.speed_factors()?;
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::new(settings.move_interval());

        let cells = renderer.create_board(&layout);
        let token = renderer.create_token();
        display.set_move_count(state.move_count);
        display.set_move_interval(state.move_interval);
        display.set_controls(Controls::for_state(state.phase(), false));

        Ok(Self {
            layout,
            speed,
            state,
            renderer,
            display,
            scheduler,
            rng,
            cells,
            token,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn controls(&self) -> Controls {
        Controls::for_state(self.state.phase(), self.state.position.is_some())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            position: self.state.position,
            phase: self.state.phase(),
            move_interval_ms: self.state.move_interval.as_millis(),
            move_count: self.state.move_count,
        }
    }

    /// Puts the token on a random cell if it has never been placed. Does
    /// not start the timer.
    pub fn initialize(&mut self) {
        if self.state.position.is_some() {
            return;
        }
        let cell = self.place_at_random();
        self.push_controls();
        info!(cell = cell.ordinal(), "game initialized");
    }

    pub fn handle(&mut self, event: InputEvent) {
        debug!(event = event.name(), "handling input");
        match event {
            InputEvent::Start => self.start(),
            InputEvent::Pause => self.pause(),
            InputEvent::Reset => self.reset(),
            InputEvent::SpeedUp => self.set_speed(self.speed.up),
            InputEvent::SpeedDown => self.set_speed(self.speed.down),
            InputEvent::TogglePlayPause => {
                if self.state.is_running() {
                    self.pause();
                } else {
                    self.start();
                }
            }
        }
    }

    pub fn start(&mut self) {
        if self.state.is_running() {
            debug!("start ignored: already running");
            return;
        }

        info!(interval_ms = self.state.move_interval.as_millis(), "starting game");
        if self.state.position.is_none() {
            self.place_at_random();
        }

        let handle = self
            .scheduler
            .schedule_repeating(self.state.move_interval.as_duration());
        self.state.lifecycle = Lifecycle::Running(handle);
        self.push_controls();
    }

    pub fn pause(&mut self) {
        let Lifecycle::Running(handle) = self.state.lifecycle else {
            debug!("pause ignored: not running");
            return;
        };

        info!(moves = self.state.move_count, "pausing game");
        self.scheduler.cancel(handle);
        self.state.lifecycle = Lifecycle::Paused;
        self.push_controls();
    }

    /// Stops the timer, zeroes the counter and rebuilds the board with a
    /// freshly placed token. The game ends up idle.
    pub fn reset(&mut self) {
        info!("resetting game");
        if let Lifecycle::Running(handle) = self.state.lifecycle {
            self.scheduler.cancel(handle);
        }

        self.state.position = None;
        self.state.lifecycle = Lifecycle::Idle;
        self.state.move_count = 0;
        self.display.set_move_count(0);

        self.cells = self.renderer.create_board(&self.layout);
        self.token = self.renderer.create_token();
        self.place_at_random();
        self.push_controls();
    }

    /// Multiplies the move interval by `factor`, clamped to the allowed
    /// range. A running timer is replaced right away so the new period
    /// applies from now on.
    pub fn set_speed(&mut self, factor: f64) {
        if let Err(err) = validate_speed_factor(factor) {
            warn!(%err, "speed change ignored");
            return;
        }

        let interval = self.state.move_interval.scaled(factor);
        match self.state.lifecycle {
            Lifecycle::Running(old) => {
                self.scheduler.cancel(old);
                self.state.move_interval = interval;
                let handle = self.scheduler.schedule_repeating(interval.as_duration());
                self.state.lifecycle = Lifecycle::Running(handle);
            }
            Lifecycle::Idle | Lifecycle::Paused => {
                self.state.move_interval = interval;
            }
        }

        self.display.set_move_interval(interval);
        info!(interval_ms = interval.as_millis(), "speed changed");
    }

    /// Applies one scheduler tick. Ticks from a timer that is no longer the
    /// active one are dropped, so a cancelled timer can never move the
    /// token. Returns the new position when a move happened.
    pub fn on_tick(&mut self, handle: TimerHandle) -> Option<CellIndex> {
        if self.state.timer() != Some(handle) {
            trace!(%handle, "ignoring stale tick");
            return None;
        }
        Some(self.move_token(self.state.position))
    }

    /// Moves the token from `current` to a different random cell, updates
    /// the active markers and the counter, and records the new position.
    pub fn move_token(&mut self, current: Option<CellIndex>) -> CellIndex {
        if let Some(cell) = current.and_then(|current| self.cells.get(current.0)) {
            self.renderer.set_active(cell, false);
        }

        let next = choose_position(&mut self.rng, self.layout.total_cells(), current);
        self.show_token_at(next);

        self.state.move_count += 1;
        self.display.set_move_count(self.state.move_count);

        match current {
            Some(from) => debug!(from = from.ordinal(), to = next.ordinal(), "token moved"),
            None => debug!(from = "start", to = next.ordinal(), "token moved"),
        }
        next
    }

    fn place_at_random(&mut self) -> CellIndex {
        let cell = choose_position(&mut self.rng, self.layout.total_cells(), None);
        self.show_token_at(cell);
        cell
    }

    fn show_token_at(&mut self, index: CellIndex) {
        let Some(cell) = self.cells.get(index.0) else {
            warn!(
                cell = index.ordinal(),
                cells = self.cells.len(),
                "renderer returned fewer cells than the layout"
            );
            return;
        };
        self.renderer.attach(&self.token, cell);
        self.renderer.set_active(cell, true);
        self.state.position = Some(index);
    }

    fn push_controls(&mut self) {
        let controls = self.controls();
        self.display.set_controls(controls);
    }
}

impl<R: BoardRenderer, D: DisplaySink> GameController<R, D, ManualScheduler> {
    /// Advances the virtual clock and applies every tick that came due.
    /// Returns how many moves were made.
    pub fn advance(&mut self, by: std::time::Duration) -> usize {
        let fired = self.scheduler.advance(by);
        fired
            .into_iter()
            .filter(|handle| self.on_tick(*handle).is_some())
            .count()
    }

    pub fn until_next_tick(&self) -> Option<std::time::Duration> {
        self.scheduler.until_next_tick()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
