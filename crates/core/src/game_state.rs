//! Game state module - the tick-driven timing controller
//!
//! This module ties the playfield, the active piece and the randomizer
//! together. It owns every clock (automatic step, move repeat, lock delay)
//! and the spawn / lock / game-over lifecycle.
//!
//! Each [`GameState::tick`] runs, in order:
//!
//! 1. advance the clock and erase the active piece from the display
//! 2. accumulate lock delay
//! 3. rotations and hard drop pressed this tick
//! 4. held movement, once the move-repeat deadline has passed
//! 5. automatic one-row step, once the step deadline has passed
//! 6. lock, when the piece is resting and the lock delay has run out
//! 7. paint the active piece

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::GameConfig;
use crate::display::DisplaySink;
use crate::error::ConfigError;
use crate::piece::{ActivePiece, PieceCells};
use crate::playfield::Playfield;
use crate::rng::{Randomizer, UniformRandomizer};
use crate::types::{Coord, InputSnapshot, RotationDirection, TetrominoKind};

/// Outcome of a piece being committed to the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: TetrominoKind,
    pub lines_cleared: u32,
    /// The next piece could not spawn
    pub game_over: bool,
}

pub struct GameState<'c, R = UniformRandomizer> {
    catalog: &'c Catalog,
    config: GameConfig,
    playfield: Playfield,
    active: Option<ActivePiece<'c>>,
    /// Cells the active piece was last painted at
    painted: Option<PieceCells>,
    randomizer: R,
    now_ms: u64,
    step_deadline_ms: u64,
    move_deadline_ms: u64,
    lock_timer_ms: u32,
    pieces_spawned: u32,
    last_event: Option<LockEvent>,
    started: bool,
    game_over: bool,
}

impl<'c, R: Randomizer> GameState<'c, R> {
    /// Create a game; nothing spawns until [`GameState::start`]
    pub fn new(
        catalog: &'c Catalog,
        config: GameConfig,
        randomizer: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let playfield = Playfield::new(config.width, config.height);

        Ok(Self {
            catalog,
            config,
            playfield,
            active: None,
            painted: None,
            randomizer,
            now_ms: 0,
            step_deadline_ms: 0,
            move_deadline_ms: 0,
            lock_timer_ms: 0,
            pieces_spawned: 0,
            last_event: None,
            started: false,
            game_over: false,
        })
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self, display: &mut dyn DisplaySink) {
        if self.started {
            return;
        }
        self.started = true;
        if self.spawn_piece(display) {
            self.paint_active(display);
        }
    }

    /// Wipe the field and begin again, typically after game over
    pub fn restart(&mut self, display: &mut dyn DisplaySink) {
        self.erase_active(display);
        self.active = None;
        self.wipe_field(display);
        self.game_over = false;
        self.last_event = None;
        self.started = true;
        info!(pieces = self.pieces_spawned, "restart");
        if self.spawn_piece(display) {
            self.paint_active(display);
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn active(&self) -> Option<&ActivePiece<'c>> {
        self.active.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Total elapsed time fed through [`GameState::tick`]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn step_deadline_ms(&self) -> u64 {
        self.step_deadline_ms
    }

    pub fn move_deadline_ms(&self) -> u64 {
        self.move_deadline_ms
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Anchor the active piece would land on if hard dropped
    pub fn ghost_position(&self) -> Option<Coord> {
        let active = self.active.as_ref()?;
        let distance = active.drop_distance(&self.playfield);
        Some(active.position() + Coord::new(0, -distance))
    }

    /// Check if the active piece can no longer descend
    pub fn is_resting(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|p| p.is_resting(&self.playfield))
    }

    /// Advance the game by `elapsed_ms`; returns whether a piece locked
    pub fn tick(
        &mut self,
        elapsed_ms: u32,
        input: &InputSnapshot,
        display: &mut dyn DisplaySink,
    ) -> bool {
        if !self.started || self.game_over {
            return false;
        }

        self.now_ms += u64::from(elapsed_ms);
        self.erase_active(display);
        self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);

        let locked = self.update(input, display);

        self.paint_active(display);
        locked
    }

    /// Steps 3 to 6 of a tick
    fn update(&mut self, input: &InputSnapshot, display: &mut dyn DisplaySink) -> bool {
        if input.rotate_left {
            self.try_rotate(RotationDirection::CounterClockwise);
        }
        if input.rotate_right {
            self.try_rotate(RotationDirection::Clockwise);
        }
        if input.hard_drop {
            self.drop_and_commit(display);
            return true;
        }

        if self.now_ms > self.move_deadline_ms {
            // Manual descent defers the next automatic step.
            if input.down && self.try_move(Coord::DOWN) {
                self.step_deadline_ms = self.now_ms + u64::from(self.config.timing.step_delay_ms);
            }
            if input.left {
                self.try_move(Coord::LEFT);
            }
            if input.right {
                self.try_move(Coord::RIGHT);
            }
        }

        if self.now_ms > self.step_deadline_ms {
            self.step_deadline_ms = self.now_ms + u64::from(self.config.timing.step_delay_ms);
            self.try_move(Coord::DOWN);
        }

        if self.lock_timer_ms >= self.config.timing.lock_delay_ms && self.is_resting() {
            self.commit(display);
            return true;
        }

        false
    }

    /// Translate the active piece
    ///
    /// A successful move re-arms the move-repeat deadline and resets the lock
    /// delay, however the piece was moved.
    pub fn try_move(&mut self, translation: Coord) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let moved = active.try_move(&self.playfield, translation);
        if moved {
            self.on_moved();
        }
        moved
    }

    /// Rotate the active piece with wall kicks
    ///
    /// The accepted kick counts as a move for the clocks, even a `(0, 0)` one.
    pub fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let rotated = active.try_rotate(&self.playfield, direction).is_some();
        if rotated {
            self.on_moved();
        }
        rotated
    }

    fn on_moved(&mut self) {
        self.move_deadline_ms = self.now_ms + u64::from(self.config.timing.move_delay_ms);
        self.lock_timer_ms = 0;
    }

    /// Drop the active piece as far as it goes and lock it immediately
    pub fn hard_drop(&mut self, display: &mut dyn DisplaySink) -> bool {
        if self.active.is_none() {
            return false;
        }
        self.erase_active(display);
        self.drop_and_commit(display);
        self.paint_active(display);
        true
    }

    fn drop_and_commit(&mut self, display: &mut dyn DisplaySink) {
        while self.try_move(Coord::DOWN) {}
        self.commit(display);
    }

    /// Lock the active piece, clear full rows and spawn the next piece
    fn commit(&mut self, display: &mut dyn DisplaySink) {
        self.erase_active(display);
        let Some(piece) = self.active.take() else {
            return;
        };

        let kind = piece.kind();
        let cells = piece.world_cells();
        self.playfield.set_cells(&cells, kind);
        for c in cells {
            display.set_cell(c, kind);
        }

        let cleared = self.playfield.clear_full_rows();
        if let Some(&lowest) = cleared.iter().min() {
            self.repaint_from_row(lowest, display);
        }
        debug!(
            %kind,
            x = piece.position().x,
            y = piece.position().y,
            rotation = piece.rotation(),
            lines = cleared.len(),
            "piece locked"
        );

        let spawned = self.spawn_piece(display);
        self.last_event = Some(LockEvent {
            kind,
            lines_cleared: cleared.len() as u32,
            game_over: !spawned,
        });
    }

    /// Spawn a new piece at the configured anchor
    ///
    /// If its cells are blocked the game is over instead.
    fn spawn_piece(&mut self, display: &mut dyn DisplaySink) -> bool {
        let kind = self.randomizer.next_kind();
        let piece = ActivePiece::spawn(self.catalog.shape_for(kind), self.config.spawn);

        let timing = self.config.timing;
        self.step_deadline_ms = self.now_ms + u64::from(timing.step_delay_ms);
        self.move_deadline_ms = self.now_ms + u64::from(timing.move_delay_ms);
        self.lock_timer_ms = 0;

        if !piece.is_valid(&self.playfield) {
            self.enter_game_over(kind, display);
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!(%kind, pieces = self.pieces_spawned, "spawned");
        true
    }

    fn enter_game_over(&mut self, blocked: TetrominoKind, display: &mut dyn DisplaySink) {
        info!(%blocked, pieces = self.pieces_spawned, "game over");
        self.active = None;
        self.game_over = true;
        self.wipe_field(display);
    }

    fn wipe_field(&mut self, display: &mut dyn DisplaySink) {
        for (c, _) in self.playfield.occupied_cells() {
            display.clear_cell(c);
        }
        self.playfield.clear();
    }

    /// Re-project every row from `row` up after a compaction
    fn repaint_from_row(&self, row: i32, display: &mut dyn DisplaySink) {
        let b = self.playfield.bounds();
        for y in row..b.y_max() {
            for x in b.x_min()..b.x_max() {
                let c = Coord::new(x, y);
                match self.playfield.tile(c) {
                    Some(kind) => display.set_cell(c, kind),
                    None => display.clear_cell(c),
                }
            }
        }
    }

    fn erase_active(&mut self, display: &mut dyn DisplaySink) {
        if let Some(cells) = self.painted.take() {
            for c in cells {
                display.clear_cell(c);
            }
        }
    }

    fn paint_active(&mut self, display: &mut dyn DisplaySink) {
        self.erase_active(display);
        if let Some(piece) = &self.active {
            let cells = piece.world_cells();
            for c in cells {
                display.set_cell(c, piece.kind());
            }
            self.painted = Some(cells);
        }
    }
}
