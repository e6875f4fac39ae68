//! Core rules engine - pure, deterministic, and testable
//!
//! This crate holds the falling-block rules: the piece catalog, the playfield,
//! the active piece with rotation and wall kicks, and the tick-driven timing
//! controller. It has no dependency on input devices, rendering, or I/O; the
//! host feeds it elapsed time plus an [`InputSnapshot`](types::InputSnapshot)
//! and receives cell updates through a [`DisplaySink`].
//!
//! # Module Structure
//!
//! - [`catalog`]: shape definitions and wall-kick tables per kind
//! - [`playfield`]: bounded grid of locked cells, collision and row clearing
//! - [`piece`]: the active piece, rotation transform and kick search
//! - [`game_state`]: clocks, spawn, lock and game-over lifecycle
//! - [`rng`]: piece selection policies
//! - [`display`]: the paint-notification seam
//! - [`config`]: board size, spawn point and delays
//!
//! # Coordinates
//!
//! `y` grows upward and the field is centered on the origin; a 10x20 field
//! spans `x` in `-5..5` and `y` in `-10..10`.
//!
//! # Example
//!
//! ```
//! use stackfall_core::{Catalog, GameConfig, GameState, NullDisplay, UniformRandomizer};
//! use stackfall_core::types::InputSnapshot;
//!
//! let catalog = Catalog::standard();
//! let mut game = GameState::new(&catalog, GameConfig::default(), UniformRandomizer::new(7))?;
//! game.start(&mut NullDisplay);
//!
//! let drop = InputSnapshot { hard_drop: true, ..InputSnapshot::IDLE };
//! assert!(game.tick(16, &drop, &mut NullDisplay));
//! assert!(!game.playfield().is_empty());
//! # Ok::<(), stackfall_core::ConfigError>(())
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Deadlines are exclusive: a piece steps down on the
//! first tick that goes strictly past its step deadline.

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod game_state;
pub mod piece;
pub mod playfield;
pub mod rng;

pub use stackfall_types as types;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, KickRow, Pivot, ShapeDefinition};
pub use config::{GameConfig, TimingConfig};
pub use display::{DisplaySink, GridDisplay, NullDisplay};
pub use error::{CatalogError, ConfigError};
pub use game_state::{GameState, LockEvent};
pub use piece::{rotate_offset, wall_kick_index, wrap, ActivePiece, PieceCells};
pub use playfield::{ClearedRows, Playfield};
pub use rng::{BagRandomizer, Randomizer, SequenceRandomizer, SimpleRng, UniformRandomizer};
