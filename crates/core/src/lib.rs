//! Core board logic - pure, deterministic, and testable
//!
//! This crate contains the Board Merge Engine: slot layout, stacks, move
//! validation, merge evaluation, the auto-merge sweep and the controller that
//! sequences them. It has no dependencies on terminals or clocks, making it:
//!
//! - **Deterministic**: same seed and config produce identical boards
//! - **Timer-agnostic**: the controller exposes pending steps; callers decide when they complete
//! - **Testable**: every rule is a plain function or a method on [`Board`]
//!
//! # Module Structure
//!
//! - [`grid`]: hex slot layout and precomputed adjacency
//! - [`tile`]: tiles and bottom-to-top stacks
//! - [`merge`]: group selector, move validator, merge qualification
//! - [`board`]: controller state machine, moves, merges, auto-merge sweep
//! - [`dock`]: pending external stacks waiting to be placed
//! - [`rng`]: seeded stack generation
//! - [`scoring`]: merge count, player moves and score
//! - [`config`]: [`BoardConfig`] loading and validation
//! - [`snapshot`]: serializable board view
//!
//! # Rules
//!
//! - A group is the maximal run of same-colored tiles on top of a stack
//! - A group may land on an empty slot, or on a stack whose top color matches, if it fits
//! - A fully uniform stack at least `mergeThreshold` tall is cleared for a flat reward
//! - Neighboring stacks whose top colors match are merged automatically, one move per sweep
//! - The game ends once `mergeLimit` merges have completed
//!
//! # Example
//!
//! ```
//! use hexa_stack_core::{Board, BoardConfig};
//! use hexa_stack_core::types::{Color, SlotId};
//!
//! let mut board = Board::empty(BoardConfig::default()).unwrap();
//! let dock = board.add_pending_stack(&[Color::Red; 3]).unwrap();
//!
//! board.place_pending_stack(dock, SlotId(0)).unwrap();
//! board.settle();
//!
//! assert_eq!(board.merge_count(), 1);
//! assert_eq!(board.score(), 100);
//! ```

pub mod board;
pub mod config;
pub mod dock;
pub mod error;
pub mod grid;
pub mod merge;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tile;

pub use hexa_stack_types as types;

// Re-export commonly used types for convenience
pub use board::{AutoMove, Board, FollowUp, Group, MergeOutcome, Step, StepOutcome};
pub use config::{BoardConfig, ConfigError};
pub use dock::{Dock, PendingStack};
pub use error::MoveRejected;
pub use grid::{Slot, SlotGrid};
pub use rng::{SimpleRng, StackGenerator};
pub use scoring::Scoreboard;
pub use snapshot::{BoardSnapshot, DockSnapshot, SlotSnapshot};
pub use tile::{Stack, Tile};
