//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond parsing and formatting, which
//! makes them usable in any context (board engine, terminal rendering, autoplay logs).
//!
//! # Board Layout
//!
//! Reference hex board:
//!
//! - **Grid**: 5 rows x 5 columns, offset columns (odd columns shifted by half a hex)
//! - **Hex radius**: 0.6 world units
//! - **Slot capacity**: 6 tiles
//! - **Opening stacks**: slots 0, 12 and 24
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `AUTO_MERGE_INTERVAL_MS` | 1000 | Period of the autonomous sweep |
//! | `SETTLE_MS` | 220 | Move settle before merge evaluation |
//! | `MERGE_CLEAR_MS` | 600 | Merge clear effect before unlocking |
//! | `RECHECK_DELAY_MS` | 50 | Delay of the chain-reaction sweep |
//! | `DOCK_REFILL_DELAY_MS` | 1000 | Delay before the dock is regenerated |
//!
//! # Examples
//!
//! ```
//! use hexa_stack_types::{Color, PlayerAction, SlotId, WorldPos};
//!
//! let color = Color::from_str("RED").unwrap();
//! assert_eq!(color, Color::Red);
//! assert_eq!(color.as_str(), "red");
//!
//! let a = WorldPos::new(0.0, 0.0);
//! let b = WorldPos::new(3.0, 4.0);
//! assert_eq!(a.distance_to(b), 5.0);
//!
//! assert_eq!(SlotId(12).index(), 12);
//! assert_eq!(PlayerAction::from_str("grab"), Some(PlayerAction::Grab));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid rows in the reference layout
pub const GRID_ROWS: u16 = 5;

/// Grid columns in the reference layout
pub const GRID_COLS: u16 = 5;

/// Hex radius in world units
pub const HEX_RADIUS: f32 = 0.6;

/// Tiles a slot can hold
pub const MAX_STACK_HEIGHT: u16 = 6;

/// Uniform stack height that triggers a merge
pub const MERGE_THRESHOLD: u16 = 3;

/// Completed merges that end the session
pub const MERGE_LIMIT: u32 = 3;

/// Colors used when generating stacks
pub const COLOR_COUNT: u8 = 3;

/// Score credited per completed merge
pub const MERGE_REWARD: u32 = 100;

/// Pending external stacks offered at once
pub const DOCK_COUNT: u16 = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Period of the autonomous auto-merge sweep
pub const AUTO_MERGE_INTERVAL_MS: u32 = 1000;

/// Settle time after a move, before the destination is evaluated
pub const SETTLE_MS: u32 = 220;

/// Merge clear effect duration, before the lock is released
pub const MERGE_CLEAR_MS: u32 = 600;

/// Delay of the sweep scheduled when a transition completes
pub const RECHECK_DELAY_MS: u32 = 50;

/// Delay before an exhausted dock is regenerated
pub const DOCK_REFILL_DELAY_MS: u32 = 1000;

/// Number of distinct colors in the palette
pub const PALETTE_SIZE: usize = 7;


/// Tile colors
///
/// The palette has seven entries; a board only generates the first
/// `color_count` of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    White,
    Gray,
    Magenta,
}

impl Color {
    pub const ALL: [Color; PALETTE_SIZE] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::White,
        Color::Gray,
        Color::Magenta,
    ];

    /// Palette entry at `index`
    ///
    /// # Examples
    ///
    /// ```
    /// use hexa_stack_types::Color;
    ///
    /// assert_eq!(Color::from_index(0), Some(Color::Red));
    /// assert_eq!(Color::from_index(2), Some(Color::Blue));
    /// assert_eq!(Color::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
            Color::Yellow => 3,
            Color::White => 4,
            Color::Gray => 5,
            Color::Magenta => 6,
        }
    }

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "blue" => Some(Color::Blue),
            "yellow" => Some(Color::Yellow),
            "white" => Some(Color::White),
            "gray" | "grey" => Some(Color::Gray),
            "magenta" => Some(Color::Magenta),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::White => "white",
            Color::Gray => "gray",
            Color::Magenta => "magenta",
        }
    }

    /// Single-letter tag used by compact text renderings
    pub fn letter(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::White => 'W',
            Color::Gray => 'A',
            Color::Magenta => 'M',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board slot identity (row-major index into the grid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot#{}", self.0)
    }
}

/// Pending external stack identity
///
/// Distinct from slot ids and never reused within a board's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DockId(pub u32);

impl fmt::Display for DockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dock#{}", self.0)
    }
}

/// Tile identity, also used as the presentation handle of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

/// Position on the ground plane (world units)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

impl WorldPos {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance_to(&self, other: WorldPos) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn offset(&self, dx: f32, dz: f32) -> WorldPos {
        WorldPos::new(self.x + dx, self.z + dz)
    }
}

/// Board controller state
///
/// - **Idle**: input accepted
/// - **Locked**: a move or merge transition is in flight
/// - **Ended**: terminal, no transition leaves it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardPhase {
    Idle,
    Locked,
    Ended,
}

impl BoardPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardPhase::Idle => "idle",
            BoardPhase::Locked => "locked",
            BoardPhase::Ended => "ended",
        }
    }
}

/// Who asked for a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveOrigin {
    Player,
    AutoMerge,
}

/// Logical owner of a tile, resolved from its presentation handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Owner {
    /// Tile sits in a board slot's stack (not draggable)
    BoardSlotTile(SlotId),
    /// Tile belongs to a pending stack waiting in the dock (draggable)
    PendingExternalStack(DockId),
}

/// Board-side event, queued by the controller and drained by observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardEvent {
    /// A top group moved between two slots
    Moved {
        source: SlotId,
        target: SlotId,
        count: usize,
        origin: MoveOrigin,
    },
    /// A pending stack was placed into an empty slot
    Placed {
        dock: DockId,
        target: SlotId,
        count: usize,
    },
    /// A player move was accepted
    PlayerMoved { moves: u32 },
    /// A uniform stack was cleared
    Merged {
        slot: SlotId,
        color: Color,
        tiles: usize,
        merges: u32,
        score: u32,
    },
    /// Terminal state reached (emitted once)
    GameEnded { merges: u32, score: u32 },
    /// A fresh set of pending stacks was generated
    DockRefilled { stacks: usize },
}

/// Player actions produced by the input layer
///
/// These drive the drag controller; they never touch the board directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Move the cursor one step left
    CursorLeft,
    /// Move the cursor one step right
    CursorRight,
    /// Move the cursor one step toward the top of the screen
    CursorUp,
    /// Move the cursor one step toward the bottom of the screen
    CursorDown,
    /// Jump to the n-th dock stack (0-based) and grab it
    SelectDock(u8),
    /// Grab what is under the cursor, or release the held stack
    Grab,
    /// Put the held stack back into the dock
    Cancel,
}

impl PlayerAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use hexa_stack_types::PlayerAction;
    ///
    /// assert_eq!(PlayerAction::from_str("cursorLeft"), Some(PlayerAction::CursorLeft));
    /// assert_eq!(PlayerAction::from_str("cancel"), Some(PlayerAction::Cancel));
    /// assert_eq!(PlayerAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(PlayerAction::CursorLeft),
            "cursorright" => Some(PlayerAction::CursorRight),
            "cursorup" => Some(PlayerAction::CursorUp),
            "cursordown" => Some(PlayerAction::CursorDown),
            "grab" => Some(PlayerAction::Grab),
            "cancel" => Some(PlayerAction::Cancel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::CursorLeft => "cursorLeft",
            PlayerAction::CursorRight => "cursorRight",
            PlayerAction::CursorUp => "cursorUp",
            PlayerAction::CursorDown => "cursorDown",
            PlayerAction::SelectDock(_) => "selectDock",
            PlayerAction::Grab => "grab",
            PlayerAction::Cancel => "cancel",
        }
    }
}
