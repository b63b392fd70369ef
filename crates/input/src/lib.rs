//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::PlayerAction`]. The drag
//! controller interprets the actions; nothing here touches the board.

pub mod map;

pub use hexa_stack_types as types;

pub use map::{handle_key_event, should_quit};
