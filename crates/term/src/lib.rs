//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. It avoids widget toolkits and
//! renders into a simple framebuffer that is diffed and flushed to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`renderer`]: crossterm flushing with changed-run diffing
//! - [`board_view`]: board, dock, cursor, HUD and call-to-action overlay

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use hexa_stack_core as core;
pub use hexa_stack_types as types;

pub use board_view::{color_rgb, BoardView, DragView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
