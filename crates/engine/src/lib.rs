//! Engine layer - clocks, observers and input collaborators around the board
//!
//! - [`session`]: [`Session`] drives the board pipeline from elapsed milliseconds
//!   and dispatches events to a [`BoardObserver`]
//! - [`drag`]: [`DragController`] picks pending stacks and drops them on slots
//! - [`autoplay`]: a simple placement planner for headless play

pub mod autoplay;
pub mod drag;
pub mod session;

pub use autoplay::{apply_placement, plan_placement, Placement};
pub use drag::{DragController, DropOutcome};
pub use session::{BoardObserver, Session};
