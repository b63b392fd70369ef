//! Hexa Stack (workspace facade crate).
//!
//! Re-exports the workspace crates as `hexa_stack::{types,core,engine,input,term}`
//! so binaries, integration tests and benches depend on a single package.

pub use hexa_stack_core as core;
pub use hexa_stack_engine as engine;
pub use hexa_stack_input as input;
pub use hexa_stack_term as term;
pub use hexa_stack_types as types;
