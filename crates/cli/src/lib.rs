//! FinGuard CLI - command orchestration
//!
//! Loads account snapshots and risk configuration from JSON files and runs the
//! risk engine. The engine itself stays free of I/O; everything that touches
//! files or the wall clock lives here.

pub mod commands;
pub mod context;

pub use context::AppContext;
