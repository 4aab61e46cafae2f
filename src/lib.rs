//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `blockfall::{core, highscore, input, term, types}` and hosts the binary's
//! configuration and logging setup so both can be tested.

pub mod config;
pub mod logging;

pub use blockfall_core as core;
pub use blockfall_highscore as highscore;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::Args;
