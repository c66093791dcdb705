//! Library package adding declarative, composable side effects to
//! synchronous redux-like stores
//!
//! Reducers return a model paired with an [`effect::Effect`] describing work
//! to perform. Effects are plain values: they can be batched, mapped, and
//! inspected without running anything. The installed store resolves them
//! after every dispatch and feeds the resulting actions back through the
//! reducer until nothing is left to do.
//!
//! # Examples
//!
//! ## Counter with a delayed follow-up
//!
//! <https://github.com/robgonnella/r-loop/blob/main/cli/src/scenario.rs>
//!
//! ```bash
//! cargo run -p r-loopcli -- --scenario fetch --delay 250ms
//! ```

#![deny(missing_docs)]
pub mod action;
pub mod diagnostics;
pub mod effect;
pub mod error;
pub mod install;
pub mod logger;
pub mod looped;
pub mod settlement;
pub mod store;

#[cfg(test)]
mod test_utils;
