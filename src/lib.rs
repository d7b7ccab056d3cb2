//! taskman — a single-user task tracker with an interactive terminal UI
//! and a scriptable CLI.
//!
//! The layering is strict: `model` owns the data and its operations,
//! `ops` the ordering rules, `io` persistence, `mood` the animated
//! status engine, and the two front-ends (`tui`, `cli`) only ever talk
//! to those. State changes flow through `model::store::TaskStore`, so
//! both front-ends share one set of semantics.

pub mod cli;
pub mod io;
pub mod model;
pub mod mood;
pub mod ops;
pub mod tui;
pub mod util;
