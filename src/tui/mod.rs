//! Terminal UI: modal state machine, change-detected rendering, and the
//! event loop that ties them to the store and mood engine.

pub mod app;
pub mod input;
pub mod render;
pub mod snapshot;
pub mod theme;

pub use app::run;
