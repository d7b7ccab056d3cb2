//! Non-interactive front-end: argument parsing, handlers, and output
//! formatting for scripted use.

pub mod commands;
pub mod handlers;
pub mod output;
