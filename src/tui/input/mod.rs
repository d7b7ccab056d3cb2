pub mod command;

pub use command::{Command, apply, map_key};
