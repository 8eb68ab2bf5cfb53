pub mod aggregate;
pub mod commands;
pub mod import;
pub mod serve;

pub use commands::{Cli, Commands};
