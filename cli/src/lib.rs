pub mod commands;
pub mod context;
pub mod repl;

pub use context::{CliConfig, CliContext};
pub use repl::readline;
