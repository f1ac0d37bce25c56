pub mod convert;
pub mod prompt;
pub mod ui;

pub use prompt::{InputArgs, InputCollector, TerminalPrompt};
