pub mod io;
pub mod output;
pub mod screens;
mod shell;

pub use shell::run_cli;
