mod args;
mod commands;
pub mod config;
pub mod context;
mod handlers;
pub mod logging;
pub mod ui;
pub mod views;

pub use args::{
    Cli, Commands, ExportArgs, InfoArgs, LogLevel, OutputFormat, SelectionArgs, SessionsArgs,
    ShowArgs, SuppressTarget,
};
pub use commands::{RunReport, run};
