//! Application layer - configuration, command parsing, session dispatch

pub mod command;
pub mod config;
pub mod session;

pub use command::{Command, CommandName};
pub use config::Config;
pub use session::{LotState, Outcome, Session};
