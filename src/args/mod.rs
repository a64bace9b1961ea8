//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::{DEFAULT_USER_AGENT, WardenArgs};
pub use types::PositiveUsize;

pub(crate) use parsers::parse_duration_arg;
