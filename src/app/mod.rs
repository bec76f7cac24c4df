pub mod config;
pub mod state;

pub mod cli;
pub mod events;
pub mod inputs;
pub mod keys;
pub mod session;
pub use state::*;
