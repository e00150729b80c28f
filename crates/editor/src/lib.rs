// Library crate: scene editor core, exposed for the binary, integration tests
// and the agent command interface.

pub mod blueprint;
pub mod command;
pub mod error;
pub mod export;
pub mod fixtures;
pub mod generator;
pub mod harness;
pub mod state;
