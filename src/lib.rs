//! stockguess: guess whether a stock's next daily close goes up or down.
//!
//! Hexagonal architecture: game logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
