//! Core domain types and game logic.

pub mod price;
pub mod calendar;
pub mod align;
pub mod game;
pub mod session;
pub mod config_validation;
pub mod error;
