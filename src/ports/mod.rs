//! Port traits (hexagonal architecture boundaries).

pub mod config_port;
pub mod market_data_port;
pub mod presentation_port;
