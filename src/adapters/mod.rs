//! Concrete adapter implementations for ports.

pub mod alpha_vantage_adapter;
pub mod chart_svg;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod terminal_adapter;
