//! Photovoltaic production and ROI / break-even simulator.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
/// Production and ROI projectors.
pub mod engine;
pub mod io;
pub mod scenario;
#[cfg(feature = "tui")]
pub mod tui;
