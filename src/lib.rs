//! City weather lookup for the terminal.
//!
//! The core is small: [`lookup::WeatherLookup`] owns the request lifecycle,
//! [`condition::classify`] and [`theme::derive_theme`] turn a payload into
//! labels and colors, and [`app`] draws the one screen.

pub mod api;
pub mod app;
pub mod cli;
pub mod condition;
pub mod config;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod theme;
pub mod units;
pub mod weather;
