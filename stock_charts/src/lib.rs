//! Filter-and-chart pipeline for daily stock prices.
//!
//! A [`store::SeriesStore`] holds per-symbol history, [`filter`] narrows it
//! to a selection, [`projector`] turns the result into chart payloads, and
//! the [`controller`]s tie these together behind user events.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod controller;
pub mod errors;
pub mod filter;
pub mod frontend;
pub mod models;
pub mod projector;
pub mod providers;
pub mod render;
pub mod store;

pub use errors::Error;
