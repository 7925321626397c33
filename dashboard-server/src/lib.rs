//! Departure and weather dashboard server.
//!
//! Takes a snapshot of two departure boards and the current weather and
//! turns it into the strings an e-paper dashboard shows: the clock, a
//! departure list per direction with a time-until-departure label, and the
//! temperatures.

pub mod config;
pub mod snapshot;
pub mod source;
pub mod view;
pub mod web;
