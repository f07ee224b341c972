//! Icon Actions Library
//!
//! Core functionality for acting on Icons8 icons: resolving SVG detail,
//! copying, downloading and keeping a recent-icons history.

pub mod actions;
pub mod api;
pub mod config;
pub mod icon;
pub mod storage;
