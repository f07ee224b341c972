//! Persistent state
//!
//! Currently only the recent-icons history.

mod recent;

pub use recent::{RecentIcons, StoreError};
