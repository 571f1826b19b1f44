//! Shared utilities for the SyncRoom workspace.

pub mod logger;
pub mod time;
