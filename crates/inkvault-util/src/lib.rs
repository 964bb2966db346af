//! Shared utilities for inkvault.

pub mod id;
pub mod log;
