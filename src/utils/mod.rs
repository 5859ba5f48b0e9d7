//! Utility modules

pub mod encoding;
