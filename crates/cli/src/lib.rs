//! CLI utilities for Pantry tools
//!
//! Provides shared terminal output:
//! - Status messages
//! - Ranked result and suggestion listings
//! - Duration and count formatting

#![warn(missing_docs)]

pub mod output;
