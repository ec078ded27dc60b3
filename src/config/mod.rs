//! Configuration constants
//!
//! Default values and well-known names shared across the crate.

pub mod defaults;
