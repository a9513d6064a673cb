//! Core helpers shared by every layer: logging macros and the RNG.

#[macro_use]
pub mod utils;
pub mod random;
