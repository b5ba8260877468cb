//! # Utilities Module
//!
//! Geometry helpers shared by generation and line-of-sight code.

pub mod math;

pub use math::*;
