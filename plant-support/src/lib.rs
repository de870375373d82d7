//! # Plant Support
//!
//! Shared helpers for the Plant crates.
//!
//! This crate provides:
//! - Text rendering for error messages
//! - Logging setup for tests and demos

pub mod rendering;
pub mod testing;
