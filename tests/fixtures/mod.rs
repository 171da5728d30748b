//! Test fixtures for courier-planner.
//!
//! Provides:
//! - a fixed planning clock
//! - a builder for delivery orders with sensible defaults
//! - small synthetic travel tables

#![allow(dead_code)]

pub mod orders;

pub use orders::*;
