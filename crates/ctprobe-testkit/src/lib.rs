//! Test utilities for ctprobe
//!
//! This crate provides the mock probe target shared by the workspace tests.

pub mod mock;

pub use mock::{MockTarget, TARGET_PATH, silent_target, unreachable_target};
