//! Wellness Companion Core Library
//!
//! This library exposes the state containers, storage backends, and AI
//! client for use in the CLI binary and tests.

pub mod ai;
pub mod config;
pub mod error;
pub mod storage;
pub mod stores;
