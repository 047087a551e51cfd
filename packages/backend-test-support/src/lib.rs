//! Backend test support utilities
//!
//! This crate provides the unified logging initialization shared by the
//! backend's unit tests and integration tests.

pub mod logging;
