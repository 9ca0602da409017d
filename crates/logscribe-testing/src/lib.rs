//! Testing infrastructure for logscribe integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestWorld`: Fluent interface for declarative test setup
//! - `fixtures`: Session log line builders
//! - `assertions`: Custom assertions for logscribe JSON output

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::SessionBuilder;
pub use world::{CliResult, TestWorld};
