//! Common test utilities for API integration tests
//!
//! Shared configuration builders and request helpers for driving the real
//! router against mock upstreams.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
