//! Common test utilities
//!
//! - JSON fixtures shaped like the backend's responses
//! - Session managers wired to a mock server
//! - A small stateful fake of the item endpoints

#![allow(dead_code)]

pub mod backend;
pub mod fixtures;

pub use backend::*;
pub use fixtures::*;
