//! taskflow: hierarchical personal task management
//!
//! This module exports the core components for testing and integration.

pub mod board;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod session;
pub mod store;
pub mod tasks;
pub mod types;
