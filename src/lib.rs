//! habitui - Terminal Habit Tracker Library
//!
//! A terminal-based habit tracker backed by a local SQLite table, built in Rust.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::*;
