//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns like
//! persistence, filesystem paths, and logging.

pub mod logging;
pub mod paths;
pub mod persistence;

pub use logging::*;
pub use paths::*;
pub use persistence::*;
