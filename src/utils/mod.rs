//! Utility functions for vidrelay

pub mod filename;
pub mod url;

pub use filename::*;
pub use url::*;
