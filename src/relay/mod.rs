//! Upstream media relay

pub mod streamer;

pub use streamer::*;
