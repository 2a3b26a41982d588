//! Platform speech backends

pub mod espeak;
pub mod sapi;
pub mod say;
