//! Local storage for downloaded images
//!
//! Writes image bytes to caller-chosen paths. Writes go to a temporary file
//! in the destination directory and are renamed into place, so a failed
//! download never leaves a truncated image behind.

pub mod writer;

pub use writer::{prepare_destination, save_image};
