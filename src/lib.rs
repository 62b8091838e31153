//! Cat avatar generator - turns a handful of character preferences into a
//! prompt, asks the MiniMax text-to-image API for matching illustrations, and
//! saves the resulting images locally.

pub mod ai;
pub mod error;
pub mod image;
pub mod models;
pub mod preferences;
pub mod prompts;

pub use error::{GenerationError, Result};
pub use preferences::Preferences;
pub use prompts::compose_prompt;
