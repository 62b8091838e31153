pub mod client;
pub mod extract;
pub mod image;
pub mod types;

pub use client::MinimaxHttpClient;
pub use image::MinimaxImageClient;
