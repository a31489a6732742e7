#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod reader;
mod chunk;
mod cog;
pub mod decoder;
pub mod error;
pub mod geo;
mod ifd;
pub mod metadata;
pub mod mode;
pub mod tiff;

pub use chunk::Chunk;
pub use cog::TIFF;
pub use ifd::{DecodeWarning, Field, ImageFileDirectory};
pub use mode::{ChunkLayout, ImageLayout, ImageMode};
