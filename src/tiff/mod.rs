//! TIFF format constants and decoded field values.

pub mod tags;
mod value;

pub use value::Value;
