//! GeoTIFF metadata: GeoKeys and the model-space transform.

mod affine;
mod codes;
mod geo_key_directory;

pub use affine::AffineTransform;
pub use codes::CoordinateTransformation;
pub use geo_key_directory::{GeoKeyDirectory, GeoKeyEntry, GeoKeyTag};
