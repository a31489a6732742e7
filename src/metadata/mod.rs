//! API for reading metadata out of a TIFF file.
//!
//! ### Reading all TIFF metadata
//!
//! We can use [`TiffMetadataReader::read_all_ifds`] to read all IFDs up front:
//!
//! ```
//! use bytes::Bytes;
//!
//! use tiff_meta::metadata::{PrefetchBuffer, TiffMetadataReader};
//!
//! # fn main() -> tiff_meta::error::TiffMetaResult<()> {
//! // A little-endian TIFF holding a single IFD with one entry: ImageWidth = 100
//! let file = Bytes::from_static(&[
//!     b'I', b'I', 42, 0, 8, 0, 0, 0, // header
//!     1, 0, // entry count
//!     0x00, 0x01, 3, 0, 1, 0, 0, 0, 100, 0, 0, 0, // ImageWidth, SHORT, 1, 100
//!     0, 0, 0, 0, // no next IFD
//! ]);
//!
//! // Use PrefetchBuffer to ensure that a given number of bytes at the start of the
//! // file are prefetched.
//! let prefetch_reader = PrefetchBuffer::new(file, 32 * 1024)?;
//!
//! // Create a TiffMetadataReader wrapping some MetadataFetch
//! let mut metadata_reader = TiffMetadataReader::try_open(&prefetch_reader)?;
//!
//! // Read all IFDs out of the source.
//! let ifds = metadata_reader.read_all_ifds(&prefetch_reader)?;
//! assert_eq!(ifds.len(), 1);
//! assert_eq!(ifds[0].image_width(), Some(100));
//! # Ok(())
//! # }
//! ```
//!
//! ### Caching/prefetching/buffering
//!
//! The underlying [`ImageFileDirectoryReader`] reads the entries of an IFD in one request, but
//! every out-of-line value is fetched separately. For sources where each read is expensive, wrap
//! them in [`PrefetchBuffer`] or a similar caching layer.

mod entry;
mod fetch;
mod reader;

pub use entry::RawEntry;
pub use fetch::{MetadataFetch, PrefetchBuffer};
pub use reader::{ImageFileDirectoryReader, TiffMetadataReader};

/// Bounds on the resources a malformed file may claim.
///
/// Modeled after the `Limits` of the `tiff` crate. The defaults are generous for real images;
/// use [`Limits::unlimited`] to turn all checks off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// The largest out-of-line value, in bytes, a single entry may reference.
    pub max_value_bytes: Option<u32>,
    /// The largest number of IFDs read from one file.
    pub max_directories: Option<usize>,
}

impl Limits {
    /// No limits at all.
    pub fn unlimited() -> Self {
        Self {
            max_value_bytes: None,
            max_directories: None,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_value_bytes: Some(16 * 1024 * 1024),
            max_directories: Some(1024),
        }
    }
}
