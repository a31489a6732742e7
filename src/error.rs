//! Error handling.

use std::fmt;

use thiserror::Error;

use crate::tiff::tags::{CompressionMethod, PhotometricInterpretation, Tag, Type};
use crate::tiff::Value;

/// The decoding stage at which a read ran past the end of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// A raw read, before any stage attached itself to the error.
    Source,
    /// The 8-byte file header.
    Header,
    /// An IFD's entry count, entries or next-IFD offset.
    Directory,
    /// The out-of-line value of the given tag.
    Value(Tag),
    /// The bytes of the strip or tile with the given index.
    Chunk(usize),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Source => write!(f, "source"),
            Stage::Header => write!(f, "header"),
            Stage::Directory => write!(f, "image file directory"),
            Stage::Value(tag) => write!(f, "value of tag {tag:?}"),
            Stage::Chunk(index) => write!(f, "chunk {index}"),
        }
    }
}

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TiffMetaError {
    /// The first four bytes are neither `II*\0` nor `MM\0*`.
    #[error("invalid TIFF signature {0:02x?}")]
    InvalidFormat([u8; 4]),

    /// A read extends past the end of the source.
    #[error("{stage} truncated: {length} bytes at offset {offset} requested, source holds {available}")]
    Truncated {
        /// Where the short read happened.
        stage: Stage,
        /// Start of the requested range.
        offset: u64,
        /// Length of the requested range.
        length: u64,
        /// Total length of the source.
        available: u64,
    },

    /// `count * element width` does not fit the 32-bit offset space.
    #[error("{count} elements of type {field_type:?} in tag {tag:?} overflow the value size")]
    Overflow {
        /// The tag of the entry.
        tag: Tag,
        /// The declared type of the entry.
        field_type: Type,
        /// The declared element count.
        count: u32,
    },

    /// The entry's type code is outside 1..=12.
    #[error("tag {tag:?} has unsupported field type {type_code}")]
    UnsupportedType {
        /// The tag of the entry.
        tag: Tag,
        /// The raw type code.
        type_code: u16,
    },

    /// The compression scheme is unknown, or no decoder is registered for it.
    #[error("compression method {0:?} is unsupported")]
    UnsupportedCompression(CompressionMethod),

    /// The tag combination does not map onto an image mode.
    #[error("{photometric_interpretation:?} with bits per sample {bits_per_sample:?}, {samples_per_pixel} samples per pixel and extra samples {extra_samples:?} is unsupported")]
    UnsupportedConfiguration {
        /// The PhotometricInterpretation of the image.
        photometric_interpretation: PhotometricInterpretation,
        /// The BitsPerSample of the image.
        bits_per_sample: Vec<u16>,
        /// The SamplesPerPixel of the image.
        samples_per_pixel: u16,
        /// The ExtraSamples of the image, empty when absent.
        extra_samples: Vec<u16>,
    },

    /// A tag required to interpret the image is absent.
    #[error("required tag {0:?} not found")]
    MissingTag(Tag),

    /// A GeoKey points at an overflow tag that the IFD does not contain.
    #[error("GeoKey {key} references tag {tag:?}, which is not present")]
    MissingReferencedTag {
        /// The GeoKey id.
        key: u16,
        /// The referenced tag.
        tag: Tag,
    },

    /// A tag holds values of the wrong type or shape.
    #[error("invalid value for tag {tag:?}: {reason}")]
    InvalidTagValue {
        /// The offending tag.
        tag: Tag,
        /// What was wrong with it.
        reason: String,
    },

    /// A value conversion found an element of another type.
    #[error("expected {expected}, {found:?} found")]
    UnexpectedValue {
        /// The requested kind of element.
        expected: &'static str,
        /// The element that was found instead.
        found: Value,
    },

    /// The GeoKey directory is structurally broken.
    #[error("invalid GeoKey directory: {0}")]
    InvalidGeoKeyDirectory(String),

    /// The chain of IFD offsets loops back onto itself.
    #[error("IFD offset {0} was already visited; the file contains a cycle in its IFD chain")]
    CycleInOffsets(u64),

    /// A configured [`Limits`][crate::metadata::Limits] bound was exceeded.
    #[error("{limit} limit of {max} exceeded: {requested}")]
    LimitExceeded {
        /// Which limit.
        limit: &'static str,
        /// The requested amount.
        requested: u64,
        /// The configured maximum.
        max: u64,
    },

    /// A strip or tile index beyond the image's chunk count.
    #[error("chunk index {0} requested, image has {1} chunks")]
    InvalidChunkIndex(usize, usize),

    /// An integer conversion to or from a platform size failed.
    #[error("platform or format size limits exceeded")]
    IntSize(#[from] std::num::TryFromIntError),

    /// IO Error.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// External error, e.g. from a registered decoder.
    #[error(transparent)]
    External(Box<dyn std::error::Error + Send + Sync>),
}

impl TiffMetaError {
    /// Attribute a short read to `stage`. Other errors pass through.
    pub(crate) fn at(self, stage: Stage) -> Self {
        match self {
            TiffMetaError::Truncated {
                offset,
                length,
                available,
                ..
            } => TiffMetaError::Truncated {
                stage,
                offset,
                length,
                available,
            },
            other => other,
        }
    }

    /// Attribute a failed value conversion to `tag`.
    pub(crate) fn for_tag(self, tag: Tag) -> Self {
        match self {
            TiffMetaError::UnexpectedValue { expected, found } => TiffMetaError::InvalidTagValue {
                tag,
                reason: format!("expected {expected}, {found:?} found"),
            },
            TiffMetaError::IntSize(_) => TiffMetaError::InvalidTagValue {
                tag,
                reason: "value out of range".to_string(),
            },
            other => other,
        }
    }
}

/// Crate-specific result type.
pub type TiffMetaResult<T> = std::result::Result<T, TiffMetaError>;
