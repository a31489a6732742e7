//! Interpretation of an IFD as an image: pixel mode and strip or tile geometry.
//!
//! The mode describes how the decompressed bytes of every chunk are to be read; reassembling the
//! chunks into an image is left to the caller.

use std::ops::Range;

use crate::chunk::Chunk;
use crate::error::{Stage, TiffMetaError, TiffMetaResult};
use crate::ifd::ImageFileDirectory;
use crate::metadata::MetadataFetch;
use crate::reader::Endianness;
use crate::tiff::tags::{
    CompressionMethod, ExtraSamples, PhotometricInterpretation, PlanarConfiguration, Predictor,
    Tag,
};

/// How the pixels of an image are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMode {
    /// 1-bit black and white, 0 is black.
    Bilevel,
    /// Indices into the ColorMap.
    Paletted,
    /// Grayscale, 0 is black.
    Gray,
    /// Grayscale, 0 is white.
    GrayInvert,
    /// Red, green and blue samples.
    RGB,
    /// RGB with premultiplied (associated) alpha.
    RGBA,
    /// RGB with straight (unassociated) alpha.
    NRGBA,
}

/// Where the chunks of an image live in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkLayout {
    /// Bands of full-width rows.
    Strips {
        /// The number of rows in each strip; the last one may be shorter.
        rows_per_strip: u32,
        /// The byte offset of each strip.
        offsets: Vec<u64>,
        /// The compressed byte length of each strip.
        byte_counts: Vec<u64>,
    },
    /// Rectangular blocks.
    Tiles {
        /// The number of columns in each tile.
        tile_width: u32,
        /// The number of rows in each tile.
        tile_height: u32,
        /// The byte offset of each tile.
        offsets: Vec<u64>,
        /// The compressed byte length of each tile.
        byte_counts: Vec<u64>,
    },
}

impl ChunkLayout {
    fn from_ifd(ifd: &ImageFileDirectory, image_height: u32) -> TiffMetaResult<Self> {
        let tiled = ifd.tile_width().is_some() || ifd.tile_offsets().is_some();
        if tiled {
            let tile_width = ifd.tile_width().ok_or(TiffMetaError::MissingTag(Tag::TileWidth))?;
            let tile_height = ifd
                .tile_height()
                .ok_or(TiffMetaError::MissingTag(Tag::TileLength))?;
            let (offsets, byte_counts) = paired(
                Tag::TileOffsets,
                ifd.tile_offsets(),
                Tag::TileByteCounts,
                ifd.tile_byte_counts(),
            )?;
            Ok(Self::Tiles {
                tile_width,
                tile_height,
                offsets,
                byte_counts,
            })
        } else {
            let (offsets, byte_counts) = paired(
                Tag::StripOffsets,
                ifd.strip_offsets(),
                Tag::StripByteCounts,
                ifd.strip_byte_counts(),
            )?;
            Ok(Self::Strips {
                // "The default is 2**32 - 1, which is effectively infinity"
                rows_per_strip: ifd.rows_per_strip().unwrap_or(image_height).min(image_height),
                offsets,
                byte_counts,
            })
        }
    }

    /// The byte offset of each chunk.
    pub fn offsets(&self) -> &[u64] {
        match self {
            Self::Strips { offsets, .. } | Self::Tiles { offsets, .. } => offsets,
        }
    }

    /// The compressed byte length of each chunk.
    pub fn byte_counts(&self) -> &[u64] {
        match self {
            Self::Strips { byte_counts, .. } | Self::Tiles { byte_counts, .. } => byte_counts,
        }
    }

    /// The number of chunks.
    pub fn len(&self) -> usize {
        self.offsets().len()
    }

    /// Returns `true` if the image references no chunks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn paired(
    offsets_tag: Tag,
    offsets: Option<&[u64]>,
    byte_counts_tag: Tag,
    byte_counts: Option<&[u64]>,
) -> TiffMetaResult<(Vec<u64>, Vec<u64>)> {
    let offsets = offsets.unwrap_or_default();
    let byte_counts = byte_counts.unwrap_or_default();
    if offsets.len() != byte_counts.len() {
        return Err(TiffMetaError::InvalidTagValue {
            tag: byte_counts_tag,
            reason: format!(
                "{} byte counts for {} entries in {offsets_tag:?}",
                byte_counts.len(),
                offsets.len()
            ),
        });
    }
    Ok((offsets.to_vec(), byte_counts.to_vec()))
}

/// Everything needed to hand the chunks of one image to a decompressor.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLayout {
    mode: ImageMode,
    width: u32,
    height: u32,
    bits_per_sample: u16,
    samples_per_pixel: u16,
    compression: CompressionMethod,
    predictor: Predictor,
    planar_configuration: PlanarConfiguration,
    endianness: Endianness,
    chunks: ChunkLayout,
}

impl ImageLayout {
    /// Derive the layout of the image described by `ifd`.
    ///
    /// Fails with [`TiffMetaError::MissingTag`] without ImageWidth or ImageLength, with
    /// [`TiffMetaError::UnsupportedCompression`] for compression codes outside the known set and
    /// with [`TiffMetaError::UnsupportedConfiguration`] when the tags don't describe one of the
    /// [`ImageMode`]s.
    pub fn from_ifd(ifd: &ImageFileDirectory) -> TiffMetaResult<Self> {
        let width = ifd
            .image_width()
            .ok_or(TiffMetaError::MissingTag(Tag::ImageWidth))?;
        let height = ifd
            .image_height()
            .ok_or(TiffMetaError::MissingTag(Tag::ImageLength))?;

        let compression_code = ifd.compression_code();
        let compression = CompressionMethod::from_u16(compression_code).ok_or(
            TiffMetaError::UnsupportedCompression(CompressionMethod::Unknown(compression_code)),
        )?;

        let mode = image_mode(ifd)?;
        let chunks = ChunkLayout::from_ifd(ifd, height)?;

        Ok(Self {
            mode,
            width,
            height,
            bits_per_sample: ifd.bits_per_sample().first().copied().unwrap_or(1),
            samples_per_pixel: ifd.samples_per_pixel(),
            compression,
            predictor: ifd.predictor().unwrap_or(Predictor::None),
            planar_configuration: ifd.planar_configuration(),
            endianness: ifd.endianness(),
            chunks,
        })
    }

    /// The pixel mode.
    pub fn mode(&self) -> ImageMode {
        self.mode
    }

    /// The image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The bit depth of every sample.
    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// The number of samples per pixel, including extra samples.
    pub fn samples_per_pixel(&self) -> u16 {
        self.samples_per_pixel
    }

    /// The compression scheme of every chunk.
    pub fn compression(&self) -> CompressionMethod {
        self.compression
    }

    /// The predictor the chunks were encoded with. It is never undone here.
    pub fn predictor(&self) -> Predictor {
        self.predictor
    }

    /// Whether samples are interleaved or stored in separate planes.
    pub fn planar_configuration(&self) -> PlanarConfiguration {
        self.planar_configuration
    }

    /// The strip or tile geometry.
    pub fn chunk_layout(&self) -> &ChunkLayout {
        &self.chunks
    }

    /// The number of chunks across and down the image.
    pub fn chunks_across_and_down(&self) -> (u32, u32) {
        match self.chunks {
            ChunkLayout::Strips { rows_per_strip, .. } => {
                (1, self.height.div_ceil(rows_per_strip.max(1)))
            }
            ChunkLayout::Tiles {
                tile_width,
                tile_height,
                ..
            } => (
                self.width.div_ceil(tile_width.max(1)),
                self.height.div_ceil(tile_height.max(1)),
            ),
        }
    }

    /// The byte range of chunk `index` in the file.
    pub fn chunk_byte_range(&self, index: usize) -> TiffMetaResult<Range<u64>> {
        let len = self.chunks.len();
        let (Some(&offset), Some(&byte_count)) = (
            self.chunks.offsets().get(index),
            self.chunks.byte_counts().get(index),
        ) else {
            return Err(TiffMetaError::InvalidChunkIndex(index, len));
        };
        let end = offset
            .checked_add(byte_count)
            .ok_or_else(|| TiffMetaError::InvalidTagValue {
                tag: match self.chunks {
                    ChunkLayout::Strips { .. } => Tag::StripByteCounts,
                    ChunkLayout::Tiles { .. } => Tag::TileByteCounts,
                },
                reason: format!("chunk {index} extends past the 64-bit offset space"),
            })?;
        Ok(offset..end)
    }

    /// Fetch the raw, still compressed bytes of chunk `index`.
    pub fn fetch_chunk<F: MetadataFetch>(&self, index: usize, fetch: &F) -> TiffMetaResult<Chunk> {
        let range = self.chunk_byte_range(index)?;
        let compressed_bytes = fetch.fetch(range).map_err(|e| e.at(Stage::Chunk(index)))?;
        Ok(Chunk {
            index,
            compressed_bytes,
            compression_method: self.compression,
            predictor: self.predictor,
            endianness: self.endianness,
        })
    }
}

/// The decision table from tag combinations to [`ImageMode`].
fn image_mode(ifd: &ImageFileDirectory) -> TiffMetaResult<ImageMode> {
    // A missing PhotometricInterpretation is read as WhiteIsZero, the value 0
    let photometric_interpretation = ifd
        .photometric_interpretation()
        .unwrap_or(PhotometricInterpretation::WhiteIsZero);
    let bits_per_sample = ifd.bits_per_sample();
    let samples_per_pixel = ifd.samples_per_pixel();
    let extra_samples = ifd.extra_samples().unwrap_or_default();

    let unsupported = || TiffMetaError::UnsupportedConfiguration {
        photometric_interpretation,
        bits_per_sample: bits_per_sample.to_vec(),
        samples_per_pixel,
        extra_samples: extra_samples.to_vec(),
    };

    let single_depth = match bits_per_sample {
        [bits] if samples_per_pixel == 1 => Some(*bits),
        _ => None,
    };

    match photometric_interpretation {
        PhotometricInterpretation::WhiteIsZero | PhotometricInterpretation::BlackIsZero => {
            let inverted = photometric_interpretation == PhotometricInterpretation::WhiteIsZero;
            match single_depth {
                Some(1) if !inverted => Ok(ImageMode::Bilevel),
                Some(1..=8 | 16) if inverted => Ok(ImageMode::GrayInvert),
                Some(2..=8 | 16) => Ok(ImageMode::Gray),
                _ => Err(unsupported()),
            }
        }
        PhotometricInterpretation::RGBPalette => {
            let Some(bits @ (1 | 2 | 4 | 8)) = single_depth else {
                return Err(unsupported());
            };
            let color_map = ifd
                .color_map()
                .ok_or(TiffMetaError::MissingTag(Tag::ColorMap))?;
            let expected = 3 << bits;
            if color_map.len() != expected {
                return Err(TiffMetaError::InvalidTagValue {
                    tag: Tag::ColorMap,
                    reason: format!(
                        "{} entries for {bits}-bit samples, expected {expected}",
                        color_map.len()
                    ),
                });
            }
            Ok(ImageMode::Paletted)
        }
        PhotometricInterpretation::RGB => {
            let Some(&depth) = bits_per_sample.first() else {
                return Err(unsupported());
            };
            let uniform = bits_per_sample.len() == samples_per_pixel as usize
                && bits_per_sample.iter().all(|bits| *bits == depth);
            if !uniform || !matches!(depth, 8 | 16) {
                return Err(unsupported());
            }
            match (samples_per_pixel, extra_samples.first().copied()) {
                (3, _) => Ok(ImageMode::RGB),
                (4, Some(extra)) => match ExtraSamples::from_u16_exhaustive(extra) {
                    ExtraSamples::AssociatedAlpha => Ok(ImageMode::RGBA),
                    ExtraSamples::UnassociatedAlpha => Ok(ImageMode::NRGBA),
                    _ => Err(unsupported()),
                },
                _ => Err(unsupported()),
            }
        }
        _ => Err(unsupported()),
    }
}
