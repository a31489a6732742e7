use bytes::Bytes;

use crate::decoder::DecoderRegistry;
use crate::error::{TiffMetaError, TiffMetaResult};
use crate::reader::Endianness;
use crate::tiff::tags::{CompressionMethod, Predictor};

/// The raw bytes of one strip or tile, with what a decompressor needs to know about them.
///
/// This is returned by [`ImageLayout::fetch_chunk`][crate::ImageLayout::fetch_chunk]. Fetching
/// and decoding are separate so that the bytes can be handed to any decompressor.
///
/// Strips and tiles are both numbered in file order, the index into StripOffsets or TileOffsets.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub(crate) index: usize,
    pub(crate) compressed_bytes: Bytes,
    pub(crate) compression_method: CompressionMethod,
    pub(crate) predictor: Predictor,
    pub(crate) endianness: Endianness,
}

impl Chunk {
    /// The index of this chunk.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Access the compressed bytes underlying this chunk.
    ///
    /// Note that [`Bytes`] is reference-counted, so it is very cheap to clone if needed.
    pub fn compressed_bytes(&self) -> &Bytes {
        &self.compressed_bytes
    }

    /// Access the compression tag representing this chunk.
    pub fn compression_method(&self) -> CompressionMethod {
        self.compression_method
    }

    /// The predictor that has to be undone after decompression.
    pub fn predictor(&self) -> Predictor {
        self.predictor
    }

    /// The byte order of multi-byte samples.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Decompress this chunk with the decoder registered for its compression method.
    ///
    /// The result is still predicted when [`Chunk::predictor`] is not [`Predictor::None`].
    pub fn decode(&self, decoder_registry: &DecoderRegistry) -> TiffMetaResult<Bytes> {
        let decoder = decoder_registry
            .get(self.compression_method)
            .ok_or(TiffMetaError::UnsupportedCompression(self.compression_method))?;
        decoder.decode_chunk(self.compressed_bytes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(compression_method: CompressionMethod, predictor: Predictor) -> Chunk {
        Chunk {
            index: 0,
            compressed_bytes: Bytes::from_static(&[10, 1, 1, 1]),
            compression_method,
            predictor,
            endianness: Endianness::LittleEndian,
        }
    }

    #[test]
    fn predicted_bytes_are_left_alone() {
        let decoded = chunk(CompressionMethod::None, Predictor::Horizontal)
            .decode(&DecoderRegistry::default())
            .unwrap();
        assert_eq!(decoded.as_ref(), &[10, 1, 1, 1]);
    }

    #[test]
    fn unregistered_compression() {
        let err = chunk(CompressionMethod::PackBits, Predictor::None)
            .decode(&DecoderRegistry::default())
            .unwrap_err();
        assert!(matches!(
            err,
            TiffMetaError::UnsupportedCompression(CompressionMethod::PackBits)
        ));

        let err = chunk(CompressionMethod::None, Predictor::None)
            .decode(&DecoderRegistry::new())
            .unwrap_err();
        assert!(matches!(err, TiffMetaError::UnsupportedCompression(_)));
    }
}
