//! Decoders for different TIFF compression methods.
//!
//! Decompression itself is delegated to codec crates or to decoders registered by the caller.

use std::collections::HashMap;
use std::fmt::Debug;
use std::io::{Cursor, Read};

use bytes::Bytes;
use flate2::bufread::ZlibDecoder;

use crate::error::{TiffMetaError, TiffMetaResult};
use crate::tiff::tags::CompressionMethod;

/// A registry of decoders.
///
/// This allows end users to register their own decoders, for custom compression methods, or
/// override the default decoder implementations.
#[derive(Debug)]
pub struct DecoderRegistry(HashMap<CompressionMethod, Box<dyn Decoder>>);

impl DecoderRegistry {
    /// Create a new decoder registry with no decoders registered
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Register `decoder` for `method`, returning the decoder it replaces.
    pub fn register(
        &mut self,
        method: CompressionMethod,
        decoder: Box<dyn Decoder>,
    ) -> Option<Box<dyn Decoder>> {
        self.0.insert(method, decoder)
    }

    /// The decoder registered for `method`.
    pub fn get(&self, method: CompressionMethod) -> Option<&dyn Decoder> {
        self.0.get(&method).map(|decoder| decoder.as_ref())
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        let mut registry = HashMap::with_capacity(4);
        registry.insert(CompressionMethod::None, Box::new(UncompressedDecoder) as _);
        registry.insert(CompressionMethod::Deflate, Box::new(DeflateDecoder) as _);
        registry.insert(CompressionMethod::OldDeflate, Box::new(DeflateDecoder) as _);
        registry.insert(CompressionMethod::LZW, Box::new(LZWDecoder) as _);
        Self(registry)
    }
}

/// A trait to decompress the bytes of a TIFF strip or tile.
///
/// Implementations only decompress. Predictors are left in place.
pub trait Decoder: Debug + Send + Sync {
    /// Decompress one chunk.
    fn decode_chunk(&self, compressed_buffer: Bytes) -> TiffMetaResult<Bytes>;
}

/// A decoder for the Deflate compression method.
#[derive(Debug, Clone)]
pub struct DeflateDecoder;

impl Decoder for DeflateDecoder {
    fn decode_chunk(&self, compressed_buffer: Bytes) -> TiffMetaResult<Bytes> {
        let mut decoder = ZlibDecoder::new(Cursor::new(compressed_buffer));
        let mut result = Vec::new();
        decoder.read_to_end(&mut result)?;
        Ok(result.into())
    }
}

/// A decoder for the LZW compression method.
#[derive(Debug, Clone)]
pub struct LZWDecoder;

impl Decoder for LZWDecoder {
    fn decode_chunk(&self, compressed_buffer: Bytes) -> TiffMetaResult<Bytes> {
        // https://github.com/image-rs/image-tiff/blob/90ae5b8e54356a35e266fb24e969aafbcb26e990/src/decoder/stream.rs#L147
        let mut decoder = weezl::decode::Decoder::with_tiff_size_switch(weezl::BitOrder::Msb, 8);
        match decoder.decode(&compressed_buffer) {
            Err(e) => Err(TiffMetaError::External(Box::new(e))),
            Ok(result) => Ok(result.into()),
        }
    }
}

/// A decoder for uncompressed data.
#[derive(Debug, Clone)]
pub struct UncompressedDecoder;

impl Decoder for UncompressedDecoder {
    fn decode_chunk(&self, compressed_buffer: Bytes) -> TiffMetaResult<Bytes> {
        Ok(compressed_buffer)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    use super::*;

    #[test]
    fn default_registry() {
        let registry = DecoderRegistry::default();
        assert!(registry.get(CompressionMethod::None).is_some());
        assert!(registry.get(CompressionMethod::LZW).is_some());
        assert!(registry.get(CompressionMethod::OldDeflate).is_some());
        assert!(registry.get(CompressionMethod::PackBits).is_none());
        assert!(DecoderRegistry::new().as_ref().is_empty());
    }

    #[test]
    fn deflate_round_trip() {
        let data: Vec<u8> = (0..=255).cycle().take(1000).collect();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&data).unwrap();
        let compressed = encoder.finish().unwrap();

        let decoded = DeflateDecoder.decode_chunk(compressed.into()).unwrap();
        assert_eq!(decoded.as_ref(), data.as_slice());
    }

    #[test]
    fn lzw_round_trip() {
        let data = b"TOBEORNOTTOBEORTOBEORNOT".repeat(10);
        let compressed = weezl::encode::Encoder::with_tiff_size_switch(weezl::BitOrder::Msb, 8)
            .encode(&data)
            .unwrap();
        let decoded = LZWDecoder.decode_chunk(compressed.into()).unwrap();
        assert_eq!(decoded.as_ref(), data.as_slice());
    }

    #[test]
    fn corrupt_deflate_is_an_error() {
        assert!(DeflateDecoder
            .decode_chunk(Bytes::from_static(&[1, 2, 3, 4]))
            .is_err());
    }
}
