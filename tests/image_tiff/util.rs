use std::io::Cursor;

use bytes::Bytes;
use tiff::encoder::colortype::ColorType;
use tiff::encoder::compression::Compression;
use tiff::encoder::TiffEncoder;

use tiff_meta::decoder::DecoderRegistry;
use tiff_meta::metadata::{PrefetchBuffer, TiffMetadataReader};
use tiff_meta::TIFF;

pub(crate) fn open_tiff(file: &Bytes) -> TIFF {
    let prefetch_reader = PrefetchBuffer::new(file.clone(), 32 * 1024).unwrap();
    let mut metadata_reader = TiffMetadataReader::try_open(&prefetch_reader).unwrap();
    let ifds = metadata_reader.read_all_ifds(&prefetch_reader).unwrap();
    TIFF::new(ifds, metadata_reader.endianness())
}

/// Encode one image per entry of `pages`, all of the same size.
pub(crate) fn encode<C, D>(width: u32, height: u32, compression: D, pages: &[&[C::Inner]]) -> Bytes
where
    C: ColorType,
    [C::Inner]: tiff::encoder::TiffValue,
    D: Compression + Clone,
{
    let mut file = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut file).unwrap();
        for page in pages {
            encoder
                .write_image_with_compression::<C, D>(width, height, compression.clone(), page)
                .unwrap();
        }
    }
    file.into_inner().into()
}

/// The decompressed strips of the first IFD, concatenated.
pub(crate) fn decoded_strips(tiff: &TIFF, source: &Bytes, ifd: usize) -> Vec<u8> {
    let layout = tiff.ifds()[ifd].image_layout().unwrap();
    let registry = DecoderRegistry::default();
    let mut decoded = Vec::new();
    for index in 0..layout.chunk_layout().len() {
        let chunk = layout.fetch_chunk(index, source).unwrap();
        decoded.extend_from_slice(&chunk.decode(&registry).unwrap());
    }
    decoded
}
