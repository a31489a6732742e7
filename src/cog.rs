use crate::error::TiffMetaResult;
use crate::ifd::ImageFileDirectory;
use crate::metadata::{Limits, MetadataFetch, TiffMetadataReader};
use crate::reader::Endianness;

/// A TIFF file.
#[derive(Debug, Clone)]
pub struct TIFF {
    endianness: Endianness,
    ifds: Vec<ImageFileDirectory>,
}

impl TIFF {
    /// Create a new TIFF from existing IFDs.
    pub fn new(ifds: Vec<ImageFileDirectory>, endianness: Endianness) -> Self {
        Self { endianness, ifds }
    }

    /// Read the header and every IFD of the chain out of `fetch`, with default [`Limits`].
    pub fn open<F: MetadataFetch>(fetch: &F) -> TiffMetaResult<Self> {
        Self::open_with_limits(fetch, Limits::default())
    }

    /// Read the header and every IFD of the chain out of `fetch`.
    pub fn open_with_limits<F: MetadataFetch>(fetch: &F, limits: Limits) -> TiffMetaResult<Self> {
        let mut metadata_reader = TiffMetadataReader::try_open(fetch)?.with_limits(limits);
        let ifds = metadata_reader.read_all_ifds(fetch)?;
        Ok(Self::new(ifds, metadata_reader.endianness()))
    }

    /// The byte order of the file.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Access the underlying Image File Directories.
    pub fn ifds(&self) -> &[ImageFileDirectory] {
        &self.ifds
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use bytes::Bytes;
    use tiff::encoder::{colortype, TiffEncoder};

    use super::*;
    use crate::decoder::DecoderRegistry;
    use crate::mode::ImageMode;
    use crate::tiff::tags::PhotometricInterpretation;

    fn encode_rgb(width: u32, height: u32) -> (Vec<u8>, Vec<u8>) {
        let pixels: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        let mut file = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut file).unwrap();
            encoder
                .write_image::<colortype::RGB8>(width, height, &pixels)
                .unwrap();
        }
        (file.into_inner(), pixels)
    }

    #[test]
    fn open_file_written_by_tiff_crate() {
        let (file, pixels) = encode_rgb(7, 5);

        let decoder = tiff::decoder::Decoder::new(Cursor::new(file.clone()));
        let (width, height) = decoder.unwrap().dimensions().unwrap();

        let source = Bytes::from(file);
        let tiff = TIFF::open(&source).unwrap();
        assert_eq!(tiff.ifds().len(), 1);

        let ifd = &tiff.ifds()[0];
        assert_eq!(ifd.image_width(), Some(width));
        assert_eq!(ifd.image_height(), Some(height));
        assert_eq!(ifd.bits_per_sample(), &[8, 8, 8]);
        assert_eq!(
            ifd.photometric_interpretation(),
            Some(PhotometricInterpretation::RGB)
        );
        assert!(ifd.warnings().is_empty());

        let layout = ifd.image_layout().unwrap();
        assert_eq!(layout.mode(), ImageMode::RGB);

        // Uncompressed strips concatenate to the pixel buffer
        let registry = DecoderRegistry::default();
        let mut decoded = Vec::new();
        for index in 0..layout.chunk_layout().len() {
            let chunk = layout.fetch_chunk(index, &source).unwrap();
            decoded.extend_from_slice(&chunk.decode(&registry).unwrap());
        }
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn open_empty_chain() {
        let source = Bytes::from_static(b"MM\x00\x2A\x00\x00\x00\x00");
        let tiff = TIFF::open(&source).unwrap();
        assert_eq!(tiff.endianness(), Endianness::BigEndian);
        assert!(tiff.ifds().is_empty());
    }
}
