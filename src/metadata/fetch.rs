use std::ops::Range;

use bytes::Bytes;

use crate::error::{Stage, TiffMetaError, TiffMetaResult};
use crate::reader::{EndianAwareReader, Endianness, FileReader};

/// A data source that can be used with [`TiffMetadataReader`] and [`ImageFileDirectoryReader`] to
/// load [`ImageFileDirectory`]s.
///
/// Note that implementation is provided for [`FileReader`].
///
/// [`TiffMetadataReader`]: crate::metadata::TiffMetadataReader
/// [`ImageFileDirectoryReader`]: crate::metadata::ImageFileDirectoryReader
/// [`ImageFileDirectory`]: crate::ImageFileDirectory
pub trait MetadataFetch: Send + Sync {
    /// Fetch the specified range of bytes.
    fn fetch(&self, range: Range<u64>) -> TiffMetaResult<Bytes>;
}

impl<T: FileReader> MetadataFetch for T {
    fn fetch(&self, range: Range<u64>) -> TiffMetaResult<Bytes> {
        self.get_bytes(range)
    }
}

/// Buffering for the first `N` bytes of a file.
///
/// This is designed so that the many small requests made by the underlying tag reader get
/// intercepted here and served from the existing buffer when possible.
#[derive(Debug)]
pub struct PrefetchBuffer<F: MetadataFetch> {
    fetch: F,
    buffer: Bytes,
}

impl<F: MetadataFetch> PrefetchBuffer<F> {
    /// Construct a new PrefetchBuffer, catching the first `prefetch` bytes of the file.
    ///
    /// A source shorter than `prefetch` is buffered whole.
    pub fn new(fetch: F, prefetch: u64) -> TiffMetaResult<Self> {
        let buffer = match fetch.fetch(0..prefetch) {
            Ok(buffer) => buffer,
            Err(TiffMetaError::Truncated { available, .. }) if available < prefetch => {
                fetch.fetch(0..available)?
            }
            Err(e) => return Err(e),
        };
        Ok(Self { fetch, buffer })
    }
}

impl<F: MetadataFetch> MetadataFetch for PrefetchBuffer<F> {
    fn fetch(&self, range: Range<u64>) -> TiffMetaResult<Bytes> {
        if range.start <= range.end && range.end <= self.buffer.len() as u64 {
            let usize_range = range.start as usize..range.end as usize;
            Ok(self.buffer.slice(usize_range))
        } else {
            self.fetch.fetch(range)
        }
    }
}

pub(crate) struct MetadataCursor<'a, F: MetadataFetch> {
    fetch: &'a F,
    offset: u64,
    endianness: Endianness,
    stage: Stage,
}

impl<'a, F: MetadataFetch> MetadataCursor<'a, F> {
    pub fn new_with_offset(
        fetch: &'a F,
        endianness: Endianness,
        offset: u64,
        stage: Stage,
    ) -> Self {
        Self {
            fetch,
            offset,
            endianness,
            stage,
        }
    }

    /// Read the given number of bytes, advancing the internal cursor state by the same amount.
    ///
    /// Short reads are reported as truncation at this cursor's stage.
    pub(crate) fn read(&mut self, length: u64) -> TiffMetaResult<EndianAwareReader> {
        let range = self.offset..self.offset + length;
        self.offset += length;
        let bytes = self.fetch.fetch(range).map_err(|e| e.at(self.stage))?;
        Ok(EndianAwareReader::new(bytes, self.endianness))
    }

    /// Read a u16 from the cursor, advancing the internal state by 2 bytes.
    pub(crate) fn read_u16(&mut self) -> TiffMetaResult<u16> {
        self.read(2)?.read_u16()
    }

    /// Read a u32 from the cursor, advancing the internal state by 4 bytes.
    pub(crate) fn read_u32(&mut self) -> TiffMetaResult<u32> {
        self.read(4)?.read_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefetch_serves_prefix_and_falls_through() {
        let data: Bytes = (0u8..100).collect::<Vec<_>>().into();
        let prefetch = PrefetchBuffer::new(data.clone(), 16).unwrap();
        assert_eq!(prefetch.fetch(2..4).unwrap().as_ref(), &[2, 3]);
        assert_eq!(prefetch.fetch(10..20).unwrap(), data.slice(10..20));
        assert!(prefetch.fetch(90..120).is_err());
    }

    #[test]
    fn prefetch_shrinks_to_short_sources() {
        let data = Bytes::from_static(&[1, 2, 3]);
        let prefetch = PrefetchBuffer::new(data, 1024).unwrap();
        assert_eq!(prefetch.buffer.len(), 3);
        assert_eq!(prefetch.fetch(0..2).unwrap().as_ref(), &[1, 2]);
    }

    #[test]
    fn cursor_attributes_truncation_to_its_stage() {
        let data = Bytes::from_static(&[0, 1]);
        let mut cursor =
            MetadataCursor::new_with_offset(&data, Endianness::BigEndian, 0, Stage::Header);
        assert_eq!(cursor.read_u16().unwrap(), 1);
        let err = cursor.read_u32().unwrap_err();
        assert!(matches!(
            err,
            TiffMetaError::Truncated {
                stage: Stage::Header,
                offset: 2,
                ..
            }
        ));
    }
}
