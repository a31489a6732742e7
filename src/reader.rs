//! Abstractions for reading byte ranges out of a TIFF source.

use std::fmt::Debug;
use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;
use std::sync::{Arc, Mutex};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use bytes::buf::Reader;
use bytes::{Buf, Bytes};

use crate::error::{Stage, TiffMetaError, TiffMetaResult};

/// The interface used to read TIFF files: "read these bytes at this offset".
///
/// Notes:
///
/// 1. [`Bytes`] implements this interface for a file that is already in memory.
///
/// 2. You can use [`SeekReader`] to implement [`FileReader`] for types that implement
///    [`std::io::Read`] and [`std::io::Seek`], for example [`std::fs::File`].
///
/// Implementations must fail with [`TiffMetaError::Truncated`] when `range` reaches past the end
/// of the source, rather than returning fewer bytes.
pub trait FileReader: Debug + Send + Sync {
    /// Retrieve the bytes in `range`.
    fn get_bytes(&self, range: Range<u64>) -> TiffMetaResult<Bytes>;
}

/// This allows Box<dyn FileReader + '_> to be used as a FileReader,
impl FileReader for Box<dyn FileReader + '_> {
    fn get_bytes(&self, range: Range<u64>) -> TiffMetaResult<Bytes> {
        self.as_ref().get_bytes(range)
    }
}

/// This allows Arc<dyn FileReader + '_> to be used as a FileReader,
impl FileReader for Arc<dyn FileReader + '_> {
    fn get_bytes(&self, range: Range<u64>) -> TiffMetaResult<Bytes> {
        self.as_ref().get_bytes(range)
    }
}

/// Fail with `Truncated` unless `range` lies within a source of `len` bytes.
pub(crate) fn check_bounds(range: &Range<u64>, len: u64) -> TiffMetaResult<()> {
    if range.start > range.end || range.end > len {
        return Err(TiffMetaError::Truncated {
            stage: Stage::Source,
            offset: range.start,
            length: range.end.saturating_sub(range.start),
            available: len,
        });
    }
    Ok(())
}

impl FileReader for Bytes {
    fn get_bytes(&self, range: Range<u64>) -> TiffMetaResult<Bytes> {
        check_bounds(&range, self.len() as u64)?;
        Ok(self.slice(range.start as usize..range.end as usize))
    }
}

/// A wrapper for things that implement [Read] and [Seek] to also implement [FileReader].
///
/// This wrapper is needed because `Read` and `Seek` require mutable access to seek and read data,
/// while the `FileReader` trait requires immutable access to read data.
///
/// This wrapper stores the inner reader in a `Mutex`. The length of the source is taken once, when
/// the wrapper is created.
#[derive(Debug)]
pub struct SeekReader<T: Read + Seek + Send + Debug> {
    inner: Mutex<T>,
    len: u64,
}

impl<T: Read + Seek + Send + Debug> SeekReader<T> {
    /// Create a new SeekReader from a reader.
    pub fn new(mut inner: T) -> TiffMetaResult<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        Ok(Self {
            inner: Mutex::new(inner),
            len,
        })
    }

    /// The length of the underlying source in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the underlying source is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: Read + Seek + Send + Debug> FileReader for SeekReader<T> {
    fn get_bytes(&self, range: Range<u64>) -> TiffMetaResult<Bytes> {
        check_bounds(&range, self.len)?;

        // A poisoned lock only means another reader panicked mid-read; the seek below resets
        // the position anyway.
        let mut file = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        file.seek(SeekFrom::Start(range.start))?;
        let mut buffer = vec![0; usize::try_from(range.end - range.start)?];
        file.read_exact(&mut buffer)?;
        Ok(buffer.into())
    }
}

/// Endianness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    /// Little Endian
    LittleEndian,
    /// Big Endian
    BigEndian,
}

pub(crate) struct EndianAwareReader {
    reader: Reader<Bytes>,
    endianness: Endianness,
}

impl EndianAwareReader {
    pub(crate) fn new(bytes: Bytes, endianness: Endianness) -> Self {
        Self {
            reader: bytes.reader(),
            endianness,
        }
    }

    /// Read a u8 from the cursor, advancing the internal state by 1 byte.
    pub(crate) fn read_u8(&mut self) -> TiffMetaResult<u8> {
        Ok(self.reader.read_u8()?)
    }

    /// Read a i8 from the cursor, advancing the internal state by 1 byte.
    pub(crate) fn read_i8(&mut self) -> TiffMetaResult<i8> {
        Ok(self.reader.read_i8()?)
    }

    pub(crate) fn read_u16(&mut self) -> TiffMetaResult<u16> {
        match self.endianness {
            Endianness::LittleEndian => Ok(self.reader.read_u16::<LittleEndian>()?),
            Endianness::BigEndian => Ok(self.reader.read_u16::<BigEndian>()?),
        }
    }

    pub(crate) fn read_i16(&mut self) -> TiffMetaResult<i16> {
        match self.endianness {
            Endianness::LittleEndian => Ok(self.reader.read_i16::<LittleEndian>()?),
            Endianness::BigEndian => Ok(self.reader.read_i16::<BigEndian>()?),
        }
    }

    pub(crate) fn read_u32(&mut self) -> TiffMetaResult<u32> {
        match self.endianness {
            Endianness::LittleEndian => Ok(self.reader.read_u32::<LittleEndian>()?),
            Endianness::BigEndian => Ok(self.reader.read_u32::<BigEndian>()?),
        }
    }

    pub(crate) fn read_i32(&mut self) -> TiffMetaResult<i32> {
        match self.endianness {
            Endianness::LittleEndian => Ok(self.reader.read_i32::<LittleEndian>()?),
            Endianness::BigEndian => Ok(self.reader.read_i32::<BigEndian>()?),
        }
    }

    pub(crate) fn read_f32(&mut self) -> TiffMetaResult<f32> {
        match self.endianness {
            Endianness::LittleEndian => Ok(self.reader.read_f32::<LittleEndian>()?),
            Endianness::BigEndian => Ok(self.reader.read_f32::<BigEndian>()?),
        }
    }

    pub(crate) fn read_f64(&mut self) -> TiffMetaResult<f64> {
        match self.endianness {
            Endianness::LittleEndian => Ok(self.reader.read_f64::<LittleEndian>()?),
            Endianness::BigEndian => Ok(self.reader.read_f64::<BigEndian>()?),
        }
    }
}

impl AsRef<[u8]> for EndianAwareReader {
    fn as_ref(&self) -> &[u8] {
        self.reader.get_ref().as_ref()
    }
}

impl Read for EndianAwareReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn in_memory_reads_are_bounds_checked() {
        let bytes = Bytes::from_static(&[1, 2, 3, 4]);
        assert_eq!(bytes.get_bytes(1..3).unwrap().as_ref(), &[2, 3]);
        assert_eq!(bytes.get_bytes(4..4).unwrap().len(), 0);
        let err = bytes.get_bytes(2..6).unwrap_err();
        assert!(matches!(
            err,
            TiffMetaError::Truncated {
                offset: 2,
                length: 4,
                available: 4,
                ..
            }
        ));
    }

    #[test]
    fn seek_reader_matches_in_memory_reader() {
        let data: Vec<u8> = (0..32).collect();
        let reader = SeekReader::new(Cursor::new(data.clone())).unwrap();
        assert_eq!(reader.len(), 32);
        assert_eq!(
            reader.get_bytes(8..12).unwrap(),
            Bytes::from(data).get_bytes(8..12).unwrap()
        );
        assert!(matches!(
            reader.get_bytes(30..40),
            Err(TiffMetaError::Truncated { available: 32, .. })
        ));
    }

    #[test]
    fn shared_readers_forward_to_the_source() {
        let shared: Arc<dyn FileReader> = Arc::new(Bytes::from_static(&[1, 2, 3, 4]));
        let boxed: Box<dyn FileReader> = Box::new(shared.clone());
        assert_eq!(shared.get_bytes(0..2).unwrap().as_ref(), &[1, 2]);
        assert_eq!(boxed.get_bytes(2..4).unwrap().as_ref(), &[3, 4]);
        assert!(boxed.get_bytes(3..5).is_err());
    }

    #[test]
    fn endian_aware_reads() {
        let bytes = Bytes::from_static(&[0x2A, 0x00, 0x00, 0x2A]);
        let mut le = EndianAwareReader::new(bytes.clone(), Endianness::LittleEndian);
        assert_eq!(le.read_u16().unwrap(), 42);
        let mut be = EndianAwareReader::new(bytes.slice(2..), Endianness::BigEndian);
        assert_eq!(be.read_u16().unwrap(), 42);
    }
}
