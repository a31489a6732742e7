use std::collections::HashSet;

use log::{debug, warn};

use crate::error::{Stage, TiffMetaError, TiffMetaResult};
use crate::ifd::{DecodeWarning, ImageFileDirectory};
use crate::metadata::fetch::MetadataCursor;
use crate::metadata::{Limits, MetadataFetch, RawEntry};
use crate::reader::Endianness;

const LITTLE_ENDIAN_MAGIC: [u8; 4] = *b"II\x2A\x00";
const BIG_ENDIAN_MAGIC: [u8; 4] = *b"MM\x00\x2A";

/// Entry point to reading TIFF metadata.
///
/// This is a stateful reader because we don't know how many IFDs will be encountered.
///
/// ```ignore
/// // fetch implements MetadataFetch
/// let mut metadata_reader = TiffMetadataReader::try_open(&fetch)?;
/// let ifds = metadata_reader.read_all_ifds(&fetch)?;
/// ```
#[derive(Debug)]
pub struct TiffMetadataReader {
    endianness: Endianness,
    next_ifd_offset: Option<u64>,
    visited: HashSet<u64>,
    limits: Limits,
}

impl TiffMetadataReader {
    /// Open a new TIFF file, validating the magic bytes and reading the endianness and the offset
    /// of the first IFD.
    ///
    /// This does not read any IFD metadata.
    pub fn try_open<F: MetadataFetch>(fetch: &F) -> TiffMetaResult<Self> {
        let mut cursor = MetadataCursor::new_with_offset(
            fetch,
            // The magic bytes are compared raw, before the byte order is known
            Endianness::LittleEndian,
            0,
            Stage::Header,
        );
        let mut magic = [0; 4];
        magic.copy_from_slice(cursor.read(4)?.as_ref());

        // Should be b"II*\0" for little endian or b"MM\0*" for big endian
        let endianness = match magic {
            LITTLE_ENDIAN_MAGIC => Endianness::LittleEndian,
            BIG_ENDIAN_MAGIC => Endianness::BigEndian,
            _ => return Err(TiffMetaError::InvalidFormat(magic)),
        };

        let mut cursor = MetadataCursor::new_with_offset(fetch, endianness, 4, Stage::Header);
        let first_ifd_location = cursor.read_u32()?;
        debug!("opened {endianness:?} TIFF, first IFD at offset {first_ifd_location}");

        Ok(Self {
            endianness,
            next_ifd_offset: (first_ifd_location != 0).then_some(first_ifd_location.into()),
            visited: HashSet::new(),
            limits: Limits::default(),
        })
    }

    /// Replace the default [`Limits`].
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the endianness of the file.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// The limits applied while reading.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns `true` if there are more IFDs to read.
    pub fn has_next_ifd(&self) -> bool {
        self.next_ifd_offset.is_some()
    }

    /// The byte offset of the start of the next IFD.
    ///
    /// This will be `None` if all IFDs have already been read.
    pub fn next_ifd_offset(&self) -> Option<u64> {
        self.next_ifd_offset
    }

    /// Read the next IFD from the file.
    ///
    /// If there are no more IFDs, returns `None`. On error the reader stays at the failing IFD.
    pub fn read_next_ifd<F: MetadataFetch>(
        &mut self,
        fetch: &F,
    ) -> TiffMetaResult<Option<ImageFileDirectory>> {
        let Some(ifd_start) = self.next_ifd_offset else {
            return Ok(None);
        };
        if self.visited.contains(&ifd_start) {
            return Err(TiffMetaError::CycleInOffsets(ifd_start));
        }
        if let Some(max) = self.limits.max_directories {
            if self.visited.len() >= max {
                return Err(TiffMetaError::LimitExceeded {
                    limit: "directory count",
                    requested: self.visited.len() as u64 + 1,
                    max: max as u64,
                });
            }
        }

        let ifd_reader = ImageFileDirectoryReader::open(fetch, ifd_start, self.endianness)?;
        let ifd = ifd_reader.read(fetch, &self.limits)?;
        self.visited.insert(ifd_start);
        self.next_ifd_offset = ifd.next_ifd_offset();
        Ok(Some(ifd))
    }

    /// Read all IFDs from the file.
    pub fn read_all_ifds<F: MetadataFetch>(
        &mut self,
        fetch: &F,
    ) -> TiffMetaResult<Vec<ImageFileDirectory>> {
        let mut ifds = vec![];
        while let Some(ifd) = self.read_next_ifd(fetch)? {
            ifds.push(ifd);
        }
        Ok(ifds)
    }
}

/// Reads the [`ImageFileDirectory`] metadata.
///
/// TIFF metadata is not necessarily contiguous in the files: IFDs are normally all stored
/// contiguously in the header, but TIFF 6.0 allows them to be non-contiguous or spread out through
/// the file.
///
/// Opening reads the raw entries and the offset of the following IFD; nothing is shared between
/// readers, so IFDs at known offsets can be decoded independently, including on separate threads.
#[derive(Debug, Clone)]
pub struct ImageFileDirectoryReader {
    endianness: Endianness,
    /// The byte offset of the beginning of this IFD
    ifd_start_offset: u64,
    /// The raw entries, in file order
    entries: Vec<RawEntry>,
    next_ifd_offset: Option<u64>,
}

impl ImageFileDirectoryReader {
    /// The size of the entry count that precedes the entries.
    const TAG_COUNT_BYTE_SIZE: u64 = 2;
    /// The size of the trailing next-IFD offset.
    const NEXT_IFD_OFFSET_BYTE_SIZE: u64 = 4;

    /// Read the entry count, the raw entries and the next IFD offset of the IFD starting at the
    /// given file offset.
    ///
    /// The whole `2 + 12 * N + 4` byte range must lie within the source.
    pub fn open<F: MetadataFetch>(
        fetch: &F,
        ifd_start_offset: u64,
        endianness: Endianness,
    ) -> TiffMetaResult<Self> {
        let mut cursor =
            MetadataCursor::new_with_offset(fetch, endianness, ifd_start_offset, Stage::Directory);

        let tag_count = u64::from(cursor.read_u16()?);
        let mut data = cursor.read(RawEntry::SIZE * tag_count + Self::NEXT_IFD_OFFSET_BYTE_SIZE)?;

        let entries = (0..tag_count)
            .map(|_| RawEntry::read_from(&mut data))
            .collect::<TiffMetaResult<Vec<_>>>()?;

        // If the ifd_offset is 0, no more IFDs
        let next_ifd_offset = match data.read_u32()? {
            0 => None,
            offset => Some(offset.into()),
        };

        debug!("read IFD at offset {ifd_start_offset} with {tag_count} entries");
        Ok(Self {
            endianness,
            ifd_start_offset,
            entries,
            next_ifd_offset,
        })
    }

    /// The byte offset of the beginning of this IFD.
    pub fn ifd_start_offset(&self) -> u64 {
        self.ifd_start_offset
    }

    /// The number of bytes the IFD occupies, `2 + 12 * N + 4`.
    pub fn byte_length(&self) -> u64 {
        Self::TAG_COUNT_BYTE_SIZE
            + RawEntry::SIZE * self.entries.len() as u64
            + Self::NEXT_IFD_OFFSET_BYTE_SIZE
    }

    /// The raw entries in file order.
    pub fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    /// The byte offset of the following IFD, `None` if this is the last one.
    pub fn next_ifd_offset(&self) -> Option<u64> {
        self.next_ifd_offset
    }

    /// Resolve all entries into an [`ImageFileDirectory`].
    ///
    /// A tag that occurs more than once keeps its first value; later occurrences are not resolved
    /// and are reported through [`ImageFileDirectory::warnings`].
    pub fn read<F: MetadataFetch>(
        &self,
        fetch: &F,
        limits: &Limits,
    ) -> TiffMetaResult<ImageFileDirectory> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        let mut fields = Vec::with_capacity(self.entries.len());
        let mut warnings = vec![];
        for (entry_index, entry) in self.entries.iter().enumerate() {
            if !seen.insert(entry.tag) {
                warn!(
                    "IFD at offset {}: duplicate tag {:?} in entry {entry_index} ignored",
                    self.ifd_start_offset,
                    entry.tag()
                );
                warnings.push(DecodeWarning::DuplicateTag {
                    tag: entry.tag(),
                    entry_index,
                });
                continue;
            }
            fields.push(entry.resolve(fetch, self.endianness, limits)?);
        }
        ImageFileDirectory::new(fields, warnings, self.endianness, self.next_ifd_offset)
    }
}
