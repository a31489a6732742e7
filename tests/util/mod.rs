//! Hand-assembled TIFF files for integration tests.
#![allow(dead_code)]

use bytes::Bytes;

use tiff_meta::metadata::{PrefetchBuffer, TiffMetadataReader};
use tiff_meta::reader::Endianness;
use tiff_meta::TIFF;

/// Offset of the data blob placed right after the header.
pub const BLOB_OFFSET: u64 = 8;

struct Entry {
    tag: u16,
    type_code: u16,
    count: u32,
    data: Vec<u8>,
}

/// Lays out a header, an optional data blob and a chain of IFDs, each followed by its out-of-line
/// values.
pub struct TiffBuilder {
    endianness: Endianness,
    blob: Vec<u8>,
    ifds: Vec<Vec<Entry>>,
}

impl TiffBuilder {
    pub fn new(endianness: Endianness) -> Self {
        Self {
            endianness,
            blob: vec![],
            ifds: vec![vec![]],
        }
    }

    pub fn little() -> Self {
        Self::new(Endianness::LittleEndian)
    }

    pub fn big() -> Self {
        Self::new(Endianness::BigEndian)
    }

    /// Bytes stored at [`BLOB_OFFSET`], e.g. strip data.
    pub fn blob(mut self, blob: &[u8]) -> Self {
        self.blob = blob.to_vec();
        self
    }

    /// Start the next IFD of the chain.
    pub fn next_ifd(mut self) -> Self {
        self.ifds.push(vec![]);
        self
    }

    /// Add an entry with already encoded value bytes.
    pub fn raw(mut self, tag: u16, type_code: u16, count: u32, data: Vec<u8>) -> Self {
        if let Some(ifd) = self.ifds.last_mut() {
            ifd.push(Entry {
                tag,
                type_code,
                count,
                data,
            });
        }
        self
    }

    pub fn byte(self, tag: u16, values: &[u8]) -> Self {
        self.raw(tag, 1, values.len() as u32, values.to_vec())
    }

    pub fn ascii(self, tag: u16, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        self.raw(tag, 2, data.len() as u32, data)
    }

    pub fn short(self, tag: u16, values: &[u16]) -> Self {
        let data: Vec<u8> = values.iter().flat_map(|v| self.u16_bytes(*v)).collect();
        self.raw(tag, 3, values.len() as u32, data)
    }

    pub fn long(self, tag: u16, values: &[u32]) -> Self {
        let data: Vec<u8> = values.iter().flat_map(|v| self.u32_bytes(*v)).collect();
        self.raw(tag, 4, values.len() as u32, data)
    }

    pub fn rational(self, tag: u16, values: &[(u32, u32)]) -> Self {
        let data: Vec<u8> = values
            .iter()
            .flat_map(|(n, d)| {
                let mut bytes = self.u32_bytes(*n).to_vec();
                bytes.extend(self.u32_bytes(*d));
                bytes
            })
            .collect();
        self.raw(tag, 5, values.len() as u32, data)
    }

    pub fn double(self, tag: u16, values: &[f64]) -> Self {
        let data: Vec<u8> = values
            .iter()
            .flat_map(|v| match self.endianness {
                Endianness::LittleEndian => v.to_le_bytes(),
                Endianness::BigEndian => v.to_be_bytes(),
            })
            .collect();
        self.raw(tag, 12, values.len() as u32, data)
    }

    fn u16_bytes(&self, value: u16) -> [u8; 2] {
        match self.endianness {
            Endianness::LittleEndian => value.to_le_bytes(),
            Endianness::BigEndian => value.to_be_bytes(),
        }
    }

    fn u32_bytes(&self, value: u32) -> [u8; 4] {
        match self.endianness {
            Endianness::LittleEndian => value.to_le_bytes(),
            Endianness::BigEndian => value.to_be_bytes(),
        }
    }

    /// The file and the offset of every IFD in it.
    pub fn build_with_offsets(&self) -> (Vec<u8>, Vec<u64>) {
        let mut file = match self.endianness {
            Endianness::LittleEndian => b"II\x2A\x00".to_vec(),
            Endianness::BigEndian => b"MM\x00\x2A".to_vec(),
        };
        file.extend(self.u32_bytes(0));
        file.extend(&self.blob);

        let mut offsets = vec![];
        let mut next_pointer = 4;
        for ifd in &self.ifds {
            let ifd_offset = file.len();
            offsets.push(ifd_offset as u64);
            let pointer = self.u32_bytes(ifd_offset as u32);
            file[next_pointer..next_pointer + 4].copy_from_slice(&pointer);

            let mut data_offset = ifd_offset + 2 + 12 * ifd.len() + 4;
            let mut values: Vec<u8> = vec![];
            file.extend(self.u16_bytes(ifd.len() as u16));
            for entry in ifd {
                file.extend(self.u16_bytes(entry.tag));
                file.extend(self.u16_bytes(entry.type_code));
                file.extend(self.u32_bytes(entry.count));
                if entry.data.len() <= 4 {
                    let mut value_field = entry.data.clone();
                    value_field.resize(4, 0);
                    file.extend(value_field);
                } else {
                    file.extend(self.u32_bytes(data_offset as u32));
                    data_offset += entry.data.len();
                    values.extend(&entry.data);
                }
            }
            next_pointer = file.len();
            file.extend(self.u32_bytes(0));
            file.extend(values);
        }
        (file, offsets)
    }

    pub fn build(&self) -> Bytes {
        self.build_with_offsets().0.into()
    }
}

/// Read the whole chain the way a caller would, through a prefetch buffer.
pub fn open_tiff(file: Bytes) -> TIFF {
    let prefetch_reader = PrefetchBuffer::new(file, 32 * 1024).unwrap();
    let mut metadata_reader = TiffMetadataReader::try_open(&prefetch_reader).unwrap();
    let ifds = metadata_reader.read_all_ifds(&prefetch_reader).unwrap();
    TIFF::new(ifds, metadata_reader.endianness())
}
