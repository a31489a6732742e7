use std::io::Read;

use bytes::Bytes;
use log::trace;

use crate::error::{Stage, TiffMetaError, TiffMetaResult};
use crate::ifd::Field;
use crate::metadata::fetch::MetadataCursor;
use crate::metadata::{Limits, MetadataFetch};
use crate::reader::{EndianAwareReader, Endianness};
use crate::tiff::tags::{Tag, Type};
use crate::tiff::Value;

/// One 12-byte IFD entry, exactly as stored in the file.
///
/// The value field holds the value itself when it fits in 4 bytes, and the file offset of the
/// value otherwise. Use [`RawEntry::resolve`] to decode it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry {
    /// Tag id
    pub tag: u16,
    /// Field type code, not yet validated
    pub type_code: u16,
    /// Number of elements (not bytes)
    pub count: u32,
    /// Inline value or offset, undecoded
    pub value_field: [u8; 4],
}

impl RawEntry {
    /// Tag (2) + type (2) + count (4) + value or offset (4)
    pub const SIZE: u64 = 12;

    pub(crate) fn read_from(reader: &mut EndianAwareReader) -> TiffMetaResult<Self> {
        let tag = reader.read_u16()?;
        let type_code = reader.read_u16()?;
        let count = reader.read_u32()?;
        let mut value_field = [0; 4];
        reader.read_exact(&mut value_field)?;
        Ok(Self {
            tag,
            type_code,
            count,
            value_field,
        })
    }

    /// The tag of this entry.
    pub fn tag(&self) -> Tag {
        Tag::from_u16_exhaustive(self.tag)
    }

    /// The validated field type.
    pub fn field_type(&self) -> TiffMetaResult<Type> {
        Type::from_u16(self.type_code).ok_or(TiffMetaError::UnsupportedType {
            tag: self.tag(),
            type_code: self.type_code,
        })
    }

    /// Total byte length of the value, `count * element width`.
    pub fn value_byte_length(&self) -> TiffMetaResult<u32> {
        let field_type = self.field_type()?;
        self.count
            .checked_mul(field_type.size())
            .ok_or(TiffMetaError::Overflow {
                tag: self.tag(),
                field_type,
                count: self.count,
            })
    }

    /// Returns `true` if the value is stored in the value field itself.
    pub fn is_inline(&self) -> TiffMetaResult<bool> {
        Ok(self.value_byte_length()? <= 4)
    }

    /// The value field read as an offset in the file's byte order.
    pub fn offset(&self, endianness: Endianness) -> u32 {
        match endianness {
            Endianness::LittleEndian => u32::from_le_bytes(self.value_field),
            Endianness::BigEndian => u32::from_be_bytes(self.value_field),
        }
    }

    /// Decode the value of this entry, following the offset when it doesn't fit inline.
    pub fn resolve<F: MetadataFetch>(
        &self,
        fetch: &F,
        endianness: Endianness,
        limits: &Limits,
    ) -> TiffMetaResult<Field> {
        let tag = self.tag();
        let field_type = self.field_type()?;
        let value_byte_length = self.value_byte_length()?;

        if self.count == 0 {
            return Ok(Field::new(tag, field_type, 0, vec![]));
        }

        let data = if value_byte_length <= 4 {
            // Values are left-aligned in the value field
            let inline = Bytes::copy_from_slice(&self.value_field[..value_byte_length as usize]);
            EndianAwareReader::new(inline, endianness)
        } else {
            if let Some(max) = limits.max_value_bytes {
                if value_byte_length > max {
                    return Err(TiffMetaError::LimitExceeded {
                        limit: "value byte length",
                        requested: value_byte_length.into(),
                        max: max.into(),
                    });
                }
            }
            let offset = self.offset(endianness);
            trace!("reading {value_byte_length} bytes of {tag:?} at offset {offset}");
            let mut cursor = MetadataCursor::new_with_offset(
                fetch,
                endianness,
                offset.into(),
                Stage::Value(tag),
            );
            cursor.read(value_byte_length.into())?
        };

        decode_field(data, tag, field_type, self.count)
    }
}

fn decode_field(
    mut data: EndianAwareReader,
    tag: Tag,
    field_type: Type,
    count: u32,
) -> TiffMetaResult<Field> {
    let read_element: fn(&mut EndianAwareReader) -> TiffMetaResult<Value> = match field_type {
        Type::ASCII => {
            let bytes = Bytes::copy_from_slice(data.as_ref());
            return Ok(Field::ascii(tag, count, bytes));
        }
        Type::BYTE => |data| Ok(Value::Byte(data.read_u8()?)),
        Type::UNDEFINED => |data| Ok(Value::Undefined(data.read_u8()?)),
        Type::SBYTE => |data| Ok(Value::SignedByte(data.read_i8()?)),
        Type::SHORT => |data| Ok(Value::Short(data.read_u16()?)),
        Type::SSHORT => |data| Ok(Value::SignedShort(data.read_i16()?)),
        Type::LONG => |data| Ok(Value::Unsigned(data.read_u32()?)),
        Type::SLONG => |data| Ok(Value::Signed(data.read_i32()?)),
        Type::RATIONAL => |data| Ok(Value::Rational(data.read_u32()?, data.read_u32()?)),
        Type::SRATIONAL => |data| Ok(Value::SRational(data.read_i32()?, data.read_i32()?)),
        Type::FLOAT => |data| Ok(Value::Float(data.read_f32()?)),
        Type::DOUBLE => |data| Ok(Value::Double(data.read_f64()?)),
    };
    let values = (0..count)
        .map(|_| read_element(&mut data))
        .collect::<TiffMetaResult<Vec<_>>>()?;
    Ok(Field::new(tag, field_type, count, values))
}
