use ntex_bytes::{Bytes, BytesMut};

use super::varint::{put_uvarint, read_uvarint, uvarint_size};
use super::{rollback_on_error, Type};
use crate::error::{KafkaEncodeError, KafkaParseError};
use crate::types::{TaggedField, TaggedFieldSet};

/// Tagged field section of flexible message versions.
///
/// `uvarint(count)` followed by `uvarint(tag) uvarint(size) data` per field.
/// Tags are strictly increasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TaggedFields;

impl Type for TaggedFields {
    type Value = TaggedFieldSet;
    const NAME: &'static str = "TaggedFields";

    fn encoded_size(value: &TaggedFieldSet) -> usize {
        value.iter().fold(uvarint_size(value.len() as u64), |size, field| {
            size + uvarint_size(u64::from(field.tag))
                + uvarint_size(field.data.len() as u64)
                + field.data.len()
        })
    }

    fn pack(value: &TaggedFieldSet, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        let out_of_range = |len: usize| KafkaEncodeError::OutOfRange {
            name: Self::NAME,
            value: len as i128,
        };

        rollback_on_error(buf, |buf| {
            let count = u32::try_from(value.len()).map_err(|_| out_of_range(value.len()))?;
            put_uvarint(u64::from(count), buf);

            let mut last = None;
            for field in value.iter() {
                if last.is_some_and(|last| last >= field.tag) {
                    return Err(KafkaEncodeError::TagOrder(field.tag));
                }
                last = Some(field.tag);

                let size =
                    u32::try_from(field.data.len()).map_err(|_| out_of_range(field.data.len()))?;
                put_uvarint(u64::from(field.tag), buf);
                put_uvarint(u64::from(size), buf);
                buf.extend_from_slice(&field.data);
            }
            Ok(())
        })
    }

    fn unpack(input: &[u8]) -> Result<(TaggedFieldSet, usize), KafkaParseError> {
        let (count, mut offset) = read_uvarint(input, 32, Self::NAME)?;

        // a field needs at least two bytes
        let mut fields = Vec::with_capacity((count as usize).min((input.len() - offset) / 2));
        let mut last = None;
        for _ in 0..count {
            let (tag, size) = read_uvarint(&input[offset..], 32, Self::NAME)?;
            offset += size;
            let tag = tag as u32;
            if last.is_some_and(|last| last >= tag) {
                return Err(KafkaParseError::InvalidTagOrder(tag));
            }
            last = Some(tag);

            let (len, size) = read_uvarint(&input[offset..], 32, Self::NAME)?;
            offset += size;
            let data = &input[offset..];
            decode_check_len!(data, len as usize);
            fields.push(TaggedField {
                tag,
                data: Bytes::copy_from_slice(&data[..len as usize]),
            });
            offset += len as usize;
        }
        Ok((TaggedFieldSet(fields), offset))
    }
}
