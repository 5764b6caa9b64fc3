//! LEB128 variable-length integers.
//!
//! Every byte carries seven payload bits, least significant group first. The
//! high bit is set on every byte but the last. Encodings are always minimal and
//! the decoder rejects anything else, so the consumed size of a decoded value is
//! exactly the size it would be packed into.

use ntex_bytes::{BufMut, BytesMut};

use super::{Ranged, Type};
use crate::error::{KafkaEncodeError, KafkaParseError};

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

pub(crate) fn uvarint_size(mut value: u64) -> usize {
    let mut size = 1;
    while value >= u64::from(CONTINUATION) {
        value >>= 7;
        size += 1;
    }
    size
}

pub(crate) fn put_uvarint(mut value: u64, buf: &mut BytesMut) {
    while value >= u64::from(CONTINUATION) {
        buf.put_u8(value as u8 | CONTINUATION);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Decode an unsigned varint whose value fits in `bits` bits.
pub(crate) fn read_uvarint(
    input: &[u8],
    bits: u32,
    name: &'static str,
) -> Result<(u64, usize), KafkaParseError> {
    let max_len = bits.div_ceil(7) as usize;
    let mut value = 0u64;

    for (idx, byte) in input.iter().take(max_len).enumerate() {
        let shift = 7 * idx as u32;
        let group = u64::from(byte & PAYLOAD);
        let room = bits - shift;
        if room < 7 && group >> room != 0 {
            return Err(KafkaParseError::MalformedVarint(name));
        }
        value |= group << shift;

        if byte & CONTINUATION == 0 {
            // a trailing zero group is padding
            if idx > 0 && group == 0 {
                return Err(KafkaParseError::MalformedVarint(name));
            }
            return Ok((value, idx + 1));
        }
    }

    if input.len() < max_len {
        Err(KafkaParseError::Incomplete(1))
    } else {
        Err(KafkaParseError::MalformedVarint(name))
    }
}

fn zigzag32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

fn unzigzag32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

fn zigzag64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

fn unzigzag64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Unsigned 32-bit varint, up to 5 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UVarInt;

impl Type for UVarInt {
    type Value = u32;
    const NAME: &'static str = "UVarInt";

    fn encoded_size(value: &u32) -> usize {
        uvarint_size(u64::from(*value))
    }

    fn pack(value: &u32, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        put_uvarint(u64::from(*value), buf);
        Ok(())
    }

    fn unpack(input: &[u8]) -> Result<(u32, usize), KafkaParseError> {
        let (value, size) = read_uvarint(input, 32, Self::NAME)?;
        let value = u32::try_from(value).map_err(|_| KafkaParseError::MalformedVarint(Self::NAME))?;
        Ok((value, size))
    }
}

impl Ranged for UVarInt {
    const MIN_VALUE: u32 = u32::MIN;
    const MAX_VALUE: u32 = u32::MAX;
}

/// Unsigned 64-bit varint, up to 10 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct UVarLong;

impl Type for UVarLong {
    type Value = u64;
    const NAME: &'static str = "UVarLong";

    fn encoded_size(value: &u64) -> usize {
        uvarint_size(*value)
    }

    fn pack(value: &u64, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        put_uvarint(*value, buf);
        Ok(())
    }

    fn unpack(input: &[u8]) -> Result<(u64, usize), KafkaParseError> {
        read_uvarint(input, 64, Self::NAME)
    }
}

impl Ranged for UVarLong {
    const MIN_VALUE: u64 = u64::MIN;
    const MAX_VALUE: u64 = u64::MAX;
}

/// Zigzag encoded signed 32-bit varint, up to 5 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VarInt;

impl Type for VarInt {
    type Value = i32;
    const NAME: &'static str = "VarInt";

    fn encoded_size(value: &i32) -> usize {
        uvarint_size(u64::from(zigzag32(*value)))
    }

    fn pack(value: &i32, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        put_uvarint(u64::from(zigzag32(*value)), buf);
        Ok(())
    }

    fn unpack(input: &[u8]) -> Result<(i32, usize), KafkaParseError> {
        let (value, size) = read_uvarint(input, 32, Self::NAME)?;
        let value = u32::try_from(value).map_err(|_| KafkaParseError::MalformedVarint(Self::NAME))?;
        Ok((unzigzag32(value), size))
    }
}

impl Ranged for VarInt {
    const MIN_VALUE: i32 = i32::MIN;
    const MAX_VALUE: i32 = i32::MAX;
}

/// Zigzag encoded signed 64-bit varint, up to 10 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VarLong;

impl Type for VarLong {
    type Value = i64;
    const NAME: &'static str = "VarLong";

    fn encoded_size(value: &i64) -> usize {
        uvarint_size(zigzag64(*value))
    }

    fn pack(value: &i64, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        put_uvarint(zigzag64(*value), buf);
        Ok(())
    }

    fn unpack(input: &[u8]) -> Result<(i64, usize), KafkaParseError> {
        let (value, size) = read_uvarint(input, 64, Self::NAME)?;
        Ok((unzigzag64(value), size))
    }
}

impl Ranged for VarLong {
    const MIN_VALUE: i64 = i64::MIN;
    const MAX_VALUE: i64 = i64::MAX;
}
