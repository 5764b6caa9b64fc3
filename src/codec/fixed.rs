use ntex_bytes::{BufMut, BytesMut};

use super::{Ranged, Type};
use crate::error::{KafkaEncodeError, KafkaParseError};

macro_rules! fixed_int {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $size:expr, $put:ident, $read:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Type for $name {
            type Value = $ty;
            const NAME: &'static str = stringify!($name);

            fn encoded_size(_: &$ty) -> usize {
                $size
            }

            fn pack(value: &$ty, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
                buf.$put(*value);
                Ok(())
            }

            fn unpack(input: &[u8]) -> Result<($ty, usize), KafkaParseError> {
                Ok((be_read!(input, $read, $size), $size))
            }
        }

        impl Ranged for $name {
            const MIN_VALUE: $ty = <$ty>::MIN;
            const MAX_VALUE: $ty = <$ty>::MAX;
        }
    };
}

/// Single byte, `0x01` for true and `0x00` for false.
///
/// Any nonzero byte decodes as `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Boolean;

impl Type for Boolean {
    type Value = bool;
    const NAME: &'static str = "Boolean";

    fn encoded_size(_: &bool) -> usize {
        1
    }

    fn pack(value: &bool, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        buf.put_u8(u8::from(*value));
        Ok(())
    }

    fn unpack(input: &[u8]) -> Result<(bool, usize), KafkaParseError> {
        decode_check_len!(input, 1);
        Ok((input[0] != 0, 1))
    }
}

/// Signed 8-bit integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Int8;

impl Type for Int8 {
    type Value = i8;
    const NAME: &'static str = "Int8";

    fn encoded_size(_: &i8) -> usize {
        1
    }

    fn pack(value: &i8, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        buf.put_i8(*value);
        Ok(())
    }

    fn unpack(input: &[u8]) -> Result<(i8, usize), KafkaParseError> {
        decode_check_len!(input, 1);
        Ok((input[0] as i8, 1))
    }
}

impl Ranged for Int8 {
    const MIN_VALUE: i8 = i8::MIN;
    const MAX_VALUE: i8 = i8::MAX;
}

fixed_int!(
    /// Big-endian signed 16-bit integer.
    Int16, i16, 2, put_i16, read_i16
);
fixed_int!(
    /// Big-endian unsigned 16-bit integer.
    UInt16, u16, 2, put_u16, read_u16
);
fixed_int!(
    /// Big-endian signed 32-bit integer.
    Int32, i32, 4, put_i32, read_i32
);
fixed_int!(
    /// Big-endian unsigned 32-bit integer.
    UInt32, u32, 4, put_u32, read_u32
);
fixed_int!(
    /// Big-endian signed 64-bit integer.
    Int64, i64, 8, put_i64, read_i64
);

/// IEEE-754 double, big-endian. NaN payloads are preserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Float64;

impl Type for Float64 {
    type Value = f64;
    const NAME: &'static str = "Float64";

    fn encoded_size(_: &f64) -> usize {
        8
    }

    fn pack(value: &f64, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        buf.put_u64(value.to_bits());
        Ok(())
    }

    fn unpack(input: &[u8]) -> Result<(f64, usize), KafkaParseError> {
        Ok((f64::from_bits(be_read!(input, read_u64, 8)), 8))
    }
}

/// 16 raw bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Uuid;

impl Type for Uuid {
    type Value = uuid::Uuid;
    const NAME: &'static str = "Uuid";

    fn encoded_size(_: &uuid::Uuid) -> usize {
        16
    }

    fn pack(value: &uuid::Uuid, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        buf.extend_from_slice(value.as_bytes());
        Ok(())
    }

    fn unpack(input: &[u8]) -> Result<(uuid::Uuid, usize), KafkaParseError> {
        decode_check_len!(input, 16);
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&input[..16]);
        Ok((uuid::Uuid::from_bytes(bytes), 16))
    }
}
