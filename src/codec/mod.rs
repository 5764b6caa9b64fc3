use ntex_bytes::{BufMut, Bytes, BytesMut};

use crate::error::{KafkaEncodeError, KafkaParseError};

macro_rules! decode_check_len {
    ($buf:ident, $size:expr) => {
        let size: usize = $size;
        if $buf.len() < size {
            return Err($crate::KafkaParseError::Incomplete(size - $buf.len()));
        }
    };
}

macro_rules! be_read {
    ($input:ident, $fn:ident, $size:expr) => {{
        decode_check_len!($input, $size);
        <byteorder::BigEndian as byteorder::ByteOrder>::$fn(&$input[..$size])
    }};
}

mod array;
mod fixed;
mod string;
mod tagged;
mod varint;

pub use self::array::{ArrayInt32, CompactArray, CompactNullableArray};
pub use self::fixed::{Boolean, Float64, Int16, Int32, Int64, Int8, UInt16, UInt32, Uuid};
pub use self::string::{
    Bytes32, CompactBytes, CompactNullableBytes, CompactNullableString, CompactString,
    NullableBytes, NullableString, String16,
};
pub use self::tagged::TaggedFields;
pub use self::varint::{UVarInt, UVarLong, VarInt, VarLong};

/// A stateless wire codec for one protocol primitive.
///
/// Implementors are zero-sized; the codec is selected by type, never by value.
/// `pack` appends to a caller-owned buffer, `unpack` reads from the front of a
/// slice and reports how many bytes the value occupied, so the caller can advance
/// its own cursor.
pub trait Type {
    type Value;

    /// Protocol name of the type, used in error reports.
    const NAME: &'static str;

    /// Number of bytes `pack` appends for `value`.
    fn encoded_size(value: &Self::Value) -> usize;

    /// Append the encoded `value` to `buf`.
    ///
    /// On error nothing is appended.
    fn pack(value: &Self::Value, buf: &mut BytesMut) -> Result<(), KafkaEncodeError>;

    /// Decode a value from the start of `input`, returning it together with the
    /// number of consumed bytes.
    fn unpack(input: &[u8]) -> Result<(Self::Value, usize), KafkaParseError>;

    /// Decode a value starting at `offset` inside `input`.
    fn unpack_at(input: &[u8], offset: usize) -> Result<(Self::Value, usize), KafkaParseError> {
        match input.get(offset..) {
            Some(rest) => Self::unpack(rest),
            None => Err(KafkaParseError::Incomplete(offset - input.len())),
        }
    }

    /// Encode `value` into a new buffer.
    fn to_bytes(value: &Self::Value) -> Result<Bytes, KafkaEncodeError> {
        let mut buf = BytesMut::with_capacity(Self::encoded_size(value));
        Self::pack(value, &mut buf)?;
        Ok(buf.freeze())
    }
}

/// Integer codecs with a bounded value domain.
pub trait Ranged: Type {
    const MIN_VALUE: Self::Value;
    const MAX_VALUE: Self::Value;

    /// Pack an integer of any width, failing if it does not fit the domain.
    fn pack_checked<V>(value: V, buf: &mut BytesMut) -> Result<(), KafkaEncodeError>
    where
        V: Copy + Into<i128> + TryInto<Self::Value>,
    {
        let checked = value.try_into().map_err(|_| KafkaEncodeError::OutOfRange {
            name: Self::NAME,
            value: value.into(),
        })?;
        Self::pack(&checked, buf)
    }
}

/// Length or count prefix shared by strings, bytes and arrays.
///
/// Fixed prefixes use `-1` for null, compact prefixes store `len + 1` as an
/// unsigned varint and use `0` for null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Prefix {
    Int16,
    Int32,
    Compact,
}

impl Prefix {
    pub(crate) fn size(self, len: Option<usize>) -> usize {
        match self {
            Prefix::Int16 => 2,
            Prefix::Int32 => 4,
            Prefix::Compact => varint::uvarint_size(len.map_or(0, |len| len as u64 + 1)),
        }
    }

    /// Validates `len` before anything is written.
    pub(crate) fn put(
        self,
        name: &'static str,
        len: Option<usize>,
        buf: &mut BytesMut,
    ) -> Result<(), KafkaEncodeError> {
        let out_of_range = |len: usize| KafkaEncodeError::OutOfRange {
            name,
            value: len as i128,
        };

        match self {
            Prefix::Int16 => {
                let prefix = match len {
                    None => -1,
                    Some(len) => i16::try_from(len).map_err(|_| out_of_range(len))?,
                };
                buf.put_i16(prefix);
            }
            Prefix::Int32 => {
                let prefix = match len {
                    None => -1,
                    Some(len) => i32::try_from(len).map_err(|_| out_of_range(len))?,
                };
                buf.put_i32(prefix);
            }
            Prefix::Compact => {
                let prefix = match len {
                    None => 0,
                    Some(len) => u32::try_from(len)
                        .ok()
                        .and_then(|len| len.checked_add(1))
                        .ok_or_else(|| out_of_range(len))?,
                };
                varint::put_uvarint(u64::from(prefix), buf);
            }
        }
        Ok(())
    }

    /// Returns the decoded length (`None` for the null sentinel) and the prefix size.
    pub(crate) fn read(
        self,
        name: &'static str,
        input: &[u8],
    ) -> Result<(Option<usize>, usize), KafkaParseError> {
        match self {
            Prefix::Int16 => {
                let prefix = be_read!(input, read_i16, 2);
                Ok((fixed_length(i64::from(prefix))?, 2))
            }
            Prefix::Int32 => {
                let prefix = be_read!(input, read_i32, 4);
                Ok((fixed_length(i64::from(prefix))?, 4))
            }
            Prefix::Compact => {
                let (prefix, size) = varint::read_uvarint(input, 32, name)?;
                Ok((prefix.checked_sub(1).map(|len| len as usize), size))
            }
        }
    }
}

fn fixed_length(prefix: i64) -> Result<Option<usize>, KafkaParseError> {
    match prefix {
        -1 => Ok(None),
        len if len < 0 => Err(KafkaParseError::InvalidLength(len)),
        len => Ok(Some(len as usize)),
    }
}

/// Run `f` against `buf`, dropping whatever it appended if it fails.
pub(crate) fn rollback_on_error<F>(buf: &mut BytesMut, f: F) -> Result<(), KafkaEncodeError>
where
    F: FnOnce(&mut BytesMut) -> Result<(), KafkaEncodeError>,
{
    let start = buf.len();
    let result = f(buf);
    if result.is_err() {
        buf.truncate(start);
    }
    result
}
