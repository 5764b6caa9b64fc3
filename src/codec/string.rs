//! Length prefixed byte strings.
//!
//! Content is opaque, nothing here validates utf-8.

use ntex_bytes::{Bytes, BytesMut};

use super::{Prefix, Type};
use crate::error::{KafkaEncodeError, KafkaParseError};

fn pack_content(
    prefix: Prefix,
    name: &'static str,
    content: Option<&[u8]>,
    buf: &mut BytesMut,
) -> Result<(), KafkaEncodeError> {
    prefix.put(name, content.map(<[u8]>::len), buf)?;
    if let Some(content) = content {
        buf.extend_from_slice(content);
    }
    Ok(())
}

fn unpack_content(
    prefix: Prefix,
    name: &'static str,
    input: &[u8],
) -> Result<(Option<Bytes>, usize), KafkaParseError> {
    let (len, offset) = prefix.read(name, input)?;
    match len {
        None => Ok((None, offset)),
        Some(len) => {
            let content = &input[offset..];
            decode_check_len!(content, len);
            Ok((Some(Bytes::copy_from_slice(&content[..len])), offset + len))
        }
    }
}

macro_rules! byte_string {
    ($(#[$meta:meta])* $name:ident, $prefix:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Type for $name {
            type Value = Bytes;
            const NAME: &'static str = stringify!($name);

            fn encoded_size(value: &Bytes) -> usize {
                $prefix.size(Some(value.len())) + value.len()
            }

            fn pack(value: &Bytes, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
                pack_content($prefix, Self::NAME, Some(&value[..]), buf)
            }

            fn unpack(input: &[u8]) -> Result<(Bytes, usize), KafkaParseError> {
                match unpack_content($prefix, Self::NAME, input)? {
                    (Some(value), size) => Ok((value, size)),
                    (None, _) => Err(KafkaParseError::UnexpectedNull(Self::NAME)),
                }
            }
        }
    };
    ($(#[$meta:meta])* $name:ident, $prefix:expr, nullable) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Type for $name {
            type Value = Option<Bytes>;
            const NAME: &'static str = stringify!($name);

            fn encoded_size(value: &Option<Bytes>) -> usize {
                let len = value.as_ref().map(Bytes::len);
                $prefix.size(len) + len.unwrap_or(0)
            }

            fn pack(value: &Option<Bytes>, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
                pack_content($prefix, Self::NAME, value.as_deref(), buf)
            }

            fn unpack(input: &[u8]) -> Result<(Option<Bytes>, usize), KafkaParseError> {
                unpack_content($prefix, Self::NAME, input)
            }
        }
    };
}

byte_string!(
    /// `int16` length followed by the content.
    String16, Prefix::Int16
);
byte_string!(
    /// `int16` length followed by the content, `-1` marks null.
    NullableString, Prefix::Int16, nullable
);
byte_string!(
    /// `uvarint(len + 1)` followed by the content.
    CompactString, Prefix::Compact
);
byte_string!(
    /// `uvarint(len + 1)` followed by the content, `0` marks null.
    CompactNullableString, Prefix::Compact, nullable
);
byte_string!(
    /// `int32` length followed by the content.
    Bytes32, Prefix::Int32
);
byte_string!(
    /// `int32` length followed by the content, `-1` marks null.
    NullableBytes, Prefix::Int32, nullable
);
byte_string!(CompactBytes, Prefix::Compact);
byte_string!(CompactNullableBytes, Prefix::Compact, nullable);
