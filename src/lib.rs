//! Codecs for the primitive types of the Kafka wire protocol.
//!
//! Every primitive is a zero-sized codec implementing [`Type`]. Encoding appends
//! to a caller-owned `BytesMut`, decoding reads from a byte slice and returns the
//! value together with the number of consumed bytes:
//!
//! ```
//! use kafka_protocol_codec::{CompactArray, Int32, Type};
//!
//! let encoded = CompactArray::<Int32>::to_bytes(&vec![1, 2, 3]).unwrap();
//! assert_eq!(encoded.len(), 13);
//!
//! let (value, size) = CompactArray::<Int32>::unpack(&encoded).unwrap();
//! assert_eq!(value, vec![1, 2, 3]);
//! assert_eq!(size, 13);
//! ```
#![deny(rust_2018_idioms, unreachable_pub)]

mod codec;
mod error;
mod io;
pub mod types;

pub use self::codec::{
    ArrayInt32, Boolean, Bytes32, CompactArray, CompactBytes, CompactNullableArray,
    CompactNullableBytes, CompactNullableString, CompactString, Float64, Int16, Int32, Int64,
    Int8, NullableBytes, NullableString, Ranged, String16, TaggedFields, Type, UInt16, UInt32,
    UVarInt, UVarLong, Uuid, VarInt, VarLong,
};
pub use self::error::{KafkaCodecError, KafkaEncodeError, KafkaParseError};
pub use self::io::KafkaCodec;
