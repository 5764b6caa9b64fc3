use std::marker::PhantomData;

use ntex_bytes::BytesMut;

use super::{rollback_on_error, Prefix, Type};
use crate::error::{KafkaEncodeError, KafkaParseError};

fn elements_size<T: Type>(prefix: Prefix, items: Option<&[T::Value]>) -> usize {
    prefix.size(items.map(<[T::Value]>::len))
        + items.map_or(0, |items| items.iter().map(T::encoded_size).sum::<usize>())
}

fn pack_elements<T: Type>(
    prefix: Prefix,
    name: &'static str,
    items: Option<&[T::Value]>,
    buf: &mut BytesMut,
) -> Result<(), KafkaEncodeError> {
    rollback_on_error(buf, |buf| {
        prefix.put(name, items.map(<[T::Value]>::len), buf)?;
        for item in items.unwrap_or_default() {
            T::pack(item, buf)?;
        }
        Ok(())
    })
}

fn unpack_elements<T: Type>(
    prefix: Prefix,
    name: &'static str,
    input: &[u8],
) -> Result<(Option<Vec<T::Value>>, usize), KafkaParseError> {
    let (count, mut offset) = prefix.read(name, input)?;
    let Some(count) = count else {
        return Ok((None, offset));
    };

    // every element takes at least one byte, a count beyond that is bogus
    let mut items = Vec::with_capacity(count.min(input.len() - offset));
    for _ in 0..count {
        let (item, size) = T::unpack(&input[offset..])?;
        items.push(item);
        offset += size;
    }
    Ok((Some(items), offset))
}

/// `int32` element count followed by the elements, `-1` marks null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ArrayInt32<T>(PhantomData<T>);

impl<T: Type> Type for ArrayInt32<T> {
    type Value = Option<Vec<T::Value>>;
    const NAME: &'static str = "ArrayInt32";

    fn encoded_size(value: &Self::Value) -> usize {
        elements_size::<T>(Prefix::Int32, value.as_deref())
    }

    fn pack(value: &Self::Value, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        pack_elements::<T>(Prefix::Int32, Self::NAME, value.as_deref(), buf)
    }

    fn unpack(input: &[u8]) -> Result<(Self::Value, usize), KafkaParseError> {
        unpack_elements::<T>(Prefix::Int32, Self::NAME, input)
    }
}

/// `uvarint(count + 1)` followed by the elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompactArray<T>(PhantomData<T>);

impl<T: Type> Type for CompactArray<T> {
    type Value = Vec<T::Value>;
    const NAME: &'static str = "CompactArray";

    fn encoded_size(value: &Self::Value) -> usize {
        elements_size::<T>(Prefix::Compact, Some(&value[..]))
    }

    fn pack(value: &Self::Value, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        pack_elements::<T>(Prefix::Compact, Self::NAME, Some(&value[..]), buf)
    }

    fn unpack(input: &[u8]) -> Result<(Self::Value, usize), KafkaParseError> {
        match unpack_elements::<T>(Prefix::Compact, Self::NAME, input)? {
            (Some(items), size) => Ok((items, size)),
            (None, _) => Err(KafkaParseError::UnexpectedNull(Self::NAME)),
        }
    }
}

/// `uvarint(count + 1)` followed by the elements, `0` marks null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompactNullableArray<T>(PhantomData<T>);

impl<T: Type> Type for CompactNullableArray<T> {
    type Value = Option<Vec<T::Value>>;
    const NAME: &'static str = "CompactNullableArray";

    fn encoded_size(value: &Self::Value) -> usize {
        elements_size::<T>(Prefix::Compact, value.as_deref())
    }

    fn pack(value: &Self::Value, buf: &mut BytesMut) -> Result<(), KafkaEncodeError> {
        pack_elements::<T>(Prefix::Compact, Self::NAME, value.as_deref(), buf)
    }

    fn unpack(input: &[u8]) -> Result<(Self::Value, usize), KafkaParseError> {
        unpack_elements::<T>(Prefix::Compact, Self::NAME, input)
    }
}
