use kafka_protocol_codec::*;
use ntex_bytes::{Bytes, BytesMut};

const TEST_STRING: &[u8] = b"PHP is the best programming language in the world";

fn with_prefix(prefix: &[u8]) -> Vec<u8> {
    let mut expected = prefix.to_vec();
    expected.extend_from_slice(TEST_STRING);
    expected
}

#[test]
fn test_boolean() {
    let encoded = Boolean::to_bytes(&true).unwrap();
    assert_eq!(&encoded[..], &[0x01]);
    assert_eq!(Boolean::unpack(&encoded), Ok((true, 1)));

    let encoded = Boolean::to_bytes(&false).unwrap();
    assert_eq!(&encoded[..], &[0x00]);
    assert_eq!(Boolean::unpack(&encoded), Ok((false, 1)));
}

#[test]
fn test_string16() {
    let value = Bytes::from_static(TEST_STRING);
    let encoded = String16::to_bytes(&value).unwrap();
    assert_eq!(&encoded[..], &with_prefix(&[0x00, 0x31])[..]);
    assert_eq!(String16::unpack(&encoded), Ok((value, 2 + TEST_STRING.len())));
}

#[test]
fn test_nullable_string() {
    let value = Some(Bytes::from_static(TEST_STRING));
    let encoded = NullableString::to_bytes(&value).unwrap();
    assert_eq!(&encoded[..], &with_prefix(&[0x00, 0x31])[..]);
    assert_eq!(
        NullableString::unpack(&encoded),
        Ok((value, 2 + TEST_STRING.len()))
    );

    let encoded = NullableString::to_bytes(&None).unwrap();
    assert_eq!(&encoded[..], &[0xff, 0xff]);
    assert_eq!(NullableString::unpack(&encoded), Ok((None, 2)));
}

#[test]
fn test_compact_string() {
    let value = Bytes::from_static(TEST_STRING);
    let encoded = CompactString::to_bytes(&value).unwrap();
    // 49 bytes of content, uvarint(49 + 1)
    assert_eq!(&encoded[..], &with_prefix(&[0x32])[..]);
    assert_eq!(
        CompactString::unpack(&encoded),
        Ok((value, 1 + TEST_STRING.len()))
    );
}

#[test]
fn test_compact_nullable_string() {
    let value = Some(Bytes::from_static(TEST_STRING));
    let encoded = CompactNullableString::to_bytes(&value).unwrap();
    assert_eq!(&encoded[..], &with_prefix(&[0x32])[..]);
    assert_eq!(
        CompactNullableString::unpack(&encoded),
        Ok((value, 1 + TEST_STRING.len()))
    );

    let encoded = CompactNullableString::to_bytes(&None).unwrap();
    assert_eq!(&encoded[..], &[0x00]);
    assert_eq!(CompactNullableString::unpack(&encoded), Ok((None, 1)));
}

#[test]
fn test_float64() {
    let encoded = Float64::to_bytes(&3.141592654).unwrap();
    assert_eq!(encoded.len(), 8);
    assert_eq!(Float64::unpack(&encoded), Ok((3.141592654, 8)));
}

macro_rules! boundary_tests {
    ($($name:ident: $kind:ident, $size:expr,)*) => {
    $(
        #[test]
        fn $name() {
            for value in [$kind::MIN_VALUE, $kind::MAX_VALUE] {
                let encoded = $kind::to_bytes(&value).unwrap();
                assert_eq!(encoded.len(), $size);
                assert_eq!($kind::unpack(&encoded), Ok((value, $size)));
            }
        }
    )*
    }
}

boundary_tests! {
    test_int8: Int8, 1,
    test_int16: Int16, 2,
    test_int32: Int32, 4,
    test_int64: Int64, 8,
    test_uint32: UInt32, 4,
}

fn check_sizes<T>(cases: &[(T::Value, usize)])
where
    T: Type,
    T::Value: PartialEq + std::fmt::Debug + Clone,
{
    for (value, size) in cases {
        let encoded = T::to_bytes(value).unwrap();
        assert_eq!(
            T::unpack(&encoded),
            Ok((value.clone(), *size)),
            "number {:?}",
            value
        );
    }
}

#[test]
fn test_uvarint() {
    check_sizes::<UVarInt>(&[
        (UVarInt::MIN_VALUE, 1),
        (UVarInt::MAX_VALUE, 5),
        (2, 1),
        (16383, 2),
        (2097151, 3),
        (268435455, 4),
    ]);
}

#[test]
fn test_varint() {
    check_sizes::<VarInt>(&[
        (VarInt::MIN_VALUE, 5),
        (VarInt::MAX_VALUE, 5),
        (2, 1),
        (8191, 2),
        (1048575, 3),
        (134217727, 4),
    ]);
}

#[test]
fn test_varlong() {
    check_sizes::<VarLong>(&[
        (i64::from(Int32::MIN_VALUE), 5),
        (i64::from(Int32::MAX_VALUE), 5),
        (Int64::MIN_VALUE, 10),
        (Int64::MAX_VALUE, 10),
        (2, 1),
        (16383, 3),
        (2097151, 4),
        (268435455, 5),
        (34359738367, 6),
        (4398046511103, 7),
        (562949953421311, 8),
        (72057594037927935, 9),
    ]);
}

#[test]
fn test_array_int32() {
    let value = Some(vec![1, 2, 3]);
    let encoded = ArrayInt32::<Int32>::to_bytes(&value).unwrap();
    assert_eq!(
        &encoded[..],
        &[0, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3][..]
    );
    assert_eq!(ArrayInt32::<Int32>::unpack(&encoded), Ok((value, 16)));

    let encoded = ArrayInt32::<Int32>::to_bytes(&None).unwrap();
    assert_eq!(&encoded[..], &[0xff, 0xff, 0xff, 0xff]);
    assert_eq!(ArrayInt32::<Int32>::unpack(&encoded), Ok((None, 4)));
}

#[test]
fn test_compact_array() {
    let value = vec![1, 2, 3];
    let encoded = CompactArray::<Int32>::to_bytes(&value).unwrap();
    assert_eq!(
        &encoded[..],
        &[0x04, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3][..]
    );
    assert_eq!(CompactArray::<Int32>::unpack(&encoded), Ok((value, 13)));
}

#[test]
fn test_message_layout() {
    // a flexible-version style body: client id, topics and trailing tagged fields
    type Topics = CompactArray<CompactString>;

    let mut buf = BytesMut::new();
    Int16::pack(&18, &mut buf).unwrap();
    Int32::pack(&7, &mut buf).unwrap();
    NullableString::pack(&Some(Bytes::from_static(b"client")), &mut buf).unwrap();
    Topics::pack(
        &vec![Bytes::from_static(b"a"), Bytes::from_static(b"b")],
        &mut buf,
    )
    .unwrap();
    TaggedFields::pack(&Default::default(), &mut buf).unwrap();

    let (api_key, mut offset) = Int16::unpack(&buf).unwrap();
    let (correlation_id, size) = Int32::unpack_at(&buf, offset).unwrap();
    offset += size;
    let (client_id, size) = NullableString::unpack_at(&buf, offset).unwrap();
    offset += size;
    let (topics, size) = Topics::unpack_at(&buf, offset).unwrap();
    offset += size;
    let (tags, size) = TaggedFields::unpack_at(&buf, offset).unwrap();
    offset += size;

    assert_eq!(api_key, 18);
    assert_eq!(correlation_id, 7);
    assert_eq!(client_id.as_deref(), Some(&b"client"[..]));
    assert_eq!(topics.len(), 2);
    assert!(tags.is_empty());
    assert_eq!(offset, buf.len());
}

#[test]
fn test_truncated_input() {
    let encoded = Int64::to_bytes(&Int64::MAX_VALUE).unwrap();
    assert_eq!(
        Int64::unpack(&encoded[..5]),
        Err(KafkaParseError::Incomplete(3))
    );

    assert_eq!(
        VarLong::unpack(&[0xff, 0xff]),
        Err(KafkaParseError::Incomplete(1))
    );
    assert_eq!(
        UVarInt::unpack(&[0xff; 6]),
        Err(KafkaParseError::MalformedVarint("UVarInt"))
    );

    let encoded = CompactArray::<Int32>::to_bytes(&vec![1, 2, 3]).unwrap();
    assert_eq!(
        CompactArray::<Int32>::unpack(&encoded[..encoded.len() - 1]),
        Err(KafkaParseError::Incomplete(1))
    );
}
