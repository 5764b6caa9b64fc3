#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KafkaParseError {
    /// Buffer underflow, carries the number of missing bytes
    #[error("More data required during parsing: {0} bytes missing")]
    Incomplete(usize),
    #[error("Malformed {0} varint")]
    MalformedVarint(&'static str),
    #[error("Invalid length prefix: {0}")]
    InvalidLength(i64),
    #[error("Null value is not allowed for {0}")]
    UnexpectedNull(&'static str),
    #[error("Tagged field {0} is out of order")]
    InvalidTagOrder(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KafkaEncodeError {
    #[error("Value {value} is out of range for {name}")]
    OutOfRange { name: &'static str, value: i128 },
    #[error("Tagged field {0} is out of order")]
    TagOrder(u32),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum KafkaCodecError {
    #[error("Parse failed: {0}")]
    ParseError(#[from] KafkaParseError),
    #[error("Encode failed: {0}")]
    EncodeError(#[from] KafkaEncodeError),
    #[error("Bytes left unparsed at the frame trail")]
    UnparsedBytesLeft,
    #[error("Max frame size exceeded")]
    MaxSizeExceeded,
    #[error("Invalid inbound frame size")]
    InvalidFrameSize,
}
