use std::{cell::Cell, marker::PhantomData};

use byteorder::{BigEndian, ByteOrder};
use ntex_bytes::{Buf, BufMut, BytesMut};
use ntex_codec::{Decoder, Encoder};

use crate::codec::Type;
use crate::error::KafkaCodecError;

/// Size of the `int32` frame length prefix.
pub(crate) const HEADER_LEN: usize = 4;

/// Size prefixed frame codec.
///
/// Every frame is an `int32` body size followed by the body, which must hold
/// exactly one `T` value.
#[derive(Debug)]
pub struct KafkaCodec<T: Type> {
    state: Cell<DecodeState>,
    max_size: usize,
    phantom: PhantomData<T>,
}

#[derive(Debug, Clone, Copy)]
enum DecodeState {
    FrameHeader,
    Frame(usize),
}

impl<T: Type> Default for KafkaCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Type> KafkaCodec<T> {
    pub fn new() -> KafkaCodec<T> {
        KafkaCodec {
            state: Cell::new(DecodeState::FrameHeader),
            max_size: 0,
            phantom: PhantomData,
        }
    }

    /// Set max frame body size.
    ///
    /// If max size is set to `0`, size is unlimited.
    /// By default max size is set to `0`
    pub fn max_size(mut self, size: usize) -> Self {
        self.max_size = size;
        self
    }

    /// Set max frame body size.
    ///
    /// If max size is set to `0`, size is unlimited.
    /// By default max size is set to `0`
    pub fn set_max_size(&mut self, size: usize) {
        self.max_size = size;
    }

    fn check_size(&self, size: usize) -> Result<(), KafkaCodecError> {
        if size > i32::MAX as usize || (self.max_size != 0 && size > self.max_size) {
            log::debug!(
                "{} frame of {} bytes exceeds max size {}",
                T::NAME,
                size,
                self.max_size
            );
            Err(KafkaCodecError::MaxSizeExceeded)
        } else {
            Ok(())
        }
    }
}

impl<T: Type> Decoder for KafkaCodec<T> {
    type Item = T::Value;
    type Error = KafkaCodecError;

    fn decode(&self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.state.get() {
                DecodeState::FrameHeader => {
                    if src.len() < HEADER_LEN {
                        return Ok(None);
                    }

                    // read frame size
                    let size = BigEndian::read_i32(src.as_ref());
                    let size = usize::try_from(size).map_err(|_| {
                        log::debug!("Invalid {} frame size: {}", T::NAME, size);
                        KafkaCodecError::InvalidFrameSize
                    })?;
                    self.check_size(size)?;
                    self.state.set(DecodeState::Frame(size));
                    src.advance(HEADER_LEN);
                }
                DecodeState::Frame(size) => {
                    if src.len() < size {
                        return Ok(None);
                    }

                    let frame = src.split_to(size).freeze();
                    self.state.set(DecodeState::FrameHeader);

                    let (item, consumed) = T::unpack(&frame)?;
                    if consumed != frame.len() {
                        return Err(KafkaCodecError::UnparsedBytesLeft);
                    }

                    #[cfg(feature = "frame-trace")]
                    log::trace!("incoming: {} frame, {} bytes", T::NAME, size);

                    return Ok(Some(item));
                }
            }
        }
    }
}

impl<T: Type> Encoder for KafkaCodec<T> {
    type Item = T::Value;
    type Error = KafkaCodecError;

    fn encode(&self, item: Self::Item, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let size = T::encoded_size(&item);
        self.check_size(size)?;
        dst.reserve(HEADER_LEN + size);

        let len = dst.len();
        dst.put_i32(size as i32);
        if let Err(e) = T::pack(&item, dst) {
            dst.truncate(len);
            return Err(e.into());
        }
        debug_assert!(dst.len() - len == HEADER_LEN + size);

        #[cfg(feature = "frame-trace")]
        log::trace!("outgoing: {} frame, {} bytes", T::NAME, size);

        Ok(())
    }
}
