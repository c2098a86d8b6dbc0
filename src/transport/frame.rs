//! Command frame builder
//!
//! Every command is `0x57 0xAB` followed by the opcode and its parameters,
//! assembled in a fixed 128-byte buffer owned by the driver.

use heapless::Vec;

use crate::driver::error::{IoError, IoResult};
use crate::internal::constants::{FRAME_CAPACITY, FRAME_HEADER, MAX_PAYLOAD_LEN};

/// Scratch buffer holding the frame currently being sent
#[derive(Debug, Clone, Default)]
pub struct Frame {
    buf: Vec<u8, FRAME_CAPACITY>,
}

impl Frame {
    /// Create an empty frame buffer
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Replace the buffer contents with header + `payload`
    ///
    /// Fails with [`IoError::LenInvalid`] when `payload` is longer than
    /// [`MAX_PAYLOAD_LEN`]; the buffer is left untouched in that case.
    pub fn encode(&mut self, payload: &[u8]) -> IoResult<()> {
        if payload.len() > MAX_PAYLOAD_LEN {
            diag!(error, "ch9120: len is invalid.");
            return Err(IoError::LenInvalid);
        }
        self.buf.clear();
        self.buf
            .extend_from_slice(&FRAME_HEADER)
            .map_err(|()| IoError::LenInvalid)?;
        self.buf
            .extend_from_slice(payload)
            .map_err(|()| IoError::LenInvalid)
    }

    /// Encoded frame bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}
