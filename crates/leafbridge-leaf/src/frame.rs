use crate::{Error, Result};
use std::io::Write;

/// Size of the big-endian length prefix.
pub const FRAME_PREFIX_SIZE: usize = 2;

/// Largest payload a frame can carry.
pub const MAX_FRAME_PAYLOAD: usize = u16::MAX as usize;

fn payload_len(payload: &[u8]) -> Result<u16> {
    u16::try_from(payload.len()).map_err(|_| Error::PayloadTooLarge(payload.len()))
}

/// Prefixes `payload` with its length as a big-endian `u16`.
pub fn frame(payload: &[u8]) -> Result<Vec<u8>> {
    let len = payload_len(payload)?;
    let mut data = Vec::with_capacity(FRAME_PREFIX_SIZE + payload.len());
    data.extend_from_slice(&len.to_be_bytes());
    data.extend_from_slice(payload);
    Ok(data)
}

/// Writes `payload` as a single frame.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let len = payload_len(payload)?;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(payload)?;
    Ok(())
}

/// Splits the first frame off `buf`.
///
/// Returns the payload and the unconsumed remainder, so repeated calls walk a
/// concatenated stream of frames.
pub fn unframe(buf: &[u8]) -> Result<(&[u8], &[u8])> {
    if buf.len() < FRAME_PREFIX_SIZE {
        return Err(Error::ShortBuffer(buf.len()));
    }

    let (prefix, payload) = buf.split_at(FRAME_PREFIX_SIZE);
    let declared = u16::from_be_bytes([prefix[0], prefix[1]]) as usize;

    if declared > payload.len() {
        return Err(Error::TruncatedPayload {
            declared,
            available: payload.len(),
        });
    }

    Ok(payload.split_at(declared))
}

/// Iterator over the payloads of a concatenated frame stream.
///
/// Ends when the stream is exhausted. A broken frame is yielded as an error
/// once, after which the iterator is fused.
#[derive(Debug, Clone)]
pub struct FrameIter<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> FrameIter<'a> {
    /// Constructs a new instance of [`FrameIter`].
    pub fn new(stream: &'a [u8]) -> Self {
        Self {
            remaining: stream,
            failed: false,
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.remaining
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = Result<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }

        match unframe(self.remaining) {
            Ok((payload, rest)) => {
                self.remaining = rest;
                Some(Ok(payload))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for FrameIter<'_> {}
