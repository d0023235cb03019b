use std::io::{self, Read};

use encoding_plz::EncodingChain;
use tracing::warn;

use crate::{
    body::{Body, BodyStream},
    closer::close_all,
    decompression::{build, stage::Layer},
    error::{CloseError, UnpackError},
    limit::Limited,
};

/// Plaintext view of a compressed request body.
///
/// Owns every decoder stage and the raw body underneath them. The whole
/// stack is released exactly once, either by [`BodyStream::close`] or when
/// the body is dropped.
pub struct Decoded {
    reader: Option<Limited<Box<dyn Layer>>>,
}

impl Decoded {
    /// `limit` caps the decoded bytes, `0` disables the cap.
    pub fn new(
        body: Body,
        chain: &EncodingChain,
        limit: u64,
    ) -> Result<Self, UnpackError> {
        let top = build(body, chain)?;
        Ok(Decoded {
            reader: Some(Limited::new(top, limit)),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    pub fn bytes_read(&self) -> u64 {
        self.reader.as_ref().map_or(0, Limited::bytes_read)
    }

    pub fn close_chain(&mut self) -> Result<(), CloseError> {
        match self.reader.take() {
            Some(reader) => close_all(reader.into_inner()),
            None => Ok(()),
        }
    }
}

// closed body reads as empty
impl Read for Decoded {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reader.as_mut() {
            Some(reader) => reader.read(buf),
            None => Ok(0),
        }
    }
}

impl BodyStream for Decoded {
    fn close(&mut self) -> io::Result<()> {
        self.close_chain().map_err(io::Error::other)
    }

    // decoded length is unknown until read
    fn content_length(&self) -> Option<u64> {
        None
    }
}

impl Drop for Decoded {
    fn drop(&mut self) {
        if let Err(e) = self.close_chain() {
            warn!("decoded| {}", e);
        }
    }
}
