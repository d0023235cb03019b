use std::io::{self, Read};

use bytes::{Buf, BytesMut};

const PEEK_CHUNK: usize = 16;

/// Reader that can look at the first bytes of a stream and replay them to
/// whoever reads it afterwards.
#[derive(Debug)]
pub struct Peek<R> {
    inner: R,
    buf: BytesMut,
}

impl<R: Read> Peek<R> {
    pub fn new(inner: R) -> Self {
        Peek {
            inner,
            buf: BytesMut::new(),
        }
    }

    /// Returns up to `n` bytes without consuming them. Fewer than `n` bytes
    /// means the stream ended.
    pub fn peek(&mut self, n: usize) -> io::Result<&[u8]> {
        let mut chunk = [0u8; PEEK_CHUNK];
        while self.buf.len() < n {
            let want = (n - self.buf.len()).min(PEEK_CHUNK);
            match self.inner.read(&mut chunk[..want]) {
                Ok(0) => break,
                Ok(read) => self.buf.extend_from_slice(&chunk[..read]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        let len = self.buf.len().min(n);
        Ok(&self.buf[..len])
    }

    /// Bytes already peeked are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for Peek<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.buf.is_empty() {
            return self.inner.read(out);
        }
        let n = self.buf.len().min(out.len());
        out[..n].copy_from_slice(&self.buf[..n]);
        self.buf.advance(n);
        Ok(n)
    }
}
