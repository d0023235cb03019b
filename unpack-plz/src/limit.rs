use std::io::{self, Read};

use crate::error::UnpackError;

/* Description:
 *      Caps the number of bytes handed out by the inner reader.
 *
 *      limit == 0 => disabled, reads pass through and are only counted.
 *
 * Steps:
 *      1. Once exceeded, fail without touching inner.
 *      2. Ask inner for at most (limit - read + 1) bytes, the extra byte is
 *         only a lookahead and is never handed out.
 *      3. More than (limit - read) produced => hand out the bytes up to the
 *         limit, mark exceeded. Next read fails.
 *      4. Nothing left (read == limit) and inner still has data => fail.
 *         Inner at eof => eof.
 *
 *      A body of exactly `limit` bytes is read completely, one byte more
 *      fails before that byte is handed out.
 */
#[derive(Debug)]
pub struct Limited<R> {
    inner: R,
    limit: u64,
    read: u64,
    exceeded: bool,
}

impl<R> Limited<R> {
    pub fn new(inner: R, limit: u64) -> Self {
        Limited {
            inner,
            limit,
            read: 0,
            exceeded: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    pub fn bytes_read(&self) -> u64 {
        self.read
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn exceeded(&mut self) -> io::Error {
        self.exceeded = true;
        UnpackError::LimitExceeded(self.limit).into()
    }
}

impl<R: Read> Read for Limited<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.is_enabled() {
            let n = self.inner.read(buf)?;
            self.read += n as u64;
            return Ok(n);
        }
        // 1. exceeded
        if self.exceeded {
            return Err(self.exceeded());
        }
        if buf.is_empty() {
            return Ok(0);
        }
        let remaining = self.limit - self.read;
        // 4. nothing left
        if remaining == 0 {
            let mut probe = [0u8; 1];
            return match self.inner.read(&mut probe)? {
                0 => Ok(0),
                _ => Err(self.exceeded()),
            };
        }
        // 2. clamp
        let max = remaining.saturating_add(1).min(buf.len() as u64) as usize;
        let n = self.inner.read(&mut buf[..max])? as u64;
        // 3. over
        if n > remaining {
            self.read = self.limit;
            self.exceeded = true;
            return Ok(remaining as usize);
        }
        self.read += n;
        Ok(n as usize)
    }
}
