use std::io::{self, Cursor, Read};

use bytes::Bytes;

/// Request body stream as handed over by the transport.
///
/// Besides producing bytes, a body knows how to release whatever it holds
/// (a connection, a file, a decoder context) and may announce its length.
pub trait BodyStream: Read + Send {
    /// Releases the resources held by the stream.
    ///
    /// Called at most once by this crate, but implementations must accept
    /// being closed after they were read to the end.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Structural length of the body, `None` when unknown.
    fn content_length(&self) -> Option<u64> {
        None
    }
}

pub type Body = Box<dyn BodyStream>;

impl<T> BodyStream for Box<T>
where
    T: BodyStream + ?Sized,
{
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }

    fn content_length(&self) -> Option<u64> {
        (**self).content_length()
    }
}

impl BodyStream for Cursor<Bytes> {
    fn content_length(&self) -> Option<u64> {
        Some(self.get_ref().len() as u64)
    }
}

impl BodyStream for Cursor<Vec<u8>> {
    fn content_length(&self) -> Option<u64> {
        Some(self.get_ref().len() as u64)
    }
}

impl BodyStream for io::Empty {
    fn content_length(&self) -> Option<u64> {
        Some(0)
    }
}

pub fn full<T>(data: T) -> Body
where
    T: Into<Bytes>,
{
    Box::new(Cursor::new(data.into()))
}

pub fn empty() -> Body {
    Box::new(io::empty())
}
