use std::io::{self, BufReader, Read};

use encoding_plz::ContentEncoding;
use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};
use tracing::warn;

use super::{
    magic_bytes::{Format, detect},
    peek::Peek,
};
use crate::{body::Body, error::UnpackError};

/// One entry of the resource stack a decoded body is built from.
///
/// Every layer reads from the layer below it. The bottom of the stack is
/// the raw request body.
pub trait Layer: Read + Send {
    /// Token undone by this layer, `None` for the raw body.
    fn encoding(&self) -> Option<&ContentEncoding>;

    /// Releases what this layer holds, not the layers below it.
    fn release(&mut self) -> io::Result<()>;

    /// Gives up this layer and returns the one below it.
    fn peel(self: Box<Self>) -> Option<Box<dyn Layer>>;
}

// ----- Raw body
pub struct Source {
    body: Option<Body>,
}

impl Source {
    pub fn new(body: Body) -> Self {
        Source {
            body: Some(body),
        }
    }
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.body.as_mut() {
            Some(body) => body.read(buf),
            None => Ok(0),
        }
    }
}

impl Layer for Source {
    fn encoding(&self) -> Option<&ContentEncoding> {
        None
    }

    fn release(&mut self) -> io::Result<()> {
        match self.body.take() {
            Some(mut body) => body.close(),
            None => Ok(()),
        }
    }

    fn peel(self: Box<Self>) -> Option<Box<dyn Layer>> {
        None
    }
}

// dropped without going through close_all, eg. a failed open
impl Drop for Source {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!("source| {}", e);
        }
    }
}

// ----- Decoders
pub enum Decoder<R: Read> {
    Gzip(MultiGzDecoder<R>),
    Zlib(ZlibDecoder<R>),
    RawDeflate(DeflateDecoder<R>),
    Zstd(zstd::stream::read::Decoder<'static, BufReader<R>>),
}

impl<R: Read> Decoder<R> {
    pub fn new(input: R, format: Format) -> io::Result<Self> {
        let decoder = match format {
            Format::Gzip => Decoder::Gzip(MultiGzDecoder::new(input)),
            Format::Zlib => Decoder::Zlib(ZlibDecoder::new(input)),
            Format::RawDeflate => Decoder::RawDeflate(DeflateDecoder::new(input)),
            Format::Zstd => {
                Decoder::Zstd(zstd::stream::read::Decoder::new(input)?)
            }
        };
        Ok(decoder)
    }

    pub fn format(&self) -> Format {
        match self {
            Decoder::Gzip(_) => Format::Gzip,
            Decoder::Zlib(_) => Format::Zlib,
            Decoder::RawDeflate(_) => Format::RawDeflate,
            Decoder::Zstd(_) => Format::Zstd,
        }
    }

    pub fn into_inner(self) -> R {
        match self {
            Decoder::Gzip(dec) => dec.into_inner(),
            Decoder::Zlib(dec) => dec.into_inner(),
            Decoder::RawDeflate(dec) => dec.into_inner(),
            Decoder::Zstd(dec) => dec.finish().into_inner(),
        }
    }
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Decoder::Gzip(dec) => dec.read(buf),
            Decoder::Zlib(dec) => dec.read(buf),
            Decoder::RawDeflate(dec) => dec.read(buf),
            Decoder::Zstd(dec) => dec.read(buf),
        }
    }
}

// ----- Stage
pub struct Stage {
    encoding: ContentEncoding,
    decoder: Decoder<Peek<Box<dyn Layer>>>,
}

/// Open failed. `input` is handed back so the caller can release it, it is
/// `None` when it was already dropped.
pub struct OpenFailure {
    pub input: Option<Box<dyn Layer>>,
    pub source: io::Error,
}

impl std::fmt::Debug for OpenFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenFailure")
            .field("input", &self.input.is_some())
            .field("source", &self.source)
            .finish()
    }
}

impl Stage {
    pub fn open(
        input: Box<dyn Layer>,
        encoding: ContentEncoding,
    ) -> Result<Stage, OpenFailure> {
        let mut input = Peek::new(input);
        let format = match detect(&mut input, &encoding) {
            Ok(format) => format,
            Err(source) => {
                return Err(OpenFailure {
                    input: Some(input.into_inner()),
                    source,
                });
            }
        };
        let decoder =
            Decoder::new(input, format).map_err(|source| OpenFailure {
                input: None,
                source,
            })?;
        Ok(Stage {
            encoding,
            decoder,
        })
    }

    pub fn format(&self) -> Format {
        self.decoder.format()
    }

    // tag with the encoding of this stage, unless already tagged below
    fn tag(&self, err: io::Error) -> io::Error {
        if err.kind() == io::ErrorKind::Interrupted
            || UnpackError::from_io(&err).is_some()
        {
            return err;
        }
        UnpackError::Decode {
            encoding: self.encoding.clone(),
            source: err,
        }
        .into()
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("encoding", &self.encoding)
            .field("format", &self.format())
            .finish()
    }
}

impl Read for Stage {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.decoder.read(buf).map_err(|e| self.tag(e))
    }
}

impl Layer for Stage {
    fn encoding(&self) -> Option<&ContentEncoding> {
        Some(&self.encoding)
    }

    // decoder state is plain memory
    fn release(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn peel(self: Box<Self>) -> Option<Box<dyn Layer>> {
        let stage = *self;
        Some(stage.decoder.into_inner().into_inner())
    }
}
