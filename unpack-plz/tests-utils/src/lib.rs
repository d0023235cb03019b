use std::{
    io::{self, Cursor, Read, Write},
    sync::{Arc, Mutex},
};

use bytes::Bytes;
use encoding_plz::ContentEncoding;
use flate2::Compression;
use http::{
    HeaderValue, Request, Response, StatusCode,
    header::{CONTENT_ENCODING, CONTENT_LENGTH},
};
use unpack_plz::{Body, BodyStream, UnpackError};

pub const INPUT: &[u8] = b"hello world";

pub const ALL_COMPRESSIONS: &str = "deflate, gzip, zstd";

pub const READ_FAILURE: &str = "unable to read body";

// ----- Compression
pub fn compress_deflate(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    let mut encoder =
        flate2::write::ZlibEncoder::new(&mut compressed, Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap();
    compressed
}

pub fn compress_raw_deflate(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    let mut encoder =
        flate2::write::DeflateEncoder::new(&mut compressed, Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap();
    compressed
}

pub fn compress_gzip(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    let mut encoder =
        flate2::write::GzEncoder::new(&mut compressed, Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap();
    compressed
}

pub fn compress_zstd(data: &[u8]) -> Vec<u8> {
    zstd::encode_all(data, 1).unwrap()
}

pub fn compress(data: &[u8], encoding: &ContentEncoding) -> Vec<u8> {
    match encoding {
        ContentEncoding::Deflate => compress_deflate(data),
        ContentEncoding::Gzip => compress_gzip(data),
        ContentEncoding::Zstd => compress_zstd(data),
        ContentEncoding::Identity => data.to_vec(),
        ContentEncoding::Unknown(token) => panic!("unknown| {}", token),
    }
}

/// Applies the tokens in header order, first token first.
pub fn compress_chain(data: &[u8], tokens: &[&str]) -> Vec<u8> {
    tokens
        .iter()
        .flat_map(|value| value.split(','))
        .filter_map(ContentEncoding::from_token)
        .fold(data.to_vec(), |acc, encoding| compress(&acc, &encoding))
}

// xorshift, incompressible enough to keep compressed sizes close to input
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

// ----- Requests
pub fn build_request(values: &[&str], body: Body) -> Request<Body> {
    let len = body.content_length();
    let mut request = Request::new(body);
    let headers = request.headers_mut();
    for value in values {
        headers.append(CONTENT_ENCODING, HeaderValue::from_str(value).unwrap());
    }
    if let Some(len) = len {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
    }
    request
}

pub fn request(values: &[&str], data: Vec<u8>) -> Request<Body> {
    build_request(values, Box::new(Cursor::new(Bytes::from(data))))
}

/* Description:
 *      Handler reading the whole body and sending it back.
 *
 *      read error from unpacking  => matching status and message
 *      any other read error       => 500
 */
pub fn echo(request: Request<Body>) -> Response<Bytes> {
    let mut body = request.into_body();
    let mut out = Vec::new();
    match body.read_to_end(&mut out) {
        Ok(_) => Response::new(Bytes::from(out)),
        Err(e) => match UnpackError::from_io(&e) {
            Some(err) => err.to_response(),
            None => {
                let mut response = Response::new(Bytes::from(READ_FAILURE));
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        },
    }
}

// ----- Tracked body
#[derive(Debug, Default)]
struct TrackerState {
    closed: usize,
    bytes_read: usize,
}

/// Shared view of what happened to a [`TrackedBody`].
#[derive(Debug, Clone, Default)]
pub struct Tracker(Arc<Mutex<TrackerState>>);

impl Tracker {
    pub fn closed(&self) -> usize {
        self.0.lock().unwrap().closed
    }

    pub fn bytes_read(&self) -> usize {
        self.0.lock().unwrap().bytes_read
    }
}

/// Body recording how often it was closed and how much was read from it.
pub struct TrackedBody {
    data: Cursor<Vec<u8>>,
    tracker: Tracker,
    fail_close: bool,
}

impl TrackedBody {
    pub fn new(data: Vec<u8>) -> (Self, Tracker) {
        let tracker = Tracker::default();
        let body = TrackedBody {
            data: Cursor::new(data),
            tracker: tracker.clone(),
            fail_close: false,
        };
        (body, tracker)
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }
}

impl Read for TrackedBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        self.tracker.0.lock().unwrap().bytes_read += n;
        Ok(n)
    }
}

impl BodyStream for TrackedBody {
    fn close(&mut self) -> io::Result<()> {
        self.tracker.0.lock().unwrap().closed += 1;
        if self.fail_close {
            Err(io::Error::other("tracked body close"))
        } else {
            Ok(())
        }
    }

    fn content_length(&self) -> Option<u64> {
        Some(self.data.get_ref().len() as u64)
    }
}
