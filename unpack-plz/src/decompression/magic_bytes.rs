use std::io::{self, Read};

use encoding_plz::ContentEncoding;

use super::peek::Peek;

// wiki - gzip - 1F 8B, CM 08 = deflate
const GZIP_MAGIC: [u8; 3] = [0x1f, 0x8b, 0x08];

/* rfc1950 - zlib
 *      CMF | FLG
 *      CMF low nibble  - CM, 8 = deflate
 *      CMF high nibble - CINFO, log2(window) - 8, max 7
 *      (CMF * 256 + FLG) % 31 == 0
 */
const ZLIB_CM_DEFLATE: u8 = 0x08;
const ZLIB_MAX_CINFO: u8 = 7;

// wiki - zstd - 28 B5 2F FD
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];
// skippable frames - 0x184D2A5? little endian
const ZSTD_SKIPPABLE_MAGIC: [u8; 3] = [0x2a, 0x4d, 0x18];

/// Wire format of one decode stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Gzip,
    Zlib,
    RawDeflate,
    Zstd,
}

pub fn is_gzip(input: &[u8]) -> bool {
    input.starts_with(&GZIP_MAGIC)
}

pub fn is_zlib(input: &[u8]) -> bool {
    matches!(
        input,
        [cmf, flg, ..]
        if cmf & 0x0f == ZLIB_CM_DEFLATE
            && cmf >> 4 <= ZLIB_MAX_CINFO
            && u16::from_be_bytes([*cmf, *flg]) % 31 == 0
    )
}

pub fn is_zstd(input: &[u8]) -> bool {
    match input {
        [first, rest @ ..] if rest.starts_with(&ZSTD_SKIPPABLE_MAGIC) => {
            first & 0xf0 == 0x50
        }
        _ => input.starts_with(&ZSTD_MAGIC),
    }
}

fn invalid_header(encoding: &ContentEncoding) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{}| invalid header", encoding),
    )
}

/* Steps:
 *      gzip    => magic must be present
 *      zstd    => frame or skippable frame magic must be present
 *      deflate => peek 2 bytes
 *                  zlib header => Zlib
 *                  else        => RawDeflate
 *                  < 2 bytes   => Zlib, header check fails below
 *
 *      Nothing is consumed, peeked bytes are replayed to the decoder.
 */
pub fn detect<R: Read>(
    input: &mut Peek<R>,
    encoding: &ContentEncoding,
) -> io::Result<Format> {
    let (format, header) = match encoding {
        ContentEncoding::Gzip => (Format::Gzip, input.peek(GZIP_MAGIC.len())?),
        ContentEncoding::Zstd => (Format::Zstd, input.peek(ZSTD_MAGIC.len())?),
        ContentEncoding::Deflate => {
            let head = input.peek(2)?;
            if head.len() < 2 || is_zlib(head) {
                (Format::Zlib, head)
            } else {
                return Ok(Format::RawDeflate);
            }
        }
        ContentEncoding::Identity | ContentEncoding::Unknown(_) => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{}| nothing to decode", encoding),
            ));
        }
    };
    let valid = match format {
        Format::Gzip => is_gzip(header),
        Format::Zlib => is_zlib(header),
        Format::Zstd => is_zstd(header),
        Format::RawDeflate => true,
    };
    if valid {
        Ok(format)
    } else {
        Err(invalid_header(encoding))
    }
}
