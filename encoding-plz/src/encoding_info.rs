use std::fmt;

use crate::content_encoding::ContentEncoding;

/// One token of the chain, remembering which `Content-Encoding` header
/// occurrence it was read from.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EncodingInfo {
    header_index: usize,
    pub encoding: ContentEncoding,
}

impl EncodingInfo {
    pub fn new(header_index: usize, encoding: ContentEncoding) -> Self {
        EncodingInfo {
            header_index,
            encoding,
        }
    }

    pub fn header_index(&self) -> usize {
        self.header_index
    }

    pub fn encoding(&self) -> &ContentEncoding {
        &self.encoding
    }

    /* Description:
     *      Tokens of the `header_index`th header value, left to right.
     *
     *      " GZip ,, br"  => [gzip, br]
     *      ""             => []
     */
    pub fn parse(
        header_index: usize,
        value: &str,
    ) -> impl Iterator<Item = EncodingInfo> + '_ {
        value
            .split(',')
            .filter_map(ContentEncoding::from_token)
            .map(move |encoding| EncodingInfo::new(header_index, encoding))
    }
}

// gzip@1
impl fmt::Display for EncodingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.encoding, self.header_index)
    }
}
