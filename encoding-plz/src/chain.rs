use http::{HeaderMap, header::CONTENT_ENCODING};
use tracing::debug;

use crate::{content_encoding::ContentEncoding, encoding_info::EncodingInfo};

/* Description:
 *      Ordered list of every Content-Encoding token of a message, in the
 *      order the sender applied them.
 *
 *      Content-Encoding: gzip
 *      Content-Encoding: deflate, zstd
 *
 *      => [gzip(0), deflate(1), zstd(1)]
 *
 *      The last token is the outermost layer and is undone first.
 */
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct EncodingChain(Vec<EncodingInfo>);

#[derive(Debug, PartialEq, Eq)]
pub enum Classification<'a> {
    // no token
    Absent,
    // first unsupported token, left to right
    Unsupported(&'a EncodingInfo),
    // only identity
    Noop,
    Decodable,
}

impl EncodingChain {
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let chain = values
            .into_iter()
            .enumerate()
            .flat_map(|(index, value)| {
                EncodingInfo::parse(index, value.as_ref()).collect::<Vec<_>>()
            })
            .collect();
        EncodingChain(chain)
    }

    pub fn classify(&self) -> Classification<'_> {
        if self.0.is_empty() {
            return Classification::Absent;
        }
        if let Some(info) = self.0.iter().find(|i| !i.encoding.is_supported()) {
            return Classification::Unsupported(info);
        }
        if self.0.iter().any(|i| i.encoding.is_decodable()) {
            Classification::Decodable
        } else {
            Classification::Noop
        }
    }

    /// Decodable tokens in the order they have to be undone.
    pub fn unwrap_order(&self) -> impl Iterator<Item = &ContentEncoding> {
        self.0
            .iter()
            .rev()
            .map(EncodingInfo::encoding)
            .filter(|enc| enc.is_decodable())
    }

    pub fn encodings(&self) -> &[EncodingInfo] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<EncodingInfo>> for EncodingChain {
    fn from(infos: Vec<EncodingInfo>) -> Self {
        EncodingChain(infos)
    }
}

impl From<&HeaderMap> for EncodingChain {
    fn from(headers: &HeaderMap) -> Self {
        let values = headers.get_all(CONTENT_ENCODING).iter().map(|value| {
            value.to_str().map(str::to_owned).unwrap_or_else(|_| {
                debug!("content encoding| non ascii value");
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            })
        });
        EncodingChain::from_values(values)
    }
}
