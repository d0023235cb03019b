use std::fmt;

pub const DEFLATE: &str = "deflate";
pub const GZIP: &str = "gzip";
pub const IDENTITY: &str = "identity";
pub const ZSTD: &str = "zstd";

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ContentEncoding {
    Deflate,
    Gzip,
    Identity,
    Zstd,
    Unknown(String),
}

impl ContentEncoding {
    // gzip, deflate, zstd and identity
    pub fn is_supported(&self) -> bool {
        !matches!(self, ContentEncoding::Unknown(_))
    }

    // supported and does actual work
    pub fn is_decodable(&self) -> bool {
        matches!(
            self,
            ContentEncoding::Deflate
                | ContentEncoding::Gzip
                | ContentEncoding::Zstd
        )
    }

    /// Token as found in a header value, surrounding whitespace and case
    /// ignored. `None` for an empty token.
    pub fn from_token(raw: &str) -> Option<Self> {
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        let known = [
            ContentEncoding::Deflate,
            ContentEncoding::Gzip,
            ContentEncoding::Identity,
            ContentEncoding::Zstd,
        ];
        let encoding = known
            .into_iter()
            .find(|enc| enc.as_ref().eq_ignore_ascii_case(token))
            .unwrap_or_else(|| {
                ContentEncoding::Unknown(token.to_ascii_lowercase())
            });
        Some(encoding)
    }
}

impl AsRef<str> for ContentEncoding {
    fn as_ref(&self) -> &str {
        use ContentEncoding::*;
        match self {
            Deflate => DEFLATE,
            Gzip => GZIP,
            Identity => IDENTITY,
            Zstd => ZSTD,
            Unknown(s) => s,
        }
    }
}

impl fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Expects an already trimmed and lowercased token.
impl From<&str> for ContentEncoding {
    fn from(s: &str) -> Self {
        use ContentEncoding::*;
        match s {
            DEFLATE => Deflate,
            GZIP => Gzip,
            IDENTITY => Identity,
            ZSTD => Zstd,
            &_ => Unknown(s.to_string()),
        }
    }
}
