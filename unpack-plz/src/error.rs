use std::io;

use bytes::Bytes;
use encoding_plz::ContentEncoding;
use http::{HeaderValue, Response, StatusCode, header::CONTENT_TYPE};
use thiserror::Error;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Everything that can go wrong while unpacking a request body.
///
/// `Unsupported` and `Open` are raised while the request is being set up and
/// become a response right away. `Decode` and `LimitExceeded` happen while
/// the body is read and travel inside the [`io::Error`] returned by `read`;
/// use [`UnpackError::from_io`] to get them back.
#[derive(Debug, Error)]
pub enum UnpackError {
    #[error("Content-Encoding: {0} is not supported")]
    Unsupported(ContentEncoding),
    #[error("Content-Encoding: {encoding} set but unable to decompress body")]
    Open {
        encoding: ContentEncoding,
        #[source]
        source: io::Error,
    },
    #[error(
        "Content-Encoding: {encoding} set but unable to decompress body| {source}"
    )]
    Decode {
        encoding: ContentEncoding,
        #[source]
        source: io::Error,
    },
    #[error("decoded body exceeds limit of {0} bytes")]
    LimitExceeded(u64),
}

impl UnpackError {
    pub fn from_io(err: &io::Error) -> Option<&UnpackError> {
        err.get_ref()?.downcast_ref::<UnpackError>()
    }

    pub fn encoding(&self) -> Option<&ContentEncoding> {
        match self {
            UnpackError::Unsupported(encoding)
            | UnpackError::Open {
                encoding,
                ..
            }
            | UnpackError::Decode {
                encoding,
                ..
            } => Some(encoding),
            UnpackError::LimitExceeded(_) => None,
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, UnpackError::Decode { .. })
    }

    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, UnpackError::LimitExceeded(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            UnpackError::LimitExceeded(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    // Text sent to the client, the decoder error stays in the logs.
    pub fn message(&self) -> String {
        match self {
            UnpackError::Decode {
                encoding,
                ..
            } => decompression_error_message(encoding),
            _ => self.to_string(),
        }
    }

    pub fn into_response(self) -> Response<Bytes> {
        self.to_response()
    }

    // for errors only reachable by reference, eg. from_io
    pub fn to_response(&self) -> Response<Bytes> {
        let mut response = Response::new(Bytes::from(self.message()));
        *response.status_mut() = self.status_code();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
        response
    }
}

impl From<UnpackError> for io::Error {
    fn from(err: UnpackError) -> Self {
        let kind = match err {
            UnpackError::LimitExceeded(_) => io::ErrorKind::FileTooLarge,
            _ => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

pub fn decompression_error_message(encoding: &ContentEncoding) -> String {
    format!("Content-Encoding: {} set but unable to decompress body", encoding)
}

/// Every failure collected while releasing the resources of one body.
#[derive(Debug, Error)]
#[error("close| {}", join_errors(.0))]
pub struct CloseError(Vec<io::Error>);

impl CloseError {
    pub(crate) fn check(errors: Vec<io::Error>) -> Result<(), CloseError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CloseError(errors))
        }
    }

    pub fn errors(&self) -> &[io::Error] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<io::Error> {
        self.0
    }
}

fn join_errors(errors: &[io::Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
