use bytes::Bytes;
use encoding_plz::{Classification, EncodingChain};
use http::{
    Request, Response,
    header::{CONTENT_ENCODING, CONTENT_LENGTH},
};
use tracing::{debug, warn};

use crate::{
    body::{Body, BodyStream},
    config::Config,
    decoded::Decoded,
    error::UnpackError,
};

/// Anything that turns a request into a response.
pub trait Handler: Send + Sync {
    fn call(&self, request: Request<Body>) -> Response<Bytes>;
}

impl<F> Handler for F
where
    F: Fn(Request<Body>) -> Response<Bytes> + Send + Sync,
{
    fn call(&self, request: Request<Body>) -> Response<Bytes> {
        self(request)
    }
}

/* Description:
 *      Replace a compressed request body with its plaintext.
 *
 *      Absent | identity only      => request untouched
 *      unsupported token           => permissive - request untouched
 *                                     strict     - body closed unread,
 *                                                  UnpackError::Unsupported
 *      decodable                   => body decoded, Content-Encoding and
 *                                     Content-Length removed
 *
 *      A stage that cannot be opened fails with UnpackError::Open, the body
 *      is closed and the request is gone.
 */
pub fn unpack_request(
    request: Request<Body>,
    config: &Config,
) -> Result<Request<Body>, UnpackError> {
    let chain = EncodingChain::from(request.headers());
    match chain.classify() {
        Classification::Absent | Classification::Noop => return Ok(request),
        Classification::Unsupported(info) => {
            if config.strict {
                debug!("unsupported| {}", info);
                // unread, released like on an open failure
                let mut body = request.into_body();
                if let Err(e) = body.close() {
                    warn!("unsupported| close| {}", e);
                }
                return Err(UnpackError::Unsupported(info.encoding.clone()));
            }
            debug!("unsupported| {}| passing through", info);
            return Ok(request);
        }
        Classification::Decodable => (),
    }

    let (mut parts, body) = request.into_parts();
    let decoded = Decoded::new(body, &chain, config.limit())?;
    parts.headers.remove(CONTENT_ENCODING);
    parts.headers.remove(CONTENT_LENGTH);
    debug!("decoding| {} tokens", chain.len());
    Ok(Request::from_parts(parts, Box::new(decoded)))
}

/// Wraps a handler so that it always sees plaintext request bodies.
///
/// Setup failures are answered here and the wrapped handler is not called.
/// The decoded body belongs to the wrapped handler, it is released when the
/// handler drops the request, at the latest when the handler returns.
pub struct Unpack<H> {
    inner: H,
    config: Config,
}

impl<H> Unpack<H> {
    pub fn new(inner: H) -> Self {
        Self::with_config(inner, Config::default())
    }

    pub fn with_config(inner: H, config: Config) -> Self {
        Unpack {
            inner,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: Handler> Handler for Unpack<H> {
    fn call(&self, request: Request<Body>) -> Response<Bytes> {
        match unpack_request(request, &self.config) {
            Ok(request) => self.inner.call(request),
            Err(e) => {
                debug!("rejected| {}", e);
                e.into_response()
            }
        }
    }
}
