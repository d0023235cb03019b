use std::io::Read;

use super::*;
pub mod arbitrary;
pub mod limit;
pub mod table;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn serve(config: Config, request: Request<Body>) -> Response<Bytes> {
    init_tracing();
    Unpack::with_config(echo, config).call(request)
}

fn assert_response(
    response: &Response<Bytes>,
    status: StatusCode,
    body: &[u8],
) {
    assert_eq!(response.status(), status);
    assert_eq!(response.body().as_ref(), body);
}

fn assert_unsupported_media(response: &Response<Bytes>, encoding: &str) {
    let message = format!(
        "Content-Encoding: {} set but unable to decompress body",
        encoding
    );
    assert_response(
        response,
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        message.as_bytes(),
    );
}
