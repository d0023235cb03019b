use super::*;

fn limited(max: i64) -> Config {
    Config::new().with_max_decoded_bytes(max)
}

#[test]
fn body_of_exactly_limit_bytes_is_accepted() {
    let data = compress_gzip(INPUT);
    let response = serve(limited(11), request(&["gzip"], data));
    assert_response(&response, StatusCode::OK, INPUT);
}

#[test]
fn one_byte_over_limit_is_rejected() {
    let data = compress_gzip(INPUT);
    let response = serve(limited(10), request(&["gzip"], data));
    assert_response(
        &response,
        StatusCode::PAYLOAD_TOO_LARGE,
        b"decoded body exceeds limit of 10 bytes",
    );
}

#[test]
fn limit_counts_decoded_bytes() {
    // small on the wire, large once decoded
    let plain = vec![b'a'; 1 << 20];
    let data = compress_chain(&plain, &["gzip", "zstd"]);
    assert!(data.len() < 64 * 1024);
    let response = serve(limited(64 * 1024), request(&["gzip, zstd"], data));
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[test]
fn non_positive_limit_is_disabled() {
    let plain = vec![b'a'; 1 << 16];
    for max in [0, -1] {
        let data = compress_zstd(&plain);
        let response = serve(limited(max), request(&["zstd"], data));
        assert_response(&response, StatusCode::OK, &plain);
    }
}

#[test]
fn limit_ignored_without_decoding() {
    let response = serve(limited(4), request(&[], INPUT.to_vec()));
    assert_response(&response, StatusCode::OK, INPUT);
}

#[test]
fn handler_reading_partially_stays_under_limit() {
    let handler = Unpack::with_config(
        |request: Request<Body>| {
            let mut buf = [0u8; 5];
            let mut body = request.into_body();
            body.read_exact(&mut buf).unwrap();
            Response::new(Bytes::copy_from_slice(&buf))
        },
        limited(8),
    );
    let data = compress_deflate(INPUT);
    let response = handler.call(request(&["deflate"], data));
    assert_response(&response, StatusCode::OK, b"hello");
}
