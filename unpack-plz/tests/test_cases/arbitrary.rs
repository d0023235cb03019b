use super::*;

const VALUES: [&str; 14] = [
    "gzip",
    "deflate",
    "zstd",
    "gzip, zstd",
    "deflate, gzip",
    "GZip",
    " ZSTD , Deflate ",
    "identity",
    "identity, gzip",
    "",
    " , ",
    "br",
    "gzip, br",
    "x-unknown, zstd",
];

fn assert_decoded_or_rejected(response: &Response<Bytes>, context: &str) {
    assert!(
        response.status() == StatusCode::OK
            || response.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE,
        "{}: {}",
        context,
        response.status()
    );
}

// arbitrary bytes never crash the pipeline, they either decode or are refused
#[test]
fn arbitrary_payloads_are_decoded_or_rejected() {
    for strict in [false, true] {
        let config = Config::new().with_strict(strict);
        for seed in 0..64 {
            let len = (seed as usize * 37) % 512;
            for value in VALUES {
                let data = random_bytes(len, seed);
                let response = serve(config.clone(), request(&[value], data));
                let context = format!("{:?} {} {}", value, seed, strict);
                assert_decoded_or_rejected(&response, &context);
            }
            let data = random_bytes(len, seed);
            let response = serve(config.clone(), request(&[], data.clone()));
            assert_response(&response, StatusCode::OK, &data);
        }
    }
}

#[test]
fn arbitrary_payloads_pass_through_unknown_and_empty_values() {
    for value in ["", " , ", "br", "gzip, br", "x-unknown, zstd", "identity"] {
        let data = random_bytes(300, 17);
        let request = request(&[value], data.clone());
        let response = serve(Config::default(), request);
        assert_response(&response, StatusCode::OK, &data);
    }
}

#[test]
fn arbitrary_payloads_with_unknown_values_rejected_when_strict() {
    for value in ["br", "gzip, br", "x-unknown, zstd", "BR, identity"] {
        let data = random_bytes(300, 17);
        let response =
            serve(Config::new().with_strict(true), request(&[value], data));
        assert_eq!(
            response.status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "{}",
            value
        );
        assert!(response.body().ends_with(b"is not supported"), "{}", value);
    }
}

#[test]
fn corrupted_checksum_is_rejected() {
    for token in ["gzip", "deflate"] {
        let mut data = compress_chain(&random_bytes(1024, 5), &[token]);
        let len = data.len();
        for byte in &mut data[len - 4..] {
            *byte ^= 0xff;
        }
        let response = serve(Config::default(), request(&[token], data));
        assert_unsupported_media(&response, token);
    }
}

#[test]
fn truncated_zstd_frame_is_rejected() {
    let mut data = compress_zstd(&random_bytes(1024, 5));
    data.truncate(data.len() - 8);
    let response = serve(Config::default(), request(&["zstd"], data));
    assert_unsupported_media(&response, "zstd");
}

#[test]
fn magic_prefixed_garbage_fails_while_reading() {
    let mut data = vec![0x1f, 0x8b, 0x08, 0x00];
    data.extend(random_bytes(64, 9));
    let response = serve(Config::default(), request(&["gzip"], data));
    assert_unsupported_media(&response, "gzip");
}
