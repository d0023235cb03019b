use super::*;

struct Case {
    name: &'static str,
    headers: &'static [&'static str],
    body: fn() -> Vec<u8>,
    status: StatusCode,
    expected: &'static str,
}

const DECODE_FAILED: &str = "set but unable to decompress body";

fn truncated_zstd_in_gzip() -> Vec<u8> {
    let data = compress_chain(&random_bytes(4096, 3), &["gzip", "zstd"]);
    data[..data.len() / 2].to_vec()
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "gzip",
            headers: &["gzip"],
            body: || compress_gzip(INPUT),
            status: StatusCode::OK,
            expected: "hello world",
        },
        Case {
            name: "zlib deflate",
            headers: &["deflate"],
            body: || compress_deflate(INPUT),
            status: StatusCode::OK,
            expected: "hello world",
        },
        Case {
            name: "raw deflate",
            headers: &["deflate"],
            body: || compress_raw_deflate(INPUT),
            status: StatusCode::OK,
            expected: "hello world",
        },
        Case {
            name: "zstd",
            headers: &["zstd"],
            body: || compress_zstd(INPUT),
            status: StatusCode::OK,
            expected: "hello world",
        },
        Case {
            name: "mixed case tokens",
            headers: &[" GZip ,Zstd"],
            body: || compress_chain(INPUT, &["gzip", "zstd"]),
            status: StatusCode::OK,
            expected: "hello world",
        },
        Case {
            name: "identity only",
            headers: &["identity"],
            body: || INPUT.to_vec(),
            status: StatusCode::OK,
            expected: "hello world",
        },
        Case {
            name: "plaintext gzip",
            headers: &["gzip"],
            body: || INPUT.to_vec(),
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            expected: "Content-Encoding: gzip set but unable to decompress body",
        },
        Case {
            name: "plaintext deflate",
            headers: &["deflate"],
            body: || INPUT.to_vec(),
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            expected: "Content-Encoding: deflate set but unable to decompress body",
        },
        Case {
            name: "plaintext zstd",
            headers: &["zstd"],
            body: || INPUT.to_vec(),
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            expected: "Content-Encoding: zstd set but unable to decompress body",
        },
        Case {
            name: "empty gzip",
            headers: &["gzip"],
            body: Vec::new,
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            expected: "Content-Encoding: gzip set but unable to decompress body",
        },
        Case {
            name: "empty deflate",
            headers: &["deflate"],
            body: Vec::new,
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            expected: "Content-Encoding: deflate set but unable to decompress body",
        },
        Case {
            name: "gzip payload labelled zstd",
            headers: &["zstd"],
            body: || compress_gzip(INPUT),
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            expected: "Content-Encoding: zstd set but unable to decompress body",
        },
        Case {
            name: "inner stage not encoded",
            headers: &["deflate, gzip"],
            body: || compress_gzip(INPUT),
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            expected: "Content-Encoding: deflate set but unable to decompress body",
        },
        Case {
            name: "truncated outer stage",
            headers: &["gzip, zstd"],
            body: truncated_zstd_in_gzip,
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            expected: "Content-Encoding: zstd set but unable to decompress body",
        },
    ]
}

#[test]
fn request_table() {
    for case in cases() {
        let request = request(case.headers, (case.body)());
        let response = serve(Config::default(), request);
        assert_eq!(response.status(), case.status, "{}", case.name);
        assert_eq!(response.body(), case.expected, "{}", case.name);
        if case.status != StatusCode::OK {
            let body = String::from_utf8(response.body().to_vec()).unwrap();
            assert!(body.ends_with(DECODE_FAILED), "{}", case.name);
        }
    }
}
