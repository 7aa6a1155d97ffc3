use openapi_to_ts::{ConversionError, Source, SourceOptions};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Serve a single HTTP response on a local port and return its URL.
fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{addr}/openapi.json")
}

fn options() -> SourceOptions {
    SourceOptions::new(std::env::temp_dir())
}

#[test]
fn test_fetches_url_source() {
    let body = r#"{"openapi":"3.0.0","components":{"schemas":{"Id":{"type":"string"}}}}"#;
    let url = serve_once("200 OK", body.to_string());

    let content = Source::parse(&url).read(&options()).unwrap();
    assert_eq!(content, body);

    let generated = openapi_to_ts::convert_document(&content).unwrap();
    assert_eq!(generated.text, "export type Id = string");
}

#[test]
fn test_fetches_body_over_ten_mebibytes() {
    let padding = "x".repeat(11 * 1024 * 1024);
    let body = format!(
        r#"{{"openapi":"3.0.0","info":{{"description":"{padding}"}},"components":{{"schemas":{{"Id":{{"type":"string"}}}}}}}}"#
    );
    let expected_len = body.len();
    let url = serve_once("200 OK", body);

    let content = Source::parse(&url).read(&options()).unwrap();
    assert_eq!(content.len(), expected_len);

    let generated = openapi_to_ts::convert_document(&content).unwrap();
    assert_eq!(generated.text, "export type Id = string");
}

#[test]
fn test_non_200_status_is_fatal() {
    let url = serve_once("404 Not Found", String::new());

    let err = Source::parse(&url).read(&options()).unwrap_err();
    match err {
        ConversionError::HttpStatus { status, url: failed } => {
            assert_eq!(status, 404);
            assert_eq!(failed, url);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unreachable_host_is_fetch_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = Source::parse(&format!("http://{addr}/openapi.json"))
        .read(&options())
        .unwrap_err();
    assert!(matches!(err, ConversionError::Fetch { .. }));
}
