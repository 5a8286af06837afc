use courier::http::response::{Response, ResponseBuilder, StatusCode};
use courier::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
}

#[test]
fn test_response_builder_with_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.header("X-Custom"), Some("value"));
    assert_eq!(response.content_length(), 4);
}

#[test]
fn test_response_builder_ignores_manual_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.header("Content-Length"), None);
    let wire = String::from_utf8(serialize_response(&response)).unwrap();
    assert!(wire.contains("Content-Length: 4\r\n"));
    assert!(!wire.contains("999"));
}

#[test]
fn test_response_helpers() {
    let text = Response::text("abc");
    assert_eq!(text.status, StatusCode::Ok);
    assert_eq!(text.header("Content-Type"), Some("text/plain"));

    let file = Response::octet_stream(vec![1, 2, 3]);
    assert_eq!(file.header("Content-Type"), Some("application/octet-stream"));

    assert!(!Response::not_found().has_body());
    assert!(!Response::internal_error().has_body());
    assert_eq!(Response::internal_error().status, StatusCode::InternalServerError);
}

#[test]
fn test_serialize_text_response() {
    let wire = serialize_response(&Response::text("abc"));
    assert_eq!(
        wire,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc".to_vec()
    );
}

#[test]
fn test_serialize_not_found_is_header_only() {
    let wire = serialize_response(&Response::not_found());
    assert_eq!(
        wire,
        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".to_vec()
    );
}

#[test]
fn test_serialize_binary_body_verbatim() {
    let body = vec![0u8, 0xff, b'\r', b'\n', 7];
    let wire = serialize_response(&Response::octet_stream(body.clone()));
    assert!(wire.ends_with(&body));
}
