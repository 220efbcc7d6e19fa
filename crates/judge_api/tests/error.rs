use reqwest::StatusCode;

use judge_api::error::parse_error_message;

#[test]
fn parse_error_message_prefers_error_field() {
    let body = r#"{"error":"language with id 999 doesn't exist"}"#;
    let message = parse_error_message(StatusCode::UNPROCESSABLE_ENTITY, body);
    assert_eq!(message, "language with id 999 doesn't exist");
}

#[test]
fn parse_error_message_uses_message_field_from_gateway() {
    let body = r#"{"message":"You are not subscribed to this API."}"#;
    let message = parse_error_message(StatusCode::FORBIDDEN, body);
    assert_eq!(message, "You are not subscribed to this API.");
}

#[test]
fn parse_error_message_falls_back_to_raw_body() {
    let body = "raw failure text";
    let message = parse_error_message(StatusCode::INTERNAL_SERVER_ERROR, body);
    assert_eq!(message, "raw failure text");
}

#[test]
fn parse_error_message_uses_reason_phrase_for_empty_body() {
    let message = parse_error_message(StatusCode::TOO_MANY_REQUESTS, "");
    assert_eq!(message, "Too Many Requests");
}
