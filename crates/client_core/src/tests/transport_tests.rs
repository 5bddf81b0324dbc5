use super::*;
use shared::{
    domain::{AckNumber, ScalarValue},
    error::{NO_RECORDS_MESSAGE, TRANSPORT_FAILURE_MESSAGE},
};

fn request(identifier: &str, year: Year) -> LookupRequest {
    LookupRequest {
        year,
        identifier: AckNumber::parse(identifier).expect("ack"),
    }
}

#[test]
fn success_body_becomes_ordered_record() {
    let record = classify_response(RawResponse::new(
        200,
        r#"{"Name":"Jane Doe","Ack No":"12345"}"#,
    ))
    .expect("record");
    let labels: Vec<&str> = record.iter().map(|(label, _)| label).collect();
    assert_eq!(labels, ["Name", "Ack No"]);
    assert_eq!(
        record.get("Name"),
        Some(&ScalarValue::Text("Jane Doe".into()))
    );
}

#[test]
fn any_2xx_counts_as_success() {
    assert!(classify_response(RawResponse::new(204, "{}")).is_ok());
    assert!(classify_response(RawResponse::new(299, r#"{"a":1}"#)).is_ok());
}

#[test]
fn error_field_becomes_application_message() {
    let err = classify_response(RawResponse::new(404, r#"{"error":"Case not found"}"#))
        .expect_err("404");
    assert_eq!(
        err,
        LookupError::Application {
            status: 404,
            message: "Case not found".into()
        }
    );
}

#[test]
fn missing_error_field_falls_back_to_no_records() {
    for body in ["{}", r#"{"detail":"x"}"#, r#"{"error":null}"#, "[]"] {
        let err = classify_response(RawResponse::new(500, body)).expect_err("500");
        assert_eq!(err.user_message(), NO_RECORDS_MESSAGE, "body {body}");
    }
}

#[test]
fn undecodable_bodies_are_decode_errors() {
    assert!(matches!(
        classify_response(RawResponse::new(200, "<html>oops</html>")),
        Err(LookupError::Decode(_))
    ));
    assert!(matches!(
        classify_response(RawResponse::new(200, "[1,2,3]")),
        Err(LookupError::Decode(_))
    ));
    assert!(matches!(
        classify_response(RawResponse::new(502, "Bad Gateway")),
        Err(LookupError::Decode(_))
    ));
    assert!(matches!(
        classify_response(RawResponse::new(404, "")),
        Err(LookupError::Decode(_))
    ));
}

#[test]
fn null_error_body_uses_transport_message() {
    let err = classify_response(RawResponse::new(404, "null")).expect_err("404");
    assert!(matches!(err, LookupError::Decode(_)));
    assert_eq!(err.user_message(), TRANSPORT_FAILURE_MESSAGE);
}

#[test]
fn integral_float_fields_display_as_integers() {
    let record = classify_response(RawResponse::new(200, r#"{"Amount":12.0,"Big":1e5}"#))
        .expect("record");
    let rows = record.rows();
    assert_eq!(rows[0].value, "12");
    assert_eq!(rows[1].value, "100000");
}

#[test]
fn endpoint_interpolates_year_and_identifier() {
    let transport = HttpLookupTransport::new(
        &ClientConfig::default().with_base_url("https://lookup.example.test/"),
    )
    .expect("transport");
    let url = transport
        .endpoint(&request("12345", Year::Y2024))
        .expect("url");
    assert_eq!(url.as_str(), "https://lookup.example.test/api/case/2024/12345");
}

#[test]
fn endpoint_keeps_base_path_prefix_and_encodes_spaces() {
    let transport =
        HttpLookupTransport::new(&ClientConfig::default().with_base_url("http://host:8080/svc"))
            .expect("transport");
    let url = transport
        .endpoint(&request("1 23", Year::Y2025))
        .expect("url");
    assert_eq!(url.as_str(), "http://host:8080/svc/api/case/2025/1%2023");
}

#[test]
fn invalid_base_url_is_rejected() {
    let config = ClientConfig {
        base_url: "not a url".into(),
        ..ClientConfig::default()
    };
    assert!(matches!(
        HttpLookupTransport::new(&config),
        Err(TransportError::Url(_))
    ));
}

#[tokio::test]
async fn missing_transport_reports_transport_failure() {
    let transport = MissingLookupTransport::new("worker offline");
    let outcome = perform_lookup(&transport, &request("12345", Year::Y2025)).await;
    assert!(matches!(
        outcome,
        Err(LookupError::Transport(detail)) if detail.contains("worker offline")
    ));
}
