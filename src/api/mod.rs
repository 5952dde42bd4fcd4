//! Request handling for the `/api/digipin` endpoints.
//!
//! These functions are independent of any HTTP framework. A server hands over
//! the already-parsed query string or JSON body and writes back the returned
//! [`ApiResponse`].

mod validation;

use crate::error::Field;
use crate::index::{decode, encode};
use serde_json::{Value, json};
use std::collections::HashMap;
use validation::{Input, validate_code, validate_coordinate};

pub const ENCODE_PATH: &str = "/api/digipin/encode";
pub const DECODE_PATH: &str = "/api/digipin/decode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Status code and JSON body of a handled request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        let message = message.into();
        log::debug!("rejecting request: {}", message);
        Self {
            status: 400,
            body: json!({ "error": message }),
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            body: json!({ "error": "Not found" }),
        }
    }

    pub fn content_type(&self) -> &'static str {
        "application/json"
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the `error` message of a failed response.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Dispatches a request to the matching handler.
///
/// GET requests read `query`; POST requests read `body` (a missing body is
/// treated as `{}`). Unknown paths produce a 404.
pub fn handle(
    method: Method,
    path: &str,
    query: &HashMap<String, String>,
    body: Option<&Value>,
) -> ApiResponse {
    let empty = json!({});
    let body = body.unwrap_or(&empty);

    match (method, path.trim_end_matches('/')) {
        (Method::Get, ENCODE_PATH) => encode_from_query(query),
        (Method::Post, ENCODE_PATH) => encode_from_body(body),
        (Method::Get, DECODE_PATH) => decode_from_query(query),
        (Method::Post, DECODE_PATH) => decode_from_body(body),
        _ => ApiResponse::not_found(),
    }
}

fn query_input<'a>(query: &'a HashMap<String, String>, name: &str) -> Input<'a> {
    match query.get(name) {
        Some(value) => Input::Text(value),
        None => Input::Missing,
    }
}

fn body_input<'a>(body: &'a Value, name: &str) -> Input<'a> {
    match body.get(name) {
        None => Input::Missing,
        Some(Value::Null) => Input::Text(""),
        Some(Value::String(s)) => Input::Text(s),
        Some(Value::Number(n)) => n.as_f64().map(Input::Number).unwrap_or(Input::Other),
        Some(_) => Input::Other,
    }
}

fn encode_inputs(latitude: Input<'_>, longitude: Input<'_>) -> ApiResponse {
    let latitude = validate_coordinate(Field::Latitude, latitude);
    let longitude = validate_coordinate(Field::Longitude, longitude);

    match (latitude, longitude) {
        (Ok(lat), Ok(lon)) => match encode(lat, lon) {
            Ok(code) => ApiResponse::ok(json!({ "digipin": code })),
            Err(e) => ApiResponse::bad_request(e.to_string()),
        },
        (lat, lon) => {
            let messages: Vec<String> = [lat.err(), lon.err()].into_iter().flatten().collect();
            ApiResponse::bad_request(messages.join(", "))
        }
    }
}

fn decode_input(code: Input<'_>) -> ApiResponse {
    let code = match validate_code(code) {
        Ok(code) => code,
        Err(message) => return ApiResponse::bad_request(message),
    };

    match decode(&code) {
        Ok(decoded) => ApiResponse::ok(json!({
            "latitude": decoded.latitude,
            "longitude": decoded.longitude,
        })),
        Err(e) => ApiResponse::bad_request(e.to_string()),
    }
}

/// `GET /api/digipin/encode?latitude=..&longitude=..`
pub fn encode_from_query(query: &HashMap<String, String>) -> ApiResponse {
    encode_inputs(
        query_input(query, "latitude"),
        query_input(query, "longitude"),
    )
}

/// `POST /api/digipin/encode` with `{"latitude": .., "longitude": ..}`.
///
/// Coordinates may be JSON numbers or numeric strings.
pub fn encode_from_body(body: &Value) -> ApiResponse {
    encode_inputs(body_input(body, "latitude"), body_input(body, "longitude"))
}

/// `GET /api/digipin/decode?digipin=..`
pub fn decode_from_query(query: &HashMap<String, String>) -> ApiResponse {
    decode_input(query_input(query, "digipin"))
}

/// `POST /api/digipin/decode` with `{"digipin": ".."}`.
pub fn decode_from_body(body: &Value) -> ApiResponse {
    decode_input(body_input(body, "digipin"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn decoded_f64(response: &ApiResponse, key: &str) -> f64 {
        response.body[key]
            .as_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or(f64::NAN)
    }

    #[test]
    fn test_encode_get() {
        let response = encode_from_query(&query(&[
            ("latitude", "12.9716"),
            ("longitude", "77.5946"),
        ]));
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({ "digipin": "4P3-JK8-52C9" }));
        assert_eq!(response.content_type(), "application/json");
    }

    #[test]
    fn test_encode_get_missing_fields() {
        let response = encode_from_query(&query(&[("longitude", "77.5946")]));
        assert_eq!(response.status, 400);
        assert_eq!(response.error(), Some("Latitude is required"));

        let response = encode_from_query(&query(&[]));
        assert_eq!(
            response.error(),
            Some("Latitude is required, Longitude is required")
        );
    }

    #[test]
    fn test_encode_get_invalid_values() {
        let cases = [
            (("1.0", "77.5946"), "Latitude must be between 2.5 and 38.5"),
            (("40.0", "77.5946"), "Latitude must be between 2.5 and 38.5"),
            (("12.9716", "60.0"), "Longitude must be between 63.5 and 99.5"),
            (("12.9716", "100.0"), "Longitude must be between 63.5 and 99.5"),
            (("invalid", "77.5946"), "Latitude must be a valid number"),
            (("12.9716", "invalid"), "Longitude must be a valid number"),
            (("", "77.5946"), "Latitude cannot be empty"),
            (("NaN", "77.5946"), "Latitude must be a valid number"),
        ];
        for ((lat, lon), expected) in cases {
            let response =
                encode_from_query(&query(&[("latitude", lat), ("longitude", lon)]));
            assert_eq!(response.status, 400, "{} {}", lat, lon);
            assert_eq!(response.error(), Some(expected));
        }
    }

    #[test]
    fn test_encode_post() {
        let response = encode_from_body(&json!({ "latitude": 12.9716, "longitude": 77.5946 }));
        assert_eq!(response.status, 200);
        assert_eq!(response.body["digipin"], "4P3-JK8-52C9");

        let response =
            encode_from_body(&json!({ "latitude": "28.622788", "longitude": "77.213033" }));
        assert_eq!(response.body["digipin"], "39J-49L-L8T4");
    }

    #[test]
    fn test_encode_post_invalid_bodies() {
        for body in [
            json!({ "longitude": 77.5946 }),
            json!({ "latitude": 12.9716 }),
            json!({}),
            json!({ "latitude": true, "longitude": 77.5946 }),
            json!({ "latitude": null, "longitude": 77.5946 }),
        ] {
            let response = encode_from_body(&body);
            assert_eq!(response.status, 400, "{}", body);
            assert!(response.error().is_some());
        }
    }

    #[test]
    fn test_decode_get() {
        let response = decode_from_query(&query(&[("digipin", "4P3-JK8-52C9")]));
        assert_eq!(response.status, 200);
        assert!((decoded_f64(&response, "latitude") - 12.9716).abs() < 5e-5);
        assert!((decoded_f64(&response, "longitude") - 77.5946).abs() < 5e-5);

        let unseparated = decode_from_query(&query(&[("digipin", "4P3JK852C9")]));
        assert_eq!(unseparated, response);
    }

    #[test]
    fn test_decode_get_errors() {
        let cases = [
            (None, "DIGIPIN is required"),
            (Some(""), "DIGIPIN cannot be empty"),
            (
                Some("INVALID"),
                "DIGIPIN must be 10 characters long (excluding hyphens)",
            ),
            (
                Some("4P3-JK8-52XY"),
                "DIGIPIN contains invalid characters. Only 2-9, C, F, J, K, L, M, P, T are allowed",
            ),
        ];
        for (code, expected) in cases {
            let params = match code {
                Some(c) => query(&[("digipin", c)]),
                None => query(&[]),
            };
            let response = decode_from_query(&params);
            assert_eq!(response.status, 400);
            assert_eq!(response.error(), Some(expected));
        }
    }

    #[test]
    fn test_decode_post() {
        let response = decode_from_body(&json!({ "digipin": "4P3-JK8-52C9" }));
        assert_eq!(response.status, 200);
        assert_eq!(response.body["latitude"].as_str().map(str::len), Some(9));

        assert_eq!(decode_from_body(&json!({})).status, 400);
        assert_eq!(decode_from_body(&json!({ "digipin": "INVALID" })).status, 400);
        assert_eq!(
            decode_from_body(&json!({ "digipin": 42 })).error(),
            Some("DIGIPIN must be a string")
        );
    }

    #[test]
    fn test_round_trip_through_handlers() {
        for (lat, lon) in [
            (28.622788, 77.213033),
            (12.9716, 77.5946),
            (28.7041, 77.1025),
            (19.0760, 72.8777),
        ] {
            let encoded = handle(
                Method::Get,
                ENCODE_PATH,
                &query(&[
                    ("latitude", lat.to_string().as_str()),
                    ("longitude", lon.to_string().as_str()),
                ]),
                None,
            );
            assert!(encoded.is_success());

            let code = encoded.body["digipin"].as_str().unwrap_or_default();
            let decoded = handle(Method::Get, DECODE_PATH, &query(&[("digipin", code)]), None);
            assert!(decoded.is_success());
            assert!((decoded_f64(&decoded, "latitude") - lat).abs() < 5e-5);
            assert!((decoded_f64(&decoded, "longitude") - lon).abs() < 5e-5);
        }
    }

    #[test]
    fn test_handle_routes() {
        let body = json!({ "digipin": "39J-49L-L8T4" });
        let response = handle(Method::Post, "/api/digipin/decode/", &HashMap::new(), Some(&body));
        assert_eq!(response.status, 200);

        let response = handle(Method::Post, ENCODE_PATH, &HashMap::new(), None);
        assert_eq!(response.status, 400);

        let response = handle(Method::Get, "/api/unknown", &HashMap::new(), None);
        assert_eq!(response.status, 404);
    }
}
