//
//  azure-devops-rest
//  api/decode.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Decoding
//!
//! Turns a [`RawResponse`] into typed data.
//!
//! ## Date Normalization
//!
//! Older parts of the service serialize dates as the string
//! `"\/Date(1428580800000)\/"` (milliseconds since the Unix epoch, optionally
//! followed by a `+hhmm`/`-hhmm` offset that does not change the instant).
//! Before a body is handed to serde, every such string, at any depth, is
//! rewritten to RFC 3339 so that fields typed `chrono::DateTime<Utc>`
//! deserialize natively. ISO-8601 strings are left alone.
//!
//! ## Continuation Tokens
//!
//! List endpoints report further pages through the `x-ms-continuationtoken`
//! header. [`decode_list`] reads it and attaches it to the [`PagedList`].

use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::common::{ApiError, CollectionEnvelope, PagedList, CONTINUATION_TOKEN_HEADER};
use super::transport::RawResponse;

/// Matches `/Date(<millis>)/` with an optional `+hhmm` / `-hhmm` suffix.
static DATE_SENTINEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/Date\((-?\d+)([+-]\d{4})?\)/$").unwrap());

/// Result of decoding in either mode.
#[derive(Debug, Clone)]
pub enum Decoded {
    /// The response, untouched.
    Raw(RawResponse),
    /// The parsed and date-normalized body.
    Json(Value),
}

impl Decoded {
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    pub fn into_raw(self) -> Option<RawResponse> {
        match self {
            Self::Raw(raw) => Some(raw),
            Self::Json(_) => None,
        }
    }
}

/// Decodes `response`, or hands it back unchanged when `raw_mode` is set.
pub fn decode(response: RawResponse, raw_mode: bool) -> Result<Decoded, ApiError> {
    if raw_mode {
        return Ok(Decoded::Raw(response));
    }
    decode_value(&response).map(Decoded::Json)
}

/// Parses the body as JSON and normalizes embedded dates.
///
/// An empty body (e.g. `204 No Content`) decodes as `null`.
pub fn decode_value(response: &RawResponse) -> Result<Value, ApiError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let mut value: Value = serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::Decode(format!("invalid JSON body: {e}")))?;
    normalize_dates(&mut value)?;
    Ok(value)
}

/// Decodes the body into `T`.
pub fn decode_json<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ApiError> {
    let value = decode_value(response)?;
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decodes a list body (either a bare array or a `{ "value": [...] }`
/// envelope) and attaches the continuation token from the headers.
pub fn decode_list<T: DeserializeOwned>(response: &RawResponse) -> Result<PagedList<T>, ApiError> {
    let items = match decode_value(response)? {
        Value::Null => Vec::new(),
        array @ Value::Array(_) => {
            serde_json::from_value(array).map_err(|e| ApiError::Decode(e.to_string()))?
        }
        object @ Value::Object(_) => {
            let envelope: CollectionEnvelope<T> =
                serde_json::from_value(object).map_err(|e| ApiError::Decode(e.to_string()))?;
            envelope.value
        }
        other => {
            return Err(ApiError::Decode(format!(
                "expected a JSON array or collection, got {other}"
            )))
        }
    };

    Ok(PagedList::new(items, continuation_token(response)))
}

/// Reads the `x-ms-continuationtoken` header. An empty value means no token.
pub fn continuation_token(response: &RawResponse) -> Option<String> {
    response
        .header(CONTINUATION_TOKEN_HEADER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Rewrites every `/Date(...)/` string in `value` to RFC 3339, recursively.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when a sentinel holds a timestamp outside the
/// range chrono can represent.
pub fn normalize_dates(value: &mut Value) -> Result<(), ApiError> {
    match value {
        Value::String(text) => {
            if let Some(date) = parse_date_sentinel(text)? {
                *text = date.to_rfc3339_opts(SecondsFormat::Millis, true);
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_dates(item)?;
            }
        }
        Value::Object(map) => {
            for (_, field) in map.iter_mut() {
                normalize_dates(field)?;
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
    Ok(())
}

/// Parses a single `/Date(millis[+-hhmm])/` string.
///
/// Returns `Ok(None)` for anything that is not a date sentinel.
pub fn parse_date_sentinel(text: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    let Some(captures) = DATE_SENTINEL.captures(text) else {
        return Ok(None);
    };

    let millis: i64 = captures[1]
        .parse()
        .map_err(|_| ApiError::Decode(format!("date value out of range: {text}")))?;

    DateTime::from_timestamp_millis(millis)
        .map(Some)
        .ok_or_else(|| ApiError::Decode(format!("date value out of range: {text}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};
    use reqwest::StatusCode;
    use serde_json::json;

    fn response(body: &str, token: Option<&'static str>) -> RawResponse {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            headers.insert(CONTINUATION_TOKEN_HEADER, HeaderValue::from_static(token));
        }
        RawResponse::new(StatusCode::OK, headers, body)
    }

    #[test]
    fn test_sentinel_parsing() {
        let date = parse_date_sentinel("/Date(1428580800000)/").unwrap().unwrap();
        assert_eq!(date.to_rfc3339(), "2015-04-09T12:00:00+00:00");

        let with_offset = parse_date_sentinel("/Date(1428580800000+0200)/").unwrap().unwrap();
        assert_eq!(with_offset, date);

        let before_epoch = parse_date_sentinel("/Date(-1000)/").unwrap().unwrap();
        assert_eq!(before_epoch.timestamp(), -1);

        assert!(parse_date_sentinel("2015-04-09T12:00:00Z").unwrap().is_none());
        assert!(parse_date_sentinel("Date(1)").unwrap().is_none());
        assert!(parse_date_sentinel("/Date(abc)/").unwrap().is_none());
    }

    #[test]
    fn test_sentinel_out_of_range() {
        let err = parse_date_sentinel("/Date(99999999999999999999)/").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_nested_dates_normalized() {
        // The JSON escape `\/` decodes to `/`.
        let body = r#"{
            "name": "root",
            "children": [
                {"info": {"changed": "\/Date(1428580800000)\/", "rev": 3}},
                {"info": {"changed": "not a date", "rev": 4}}
            ]
        }"#;

        let value = decode_value(&response(body, None)).unwrap();

        assert_eq!(value["children"][0]["info"]["changed"], "2015-04-09T12:00:00.000Z");
        assert_eq!(value["children"][0]["info"]["rev"], 3);
        assert_eq!(value["children"][1]["info"]["changed"], "not a date");
        assert_eq!(value["name"], "root");
    }

    #[test]
    fn test_decode_json_into_chrono() {
        #[derive(serde::Deserialize)]
        struct Stamp {
            at: DateTime<Utc>,
        }

        let stamp: Stamp = decode_json(&response(r#"{"at": "/Date(0)/"}"#, None)).unwrap();
        assert_eq!(stamp.at.timestamp(), 0);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let err = decode_value(&response("{not json", None)).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(decode_value(&response("  ", None)).unwrap(), Value::Null);
        decode_json::<()>(&response("", None)).unwrap();
    }

    #[test]
    fn test_raw_mode_returns_response_untouched() {
        let raw = response("[1,2]", Some("abc123"));
        let decoded = decode(raw, true).unwrap().into_raw().unwrap();

        assert_eq!(decoded.body, b"[1,2]");
        let page = PagedList::new(
            decode_json::<Vec<u32>>(&decoded).unwrap(),
            continuation_token(&decoded),
        );
        assert_eq!(page.next_token(), Some("abc123"));
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn test_decode_list_from_envelope_and_array() {
        let envelope = decode_list::<String>(&response(r#"{"count": 1, "value": ["a"]}"#, None)).unwrap();
        assert_eq!(envelope.items, vec!["a".to_string()]);
        assert!(!envelope.has_next());

        let array = decode_list::<u32>(&response("[4, 5]", Some("next"))).unwrap();
        assert_eq!(array.items, vec![4, 5]);
        assert_eq!(array.next_token(), Some("next"));

        let err = decode_list::<u32>(&response("42", None)).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_blank_token_counts_as_absent() {
        let raw = response("[]", Some(" "));
        assert_eq!(continuation_token(&raw), None);
        assert_eq!(decode(raw, false).unwrap().into_json(), Some(json!([])));
    }
}
