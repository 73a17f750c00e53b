use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::{responses::ErrorResponse, ClientError, Result};

/// Status codes the API uses for a successful exchange.
pub const SUCCESS_STATUS_CODES: [u16; 5] = [200, 201, 202, 204, 205];

/// A completed HTTP exchange: status, raw body and, when the body has the
/// `{code, description}` shape, the decoded error payload.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    body: Vec<u8>,
    error: Option<ErrorResponse>,
}

impl Response {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        let error = serde_json::from_slice::<ErrorResponse>(&body).ok();
        Self {
            status,
            body,
            error,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn error(&self) -> Option<&ErrorResponse> {
        self.error.as_ref()
    }

    /// Success is decided by status code alone; the body is never consulted.
    pub fn is_success(&self) -> bool {
        SUCCESS_STATUS_CODES.contains(&self.status)
    }

    /// `"<status>: <reason>, Body: <body>"`
    pub fn error_message(&self) -> String {
        let reason = StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("");
        format!(
            "{}: {}, Body: {}",
            self.status,
            reason,
            String::from_utf8_lossy(&self.body)
        )
    }

    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Api {
                message: self.error_message(),
                response: Box::new(self),
            })
        }
    }

    /// Like [`Response::decode`] but leaves the envelope with the caller.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| ClientError::Decode {
            source,
            response: Box::new(self.clone()),
        })
    }

    /// Decodes the body into `T`, keeping the envelope on failure.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| ClientError::Decode {
            source,
            response: Box::new(self),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERROR_BODY: &str = r#"{"code":"ERR101","description":"Invalid username or api_key"}"#;

    #[test]
    fn parses_error_payload() {
        let response = Response::new(400, ERROR_BODY.into());
        let error = response.error().unwrap();
        assert_eq!(error.code, "ERR101");
        assert_eq!(error.description, "Invalid username or api_key");
    }

    #[test]
    fn non_error_bodies_leave_payload_unset() {
        assert!(Response::new(200, b"<not-a-json></not-a-json>".to_vec())
            .error()
            .is_none());
        assert!(Response::new(200, br#"{"trans_id":"1"}"#.to_vec())
            .error()
            .is_none());
        assert!(Response::new(204, Vec::new()).error().is_none());
    }

    #[test]
    fn success_codes_are_exact() {
        for status in SUCCESS_STATUS_CODES {
            assert!(Response::new(status, Vec::new()).is_success(), "{status}");
        }
        for status in [203, 206, 301, 400, 401, 404, 500, 503] {
            assert!(!Response::new(status, Vec::new()).is_success(), "{status}");
        }
    }

    // A 200 carrying an error-shaped body still counts as a success.
    #[test]
    fn error_payload_on_ok_status_is_success() {
        let response = Response::new(200, ERROR_BODY.into()).into_result().unwrap();
        assert_eq!(response.error().map(|e| e.code.as_str()), Some("ERR101"));
    }

    #[test]
    fn failed_status_without_payload_is_an_error() {
        let err = Response::new(502, b"upstream down".to_vec())
            .into_result()
            .unwrap_err();
        assert!(err.api_error().is_none());
        assert_eq!(err.response().map(Response::status), Some(502));
        assert_eq!(err.to_string(), "502: Bad Gateway, Body: upstream down");
    }

    #[test]
    fn error_message_shape() {
        let response = Response::new(401, ERROR_BODY.into());
        assert_eq!(
            response.error_message(),
            format!("401: Unauthorized, Body: {ERROR_BODY}")
        );
    }

    #[test]
    fn unknown_status_has_empty_reason() {
        let response = Response::new(599, b"x".to_vec());
        assert_eq!(response.error_message(), "599: , Body: x");
    }

    #[test]
    fn decode_failure_exposes_api_error_payload() {
        let err = Response::new(200, ERROR_BODY.into())
            .json::<crate::DStvUser>()
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode { .. }));
        let api_error = err.api_error().unwrap();
        assert_eq!(api_error.code, "ERR101");
        assert_eq!(api_error.description, "Invalid username or api_key");
    }

    #[test]
    fn decode_failure_keeps_body() {
        let err = Response::new(200, b"<not-a-json></not-a-json>".to_vec())
            .decode::<serde_json::Value>()
            .unwrap_err();
        match err {
            ClientError::Decode { response, .. } => {
                assert_eq!(response.body(), b"<not-a-json></not-a-json>");
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }
}
