use serde::Deserialize;
use thiserror::Error;

/// Error returned by an AWS API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a modelled error
    #[error("{code}: {message}")]
    Service {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("request timed out")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,

    /// The request never produced a service response
    #[error("dispatch failure: {0}")]
    Dispatch(String),

    #[error("failed to parse response: {0}")]
    ParseError(String),
}

impl ApiError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Service {
            code: code.into(),
            message: message.into(),
            request_id: None,
        }
    }

    /// Machine-readable error code, if the service returned one
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn code_equals(&self, code: &str) -> bool {
        self.code() == Some(code)
    }

    pub fn code_in(&self, codes: &[&str]) -> bool {
        self.code().is_some_and(|c| codes.contains(&c))
    }

    /// Parse the error body of an AWS JSON-protocol response
    pub fn from_json_body(body: &[u8], request_id: Option<String>) -> Self {
        #[derive(Deserialize)]
        struct JsonErrorBody {
            #[serde(rename = "__type")]
            error_type: Option<String>,
            #[serde(alias = "Message")]
            message: Option<String>,
        }

        match serde_json::from_slice::<JsonErrorBody>(body) {
            Ok(JsonErrorBody {
                error_type: Some(error_type),
                message,
            }) => {
                // "com.amazonaws.kendra#ResourceNotFoundException" -> "ResourceNotFoundException"
                let code = error_type
                    .rsplit('#')
                    .next()
                    .unwrap_or(&error_type)
                    .to_string();
                ApiError::Service {
                    code,
                    message: message.unwrap_or_default(),
                    request_id,
                }
            }
            Ok(_) => ApiError::ParseError("error response without __type".to_string()),
            Err(e) => ApiError::ParseError(format!("invalid error body: {}", e)),
        }
    }
}

impl From<tfplug::TfplugError> for ApiError {
    fn from(err: tfplug::TfplugError) -> Self {
        match err {
            tfplug::TfplugError::DeadlineExceeded => ApiError::Timeout,
            tfplug::TfplugError::Cancelled => ApiError::Cancelled,
            other => ApiError::Dispatch(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_matching() {
        let err = ApiError::service("NoSuchAccessPoint", "The specified accesspoint does not exist");

        assert_eq!(err.code(), Some("NoSuchAccessPoint"));
        assert!(err.code_equals("NoSuchAccessPoint"));
        assert!(err.code_in(&["Other", "NoSuchAccessPoint"]));
        assert!(!ApiError::Timeout.code_in(&["NoSuchAccessPoint"]));
    }

    #[test]
    fn message_text_is_not_a_code() {
        let err = ApiError::service("AccessDenied", "NoSuchAccessPoint mentioned in text");
        assert!(!err.code_equals("NoSuchAccessPoint"));
    }

    #[test]
    fn parses_json_protocol_error_with_namespace() {
        let body = br#"{"__type":"com.amazonaws.kendra#ResourceNotFoundException","message":"Thesaurus not found"}"#;

        let err = ApiError::from_json_body(body, Some("req-1".to_string()));
        match err {
            ApiError::Service {
                code,
                message,
                request_id,
            } => {
                assert_eq!(code, "ResourceNotFoundException");
                assert_eq!(message, "Thesaurus not found");
                assert_eq!(request_id.as_deref(), Some("req-1"));
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn parses_json_protocol_error_with_capitalised_message() {
        let body = br#"{"__type":"ValidationException","Message":"bad input"}"#;

        let err = ApiError::from_json_body(body, None);
        assert!(err.code_equals("ValidationException"));
        assert!(err.to_string().contains("bad input"));
    }

    #[test]
    fn rejects_unparseable_error_body() {
        let err = ApiError::from_json_body(b"<html>", None);
        assert!(matches!(err, ApiError::ParseError(_)));
    }
}
