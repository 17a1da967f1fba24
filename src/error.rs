use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        serialization_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        serialization_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl Error {
    /// Caller errors carry codes from 100 upwards.
    pub fn is_input_error(&self) -> bool {
        self.code >= 100
    }
}

pub fn invalid_input_error(message: impl Into<String>) -> Error {
    Error {
        code: 101,
        message: message.into(),
    }
}

pub fn place_not_found_error(name: &str) -> Error {
    Error {
        code: 102,
        message: format!("place not found: {}", name),
    }
}

pub fn no_anchors_error() -> Error {
    Error {
        code: 103,
        message: "at least one anchor coordinate is required".into(),
    }
}

pub fn no_places_error() -> Error {
    Error {
        code: 104,
        message: "place list is empty".into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn config_error(message: impl Into<String>) -> Error {
    Error {
        code: 6,
        message: message.into(),
    }
}

pub fn serialization_error<T: Debug>(err: T) -> Error {
    Error {
        code: 7,
        message: format!("serialization error: {:?}", err),
    }
}
