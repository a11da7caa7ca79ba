//! Handler errors and their HTTP mapping.

use http::StatusCode;
use serde_json::json;
use tracing::{error, warn};

use super::id::ParseIdError;
use super::model::DecodeError;
use super::store::StoreError;
use crate::response::{IntoResponse, Response};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("stuff not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the client sees. Store failures stay generic.
    fn public_message(&self) -> String {
        match self {
            Self::Store(_) | Self::Encode(_) => "internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        let body = json!({ "error": self.public_message() }).to_string();
        Response::builder().status(status).json(body)
    }
}
