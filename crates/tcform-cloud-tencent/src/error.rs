//! Tencent Cloud provider error types

use tcform_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TencentError {
    #[error("Credentials are missing: set TENCENTCLOUD_SECRET_ID and TENCENTCLOUD_SECRET_KEY")]
    MissingCredentials,

    #[error("[{action}] {code}: {message} (RequestId: {request_id})")]
    Api {
        action: String,
        code: String,
        message: String,
        request_id: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from {action}: {message}")]
    InvalidResponse { action: String, message: String },

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TencentError>;

impl From<TencentError> for CloudError {
    fn from(err: TencentError) -> Self {
        match err {
            TencentError::MissingCredentials => CloudError::AuthenticationFailed(
                "TENCENTCLOUD_SECRET_ID and TENCENTCLOUD_SECRET_KEY are not set".to_string(),
            ),
            TencentError::Api {
                action,
                code,
                message,
                request_id,
            } => {
                if code.starts_with("AuthFailure") {
                    CloudError::AuthenticationFailed(format!("{}: {}", code, message))
                } else if code.contains("NotFound") {
                    CloudError::ResourceNotFound(format!("[{}] {}: {}", action, code, message))
                } else {
                    CloudError::Api {
                        action,
                        code,
                        message,
                        request_id: Some(request_id),
                    }
                }
            }
            TencentError::Http(e) => CloudError::Network(e.to_string()),
            TencentError::InvalidResponse { action, message } => CloudError::Api {
                action,
                code: "InvalidResponse".to_string(),
                message,
                request_id: None,
            },
            TencentError::JsonError(e) => CloudError::Json(e),
        }
    }
}
