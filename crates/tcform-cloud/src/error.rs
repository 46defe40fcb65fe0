//! Cloud provider error types

use thiserror::Error;

/// Error codes that signal a transient condition on the vendor side.
///
/// A code matches when it is equal to an entry or starts with `<entry>.`.
pub const RETRYABLE_ERROR_CODES: &[&str] = &[
    "FailedOperation",
    "TradeUnknownError",
    "RequestLimitExceeded",
    "ResourceInUse",
    "ResourceInsufficient",
    "ResourceUnavailable",
    "ResourceBusy",
    "InvalidParameter.ActionInProgress",
];

/// Codes retried only while reading; a write answered with these may have taken effect
pub const READ_RETRYABLE_ERROR_CODES: &[&str] = &["InternalError"];

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Unsupported resource type: {0}")]
    UnsupportedResourceType(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Resource already exists: {0}")]
    ResourceAlreadyExists(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error [{action}] {code}: {message}")]
    Api {
        action: String,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Missing required attribute `{attribute}` for {resource_type}")]
    MissingRequired {
        resource_type: String,
        attribute: String,
    },

    #[error("Attribute `{attribute}` of {resource_type} must be {expected}")]
    InvalidAttribute {
        resource_type: String,
        attribute: String,
        expected: String,
    },

    #[error("{resource_type} update on `{attribute}` is not supported")]
    ImmutableAttribute {
        resource_type: String,
        attribute: String,
    },

    #[error("Invalid resource id `{id}`: expected {expected} parts separated by `#`")]
    InvalidId { id: String, expected: usize },

    #[error("Invalid state transition for {resource}: {from} -> {to}")]
    InvalidTransition {
        resource: String,
        from: String,
        to: String,
    },

    #[error("Unexpected state `{state}` while waiting for {target}")]
    UnexpectedState { state: String, target: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("State file error: {0}")]
    StateError(String),

    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CloudError {
    /// Vendor error code, if the error came from the API
    pub fn code(&self) -> Option<&str> {
        match self {
            CloudError::Api { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// Whether the error is worth retrying, given extra codes accepted by the caller
    pub fn is_retryable(&self, additional_codes: &[&str]) -> bool {
        match self {
            CloudError::Network(_) => true,
            CloudError::Api { code, .. } => RETRYABLE_ERROR_CODES
                .iter()
                .chain(additional_codes.iter())
                .any(|expected| code_matches(code, expected)),
            _ => false,
        }
    }

    /// Whether the error means the remote object does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CloudError::ResourceNotFound(_))
    }
}

/// `code` equals `expected` or is a sub-code of it
pub fn code_matches(code: &str, expected: &str) -> bool {
    code == expected
        || code
            .strip_prefix(expected)
            .is_some_and(|rest| rest.starts_with('.'))
}

pub type Result<T> = std::result::Result<T, CloudError>;
