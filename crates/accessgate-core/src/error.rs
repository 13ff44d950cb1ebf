//! Shared error type across accessgate crates.

use thiserror::Error;

use crate::model::{Action, ResourceKind};

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed config.
    BadRequest,
    /// Referenced record does not exist.
    NotFound,
    /// Denied by ownership / role / membership rules.
    Forbidden,
    /// Role check passed but the owner's subscription quota is used up.
    QuotaExceeded,
    /// Method-level evaluation denied the caller.
    AuthFailed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal / storage failure.
    Internal,
}

impl ClientCode {
    /// String representation used in responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Forbidden => "FORBIDDEN",
            ClientCode::QuotaExceeded => "QUOTA_EXCEEDED",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AccessError>;

/// Unified error type used by core and engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    /// e.g. "project update not allowed".
    #[error("{kind} {action} not allowed")]
    Forbidden { kind: ResourceKind, action: Action },
    /// Fail-closed answer for actions the engine does not recognise.
    #[error("{0} access error")]
    Denied(ResourceKind),
    /// e.g. "max projects created".
    #[error("max {} created", .0.plural())]
    QuotaExceeded(ResourceKind),
    #[error("auth failed: {0}")]
    AuthFailed(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl AccessError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        AccessError::NotFound { entity, id: id.into() }
    }

    pub fn forbidden(kind: ResourceKind, action: Action) -> Self {
        AccessError::Forbidden { kind, action }
    }

    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            AccessError::NotFound { .. } => ClientCode::NotFound,
            AccessError::Forbidden { .. } | AccessError::Denied(_) => ClientCode::Forbidden,
            AccessError::QuotaExceeded(_) => ClientCode::QuotaExceeded,
            AccessError::AuthFailed(_) => ClientCode::AuthFailed,
            AccessError::BadRequest(_) => ClientCode::BadRequest,
            AccessError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            AccessError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AccessError::NotFound { .. })
    }
}
