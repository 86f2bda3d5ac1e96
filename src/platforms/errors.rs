// ABOUTME: Platform failure types and their normalization into the shared error taxonomy
// ABOUTME: Structured platform errors keep their declared kind, messages are pattern-classified
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Platform errors
//!
//! Every platform client reports failures as a [`PlatformError`]. The
//! [`PlatformError::kind`] method is the single place that maps a platform
//! failure onto an [`ErrorKind`]:
//!
//! 1. a structured failure (HTTP status mapping, explicit rejection) keeps the
//!    kind it was built with;
//! 2. a free-text rejection is classified by [`classify_message`], which only
//!    recognizes "not found" phrasing;
//! 3. everything else is a bad gateway.

use crate::errors::{AppError, ErrorKind};
use crate::models::Platform;
use reqwest::StatusCode;

/// Message phrases that mean the platform does not know the store
const NOT_FOUND_PATTERNS: [&str; 3] = ["não encontrada", "nao encontrada", "not found"];

/// Failure reported by a platform client
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// No access token has been obtained yet
    #[error("{platform}: access token not available")]
    TokenUnavailable {
        /// Platform without a token
        platform: Platform,
    },

    /// Credentials required for authentication are not configured
    #[error("{platform}: {field} is not configured")]
    MissingCredentials {
        /// Platform being authenticated
        platform: Platform,
        /// Name of the missing setting
        field: &'static str,
    },

    /// The request never produced a response
    #[error("{platform}: request failed: {source}")]
    Transport {
        /// Platform being called
        platform: Platform,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// Platform answered with a non-success HTTP status
    #[error("{platform}: {message}")]
    Status {
        /// Platform being called
        platform: Platform,
        /// Raw HTTP status
        status: u16,
        /// Raw response body
        body: String,
        /// Kind declared by the status mapping
        kind: ErrorKind,
        /// Caller-facing message
        message: String,
    },

    /// Platform answered successfully at the HTTP level but refused the operation
    #[error("{platform}: {message}")]
    Rejected {
        /// Platform being called
        platform: Platform,
        /// Kind derived from the rejection message
        kind: ErrorKind,
        /// Message supplied by the platform
        message: String,
    },

    /// Response body could not be decoded
    #[error("{platform}: unexpected response body: {source}")]
    Decode {
        /// Platform being called
        platform: Platform,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

impl PlatformError {
    /// Build a structured error from a non-success HTTP response
    #[must_use]
    pub fn from_status(platform: Platform, status: StatusCode, body: String) -> Self {
        let (kind, message) = match status {
            StatusCode::NOT_FOUND => (ErrorKind::NotFound, "Store not found on platform".to_owned()),
            StatusCode::UNAUTHORIZED => (
                ErrorKind::Unauthorized,
                "Authentication with platform failed".to_owned(),
            ),
            StatusCode::UNPROCESSABLE_ENTITY => (
                ErrorKind::InvalidRequest,
                "Invalid data for the operation".to_owned(),
            ),
            _ => (
                ErrorKind::BadGateway,
                format!(
                    "Platform communication error - status: {}, response: {body}",
                    status.as_u16()
                ),
            ),
        };

        Self::Status {
            platform,
            status: status.as_u16(),
            body,
            kind,
            message,
        }
    }

    /// Build a rejection from a platform-supplied message
    pub fn rejected(platform: Platform, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Rejected {
            platform,
            kind: classify_message(&message),
            message,
        }
    }

    /// Normalized kind of this failure
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Status { kind, .. } | Self::Rejected { kind, .. } => *kind,
            Self::TokenUnavailable { .. } => ErrorKind::Unauthorized,
            Self::MissingCredentials { .. } => ErrorKind::Internal,
            Self::Transport { .. } | Self::Decode { .. } => ErrorKind::BadGateway,
        }
    }

    /// Platform that produced the failure
    #[must_use]
    pub const fn platform(&self) -> Platform {
        match self {
            Self::TokenUnavailable { platform }
            | Self::MissingCredentials { platform, .. }
            | Self::Transport { platform, .. }
            | Self::Status { platform, .. }
            | Self::Rejected { platform, .. }
            | Self::Decode { platform, .. } => *platform,
        }
    }

    /// Whether the platform reported the store as unknown
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Classify a free-text platform message
///
/// Only "not found" phrasing is recognized; any other message is a bad gateway.
#[must_use]
pub fn classify_message(message: &str) -> ErrorKind {
    let lowered = message.to_lowercase();
    if NOT_FOUND_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
    {
        ErrorKind::NotFound
    } else {
        ErrorKind::BadGateway
    }
}

impl From<PlatformError> for AppError {
    fn from(error: PlatformError) -> Self {
        let kind = error.kind();
        let message = match &error {
            PlatformError::Status { message, .. } | PlatformError::Rejected { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        };
        Self::new(kind, message).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (StatusCode::NOT_FOUND, ErrorKind::NotFound),
            (StatusCode::UNAUTHORIZED, ErrorKind::Unauthorized),
            (StatusCode::UNPROCESSABLE_ENTITY, ErrorKind::InvalidRequest),
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::BadGateway),
            (StatusCode::CONFLICT, ErrorKind::BadGateway),
        ];

        for (status, expected) in cases {
            let error = PlatformError::from_status(Platform::DeliveryVip, status, String::new());
            assert_eq!(error.kind(), expected, "status {status}");
        }
    }

    #[test]
    fn test_status_keeps_raw_status_and_body() {
        let error = PlatformError::from_status(
            Platform::DeliveryVip,
            StatusCode::SERVICE_UNAVAILABLE,
            "maintenance".to_owned(),
        );

        match &error {
            PlatformError::Status { status, body, .. } => {
                assert_eq!(*status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(error.to_string().contains("503"));
        assert!(error.to_string().contains("maintenance"));
    }

    #[test]
    fn test_message_classification() {
        assert_eq!(classify_message("Página não encontrada"), ErrorKind::NotFound);
        assert_eq!(classify_message("pagina nao encontrada"), ErrorKind::NotFound);
        assert_eq!(classify_message("Store NOT FOUND"), ErrorKind::NotFound);
        assert_eq!(classify_message("timeout"), ErrorKind::BadGateway);
        assert_eq!(classify_message(""), ErrorKind::BadGateway);
    }

    #[test]
    fn test_structured_kind_wins_over_message() {
        let error = PlatformError::Status {
            platform: Platform::DeliveryVip,
            status: 422,
            body: "store not found".to_owned(),
            kind: ErrorKind::InvalidRequest,
            message: "store not found".to_owned(),
        };

        assert_eq!(error.kind(), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_token_unavailable_is_unauthorized() {
        let error = PlatformError::TokenUnavailable {
            platform: Platform::AnotaAi,
        };

        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        assert_eq!(error.platform(), Platform::AnotaAi);
    }

    #[test]
    fn test_conversion_to_app_error_keeps_message() {
        let app_error: AppError =
            PlatformError::rejected(Platform::AnotaAi, "Página não encontrada").into();

        assert_eq!(app_error.kind, ErrorKind::NotFound);
        assert_eq!(app_error.message, "Página não encontrada");
        assert!(app_error.source.is_some());
    }
}
