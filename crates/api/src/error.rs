// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use grafica::CoreError;
use grafica_domain::DomainError;
use thiserror::Error;

/// API-level errors.
///
/// Local variants are raised before any network call is issued. Every remote
/// failure, whatever its cause, is a single `Remote` variant whose message is
/// shown to the user unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server, the network or the response body failed.
    #[error("{message}")]
    Remote {
        /// HTTP status, when the server answered.
        status: Option<u16>,
        /// Server-supplied message.
        message: String,
    },

    /// The registry holds no copies, or a digital copy has no file.
    #[error("A solicitation needs at least one copy and every digital copy needs its file")]
    EmptyCopySet,

    /// The term or the sheet total is zero.
    #[error("Invalid deadline: term of {deadline}h for {total_page_count} sheets")]
    InvalidDeadline {
        /// The requested term in hours.
        deadline: u32,
        /// The aggregate sheet count.
        total_page_count: u32,
    },

    /// No copy with the given id belongs to the solicitation.
    #[error("Copy {copy_id} not found in solicitation")]
    CopyNotFound {
        /// The requested copy id.
        copy_id: i64,
    },

    /// The solicitation cannot take part in the requested operation.
    #[error("Invalid solicitation: {reason}")]
    InvalidSolicitation {
        /// Why the solicitation was rejected.
        reason: String,
    },

    /// The caller's page state does not allow the operation.
    #[error("Invalid page state: {reason}")]
    InvalidPageState {
        /// What was inconsistent.
        reason: String,
    },

    /// No user, or a user without the fields required to own a solicitation.
    #[error("Current user is missing required field '{field}'")]
    MissingUser {
        /// The missing field.
        field: String,
    },

    /// No valid credential is available.
    #[error("No valid session: {reason}")]
    Unauthenticated {
        /// Why the credential was refused.
        reason: String,
    },

    /// A digital copy was submitted without its file.
    #[error("No file attached for copy '{file_name}'")]
    MissingFile {
        /// The copy's file name.
        file_name: String,
    },

    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },

    /// Client configuration was rejected.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong.
        message: String,
    },
}

impl ApiError {
    /// Creates a remote failure.
    #[must_use]
    pub fn remote(status: Option<u16>, message: &str) -> Self {
        Self::Remote {
            status,
            message: message.to_string(),
        }
    }

    /// Returns whether the failure came from the remote side.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    fn invalid_input(field: &str, err: &DomainError) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let status: Option<u16> = err.status().map(|status| status.as_u16());
        let message: String = if err.is_timeout() {
            String::from("Request timed out")
        } else if err.is_connect() {
            String::from("Connection failed")
        } else if err.is_decode() {
            format!("Malformed response: {err}")
        } else {
            err.to_string()
        };

        Self::Remote { status, message }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Remote {
            status: None,
            message: format!("Malformed response: {err}"),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This is an explicit translation at the API boundary.
/// Domain errors are never exposed directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidFormat { .. }
        | DomainError::InvalidRange { .. }
        | DomainError::OutOfBounds { .. }
        | DomainError::MissingPageIntervals { .. } => {
            ApiError::invalid_input("pageIntervals", &err)
        }
        DomainError::MissingFile { file_name } => ApiError::MissingFile { file_name },
        DomainError::InvalidFileName => ApiError::invalid_input("fileName", &err),
        DomainError::InvalidCopyCount(_) => ApiError::invalid_input("copyCount", &err),
        DomainError::InvalidPagesPerSheet(_) => ApiError::invalid_input("pagesPerSheet", &err),
        DomainError::InvalidDeadline {
            deadline,
            total_page_count,
        } => ApiError::InvalidDeadline {
            deadline,
            total_page_count,
        },
        DomainError::IncompleteUser { field } => ApiError::MissingUser {
            field: field.to_string(),
        },
        DomainError::UnknownVariant { kind, .. } => ApiError::invalid_input(kind, &err),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::UnpersistedSolicitation => ApiError::InvalidSolicitation {
            reason: err.to_string(),
        },
        CoreError::CopyNotFound { .. }
        | CoreError::ConfirmationPending
        | CoreError::NoPendingConfirmation => ApiError::InvalidPageState {
            reason: err.to_string(),
        },
    }
}
