// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grafica_domain::DomainError;

/// Errors that can occur during registry transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// No copy occupies the given position.
    CopyNotFound {
        /// The requested position.
        position: usize,
    },
    /// A duplicate is awaiting an overwrite decision; other edits are blocked.
    ConfirmationPending,
    /// An overwrite decision was given while no duplicate was pending.
    NoPendingConfirmation,
    /// The solicitation has no server identifier and cannot be edited in place.
    UnpersistedSolicitation,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::CopyNotFound { position } => {
                write!(f, "No copy at position {position}")
            }
            Self::ConfirmationPending => {
                write!(f, "An overwrite confirmation is pending")
            }
            Self::NoPendingConfirmation => {
                write!(f, "No overwrite confirmation is pending")
            }
            Self::UnpersistedSolicitation => {
                write!(f, "Solicitation has not been saved yet")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
