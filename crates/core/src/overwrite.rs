// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Overwrite-confirmation flow.
//!
//! Adding or editing a copy runs a duplicate check. Without a duplicate the
//! change is applied at once and the flow stays `Idle`. With one, the
//! registry parks the change in `AwaitingConfirmation` until the user
//! confirms (the duplicate is overwritten) or declines (nothing changes).
//! Both answers return the flow to `Idle`.

use grafica_domain::{DocumentCopy, FileBlob};

/// The change parked while the user decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverwriteRequest {
    /// A new copy colliding with an existing one.
    Add {
        /// The normalised candidate, without its file.
        copy: DocumentCopy,
        /// The candidate's file, if digital.
        file: Option<FileBlob>,
    },
    /// An edited copy colliding with a different existing one.
    Edit {
        /// Where the edited copy currently sits.
        original_position: usize,
        /// The copy with the edits merged in.
        edited: DocumentCopy,
    },
}

/// A duplicate awaiting the user's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOverwrite {
    /// Position of the existing copy that would be overwritten.
    pub duplicate_position: usize,
    /// The parked change.
    pub request: OverwriteRequest,
}

impl PendingOverwrite {
    /// Returns the copy to re-present to the user after a decline.
    ///
    /// Only a declined add is re-presented, with its file restored so the
    /// user can adjust and retry. A declined edit simply leaves the original.
    #[must_use]
    pub fn into_reopen(self) -> Option<DocumentCopy> {
        match self.request {
            OverwriteRequest::Add { mut copy, file } => {
                copy.file = file;
                Some(copy)
            }
            OverwriteRequest::Edit { .. } => None,
        }
    }
}

/// Where the registry is in the overwrite-confirmation flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverwriteFlow {
    /// No decision pending; the registry is consistent.
    #[default]
    Idle,
    /// A duplicate was found and the user must confirm or decline.
    AwaitingConfirmation(PendingOverwrite),
}

impl OverwriteFlow {
    /// Returns whether a decision is pending.
    #[must_use]
    pub const fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingConfirmation(_))
    }

    /// Returns the pending overwrite, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingOverwrite> {
        match self {
            Self::Idle => None,
            Self::AwaitingConfirmation(pending) => Some(pending),
        }
    }
}
