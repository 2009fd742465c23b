// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::overwrite::OverwriteFlow;
use grafica_domain::{DEFAULT_DEADLINE_HOURS, DocumentCopy, FileBlob, Solicitation};

/// Which page the registry is backing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Building a solicitation that does not exist on the server yet.
    NewSolicitation,
    /// Editing a persisted solicitation.
    EditExisting {
        /// The solicitation's server identifier.
        solicitation_id: i64,
    },
}

/// The copies attached to a solicitation being built or edited.
///
/// `pending_files` is index-aligned with `copies`; physical copies and copies
/// loaded from the server hold `None`. `file_count` and `total_page_count`
/// are recomputed in full after every transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryState {
    mode: EditorMode,
    copies: Vec<DocumentCopy>,
    pending_files: Vec<Option<FileBlob>>,
    file_count: usize,
    total_page_count: u32,
    deadline: u32,
    overwrite: OverwriteFlow,
}

impl RegistryState {
    /// Creates an empty registry for a new solicitation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: EditorMode::NewSolicitation,
            copies: Vec::new(),
            pending_files: Vec::new(),
            file_count: 0,
            total_page_count: 0,
            deadline: DEFAULT_DEADLINE_HOURS,
            overwrite: OverwriteFlow::Idle,
        }
    }

    /// Loads a persisted solicitation for editing.
    ///
    /// Sheet totals are recomputed locally from each copy's configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnpersistedSolicitation` if the solicitation has no id.
    pub fn from_solicitation(solicitation: &Solicitation) -> Result<Self, CoreError> {
        let solicitation_id: i64 = solicitation
            .id
            .ok_or(CoreError::UnpersistedSolicitation)?;

        let mut copies: Vec<DocumentCopy> = solicitation.copies.clone();
        for copy in &mut copies {
            copy.file = None;
            copy.refresh_sheets_total();
        }

        let mut state: Self = Self {
            mode: EditorMode::EditExisting { solicitation_id },
            pending_files: vec![None; copies.len()],
            copies,
            file_count: 0,
            total_page_count: 0,
            deadline: solicitation.deadline,
            overwrite: OverwriteFlow::Idle,
        };
        state.recompute_aggregates();
        Ok(state)
    }

    /// Returns the editor mode.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns the persisted solicitation id when editing.
    #[must_use]
    pub const fn solicitation_id(&self) -> Option<i64> {
        match self.mode {
            EditorMode::NewSolicitation => None,
            EditorMode::EditExisting { solicitation_id } => Some(solicitation_id),
        }
    }

    /// Returns the copies in display order.
    #[must_use]
    pub fn copies(&self) -> &[DocumentCopy] {
        &self.copies
    }

    /// Returns the copy at `position`.
    #[must_use]
    pub fn copy(&self, position: usize) -> Option<&DocumentCopy> {
        self.copies.get(position)
    }

    /// Returns the pending file buffer, index-aligned with [`Self::copies`].
    #[must_use]
    pub fn pending_files(&self) -> &[Option<FileBlob>] {
        &self.pending_files
    }

    /// Returns each copy paired with the file still to be uploaded for it.
    pub fn uploads(&self) -> impl Iterator<Item = (&DocumentCopy, &FileBlob)> {
        self.copies
            .iter()
            .zip(&self.pending_files)
            .filter_map(|(copy, file)| file.as_ref().map(|file| (copy, file)))
    }

    /// Returns the number of attached copies.
    #[must_use]
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Returns the sum of `sheets_total` over all copies.
    #[must_use]
    pub const fn total_page_count(&self) -> u32 {
        self.total_page_count
    }

    /// Returns the selected term, in hours.
    #[must_use]
    pub const fn deadline(&self) -> u32 {
        self.deadline
    }

    /// Returns the overwrite-confirmation flow.
    #[must_use]
    pub const fn overwrite(&self) -> &OverwriteFlow {
        &self.overwrite
    }

    /// Returns whether no copy is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }

    /// Returns the number of attached copies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.copies.len()
    }

    /// Checks the registry's structural invariants.
    ///
    /// The pending buffer is aligned with the copies, and both aggregates
    /// match a fresh recomputation.
    #[must_use]
    pub fn check_invariants(&self) -> bool {
        let sheets: u32 = self
            .copies
            .iter()
            .map(DocumentCopy::sheets_total)
            .fold(0_u32, u32::saturating_add);

        self.pending_files.len() == self.copies.len()
            && self.file_count == self.copies.len()
            && self.total_page_count == sheets
    }

    pub(crate) fn recompute_aggregates(&mut self) {
        self.file_count = self.copies.len();
        self.total_page_count = self
            .copies
            .iter()
            .map(DocumentCopy::sheets_total)
            .fold(0_u32, u32::saturating_add);
    }

    pub(crate) fn push(&mut self, copy: DocumentCopy, file: Option<FileBlob>) -> usize {
        self.copies.push(copy);
        self.pending_files.push(file);
        self.copies.len() - 1
    }

    pub(crate) fn replace(&mut self, position: usize, copy: DocumentCopy, file: Option<FileBlob>) {
        self.copies[position] = copy;
        self.pending_files[position] = file;
    }

    pub(crate) fn copy_mut(&mut self, position: usize) -> Option<&mut DocumentCopy> {
        self.copies.get_mut(position)
    }

    pub(crate) fn remove(&mut self, position: usize) {
        self.copies.remove(position);
        self.pending_files.remove(position);
    }

    pub(crate) const fn set_deadline(&mut self, hours: u32) {
        self.deadline = hours;
    }

    pub(crate) fn set_overwrite(&mut self, overwrite: OverwriteFlow) {
        self.overwrite = overwrite;
    }

    pub(crate) fn take_overwrite(&mut self) -> OverwriteFlow {
        std::mem::take(&mut self.overwrite)
    }

    pub(crate) fn clear(&mut self) {
        self.copies.clear();
        self.pending_files.clear();
        self.deadline = DEFAULT_DEADLINE_HOURS;
        self.overwrite = OverwriteFlow::Idle;
    }
}

impl Default for RegistryState {
    fn default() -> Self {
        Self::new()
    }
}

/// What a transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A copy was appended.
    Added {
        /// Its position.
        position: usize,
    },
    /// A copy was edited in place.
    Updated {
        /// Its position.
        position: usize,
    },
    /// A confirmed overwrite replaced a duplicate.
    Overwritten {
        /// Position of the surviving copy.
        position: usize,
    },
    /// A duplicate was found; the registry awaits confirmation.
    DuplicateFound {
        /// Position of the existing duplicate.
        duplicate_position: usize,
    },
    /// The user declined the overwrite; nothing changed.
    OverwriteDeclined {
        /// For a declined add, the candidate to re-present.
        reopen: Option<DocumentCopy>,
    },
    /// A copy was removed.
    Removed {
        /// Its former position.
        position: usize,
    },
    /// Removing the only copy of a persisted solicitation must delete the
    /// solicitation instead. The registry is unchanged.
    LastCopyRemovalDeletesSolicitation {
        /// The solicitation to delete.
        solicitation_id: i64,
    },
    /// The term was changed.
    DeadlineSelected {
        /// The new term in hours.
        hours: u32,
    },
    /// Every copy was dropped.
    Cleared,
}

impl Outcome {
    /// Returns whether the copy set itself changed.
    #[must_use]
    pub const fn is_structural_change(&self) -> bool {
        matches!(
            self,
            Self::Added { .. }
                | Self::Updated { .. }
                | Self::Overwritten { .. }
                | Self::Removed { .. }
        )
    }
}

/// The result of a successful registry transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The registry after the transition.
    pub new_state: RegistryState,
    /// What the transition did.
    pub outcome: Outcome,
}
