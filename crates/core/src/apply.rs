// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, CopyChanges};
use crate::duplicate::find_existing_index;
use crate::error::CoreError;
use crate::overwrite::{OverwriteFlow, OverwriteRequest, PendingOverwrite};
use crate::state::{EditorMode, Outcome, RegistryState, TransitionResult};
use grafica_domain::{
    DocumentCopy, DomainError, FileBlob, validate_copy_fields, validate_copy_file,
};

/// Applies a command to the registry, producing a new registry and an outcome.
///
/// The input state is never modified. Every successful transition leaves the
/// pending file buffer aligned with the copies and both aggregates freshly
/// recomputed.
///
/// Page intervals are normalized to comma-space form before they are
/// validated, so whitespace around a comma or at either end is accepted.
/// Whitespace inside a token still fails validation.
///
/// # Arguments
///
/// * `state` - The current registry (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new registry and what happened
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The copy violates domain rules (name, copy count, page range, missing file)
/// - No copy occupies the requested position
/// - A structural edit is attempted while an overwrite decision is pending
/// - An overwrite decision is given while none is pending
/// - A zero-hour deadline is selected
pub fn apply(state: &RegistryState, command: Command) -> Result<TransitionResult, CoreError> {
    let transition: TransitionResult = match command {
        Command::AddCopy { copy } => add_copy(state, copy)?,
        Command::EditCopy { position, changes } => edit_copy(state, position, &changes)?,
        Command::RemoveCopy { position } => remove_copy(state, position)?,
        Command::ConfirmOverwrite => confirm_overwrite(state)?,
        Command::DeclineOverwrite => {
            let mut new_state: RegistryState = state.clone();
            let OverwriteFlow::AwaitingConfirmation(pending) = new_state.take_overwrite() else {
                return Err(CoreError::NoPendingConfirmation);
            };

            TransitionResult {
                new_state,
                outcome: Outcome::OverwriteDeclined {
                    reopen: pending.into_reopen(),
                },
            }
        }
        Command::SelectDeadline { hours } => {
            if hours == 0 {
                return Err(CoreError::DomainViolation(DomainError::InvalidDeadline {
                    deadline: hours,
                    total_page_count: state.total_page_count(),
                }));
            }

            let mut new_state: RegistryState = state.clone();
            new_state.set_deadline(hours);

            TransitionResult {
                new_state,
                outcome: Outcome::DeadlineSelected { hours },
            }
        }
        Command::Clear => {
            let mut new_state: RegistryState = state.clone();
            new_state.clear();
            new_state.recompute_aggregates();

            TransitionResult {
                new_state,
                outcome: Outcome::Cleared,
            }
        }
    };

    debug_assert!(transition.new_state.check_invariants());
    Ok(transition)
}

fn ensure_idle(state: &RegistryState) -> Result<(), CoreError> {
    if state.overwrite().is_awaiting() {
        return Err(CoreError::ConfirmationPending);
    }
    Ok(())
}

fn add_copy(state: &RegistryState, copy: DocumentCopy) -> Result<TransitionResult, CoreError> {
    ensure_idle(state)?;

    // Normalize first: the stored form is what gets validated.
    let mut candidate: DocumentCopy = copy;
    candidate.refresh_sheets_total();
    validate_copy_fields(&candidate)?;
    validate_copy_file(&candidate)?;

    let file: Option<FileBlob> = if candidate.is_physical_file {
        candidate.file = None;
        None
    } else {
        candidate.file.take()
    };

    let mut new_state: RegistryState = state.clone();

    if let Some(duplicate_position) = find_existing_index(
        state.copies(),
        &candidate.file_name,
        candidate.intervals(),
        None,
    ) {
        new_state.set_overwrite(OverwriteFlow::AwaitingConfirmation(PendingOverwrite {
            duplicate_position,
            request: OverwriteRequest::Add {
                copy: candidate,
                file,
            },
        }));

        return Ok(TransitionResult {
            new_state,
            outcome: Outcome::DuplicateFound { duplicate_position },
        });
    }

    let position: usize = new_state.push(candidate, file);
    new_state.recompute_aggregates();

    Ok(TransitionResult {
        new_state,
        outcome: Outcome::Added { position },
    })
}

fn edit_copy(
    state: &RegistryState,
    position: usize,
    changes: &CopyChanges,
) -> Result<TransitionResult, CoreError> {
    ensure_idle(state)?;

    let existing: &DocumentCopy = state
        .copy(position)
        .ok_or(CoreError::CopyNotFound { position })?;

    let edited: DocumentCopy = changes.merge_into(existing);
    validate_copy_fields(&edited)?;

    let mut new_state: RegistryState = state.clone();

    if let Some(duplicate_position) = find_existing_index(
        state.copies(),
        &edited.file_name,
        edited.intervals(),
        Some(position),
    ) {
        new_state.set_overwrite(OverwriteFlow::AwaitingConfirmation(PendingOverwrite {
            duplicate_position,
            request: OverwriteRequest::Edit {
                original_position: position,
                edited,
            },
        }));

        return Ok(TransitionResult {
            new_state,
            outcome: Outcome::DuplicateFound { duplicate_position },
        });
    }

    if let Some(slot) = new_state.copy_mut(position) {
        *slot = edited;
    }
    new_state.recompute_aggregates();

    Ok(TransitionResult {
        new_state,
        outcome: Outcome::Updated { position },
    })
}

fn remove_copy(state: &RegistryState, position: usize) -> Result<TransitionResult, CoreError> {
    ensure_idle(state)?;

    if position >= state.len() {
        return Err(CoreError::CopyNotFound { position });
    }

    if state.len() == 1 {
        if let EditorMode::EditExisting { solicitation_id } = state.mode() {
            return Ok(TransitionResult {
                new_state: state.clone(),
                outcome: Outcome::LastCopyRemovalDeletesSolicitation { solicitation_id },
            });
        }
    }

    let mut new_state: RegistryState = state.clone();
    new_state.remove(position);
    new_state.recompute_aggregates();

    Ok(TransitionResult {
        new_state,
        outcome: Outcome::Removed { position },
    })
}

fn confirm_overwrite(state: &RegistryState) -> Result<TransitionResult, CoreError> {
    let mut new_state: RegistryState = state.clone();
    let OverwriteFlow::AwaitingConfirmation(pending) = new_state.take_overwrite() else {
        return Err(CoreError::NoPendingConfirmation);
    };

    let duplicate_position: usize = pending.duplicate_position;
    let existing: &DocumentCopy = state
        .copy(duplicate_position)
        .ok_or(CoreError::CopyNotFound {
            position: duplicate_position,
        })?;

    let position: usize = match pending.request {
        OverwriteRequest::Add { mut copy, file } => {
            // The replaced entry's server id survives so an edit-existing
            // submission updates it rather than creating a new copy.
            copy.id = existing.id;
            new_state.replace(duplicate_position, copy, file);
            duplicate_position
        }
        OverwriteRequest::Edit {
            original_position,
            edited,
        } => {
            if let Some(target) = new_state.copy_mut(duplicate_position) {
                target.notes = edited.notes;
                target.print_config = edited.print_config;
                target.refresh_sheets_total();
            }
            new_state.remove(original_position);

            if original_position < duplicate_position {
                duplicate_position - 1
            } else {
                duplicate_position
            }
        }
    };

    new_state.recompute_aggregates();

    Ok(TransitionResult {
        new_state,
        outcome: Outcome::Overwritten { position },
    })
}
