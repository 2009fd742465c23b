// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    add, create_test_copy, create_test_existing_registry, create_test_registry,
};
use crate::{Command, CoreError, Outcome, RegistryState, TransitionResult, apply};

#[test]
fn test_remove_drops_copy_and_its_file() {
    let state: RegistryState = create_test_registry();

    let result: TransitionResult = apply(&state, Command::RemoveCopy { position: 0 }).unwrap();

    assert_eq!(result.outcome, Outcome::Removed { position: 0 });
    assert_eq!(result.new_state.len(), 1);
    assert_eq!(result.new_state.copies()[0].file_name, "b.pdf");
    assert_eq!(
        result.new_state.pending_files()[0].as_ref().unwrap().file_name,
        "b.pdf"
    );
    assert_eq!(result.new_state.file_count(), 1);
    assert_eq!(result.new_state.total_page_count(), 4);
}

#[test]
fn test_remove_last_copy_of_new_solicitation_empties_registry() {
    let state: RegistryState = add(&RegistryState::new(), create_test_copy("a.pdf", 3));

    let result: TransitionResult = apply(&state, Command::RemoveCopy { position: 0 }).unwrap();

    assert_eq!(result.outcome, Outcome::Removed { position: 0 });
    assert!(result.new_state.is_empty());
    assert_eq!(result.new_state.total_page_count(), 0);
}

#[test]
fn test_remove_last_copy_of_existing_solicitation_signals_deletion() {
    let state: RegistryState = create_test_existing_registry();

    let result: TransitionResult = apply(&state, Command::RemoveCopy { position: 0 }).unwrap();

    assert_eq!(
        result.outcome,
        Outcome::LastCopyRemovalDeletesSolicitation { solicitation_id: 7 }
    );
    assert_eq!(result.new_state, state);
    assert!(!result.outcome.is_structural_change());
}

#[test]
fn test_remove_from_existing_solicitation_with_several_copies() {
    let state: RegistryState = add(
        &create_test_existing_registry(),
        create_test_copy("novo.pdf", 2),
    );

    let result: TransitionResult = apply(&state, Command::RemoveCopy { position: 0 }).unwrap();

    assert_eq!(result.outcome, Outcome::Removed { position: 0 });
    assert_eq!(result.new_state.len(), 1);
    assert_eq!(result.new_state.solicitation_id(), Some(7));
}

#[test]
fn test_remove_unknown_position_fails() {
    let state: RegistryState = create_test_registry();

    let result: Result<TransitionResult, CoreError> =
        apply(&state, Command::RemoveCopy { position: 2 });

    assert_eq!(result, Err(CoreError::CopyNotFound { position: 2 }));
}

#[test]
fn test_clear_resets_everything() {
    let state: RegistryState = create_test_registry();
    let state: RegistryState = apply(&state, Command::SelectDeadline { hours: 96 })
        .unwrap()
        .new_state;

    let result: TransitionResult = apply(&state, Command::Clear).unwrap();

    assert_eq!(result.outcome, Outcome::Cleared);
    assert!(result.new_state.is_empty());
    assert!(result.new_state.pending_files().is_empty());
    assert_eq!(result.new_state.file_count(), 0);
    assert_eq!(result.new_state.total_page_count(), 0);
    assert_eq!(result.new_state.deadline(), grafica_domain::DEFAULT_DEADLINE_HOURS);
}
