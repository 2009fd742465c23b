// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, RegistryState, TransitionResult, apply};
use grafica_domain::{DocumentCopy, FileBlob, PrintConfig, Solicitation};

pub fn create_test_file(name: &str) -> FileBlob {
    FileBlob::new(name, name.as_bytes().to_vec())
}

pub fn create_test_copy(name: &str, page_count: u32) -> DocumentCopy {
    DocumentCopy::digital(create_test_file(name), page_count, PrintConfig::default())
}

pub fn create_test_ranged_copy(name: &str, page_count: u32, intervals: &str) -> DocumentCopy {
    DocumentCopy::digital(
        create_test_file(name),
        page_count,
        PrintConfig::default().with_custom_pages(intervals),
    )
}

pub fn create_test_persisted_copy(id: i64, name: &str, page_count: u32) -> DocumentCopy {
    let mut copy: DocumentCopy = DocumentCopy::physical(name, page_count, PrintConfig::default());
    copy.id = Some(id);
    copy.is_physical_file = false;
    copy.file_type = String::from("pdf");
    copy
}

pub fn create_test_solicitation(id: i64, copies: Vec<DocumentCopy>) -> Solicitation {
    let mut solicitation: Solicitation = Solicitation {
        id: Some(id),
        deadline: 48,
        copies,
        ..Solicitation::default()
    };
    solicitation.recompute_total_page_count();
    solicitation
}

pub fn add(state: &RegistryState, copy: DocumentCopy) -> RegistryState {
    let result: TransitionResult = apply(state, Command::AddCopy { copy }).unwrap();
    result.new_state
}

/// A new-solicitation registry holding `a.pdf` (10 pages) and `b.pdf` (4 pages).
pub fn create_test_registry() -> RegistryState {
    let state: RegistryState = add(&RegistryState::new(), create_test_copy("a.pdf", 10));
    add(&state, create_test_copy("b.pdf", 4))
}

/// An edit-existing registry loaded from solicitation 7 with one copy.
pub fn create_test_existing_registry() -> RegistryState {
    let solicitation: Solicitation =
        create_test_solicitation(7, vec![create_test_persisted_copy(70, "a.pdf", 10)]);
    RegistryState::from_solicitation(&solicitation).unwrap()
}

pub fn sheets_sum(state: &RegistryState) -> u32 {
    state.copies().iter().map(DocumentCopy::sheets_total).sum()
}
