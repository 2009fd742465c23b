// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grafica_domain::{DocumentCopy, FileBlob, PrintConfig, Solicitation, User};
use std::path::PathBuf;

/// Creates a scratch directory unique to one test.
pub fn create_test_dir() -> PathBuf {
    let dir: PathBuf =
        std::env::temp_dir().join(format!("grafica-cli-test-{}", rand::random::<u32>()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn create_test_copy(name: &str, page_count: u32) -> DocumentCopy {
    DocumentCopy::digital(
        FileBlob::new(name, name.as_bytes().to_vec()),
        page_count,
        PrintConfig::default(),
    )
}

pub fn create_test_solicitation() -> Solicitation {
    let mut first: DocumentCopy = create_test_copy("a.pdf", 10);
    first.id = Some(71);
    first.file = None;
    let mut second: DocumentCopy = DocumentCopy::physical(
        "Apostila",
        8,
        PrintConfig::default()
            .with_custom_pages("1-4")
            .with_copy_count(2),
    )
    .with_notes("grampear");
    second.id = Some(72);

    let mut solicitation: Solicitation = Solicitation {
        id: Some(7),
        deadline: 48,
        copies: vec![first, second],
        user: Some(User::new("Maria da Silva", "20231234")),
        ..Solicitation::default()
    };
    solicitation.recompute_total_page_count();
    solicitation
}
