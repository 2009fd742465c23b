// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidRange { start: 5, end: 3 };
    assert_eq!(
        format!("{err}"),
        "Invalid page range 5-3: start must be lower than end"
    );

    let err: DomainError = DomainError::OutOfBounds {
        page: 12,
        total_pages: 10,
    };
    assert_eq!(
        format!("{err}"),
        "Page 12 is out of bounds: document has 10 pages"
    );

    let err: DomainError = DomainError::MissingFile {
        file_name: String::from("a.pdf"),
    };
    assert_eq!(format!("{err}"), "No file attached for copy 'a.pdf'");

    let err: DomainError = DomainError::InvalidFileName;
    assert_eq!(format!("{err}"), "File name cannot be empty");

    let err: DomainError = DomainError::InvalidCopyCount(0);
    assert_eq!(format!("{err}"), "Invalid copy count: 0. Must be at least 1");

    let err: DomainError = DomainError::InvalidPagesPerSheet(3);
    assert_eq!(
        format!("{err}"),
        "Invalid pages per sheet: 3. Must be 1, 2 or 4"
    );

    let err: DomainError = DomainError::IncompleteUser {
        field: "commonName",
    };
    assert_eq!(
        format!("{err}"),
        "User is missing required field 'commonName'"
    );

    let err: DomainError = DomainError::UnknownVariant {
        kind: "layout",
        value: String::from("diagonal"),
    };
    assert_eq!(format!("{err}"), "Unknown layout: 'diagonal'");
}

#[test]
fn test_invalid_format_display_echoes_input() {
    let err: DomainError = DomainError::InvalidFormat {
        input: String::from("abc"),
    };
    assert!(format!("{err}").starts_with("Invalid page range 'abc'"));
}

#[test]
fn test_invalid_deadline_display() {
    let err: DomainError = DomainError::InvalidDeadline {
        deadline: 0,
        total_page_count: 4,
    };
    assert!(format!("{err}").contains("term of 0h for 4 sheets"));
}
