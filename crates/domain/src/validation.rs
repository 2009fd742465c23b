// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::page_range::validate_page_range;
use crate::types::{DocumentCopy, PageSelection, User};

/// Validates a copy's name and print configuration.
///
/// This does NOT check that a file is attached (see [`validate_copy_file`]);
/// copies loaded from the server legitimately carry no file.
///
/// # Arguments
///
/// * `copy` - The copy to validate
///
/// # Errors
///
/// Returns an error if:
/// - The file name is empty
/// - The copy count is zero
/// - Custom pages are selected without a page range
/// - The page range is malformed or out of the document's bounds
pub fn validate_copy_fields(copy: &DocumentCopy) -> Result<(), DomainError> {
    if copy.file_name.trim().is_empty() {
        return Err(DomainError::InvalidFileName);
    }

    if copy.print_config.copy_count < 1 {
        return Err(DomainError::InvalidCopyCount(copy.print_config.copy_count));
    }

    if copy.print_config.pages == PageSelection::Custom {
        let intervals: &str = copy
            .intervals()
            .ok_or_else(|| DomainError::MissingPageIntervals {
                file_name: copy.file_name.clone(),
            })?;
        validate_page_range(intervals, copy.page_count)?;
    }

    Ok(())
}

/// Validates that a digital copy has its file attached.
///
/// # Errors
///
/// Returns `DomainError::MissingFile` if the copy is not physical and has no file.
pub fn validate_copy_file(copy: &DocumentCopy) -> Result<(), DomainError> {
    if !copy.is_physical_file && copy.file.is_none() {
        return Err(DomainError::MissingFile {
            file_name: copy.file_name.clone(),
        });
    }
    Ok(())
}

/// Validates the deadline and aggregate sheet count of a submission.
///
/// # Errors
///
/// Returns `DomainError::InvalidDeadline` if either value is zero.
pub const fn validate_deadline(deadline: u32, total_page_count: u32) -> Result<(), DomainError> {
    if deadline == 0 || total_page_count == 0 {
        return Err(DomainError::InvalidDeadline {
            deadline,
            total_page_count,
        });
    }
    Ok(())
}

/// Validates that a user carries the fields required to own a submission.
///
/// # Errors
///
/// Returns `DomainError::IncompleteUser` if the common name or registration
/// number is missing or blank.
pub fn validate_user(user: &User) -> Result<(), DomainError> {
    let present = |value: Option<&str>| value.is_some_and(|v| !v.trim().is_empty());

    if !present(user.common_name.as_deref()) {
        return Err(DomainError::IncompleteUser {
            field: "commonName",
        });
    }
    if !present(user.registration_number.as_deref()) {
        return Err(DomainError::IncompleteUser {
            field: "registrationNumber",
        });
    }
    Ok(())
}
