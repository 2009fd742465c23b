// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The page-range string does not match the range grammar.
    InvalidFormat {
        /// The rejected input.
        input: String,
    },
    /// A `start-end` token whose start is not strictly below its end.
    InvalidRange {
        /// The range start.
        start: u64,
        /// The range end.
        end: u64,
    },
    /// A page number outside `1..=total_pages`.
    OutOfBounds {
        /// The offending page number.
        page: u64,
        /// The document's page count.
        total_pages: u32,
    },
    /// A digital copy was submitted without its file.
    MissingFile {
        /// The copy's file name.
        file_name: String,
    },
    /// The copy's file name is empty.
    InvalidFileName,
    /// Copy count must be at least one.
    InvalidCopyCount(u32),
    /// Custom page selection requires a non-empty interval string.
    MissingPageIntervals {
        /// The copy's file name.
        file_name: String,
    },
    /// Pages per sheet must be 1, 2 or 4.
    InvalidPagesPerSheet(u8),
    /// Deadline (term, in hours) or total page count is not positive.
    InvalidDeadline {
        /// The requested deadline in hours.
        deadline: u32,
        /// The solicitation's total page count.
        total_page_count: u32,
    },
    /// The owning user is missing a field required for submission.
    IncompleteUser {
        /// The missing field.
        field: &'static str,
    },
    /// A string could not be parsed into a known enumeration value.
    UnknownVariant {
        /// The enumeration being parsed.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat { input } => {
                write!(
                    f,
                    "Invalid page range '{input}': expected a comma-separated list such as '1-5, 8, 11-13'"
                )
            }
            Self::InvalidRange { start, end } => {
                write!(
                    f,
                    "Invalid page range {start}-{end}: start must be lower than end"
                )
            }
            Self::OutOfBounds { page, total_pages } => {
                write!(
                    f,
                    "Page {page} is out of bounds: document has {total_pages} pages"
                )
            }
            Self::MissingFile { file_name } => {
                write!(f, "No file attached for copy '{file_name}'")
            }
            Self::InvalidFileName => write!(f, "File name cannot be empty"),
            Self::InvalidCopyCount(count) => {
                write!(f, "Invalid copy count: {count}. Must be at least 1")
            }
            Self::MissingPageIntervals { file_name } => {
                write!(
                    f,
                    "Copy '{file_name}' selects custom pages but no page range was given"
                )
            }
            Self::InvalidPagesPerSheet(value) => {
                write!(f, "Invalid pages per sheet: {value}. Must be 1, 2 or 4")
            }
            Self::InvalidDeadline {
                deadline,
                total_page_count,
            } => {
                write!(
                    f,
                    "Invalid deadline: term of {deadline}h for {total_page_count} sheets. Both must be greater than 0"
                )
            }
            Self::IncompleteUser { field } => {
                write!(f, "User is missing required field '{field}'")
            }
            Self::UnknownVariant { kind, value } => {
                write!(f, "Unknown {kind}: '{value}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
