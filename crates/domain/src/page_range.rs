// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page-range parsing and validation.
//!
//! A page-range string is a comma-separated list of single pages and
//! hyphenated spans, e.g. `"1-5, 8, 11-13"`. Tokens are checked one at a
//! time; overlapping or unsorted tokens are accepted and counted as written.

use crate::error::DomainError;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static RANGE_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+(-[0-9]+)?)(,\s*[0-9]+(-[0-9]+)?)*$").expect("page range grammar is a valid regex")
});

/// A single token of a page-range string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Page(u64),
    Span { start: u64, end: u64 },
}

/// Digits too long for `u64` saturate so they fail the bounds check.
fn parse_page(digits: &str) -> u64 {
    digits.trim().parse::<u64>().unwrap_or(u64::MAX)
}

fn parse_token(token: &str) -> Token {
    match token.split_once('-') {
        Some((start, end)) => Token::Span {
            start: parse_page(start),
            end: parse_page(end),
        },
        None => Token::Page(parse_page(token)),
    }
}

/// Validates a page-range string against a document's page count.
///
/// # Arguments
///
/// * `range` - The user-entered page-range string
/// * `total_pages` - The document's page count
///
/// # Errors
///
/// Returns an error if:
/// - The string does not match the range grammar (`InvalidFormat`)
/// - A span's start is not lower than its end (`InvalidRange`)
/// - A page lies outside `1..=total_pages` (`OutOfBounds`)
pub fn validate_page_range(range: &str, total_pages: u32) -> Result<(), DomainError> {
    if !RANGE_GRAMMAR.is_match(range) {
        return Err(DomainError::InvalidFormat {
            input: range.to_string(),
        });
    }

    let upper: u64 = u64::from(total_pages);
    for token in range.split(',').map(parse_token) {
        match token {
            Token::Span { start, end } => {
                if start >= end {
                    return Err(DomainError::InvalidRange { start, end });
                }
                if start < 1 {
                    return Err(DomainError::OutOfBounds {
                        page: start,
                        total_pages,
                    });
                }
                if end > upper {
                    return Err(DomainError::OutOfBounds {
                        page: end,
                        total_pages,
                    });
                }
            }
            Token::Page(page) => {
                if page < 1 || page > upper {
                    return Err(DomainError::OutOfBounds { page, total_pages });
                }
            }
        }
    }

    Ok(())
}

/// Counts the pages selected by a page-range string.
///
/// This does not validate: malformed tokens and reversed spans contribute
/// zero, overlapping spans are counted twice, and the total saturates at
/// `u32::MAX`. Call [`validate_page_range`] first when malformed input must
/// be rejected.
#[must_use]
pub fn count_pages(range: &str) -> u32 {
    if range.trim().is_empty() {
        return 0;
    }

    range
        .split(',')
        .map(str::trim)
        .map(|token| match token.split_once('-') {
            Some((start, end)) => match (start.trim().parse::<u32>(), end.trim().parse::<u32>()) {
                (Ok(start), Ok(end)) if start <= end => (end - start).saturating_add(1),
                _ => 0,
            },
            None => u32::from(token.parse::<u32>().is_ok()),
        })
        .fold(0_u32, u32::saturating_add)
}

/// Rewrites a page-range string so every comma is followed by exactly one space.
///
/// Normalising an already canonical string returns it unchanged.
#[must_use]
pub fn normalize_intervals(range: &str) -> String {
    if range.trim().is_empty() {
        return String::new();
    }
    range
        .split(',')
        .map(str::trim)
        .collect::<Vec<&str>>()
        .join(", ")
}
