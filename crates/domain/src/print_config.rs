// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::page_range::count_pages;
use crate::types::{PageSelection, PrintConfig};

/// Computes the physical sheets consumed by one copy.
///
/// The effective page count is the document's `page_count` for `ALL`, or the
/// number of pages named by `page_intervals` for `CUSTOM`. Sheets per copy is
/// that count divided by pages-per-sheet, rounded up, then halved (rounding
/// up) when printing front and back. The result is multiplied by
/// `copy_count`.
///
/// This function is pure. A `copy_count` of zero is a caller error and
/// yields zero.
///
/// # Arguments
///
/// * `page_count` - The document's page count
/// * `config` - The copy's print configuration
#[must_use]
pub fn compute_sheets_total(page_count: u32, config: &PrintConfig) -> u32 {
    let effective_pages: u32 = match config.pages {
        PageSelection::All => page_count,
        PageSelection::Custom => config.page_intervals.as_deref().map_or(0, count_pages),
    };

    let mut sheets_per_copy: u32 = effective_pages.div_ceil(config.pages_per_sheet.value());
    if config.front_and_back {
        sheets_per_copy = sheets_per_copy.div_ceil(2);
    }

    sheets_per_copy.saturating_mul(config.copy_count)
}
