// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grafica_domain::{DocumentCopy, normalize_intervals};

fn interval_key(intervals: Option<&str>) -> String {
    intervals.map(normalize_intervals).unwrap_or_default()
}

/// Finds a copy that the candidate would duplicate.
///
/// Two copies match when their file names are identical and their page
/// intervals are identical after normalisation, with absent and empty
/// intervals treated as equal. Persisted and unsaved copies match alike.
///
/// # Arguments
///
/// * `copies` - The registry's copies, in order
/// * `file_name` - The candidate's file name
/// * `page_intervals` - The candidate's page intervals
/// * `self_position` - When editing, the slot the candidate already occupies;
///   a match at this position is the candidate itself and is skipped
///
/// # Returns
///
/// The position of the first matching copy, scanning in registry order.
#[must_use]
pub fn find_existing_index(
    copies: &[DocumentCopy],
    file_name: &str,
    page_intervals: Option<&str>,
    self_position: Option<usize>,
) -> Option<usize> {
    let wanted: String = interval_key(page_intervals);

    copies
        .iter()
        .enumerate()
        .filter(|(position, _)| Some(*position) != self_position)
        .find(|(_, copy)| copy.file_name == file_name && interval_key(copy.intervals()) == wanted)
        .map(|(position, _)| position)
}
