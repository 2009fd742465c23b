// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod page_range;
mod print_config;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use page_range::{count_pages, normalize_intervals, validate_page_range};
pub use print_config::compute_sheets_total;
pub use types::{
    DEFAULT_DEADLINE_HOURS, DocumentCopy, FileBlob, Layout, PageSelection, PagesPerSheet,
    PrintConfig, Solicitation, TableRow, TimelineEvent, TimelineEventKind, User,
};
pub use validation::{validate_copy_fields, validate_copy_file, validate_deadline, validate_user};
