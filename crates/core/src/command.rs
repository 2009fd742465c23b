// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use grafica_domain::{DocumentCopy, Layout, PageSelection, PagesPerSheet};

/// A command represents user intent against the copy registry as data only.
///
/// Commands are the only way to request registry changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Attach a new copy.
    AddCopy {
        /// The copy to attach, with its file for digital copies.
        copy: DocumentCopy,
    },
    /// Change notes or print settings of an attached copy.
    EditCopy {
        /// Position of the copy in the registry.
        position: usize,
        /// The fields to change.
        changes: CopyChanges,
    },
    /// Detach a copy.
    RemoveCopy {
        /// Position of the copy in the registry.
        position: usize,
    },
    /// Accept the pending overwrite of a duplicate.
    ConfirmOverwrite,
    /// Reject the pending overwrite of a duplicate.
    DeclineOverwrite,
    /// Choose the requested term, in hours.
    SelectDeadline {
        /// The term in hours.
        hours: u32,
    },
    /// Drop every copy and reset the term.
    Clear,
}

/// The user-editable subset of a copy.
///
/// `None` leaves the field unchanged. The file name and page count are not
/// editable; a different document is a different copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyChanges {
    /// New notes.
    pub notes: Option<String>,
    /// New number of copies.
    pub copy_count: Option<u32>,
    /// New page selection.
    pub pages: Option<PageSelection>,
    /// New page range. Ignored when the merged selection is `ALL`.
    pub page_intervals: Option<String>,
    /// New pages per sheet.
    pub pages_per_sheet: Option<PagesPerSheet>,
    /// New orientation.
    pub layout: Option<Layout>,
    /// New duplex setting.
    pub front_and_back: Option<bool>,
}

impl CopyChanges {
    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Sets the number of copies.
    #[must_use]
    pub const fn with_copy_count(mut self, copy_count: u32) -> Self {
        self.copy_count = Some(copy_count);
        self
    }

    /// Switches to a custom page range.
    #[must_use]
    pub fn with_custom_pages(mut self, intervals: &str) -> Self {
        self.pages = Some(PageSelection::Custom);
        self.page_intervals = Some(intervals.to_string());
        self
    }

    /// Switches to printing every page.
    #[must_use]
    pub const fn with_all_pages(mut self) -> Self {
        self.pages = Some(PageSelection::All);
        self
    }

    /// Sets pages per sheet.
    #[must_use]
    pub const fn with_pages_per_sheet(mut self, pages_per_sheet: PagesPerSheet) -> Self {
        self.pages_per_sheet = Some(pages_per_sheet);
        self
    }

    /// Sets the orientation.
    #[must_use]
    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sets the duplex flag.
    #[must_use]
    pub const fn with_front_and_back(mut self, front_and_back: bool) -> Self {
        self.front_and_back = Some(front_and_back);
        self
    }

    /// Merges these changes onto a copy of `copy`.
    ///
    /// The result has its intervals normalised (cleared for `ALL`) and its
    /// sheet total recomputed.
    #[must_use]
    pub fn merge_into(&self, copy: &DocumentCopy) -> DocumentCopy {
        let mut merged: DocumentCopy = copy.clone();
        let config = &mut merged.print_config;

        if let Some(notes) = &self.notes {
            merged.notes.clone_from(notes);
        }
        if let Some(copy_count) = self.copy_count {
            config.copy_count = copy_count;
        }
        if let Some(pages) = self.pages {
            config.pages = pages;
        }
        if let Some(intervals) = &self.page_intervals {
            config.page_intervals = Some(intervals.clone());
        }
        if let Some(pages_per_sheet) = self.pages_per_sheet {
            config.pages_per_sheet = pages_per_sheet;
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(front_and_back) = self.front_and_back {
            config.front_and_back = front_and_back;
        }

        merged.refresh_sheets_total();
        merged
    }
}
