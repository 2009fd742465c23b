// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::page_range::normalize_intervals;
use crate::print_config::compute_sheets_total;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default term offered for a new solicitation, in hours.
pub const DEFAULT_DEADLINE_HOURS: u32 = 24;

/// Which pages of a document are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageSelection {
    /// Every page of the document.
    #[default]
    All,
    /// Only the pages named by `page_intervals`.
    Custom,
}

impl PageSelection {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Custom => "CUSTOM",
        }
    }
}

impl FromStr for PageSelection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "CUSTOM" => Ok(Self::Custom),
            _ => Err(DomainError::UnknownVariant {
                kind: "page selection",
                value: s.to_string(),
            }),
        }
    }
}

/// Page orientation on the printed sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layout {
    /// Portrait orientation.
    #[default]
    Portrait,
    /// Landscape orientation.
    Landscape,
}

impl FromStr for Layout {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PORTRAIT" => Ok(Self::Portrait),
            "LANDSCAPE" => Ok(Self::Landscape),
            _ => Err(DomainError::UnknownVariant {
                kind: "layout",
                value: s.to_string(),
            }),
        }
    }
}

/// Number of document pages placed on one side of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum PagesPerSheet {
    /// One page per side.
    #[default]
    One,
    /// Two pages per side.
    Two,
    /// Four pages per side.
    Four,
}

impl PagesPerSheet {
    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

impl TryFrom<u8> for PagesPerSheet {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            _ => Err(DomainError::InvalidPagesPerSheet(value)),
        }
    }
}

impl From<PagesPerSheet> for u8 {
    fn from(value: PagesPerSheet) -> Self {
        match value {
            PagesPerSheet::One => 1,
            PagesPerSheet::Two => 2,
            PagesPerSheet::Four => 4,
        }
    }
}

/// Per-copy printing parameters.
///
/// `sheets_total` is derived and must only be written through
/// [`DocumentCopy::refresh_sheets_total`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintConfig {
    /// How many times the selection is printed (at least 1).
    pub copy_count: u32,
    /// Whether all pages or a custom range are printed.
    pub pages: PageSelection,
    /// Canonical page-range string, present only for custom selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_intervals: Option<String>,
    /// Pages placed on one side of a sheet.
    pub pages_per_sheet: PagesPerSheet,
    /// Page orientation.
    pub layout: Layout,
    /// Print on both sides of the sheet.
    pub front_and_back: bool,
    /// Physical sheets consumed by this copy.
    #[serde(default)]
    pub sheets_total: u32,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            copy_count: 1,
            pages: PageSelection::All,
            page_intervals: None,
            pages_per_sheet: PagesPerSheet::One,
            layout: Layout::Portrait,
            front_and_back: false,
            sheets_total: 0,
        }
    }
}

impl PrintConfig {
    /// Sets the number of copies.
    #[must_use]
    pub const fn with_copy_count(mut self, copy_count: u32) -> Self {
        self.copy_count = copy_count;
        self
    }

    /// Selects a custom page range.
    #[must_use]
    pub fn with_custom_pages(mut self, intervals: &str) -> Self {
        self.pages = PageSelection::Custom;
        self.page_intervals = Some(intervals.to_string());
        self
    }

    /// Sets how many pages go on one side of a sheet.
    #[must_use]
    pub const fn with_pages_per_sheet(mut self, pages_per_sheet: PagesPerSheet) -> Self {
        self.pages_per_sheet = pages_per_sheet;
        self
    }

    /// Sets the page orientation.
    #[must_use]
    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Enables or disables duplex printing.
    #[must_use]
    pub const fn with_front_and_back(mut self, front_and_back: bool) -> Self {
        self.front_and_back = front_and_back;
        self
    }

    /// Brings `page_intervals` to canonical form.
    ///
    /// `ALL` always clears the intervals; `CUSTOM` normalises the separator
    /// spacing and treats a blank string as absent.
    pub fn normalize(&mut self) {
        self.page_intervals = match self.pages {
            PageSelection::All => None,
            PageSelection::Custom => self
                .page_intervals
                .as_deref()
                .map(normalize_intervals)
                .filter(|intervals| !intervals.is_empty()),
        };
    }
}

/// An uploaded document held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct FileBlob {
    /// Original file name, including extension.
    pub file_name: String,
    /// Raw file contents.
    pub content: Vec<u8>,
}

impl FileBlob {
    /// Creates a new blob.
    #[must_use]
    pub fn new(file_name: &str, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content,
        }
    }

    /// Returns the lowercase extension, or an empty string when there is none.
    #[must_use]
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for FileBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBlob")
            .field("file_name", &self.file_name)
            .field("bytes", &self.content.len())
            .finish()
    }
}

/// One document attached to a solicitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCopy {
    /// Server identifier. `None` until the copy has been persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The attached file. Never serialised; uploaded as its own multipart part.
    #[serde(skip)]
    pub file: Option<FileBlob>,
    /// Display and duplicate-detection name.
    pub file_name: String,
    /// File extension.
    #[serde(default)]
    pub file_type: String,
    /// Page count of the whole document.
    pub page_count: u32,
    /// Printing parameters.
    pub print_config: PrintConfig,
    /// `true` when the document is delivered on paper instead of uploaded.
    #[serde(default)]
    pub is_physical_file: bool,
    /// Free-text notes for the print shop.
    #[serde(default)]
    pub notes: String,
}

impl DocumentCopy {
    /// Creates a copy backed by an uploaded file.
    ///
    /// The file name and type are taken from the blob.
    #[must_use]
    pub fn digital(file: FileBlob, page_count: u32, print_config: PrintConfig) -> Self {
        let mut copy: Self = Self {
            id: None,
            file_name: file.file_name.clone(),
            file_type: file.extension(),
            file: Some(file),
            page_count,
            print_config,
            is_physical_file: false,
            notes: String::new(),
        };
        copy.refresh_sheets_total();
        copy
    }

    /// Creates a copy for a document delivered physically.
    #[must_use]
    pub fn physical(file_name: &str, page_count: u32, print_config: PrintConfig) -> Self {
        let mut copy: Self = Self {
            id: None,
            file: None,
            file_name: file_name.to_string(),
            file_type: String::new(),
            page_count,
            print_config,
            is_physical_file: true,
            notes: String::new(),
        };
        copy.refresh_sheets_total();
        copy
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    /// Normalises the print configuration and recomputes `sheets_total`.
    pub fn refresh_sheets_total(&mut self) {
        self.print_config.normalize();
        self.print_config.sheets_total = compute_sheets_total(self.page_count, &self.print_config);
    }

    /// Returns the derived sheet total.
    #[must_use]
    pub const fn sheets_total(&self) -> u32 {
        self.print_config.sheets_total
    }

    /// Returns the page intervals, treating blank as absent.
    #[must_use]
    pub fn intervals(&self) -> Option<&str> {
        self.print_config
            .page_intervals
            .as_deref()
            .filter(|intervals| !intervals.trim().is_empty())
    }
}

/// The user owning a solicitation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Full display name.
    #[serde(default)]
    pub common_name: Option<String>,
    /// Institutional registration number.
    #[serde(default)]
    pub registration_number: Option<String>,
    /// Contact e-mail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Institutional role (e.g. "ADMIN").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl User {
    /// Creates a user with the two fields required for submission.
    #[must_use]
    pub fn new(common_name: &str, registration_number: &str) -> Self {
        Self {
            common_name: Some(common_name.to_string()),
            registration_number: Some(registration_number.to_string()),
            ..Self::default()
        }
    }

    /// Returns whether this user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case("admin"))
    }
}

/// Kind of entry in a solicitation's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineEventKind {
    /// A free-text comment.
    Comment,
    /// The solicitation was opened or reopened.
    Open,
    /// The solicitation was concluded.
    Close,
    /// The solicitation was archived.
    Archive,
    /// The solicitation was edited.
    Edit,
}

/// One entry of a solicitation's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: TimelineEventKind,
    /// Comment text or server-generated description.
    #[serde(default)]
    pub message: Option<String>,
    /// Who caused the event.
    #[serde(default)]
    pub user: Option<User>,
    /// When it happened, as sent by the server.
    #[serde(default)]
    pub date: Option<String>,
}

/// A print request bundling one or more copies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solicitation {
    /// Server identifier. `None` until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Requested turnaround, in hours.
    pub deadline: u32,
    /// Sum of `sheets_total` over `copies`.
    pub total_page_count: u32,
    /// Attached copies, in display order.
    #[serde(default)]
    pub copies: Vec<DocumentCopy>,
    /// Creation timestamp assigned by the server.
    #[serde(default)]
    pub creation_date: Option<String>,
    /// Conclusion timestamp. Present once the solicitation is closed.
    #[serde(default)]
    pub conclusion_date: Option<String>,
    /// Whether the solicitation has been archived.
    #[serde(default)]
    pub archived: bool,
    /// Owning user.
    #[serde(default)]
    pub user: Option<User>,
    /// Append-only history.
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

impl Solicitation {
    /// Returns whether the solicitation has been concluded.
    #[must_use]
    pub const fn is_concluded(&self) -> bool {
        self.conclusion_date.is_some()
    }

    /// Sums `sheets_total` over all copies.
    #[must_use]
    pub fn sheets_sum(&self) -> u32 {
        self.copies
            .iter()
            .map(DocumentCopy::sheets_total)
            .fold(0_u32, u32::saturating_add)
    }

    /// Recomputes every copy's sheet total and the aggregate.
    pub fn recompute_total_page_count(&mut self) {
        for copy in &mut self.copies {
            copy.refresh_sheets_total();
        }
        self.total_page_count = self.sheets_sum();
    }

    /// Looks up a copy by server identifier.
    #[must_use]
    pub fn copy_by_id(&self, copy_id: i64) -> Option<&DocumentCopy> {
        self.copies.iter().find(|copy| copy.id == Some(copy_id))
    }
}

/// A row of the combined request/copy listing.
///
/// List endpoints return either whole solicitations or bare copies; the row
/// kind is fixed when the row is built, never inferred from field presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// A whole solicitation.
    Solicitation(Solicitation),
    /// A single copy belonging to the given solicitation.
    Copy {
        /// The owning solicitation.
        solicitation_id: i64,
        /// The copy itself.
        copy: DocumentCopy,
    },
}

impl TableRow {
    /// Returns the solicitation this row belongs to, if known.
    #[must_use]
    pub const fn solicitation_id(&self) -> Option<i64> {
        match self {
            Self::Solicitation(solicitation) => solicitation.id,
            Self::Copy {
                solicitation_id, ..
            } => Some(*solicitation_id),
        }
    }

    /// Returns the sheet count shown for this row.
    #[must_use]
    pub const fn sheets(&self) -> u32 {
        match self {
            Self::Solicitation(solicitation) => solicitation.total_page_count,
            Self::Copy { copy, .. } => copy.sheets_total(),
        }
    }
}
