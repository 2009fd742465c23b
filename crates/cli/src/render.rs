// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering of solicitations for the terminal.

use grafica::RegistryState;
use grafica_domain::{DocumentCopy, PageSelection, Solicitation, TableRow, TimelineEventKind};
use std::fmt::Write;

/// Returns the status label shown next to a solicitation.
#[must_use]
pub const fn status_label(solicitation: &Solicitation) -> &'static str {
    if solicitation.archived {
        "archived"
    } else if solicitation.is_concluded() {
        "concluded"
    } else {
        "open"
    }
}

fn id_label(id: Option<i64>) -> String {
    id.map_or_else(|| String::from("-"), |id| format!("#{id}"))
}

/// Renders one copy as a single line.
#[must_use]
pub fn describe_copy(copy: &DocumentCopy) -> String {
    let config = &copy.print_config;
    let pages: &str = match config.pages {
        PageSelection::All => "all pages",
        PageSelection::Custom => copy.intervals().unwrap_or("all pages"),
    };
    let medium: &str = if copy.is_physical_file {
        "physical"
    } else {
        "digital"
    };

    let mut line: String = format!(
        "{} {} ({medium}): {pages}, {}x, {}/side, {} sheets",
        id_label(copy.id),
        copy.file_name,
        config.copy_count,
        config.pages_per_sheet.value(),
        copy.sheets_total()
    );
    if config.front_and_back {
        line.push_str(", duplex");
    }
    if !copy.notes.trim().is_empty() {
        let _ = write!(line, " [{}]", copy.notes.trim());
    }
    line
}

/// Renders one listing row as a single line.
#[must_use]
pub fn describe_row(row: &TableRow) -> String {
    match row {
        TableRow::Solicitation(solicitation) => {
            let owner: &str = solicitation
                .user
                .as_ref()
                .and_then(|user| user.common_name.as_deref())
                .unwrap_or("-");
            format!(
                "{}\t{}\t{} copies\t{} sheets\t{}h\t{owner}",
                id_label(solicitation.id),
                status_label(solicitation),
                solicitation.copies.len(),
                row.sheets(),
                solicitation.deadline
            )
        }
        TableRow::Copy {
            solicitation_id,
            copy,
        } => format!("#{solicitation_id}\t{}", describe_copy(copy)),
    }
}

fn event_label(kind: TimelineEventKind) -> &'static str {
    match kind {
        TimelineEventKind::Comment => "comment",
        TimelineEventKind::Open => "opened",
        TimelineEventKind::Close => "closed",
        TimelineEventKind::Archive => "archived",
        TimelineEventKind::Edit => "edited",
    }
}

/// Renders a solicitation with its copies and timeline.
#[must_use]
pub fn describe_solicitation(solicitation: &Solicitation) -> String {
    let mut text: String = format!(
        "Solicitation {} ({})\nDeadline: {}h\nTotal sheets: {}\n",
        id_label(solicitation.id),
        status_label(solicitation),
        solicitation.deadline,
        solicitation.total_page_count
    );

    if let Some(created) = &solicitation.creation_date {
        let _ = writeln!(text, "Created: {created}");
    }

    text.push_str("Copies:\n");
    for copy in &solicitation.copies {
        let _ = writeln!(text, "  {}", describe_copy(copy));
    }

    if !solicitation.timeline.is_empty() {
        text.push_str("Timeline:\n");
        for event in &solicitation.timeline {
            let who: &str = event
                .user
                .as_ref()
                .and_then(|user| user.common_name.as_deref())
                .unwrap_or("-");
            let _ = writeln!(
                text,
                "  {} {} by {who}{}",
                event.date.as_deref().unwrap_or("-"),
                event_label(event.kind),
                event
                    .message
                    .as_deref()
                    .map(|message| format!(": {message}"))
                    .unwrap_or_default()
            );
        }
    }

    text
}

/// Summarises a registry before it is submitted.
#[must_use]
pub fn describe_registry(registry: &RegistryState) -> String {
    let mut text: String = format!(
        "{} copies, {} sheets, {}h deadline\n",
        registry.file_count(),
        registry.total_page_count(),
        registry.deadline()
    );
    for copy in registry.copies() {
        let _ = writeln!(text, "  {}", describe_copy(copy));
    }
    text
}
