// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire types exchanged with the remote solicitation API.

use crate::error::ApiError;
use grafica::RegistryState;
use grafica_domain::{DocumentCopy, FileBlob, Solicitation};
use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::well_known::Iso8601;

/// The JSON part of a create or edit submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolicitationPayload {
    /// Present when editing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Requested term in hours.
    pub deadline: u32,
    /// Sum of the copies' sheet totals.
    pub total_page_count: u32,
    /// Copy metadata, without file contents.
    pub copies: Vec<DocumentCopy>,
}

/// A create or edit submission: the JSON payload plus one file per digital copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    /// Solicitation metadata.
    pub payload: SolicitationPayload,
    /// Files still to be uploaded, in copy order.
    pub files: Vec<FileBlob>,
}

impl SubmitRequest {
    /// Builds a submission from the registry.
    ///
    /// The payload carries the registry's solicitation id when editing.
    #[must_use]
    pub fn from_registry(registry: &RegistryState, deadline: u32) -> Self {
        Self {
            payload: SolicitationPayload {
                id: registry.solicitation_id(),
                deadline,
                total_page_count: registry.total_page_count(),
                copies: registry.copies().to_vec(),
            },
            files: registry.uploads().map(|(_, file)| file.clone()).collect(),
        }
    }

    /// Builds a metadata-only submission from a persisted solicitation.
    #[must_use]
    pub fn from_solicitation(solicitation: &Solicitation) -> Self {
        Self {
            payload: SolicitationPayload {
                id: solicitation.id,
                deadline: solicitation.deadline,
                total_page_count: solicitation.total_page_count,
                copies: solicitation.copies.clone(),
            },
            files: Vec::new(),
        }
    }
}

/// Body of a comment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRequest {
    /// Comment text.
    pub message: String,
}

/// Filters for the solicitation listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Named server-side filter (e.g. "mine", "all").
    pub filtering: Option<String>,
    /// Restrict to concluded or open solicitations.
    pub concluded: Option<bool>,
    /// Earliest creation date, inclusive.
    pub start_date: Option<Date>,
    /// Latest creation date, inclusive.
    pub end_date: Option<Date>,
    /// Free-text search.
    pub query: Option<String>,
}

impl ListFilter {
    /// Sets the named filter.
    #[must_use]
    pub fn with_filtering(mut self, filtering: &str) -> Self {
        self.filtering = Some(filtering.to_string());
        self
    }

    /// Restricts to concluded (`true`) or open (`false`) solicitations.
    #[must_use]
    pub const fn with_concluded(mut self, concluded: bool) -> Self {
        self.concluded = Some(concluded);
        self
    }

    /// Restricts to a creation-date window.
    #[must_use]
    pub const fn with_dates(mut self, start_date: Option<Date>, end_date: Option<Date>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Sets the free-text search.
    #[must_use]
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }

    /// Renders the filter as query parameters, omitting unset fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the start date is after the end
    /// date or a date cannot be formatted.
    pub fn to_query(&self) -> Result<Vec<(&'static str, String)>, ApiError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(ApiError::InvalidInput {
                    field: String::from("startDate"),
                    message: format!("start date {start} is after end date {end}"),
                });
            }
        }

        let mut params: Vec<(&'static str, String)> = Vec::new();
        if let Some(filtering) = &self.filtering {
            params.push(("filtering", filtering.clone()));
        }
        if let Some(concluded) = self.concluded {
            params.push(("concluded", concluded.to_string()));
        }
        if let Some(start) = self.start_date {
            params.push(("startDate", format_date("startDate", start)?));
        }
        if let Some(end) = self.end_date {
            params.push(("endDate", format_date("endDate", end)?));
        }
        if let Some(query) = self.query.as_deref().filter(|q| !q.trim().is_empty()) {
            params.push(("query", query.trim().to_string()));
        }
        Ok(params)
    }
}

fn format_date(field: &str, date: Date) -> Result<String, ApiError> {
    date.format(&Iso8601::DATE)
        .map_err(|err| ApiError::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        })
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming `field` if the text is not a date.
pub fn parse_date(field: &str, text: &str) -> Result<Date, ApiError> {
    Date::parse(text.trim(), &Iso8601::DATE).map_err(|err| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("'{text}' is not a YYYY-MM-DD date: {err}"),
    })
}
