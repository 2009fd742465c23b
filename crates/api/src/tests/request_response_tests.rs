// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_registry, create_test_solicitation};
use crate::{ApiError, CommentRequest, ListFilter, SubmitRequest, parse_date};
use grafica_domain::Solicitation;
use time::{Date, Month};

#[test]
fn test_submit_request_from_registry_collects_uploads() {
    let request: SubmitRequest = SubmitRequest::from_registry(&create_test_registry(), 48);

    assert_eq!(request.payload.id, None);
    assert_eq!(request.payload.deadline, 48);
    assert_eq!(request.payload.total_page_count, 16);
    assert_eq!(request.payload.copies.len(), 2);
    assert!(request.payload.copies.iter().all(|copy| copy.file.is_none()));
    assert_eq!(request.files.len(), 1);
}

#[test]
fn test_payload_serializes_in_camel_case_without_files() {
    let request: SubmitRequest = SubmitRequest::from_registry(&create_test_registry(), 24);

    let json: serde_json::Value = serde_json::to_value(&request.payload).unwrap();

    assert_eq!(json["deadline"], 24);
    assert_eq!(json["totalPageCount"], 16);
    assert!(json.get("id").is_none());
    let copy: &serde_json::Value = &json["copies"][0];
    assert_eq!(copy["fileName"], "a.pdf");
    assert_eq!(copy["isPhysicalFile"], false);
    assert_eq!(copy["printConfig"]["sheetsTotal"], 10);
    assert_eq!(copy["printConfig"]["pages"], "ALL");
    assert!(copy.get("file").is_none());
    assert_eq!(json["copies"][1]["isPhysicalFile"], true);
}

#[test]
fn test_submit_request_from_solicitation_has_no_files() {
    let solicitation: Solicitation = create_test_solicitation();

    let request: SubmitRequest = SubmitRequest::from_solicitation(&solicitation);

    assert_eq!(request.payload.id, Some(7));
    assert_eq!(request.payload.total_page_count, 14);
    assert!(request.files.is_empty());
}

#[test]
fn test_empty_filter_has_no_params() {
    assert!(ListFilter::default().to_query().unwrap().is_empty());
}

#[test]
fn test_filter_renders_all_params() {
    let filter: ListFilter = ListFilter::default()
        .with_filtering("mine")
        .with_concluded(true)
        .with_dates(
            Some(Date::from_calendar_date(2026, Month::January, 5).unwrap()),
            Some(Date::from_calendar_date(2026, Month::February, 28).unwrap()),
        )
        .with_query("  apostila ");

    let params: Vec<(&'static str, String)> = filter.to_query().unwrap();

    assert_eq!(
        params,
        vec![
            ("filtering", String::from("mine")),
            ("concluded", String::from("true")),
            ("startDate", String::from("2026-01-05")),
            ("endDate", String::from("2026-02-28")),
            ("query", String::from("apostila")),
        ]
    );
}

#[test]
fn test_filter_skips_blank_query() {
    let params: Vec<(&'static str, String)> =
        ListFilter::default().with_query("   ").to_query().unwrap();

    assert!(params.is_empty());
}

#[test]
fn test_filter_rejects_inverted_window() {
    let filter: ListFilter = ListFilter::default().with_dates(
        Some(Date::from_calendar_date(2026, Month::May, 2).unwrap()),
        Some(Date::from_calendar_date(2026, Month::May, 1).unwrap()),
    );

    assert!(matches!(
        filter.to_query(),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "startDate"
    ));
}

#[test]
fn test_parse_date() {
    assert_eq!(
        parse_date("startDate", "2026-10-18").unwrap(),
        Date::from_calendar_date(2026, Month::October, 18).unwrap()
    );
    assert!(matches!(
        parse_date("startDate", "18/10/2026"),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_comment_request_wire_format() {
    let request: CommentRequest = CommentRequest {
        message: String::from("Pode grampear?"),
    };

    assert_eq!(
        serde_json::to_string(&request).unwrap(),
        r#"{"message":"Pode grampear?"}"#
    );
}
