// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::http::{endpoint_url, mime_for, remote_message};
use grafica_domain::FileBlob;
use reqwest::Url;

#[test]
fn test_endpoint_url_appends_segments() {
    let base: Url = Url::parse("https://grafica.example.edu/api/").unwrap();

    let url: Url = endpoint_url(&base, &["solicitacoes", "7", "status"]).unwrap();

    assert_eq!(url.as_str(), "https://grafica.example.edu/api/solicitacoes/7/status");
}

#[test]
fn test_endpoint_url_without_base_path() {
    let base: Url = Url::parse("http://localhost:8080").unwrap();

    let url: Url = endpoint_url(&base, &["relatorio"]).unwrap();

    assert_eq!(url.as_str(), "http://localhost:8080/relatorio");
}

#[test]
fn test_endpoint_url_encodes_file_names() {
    let base: Url = Url::parse("http://localhost:8080").unwrap();

    let url: Url = endpoint_url(&base, &["solicitacoes", "7", "prova final/v2.pdf"]).unwrap();

    assert_eq!(
        url.as_str(),
        "http://localhost:8080/solicitacoes/7/prova%20final%2Fv2.pdf"
    );
}

#[test]
fn test_remote_message_prefers_json_message_field() {
    assert_eq!(
        remote_message(400, r#"{"message":"Prazo inválido","status":400}"#),
        "Prazo inválido"
    );
}

#[test]
fn test_remote_message_falls_back_to_body_then_status() {
    assert_eq!(remote_message(502, "  Bad Gateway \n"), "Bad Gateway");
    assert_eq!(remote_message(500, r#"{"error":"x"}"#), r#"{"error":"x"}"#);
    assert_eq!(remote_message(503, ""), "Request failed with status 503");
}

#[test]
fn test_mime_types_follow_extension() {
    assert_eq!(mime_for(&FileBlob::new("a.PDF", Vec::new())), "application/pdf");
    assert_eq!(mime_for(&FileBlob::new("foto.jpeg", Vec::new())), "image/jpeg");
    assert_eq!(
        mime_for(&FileBlob::new("sem-extensao", Vec::new())),
        "application/octet-stream"
    );
}
