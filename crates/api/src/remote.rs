// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::request_response::{CommentRequest, ListFilter, SubmitRequest};
use async_trait::async_trait;
use grafica_domain::{DocumentCopy, Solicitation};

/// The remote solicitation API.
///
/// Every call carries the session's bearer token. Implementations map every
/// failure (network, non-2xx status, malformed body) to `ApiError::Remote`.
#[async_trait]
pub trait SolicitationApi: Send + Sync {
    /// Creates a solicitation (`POST /solicitacoes`).
    async fn create(&self, token: &str, request: SubmitRequest)
    -> Result<Solicitation, ApiError>;

    /// Replaces a solicitation's metadata and uploads new files
    /// (`PATCH /solicitacoes/{id}`).
    async fn edit(
        &self,
        token: &str,
        solicitation_id: i64,
        request: SubmitRequest,
    ) -> Result<String, ApiError>;

    /// Flips a solicitation between open and concluded
    /// (`PATCH /solicitacoes/{id}/status`).
    async fn toggle_status(&self, token: &str, solicitation_id: i64) -> Result<String, ApiError>;

    /// Deletes a solicitation (`DELETE /solicitacoes/{id}`).
    async fn delete(&self, token: &str, solicitation_id: i64) -> Result<String, ApiError>;

    /// Fetches one solicitation (`GET /solicitacoes/{id}`).
    async fn fetch(&self, token: &str, solicitation_id: i64) -> Result<Solicitation, ApiError>;

    /// Lists solicitations (`GET /solicitacoes`).
    async fn list(&self, token: &str, filter: &ListFilter)
    -> Result<Vec<Solicitation>, ApiError>;

    /// Lists a solicitation's copies (`GET /copias/{id}`).
    async fn list_copies(
        &self,
        token: &str,
        solicitation_id: i64,
        query: Option<&str>,
    ) -> Result<Vec<DocumentCopy>, ApiError>;

    /// Appends a comment (`PATCH /solicitacoes/{id}/comentario`).
    async fn comment(
        &self,
        token: &str,
        solicitation_id: i64,
        request: &CommentRequest,
    ) -> Result<String, ApiError>;

    /// Downloads an attached file (`GET /solicitacoes/{id}/{file_name}`).
    async fn download(
        &self,
        token: &str,
        solicitation_id: i64,
        file_name: &str,
    ) -> Result<Vec<u8>, ApiError>;

    /// Renders an HTML report over the given solicitations (`POST /relatorio`).
    async fn report(&self, token: &str, solicitations: &[Solicitation])
    -> Result<String, ApiError>;
}
