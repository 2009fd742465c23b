// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, CommentRequest, ListFilter, Session, SolicitationApi, SolicitationSyncCoordinator,
    StaticIdentity, SubmitRequest,
};
use async_trait::async_trait;
use grafica::{Command, RegistryState, apply};
use grafica_domain::{DocumentCopy, FileBlob, PrintConfig, Solicitation, User};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const TEST_TOKEN: &str = "token-123";

/// A call received by [`RecordingApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Create(SubmitRequest),
    Edit(i64, SubmitRequest),
    ToggleStatus(i64),
    Delete(i64),
    Fetch(i64),
    List(ListFilter),
    ListCopies(i64, Option<String>),
    Comment(i64, String),
    Download(i64, String),
    Report(usize),
}

impl RecordedCall {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::Edit(..) => "edit",
            Self::ToggleStatus(_) => "toggle_status",
            Self::Delete(_) => "delete",
            Self::Fetch(_) => "fetch",
            Self::List(_) => "list",
            Self::ListCopies(..) => "list_copies",
            Self::Comment(..) => "comment",
            Self::Download(..) => "download",
            Self::Report(_) => "report",
        }
    }
}

/// In-memory remote API that records every call.
///
/// Holds a single server-side solicitation that create and edit overwrite
/// and fetch returns.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<RecordedCall>>,
    tokens: Mutex<Vec<String>>,
    stored: Mutex<Option<Solicitation>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    gate: Option<Arc<Notify>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stored(solicitation: Solicitation) -> Self {
        let api: Self = Self::new();
        *api.stored.lock().unwrap() = Some(solicitation);
        api
    }

    /// Holds every call until the gate is notified.
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn fail_on(self, operation: &'static str, err: ApiError) -> Self {
        self.failures.lock().unwrap().insert(operation, err);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls().iter().map(RecordedCall::name).collect()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Option<Solicitation> {
        self.stored.lock().unwrap().clone()
    }

    async fn record(&self, token: &str, call: RecordedCall) -> Result<(), ApiError> {
        let name: &'static str = call.name();
        self.calls.lock().unwrap().push(call);
        self.tokens.lock().unwrap().push(token.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let failure: Option<ApiError> = self.failures.lock().unwrap().get(name).cloned();
        failure.map_or(Ok(()), Err)
    }

    fn store(&self, id: i64, request: &SubmitRequest) -> Solicitation {
        let mut copies: Vec<DocumentCopy> = request.payload.copies.clone();
        for (index, copy) in copies.iter_mut().enumerate() {
            if copy.id.is_none() {
                copy.id = Some(id * 100 + i64::try_from(index).unwrap());
            }
        }

        let solicitation: Solicitation = Solicitation {
            id: Some(id),
            deadline: request.payload.deadline,
            total_page_count: request.payload.total_page_count,
            copies,
            creation_date: Some(String::from("2026-10-18T09:00:00Z")),
            ..Solicitation::default()
        };
        *self.stored.lock().unwrap() = Some(solicitation.clone());
        solicitation
    }

    fn not_found() -> ApiError {
        ApiError::remote(Some(404), "Solicitação não encontrada")
    }
}

#[async_trait]
impl SolicitationApi for RecordingApi {
    async fn create(&self, token: &str, request: SubmitRequest) -> Result<Solicitation, ApiError> {
        self.record(token, RecordedCall::Create(request.clone()))
            .await?;
        Ok(self.store(100, &request))
    }

    async fn edit(
        &self,
        token: &str,
        solicitation_id: i64,
        request: SubmitRequest,
    ) -> Result<String, ApiError> {
        self.record(token, RecordedCall::Edit(solicitation_id, request.clone()))
            .await?;
        self.store(solicitation_id, &request);
        Ok(String::from("Solicitação editada com sucesso"))
    }

    async fn toggle_status(&self, token: &str, solicitation_id: i64) -> Result<String, ApiError> {
        self.record(token, RecordedCall::ToggleStatus(solicitation_id))
            .await?;
        Ok(String::from("Status da solicitação alterado"))
    }

    async fn delete(&self, token: &str, solicitation_id: i64) -> Result<String, ApiError> {
        self.record(token, RecordedCall::Delete(solicitation_id))
            .await?;
        *self.stored.lock().unwrap() = None;
        Ok(String::from("Solicitação removida"))
    }

    async fn fetch(&self, token: &str, solicitation_id: i64) -> Result<Solicitation, ApiError> {
        self.record(token, RecordedCall::Fetch(solicitation_id))
            .await?;
        self.stored()
            .filter(|solicitation| solicitation.id == Some(solicitation_id))
            .ok_or_else(Self::not_found)
    }

    async fn list(&self, token: &str, filter: &ListFilter) -> Result<Vec<Solicitation>, ApiError> {
        self.record(token, RecordedCall::List(filter.clone()))
            .await?;
        Ok(self.stored().into_iter().collect())
    }

    async fn list_copies(
        &self,
        token: &str,
        solicitation_id: i64,
        query: Option<&str>,
    ) -> Result<Vec<DocumentCopy>, ApiError> {
        self.record(
            token,
            RecordedCall::ListCopies(solicitation_id, query.map(str::to_string)),
        )
        .await?;
        Ok(self
            .stored()
            .map(|solicitation| solicitation.copies)
            .unwrap_or_default())
    }

    async fn comment(
        &self,
        token: &str,
        solicitation_id: i64,
        request: &CommentRequest,
    ) -> Result<String, ApiError> {
        self.record(
            token,
            RecordedCall::Comment(solicitation_id, request.message.clone()),
        )
        .await?;
        Ok(String::from("Comentário adicionado"))
    }

    async fn download(
        &self,
        token: &str,
        solicitation_id: i64,
        file_name: &str,
    ) -> Result<Vec<u8>, ApiError> {
        self.record(
            token,
            RecordedCall::Download(solicitation_id, file_name.to_string()),
        )
        .await?;
        Ok(b"%PDF-1.7".to_vec())
    }

    async fn report(&self, token: &str, solicitations: &[Solicitation]) -> Result<String, ApiError> {
        self.record(token, RecordedCall::Report(solicitations.len()))
            .await?;
        Ok(String::from("<html><body>Relatório</body></html>"))
    }
}

pub fn create_test_user() -> User {
    User::new("Maria da Silva", "20231234")
}

pub async fn create_test_session() -> Session {
    let identity: StaticIdentity = StaticIdentity::new(TEST_TOKEN, create_test_user());
    Session::establish(&identity).await.unwrap()
}

pub async fn create_test_coordinator(api: RecordingApi) -> SolicitationSyncCoordinator<RecordingApi> {
    SolicitationSyncCoordinator::new(api, create_test_session().await)
}

pub fn create_test_copy(name: &str, page_count: u32) -> DocumentCopy {
    DocumentCopy::digital(
        FileBlob::new(name, name.as_bytes().to_vec()),
        page_count,
        PrintConfig::default(),
    )
}

pub fn create_test_persisted_copy(id: i64, name: &str, page_count: u32) -> DocumentCopy {
    let mut copy: DocumentCopy = DocumentCopy::physical(name, page_count, PrintConfig::default());
    copy.id = Some(id);
    copy.is_physical_file = false;
    copy.file_type = String::from("pdf");
    copy
}

/// A new-solicitation registry with `a.pdf` (10 pages) and a physical
/// `Apostila` (6 pages).
pub fn create_test_registry() -> RegistryState {
    let state: RegistryState = apply(
        &RegistryState::new(),
        Command::AddCopy {
            copy: create_test_copy("a.pdf", 10),
        },
    )
    .unwrap()
    .new_state;

    apply(
        &state,
        Command::AddCopy {
            copy: DocumentCopy::physical("Apostila", 6, PrintConfig::default()),
        },
    )
    .unwrap()
    .new_state
}

/// Solicitation 7 with copies 71 (`a.pdf`, 10 pages) and 72 (`b.pdf`, 4 pages).
pub fn create_test_solicitation() -> Solicitation {
    let mut solicitation: Solicitation = Solicitation {
        id: Some(7),
        deadline: 48,
        copies: vec![
            create_test_persisted_copy(71, "a.pdf", 10),
            create_test_persisted_copy(72, "b.pdf", 4),
        ],
        user: Some(create_test_user()),
        ..Solicitation::default()
    };
    solicitation.recompute_total_page_count();
    solicitation
}
