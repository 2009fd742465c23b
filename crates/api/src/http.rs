// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! reqwest implementation of [`SolicitationApi`].

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::remote::SolicitationApi;
use crate::request_response::{CommentRequest, ListFilter, SubmitRequest};
use async_trait::async_trait;
use grafica_domain::{DocumentCopy, FileBlob, Solicitation};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use std::sync::Arc;
use tracing::{debug, warn};

/// Tracing target for HTTP client operations.
pub const TRACING_TARGET: &str = "grafica_api::http";

/// Name of the multipart part holding the solicitation JSON.
pub const PAYLOAD_PART: &str = "solicitacao";

/// Name of the multipart parts holding uploaded files.
pub const FILES_PART: &str = "files";

struct HttpApiInner {
    http: Client,
    base_url: Url,
    config: ClientConfig,
}

impl std::fmt::Debug for HttpApiInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiInner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// HTTP client for the remote solicitation API.
#[derive(Clone, Debug)]
pub struct HttpSolicitationApi {
    inner: Arc<HttpApiInner>,
}

impl HttpSolicitationApi {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let base_url: Url = config.parsed_base_url()?;

        let http: Client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        debug!(
            target: TRACING_TARGET,
            base_url = %base_url,
            timeout_ms = config.timeout.as_millis(),
            "Created solicitation API client"
        );

        Ok(Self {
            inner: Arc::new(HttpApiInner {
                http,
                base_url,
                config,
            }),
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    fn request(
        &self,
        method: Method,
        token: &str,
        segments: &[&str],
    ) -> Result<(RequestBuilder, Url), ApiError> {
        let url: Url = endpoint_url(&self.inner.base_url, segments)?;
        let builder: RequestBuilder = self
            .inner
            .http
            .request(method, url.clone())
            .bearer_auth(token);
        Ok((builder, url))
    }

    async fn send(&self, builder: RequestBuilder, url: &Url) -> Result<Response, ApiError> {
        debug!(target: TRACING_TARGET, path = url.path(), "Sending request");

        let response: Response = builder.send().await?;
        let status: u16 = response.status().as_u16();

        if response.status().is_success() {
            return Ok(response);
        }

        let body: String = response.text().await.unwrap_or_default();
        let message: String = remote_message(status, &body);
        warn!(
            target: TRACING_TARGET,
            path = url.path(),
            status,
            message = %message,
            "Request failed"
        );
        Err(ApiError::Remote {
            status: Some(status),
            message,
        })
    }

    async fn send_text(&self, builder: RequestBuilder, url: &Url) -> Result<String, ApiError> {
        let response: Response = self.send(builder, url).await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl SolicitationApi for HttpSolicitationApi {
    async fn create(
        &self,
        token: &str,
        request: SubmitRequest,
    ) -> Result<Solicitation, ApiError> {
        let (builder, url) = self.request(Method::POST, token, &["solicitacoes"])?;
        let response: Response = self
            .send(builder.multipart(submit_form(request)?), &url)
            .await?;
        Ok(response.json::<Solicitation>().await?)
    }

    async fn edit(
        &self,
        token: &str,
        solicitation_id: i64,
        request: SubmitRequest,
    ) -> Result<String, ApiError> {
        let id: String = solicitation_id.to_string();
        let (builder, url) = self.request(Method::PATCH, token, &["solicitacoes", &id])?;
        self.send_text(builder.multipart(submit_form(request)?), &url)
            .await
    }

    async fn toggle_status(&self, token: &str, solicitation_id: i64) -> Result<String, ApiError> {
        let id: String = solicitation_id.to_string();
        let (builder, url) =
            self.request(Method::PATCH, token, &["solicitacoes", &id, "status"])?;
        self.send_text(builder, &url).await
    }

    async fn delete(&self, token: &str, solicitation_id: i64) -> Result<String, ApiError> {
        let id: String = solicitation_id.to_string();
        let (builder, url) = self.request(Method::DELETE, token, &["solicitacoes", &id])?;
        self.send_text(builder, &url).await
    }

    async fn fetch(&self, token: &str, solicitation_id: i64) -> Result<Solicitation, ApiError> {
        let id: String = solicitation_id.to_string();
        let (builder, url) = self.request(Method::GET, token, &["solicitacoes", &id])?;
        let response: Response = self.send(builder, &url).await?;
        Ok(response.json::<Solicitation>().await?)
    }

    async fn list(
        &self,
        token: &str,
        filter: &ListFilter,
    ) -> Result<Vec<Solicitation>, ApiError> {
        let params: Vec<(&'static str, String)> = filter.to_query()?;
        let (builder, url) = self.request(Method::GET, token, &["solicitacoes"])?;
        let response: Response = self.send(builder.query(&params), &url).await?;
        Ok(response.json::<Vec<Solicitation>>().await?)
    }

    async fn list_copies(
        &self,
        token: &str,
        solicitation_id: i64,
        query: Option<&str>,
    ) -> Result<Vec<DocumentCopy>, ApiError> {
        let id: String = solicitation_id.to_string();
        let (mut builder, url) = self.request(Method::GET, token, &["copias", &id])?;
        if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
            builder = builder.query(&[("query", query.trim())]);
        }
        let response: Response = self.send(builder, &url).await?;
        Ok(response.json::<Vec<DocumentCopy>>().await?)
    }

    async fn comment(
        &self,
        token: &str,
        solicitation_id: i64,
        request: &CommentRequest,
    ) -> Result<String, ApiError> {
        let id: String = solicitation_id.to_string();
        let (builder, url) =
            self.request(Method::PATCH, token, &["solicitacoes", &id, "comentario"])?;
        self.send_text(builder.json(request), &url).await
    }

    async fn download(
        &self,
        token: &str,
        solicitation_id: i64,
        file_name: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let id: String = solicitation_id.to_string();
        let (builder, url) = self.request(Method::GET, token, &["solicitacoes", &id, file_name])?;
        let response: Response = self.send(builder, &url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn report(
        &self,
        token: &str,
        solicitations: &[Solicitation],
    ) -> Result<String, ApiError> {
        let (builder, url) = self.request(Method::POST, token, &["relatorio"])?;
        self.send_text(builder.json(solicitations), &url).await
    }
}

/// Appends path segments to the base URL, percent-encoding each one.
pub(crate) fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url: Url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidConfig {
            message: format!("base URL '{base}' cannot carry a path"),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Extracts the user-facing message from an error response body.
///
/// JSON bodies with a `message` field yield that field; any other non-blank
/// body is returned as is.
pub(crate) fn remote_message(status: u16, body: &str) -> String {
    let from_json: Option<String> = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        });

    from_json.unwrap_or_else(|| {
        let trimmed: &str = body.trim();
        if trimmed.is_empty() {
            format!("Request failed with status {status}")
        } else {
            trimmed.to_string()
        }
    })
}

/// Returns the MIME type used when uploading a file with this extension.
pub(crate) fn mime_for(file: &FileBlob) -> &'static str {
    match file.extension().as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "odt" => "application/vnd.oasis.opendocument.text",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

fn submit_form(request: SubmitRequest) -> Result<Form, ApiError> {
    let json: String = serde_json::to_string(&request.payload)?;
    let mut form: Form = Form::new().part(PAYLOAD_PART, Part::text(json).mime_str("application/json")?);

    for file in request.files {
        let mime: &'static str = mime_for(&file);
        let part: Part = Part::bytes(file.content)
            .file_name(file.file_name)
            .mime_str(mime)?;
        form = form.part(FILES_PART, part);
    }

    Ok(form)
}
