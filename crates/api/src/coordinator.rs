// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Solicitation synchronisation.
//!
//! The coordinator turns registry state into remote calls and feeds the
//! server's answers back as fresh registry state. Every local precondition
//! is checked before the first call is issued, compositions run strictly in
//! sequence, and nothing is mutated ahead of the server's confirmation.
//!
//! Once [`SolicitationSyncCoordinator::dispose`] has been called, in-flight
//! and later calls resolve to [`Completion::Detached`] so a late response
//! never reaches a page that is no longer shown.

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::remote::SolicitationApi;
use crate::request_response::{CommentRequest, ListFilter, SubmitRequest};
use crate::session::Session;
use grafica::{Command, EditorMode, Outcome, RegistryState, TransitionResult, apply};
use grafica_domain::{DocumentCopy, Solicitation, TableRow, validate_deadline, validate_user};
use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// How a remote call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<T> {
    /// The call finished and its result may be applied.
    Completed(T),
    /// The coordinator was disposed; the result must be ignored.
    Detached,
}

impl<T> Completion<T> {
    /// Returns the result, or `None` when detached.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Detached => None,
        }
    }

    /// Returns whether the result was dropped.
    #[must_use]
    pub const fn is_detached(&self) -> bool {
        matches!(self, Self::Detached)
    }
}

/// Which page a submission comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// The new-solicitation page: copies are batched and created at once.
    NewSolicitation,
    /// The edit page of a persisted solicitation.
    EditSolicitation,
}

impl FromStr for SubmitMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Self::NewSolicitation),
            "edit" => Ok(Self::EditSolicitation),
            other => Err(ApiError::InvalidPageState {
                reason: format!("unknown submit mode '{other}'"),
            }),
        }
    }
}

/// The result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new solicitation was created. The registry has been cleared and the
    /// caller should return to the solicitation list.
    Created {
        /// The server's view of the new solicitation.
        solicitation: Solicitation,
        /// The cleared registry.
        registry: RegistryState,
    },
    /// An existing solicitation was updated and re-fetched.
    Edited {
        /// The server's confirmation message.
        message: String,
        /// The re-fetched solicitation.
        solicitation: Solicitation,
        /// The registry reloaded from the re-fetched solicitation.
        registry: RegistryState,
    },
}

impl SubmitOutcome {
    /// Returns whether the caller should navigate back to the list view.
    #[must_use]
    pub const fn navigates_to_list(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    /// Returns the registry to display after the submission.
    #[must_use]
    pub const fn registry(&self) -> &RegistryState {
        match self {
            Self::Created { registry, .. } | Self::Edited { registry, .. } => registry,
        }
    }
}

/// The result of applying a command to a persisted solicitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The command did not touch the copy set; nothing was sent.
    Local {
        /// The registry after the command.
        registry: RegistryState,
        /// What the command did.
        outcome: Outcome,
    },
    /// The change was pushed and the registry reloaded from the server.
    Synced {
        /// The reloaded registry.
        registry: RegistryState,
        /// What the command did locally before the push.
        outcome: Outcome,
        /// The re-fetched solicitation.
        solicitation: Solicitation,
    },
    /// The last copy was removed, so the whole solicitation was deleted.
    SolicitationDeleted {
        /// The deleted solicitation.
        solicitation_id: i64,
        /// The server's confirmation message.
        message: String,
    },
}

/// Counts one in-flight call for as long as it lives.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn start(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Orchestrates the remote lifecycle of solicitations.
pub struct SolicitationSyncCoordinator<A> {
    api: A,
    session: Session,
    cancel: CancellationToken,
    in_flight: AtomicUsize,
}

impl<A> std::fmt::Debug for SolicitationSyncCoordinator<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolicitationSyncCoordinator")
            .field("session", &self.session)
            .field("disposed", &self.cancel.is_cancelled())
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<A: SolicitationApi> SolicitationSyncCoordinator<A> {
    /// Creates a coordinator acting for the given session.
    #[must_use]
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            cancel: CancellationToken::new(),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Returns the session the coordinator acts for.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the remote API.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Returns whether any remote call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Returns whether the coordinator has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Detaches every pending and future call.
    pub fn dispose(&self) {
        debug!("Disposing solicitation coordinator");
        self.cancel.cancel();
    }

    async fn run<T, F>(&self, operation: &'static str, call: F) -> Result<Completion<T>, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.cancel.is_cancelled() {
            debug!(operation, "Coordinator disposed, call not issued");
            return Ok(Completion::Detached);
        }

        let _loading: LoadingGuard<'_> = LoadingGuard::start(&self.in_flight);

        let result: Result<T, ApiError> = tokio::select! {
            biased;

            () = self.cancel.cancelled() => {
                debug!(operation, "Coordinator disposed, late completion dropped");
                return Ok(Completion::Detached);
            }

            result = call => result,
        };

        if self.cancel.is_cancelled() {
            debug!(operation, "Coordinator disposed, late completion dropped");
            return Ok(Completion::Detached);
        }

        match result {
            Ok(value) => Ok(Completion::Completed(value)),
            Err(err) => {
                warn!(operation, error = %err, "Remote call failed");
                Err(err)
            }
        }
    }

    fn ensure_user(&self) -> Result<(), ApiError> {
        validate_user(self.session.user()).map_err(translate_domain_error)
    }

    /// Submits the registry as a new solicitation or as an edit.
    ///
    /// A new solicitation clears the registry on success. An edit keeps it
    /// open and reloads it from a re-fetch, issued only after the edit
    /// succeeded. On any failure the caller's registry is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error, without issuing any call, if:
    /// - The mode does not match the registry (`InvalidPageState`)
    /// - An overwrite decision is pending (`InvalidPageState`)
    /// - There are no copies, or a digital copy lacks its file (`EmptyCopySet`)
    /// - The deadline or sheet total is zero (`InvalidDeadline`)
    /// - The session user is incomplete (`MissingUser`)
    ///
    /// Returns `ApiError::Remote` if a remote call fails.
    pub async fn submit(
        &self,
        mode: SubmitMode,
        registry: &RegistryState,
        deadline: u32,
    ) -> Result<Completion<SubmitOutcome>, ApiError> {
        if registry.overwrite().is_awaiting() {
            return Err(ApiError::InvalidPageState {
                reason: String::from("an overwrite confirmation is pending"),
            });
        }

        match (mode, registry.mode()) {
            (SubmitMode::NewSolicitation, EditorMode::NewSolicitation) => {
                self.submit_new(registry, deadline).await
            }
            (SubmitMode::EditSolicitation, EditorMode::EditExisting { solicitation_id }) => {
                self.submit_edit(registry, solicitation_id, deadline).await
            }
            (mode, editor) => Err(ApiError::InvalidPageState {
                reason: format!("{mode:?} submission from a {editor:?} registry"),
            }),
        }
    }

    fn check_submission(&self, registry: &RegistryState, deadline: u32) -> Result<(), ApiError> {
        if registry.is_empty() {
            return Err(ApiError::EmptyCopySet);
        }
        validate_deadline(deadline, registry.total_page_count()).map_err(translate_domain_error)?;
        self.ensure_user()
    }

    async fn submit_new(
        &self,
        registry: &RegistryState,
        deadline: u32,
    ) -> Result<Completion<SubmitOutcome>, ApiError> {
        let files_match: bool = registry
            .copies()
            .iter()
            .zip(registry.pending_files())
            .all(|(copy, file)| copy.is_physical_file || file.is_some());
        if registry.pending_files().len() != registry.len() || !files_match {
            return Err(ApiError::EmptyCopySet);
        }
        self.check_submission(registry, deadline)?;

        let request: SubmitRequest = SubmitRequest::from_registry(registry, deadline);
        let token: &str = self.session.token();
        info!(
            copies = registry.len(),
            files = request.files.len(),
            total_page_count = registry.total_page_count(),
            deadline,
            "Creating solicitation"
        );

        let completion: Completion<Solicitation> = self
            .run("create", self.api.create(token, request))
            .await?;

        Ok(match completion {
            Completion::Completed(solicitation) => {
                info!(solicitation_id = solicitation.id, "Solicitation created");
                Completion::Completed(SubmitOutcome::Created {
                    solicitation,
                    registry: RegistryState::new(),
                })
            }
            Completion::Detached => Completion::Detached,
        })
    }

    async fn submit_edit(
        &self,
        registry: &RegistryState,
        solicitation_id: i64,
        deadline: u32,
    ) -> Result<Completion<SubmitOutcome>, ApiError> {
        self.check_submission(registry, deadline)?;

        let request: SubmitRequest = SubmitRequest::from_registry(registry, deadline);
        info!(
            solicitation_id,
            copies = registry.len(),
            files = request.files.len(),
            "Editing solicitation"
        );

        let completion: Completion<(String, Solicitation)> = self
            .run("edit", self.edit_then_fetch(solicitation_id, request))
            .await?;

        let Completion::Completed((message, solicitation)) = completion else {
            return Ok(Completion::Detached);
        };
        let registry: RegistryState =
            RegistryState::from_solicitation(&solicitation).map_err(translate_core_error)?;

        Ok(Completion::Completed(SubmitOutcome::Edited {
            message,
            solicitation,
            registry,
        }))
    }

    async fn edit_then_fetch(
        &self,
        solicitation_id: i64,
        request: SubmitRequest,
    ) -> Result<(String, Solicitation), ApiError> {
        let token: &str = self.session.token();
        let message: String = self.api.edit(token, solicitation_id, request).await?;
        let solicitation: Solicitation = self.api.fetch(token, solicitation_id).await?;
        Ok((message, solicitation))
    }

    /// Applies a command to a persisted solicitation's registry.
    ///
    /// Commands that change the copy set are pushed at once and the registry
    /// is reloaded from the server. Removing the last copy deletes the
    /// solicitation instead. Other commands (duplicate found, declined
    /// overwrite, deadline selection) stay local.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is not editing a persisted
    /// solicitation, the command is rejected locally, or a remote call fails.
    pub async fn apply_to_existing(
        &self,
        registry: &RegistryState,
        command: Command,
    ) -> Result<Completion<SyncOutcome>, ApiError> {
        let Some(solicitation_id) = registry.solicitation_id() else {
            return Err(ApiError::InvalidPageState {
                reason: String::from("registry is not editing a saved solicitation"),
            });
        };

        let transition: TransitionResult = apply(registry, command).map_err(translate_core_error)?;

        if let Outcome::LastCopyRemovalDeletesSolicitation { solicitation_id } = transition.outcome
        {
            info!(solicitation_id, "Last copy removed, deleting solicitation");
            let completion: Completion<String> = self.delete(solicitation_id).await?;
            return Ok(match completion {
                Completion::Completed(message) => {
                    Completion::Completed(SyncOutcome::SolicitationDeleted {
                        solicitation_id,
                        message,
                    })
                }
                Completion::Detached => Completion::Detached,
            });
        }

        if !transition.outcome.is_structural_change() {
            return Ok(Completion::Completed(SyncOutcome::Local {
                registry: transition.new_state,
                outcome: transition.outcome,
            }));
        }

        self.ensure_user()?;
        let request: SubmitRequest =
            SubmitRequest::from_registry(&transition.new_state, transition.new_state.deadline());
        debug!(
            solicitation_id,
            outcome = ?transition.outcome,
            "Pushing copy change"
        );

        let completion: Completion<(String, Solicitation)> = self
            .run("edit", self.edit_then_fetch(solicitation_id, request))
            .await?;

        let Completion::Completed((_, solicitation)) = completion else {
            return Ok(Completion::Detached);
        };
        let reloaded: RegistryState =
            RegistryState::from_solicitation(&solicitation).map_err(translate_core_error)?;

        Ok(Completion::Completed(SyncOutcome::Synced {
            registry: reloaded,
            outcome: transition.outcome,
            solicitation,
        }))
    }

    /// Removes one copy from a persisted solicitation.
    ///
    /// The deadline is passed through unchanged and the sheet total is
    /// recomputed over the remaining copies.
    ///
    /// # Errors
    ///
    /// Returns an error, without issuing any call, if:
    /// - The solicitation has no id or no copies (`InvalidSolicitation`)
    /// - No copy has the given id (`CopyNotFound`)
    /// - It is the only copy; delete the solicitation instead (`InvalidSolicitation`)
    ///
    /// Returns `ApiError::Remote` if the edit call fails.
    pub async fn remove_copy(
        &self,
        copy_id: i64,
        solicitation: &Solicitation,
    ) -> Result<Completion<String>, ApiError> {
        let working: Solicitation = Self::without_copy(copy_id, solicitation)?;
        let Some(solicitation_id) = working.id else {
            return Err(ApiError::InvalidSolicitation {
                reason: String::from("solicitation has not been saved"),
            });
        };

        info!(
            solicitation_id,
            copy_id,
            total_page_count = working.total_page_count,
            "Removing copy"
        );

        let request: SubmitRequest = SubmitRequest::from_solicitation(&working);
        self.run(
            "remove_copy",
            self.api.edit(self.session.token(), solicitation_id, request),
        )
        .await
    }

    fn without_copy(copy_id: i64, solicitation: &Solicitation) -> Result<Solicitation, ApiError> {
        if solicitation.id.is_none() {
            return Err(ApiError::InvalidSolicitation {
                reason: String::from("solicitation has not been saved"),
            });
        }
        if solicitation.copies.is_empty() {
            return Err(ApiError::InvalidSolicitation {
                reason: String::from("solicitation has no copies"),
            });
        }

        let position: usize = solicitation
            .copies
            .iter()
            .position(|copy| copy.id == Some(copy_id))
            .ok_or(ApiError::CopyNotFound { copy_id })?;

        if solicitation.copies.len() == 1 {
            return Err(ApiError::InvalidSolicitation {
                reason: String::from("removing the only copy deletes the solicitation"),
            });
        }

        let mut working: Solicitation = solicitation.clone();
        working.copies.remove(position);
        working.recompute_total_page_count();
        Ok(working)
    }

    /// Removes a copy, then re-fetches the solicitation once the removal
    /// has succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first error of either step; the re-fetch is never issued
    /// after a failed removal.
    pub async fn remove_copy_then_refetch(
        &self,
        copy_id: i64,
        solicitation: &Solicitation,
    ) -> Result<Completion<Solicitation>, ApiError> {
        let Completion::Completed(_) = self.remove_copy(copy_id, solicitation).await? else {
            return Ok(Completion::Detached);
        };
        let Some(solicitation_id) = solicitation.id else {
            return Err(ApiError::InvalidSolicitation {
                reason: String::from("solicitation has not been saved"),
            });
        };
        self.fetch(solicitation_id).await
    }

    /// Flips a solicitation between open and concluded.
    ///
    /// The solicitation is not cached; re-fetch it afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` if the call fails.
    pub async fn toggle_status(&self, solicitation_id: i64) -> Result<Completion<String>, ApiError> {
        info!(solicitation_id, "Toggling solicitation status");
        self.run(
            "toggle_status",
            self.api.toggle_status(self.session.token(), solicitation_id),
        )
        .await
    }

    /// Deletes a solicitation.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` if the call fails.
    pub async fn delete(&self, solicitation_id: i64) -> Result<Completion<String>, ApiError> {
        info!(solicitation_id, "Deleting solicitation");
        self.run(
            "delete",
            self.api.delete(self.session.token(), solicitation_id),
        )
        .await
    }

    /// Fetches one solicitation.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` if the call fails.
    pub async fn fetch(&self, solicitation_id: i64) -> Result<Completion<Solicitation>, ApiError> {
        self.run(
            "fetch",
            self.api.fetch(self.session.token(), solicitation_id),
        )
        .await
    }

    /// Lists solicitations as table rows.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for an inverted date window, or
    /// `ApiError::Remote` if the call fails.
    pub async fn list(&self, filter: &ListFilter) -> Result<Completion<Vec<TableRow>>, ApiError> {
        filter.to_query()?;
        let completion: Completion<Vec<Solicitation>> = self
            .run("list", self.api.list(self.session.token(), filter))
            .await?;

        Ok(match completion {
            Completion::Completed(solicitations) => Completion::Completed(
                solicitations
                    .into_iter()
                    .map(TableRow::Solicitation)
                    .collect(),
            ),
            Completion::Detached => Completion::Detached,
        })
    }

    /// Lists a solicitation's copies as table rows.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Remote` if the call fails.
    pub async fn list_copies(
        &self,
        solicitation_id: i64,
        query: Option<&str>,
    ) -> Result<Completion<Vec<TableRow>>, ApiError> {
        let completion: Completion<Vec<DocumentCopy>> = self
            .run(
                "list_copies",
                self.api
                    .list_copies(self.session.token(), solicitation_id, query),
            )
            .await?;

        Ok(match completion {
            Completion::Completed(copies) => Completion::Completed(
                copies
                    .into_iter()
                    .map(|copy| TableRow::Copy {
                        solicitation_id,
                        copy,
                    })
                    .collect(),
            ),
            Completion::Detached => Completion::Detached,
        })
    }

    /// Appends a comment to a solicitation's timeline.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for a blank message, without issuing
    /// a call, or `ApiError::Remote` if the call fails.
    pub async fn comment(
        &self,
        solicitation_id: i64,
        message: &str,
    ) -> Result<Completion<String>, ApiError> {
        let trimmed: &str = message.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("message"),
                message: String::from("comment cannot be empty"),
            });
        }

        let request: CommentRequest = CommentRequest {
            message: trimmed.to_string(),
        };
        self.run(
            "comment",
            self.api
                .comment(self.session.token(), solicitation_id, &request),
        )
        .await
    }

    /// Downloads a file attached to a solicitation.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for a blank file name, or
    /// `ApiError::Remote` if the call fails.
    pub async fn download(
        &self,
        solicitation_id: i64,
        file_name: &str,
    ) -> Result<Completion<Vec<u8>>, ApiError> {
        if file_name.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("fileName"),
                message: String::from("file name cannot be empty"),
            });
        }

        self.run(
            "download",
            self.api
                .download(self.session.token(), solicitation_id, file_name),
        )
        .await
    }

    /// Renders an HTML report over the given solicitations.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for an empty selection, or
    /// `ApiError::Remote` if the call fails.
    pub async fn report(&self, solicitations: &[Solicitation]) -> Result<Completion<String>, ApiError> {
        if solicitations.is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("solicitations"),
                message: String::from("select at least one solicitation"),
            });
        }

        info!(count = solicitations.len(), "Requesting report");
        self.run(
            "report",
            self.api.report(self.session.token(), solicitations),
        )
        .await
    }
}
