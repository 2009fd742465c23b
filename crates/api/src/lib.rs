// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;
mod coordinator;
mod error;
mod http;
mod remote;
mod request_response;
mod session;

#[cfg(test)]
mod tests;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use coordinator::{
    Completion, SolicitationSyncCoordinator, SubmitMode, SubmitOutcome, SyncOutcome,
};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use http::{FILES_PART, HttpSolicitationApi, PAYLOAD_PART, TRACING_TARGET};
pub use remote::SolicitationApi;
pub use request_response::{
    CommentRequest, ListFilter, SolicitationPayload, SubmitRequest, parse_date,
};
pub use session::{IdentityProvider, Session, StaticIdentity};
