// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session context.
//!
//! The identity provider owns the credential lifecycle (acquire, store,
//! expire). A [`Session`] is the explicit snapshot the coordinator works
//! with: it is created once the user has been fetched and checked, and ended
//! on logout by revoking the credential.

use crate::error::{ApiError, translate_domain_error};
use async_trait::async_trait;
use grafica_domain::{User, validate_user};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// The contract offered by the institution's identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the current bearer token.
    async fn token(&self) -> Result<String, ApiError>;

    /// Returns whether a non-expired credential is held.
    fn is_valid(&self) -> bool;

    /// Discards the held credential.
    async fn revoke(&self) -> Result<(), ApiError>;

    /// Fetches the user the credential belongs to.
    async fn current_user(&self) -> Result<User, ApiError>;
}

/// An identity backed by a fixed token and user.
///
/// Used when the token was obtained out of band (command line, environment).
#[derive(Debug)]
pub struct StaticIdentity {
    token: String,
    user: User,
    revoked: AtomicBool,
}

impl StaticIdentity {
    /// Creates an identity holding the given credential.
    #[must_use]
    pub fn new(token: &str, user: User) -> Self {
        Self {
            token: token.to_string(),
            user,
            revoked: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn token(&self) -> Result<String, ApiError> {
        if !self.is_valid() {
            return Err(ApiError::Unauthenticated {
                reason: String::from("token has been revoked or was never set"),
            });
        }
        Ok(self.token.clone())
    }

    fn is_valid(&self) -> bool {
        !self.revoked.load(Ordering::SeqCst) && !self.token.trim().is_empty()
    }

    async fn revoke(&self) -> Result<(), ApiError> {
        self.revoked.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        Ok(self.user.clone())
    }
}

/// An authenticated user and the token their calls carry.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: User,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Establishes a session from an identity provider.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The provider holds no valid credential
    /// - The token or user cannot be fetched
    /// - The user lacks a common name or registration number
    pub async fn establish<I>(identity: &I) -> Result<Self, ApiError>
    where
        I: IdentityProvider + ?Sized,
    {
        if !identity.is_valid() {
            return Err(ApiError::Unauthenticated {
                reason: String::from("identity provider holds no valid credential"),
            });
        }

        let token: String = identity.token().await?;
        let user: User = identity.current_user().await?;
        validate_user(&user).map_err(translate_domain_error)?;

        info!(
            user = user.common_name.as_deref().unwrap_or_default(),
            "Session established"
        );

        Ok(Self { token, user })
    }

    /// Ends the session, revoking the credential it was built from.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to revoke the credential.
    pub async fn end<I>(self, identity: &I) -> Result<(), ApiError>
    where
        I: IdentityProvider + ?Sized,
    {
        identity.revoke().await?;
        debug!("Session ended");
        Ok(())
    }

    /// Returns the bearer token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the authenticated user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }
}
