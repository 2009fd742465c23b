// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use reqwest::Url;
use std::time::Duration;

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Configuration for the remote solicitation API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL every endpoint path is appended to.
    pub base_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// User-Agent header sent with requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Creates a configuration for the given server with default settings.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: Self::default_user_agent(),
        }
    }

    fn default_user_agent() -> String {
        format!("grafica/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parses the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if the URL is empty, malformed,
    /// cannot carry a path, or is not http(s).
    pub fn parsed_base_url(&self) -> Result<Url, ApiError> {
        let trimmed: &str = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidConfig {
                message: String::from("base URL cannot be empty"),
            });
        }

        let url: Url = Url::parse(trimmed).map_err(|err| ApiError::InvalidConfig {
            message: format!("base URL '{trimmed}' is invalid: {err}"),
        })?;

        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig {
                message: format!("base URL '{trimmed}' must be an http(s) URL"),
            });
        }

        Ok(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if the base URL is unusable or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), ApiError> {
        self.parsed_base_url()?;

        if self.timeout.is_zero() {
            return Err(ApiError::InvalidConfig {
                message: String::from("timeout must be greater than zero"),
            });
        }

        Ok(())
    }
}
