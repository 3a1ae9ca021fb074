//! JWT token persistence and the authenticated request helpers.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{check_status, CatalogClient};
use crate::error::ClientError;
use crate::types::{LoginRequest, RefreshRequest, RefreshResponse, TokenPair};

/// On-disk shape of the token file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access: String,
    pub refresh: String,
    pub saved_at: DateTime<Utc>,
}

/// JSON file holding the current access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored tokens. A missing file means "not logged in".
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TokenStoreIo`] if the file exists but cannot be
    /// read, or [`ClientError::TokenStoreParse`] if it is not valid JSON.
    pub fn load(&self) -> Result<Option<StoredTokens>, ClientError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ClientError::TokenStoreParse {
                path: self.path.display().to_string(),
                source: e,
            })
    }

    /// Writes `tokens`, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TokenStoreIo`] on any filesystem failure.
    pub fn save(&self, tokens: &TokenPair) -> Result<StoredTokens, ClientError> {
        let stored = StoredTokens {
            access: tokens.access.clone(),
            refresh: tokens.refresh.clone(),
            saved_at: Utc::now(),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(&stored).map_err(|e| {
            ClientError::TokenStoreParse {
                path: self.path.display().to_string(),
                source: e,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        Ok(stored)
    }

    /// Removes the token file. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TokenStoreIo`] if the file exists but cannot be
    /// removed.
    pub fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> ClientError {
        ClientError::TokenStoreIo {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CatalogClient {
    /// Exchanges credentials for a token pair and persists it.
    ///
    /// # Errors
    ///
    /// Non-2xx responses (bad credentials included) surface as
    /// [`ClientError::UnexpectedStatus`]; persistence failures as
    /// [`ClientError::TokenStoreIo`].
    pub async fn login(
        &self,
        store: &TokenStore,
        username: &str,
        password: &str,
    ) -> Result<StoredTokens, ClientError> {
        let url = self.endpoint("token/")?;
        let pair: TokenPair = self
            .post_json(&url, &LoginRequest { username, password }, "login")
            .await?;
        let stored = store.save(&pair)?;
        tracing::info!(username, path = %store.path().display(), "logged in");
        Ok(stored)
    }

    /// Obtains a new access token from the stored refresh token.
    ///
    /// Any failure of the refresh call clears the store, so the next
    /// authenticated call requires a fresh login.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] when nothing is stored, or
    /// the refresh call's error after clearing the store.
    pub async fn refresh_access_token(&self, store: &TokenStore) -> Result<String, ClientError> {
        let Some(current) = store.load()? else {
            return Err(ClientError::NotAuthenticated);
        };
        let url = self.endpoint("token/refresh/")?;
        let refreshed: Result<RefreshResponse, ClientError> = self
            .post_json(
                &url,
                &RefreshRequest {
                    refresh: &current.refresh,
                },
                "token refresh",
            )
            .await;

        match refreshed {
            Ok(response) => {
                let pair = TokenPair {
                    access: response.access,
                    refresh: response.refresh.unwrap_or(current.refresh),
                };
                store.save(&pair)?;
                Ok(pair.access)
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed, clearing stored tokens");
                store.clear()?;
                Err(e)
            }
        }
    }

    /// GET `path` with the stored access token as a Bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] when no token is stored, plus
    /// the usual request errors.
    pub async fn get_authenticated(
        &self,
        store: &TokenStore,
        path: &str,
    ) -> Result<Value, ClientError> {
        let tokens = store.load()?.ok_or(ClientError::NotAuthenticated)?;
        let url = self.endpoint(path.trim_start_matches('/'))?;
        let request = self.client.get(url.clone()).bearer_auth(&tokens.access);
        self.get_json(request, &url, "authenticated request").await
    }

    async fn post_json<B, R>(&self, url: &Url, body: &B, context: &str) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: serde::de::DeserializeOwned,
    {
        let response = self.client.post(url.clone()).json(body).send().await?;
        check_status(response.status(), url)?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::Deserialize {
            context: format!("{context} from {url}"),
            source: e,
        })
    }
}
