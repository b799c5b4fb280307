use crate::error::{AppError, Result};
use crate::services::backend::IdentityProvider;
use crate::services::error_channel::ErrorChannel;
use crate::services::token_store::TokenStore;
use std::sync::Arc;

/// Login and logout. The only writer of the token store.
pub struct AuthService {
    provider: Arc<dyn IdentityProvider>,
    tokens: Arc<TokenStore>,
    errors: Arc<ErrorChannel>,
}

impl AuthService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        tokens: Arc<TokenStore>,
        errors: Arc<ErrorChannel>,
    ) -> Self {
        Self {
            provider,
            tokens,
            errors,
        }
    }

    /// URL the user has to visit to grant access.
    pub async fn begin_login(&self) -> Result<String> {
        self.errors.clear().await;
        match self.provider.authorize_url().await {
            Ok(url) => Ok(url),
            Err(e) => {
                let err = AppError::LoginFailed(e);
                self.errors.report(&err).await;
                Err(err)
            }
        }
    }

    /// Trade the authorization code from the callback for an access token
    /// and store it.
    pub async fn complete_login(&self, code: &str) -> Result<()> {
        self.errors.clear().await;

        let code = code.trim();
        if code.is_empty() {
            let err = AppError::Validation("No authorization code received".to_string());
            self.errors.report(&err).await;
            return Err(err);
        }

        let token = match self.provider.exchange_code(code).await {
            Ok(token) => token,
            Err(e) => {
                let err = AppError::LoginFailed(e);
                self.errors.report(&err).await;
                return Err(err);
            }
        };

        self.tokens.set_token(token).await?;
        tracing::info!("Logged in");
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.tokens.clear().await?;
        self.errors.clear().await;
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn is_logged_in(&self) -> bool {
        self.tokens.has_token().await
    }
}
