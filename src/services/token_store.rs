use crate::error::{AppError, Result};
use crate::models::Token;
use crate::services::local_storage::LocalStorage;
use tokio::sync::RwLock;

/// Local-storage key the access token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "spotify_access_token";

/// Holds the access token for the session. Built once at startup and shared
/// by reference with whatever needs to read it.
pub struct TokenStore {
    storage: LocalStorage,
    current: RwLock<Option<Token>>,
}

impl TokenStore {
    /// Read any persisted token. A token left by a previous run is picked up
    /// as-is; there is no expiry tracking.
    pub async fn init(storage: LocalStorage) -> Result<Self> {
        let current = storage
            .get_item(TOKEN_STORAGE_KEY)
            .await?
            .map(Token::new)
            .filter(Token::present);

        tracing::info!(
            "Token store initialized from {} ({})",
            storage.path().display(),
            if current.is_some() { "token present" } else { "no token" }
        );

        Ok(Self {
            storage,
            current: RwLock::new(current),
        })
    }

    pub async fn has_token(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn get_token(&self) -> Result<Token> {
        self.current.read().await.clone().ok_or(AppError::AuthMissing)
    }

    pub async fn set_token(&self, token: Token) -> Result<()> {
        if !token.present() {
            return self.clear().await;
        }

        let mut current = self.current.write().await;
        self.storage.set_item(TOKEN_STORAGE_KEY, token.value()).await?;
        *current = Some(token);
        tracing::info!("Access token stored");
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        let mut current = self.current.write().await;
        self.storage.remove_item(TOKEN_STORAGE_KEY).await?;
        *current = None;
        tracing::info!("Access token cleared");
        Ok(())
    }
}
