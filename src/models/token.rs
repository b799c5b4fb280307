use serde::Deserialize;
use std::fmt;

/// Opaque access credential issued by the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn present(&self) -> bool {
        !self.0.is_empty()
    }
}

// Keep credentials out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.present() {
            f.write_str("Token(<redacted>)")
        } else {
            f.write_str("Token(<empty>)")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}
