use docvault_shared::dto::TokenPair;
use serde::{Deserialize, Serialize};

use super::User;

/// Response of login and register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
    pub tokens: TokenPair,
}
