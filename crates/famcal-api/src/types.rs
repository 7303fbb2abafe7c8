//! Request/response payloads for the household backend

use serde::{Deserialize, Serialize};

/// Response of `POST /api/auth/token` and `POST /api/auth/dev-login`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Body for `POST /api/auth/register` and `POST /api/auth/setup-invite`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Body for `POST /api/auth/forgot-password`
#[derive(Debug, Clone, Serialize)]
pub struct EmailPayload {
    pub email: String,
}

/// Body for `POST /api/auth/reset-password`
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetPayload {
    pub token: String,
    pub new_password: String,
}

/// Body for shopping-item writes
#[derive(Debug, Clone, Serialize)]
pub struct ShoppingItemDraft {
    pub name: String,
    pub category: String,
    pub is_bought: bool,
}

impl ShoppingItemDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: "General".to_string(),
            is_bought: false,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Body for to-do writes
#[derive(Debug, Clone, Serialize)]
pub struct TodoDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_user_id: Option<i64>,
    pub reward_amount: i64,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: "pending".to_string(),
            due_date: None,
            assigned_to_user_id: None,
            reward_amount: 0,
        }
    }
}

/// Generic `{"message": ...}` acknowledgement some endpoints return
#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub message: Option<String>,
}
