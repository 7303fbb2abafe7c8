//! famcal-api: REST client for the household backend
//!
//! Events, family roster, shopping list, to-dos and the auth/credential
//! lifecycle, all consumed as JSON over HTTP.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use client::FamilyApi;
pub use error::{ApiError, Result};
pub use types::{
    Acknowledgement, EmailPayload, PasswordResetPayload, RegisterPayload, ShoppingItemDraft,
    TodoDraft, TokenResponse,
};
