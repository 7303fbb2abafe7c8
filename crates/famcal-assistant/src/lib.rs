//! famcal-assistant: natural-language assistant client
//!
//! Sends free text to the backend assistant and returns the structured
//! events, shopping items and to-dos it extracts, plus real-world event
//! suggestions from the search endpoint.

pub mod client;
pub mod error;
pub mod types;

pub use client::AssistantClient;
pub use error::{AssistantError, Result};
pub use types::{
    EventSuggestion, InteractRequest, InteractResponse, ParsedEvent, ParsedShoppingItem,
    ParsedTodo, SearchRequest, SearchResponse,
};
