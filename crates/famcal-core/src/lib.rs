//! famcal-core: Family Calendar Client Core Library
//!
//! Shared domain models, configuration, session handling and the
//! UTC-coercing timestamp parser used by every crate in the workspace.

pub mod config;
pub mod error;
pub mod session;
pub mod time;
pub mod types;

pub use config::{ApiConfig, Config, GeocodeConfig, SessionConfig};
pub use error::{Error, Result};
pub use session::{Session, SessionStore};
pub use types::{Budget, Event, EventDraft, Preferences, ShoppingItem, Todo, TravelPreferences, User};
