//! famcal-geo: location search
//!
//! OpenStreetMap Nominatim client plus the debounced lookup wrapper used
//! by the location field in the event form.

pub mod debounce;
pub mod error;
pub mod nominatim;

pub use debounce::{DebouncedSearch, MIN_QUERY_CHARS};
pub use error::{GeoError, Result};
pub use nominatim::{GeoClient, Place};
