//! # filterbar - debounced search-and-filter bar synced to URL query parameters
//!
//! The library holds the control and its pieces; the `filterbar` binary mounts
//! it in an iced window and `filterbar-replay` drives it from a script.

pub mod app;
pub mod config;
pub mod debounce;
pub mod location;
pub mod replay;
pub mod router;
pub mod search;
pub mod ui;

pub use debounce::Debouncer;
pub use location::{Location, QueryParams};
pub use router::{MemoryRouter, Navigator};
pub use search::{Category, SearchControl};
