//! Web layer for the dashboard.
//!
//! Serves the raw snapshot and the derived view model as JSON for a
//! renderer to poll.

mod dto;
mod routes;
mod state;

pub use dto::ErrorResponse;
pub use routes::{AppError, create_router, is_localhost_origin};
pub use state::AppState;
