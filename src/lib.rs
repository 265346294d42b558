//! Flatwiki - a minimal wiki that stores each page as a flat file
//!
//! Pages are addressed by a letters-and-digits title, persisted as
//! `{title}.txt` and rendered through two HTML templates (`view`, `edit`).

pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

// Re-export commonly used items
pub use config::Config;
pub use errors::{StoreError, WikiError};
pub use services::{PageStore, TemplateService, Title, TitleValidator, View};
pub use types::{AppState, Page};

/// Build the route table
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/view/*title", get(handlers::handle_view))
        .route("/edit/*title", get(handlers::handle_edit))
        .route("/save/*title", post(handlers::handle_save))
        .fallback(handlers::handle_fallback)
        .layer(middleware::from_fn(logger::log_request))
        .with_state(state)
}
