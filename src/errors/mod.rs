use std::io;
use std::path::PathBuf;
use axum::{http::StatusCode, response::{IntoResponse, Response}};

/// Failures of the page store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True when the page file simply does not exist yet
    pub fn is_missing(&self) -> bool {
        match self {
            StoreError::Load { source, .. } => source.kind() == io::ErrorKind::NotFound,
            StoreError::Save { .. } => false,
        }
    }
}

/// Custom error types for the wiki application
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("invalid page title: {0:?}")]
    InvalidTitle(String),
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Save(StoreError),
    #[error("render error: {0}")]
    Render(String),
    #[error("template load error: {0}")]
    TemplateLoad(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl WikiError {
    /// HTTP status this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            WikiError::InvalidTitle(_) | WikiError::NotFound => StatusCode::NOT_FOUND,
            WikiError::Save(_)
            | WikiError::Render(_)
            | WikiError::TemplateLoad(_)
            | WikiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
            (status, self.to_string()).into_response()
        } else {
            log::warn!("{}", self);
            (status, "404 page not found").into_response()
        }
    }
}
