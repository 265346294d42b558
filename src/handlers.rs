use axum::{
    body::Bytes,
    extract::{Path as AxumPath, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::errors::{StoreError, WikiError};
use crate::services::View;
use crate::types::{AppState, Page};
use crate::utils::{form_value, is_urlencoded};

const BODY_FIELD: &str = "body";

/// Handle root path requests
pub async fn handle_root() -> &'static str {
    "Wiki server running"
}

/// Show a page, sending the client to the editor when it cannot be loaded
pub async fn handle_view(
    State(state): State<AppState>,
    AxumPath(raw_title): AxumPath<String>,
) -> Result<Response, WikiError> {
    let title = state.validator.validate(&raw_title)?;
    log::info!("Rendering {}", title);

    // Missing and unreadable pages both go to the editor
    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(e) => {
            log_load_failure(&e);
            return Ok(found(&format!("/edit/{}", title)));
        }
    };

    let html = state.templates.render(View::View, &page)?;
    Ok(Html(html).into_response())
}

/// Show the edit form, empty when the page does not exist yet
pub async fn handle_edit(
    State(state): State<AppState>,
    AxumPath(raw_title): AxumPath<String>,
) -> Result<Response, WikiError> {
    let title = state.validator.validate(&raw_title)?;
    log::info!("Editing {}", title);

    let page = state
        .store
        .load(&title)
        .unwrap_or_else(|e| {
            log_load_failure(&e);
            Page::empty(title)
        });

    let html = state.templates.render(View::Edit, &page)?;
    Ok(Html(html).into_response())
}

/// Store the posted body and redirect to the page view.
///
/// The `body` field is looked up in the urlencoded request body first, then
/// in the query string; when neither has it the page is saved empty.
pub async fn handle_save(
    State(state): State<AppState>,
    AxumPath(raw_title): AxumPath<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    payload: Bytes,
) -> Result<Response, WikiError> {
    let title = state.validator.validate(&raw_title)?;
    log::info!("Saving {}", title);

    let posted = if is_urlencoded(&headers) {
        form_value(&payload, BODY_FIELD)
    } else {
        None
    };
    let body = posted
        .or_else(|| query.and_then(|q| form_value(q.as_bytes(), BODY_FIELD)))
        .unwrap_or_default();
    let location = format!("/view/{}", title);
    let page = Page::new(title, body);
    state.store.save(&page).map_err(WikiError::Save)?;

    Ok(found(&location))
}

/// Anything outside the routed prefixes
pub async fn handle_fallback() -> WikiError {
    WikiError::NotFound
}

// A page that does not exist yet is the normal path into the editor
fn log_load_failure(err: &StoreError) {
    if err.is_missing() {
        log::debug!("{}", err);
    } else {
        log::warn!("Treating unreadable page as new: {}", err);
    }
}

/// 302 Found with a Location header
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
