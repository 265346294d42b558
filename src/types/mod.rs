use std::sync::Arc;

use crate::services::{PageStore, TemplateService, Title, TitleValidator};

/// A wiki page: a validated title and its raw content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self { title, body: body.into() }
    }

    /// Page shell used when editing a title that has no stored content yet
    pub fn empty(title: Title) -> Self {
        Self { title, body: Vec::new() }
    }
}

/// Application state shared across all handlers.
///
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PageStore>,
    pub templates: Arc<TemplateService>,
    pub validator: Arc<TitleValidator>,
}

impl AppState {
    pub fn new(store: PageStore, templates: TemplateService) -> Self {
        Self {
            store: Arc::new(store),
            templates: Arc::new(templates),
            validator: Arc::new(TitleValidator::new()),
        }
    }
}
