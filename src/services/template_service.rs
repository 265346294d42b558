use std::error::Error as _;
use std::fmt;
use std::path::Path;
use log::{debug, info};
use tera::{Context, Tera};
use crate::errors::WikiError;
use crate::types::Page;

/// The two views a page can be rendered as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    View,
    Edit,
}

impl View {
    pub fn name(self) -> &'static str {
        match self {
            View::View => "view",
            View::Edit => "edit",
        }
    }

    /// Registered template name; the `.html` suffix turns on autoescaping
    pub fn template_name(self) -> &'static str {
        match self {
            View::View => "view.html",
            View::Edit => "edit.html",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiled view/edit templates, loaded once and shared read-only
pub struct TemplateService {
    tera: Tera,
}

impl TemplateService {
    /// Load `view.html` and `edit.html` from `dir`.
    ///
    /// Either file missing or failing to parse is an error; callers treat it
    /// as fatal at startup.
    pub fn load(dir: &Path) -> Result<Self, WikiError> {
        let view_path = dir.join(View::View.template_name());
        let edit_path = dir.join(View::Edit.template_name());
        debug!("Loading templates from {:?} and {:?}", view_path, edit_path);

        let mut tera = Self::engine();
        tera.add_template_files(vec![
            (view_path, Some(View::View.template_name())),
            (edit_path, Some(View::Edit.template_name())),
        ])
        .map_err(|e| WikiError::TemplateLoad(error_chain(&e)))?;

        info!("Loaded templates from {:?}", dir);
        Ok(Self { tera })
    }

    /// Build the template set from in-memory sources
    pub fn from_sources(view_src: &str, edit_src: &str) -> Result<Self, WikiError> {
        let mut tera = Self::engine();
        tera.add_raw_templates(vec![
            (View::View.template_name(), view_src),
            (View::Edit.template_name(), edit_src),
        ])
        .map_err(|e| WikiError::TemplateLoad(error_chain(&e)))?;
        Ok(Self { tera })
    }

    fn engine() -> Tera {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html"]);
        tera
    }

    /// Render a page into a complete HTML document.
    ///
    /// The output is fully built before it is returned, so a failure never
    /// leaves partial markup behind.
    pub fn render(&self, view: View, page: &Page) -> Result<String, WikiError> {
        let mut context = Context::new();
        context.insert("title", page.title.as_str());
        context.insert("body", &String::from_utf8_lossy(&page.body));

        self.tera
            .render(view.template_name(), &context)
            .map_err(|e| WikiError::Render(error_chain(&e)))
    }
}

// tera keeps the useful detail (parse position, missing variable) in the source chain
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
