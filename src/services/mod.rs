pub mod page_service;
pub mod template_service;
pub mod title_service;

pub use page_service::PageStore;
pub use template_service::{TemplateService, View};
pub use title_service::{Title, TitleValidator};
