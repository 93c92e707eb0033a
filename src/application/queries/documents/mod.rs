mod get_by_id;
mod get_by_slug;
mod service;

pub use get_by_id::GetDocumentByIdQuery;
pub use get_by_slug::GetDocumentBySlugQuery;
pub use service::DocumentQueryService;
