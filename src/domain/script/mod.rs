pub mod error;
pub mod model;
pub mod service;

pub use error::ScriptServiceError;
pub use model::{ScriptSet, ScriptUnit, SectionName};
pub use service::{PaperMetadata, ScriptService};
