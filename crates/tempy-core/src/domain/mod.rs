//! Domain layer: pure template-scaffolding logic, no I/O.

pub mod metadata;
pub mod schema;
pub mod template_set;

pub use metadata::Metadata;
pub use schema::{ArgSpec, ArgumentSchema, SchemaError};
pub use template_set::{ContentTemplate, TemplateSet, render_filename};
