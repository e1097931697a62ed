//! Application services orchestrating the use cases.

pub mod apply;
pub mod list;

pub use apply::{ApplyReport, ApplyService};
pub use list::{TemplateInfo, TemplateService};
