//! Application layer: use-case orchestration over the driven ports.

pub mod ports;
pub mod services;

pub use services::{ApplyReport, ApplyService, TemplateInfo, TemplateService};
