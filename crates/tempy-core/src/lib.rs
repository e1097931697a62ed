//! Tempy Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Tempy
//! template scaffolding tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           tempy-cli (CLI)               │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ApplyService, TemplateService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │   (Driven: Store, Filesystem, Render)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     tempy-adapters (Infrastructure)     │
//! │ (FsTemplateStore, SimpleRenderer, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Metadata, ArgumentSchema, TemplateSet)│
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tempy_core::application::ApplyService;
//!
//! // Wire the service with injected adapters, then apply a template.
//! let service = ApplyService::new(store, renderer, filesystem);
//! let report = service.apply("greet", &args, Path::new("./out"), false)?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplyReport, ApplyService, TemplateInfo, TemplateService,
        ports::{Filesystem, Renderer, TemplateStore},
    };
    pub use crate::domain::{
        ArgSpec, ArgumentSchema, ContentTemplate, Metadata, SchemaError, TemplateSet,
        render_filename,
    };
    pub use crate::error::{TempyError, TempyResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
