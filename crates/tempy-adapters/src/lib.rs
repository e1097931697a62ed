//! Infrastructure adapters for Tempy.
//!
//! This crate implements the ports defined in `tempy_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod metainfo;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SimpleRenderer;
pub use template_store::FsTemplateStore;
