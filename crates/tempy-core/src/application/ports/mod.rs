//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the outside world.
//! The `tempy-adapters` crate provides the implementations; tests inject
//! in-memory fakes.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use crate::domain::TemplateSet;
use crate::error::TempyResult;

/// Port for the opaque template rendering engine.
///
/// Implemented by:
/// - `tempy_adapters::renderer::SimpleRenderer` (`${var}` substitution)
///
/// Rendering is two-phase: [`compile`] validates a body at load time so a
/// broken template is skipped during scan; [`render`] substitutes parsed
/// argument values at apply time.
///
/// [`compile`]: Renderer::compile
/// [`render`]: Renderer::render
pub trait Renderer: Send + Sync {
    /// Parse-check a template body without rendering it.
    ///
    /// # Errors
    ///
    /// `TempyError::TemplateSyntax` when the body is malformed.
    fn compile(&self, source: &str) -> TempyResult<()>;

    /// Render a template body with a variable mapping.
    ///
    /// # Errors
    ///
    /// `TempyError::TemplateSyntax` on malformed bodies or references to
    /// variables absent from `values`.
    fn render(&self, source: &str, values: &HashMap<String, String>) -> TempyResult<String>;
}

/// Port for template discovery.
///
/// Implemented by:
/// - `tempy_adapters::template_store::FsTemplateStore` (user template root)
pub trait TemplateStore: Send + Sync {
    /// Discover all loadable template sets, in store order.
    ///
    /// Infallible by contract: a missing root yields an empty vector and a
    /// template that fails to load is skipped (reported to stderr when
    /// `report_failures` is set). Callers must not assume any sort order.
    fn scan(&self, report_failures: bool) -> Vec<TemplateSet>;
}

/// Port for output filesystem operations.
///
/// Implemented by:
/// - `tempy_adapters::filesystem::LocalFilesystem` (production)
/// - `tempy_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Methods return raw `io::Result`; the apply service maps failures to the
/// domain error variants that carry user-facing context.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write content to a path that must not yet exist
    /// (`create_new` semantics — an existing file is an error, never
    /// truncated).
    fn write_new_file(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Forwarding impl so a shared filesystem can be injected where a boxed one
/// is expected (tests keep a handle to inspect writes afterwards).
impl<T: Filesystem + ?Sized> Filesystem for std::sync::Arc<T> {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }

    fn write_new_file(&self, path: &Path, content: &str) -> io::Result<()> {
        (**self).write_new_file(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}
