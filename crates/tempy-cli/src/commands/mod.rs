//! Command handlers.
//!
//! Each submodule implements one subcommand: wiring the adapters, calling
//! into the core services, and formatting the result.

pub mod apply;
pub mod completions;
pub mod list;

use std::path::PathBuf;
use std::sync::Arc;

use tempy_adapters::{FsTemplateStore, SimpleRenderer};
use tempy_core::prelude::Renderer;

/// Build the store + renderer pair for a template root.
///
/// The renderer is shared: the store compiles bodies at load time, the apply
/// service renders them at apply time.
fn wiring(root: PathBuf) -> (Box<FsTemplateStore>, Arc<dyn Renderer>) {
    let renderer: Arc<dyn Renderer> = Arc::new(SimpleRenderer::new());
    let store = Box::new(FsTemplateStore::new(root, Arc::clone(&renderer)));
    (store, renderer)
}
