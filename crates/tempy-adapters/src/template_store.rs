//! Filesystem-backed template store.

use std::error::Error as _;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use tempy_core::application::ports::{Renderer, TemplateStore};
use tempy_core::domain::TemplateSet;
use tempy_core::error::TempyError;

use crate::template_loader::TemplateLoader;

/// Scans a single flat template directory.
///
/// Each direct child of the root is one entry: files become file templates,
/// directories become directory templates, anything else is skipped. An
/// entry that fails to load is logged and dropped so that one broken
/// template never hides the rest.
pub struct FsTemplateStore {
    root: PathBuf,
    renderer: Arc<dyn Renderer>,
}

impl FsTemplateStore {
    pub fn new(root: impl Into<PathBuf>, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            root: root.into(),
            renderer,
        }
    }

    fn report(&self, name: &str, err: &TempyError, report_failures: bool) {
        warn!(template = %name, error = %err, "skipping template");
        if report_failures {
            eprintln!("warning: skipping template '{name}': {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
        }
    }
}

impl TemplateStore for FsTemplateStore {
    fn scan(&self, report_failures: bool) -> Vec<TemplateSet> {
        if !self.root.is_dir() {
            debug!(root = %self.root.display(), "template directory missing");
            return Vec::new();
        }

        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "cannot read template directory");
                if report_failures {
                    eprintln!(
                        "warning: cannot read template directory '{}': {e}",
                        self.root.display()
                    );
                }
                return Vec::new();
            }
        };

        let mut entries: Vec<_> = dir.filter_map(Result::ok).collect();
        entries.sort_by_key(|e| e.file_name());

        let loader = TemplateLoader::new(self.renderer.as_ref());
        let mut sets = Vec::new();
        for entry in entries {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();

            let loaded = if path.is_file() {
                loader.load_file(&path)
            } else if path.is_dir() {
                loader.load_directory(&path)
            } else {
                trace!(path = %path.display(), "skipping special entry");
                continue;
            };

            match loaded {
                Ok(set) => sets.push(set),
                Err(e) => self.report(&name, &e, report_failures),
            }
        }

        debug!(count = sets.len(), root = %self.root.display(), "scan complete");
        sets
    }
}
