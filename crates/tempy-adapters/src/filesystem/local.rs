//! Real filesystem adapter.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use tempy_core::application::ports::Filesystem;

/// Writes straight through to the local disk.
#[derive(Debug, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write_new_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        // create_new so an existing file is never truncated.
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        file.write_all(contents.as_bytes())?;
        debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
