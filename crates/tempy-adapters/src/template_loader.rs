//! Loading of template entries from disk.
//!
//! Two entry shapes exist under the template directory:
//!
//! * A **file template**: a single file, optionally starting with a metadata
//!   block. The block is the region between a first line `<<<` and a later
//!   line `>>>`; its interior is metacode, everything after the closing
//!   marker is the body. A file that does not start with `<<<` is all body
//!   with empty metadata.
//! * A **directory template**: a directory whose optional `metainfo` file
//!   holds the metacode, with every other regular file a content template
//!   keyed by its file name.
//!
//! Loading validates eagerly: metacode is evaluated and every body is
//! compiled by the renderer, so a broken template is rejected here and
//! never reaches apply.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use tempy_core::application::ports::Renderer;
use tempy_core::domain::{ContentTemplate, Metadata, TemplateSet};
use tempy_core::error::{TempyError, TempyResult};

use crate::metainfo;

/// Opening marker of a metadata block, alone on the first line.
const META_START: &str = "<<<";
/// Closing marker of a metadata block, alone on a line.
const META_END: &str = ">>>";
/// Metacode file name inside a directory template.
const METAINFO_FILE: &str = "metainfo";

/// Loads template entries, compiling bodies against a renderer.
pub struct TemplateLoader<'a> {
    renderer: &'a dyn Renderer,
}

impl<'a> TemplateLoader<'a> {
    pub fn new(renderer: &'a dyn Renderer) -> Self {
        Self { renderer }
    }

    /// Load a file template.
    pub fn load_file(&self, path: &Path) -> TempyResult<TemplateSet> {
        let entry_name = entry_name(path)?;
        let text = fs::read_to_string(path)
            .map_err(|e| TempyError::io("reading template file", path, e))?;

        let (metacode, body) = split_metadata_block(&text)?;
        let metadata = match metacode {
            Some(code) => metainfo::evaluate(&code)?,
            None => Metadata::empty(),
        };
        self.renderer.compile(&body)?;

        debug!(entry = %entry_name, "loaded file template");
        Ok(TemplateSet::new(
            &entry_name,
            metadata,
            vec![ContentTemplate::new(&entry_name, &body)],
        ))
    }

    /// Load a directory template.
    pub fn load_directory(&self, path: &Path) -> TempyResult<TemplateSet> {
        let dir_name = entry_name(path)?;

        let metainfo_path = path.join(METAINFO_FILE);
        let metadata = if metainfo_path.is_file() {
            let code = fs::read_to_string(&metainfo_path)
                .map_err(|e| TempyError::io("reading metainfo", &metainfo_path, e))?;
            metainfo::evaluate(&code)?
        } else {
            Metadata::empty()
        };

        let mut contents = Vec::new();
        let dir = fs::read_dir(path)
            .map_err(|e| TempyError::io("reading template directory", path, e))?;
        let mut entries: Vec<_> = dir
            .collect::<Result<_, _>>()
            .map_err(|e| TempyError::io("reading template directory", path, e))?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let entry_path = entry.path();
            if !entry_path.is_file() {
                trace!(path = %entry_path.display(), "skipping non-file entry");
                continue;
            }
            let key = entry_name(&entry_path)?;
            if key == METAINFO_FILE {
                continue;
            }
            let body = fs::read_to_string(&entry_path)
                .map_err(|e| TempyError::io("reading content template", &entry_path, e))?;
            self.renderer.compile(&body)?;
            contents.push(ContentTemplate::new(&key, &body));
        }

        if contents.is_empty() {
            return Err(TempyError::Format {
                reason: format!("directory template '{dir_name}' has no content files"),
            });
        }

        debug!(entry = %dir_name, files = contents.len(), "loaded directory template");
        Ok(TemplateSet::new(&dir_name, metadata, contents))
    }
}

/// Split a file template into its metacode (if any) and body.
///
/// The markers must each stand alone on their line. A `<<<` opener without
/// a matching `>>>` is a format error; without an opener the whole text is
/// the body.
fn split_metadata_block(text: &str) -> TempyResult<(Option<String>, String)> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();

    let Some(first) = lines.first() else {
        return Ok((None, String::new()));
    };
    if trimmed(first) != META_START {
        return Ok((None, text.to_string()));
    }

    let end = lines[1..]
        .iter()
        .position(|line| trimmed(line) == META_END)
        .map(|i| i + 1)
        .ok_or_else(|| TempyError::Format {
            reason: format!("metadata block opened with '{META_START}' but never closed with '{META_END}'"),
        })?;

    let metacode = lines[1..end].concat();
    let body = lines[end + 1..].concat();
    Ok((Some(metacode), body))
}

fn trimmed(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

/// Last path component as UTF-8.
fn entry_name(path: &Path) -> TempyResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| TempyError::Format {
            reason: format!("template path '{}' has no valid name", path.display()),
        })
}
