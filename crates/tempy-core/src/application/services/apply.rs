//! Apply service - the template application orchestrator.
//!
//! Coordinates the whole apply workflow:
//! 1. Scan the store and resolve the requested name
//! 2. Parse template arguments with the template's own schema
//! 3. Compute output paths (filename keys may contain placeholders)
//! 4. Render and write every content template, refusing to clobber
//!
//! Per invocation the engine moves
//! `Start → Scanned → Matched → Parsed → DirReady → Writing(i)… → Done`,
//! with every step able to fail terminally. There is deliberately **no
//! rollback**: files written before a failure in the same call stay on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, Renderer, TemplateStore},
    domain::{TemplateSet, render_filename},
    error::{TempyError, TempyResult},
};
use std::sync::Arc;

/// What one successful apply call wrote.
#[derive(Debug, Clone, Default)]
pub struct ApplyReport {
    /// Output paths in write order.
    pub written: Vec<PathBuf>,
}

/// Main apply service.
pub struct ApplyService {
    store: Box<dyn TemplateStore>,
    renderer: Arc<dyn Renderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ApplyService {
    /// Create an apply service with the given adapters.
    ///
    /// The renderer is shared (`Arc`) because the store adapter also holds it
    /// for load-time compilation.
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Arc<dyn Renderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Apply the template called `requested_name` with `raw_args`, writing
    /// into `output_dir`.
    ///
    /// # Errors
    ///
    /// - [`TempyError::NotFound`] — no template resolves to the name
    /// - [`TempyError::NoParser`] — the template defines no argument schema
    /// - [`TempyError::InvalidArguments`] — the schema rejected `raw_args`
    /// - [`TempyError::CreateDir`] — the output directory could not be made
    /// - [`TempyError::Collision`] — an output path already exists
    /// - [`TempyError::TemplateSyntax`] / [`TempyError::Io`] — rendering or
    ///   writing one output failed
    ///
    /// On any failure past the directory step, outputs already written by
    /// this call are left on disk.
    #[instrument(skip(self, raw_args), fields(output = %output_dir.display()))]
    pub fn apply(
        &self,
        requested_name: &str,
        raw_args: &[String],
        output_dir: &Path,
        report_failures: bool,
    ) -> TempyResult<ApplyReport> {
        let sets = self.store.scan(report_failures);
        debug!(count = sets.len(), "store scanned");

        // First-match-wins: duplicates later in scan order are invisible.
        let set = sets
            .into_iter()
            .find(|s| s.effective_name() == requested_name)
            .ok_or_else(|| TempyError::NotFound {
                name: requested_name.to_string(),
            })?;

        let values = self.parse_args(&set, raw_args)?;

        self.filesystem
            .create_dir_all(output_dir)
            .map_err(|source| TempyError::CreateDir {
                path: output_dir.to_path_buf(),
                source,
            })?;

        let mut report = ApplyReport::default();
        for content in &set.contents {
            let filename = render_filename(&content.key, &values)?;
            let output_path = output_dir.join(&filename);

            if self.filesystem.exists(&output_path) {
                return Err(TempyError::Collision { path: output_path });
            }

            let text = self.renderer.render(&content.body, &values)?;
            self.filesystem
                .write_new_file(&output_path, &text)
                .map_err(|source| {
                    TempyError::io("writing template output to", output_path.clone(), source)
                })?;

            debug!(path = %output_path.display(), "wrote output file");
            report.written.push(output_path);
        }

        info!(
            template = %set.effective_name(),
            files = report.written.len(),
            "apply completed"
        );
        Ok(report)
    }

    /// Parse the trailing CLI tokens with the template's own schema.
    fn parse_args(
        &self,
        set: &TemplateSet,
        raw_args: &[String],
    ) -> TempyResult<std::collections::HashMap<String, String>> {
        let name = set.effective_name();
        let schema = set
            .metadata
            .parser
            .as_ref()
            .ok_or_else(|| TempyError::NoParser {
                name: name.to_string(),
            })?;

        schema
            .parse(raw_args)
            .map_err(|source| TempyError::InvalidArguments {
                name: name.to_string(),
                source,
                usage: schema.help_text(name),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArgSpec, ArgumentSchema, ContentTemplate, Metadata, SchemaError};
    use std::collections::{HashMap, HashSet};
    use std::io;
    use std::sync::Mutex;

    // ── fakes ─────────────────────────────────────────────────────────────

    struct FakeStore(Vec<TemplateSet>);

    impl TemplateStore for FakeStore {
        fn scan(&self, _report_failures: bool) -> Vec<TemplateSet> {
            self.0.clone()
        }
    }

    /// Renders `%name%` markers; enough to observe substitution happened.
    struct FakeRenderer;

    impl Renderer for FakeRenderer {
        fn compile(&self, _source: &str) -> TempyResult<()> {
            Ok(())
        }

        fn render(&self, source: &str, values: &HashMap<String, String>) -> TempyResult<String> {
            let mut out = source.to_string();
            for (key, value) in values {
                out = out.replace(&format!("%{key}%"), value);
            }
            if out.contains('%') {
                return Err(TempyError::TemplateSyntax {
                    reason: "undefined variable".into(),
                });
            }
            Ok(out)
        }
    }

    #[derive(Default)]
    struct FakeFs {
        files: Mutex<HashMap<PathBuf, String>>,
        dirs: Mutex<HashSet<PathBuf>>,
        fail_mkdir: bool,
    }

    impl Filesystem for FakeFs {
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            if self.fail_mkdir {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.dirs.lock().unwrap().insert(path.to_path_buf());
            Ok(())
        }

        fn write_new_file(&self, path: &Path, content: &str) -> io::Result<()> {
            let mut files = self.files.lock().unwrap();
            if files.contains_key(path) {
                return Err(io::Error::new(io::ErrorKind::AlreadyExists, "exists"));
            }
            files.insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn greet_set(entry: &str, display: Option<&str>) -> TemplateSet {
        let mut meta = Metadata::empty();
        meta.name = display.map(str::to_string);
        meta.parser = Some(
            ArgumentSchema::new(vec![
                ArgSpec::option("who", "who").with_default("world"),
            ])
            .unwrap(),
        );
        TemplateSet::new(
            entry,
            meta,
            vec![ContentTemplate::new(entry, "hello %who%\n")],
        )
    }

    fn service(sets: Vec<TemplateSet>) -> (ApplyService, Arc<FakeFs>) {
        service_with_fs(sets, FakeFs::default())
    }

    fn service_with_fs(sets: Vec<TemplateSet>, fs: FakeFs) -> (ApplyService, Arc<FakeFs>) {
        let fs = Arc::new(fs);
        let svc = ApplyService::new(
            Box::new(FakeStore(sets)),
            Arc::new(FakeRenderer),
            Box::new(Arc::clone(&fs)),
        );
        (svc, fs)
    }

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    // ── resolution ────────────────────────────────────────────────────────

    #[test]
    fn unknown_name_is_not_found() {
        let (svc, _) = service(vec![greet_set("greet.txt", None)]);
        let err = svc
            .apply("nope", &[], Path::new("/out"), false)
            .unwrap_err();
        assert!(matches!(err, TempyError::NotFound { name } if name == "nope"));
    }

    #[test]
    fn metadata_name_wins_over_entry_name() {
        let (svc, fs) = service(vec![greet_set("ugly-entry.txt", Some("greet"))]);
        svc.apply("greet", &[], Path::new("/out"), false).unwrap();
        assert!(fs.exists(Path::new("/out/ugly-entry.txt")));
    }

    #[test]
    fn duplicate_names_resolve_first_in_scan_order() {
        let first = greet_set("first.txt", Some("foo"));
        let second = greet_set("second.txt", Some("foo"));
        let (svc, fs) = service(vec![first, second]);

        svc.apply("foo", &[], Path::new("/out"), false).unwrap();

        assert!(fs.exists(Path::new("/out/first.txt")));
        assert!(!fs.exists(Path::new("/out/second.txt")));
    }

    // ── argument handling ─────────────────────────────────────────────────

    #[test]
    fn template_without_parser_is_unusable() {
        let set = TemplateSet::new(
            "raw.txt",
            Metadata::empty(),
            vec![ContentTemplate::new("raw.txt", "static\n")],
        );
        let (svc, _) = service(vec![set]);
        let err = svc.apply("raw.txt", &[], Path::new("/out"), false).unwrap_err();
        assert!(matches!(err, TempyError::NoParser { .. }));
    }

    #[test]
    fn schema_rejection_carries_usage_text() {
        let (svc, _) = service(vec![greet_set("greet.txt", Some("greet"))]);
        let err = svc
            .apply("greet", &args(&["--bogus", "x"]), Path::new("/out"), false)
            .unwrap_err();
        match err {
            TempyError::InvalidArguments { source, usage, .. } => {
                assert_eq!(source, SchemaError::UnknownFlag("--bogus".into()));
                assert!(usage.starts_with("usage: tempy apply greet"));
            }
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }

    // ── writing ───────────────────────────────────────────────────────────

    #[test]
    fn renders_and_writes_with_parsed_values() {
        let (svc, fs) = service(vec![greet_set("greet.txt", Some("greet"))]);
        let report = svc
            .apply("greet", &args(&["--who", "alice"]), Path::new("/out"), false)
            .unwrap();

        assert_eq!(report.written, vec![PathBuf::from("/out/greet.txt")]);
        let files = fs.files.lock().unwrap();
        assert_eq!(files[Path::new("/out/greet.txt")], "hello alice\n");
    }

    #[test]
    fn filename_placeholders_use_parsed_values() {
        let mut meta = Metadata::empty();
        meta.name = Some("mytool".into());
        meta.parser = Some(
            ArgumentSchema::new(vec![ArgSpec::option("name", "name").required()]).unwrap(),
        );
        let set = TemplateSet::new(
            "mytool",
            meta,
            vec![ContentTemplate::new("{name}.txt", "hi %name%\n")],
        );

        let (svc, fs) = service(vec![set]);
        svc.apply("mytool", &args(&["--name", "bob"]), Path::new("/out"), false)
            .unwrap();

        let files = fs.files.lock().unwrap();
        assert_eq!(files[Path::new("/out/bob.txt")], "hi bob\n");
    }

    #[test]
    fn collision_aborts_and_leaves_existing_content() {
        let fs = FakeFs::default();
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from("/out/greet.txt"), "precious".into());

        let (svc, fs) = service_with_fs(vec![greet_set("greet.txt", Some("greet"))], fs);
        let err = svc.apply("greet", &[], Path::new("/out"), false).unwrap_err();

        assert!(matches!(err, TempyError::Collision { .. }));
        let files = fs.files.lock().unwrap();
        assert_eq!(files[Path::new("/out/greet.txt")], "precious");
    }

    #[test]
    fn failure_midway_leaves_earlier_files_on_disk() {
        // Second content entry collides; the first must stay written.
        let mut set = greet_set("multi", Some("multi"));
        set.contents = vec![
            ContentTemplate::new("a.txt", "a %who%\n"),
            ContentTemplate::new("b.txt", "b %who%\n"),
        ];

        let fs = FakeFs::default();
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from("/out/b.txt"), "old".into());

        let (svc, fs) = service_with_fs(vec![set], fs);
        let err = svc.apply("multi", &[], Path::new("/out"), false).unwrap_err();

        assert!(matches!(err, TempyError::Collision { .. }));
        let files = fs.files.lock().unwrap();
        assert!(files.contains_key(Path::new("/out/a.txt")), "no rollback");
        assert_eq!(files[Path::new("/out/b.txt")], "old");
    }

    #[test]
    fn unwritable_output_dir_is_reported() {
        let fs = FakeFs {
            fail_mkdir: true,
            ..FakeFs::default()
        };
        let (svc, _) = service_with_fs(vec![greet_set("greet.txt", Some("greet"))], fs);
        let err = svc.apply("greet", &[], Path::new("/out"), false).unwrap_err();
        assert!(matches!(err, TempyError::CreateDir { .. }));
    }

    #[test]
    fn render_failure_aborts() {
        let mut set = greet_set("greet.txt", Some("greet"));
        set.contents = vec![ContentTemplate::new("greet.txt", "hello %missing%\n")];
        let (svc, fs) = service(vec![set]);

        let err = svc.apply("greet", &[], Path::new("/out"), false).unwrap_err();

        assert!(matches!(err, TempyError::TemplateSyntax { .. }));
        assert!(!fs.exists(Path::new("/out/greet.txt")));
    }
}
