//! Per-template metadata harvested from a metacode snippet.

use crate::domain::schema::ArgumentSchema;

/// The three recognized metadata bindings of a template.
///
/// Always carries exactly these three keys; a binding the metacode did not
/// set stays `None`. Any other name bound during metadata evaluation is
/// ignored by the evaluator. Produced once at load time and immutable
/// thereafter — never persisted, recomputed on every store scan.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Display and lookup name. Falls back to the filesystem entry name when
    /// unset (see [`TemplateSet::effective_name`]).
    ///
    /// [`TemplateSet::effective_name`]: crate::domain::TemplateSet::effective_name
    pub name: Option<String>,

    /// Human-readable description shown by `tempy list`.
    pub description: Option<String>,

    /// Argument schema used to parse trailing CLI arguments on apply.
    /// A template without a parser can be listed but not applied.
    pub parser: Option<ArgumentSchema>,
}

impl Metadata {
    /// All-`None` metadata, used for templates without a metadata block.
    pub fn empty() -> Self {
        Self::default()
    }
}
