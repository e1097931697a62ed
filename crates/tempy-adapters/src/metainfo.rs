//! Metadata evaluator: turns a metacode snippet into [`Metadata`].
//!
//! Metacode is a TOML document, evaluated into a fresh table per call — the
//! evaluator keeps no state between evaluations and the snippet has no access
//! to anything of the host's. After evaluation exactly the three recognized
//! bindings are harvested:
//!
//! ```toml
//! name        = "c-project"
//! description = "C project with Makefile"
//!
//! [[parser.arg]]
//! name    = "name"
//! flag    = "--name"
//! short   = "n"
//! default = "foo"
//!
//! [[parser.arg]]
//! name    = "license"
//! flag    = "--license"
//! choices = ["MIT", "GPL"]
//! help    = "license header for the file"
//! ```
//!
//! Any other top-level binding is ignored. TOML syntax errors, wrong types
//! for the recognized keys, and malformed `parser.arg` entries all surface
//! as [`TempyError::Metadata`] — the caller (scan) decides whether that
//! skips the template or aborts.

use serde::Deserialize;
use tracing::trace;

use tempy_core::domain::{ArgSpec, ArgumentSchema, Metadata};
use tempy_core::error::{TempyError, TempyResult};

/// Deserialised `parser` table of a metacode document.
#[derive(Debug, Deserialize)]
struct ParserDoc {
    /// The `[[parser.arg]]` entries, in declaration order.
    #[serde(default, rename = "arg")]
    args: Vec<ArgDoc>,
}

/// One `[[parser.arg]]` entry.
///
/// `deny_unknown_fields` so that a typo (`defualt = ...`) fails loudly
/// instead of silently producing an argument without a default.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArgDoc {
    name: String,
    /// Long flag including the leading dashes, e.g. `"--license"`.
    /// Omitted for positional arguments.
    flag: Option<String>,
    /// One-character short flag, e.g. `"l"`.
    short: Option<String>,
    default: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    choices: Vec<String>,
    help: Option<String>,
}

/// Evaluate a metacode snippet into [`Metadata`].
///
/// # Errors
///
/// [`TempyError::Metadata`] on any evaluation failure; nothing is swallowed
/// here.
pub fn evaluate(metacode: &str) -> TempyResult<Metadata> {
    let table: toml::Table = metacode.parse().map_err(|e: toml::de::Error| {
        TempyError::Metadata {
            reason: e.to_string(),
        }
    })?;
    trace!(bindings = table.len(), "metacode evaluated");

    let name = harvest_string(&table, "name")?;
    let description = harvest_string(&table, "description")?;
    let parser = match table.get("parser") {
        Some(value) => Some(build_schema(value)?),
        None => None,
    };

    Ok(Metadata {
        name,
        description,
        parser,
    })
}

/// Copy one recognized string binding out of the evaluation scope.
fn harvest_string(table: &toml::Table, key: &str) -> TempyResult<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(TempyError::Metadata {
            reason: format!("'{key}' must be a string, got {}", other.type_str()),
        }),
    }
}

/// Build the [`ArgumentSchema`] from the `parser` binding.
fn build_schema(value: &toml::Value) -> TempyResult<ArgumentSchema> {
    let doc: ParserDoc = value
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| TempyError::Metadata {
            reason: format!("invalid parser declaration: {e}"),
        })?;

    let specs = doc
        .args
        .into_iter()
        .map(arg_spec)
        .collect::<TempyResult<Vec<_>>>()?;

    ArgumentSchema::new(specs).map_err(|e| TempyError::Metadata {
        reason: format!("invalid parser declaration: {e}"),
    })
}

fn arg_spec(doc: ArgDoc) -> TempyResult<ArgSpec> {
    let mut spec = match doc.flag {
        Some(flag) => {
            let bare = flag
                .strip_prefix("--")
                .filter(|rest| !rest.is_empty())
                .ok_or_else(|| TempyError::Metadata {
                    reason: format!("flag '{flag}' must start with '--'"),
                })?;
            ArgSpec::option(doc.name, bare)
        }
        None => ArgSpec::positional(doc.name),
    };

    if let Some(short) = doc.short {
        let mut chars = short.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => spec = spec.with_short(c),
            _ => {
                return Err(TempyError::Metadata {
                    reason: format!("short flag '{short}' must be a single character"),
                });
            }
        }
    }
    if let Some(default) = doc.default {
        spec = spec.with_default(default);
    }
    if doc.required {
        spec = spec.required();
    }
    if !doc.choices.is_empty() {
        spec = spec.with_choices(doc.choices);
    }
    if let Some(help) = doc.help {
        spec = spec.with_help(help);
    }
    Ok(spec)
}
