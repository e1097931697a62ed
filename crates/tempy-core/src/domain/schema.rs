//! Declarative argument schemas defined by template metadata.
//!
//! Each template may declare a parser: an ordered list of [`ArgSpec`]s that
//! turns the flat token list after `tempy apply <name>` into a map of
//! argument name → value. Every schema is an independent instance owned by
//! the [`Metadata`] it came from; there is no shared parser registry.
//!
//! ## Token grammar
//!
//! - `--flag VALUE` and `--flag=VALUE` bind a long option.
//! - `-x VALUE` binds a short option.
//! - Any other token fills the next positional spec in declaration order.
//!
//! After the walk, unset specs fall back to their `default`; a spec that is
//! still unset and is either positional or marked `required` is an error.
//! An optional flag with no default is simply absent from the result — a
//! template body referencing it will fail at render time instead.
//!
//! [`Metadata`]: crate::domain::Metadata

use std::collections::HashMap;
use thiserror::Error;

/// One declared argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    /// Value key the parsed result is stored under (and the variable name
    /// templates substitute).
    pub name: String,
    /// Long flag without the leading dashes; `None` makes this positional.
    pub flag: Option<String>,
    /// Optional single-character short flag (only valid together with `flag`).
    pub short: Option<char>,
    /// Fallback value when the argument is not supplied.
    pub default: Option<String>,
    /// Reject invocations that omit this flag. Positionals are implicitly
    /// required unless they carry a default.
    pub required: bool,
    /// Allowed values; empty means unrestricted.
    pub choices: Vec<String>,
    /// Help line shown in usage output.
    pub help: Option<String>,
}

impl ArgSpec {
    /// A positional argument, filled in declaration order.
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flag: None,
            short: None,
            default: None,
            required: false,
            choices: Vec::new(),
            help: None,
        }
    }

    /// A long-option argument. `flag` is given without dashes (`"license"`
    /// matches `--license`).
    pub fn option(name: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            flag: Some(flag.into()),
            ..Self::positional(name)
        }
    }

    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// How the argument is referred to in error and usage text.
    fn display_name(&self) -> String {
        match &self.flag {
            Some(flag) => format!("--{flag}"),
            None => self.name.clone(),
        }
    }

    /// Uppercased metavar for usage lines, e.g. `LICENSE`.
    fn metavar(&self) -> String {
        self.name.to_uppercase()
    }

    fn check_choice(&self, value: &str) -> Result<(), SchemaError> {
        if !self.choices.is_empty() && !self.choices.iter().any(|c| c == value) {
            return Err(SchemaError::InvalidChoice {
                name: self.display_name(),
                value: value.to_string(),
                choices: self.choices.clone(),
            });
        }
        Ok(())
    }
}

/// A malformed schema declaration (caught at metadata-evaluation time).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SpecError(pub String);

/// An ordered, validated collection of [`ArgSpec`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSchema {
    args: Vec<ArgSpec>,
}

impl ArgumentSchema {
    /// Validate and build a schema.
    ///
    /// # Errors
    ///
    /// Rejects empty or duplicate argument names, a `short` without a long
    /// flag, and a `default` that is not one of `choices`.
    pub fn new(args: Vec<ArgSpec>) -> Result<Self, SpecError> {
        let mut seen = std::collections::HashSet::new();
        for spec in &args {
            if spec.name.is_empty() {
                return Err(SpecError("argument name cannot be empty".into()));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(SpecError(format!("duplicate argument name '{}'", spec.name)));
            }
            if spec.short.is_some() && spec.flag.is_none() {
                return Err(SpecError(format!(
                    "positional argument '{}' cannot have a short flag",
                    spec.name
                )));
            }
            if let (Some(default), false) = (&spec.default, spec.choices.is_empty()) {
                if !spec.choices.iter().any(|c| c == default) {
                    return Err(SpecError(format!(
                        "default '{default}' for '{}' is not one of its choices",
                        spec.name
                    )));
                }
            }
        }
        Ok(Self { args })
    }

    /// The declared specs, in declaration order.
    pub fn args(&self) -> &[ArgSpec] {
        &self.args
    }

    /// Parse an ordered token sequence into argument-name → value.
    ///
    /// Invoked exactly once per apply operation.
    pub fn parse(&self, tokens: &[String]) -> Result<HashMap<String, String>, SchemaError> {
        let mut values: HashMap<String, String> = HashMap::new();
        let mut positionals = self.args.iter().filter(|a| a.flag.is_none());
        let mut iter = tokens.iter();

        while let Some(token) = iter.next() {
            if let Some(rest) = token.strip_prefix("--") {
                let (flag, inline) = match rest.split_once('=') {
                    Some((flag, value)) => (flag, Some(value.to_string())),
                    None => (rest, None),
                };
                let spec = self
                    .args
                    .iter()
                    .find(|a| a.flag.as_deref() == Some(flag))
                    .ok_or_else(|| SchemaError::UnknownFlag(token.clone()))?;
                let value = match inline {
                    Some(value) => value,
                    None => iter
                        .next()
                        .cloned()
                        .ok_or_else(|| SchemaError::MissingValue(spec.display_name()))?,
                };
                spec.check_choice(&value)?;
                values.insert(spec.name.clone(), value);
            } else if let Some(short) = short_flag(token) {
                let spec = self
                    .args
                    .iter()
                    .find(|a| a.short == Some(short))
                    .ok_or_else(|| SchemaError::UnknownFlag(token.clone()))?;
                let value = iter
                    .next()
                    .cloned()
                    .ok_or_else(|| SchemaError::MissingValue(spec.display_name()))?;
                spec.check_choice(&value)?;
                values.insert(spec.name.clone(), value);
            } else {
                let spec = positionals
                    .next()
                    .ok_or_else(|| SchemaError::UnexpectedArgument(token.clone()))?;
                spec.check_choice(token)?;
                values.insert(spec.name.clone(), token.clone());
            }
        }

        // Defaults, then the required check.
        for spec in &self.args {
            if values.contains_key(&spec.name) {
                continue;
            }
            if let Some(default) = &spec.default {
                values.insert(spec.name.clone(), default.clone());
            } else if spec.required || spec.flag.is_none() {
                return Err(SchemaError::MissingArgument(spec.display_name()));
            }
        }

        Ok(values)
    }

    /// Render the schema's help text, argparse-style.
    pub fn help_text(&self, template: &str) -> String {
        let mut usage = format!("usage: tempy apply {template}");
        for spec in &self.args {
            let part = match &spec.flag {
                Some(flag) => {
                    let inner = format!("--{flag} {}", spec.metavar());
                    if spec.required {
                        inner
                    } else {
                        format!("[{inner}]")
                    }
                }
                None if spec.default.is_some() => format!("[{}]", spec.metavar()),
                None => spec.metavar(),
            };
            usage.push(' ');
            usage.push_str(&part);
        }

        let mut out = usage;
        if !self.args.is_empty() {
            out.push_str("\n\narguments:\n");
            for spec in &self.args {
                let mut left = match (&spec.flag, spec.short) {
                    (Some(flag), Some(short)) => format!("--{flag}, -{short} {}", spec.metavar()),
                    (Some(flag), None) => format!("--{flag} {}", spec.metavar()),
                    (None, _) => spec.metavar(),
                };
                if left.len() < 24 {
                    left.push_str(&" ".repeat(24 - left.len()));
                }
                let mut right = spec.help.clone().unwrap_or_default();
                if !spec.choices.is_empty() {
                    right.push_str(&format!(" (choices: {})", spec.choices.join(", ")));
                }
                if let Some(default) = &spec.default {
                    right.push_str(&format!(" (default: {default})"));
                }
                out.push_str(&format!("  {left}{}\n", right.trim_start()));
            }
        }
        out
    }
}

/// `-x` → `x`; anything longer, bare `-`, or a non-dash token is not a
/// short flag. Long flags never reach this (handled by the `--` branch).
fn short_flag(token: &str) -> Option<char> {
    let mut chars = token.strip_prefix('-')?.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '-' => Some(c),
        _ => None,
    }
}

/// Argument-parsing failures surfaced to the user with usage text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown argument '{0}'")]
    UnknownFlag(String),

    #[error("argument '{0}' expects a value")]
    MissingValue(String),

    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    #[error("invalid value '{value}' for '{name}' (choose from: {})", choices.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        choices: Vec<String>,
    },

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greet_schema() -> ArgumentSchema {
        ArgumentSchema::new(vec![
            ArgSpec::option("who", "who").with_short('w').with_default("world"),
        ])
        .unwrap()
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    // ── parse ─────────────────────────────────────────────────────────────

    #[test]
    fn long_flag_binds_value() {
        let values = greet_schema().parse(&tokens(&["--who", "alice"])).unwrap();
        assert_eq!(values["who"], "alice");
    }

    #[test]
    fn inline_equals_binds_value() {
        let values = greet_schema().parse(&tokens(&["--who=bob"])).unwrap();
        assert_eq!(values["who"], "bob");
    }

    #[test]
    fn short_flag_binds_value() {
        let values = greet_schema().parse(&tokens(&["-w", "carol"])).unwrap();
        assert_eq!(values["who"], "carol");
    }

    #[test]
    fn default_applies_when_flag_absent() {
        let values = greet_schema().parse(&[]).unwrap();
        assert_eq!(values["who"], "world");
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = greet_schema().parse(&tokens(&["--nope", "x"])).unwrap_err();
        assert_eq!(err, SchemaError::UnknownFlag("--nope".into()));
    }

    #[test]
    fn flag_at_end_without_value() {
        let err = greet_schema().parse(&tokens(&["--who"])).unwrap_err();
        assert_eq!(err, SchemaError::MissingValue("--who".into()));
    }

    #[test]
    fn positionals_fill_in_declaration_order() {
        let schema = ArgumentSchema::new(vec![
            ArgSpec::positional("first"),
            ArgSpec::positional("second"),
        ])
        .unwrap();
        let values = schema.parse(&tokens(&["a", "b"])).unwrap();
        assert_eq!(values["first"], "a");
        assert_eq!(values["second"], "b");
    }

    #[test]
    fn positional_without_value_is_required() {
        let schema = ArgumentSchema::new(vec![ArgSpec::positional("message")]).unwrap();
        let err = schema.parse(&[]).unwrap_err();
        assert_eq!(err, SchemaError::MissingArgument("message".into()));
    }

    #[test]
    fn positional_with_default_is_optional() {
        let schema =
            ArgumentSchema::new(vec![ArgSpec::positional("message").with_default("hi")]).unwrap();
        assert_eq!(schema.parse(&[]).unwrap()["message"], "hi");
    }

    #[test]
    fn extra_positional_is_rejected() {
        let err = greet_schema().parse(&tokens(&["stray"])).unwrap_err();
        assert_eq!(err, SchemaError::UnexpectedArgument("stray".into()));
    }

    #[test]
    fn required_flag_must_be_given() {
        let schema =
            ArgumentSchema::new(vec![ArgSpec::option("name", "name").required()]).unwrap();
        let err = schema.parse(&[]).unwrap_err();
        assert_eq!(err, SchemaError::MissingArgument("--name".into()));
    }

    #[test]
    fn optional_flag_without_default_is_absent() {
        let schema = ArgumentSchema::new(vec![ArgSpec::option("license", "license")]).unwrap();
        let values = schema.parse(&[]).unwrap();
        assert!(!values.contains_key("license"));
    }

    #[test]
    fn choices_accept_member() {
        let schema = ArgumentSchema::new(vec![
            ArgSpec::option("license", "license").with_choices(vec!["MIT".into(), "GPL".into()]),
        ])
        .unwrap();
        let values = schema.parse(&tokens(&["--license", "GPL"])).unwrap();
        assert_eq!(values["license"], "GPL");
    }

    #[test]
    fn choices_reject_non_member() {
        let schema = ArgumentSchema::new(vec![
            ArgSpec::option("license", "license").with_choices(vec!["MIT".into(), "GPL".into()]),
        ])
        .unwrap();
        let err = schema.parse(&tokens(&["--license", "BSD"])).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidChoice { .. }));
        assert!(err.to_string().contains("MIT, GPL"));
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn duplicate_names_are_rejected() {
        let result = ArgumentSchema::new(vec![
            ArgSpec::positional("x"),
            ArgSpec::option("x", "x-flag"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn short_on_positional_is_rejected() {
        let mut spec = ArgSpec::positional("x");
        spec.short = Some('x');
        assert!(ArgumentSchema::new(vec![spec]).is_err());
    }

    #[test]
    fn default_outside_choices_is_rejected() {
        let spec = ArgSpec::option("license", "license")
            .with_choices(vec!["MIT".into()])
            .with_default("GPL");
        assert!(ArgumentSchema::new(vec![spec]).is_err());
    }

    // ── help text ─────────────────────────────────────────────────────────

    #[test]
    fn help_text_shows_usage_and_choices() {
        let schema = ArgumentSchema::new(vec![
            ArgSpec::option("license", "license")
                .with_short('l')
                .with_choices(vec!["MIT".into(), "GPL".into()])
                .with_help("license header for the file"),
            ArgSpec::positional("message"),
        ])
        .unwrap();
        let help = schema.help_text("c-project");
        assert!(help.starts_with("usage: tempy apply c-project [--license LICENSE] MESSAGE"));
        assert!(help.contains("--license, -l LICENSE"));
        assert!(help.contains("license header for the file"));
        assert!(help.contains("(choices: MIT, GPL)"));
    }
}
