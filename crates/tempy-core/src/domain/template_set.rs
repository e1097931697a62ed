//! Template sets: metadata plus one-or-more named content templates.

use std::collections::HashMap;

use crate::domain::Metadata;
use crate::error::{TempyError, TempyResult};

/// A renderable unit of output content bound to a filename key.
///
/// For directory templates the key is the relative filename inside the
/// template directory; for file templates it is the entry's basename. Keys
/// may contain `{name}` placeholders that are substituted with parsed
/// argument values at apply time (see [`render_filename`]).
#[derive(Debug, Clone)]
pub struct ContentTemplate {
    pub key: String,
    /// Body text, validated by the renderer's compile step at load time.
    pub body: String,
}

impl ContentTemplate {
    pub fn new(key: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            body: body.into(),
        }
    }
}

/// Everything discovered from one filesystem entry in the template root.
///
/// Constructed fresh on every store scan and discarded when the command
/// completes; nothing is cached across invocations. Invariant: `contents` is
/// never empty (a file template carries exactly one entry, a directory
/// template one or more), preserved in load order.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    /// Filesystem basename of the entry at discovery time.
    pub entry_name: String,
    pub metadata: Metadata,
    pub contents: Vec<ContentTemplate>,
}

impl TemplateSet {
    pub fn new(
        entry_name: impl Into<String>,
        metadata: Metadata,
        contents: Vec<ContentTemplate>,
    ) -> Self {
        Self {
            entry_name: entry_name.into(),
            metadata,
            contents,
        }
    }

    /// The lookup name: explicit `metadata.name` if set, else the entry name.
    ///
    /// When several sets share an effective name, lookup is first-match-wins
    /// in scan order (enforced by the apply service, not here).
    pub fn effective_name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or(&self.entry_name)
    }
}

/// Substitute argument values into the `{name}` placeholders of a filename
/// key.
///
/// `{{` and `}}` escape literal braces. Referencing an argument the schema
/// did not produce, an unterminated `{`, or a stray `}` is a
/// [`TempyError::TemplateSyntax`] — filename problems surface at apply time,
/// not load time, because only then are the argument values known.
pub fn render_filename(key: &str, values: &HashMap<String, String>) -> TempyResult<String> {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => {
                            return Err(TempyError::TemplateSyntax {
                                reason: format!("unterminated '{{' in filename '{key}'"),
                            });
                        }
                    }
                }
                let value = values.get(&name).ok_or_else(|| TempyError::TemplateSyntax {
                    reason: format!("undefined variable '{name}' in filename '{key}'"),
                })?;
                out.push_str(value);
            }
            '}' => {
                return Err(TempyError::TemplateSyntax {
                    reason: format!("single '}}' in filename '{key}'"),
                });
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn effective_name_prefers_metadata() {
        let mut meta = Metadata::empty();
        meta.name = Some("pretty".into());
        let set = TemplateSet::new("ugly-dir", meta, vec![ContentTemplate::new("a", "b")]);
        assert_eq!(set.effective_name(), "pretty");
    }

    #[test]
    fn effective_name_falls_back_to_entry() {
        let set = TemplateSet::new(
            "plain.txt",
            Metadata::empty(),
            vec![ContentTemplate::new("a", "b")],
        );
        assert_eq!(set.effective_name(), "plain.txt");
    }

    #[test]
    fn filename_without_placeholders_passes_through() {
        assert_eq!(
            render_filename("Makefile", &values(&[])).unwrap(),
            "Makefile"
        );
    }

    #[test]
    fn filename_placeholder_is_substituted() {
        assert_eq!(
            render_filename("{name}.txt", &values(&[("name", "bob")])).unwrap(),
            "bob.txt"
        );
    }

    #[test]
    fn doubled_braces_are_literal() {
        assert_eq!(
            render_filename("{{raw}}-{name}", &values(&[("name", "x")])).unwrap(),
            "{raw}-x"
        );
    }

    #[test]
    fn undefined_variable_is_syntax_error() {
        let err = render_filename("{nope}.txt", &values(&[])).unwrap_err();
        assert!(matches!(err, TempyError::TemplateSyntax { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn unterminated_brace_is_syntax_error() {
        let err = render_filename("{name.txt", &values(&[("name", "x")])).unwrap_err();
        assert!(matches!(err, TempyError::TemplateSyntax { .. }));
    }

    #[test]
    fn stray_closing_brace_is_syntax_error() {
        let err = render_filename("oops}.txt", &values(&[])).unwrap_err();
        assert!(matches!(err, TempyError::TemplateSyntax { .. }));
    }
}
