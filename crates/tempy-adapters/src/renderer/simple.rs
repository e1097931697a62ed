//! Built-in `${variable}` renderer.
//!
//! The body language is deliberately small: `${name}` is replaced with the
//! bound value, a `$` not followed by `{` passes through literally, and
//! everything else is copied verbatim. Compilation and rendering share one
//! scanner, so any source accepted by [`SimpleRenderer::compile`] renders
//! without a syntax error later (rendering can still fail on an unbound
//! variable).

use std::collections::HashMap;

use tracing::trace;

use tempy_core::application::ports::Renderer;
use tempy_core::error::{TempyError, TempyResult};

#[derive(Debug, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// One scan over the source, calling `substitute` per placeholder.
fn scan(
    source: &str,
    mut substitute: impl FnMut(&str) -> TempyResult<String>,
) -> TempyResult<String> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(inner) = after.strip_prefix('{') {
            let end = inner.find('}').ok_or_else(|| TempyError::TemplateSyntax {
                reason: "unterminated '${' placeholder".to_string(),
            })?;
            let name = &inner[..end];
            if name.is_empty() {
                return Err(TempyError::TemplateSyntax {
                    reason: "empty '${}' placeholder".to_string(),
                });
            }
            out.push_str(&substitute(name)?);
            rest = &inner[end + 1..];
        } else {
            // Lone '$' is literal.
            out.push('$');
            rest = after;
        }
    }
    out.push_str(rest);
    Ok(out)
}

impl Renderer for SimpleRenderer {
    fn compile(&self, source: &str) -> TempyResult<()> {
        scan(source, |name| Ok(format!("${{{name}}}")))?;
        trace!(bytes = source.len(), "template compiled");
        Ok(())
    }

    fn render(&self, source: &str, values: &HashMap<String, String>) -> TempyResult<String> {
        scan(source, |name| {
            values
                .get(name)
                .cloned()
                .ok_or_else(|| TempyError::TemplateSyntax {
                    reason: format!("undefined variable '{name}'"),
                })
        })
    }
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
    fn plain_text_passes_through() {
        let r = SimpleRenderer::new();
        assert_eq!(r.render("no placeholders", &values(&[])).unwrap(), "no placeholders");
    }

    #[test]
    fn placeholder_is_substituted() {
        let r = SimpleRenderer::new();
        let out = r
            .render("hello ${who}!", &values(&[("who", "alice")]))
            .unwrap();
        assert_eq!(out, "hello alice!");
    }

    #[test]
    fn repeated_placeholder_substitutes_every_occurrence() {
        let r = SimpleRenderer::new();
        let out = r
            .render("${x} and ${x}", &values(&[("x", "y")]))
            .unwrap();
        assert_eq!(out, "y and y");
    }

    #[test]
    fn lone_dollar_is_literal() {
        let r = SimpleRenderer::new();
        assert_eq!(r.render("costs $5", &values(&[])).unwrap(), "costs $5");
    }

    #[test]
    fn undefined_variable_is_syntax_error() {
        let r = SimpleRenderer::new();
        let err = r.render("hi ${who}", &values(&[])).unwrap_err();
        assert!(err.to_string().contains("undefined variable 'who'"));
    }

    #[test]
    fn compile_accepts_well_formed_source() {
        let r = SimpleRenderer::new();
        assert!(r.compile("hello ${who}, $5, done").is_ok());
    }

    #[test]
    fn compile_rejects_unterminated_placeholder() {
        let r = SimpleRenderer::new();
        let err = r.compile("hi ${who").unwrap_err();
        assert!(matches!(err, TempyError::TemplateSyntax { .. }));
    }

    #[test]
    fn compile_rejects_empty_placeholder() {
        let r = SimpleRenderer::new();
        let err = r.compile("hi ${}").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
