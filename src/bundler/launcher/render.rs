//! Template rendering engine seam.

use super::LauncherTemplateData;
use crate::error::LauncherError;
use handlebars::Handlebars;

/// Renders a template source against launcher data.
///
/// Implementations must be deterministic: the same source and data always
/// yield the same text.
pub trait TemplateRenderer {
    fn render(
        &self,
        name: &str,
        source: &str,
        data: &LauncherTemplateData,
    ) -> Result<String, LauncherError>;
}

/// Handlebars-backed renderer.
///
/// Strict mode turns a placeholder without a matching field into an error
/// instead of an empty substitution. Output is not HTML-escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandlebarsRenderer;

impl HandlebarsRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(
        &self,
        name: &str,
        source: &str,
        data: &LauncherTemplateData,
    ) -> Result<String, LauncherError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        handlebars
            .register_template_string(name, source)
            .map_err(|e| LauncherError::Register {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        handlebars
            .render(name, data)
            .map_err(|e| LauncherError::Render {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }
}
