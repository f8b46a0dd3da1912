//! Turning finished page contexts into output.
//!
//! The assemblers never produce markup themselves; they hand a
//! [`RenderContext`] and a [`PageTemplate`] to a [`PageRenderer`]. Two
//! renderers ship with the crate:
//!
//! - [`TeraPageRenderer`] - instantiates the HTML templates with Tera
//! - [`JsonPageRenderer`] - dumps the context as JSON, for debugging templates

use std::error::Error as _;
use std::path::Path;
use tera::{Context as TeraContext, Tera};

use super::RenderContext;
use crate::core::RepoError;

/// The fixed set of page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageTemplate {
    ListCategories,
    Module,
    Version,
    Build,
    Error,
}

impl PageTemplate {
    pub const ALL: [Self; 5] = [Self::ListCategories, Self::Module, Self::Version, Self::Build, Self::Error];

    /// Template file name inside the template directory.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::ListCategories => "ListCategories.html",
            Self::Module => "Module.html",
            Self::Version => "Version.html",
            Self::Build => "Build.html",
            Self::Error => "Error.html",
        }
    }
}

/// Something that turns a page context into bytes.
pub trait PageRenderer {
    fn render(&self, template: PageTemplate, context: &RenderContext) -> Result<String, RepoError>;
}

/// Tera-backed HTML renderer.
///
/// Regions map onto Tera constructs through [`RenderContext::to_json`]:
///
/// ```html
/// {% if ACL %}
///   <p>{{ ACL.DEFACL }}</p>
///   <ul>{% for r in ACL.RULES %}<li>{{ r.ACLRULE }}</li>{% endfor %}</ul>
/// {% endif %}
/// ```
///
/// Markup fields (`DESCRIPTION`, `MONITORING`) need the `safe` filter.
pub struct TeraPageRenderer {
    tera: Tera,
}

impl TeraPageRenderer {
    /// Load every `*.html` template below `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, RepoError> {
        let pattern = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&pattern).map_err(|e| RepoError::TemplateError {
            template: pattern.clone(),
            reason: describe(&e),
        })?;
        tracing::debug!(
            "Loaded {} templates from {}",
            tera.get_template_names().count(),
            dir.display()
        );
        Ok(Self {
            tera,
        })
    }

    /// Build a renderer from in-memory `(file name, source)` pairs.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, RepoError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(sources).map_err(|e| RepoError::TemplateError {
            template: "<inline>".to_string(),
            reason: describe(&e),
        })?;
        Ok(Self {
            tera,
        })
    }
}

impl PageRenderer for TeraPageRenderer {
    fn render(&self, template: PageTemplate, context: &RenderContext) -> Result<String, RepoError> {
        let name = template.file_name();
        let tera_context = TeraContext::from_serialize(context).map_err(|e| RepoError::TemplateError {
            template: name.to_string(),
            reason: describe(&e),
        })?;
        self.tera.render(name, &tera_context).map_err(|e| RepoError::TemplateError {
            template: name.to_string(),
            reason: describe(&e),
        })
    }
}

/// Renders the context itself as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPageRenderer;

impl PageRenderer for JsonPageRenderer {
    fn render(&self, _template: PageTemplate, context: &RenderContext) -> Result<String, RepoError> {
        Ok(serde_json::to_string_pretty(context)?)
    }
}

/// Tera nests the useful message in the source chain.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
