//! Dependency edge classification.
//!
//! A dependency names its target with a module token of any specificity. The
//! page shows each edge in exactly one of three forms:
//!
//! | token                  | class       | region   |
//! |------------------------|-------------|----------|
//! | `fftw`                 | Bare        | `MNAM`   |
//! | `fftw:3.3`             | Versioned   | `MVER`   |
//! | `fftw:3.3:x86_64:para` | Built       | `MBUILD` |

use crate::models::{DependencyEdge, ModuleIdentifier};
use crate::templating::ContextBuilder;
use crate::utils::encode_for_url;

/// Specificity of a dependency target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyClass {
    /// Module name only.
    Bare,
    /// Name and version, no mode.
    Versioned,
    /// Mode given; a concrete build.
    Built,
}

impl DependencyClass {
    /// Region name used by the templates.
    pub const fn region(self) -> &'static str {
        match self {
            Self::Bare => "MNAM",
            Self::Versioned => "MVER",
            Self::Built => "MBUILD",
        }
    }

    pub fn of(target: &ModuleIdentifier) -> Self {
        if target.has_mode() {
            Self::Built
        } else if target.has_version() {
            Self::Versioned
        } else {
            Self::Bare
        }
    }
}

/// A classified dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyView {
    pub kind: String,
    pub target: ModuleIdentifier,
    pub class: DependencyClass,
}

impl DependencyView {
    pub fn classify(edge: &DependencyEdge) -> Self {
        let target = ModuleIdentifier::parse(&edge.target_token);
        Self {
            kind: edge.kind.clone(),
            class: DependencyClass::of(&target),
            target,
        }
    }

    /// Write `DTYPE` and the three class regions into the current row.
    ///
    /// All three regions are present so templates can test each one; only the
    /// region of [`Self::class`] is active.
    pub fn emit(&self, row: &mut ContextBuilder) {
        row.set_field("DTYPE", self.kind.as_str());
        for class in [DependencyClass::Bare, DependencyClass::Versioned, DependencyClass::Built] {
            let mut region = row.conditional(class.region(), class == self.class);
            self.emit_fields(&mut region, class);
        }
    }

    fn emit_fields(&self, region: &mut ContextBuilder, class: DependencyClass) {
        let t = &self.target;
        set_with_url(region, "DNAME", &t.name);
        if class == DependencyClass::Bare {
            return;
        }
        set_with_url(region, "DVER", &t.version);
        if class == DependencyClass::Versioned {
            return;
        }
        set_with_url(region, "DARCH", &t.architecture);
        set_with_url(region, "DMODE", &t.mode);
    }
}

/// Write `DEPENDENCIES{ DEPS[...] }`; the region is inactive without a list.
pub fn emit_dependencies(builder: &mut ContextBuilder, edges: Option<&[DependencyEdge]>) {
    let mut deps = builder.conditional("DEPENDENCIES", edges.is_some());
    let mut rows = deps.repeating("DEPS");
    for edge in edges.unwrap_or_default() {
        let view = DependencyView::classify(edge);
        rows.row(|row| view.emit(row));
    }
}

fn set_with_url(builder: &mut ContextBuilder, name: &str, value: &str) {
    builder.set_field(name, value);
    builder.set_field(&format!("{name}URL"), encode_for_url(value));
}
