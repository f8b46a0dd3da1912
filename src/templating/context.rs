//! Page context building.
//!
//! A page context is an ordered tree of three kinds of entries:
//!
//! - **fields**: `NAME -> string`
//! - **conditional regions**: a named subtree with an active flag; the
//!   renderer skips inactive regions entirely
//! - **repeating regions**: a named sequence of row subtrees
//!
//! [`ContextBuilder`] produces the tree through a strict stack discipline.
//! Every region opened must be closed, in reverse order, before
//! [`ContextBuilder::finalize`] accepts the result. The scoped handles returned
//! by [`ContextBuilder::conditional`] and [`ContextBuilder::repeating`] close
//! their region when dropped, which is how the page assemblers use it:
//!
//! ```rust
//! use isoftrepo::templating::ContextBuilder;
//!
//! let mut builder = ContextBuilder::new();
//! builder.set_field("MODULE", "cp2k");
//! {
//!     let mut acl = builder.conditional("ACL", true);
//!     let mut rules = acl.repeating("RULES");
//!     for group in ["chemists", "physicists"] {
//!         rules.set_field("ACLRULE", format!("allow {group}"));
//!         rules.advance_row();
//!     }
//! }
//! let context = builder.finalize().unwrap();
//! let acl = context.conditional("ACL").unwrap();
//! assert!(acl.active);
//! assert_eq!(acl.body.repeating("RULES").unwrap().len(), 2);
//! ```
//!
//! The explicit `start_*`/`end_*` calls stay available for callers that cannot
//! express their nesting lexically. An `end_*` that does not match the
//! innermost region panics in debug builds. Release builds close the region
//! anyway, record the misuse and fail `finalize` with it.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::ops::{Deref, DerefMut};
use thiserror::Error;

/// Kind of a context region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Conditional,
    Repeating,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conditional => f.write_str("conditional"),
            Self::Repeating => f.write_str("repeating"),
        }
    }
}

/// Misuse of the region stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// `finalize` was called with regions still open (outermost first).
    #[error("unclosed regions: {}", regions.join(" > "))]
    UnclosedRegions {
        regions: Vec<String>,
    },

    /// The innermost open region has a different name.
    #[error("region '{found}' closed while '{expected}' is open")]
    MismatchedEnd {
        expected: String,
        found: String,
    },

    /// No region of the requested kind is open on top of the stack.
    #[error("no open {kind} region to close with '{name}'")]
    NotOpen {
        name: String,
        kind: RegionKind,
    },

    /// `advance_row` outside of a repeating region.
    #[error("row advanced outside of a repeating region")]
    RowOutsideRepeating,

    /// A repeating region was closed with content written after its last row.
    #[error("repeating region '{region}' closed with an unfinished row")]
    UnfinishedRow {
        region: String,
    },
}

impl StructuralError {
    /// An `end_*` call that does not match the innermost open region.
    pub fn is_unbalanced_end(&self) -> bool {
        matches!(
            self,
            Self::MismatchedEnd {
                ..
            } | Self::NotOpen {
                ..
            }
        )
    }
}

/// A conditional region in a finished context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    pub active: bool,
    pub body: Scope,
}

/// One entry of a [`Scope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Field(String),
    Conditional(Conditional),
    Repeating(Vec<Scope>),
}

/// Ordered set of named entries: the root, a conditional body or one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    entries: Vec<(String, Node)>,
}

impl Scope {
    /// Write a field, overwriting an existing field of the same name.
    fn set_field(&mut self, name: &str, value: String) {
        let existing = self
            .entries
            .iter_mut()
            .find(|(n, node)| n == name && matches!(node, Node::Field(_)));
        match existing {
            Some((_, node)) => *node = Node::Field(value),
            None => self.entries.push((name.to_string(), Node::Field(value))),
        }
    }

    fn push(&mut self, name: String, node: Node) {
        self.entries.push((name, node));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.entries.iter().find_map(|(n, node)| match node {
            Node::Field(value) if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn conditional(&self, name: &str) -> Option<&Conditional> {
        self.entries.iter().find_map(|(n, node)| match node {
            Node::Conditional(c) if n == name => Some(c),
            _ => None,
        })
    }

    pub fn repeating(&self, name: &str) -> Option<&[Scope]> {
        self.entries.iter().find_map(|(n, node)| match node {
            Node::Repeating(rows) if n == name => Some(rows.as_slice()),
            _ => None,
        })
    }

    /// JSON view consumed by template engines.
    ///
    /// Fields become strings and repeating regions arrays of row objects. An
    /// active conditional becomes the object of its content, or `true` when
    /// it has none; an inactive one becomes `false`.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, node) in &self.entries {
            let value = match node {
                Node::Field(value) => Value::String(value.clone()),
                Node::Repeating(rows) => Value::Array(rows.iter().map(Scope::to_json).collect()),
                Node::Conditional(Conditional {
                    active: false,
                    ..
                }) => Value::Bool(false),
                Node::Conditional(Conditional {
                    active: true,
                    body,
                }) if body.is_empty() => Value::Bool(true),
                Node::Conditional(Conditional {
                    body,
                    ..
                }) => body.to_json(),
            };
            map.insert(name.clone(), value);
        }
        Value::Object(map)
    }
}

/// A finalized page context, ready to hand to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    root: Scope,
}

impl RenderContext {
    pub fn root(&self) -> &Scope {
        &self.root
    }

    pub fn to_json(&self) -> Value {
        self.root.to_json()
    }
}

impl Deref for RenderContext {
    type Target = Scope;

    fn deref(&self) -> &Scope {
        &self.root
    }
}

impl Serialize for RenderContext {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

#[derive(Debug)]
enum Frame {
    Conditional {
        name: String,
        active: bool,
        body: Scope,
    },
    Repeating {
        name: String,
        rows: Vec<Scope>,
        current: Scope,
    },
}

impl Frame {
    fn name(&self) -> &str {
        match self {
            Self::Conditional {
                name,
                ..
            }
            | Self::Repeating {
                name,
                ..
            } => name,
        }
    }

    fn kind(&self) -> RegionKind {
        match self {
            Self::Conditional {
                ..
            } => RegionKind::Conditional,
            Self::Repeating {
                ..
            } => RegionKind::Repeating,
        }
    }
}

/// Stack-discipline builder for a [`RenderContext`].
///
/// One builder belongs to one page assembly; it is not shared.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    root: Scope,
    stack: Vec<Frame>,
    faults: Vec<StructuralError>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth (0 at the root).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn current_scope(&mut self) -> &mut Scope {
        match self.stack.last_mut() {
            None => &mut self.root,
            Some(Frame::Conditional {
                body,
                ..
            }) => body,
            Some(Frame::Repeating {
                current,
                ..
            }) => current,
        }
    }

    /// Record a misuse. Unbalanced ends are caller bugs and abort debug builds.
    fn fault(&mut self, error: StructuralError) -> StructuralError {
        debug_assert!(!error.is_unbalanced_end(), "page context misuse: {error}");
        tracing::warn!("page context misuse: {error}");
        self.faults.push(error.clone());
        error
    }

    /// Write or overwrite a field in the innermost open region.
    ///
    /// Empty values are stored as empty strings.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.current_scope().set_field(name, value);
    }

    /// Open a conditional region.
    ///
    /// Content written to an inactive region is accepted and kept, but the
    /// region is marked inactive for the renderer.
    pub fn start_conditional(&mut self, name: &str, active: bool) {
        self.stack.push(Frame::Conditional {
            name: name.to_string(),
            active,
            body: Scope::default(),
        });
    }

    /// Close the innermost conditional region, which must be named `name`.
    ///
    /// A conditional with a different name is still closed, and the mismatch
    /// is recorded so that `finalize` fails.
    pub fn end_conditional(&mut self, name: &str) -> Result<(), StructuralError> {
        match self.stack.last() {
            Some(Frame::Conditional {
                name: open,
                ..
            }) => {
                let mismatch = (open != name).then(|| StructuralError::MismatchedEnd {
                    expected: open.clone(),
                    found: name.to_string(),
                });
                self.close_top();
                match mismatch {
                    Some(error) => Err(self.fault(error)),
                    None => Ok(()),
                }
            }
            _ => Err(self.fault(StructuralError::NotOpen {
                name: name.to_string(),
                kind: RegionKind::Conditional,
            })),
        }
    }

    /// Open a repeating region with no rows.
    pub fn start_repeating(&mut self, name: &str) {
        self.stack.push(Frame::Repeating {
            name: name.to_string(),
            rows: Vec::new(),
            current: Scope::default(),
        });
    }

    /// Commit the current row of the innermost repeating region and start the
    /// next one.
    pub fn advance_row(&mut self) {
        match self.stack.last_mut() {
            Some(Frame::Repeating {
                rows,
                current,
                ..
            }) => rows.push(std::mem::take(current)),
            _ => {
                self.fault(StructuralError::RowOutsideRepeating);
            }
        }
    }

    /// Close the innermost repeating region, which must be named `name`.
    ///
    /// Closing right after `start_repeating` yields an empty sequence.
    /// Content written after the last `advance_row` is discarded and recorded
    /// as an unfinished row.
    pub fn end_repeating(&mut self, name: &str) -> Result<(), StructuralError> {
        let (open, unfinished) = match self.stack.last() {
            Some(Frame::Repeating {
                name: open,
                current,
                ..
            }) => (open.clone(), !current.is_empty()),
            _ => {
                return Err(self.fault(StructuralError::NotOpen {
                    name: name.to_string(),
                    kind: RegionKind::Repeating,
                }));
            }
        };

        self.close_top();

        if open != name {
            return Err(self.fault(StructuralError::MismatchedEnd {
                expected: open,
                found: name.to_string(),
            }));
        }
        if unfinished {
            return Err(self.fault(StructuralError::UnfinishedRow {
                region: open,
            }));
        }
        Ok(())
    }

    fn close_top(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let (name, node) = match frame {
            Frame::Conditional {
                name,
                active,
                body,
            } => (
                name,
                Node::Conditional(Conditional {
                    active,
                    body,
                }),
            ),
            Frame::Repeating {
                name,
                rows,
                ..
            } => (name, Node::Repeating(rows)),
        };
        self.current_scope().push(name, node);
    }

    /// Scoped conditional region, closed when the handle is dropped.
    pub fn conditional(&mut self, name: &str, active: bool) -> ConditionalRegion<'_> {
        self.start_conditional(name, active);
        ConditionalRegion {
            builder: self,
            name: name.to_string(),
        }
    }

    /// Scoped repeating region, closed when the handle is dropped.
    pub fn repeating(&mut self, name: &str) -> RepeatingRegion<'_> {
        self.start_repeating(name);
        RepeatingRegion {
            builder: self,
            name: name.to_string(),
        }
    }

    /// Validate the stack and return the finished context.
    ///
    /// # Errors
    ///
    /// The first recorded misuse, or [`StructuralError::UnclosedRegions`]
    /// when regions are still open.
    pub fn finalize(self) -> Result<RenderContext, StructuralError> {
        if let Some(first) = self.faults.into_iter().next() {
            return Err(first);
        }
        if !self.stack.is_empty() {
            return Err(StructuralError::UnclosedRegions {
                regions: self.stack.iter().map(|f| format!("{} {}", f.kind(), f.name())).collect(),
            });
        }
        Ok(RenderContext {
            root: self.root,
        })
    }
}

/// Handle of an open conditional region; dereferences to the builder.
pub struct ConditionalRegion<'a> {
    builder: &'a mut ContextBuilder,
    name: String,
}

impl Deref for ConditionalRegion<'_> {
    type Target = ContextBuilder;

    fn deref(&self) -> &ContextBuilder {
        &*self.builder
    }
}

impl DerefMut for ConditionalRegion<'_> {
    fn deref_mut(&mut self) -> &mut ContextBuilder {
        &mut *self.builder
    }
}

impl Drop for ConditionalRegion<'_> {
    fn drop(&mut self) {
        // Failures are recorded in the builder and surface at finalize.
        let _ = self.builder.end_conditional(&self.name);
    }
}

/// Handle of an open repeating region; dereferences to the builder.
pub struct RepeatingRegion<'a> {
    builder: &'a mut ContextBuilder,
    name: String,
}

impl RepeatingRegion<'_> {
    /// Fill one row and commit it.
    pub fn row(&mut self, fill: impl FnOnce(&mut ContextBuilder)) {
        fill(&mut *self.builder);
        self.builder.advance_row();
    }
}

impl Deref for RepeatingRegion<'_> {
    type Target = ContextBuilder;

    fn deref(&self) -> &ContextBuilder {
        &*self.builder
    }
}

impl DerefMut for RepeatingRegion<'_> {
    fn deref_mut(&mut self) -> &mut ContextBuilder {
        &mut *self.builder
    }
}

impl Drop for RepeatingRegion<'_> {
    fn drop(&mut self) {
        let _ = self.builder.end_repeating(&self.name);
    }
}
