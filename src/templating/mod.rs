//! Page contexts and their rendering.
//!
//! A page is assembled in two steps. The page assemblers in [`crate::pages`]
//! drive a [`ContextBuilder`], which records named fields, boolean-gated
//! conditional regions and repeating regions into a tree. The finished
//! [`RenderContext`] is then handed to a [`PageRenderer`], normally the
//! Tera-backed [`TeraPageRenderer`].
//!
//! # Region Nesting
//!
//! Regions nest strictly. The scoped handles returned by
//! [`ContextBuilder::conditional`] and [`ContextBuilder::repeating`] close
//! their region when dropped, so the usual way to build a context is:
//!
//! ```rust
//! use isoftrepo::templating::ContextBuilder;
//!
//! let mut builder = ContextBuilder::new();
//! builder.set_field("MODULE", "gromacs");
//! {
//!     let mut versions = builder.repeating("VERSIONS");
//!     for v in ["2021.4", "2020.1"] {
//!         versions.row(|row| row.set_field("MODVER", format!("gromacs:{v}")));
//!     }
//! }
//! let context = builder.finalize().unwrap();
//! assert_eq!(context.repeating("VERSIONS").map(<[_]>::len), Some(2));
//! ```
//!
//! # Template View
//!
//! Templates see the context as JSON (see [`RenderContext::to_json`]):
//! fields are strings, repeating regions are arrays of row objects, an active
//! conditional is an object (or `true` when empty) and an inactive one is
//! `false`, so `{% if NAME %}` works for every conditional.

pub mod context;
pub mod renderer;

pub use context::{
    Conditional, ConditionalRegion, ContextBuilder, Node, RegionKind, RenderContext, RepeatingRegion,
    Scope, StructuralError,
};
pub use renderer::{JsonPageRenderer, PageRenderer, PageTemplate, TeraPageRenderer};
