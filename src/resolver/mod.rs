//! Projection of catalog records into page fields.
//!
//! The resolvers sit between the catalog records in [`crate::models`] and the
//! [`ContextBuilder`](crate::templating::ContextBuilder). Each one turns a
//! record into a plain view value first and only then writes that view into a
//! builder, so the decision logic can be tested without building contexts.
//!
//! - [`acl`] - default policy, rule labels and visibility of the `ACL` region
//! - [`dependency`] - bare / versioned / built classification of dependency edges
//! - [`setup`] - uniform `T` rows for variables, scripts and aliases, with
//!   secret masking

pub mod acl;
pub mod dependency;
pub mod setup;

pub use acl::AclView;
pub use dependency::{DependencyClass, DependencyView};
pub use setup::SetupRow;
