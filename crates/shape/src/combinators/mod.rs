//! Combinators for composing specifications
//!
//! Every combinator implements [`Combinator`](crate::foundation::Combinator)
//! and comes with a free builder function returning a ready-to-use
//! [`Spec`](crate::Spec):
//!
//! - [`required`] - rejects null
//! - [`maybe`], [`maybe_or`] - accepts null, optionally substituting a default
//! - [`custom`] - user predicate
//! - [`and`] - every branch must pass
//! - [`or`] - at least one branch must pass
//! - [`any`] - accepts everything
//! - [`list`], [`list_bounded`] - arrays of one element spec
//! - [`cast`], [`cast_with`] - coercion into a primitive
//!
//! Builders that can be given a malformed specification (`and`, `or`,
//! `list_bounded`, `cast_with`) return a [`SpecError`](crate::SpecError)
//! immediately.

pub mod and;
pub mod any;
pub mod cast;
pub mod custom;
pub mod list;
pub mod maybe;
pub mod or;
pub mod required;

pub use and::{And, and};
pub use any::{Any, any};
pub use cast::{Cast, cast, cast_with, coerce};
pub use custom::{Custom, custom};
pub use list::{List, list, list_bounded};
pub use maybe::{Maybe, maybe, maybe_or};
pub use or::{Or, or};
pub use required::{Required, required};
