//! # nebula-shape
//!
//! Declarative, asynchronous validation of JSON-shaped data.
//!
//! A [`Spec`] describes what a value should look like: a primitive
//! category, an object shape, a Rust type, or a composition of those
//! through combinators. [`discriminate`] turns a spec into a reusable
//! [`Validator`] that checks a [`serde_json::Value`] and returns either the
//! normalized value (defaults filled in, casts applied, undeclared fields
//! dropped) or a [`ValidationFailure`] listing every error with its path.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nebula_shape::prelude::*;
//! use serde_json::json;
//!
//! let user = discriminate_named(
//!     "User",
//!     ShapeMap::new()
//!         .field("name", required(Spec::text()))
//!         .field("age", cast(Primitive::Numeric))
//!         .field("admin", maybe_or(Spec::boolean(), json!(false))),
//! );
//!
//! let user = user.validate(&json!({ "name": "bob", "age": "42" })).await?;
//! assert_eq!(user, json!({ "name": "bob", "age": 42, "admin": false }));
//! ```
//!
//! ## Evaluation
//!
//! Sibling checks (object fields, list elements, `and` / `or` branches) run
//! concurrently and are never cancelled. Errors are always reported in
//! declaration order, whatever order the checks finished in.
//!
//! ## Combinators
//!
//! - **Presence**: [`required`](combinators::required),
//!   [`maybe`](combinators::maybe), [`maybe_or`](combinators::maybe_or)
//! - **Composition**: [`and`](combinators::and), [`or`](combinators::or),
//!   [`any`](combinators::any)
//! - **Collections**: [`list`](combinators::list),
//!   [`list_bounded`](combinators::list_bounded)
//! - **Coercion**: [`cast`](combinators::cast),
//!   [`cast_with`](combinators::cast_with)
//! - **User logic**: [`custom`](combinators::custom), or implement
//!   [`Combinator`](foundation::Combinator)

// ValidationFailure is returned by value from every validate call.
#![allow(clippy::result_large_err)]

pub mod combinators;
mod discriminate;
pub mod engine;
pub mod foundation;
pub mod prelude;
mod spec;

pub use discriminate::{Validator, discriminate, discriminate_named};
pub use foundation::{ErrorCode, ErrorEntry, Failure, SpecError, ValidationFailure};
pub use spec::{ClassMarker, Primitive, ShapeMap, Spec};
