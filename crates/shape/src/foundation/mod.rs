//! Core validation types and traits
//!
//! This module contains the building blocks every check is made of:
//!
//! - **Paths**: [`Path`], where a value sits for error reports
//! - **Accumulation**: [`Target`], [`Resolved`]
//! - **Errors**: [`ErrorEntry`], [`Failure`], [`ValidationFailure`], [`SpecError`]
//! - **Traits**: [`Combinator`]

pub mod error;
pub mod path;
pub mod target;
pub mod traits;

pub use error::{ErrorCode, ErrorEntry, Failure, SpecError, ValidationFailure, flatten};
pub use path::Path;
pub use target::{Resolved, Target, is_truthy};
pub use traits::Combinator;

/// Outcome of checking one value against one spec.
pub type CheckResult = Result<Resolved, Failure>;
