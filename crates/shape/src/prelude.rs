//! Prelude module for convenient imports.
//!
//! Provides a single `use nebula_shape::prelude::*;` import that brings in
//! the spec types, the validator factory and every combinator builder,
//! plus what a custom [`Combinator`] needs.

// ============================================================================
// FACTORY & SPECS
// ============================================================================

pub use crate::{ClassMarker, Primitive, ShapeMap, Spec, Validator, discriminate, discriminate_named};

// ============================================================================
// FOUNDATION: Errors, paths, accumulation
// ============================================================================

pub use crate::foundation::{
    CheckResult, Combinator, ErrorCode, ErrorEntry, Failure, Path, Resolved, SpecError, Target,
    ValidationFailure,
};

// ============================================================================
// COMBINATORS: Builders and types
// ============================================================================

pub use crate::combinators::{
    And, Any, Cast, Custom, List, Maybe, Or, Required, and, any, cast, cast_with, custom, list,
    list_bounded, maybe, maybe_or, or, required,
};

pub use serde_json::Value;
