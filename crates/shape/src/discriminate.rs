//! The specification factory.
//!
//! [`discriminate`] turns a [`Spec`] into a reusable [`Validator`]. A
//! validator owns the error envelope: whatever goes wrong below it is
//! flattened into one [`ValidationFailure`] titled `"Invalid <name>"`.
//!
//! Validators nest. Used as a field inside another spec, a validator is
//! checked at the parent's path and its errors are spliced into the
//! parent's list; its own title is dropped.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::engine::check;
use crate::foundation::{CheckResult, Path, Target, ValidationFailure};
use crate::spec::Spec;

/// Title used for anonymous validators.
const ANONYMOUS: &str = "data";

/// A built, reusable validator.
///
/// Cheap to clone; clones share the spec.
///
/// # Examples
///
/// ```rust,ignore
/// use nebula_shape::prelude::*;
/// use serde_json::json;
///
/// let user = discriminate_named(
///     "User",
///     ShapeMap::new()
///         .field("name", required(Spec::text()))
///         .field("age", required(Spec::number())),
/// );
///
/// let err = user.validate(&json!({ "name": 1 })).await.unwrap_err();
/// assert_eq!(err.message, "Invalid User");
/// assert_eq!(err.paths(), vec![Some("User.name"), Some("User.age")]);
/// ```
#[derive(Clone)]
pub struct Validator {
    inner: Arc<ValidatorInner>,
}

struct ValidatorInner {
    name: Option<String>,
    spec: Spec,
}

impl Validator {
    /// An anonymous validator; errors are titled `"Invalid data"` and
    /// top-level errors carry no path.
    pub fn new(spec: impl Into<Spec>) -> Self {
        Self::build(None, spec.into())
    }

    /// A named validator; the name is the root of every error path.
    pub fn named(name: impl Into<String>, spec: impl Into<Spec>) -> Self {
        Self::build(Some(name.into()), spec.into())
    }

    fn build(name: Option<String>, spec: Spec) -> Self {
        Self {
            inner: Arc::new(ValidatorInner { name, spec }),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// The name, or `"data"` for anonymous validators.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or(ANONYMOUS)
    }

    pub fn spec(&self) -> &Spec {
        &self.inner.spec
    }

    fn root_path(&self) -> Path {
        self.name().map_or_else(Path::root, Path::named)
    }

    /// Validates `data`, returning the normalized value or the envelope of
    /// every error found.
    #[tracing::instrument(level = "debug", skip_all, fields(validator = %self.display_name()))]
    pub async fn validate(&self, data: &Value) -> Result<Value, ValidationFailure> {
        let target = Target::new();
        let path = self.root_path();

        match check(self.spec(), &target, data, &path).await {
            Ok(resolved) => Ok(resolved.into_value()),
            Err(failure) => {
                let failure =
                    ValidationFailure::new(format!("Invalid {}", self.display_name()), failure);
                debug!(errors = failure.errors.len(), "value rejected");
                Err(failure)
            }
        }
    }

    /// Callback form of [`validate`](Self::validate).
    pub async fn validate_with<F, R>(&self, data: &Value, callback: F) -> R
    where
        F: FnOnce(Result<Value, ValidationFailure>) -> R,
    {
        callback(self.validate(data).await)
    }

    /// Checks as a nested spec: at the parent's path, with a fresh target,
    /// and without an envelope.
    pub(crate) async fn check_nested(&self, value: &Value, path: &Path) -> CheckResult {
        check(self.spec(), &Target::new(), value, path).await
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.inner.name)
            .field("spec", &self.inner.spec)
            .finish()
    }
}

/// Builds an anonymous validator.
pub fn discriminate(spec: impl Into<Spec>) -> Validator {
    Validator::new(spec)
}

/// Builds a named validator.
pub fn discriminate_named(name: impl Into<String>, spec: impl Into<Spec>) -> Validator {
    Validator::named(name, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::required;
    use crate::spec::ShapeMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_anonymous_envelope() {
        let err = discriminate(Spec::text())
            .validate(&json!(1))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid data");
        assert_eq!(err.paths(), vec![None]);
        assert_eq!(err.errors[0].message, "value must be a String, but saw `1`");
    }

    #[tokio::test]
    async fn test_named_root_path() {
        let err = discriminate_named("Age", Spec::number())
            .validate(&json!("x"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid Age");
        assert_eq!(err.errors[0].path.as_deref(), Some("Age"));
        assert_eq!(err.errors[0].message, r#"Age must be a Number, but saw `"x"`"#);
    }

    #[tokio::test]
    async fn test_nested_validator_uses_parent_path() {
        let sub = discriminate_named("Sub", ShapeMap::new().field("something", required(Spec::text())));
        let outer = discriminate(ShapeMap::new().field("sub", &sub));

        let err = outer.validate(&json!({ "sub": {} })).await.unwrap_err();
        assert_eq!(err.message, "Invalid data");
        assert_eq!(err.paths(), vec![Some("sub.something")]);
        assert_eq!(err.errors[0].message, "something is required.");
    }

    #[tokio::test]
    async fn test_validate_with_callback() {
        let validator = discriminate(Spec::boolean());
        let seen = validator
            .validate_with(&json!(true), |result| result.map(|v| v == json!(true)))
            .await;
        assert_eq!(seen, Ok(true));
    }

    #[test]
    fn test_names() {
        assert_eq!(discriminate(Spec::null()).display_name(), "data");
        assert_eq!(discriminate(Spec::null()).name(), None);
        assert_eq!(discriminate_named("User", Spec::null()).display_name(), "User");
        assert_eq!(Spec::from(discriminate_named("User", Spec::null())).type_name(), "User");
    }
}
